//! Structured logging for debris-core.
//!
//! Two output modes, both on stderr:
//! - Human-readable console output (ANSI only on a terminal)
//! - JSONL, one object per event, for pipelines and agents
//!
//! stdout is reserved for command payloads.
//!
//! ```ignore
//! use debris_core::logging::{init_logging, LogConfig, LogContext, Stage, event_names};
//!
//! init_logging(&LogConfig::from_env(None, None));
//! let ctx = LogContext::for_current_run();
//! debris_core::log_event!(ctx, INFO, event_names::RUN_STARTED, Stage::Init, "starting");
//! ```

pub mod config;
pub mod events;
pub mod layer;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::{event_names, Level, LogContext, Stage};
pub use layer::JsonlLayer;

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_new(config.filter_directive())
        .unwrap_or_else(|_| EnvFilter::new(format!("debris_core={}", config.level)));

    let result = match config.format {
        LogFormat::Human => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => tracing_subscriber::registry()
            .with(filter)
            .with(JsonlLayer::stderr())
            .try_init(),
    };
    // A subscriber is already installed (tests, embedding callers).
    let _ = result;
}

/// Short unique ID for one invocation: `run-` plus 12 hex digits.
pub fn generate_run_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("run-{}", &simple[..12])
}

/// Stable per-machine ID: `host-` plus 8 hex digits.
///
/// Prefers /etc/machine-id, then a hash of `HOSTNAME`, then a random ID.
pub fn get_host_id() -> String {
    if let Ok(id) = std::fs::read_to_string("/etc/machine-id") {
        let id = id.trim();
        if id.len() >= 8 && id.is_ascii() {
            return format!("host-{}", &id[..8]);
        }
    }
    if let Ok(hostname) = std::env::var("HOSTNAME") {
        if !hostname.is_empty() {
            return format!("host-{}", &short_hash(&hostname)[..8]);
        }
    }
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("host-{}", &simple[..8])
}

fn short_hash(s: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Emit a tracing event stamped with the run context, an event name and a stage.
///
/// ```ignore
/// log_event!(ctx, INFO, event_names::HOTSPOTS_RANKED, Stage::Rank, "ranked regions", count = 3);
/// ```
#[macro_export]
macro_rules! log_event {
    (@emit $lvl:ident, $ctx:expr, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)* $(,)?) => {
        ::tracing::$lvl!(
            event = $event,
            run_id = %$ctx.run_id,
            host_id = %$ctx.host_id,
            stage = %$stage,
            $($key = $val,)*
            "{}",
            $msg
        )
    };
    ($ctx:expr, INFO, $($rest:tt)*) => { $crate::log_event!(@emit info, $ctx, $($rest)*) };
    ($ctx:expr, DEBUG, $($rest:tt)*) => { $crate::log_event!(@emit debug, $ctx, $($rest)*) };
    ($ctx:expr, WARN, $($rest:tt)*) => { $crate::log_event!(@emit warn, $ctx, $($rest)*) };
    ($ctx:expr, ERROR, $($rest:tt)*) => { $crate::log_event!(@emit error, $ctx, $($rest)*) };
}
