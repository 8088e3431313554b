//! Debris Analytics Core - command-line front end
//!
//! Thin wrapper over the analytics library:
//! - Risk scoring, anomaly detection, forecasting and trend labels
//! - Risk-factor explanations, hotspot ranking and region comparison
//! - Dashboard summaries and altitude filtering
//! - Configuration inspection and JSON schemas
//!
//! Payloads go to stdout; logs and errors go to stderr.

use clap::{Args, Parser, Subcommand, ValueEnum};
use debris_common::error::{format_error_human, StructuredError};
use debris_common::{
    Anomaly, Error, FactorMetrics, Hotspot, Measurement, OutputFormat, RegionMetrics, RiskFactor,
    Sensitivity, SCHEMA_VERSION,
};
use debris_config::AnalyticsConfig;
use debris_core::analytics::{
    altitude_from_mean_motion, filter_by_altitude, format_timestamp, ranked_factors,
    risk_components, AltitudeBand, CatalogObject, Clock, SystemClock,
};
use debris_core::config::{load_config, ConfigOptions, ResolvedConfig};
use debris_core::exit_codes::ExitCode;
use debris_core::input;
use debris_core::log_event;
use debris_core::logging::{
    event_names, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage,
};
use debris_core::AnalyticsEngine;
use serde_json::{json, Value};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Orbital debris analytics: risk, anomalies, forecasts and hotspots
#[derive(Parser)]
#[command(name = "debris-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to analytics.json (overrides env and XDG lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one measurement
    Risk(RiskArgs),

    /// Flag unusual points in a series
    Anomalies(AnomalyArgs),

    /// Project a series forward with exponential smoothing
    Forecast(ForecastArgs),

    /// Classify the direction of a series
    Trend(SeriesArgs),

    /// Break a risk estimate into weighted factors
    Explain(ExplainArgs),

    /// Rank regions whose risk exceeds a threshold
    Hotspots(HotspotArgs),

    /// Compare two regions from a region document
    Compare(CompareArgs),

    /// Dashboard overview from regions and a risk history
    Summary(SummaryArgs),

    /// Derive altitude from mean motion, or filter a catalog by band
    Altitude(AltitudeArgs),

    /// Validate configuration
    Check,

    /// Configuration management
    Config(ConfigArgs),

    /// Print the JSON schema of an input or output document
    Schema(SchemaArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct RiskArgs {
    /// Spatial debris density
    #[arg(long)]
    density: f64,

    /// Catalogued object count
    #[arg(long)]
    objects: u64,

    /// Clustering index in [0, 1]
    #[arg(long)]
    clustering: f64,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    /// Inline series: "1,2,3", "1 2 3" or a JSON array
    #[arg(long, allow_hyphen_values = true)]
    series: Option<String>,

    /// Series file (JSON array, {"series": [...]} or plain numbers); "-" for stdin
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AnomalyArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Detection sensitivity
    #[arg(long, default_value = "medium")]
    sensitivity: Sensitivity,
}

#[derive(Args, Debug)]
struct ForecastArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Periods to project (default from config)
    #[arg(long)]
    periods: Option<usize>,

    /// Smoothing factor in (0, 1] (default from config)
    #[arg(long)]
    alpha: Option<f64>,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    /// Fractional growth per period
    #[arg(long, allow_hyphen_values = true)]
    growth_rate: f64,

    #[arg(long)]
    objects: u64,

    #[arg(long)]
    clustering: f64,

    /// Inclination factor; omitted or zero uses the configured default weight
    #[arg(long)]
    inclination: Option<f64>,

    /// Order factors by contribution, largest first
    #[arg(long)]
    ranked: bool,
}

#[derive(Args, Debug)]
struct HotspotArgs {
    /// Region document; "-" for stdin
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Risk threshold (default from config)
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Region document; "-" for stdin
    #[arg(long, short = 'i')]
    input: PathBuf,

    #[arg(long)]
    region_a: String,

    #[arg(long)]
    region_b: String,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Dashboard document {"regions": {...}, "risk_series": [...]}; "-" for stdin
    #[arg(long, short = 'i')]
    input: PathBuf,

    #[arg(long, default_value = "medium")]
    sensitivity: Sensitivity,
}

#[derive(Args, Debug)]
struct AltitudeArgs {
    /// Mean motion in revolutions per day
    #[arg(long, conflicts_with = "input")]
    mean_motion: Option<f64>,

    /// Catalog document (array of {object_id, mean_motion}); "-" for stdin
    #[arg(long, short = 'i', requires = "band")]
    input: Option<PathBuf>,

    /// Altitude band, e.g. "750-800 km"
    #[arg(long)]
    band: Option<AltitudeBand>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration and where it came from
    Show,
    /// Validate a configuration file without using it
    Validate {
        /// File to validate (defaults to the resolved config)
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Document to describe
    #[arg(value_enum)]
    document: SchemaDocument,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaDocument {
    Config,
    Measurement,
    Region,
    FactorMetrics,
    Anomaly,
    Hotspot,
    RiskFactor,
    Catalog,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);

    let ctx = LogContext::for_current_run();
    log_event!(
        ctx,
        DEBUG,
        event_names::RUN_STARTED,
        Stage::Init,
        "starting command"
    );

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Risk(args) => run_risk(global, &ctx, args),
        Commands::Anomalies(args) => run_anomalies(global, &ctx, args),
        Commands::Forecast(args) => run_forecast(global, &ctx, args),
        Commands::Trend(args) => run_trend(global, &ctx, args),
        Commands::Explain(args) => run_explain(global, &ctx, args),
        Commands::Hotspots(args) => run_hotspots(global, &ctx, args),
        Commands::Compare(args) => run_compare(global, &ctx, args),
        Commands::Summary(args) => run_summary(global, &ctx, args),
        Commands::Altitude(args) => run_altitude(global, &ctx, args),
        Commands::Check => run_check(global, &ctx),
        Commands::Config(args) => run_config(global, &ctx, args),
        Commands::Schema(args) => run_schema(args),
        Commands::Version => {
            print_version(global);
            Ok(ExitCode::Clean)
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => output_error(&cli.global, &ctx, &err),
    };

    log_event!(
        ctx,
        DEBUG,
        event_names::RUN_FINISHED,
        Stage::Report,
        "command finished",
        exit_code = exit_code.as_i32()
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Configuration
// ============================================================================

fn resolve(config_path: Option<&Path>, ctx: &LogContext) -> Result<ResolvedConfig, Error> {
    let options = ConfigOptions {
        config_path: config_path.map(Path::to_path_buf),
    };
    match load_config(&options) {
        Ok(resolved) => {
            if resolved.path().is_some() {
                log_event!(
                    ctx,
                    INFO,
                    event_names::CONFIG_LOADED,
                    Stage::Load,
                    "configuration loaded",
                    source = tracing::field::display(resolved.source())
                );
            } else {
                log_event!(
                    ctx,
                    DEBUG,
                    event_names::CONFIG_DEFAULT_USED,
                    Stage::Load,
                    "using builtin configuration"
                );
            }
            Ok(resolved)
        }
        Err(e) => {
            log_event!(
                ctx,
                WARN,
                event_names::CONFIG_ERROR,
                Stage::Load,
                "configuration rejected",
                error = tracing::field::display(&e)
            );
            Err(e.into())
        }
    }
}

fn load_engine(global: &GlobalOpts, ctx: &LogContext) -> Result<AnalyticsEngine, Error> {
    resolve(global.config.as_deref(), ctx).map(|resolved| AnalyticsEngine::new(resolved.config))
}

fn run_check(global: &GlobalOpts, ctx: &LogContext) -> Result<ExitCode, Error> {
    let resolved = resolve(global.config.as_deref(), ctx)?;
    let snapshot = resolved.snapshot();

    let payload = json!({
        "status": "ok",
        "config": snapshot,
    });
    let markdown = format!(
        "# Configuration Check\n\n- Status: ok\n- Source: {}\n- Path: {}\n",
        snapshot.config_source,
        snapshot.config_path.as_deref().unwrap_or("(builtin)")
    );
    let summary = format!("config ok ({})", snapshot.config_source);
    emit(global, ctx, "check", payload, &markdown, &summary);
    Ok(ExitCode::Clean)
}

fn run_config(global: &GlobalOpts, ctx: &LogContext, args: &ConfigArgs) -> Result<ExitCode, Error> {
    match &args.command {
        ConfigCommands::Show => {
            let resolved = resolve(global.config.as_deref(), ctx)?;
            let snapshot = resolved.snapshot();
            let payload = json!({
                "source": snapshot,
                "values": &resolved.config,
            });
            let values = serde_json::to_string_pretty(&resolved.config)?;
            let markdown = format!(
                "# Configuration\n\nSource: {}\n\n```json\n{}\n```\n",
                snapshot.config_source, values
            );
            let summary = format!(
                "{} (hash {})",
                snapshot.config_source,
                snapshot.config_hash.as_deref().unwrap_or("none")
            );
            emit(global, ctx, "config show", payload, &markdown, &summary);
            Ok(ExitCode::Clean)
        }
        ConfigCommands::Validate { path } => {
            let resolved = resolve(path.as_deref().or(global.config.as_deref()), ctx)?;
            let snapshot = resolved.snapshot();
            let payload = json!({ "status": "valid", "config": snapshot });
            let markdown = format!(
                "# Configuration Valid\n\n- Source: {}\n- Hash: {}\n",
                snapshot.config_source,
                snapshot.config_hash.as_deref().unwrap_or("none")
            );
            emit(global, ctx, "config validate", payload, &markdown, "config valid");
            Ok(ExitCode::Clean)
        }
    }
}

/// Schemas are JSON whatever the requested format.
fn run_schema(args: &SchemaArgs) -> Result<ExitCode, Error> {
    let schema = match args.document {
        SchemaDocument::Config => schemars::schema_for!(AnalyticsConfig),
        SchemaDocument::Measurement => schemars::schema_for!(Measurement),
        SchemaDocument::Region => schemars::schema_for!(RegionMetrics),
        SchemaDocument::FactorMetrics => schemars::schema_for!(FactorMetrics),
        SchemaDocument::Anomaly => schemars::schema_for!(Anomaly),
        SchemaDocument::Hotspot => schemars::schema_for!(Hotspot),
        SchemaDocument::RiskFactor => schemars::schema_for!(RiskFactor),
        SchemaDocument::Catalog => schemars::schema_for!(Vec<CatalogObject>),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::Clean)
}

fn print_version(global: &GlobalOpts) {
    let version_info = json!({
        "schema_version": SCHEMA_VERSION,
        "debris_core_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&version_info).unwrap_or_default()
            );
        }
        _ => {
            println!("debris-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Analytics commands
// ============================================================================

fn load_series(ctx: &LogContext, args: &SeriesArgs) -> Result<Vec<f64>, Error> {
    match input::load_series(args.series.as_deref(), args.input.as_deref()) {
        Ok(series) => {
            log_event!(
                ctx,
                DEBUG,
                event_names::INPUT_LOADED,
                Stage::Load,
                "series loaded",
                points = series.len()
            );
            Ok(series)
        }
        Err(e) => Err(reject_input(ctx, e)),
    }
}

fn reject_input(ctx: &LogContext, err: Error) -> Error {
    log_event!(
        ctx,
        WARN,
        event_names::INPUT_REJECTED,
        Stage::Load,
        "input rejected",
        error = tracing::field::display(&err)
    );
    err
}

fn run_risk(global: &GlobalOpts, ctx: &LogContext, args: &RiskArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    if !args.density.is_finite() || !args.clustering.is_finite() {
        return Err(reject_input(
            ctx,
            Error::InvalidInput("density and clustering must be finite".to_string()),
        ));
    }
    let parts = risk_components(
        &engine.config().risk,
        args.density,
        args.objects,
        args.clustering,
    );
    log_event!(
        ctx,
        INFO,
        event_names::RISK_SCORED,
        Stage::Score,
        "measurement scored",
        score = parts.score
    );

    let measurement = Measurement {
        density: args.density,
        object_count: args.objects,
        clustering_index: args.clustering,
    };
    let payload = json!({
        "measurement": measurement,
        "risk_score": parts.score,
        "components": parts,
    });
    let markdown = format!(
        "# Risk Score\n\n| Term | Value |\n|---|---|\n| density | {:.4} |\n| count | {:.4} |\n| clustering | {:.4} |\n| **score** | **{:.4}** |\n",
        parts.density_term, parts.count_term, parts.cluster_term, parts.score
    );
    let summary = format!("risk {:.4}", parts.score);
    emit(global, ctx, "risk", payload, &markdown, &summary);
    Ok(ExitCode::Clean)
}

fn run_anomalies(global: &GlobalOpts, ctx: &LogContext, args: &AnomalyArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    let series = load_series(ctx, &args.series)?;
    let anomalies = engine.detect_anomalies(&series, args.sensitivity);
    let classified = engine.classify_anomalies(&anomalies);
    let alerts = engine.alerts(&anomalies);
    log_event!(
        ctx,
        INFO,
        event_names::ANOMALIES_DETECTED,
        Stage::Detect,
        "anomaly scan complete",
        points = series.len(),
        anomalies = anomalies.len(),
        alerts = alerts.len()
    );

    let payload = json!({
        "sensitivity": args.sensitivity,
        "points": series.len(),
        "anomalies": classified,
        "alert_count": alerts.len(),
    });
    let mut markdown = format!(
        "# Anomalies\n\n{} of {} points flagged at {} sensitivity.\n",
        anomalies.len(),
        series.len(),
        args.sensitivity
    );
    if !classified.is_empty() {
        markdown.push_str("\n| Index | Value | z | Score | Severity |\n|---|---|---|---|---|\n");
        for c in &classified {
            markdown.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} | {} |\n",
                c.anomaly.index,
                c.anomaly.value,
                c.anomaly.z_score,
                c.anomaly.anomaly_score,
                c.severity
            ));
        }
    }
    let summary = format!("{} anomalies, {} alerts", anomalies.len(), alerts.len());
    emit(global, ctx, "anomalies", payload, &markdown, &summary);
    Ok(ExitCode::outcome(!anomalies.is_empty()))
}

fn run_forecast(global: &GlobalOpts, ctx: &LogContext, args: &ForecastArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    if let Some(alpha) = args.alpha {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(reject_input(
                ctx,
                Error::InvalidInput(format!("alpha must be in (0, 1], got {alpha}")),
            ));
        }
    }
    let series = load_series(ctx, &args.series)?;
    let periods = args
        .periods
        .unwrap_or(engine.config().forecast.default_periods);
    let alpha = args.alpha.unwrap_or(engine.config().forecast.alpha);
    let values = engine.forecast(&series, periods, Some(alpha));
    log_event!(
        ctx,
        INFO,
        event_names::FORECAST_PRODUCED,
        Stage::Forecast,
        "forecast produced",
        periods = values.len(),
        alpha = alpha
    );

    let payload = json!({
        "alpha": alpha,
        "periods": values.len(),
        "forecast": values,
    });
    let mut markdown = format!("# Forecast\n\nalpha = {alpha}\n\n| Period | Value |\n|---|---|\n");
    for (i, v) in values.iter().enumerate() {
        markdown.push_str(&format!("| {} | {:.4} |\n", i + 1, v));
    }
    let summary = match values.first() {
        Some(level) => format!("{} periods at {:.4}", values.len(), level),
        None => "no forecast (empty series)".to_string(),
    };
    emit(global, ctx, "forecast", payload, &markdown, &summary);
    Ok(ExitCode::Clean)
}

fn run_trend(global: &GlobalOpts, ctx: &LogContext, args: &SeriesArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    let series = load_series(ctx, args)?;
    let report = engine.analyze_trend(&series);
    log_event!(
        ctx,
        INFO,
        event_names::TREND_CLASSIFIED,
        Stage::Rank,
        "trend classified",
        trend = report.trend.as_str()
    );

    let change = report
        .change_percent
        .map(|c| format!("{c:+.1}%"))
        .unwrap_or_else(|| "n/a".to_string());
    let markdown = format!(
        "# Trend\n\n- Trend: {}\n- Change: {}\n- Window: {}\n",
        report.trend.as_str(),
        change,
        engine.config().trend.window
    );
    let summary = format!("{} ({})", report.trend.as_str(), change);
    emit(global, ctx, "trend", serde_json::to_value(report)?, &markdown, &summary);
    Ok(ExitCode::Clean)
}

fn run_explain(global: &GlobalOpts, ctx: &LogContext, args: &ExplainArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    let finite = [args.growth_rate, args.clustering]
        .into_iter()
        .chain(args.inclination)
        .all(f64::is_finite);
    if !finite {
        return Err(reject_input(
            ctx,
            Error::InvalidInput("factor metrics must be finite".to_string()),
        ));
    }
    let metrics = FactorMetrics {
        growth_rate: args.growth_rate,
        object_count: args.objects,
        clustering_index: args.clustering,
        inclination_factor: args.inclination,
    };
    let mut factors = engine.explain_risk_factors(&metrics);
    if args.ranked {
        factors = ranked_factors(&factors);
    }
    log_event!(
        ctx,
        INFO,
        event_names::FACTORS_EXPLAINED,
        Stage::Explain,
        "risk factors explained",
        factors = factors.len()
    );

    let markdown = factor_table(&factors);
    let summary = factors
        .iter()
        .map(|f| format!("{} {:.0}%", f.name, f.contribution * 100.0))
        .collect::<Vec<_>>()
        .join(", ");
    let payload = json!({ "metrics": metrics, "factors": factors });
    emit(global, ctx, "explain", payload, &markdown, &summary);
    Ok(ExitCode::Clean)
}

fn factor_table(factors: &[RiskFactor]) -> String {
    let mut out = String::from("# Risk Factors\n\n| Factor | Weight | Contribution |\n|---|---|---|\n");
    for f in factors {
        out.push_str(&format!(
            "| {} | {:.4} | {:.1}% |\n",
            f.name,
            f.weight,
            f.contribution * 100.0
        ));
    }
    out
}

fn run_hotspots(global: &GlobalOpts, ctx: &LogContext, args: &HotspotArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    let regions = input::read_source(&args.input)
        .and_then(|text| input::parse_regions(&text))
        .map_err(|e| reject_input(ctx, e))?;
    let threshold = args.threshold.unwrap_or(engine.config().hotspots.threshold);
    let hotspots = engine.identify_hotspots(&regions, Some(threshold));
    log_event!(
        ctx,
        INFO,
        event_names::HOTSPOTS_RANKED,
        Stage::Rank,
        "regions ranked",
        regions = regions.len(),
        hotspots = hotspots.len()
    );

    let payload = json!({
        "threshold": threshold,
        "regions_scanned": regions.len(),
        "hotspots": hotspots,
    });
    let markdown = hotspot_table(&hotspots, threshold);
    let summary = match hotspots.first() {
        Some(top) => format!(
            "{} hotspots; top {} ({:.3})",
            hotspots.len(),
            top.region,
            top.risk_score
        ),
        None => format!("no hotspots above {threshold}"),
    };
    emit(global, ctx, "hotspots", payload, &markdown, &summary);
    Ok(ExitCode::outcome(!hotspots.is_empty()))
}

fn hotspot_table(hotspots: &[Hotspot], threshold: f64) -> String {
    let mut out = format!("# Hotspots\n\nThreshold: {threshold}\n");
    if hotspots.is_empty() {
        out.push_str("\nNo region exceeds the threshold.\n");
        return out;
    }
    out.push_str("\n| Rank | Region | Risk | Density |\n|---|---|---|---|\n");
    for (i, h) in hotspots.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {:.4} | {} |\n",
            i + 1,
            h.region,
            h.risk_score,
            h.density
        ));
    }
    out
}

fn run_compare(global: &GlobalOpts, ctx: &LogContext, args: &CompareArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    let regions = input::read_source(&args.input)
        .and_then(|text| input::parse_regions(&text))
        .map_err(|e| reject_input(ctx, e))?;
    let lookup = |name: &str| {
        regions.get(name).ok_or_else(|| Error::UnknownRegion {
            region: name.to_string(),
        })
    };
    let a = lookup(&args.region_a).map_err(|e| reject_input(ctx, e))?;
    let b = lookup(&args.region_b).map_err(|e| reject_input(ctx, e))?;

    let comparison = engine.compare_regions(&args.region_a, a, &args.region_b, b);
    log_event!(
        ctx,
        INFO,
        event_names::REGIONS_COMPARED,
        Stage::Rank,
        "regions compared",
        insights = comparison.insights.len()
    );

    let mut markdown = format!(
        "# {} vs {}\n\n| | {} | {} |\n|---|---|---|\n| Risk | {:.4} | {:.4} |\n| Density | {} | {} |\n\n",
        comparison.region_a,
        comparison.region_b,
        comparison.region_a,
        comparison.region_b,
        comparison.risk_a,
        comparison.risk_b,
        a.density,
        b.density
    );
    for insight in &comparison.insights {
        markdown.push_str(&format!("- {insight}\n"));
    }
    let summary = comparison.insights.join("; ");
    emit(
        global,
        ctx,
        "compare",
        serde_json::to_value(&comparison)?,
        &markdown,
        &summary,
    );
    Ok(ExitCode::Clean)
}

fn run_summary(global: &GlobalOpts, ctx: &LogContext, args: &SummaryArgs) -> Result<ExitCode, Error> {
    let engine = load_engine(global, ctx)?;
    let doc = input::read_source(&args.input)
        .and_then(|text| input::parse_dashboard(&text))
        .map_err(|e| reject_input(ctx, e))?;
    let dashboard = engine.summarize_dashboard(&doc.regions, &doc.risk_series, args.sensitivity);
    let evolution = engine.summarize_risk_evolution(&doc.risk_series);
    log_event!(
        ctx,
        INFO,
        event_names::SUMMARY_BUILT,
        Stage::Summarize,
        "dashboard summary built",
        alerts = dashboard.critical_alerts,
        high_risk_regions = dashboard.high_risk_regions
    );

    let pct = |v: Option<f64>| {
        v.map(|c| format!("{c:+.1}%"))
            .unwrap_or_else(|| "n/a".to_string())
    };
    let markdown = format!(
        "# Debris Dashboard\n\n\
         - Tracked objects: {}\n\
         - Active anomalies: {}\n\
         - Critical alerts: {}\n\
         - High-risk regions: {}\n\
         - Global collision risk: {:.4}\n\
         - Risk trend: {}\n\
         - Change (last point): {}\n\
         - Change (window): {}\n\n\
         Risk history: {} points, average {:.4}, range {:.4} to {:.4}\n",
        dashboard.total_tracked_objects,
        dashboard.active_anomalies,
        dashboard.critical_alerts,
        dashboard.high_risk_regions,
        dashboard.global_collision_risk,
        dashboard.risk_trend.as_str(),
        pct(dashboard.risk_change_recent),
        pct(dashboard.risk_change_window),
        evolution.points,
        evolution.average_risk,
        evolution.min_risk,
        evolution.max_risk
    );
    let summary = format!(
        "risk {:.3} ({}), {} alerts, {} hotspots",
        dashboard.global_collision_risk,
        dashboard.risk_trend.as_str(),
        dashboard.critical_alerts,
        dashboard.high_risk_regions
    );
    let flagged = dashboard.critical_alerts > 0 || dashboard.high_risk_regions > 0;
    let payload = json!({ "dashboard": dashboard, "risk_evolution": evolution });
    emit(global, ctx, "summary", payload, &markdown, &summary);
    Ok(ExitCode::outcome(flagged))
}

fn run_altitude(global: &GlobalOpts, ctx: &LogContext, args: &AltitudeArgs) -> Result<ExitCode, Error> {
    match (&args.input, args.mean_motion) {
        (Some(path), _) => {
            let band = args.band.ok_or_else(|| {
                Error::InvalidInput("--band is required with --input".to_string())
            })?;
            let catalog = input::read_source(path)
                .and_then(|text| input::parse_catalog(&text))
                .map_err(|e| reject_input(ctx, e))?;
            let matched = filter_by_altitude(&catalog, &band);
            log_event!(
                ctx,
                INFO,
                event_names::ALTITUDE_COMPUTED,
                Stage::Rank,
                "catalog filtered by altitude",
                catalog = catalog.len(),
                matched = matched.len()
            );

            let objects: Vec<Value> = matched
                .iter()
                .map(|o| {
                    json!({
                        "object_id": o.object_id,
                        "mean_motion": o.mean_motion,
                        "altitude_km": altitude_from_mean_motion(o.mean_motion),
                    })
                })
                .collect();
            let mut markdown = format!(
                "# Objects in {}\n\n{} of {} catalogued objects.\n",
                band,
                matched.len(),
                catalog.len()
            );
            for o in &matched {
                markdown.push_str(&format!("- {}\n", o.object_id));
            }
            let summary = format!("{} of {} objects in {}", matched.len(), catalog.len(), band);
            let payload = json!({ "band": band.label(), "count": matched.len(), "objects": objects });
            emit(global, ctx, "altitude", payload, &markdown, &summary);
            Ok(ExitCode::Clean)
        }
        (None, Some(mean_motion)) => {
            let altitude = altitude_from_mean_motion(mean_motion).ok_or_else(|| {
                reject_input(
                    ctx,
                    Error::InvalidInput(format!(
                        "mean motion must be a positive number of revolutions per day, got {mean_motion}"
                    )),
                )
            })?;
            let in_band = args.band.map(|b| b.contains(altitude));
            log_event!(
                ctx,
                DEBUG,
                event_names::ALTITUDE_COMPUTED,
                Stage::Score,
                "altitude derived",
                altitude_km = altitude
            );

            let payload = json!({
                "mean_motion": mean_motion,
                "altitude_km": altitude,
                "band": args.band.map(|b| b.label()),
                "in_band": in_band,
            });
            let markdown = format!(
                "# Altitude\n\n{mean_motion} rev/day is about {altitude:.1} km above the surface.\n"
            );
            let summary = format!("{altitude:.1} km");
            emit(global, ctx, "altitude", payload, &markdown, &summary);
            Ok(ExitCode::Clean)
        }
        (None, None) => Err(Error::InvalidInput(
            "pass --mean-motion, or --input with --band".to_string(),
        )),
    }
}

// ============================================================================
// Output
// ============================================================================

/// Write one command payload to stdout in the requested format.
fn emit(
    global: &GlobalOpts,
    ctx: &LogContext,
    command: &str,
    payload: Value,
    markdown: &str,
    summary: &str,
) {
    match global.format {
        OutputFormat::Json => {
            let mut envelope = json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": ctx.run_id,
                "command": command,
                "generated_at": format_timestamp(SystemClock.now()),
            });
            if let (Value::Object(env), Value::Object(body)) = (&mut envelope, payload) {
                env.extend(body);
            }
            match serde_json::to_string_pretty(&envelope) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("failed to render output: {e}"),
            }
        }
        OutputFormat::Md => print!("{markdown}"),
        OutputFormat::Summary => println!("{summary}"),
    }
}

fn output_error(global: &GlobalOpts, ctx: &LogContext, err: &Error) -> ExitCode {
    let exit_code = ExitCode::from(err);
    match global.format {
        OutputFormat::Json => {
            let structured = StructuredError::from(err)
                .with_context("run_id", &ctx.run_id)
                .with_context("exit_code", exit_code.code_name());
            eprintln!("{}", structured.to_json_pretty());
        }
        OutputFormat::Summary => eprintln!("[{}] {}", exit_code.code_name(), err),
        OutputFormat::Md => {
            let color = !global.no_color && std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(err, color));
        }
    }
    exit_code
}
