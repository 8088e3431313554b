//! Debris analytics math utilities.

pub mod math;

pub use math::series::*;
pub use math::stable::*;
