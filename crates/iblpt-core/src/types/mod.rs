//! Core types for iblpt.

mod choice;
mod params;
mod problem;
mod series;

pub use choice::*;
pub use params::*;
pub use problem::*;
pub use series::*;
