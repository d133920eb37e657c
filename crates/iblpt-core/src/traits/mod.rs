//! Core traits for iblpt providers.

mod optimizer;

pub use optimizer::*;
