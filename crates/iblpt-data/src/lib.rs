//! iblpt-data - File formats for iblpt.
//!
//! Everything that touches the filesystem lives here: choice-problem datasets,
//! human reference series, saved parameter vectors, fit records and the
//! plot-ready series reports.

pub mod dataset;
pub mod human;
pub mod params;
pub mod report;

pub use dataset::{load_dataset, parse_dataset};
pub use human::load_human_reference;
pub use params::{format_params, load_params, parse_params, save_params, FitRecord};
pub use report::{ModelSeries, SeriesReport};
