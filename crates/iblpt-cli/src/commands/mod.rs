//! CLI command implementations.

use iblpt_core::ModelVariant;

pub mod evaluate;
pub mod fit;
pub mod report;
pub mod simulate;

/// Label for a user-supplied parameter vector.
pub fn model_label(model: ModelVariant) -> String {
    format!("{} model", model.label())
}
