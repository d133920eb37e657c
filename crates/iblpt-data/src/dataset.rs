//! Choice-problem datasets.
//!
//! One problem per line, eight whitespace-separated columns:
//!
//! ```text
//! id val_high p_high val_low val_safe sure d1 mode
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::path::Path;

use iblpt_core::error::{ErrorCode, IblError, IblResult};
use iblpt_core::types::GambleProblem;

const COLUMNS: usize = 8;

/// Load a dataset file.
pub fn load_dataset(path: impl AsRef<Path>) -> IblResult<Vec<GambleProblem>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let problems = parse_dataset(&content)?;
    tracing::debug!(path = %path.display(), problems = problems.len(), "dataset loaded");
    Ok(problems)
}

/// Parse dataset text.
pub fn parse_dataset(text: &str) -> IblResult<Vec<GambleProblem>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| parse_row(i + 1, line))
        .collect()
}

fn parse_row(line_no: usize, line: &str) -> IblResult<GambleProblem> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != COLUMNS {
        return Err(IblError::parse(
            ErrorCode::ParseInvalidRow,
            format!(
                "line {}: expected {} columns, found {}",
                line_no,
                COLUMNS,
                fields.len()
            ),
        ));
    }

    let number = |col: usize, name: &str| -> IblResult<f64> {
        fields[col].parse::<f64>().map_err(|_| {
            IblError::parse(
                ErrorCode::ParseInvalidNumber,
                format!("line {}: {} is not a number: {:?}", line_no, name, fields[col]),
            )
        })
    };

    let id = parse_id(fields[0]).ok_or_else(|| {
        IblError::parse(
            ErrorCode::ParseInvalidNumber,
            format!("line {}: id is not an integer: {:?}", line_no, fields[0]),
        )
    })?;

    let problem = GambleProblem {
        id,
        val_high: number(1, "val_high")?,
        p_high: number(2, "p_high")?,
        val_low: number(3, "val_low")?,
        val_safe: number(4, "val_safe")?,
        sure: number(5, "sure")?,
        d1: number(6, "d1")?,
        mode: number(7, "mode")?,
    };

    if !(0.0..=1.0).contains(&problem.p_high) {
        return Err(IblError::parse(
            ErrorCode::ParseInvalidRow,
            format!(
                "line {}: p_high must lie in [0, 1], got {}",
                line_no, problem.p_high
            ),
        ));
    }
    Ok(problem)
}

/// Ids are integers, possibly written as `3.0`.
fn parse_id(field: &str) -> Option<i64> {
    field.parse::<i64>().ok().or_else(|| {
        let value = field.parse::<f64>().ok()?;
        (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
    })
}
