use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use trusscalc::{CalculatorConfig, RequestError};

/// Parse the `dimension` typed by a user, accepting `,` as the decimal separator.
///
/// Only the number format is checked here; positivity is enforced when the
/// structure is assembled.
pub fn parse_dimension(dimension: &'static str, raw: &str) -> Result<f64, RequestError> {
    let normalised = raw.trim().replace(',', ".");
    normalised
        .parse::<f64>()
        .map_err(|_| RequestError::InvalidNumber {
            dimension,
            raw: raw.to_owned(),
        })
}

/// Parse `--length`.
pub fn parse_length(raw: &str) -> Result<f64, RequestError> {
    parse_dimension("length", raw)
}

/// Parse `--width`.
pub fn parse_width(raw: &str) -> Result<f64, RequestError> {
    parse_dimension("width", raw)
}

/// Parse `--height`.
pub fn parse_height(raw: &str) -> Result<f64, RequestError> {
    parse_dimension("height", raw)
}

/// Load calculator settings from a JSON file; absent keys keep their defaults.
pub fn load_config(path: &Path) -> Result<CalculatorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("cannot parse config file {}", path.display()))
}
