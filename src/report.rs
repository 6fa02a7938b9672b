use std::fmt::Write;

use serde::Serialize;
use trusscalc::{Calculation, Structure};

/// Calculation as printed by `--json`, with the size advisory alongside.
#[derive(Serialize)]
struct JsonReport<'a> {
    /// The computed result.
    #[serde(flatten)]
    calculation: &'a Calculation,
    /// Advisory from [`size_warning`], `null` when none applies.
    size_warning: Option<&'a str>,
}

/// Render a textual summary of a computed bill of materials.
///
/// Counts are listed by key; totals are rounded to two decimals. A `warning`
/// is printed right below the header.
#[must_use]
pub fn render_summary(calculation: &Calculation, warning: Option<&str>) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "{} (adjusted to {})",
        describe(&calculation.requested),
        dimensions(&calculation.adjusted)
    )
    .expect("writing to string cannot fail");
    if let Some(warning) = warning {
        writeln!(&mut output, "Warning: {warning}").expect("writing to string cannot fail");
    }

    if !calculation.is_satisfiable() {
        output.push_str("Cannot satisfy request: no usable parts in stock\n");
        return output;
    }

    output.push_str("Elements:\n");
    for (key, quantity) in &calculation.bill.counts {
        writeln!(&mut output, "  {key}: {quantity}").expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "Total weight: {:.2} kg",
        calculation.bill.total_weight
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Total volume: {:.2} m³",
        calculation.bill.total_volume
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "Total pins: {}", calculation.bill.total_pins)
        .expect("writing to string cannot fail");

    output
}

/// Render `calculation` as pretty JSON with a `size_warning` field.
pub fn render_json(calculation: &Calculation, warning: Option<&str>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        calculation,
        size_warning: warning,
    })
}

/// Advisory shown when a horizontal dimension is above `threshold` metres.
#[must_use]
pub fn size_warning(structure: &Structure, threshold: f64) -> Option<String> {
    structure.exceeds_size_threshold(threshold).then(|| {
        format!(
            "length or width above {threshold} m: the structure needs a T-joint for extra support"
        )
    })
}

/// Name and requested dimensions of a structure.
fn describe(structure: &Structure) -> String {
    let name = match structure {
        Structure::SelfSupporting { .. } => "Self-supporting frame",
        Structure::Arch { .. } => "Arch",
    };
    format!("{name} {}", dimensions(structure))
}

/// Dimensions as `L x W x H` (or `L x H` for an arch) in metres.
fn dimensions(structure: &Structure) -> String {
    match structure.width() {
        Some(width) => format!(
            "{:.2} x {:.2} x {:.2} m",
            structure.length(),
            width,
            structure.height()
        ),
        None => format!("{:.2} x {:.2} m", structure.length(), structure.height()),
    }
}
