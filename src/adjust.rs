//! Rounding requested spans up to lengths reachable with the available segments.

use crate::catalog::{PartDefinition, PartKind};

/// Tolerance, in metres, applied whenever two lengths are compared.
///
/// Segment sums accumulate floating point error; anything below this is an exact fit.
pub const LENGTH_TOLERANCE: f64 = 1.0e-9;

/// Collect the lengths of the available straight segments, longest first.
///
/// Straight parts without a length are skipped.
#[must_use]
pub fn straight_lengths(parts: &[&PartDefinition]) -> Vec<f64> {
    let mut lengths: Vec<f64> = parts
        .iter()
        .filter(|part| part.kind == PartKind::Straight)
        .filter_map(|part| {
            if part.length.is_none() {
                tracing::warn!(part = %part.name, "straight part has no length, skipping");
            }
            part.length
        })
        .collect();
    lengths.sort_by(|a, b| b.total_cmp(a));
    lengths
}

/// Round `target` up to the nearest span expressible as a sum of `lengths`.
///
/// Lengths are consumed greedily, longest first; a leftover residual is covered
/// by one extra smallest segment, so the result never falls short of `target`.
/// An empty `lengths` (or a target that is not finite) yields `0.0`.
///
/// # Examples
/// ```
/// use trusscalc::adjust;
///
/// let lengths = [4.0, 3.0, 2.0, 1.0, 0.5, 0.25];
/// assert_eq!(adjust(5.0, &lengths), 5.0);
/// assert_eq!(adjust(5.1, &lengths), 5.25);
/// assert_eq!(adjust(5.0, &[]), 0.0);
/// ```
#[must_use]
pub fn adjust(target: f64, lengths: &[f64]) -> f64 {
    if !target.is_finite() {
        return 0.0;
    }
    let mut sorted: Vec<f64> = lengths
        .iter()
        .copied()
        .filter(|&length| length > LENGTH_TOLERANCE)
        .collect();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let Some(&smallest) = sorted.last() else {
        return 0.0;
    };

    let mut remaining = target;
    let mut adjusted = 0.0;
    for &length in &sorted {
        while remaining >= length - LENGTH_TOLERANCE {
            adjusted += length;
            remaining -= length;
        }
    }
    if remaining > LENGTH_TOLERANCE {
        adjusted += smallest;
    }
    adjusted
}
