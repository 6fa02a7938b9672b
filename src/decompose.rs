//! Greedy decomposition of a span into straight segments.

use std::collections::BTreeMap;

use crate::adjust::LENGTH_TOLERANCE;
use crate::catalog::{PartDefinition, PartKind};

/// Segments chosen to realise one span, already multiplied by its replication.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decomposition<'a> {
    /// Units placed per count key.
    pub counts: BTreeMap<String, u32>,
    /// Connector pins consumed by the placed units.
    pub pin_delta: u32,
    /// One entry per placed unit, in placement order.
    pub placed: Vec<&'a PartDefinition>,
}

impl<'a> Decomposition<'a> {
    /// Record `replication` units of `part`.
    fn place(&mut self, part: &'a PartDefinition, replication: u32) {
        *self.counts.entry(part.count_key()).or_insert(0) += replication;
        self.placed
            .extend(std::iter::repeat(part).take(replication as usize));
        self.pin_delta += replication * part.pin_count;
    }

    /// Sum of the lengths of every placed unit.
    #[must_use]
    pub fn covered_length(&self) -> f64 {
        self.placed
            .iter()
            .filter_map(|part| part.length)
            .sum()
    }
}

/// Break `span` into straight segments, longest that still fits first.
///
/// Every chosen segment is placed `replication` times, once per identical edge
/// or leg. When the leftover is shorter than every segment one smallest segment
/// covers it, so the span is rounded up, never down. Parts that are not
/// straight, or straight parts without a length, are ignored. Equal lengths
/// keep their order in `parts`. A `replication` of zero places nothing.
///
/// # Examples
/// ```
/// use trusscalc::{decompose, eurotruss_fd34, AvailabilityMap, filter_available};
///
/// let catalog = eurotruss_fd34();
/// let available = filter_available(&catalog, &AvailabilityMap::new());
/// let legs = decompose(2.0, 4, &available);
/// assert_eq!(legs.counts["FD34-200 - 2.0m"], 4);
/// assert_eq!(legs.pin_delta, 16);
/// ```
#[must_use]
pub fn decompose<'a>(
    span: f64,
    replication: u32,
    parts: &[&'a PartDefinition],
) -> Decomposition<'a> {
    let mut segments: Vec<(&'a PartDefinition, f64)> = parts
        .iter()
        .filter(|part| part.kind == PartKind::Straight)
        .filter_map(|&part| part.length.map(|length| (part, length)))
        .filter(|&(_, length)| length > LENGTH_TOLERANCE)
        .collect();
    segments.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut decomposition = Decomposition::default();
    if replication == 0 || !span.is_finite() {
        return decomposition;
    }
    let mut remaining = span;
    while remaining > LENGTH_TOLERANCE {
        let Some(&(part, length)) = segments
            .iter()
            .find(|&&(_, length)| length <= remaining + LENGTH_TOLERANCE)
        else {
            break;
        };
        decomposition.place(part, replication);
        remaining -= length;
    }
    if remaining > LENGTH_TOLERANCE {
        if let Some(&(smallest, _)) = segments.last() {
            decomposition.place(smallest, replication);
        }
    }
    decomposition
}
