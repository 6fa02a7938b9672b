//! Bill of materials produced by a computation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{count_key, PartDefinition};
use crate::decompose::Decomposition;

/// Parts, quantities and totals needed to assemble one structure.
///
/// Counts are keyed by [`count_key`], so parts can be looked up in a catalog
/// afterwards without the bill holding references into it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BillOfMaterials {
    /// Units needed per count key, sorted by key.
    pub counts: BTreeMap<String, u32>,
    /// Total weight in kilograms.
    pub total_weight: f64,
    /// Total enclosing volume in cubic metres, margin included.
    pub total_volume: f64,
    /// Connector pins needed.
    pub total_pins: u32,
    /// One entry per physical unit, in placement order.
    #[serde(skip)]
    pub selected_parts: Vec<PartDefinition>,
}

impl BillOfMaterials {
    /// Create an empty bill.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `quantity` units of `part`.
    ///
    /// # Examples
    /// ```
    /// use trusscalc::{eurotruss_fd34, BillOfMaterials};
    ///
    /// let catalog = eurotruss_fd34();
    /// let base = catalog.iter().find(|part| part.name == "FD34-Base").unwrap();
    /// let mut bill = BillOfMaterials::new();
    /// bill.place(base, 4);
    /// assert_eq!(bill.counts["FD34-Base - 0.8m"], 4);
    /// assert_eq!(bill.total_pins, 16);
    /// ```
    pub fn place(&mut self, part: &PartDefinition, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.counts.entry(part.count_key()).or_insert(0) += quantity;
        self.selected_parts
            .extend(std::iter::repeat(part).take(quantity as usize).cloned());
        self.total_pins += quantity * part.pin_count;
    }

    /// Fold the segments of one decomposed span into the bill.
    pub fn merge(&mut self, decomposition: Decomposition<'_>) {
        for (key, quantity) in decomposition.counts {
            *self.counts.entry(key).or_insert(0) += quantity;
        }
        self.selected_parts
            .extend(decomposition.placed.into_iter().cloned());
        self.total_pins += decomposition.pin_delta;
    }

    /// Recompute weight and volume from the counts, then apply `volume_margin`.
    ///
    /// Each count key is resolved against `available`; keys without a match
    /// contribute nothing.
    pub fn aggregate(&mut self, available: &[&PartDefinition], volume_margin: f64) {
        let mut weight = 0.0;
        let mut volume = 0.0;
        for (key, &quantity) in &self.counts {
            let Some(part) = available
                .iter()
                .find(|part| count_key(&part.name, part.length) == *key)
            else {
                tracing::warn!(%key, "counted part is not in the available catalog");
                continue;
            };
            weight += part.weight * f64::from(quantity);
            volume += part.unit_volume() * f64::from(quantity);
        }
        self.total_weight = weight;
        self.total_volume = volume * (1.0 + volume_margin);
    }

    /// Whether nothing was placed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of physical units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.selected_parts.len()
    }

    /// Units counted under `key`, zero when absent.
    #[must_use]
    pub fn quantity(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::PartKind;
    use crate::decompose::decompose;

    fn part(name: &str, kind: PartKind, length: Option<f64>, pin_count: u32) -> PartDefinition {
        PartDefinition {
            name: name.to_owned(),
            length,
            weight: 2.0,
            width: 0.5,
            height: 0.5,
            kind,
            pin_count,
        }
    }

    #[test]
    fn pins_cover_segments_and_hardware() {
        let straight = part("S1", PartKind::Straight, Some(1.0), 4);
        let base = part("B", PartKind::Base, None, 4);
        let available = [&straight, &base];

        let mut bill = BillOfMaterials::new();
        bill.merge(decompose(3.0, 1, &available));
        bill.place(&base, 1);

        assert_eq!(bill.total_pins, 16);
        assert_eq!(bill.unit_count(), 4);
        assert_eq!(bill.quantity("S1 - 1.0m"), 3);
        assert_eq!(bill.quantity("B - 0.0m"), 1);
    }

    #[test]
    fn aggregate_applies_volume_margin() {
        let straight = part("S1", PartKind::Straight, Some(1.0), 4);
        let base = part("B", PartKind::Base, None, 4);
        let available = [&straight, &base];

        let mut bill = BillOfMaterials::new();
        bill.place(&straight, 3);
        bill.place(&base, 2);
        bill.aggregate(&available, 0.25);

        assert_relative_eq!(bill.total_weight, 10.0, epsilon = 1.0e-9);
        let unmargined = 3.0 * 0.25;
        assert_relative_eq!(bill.total_volume, unmargined * 1.25, epsilon = 1.0e-9);
    }

    #[test]
    fn aggregate_is_not_cumulative() {
        let straight = part("S1", PartKind::Straight, Some(2.0), 4);
        let available = [&straight];
        let mut bill = BillOfMaterials::new();
        bill.place(&straight, 1);
        bill.aggregate(&available, 0.1);
        bill.aggregate(&available, 0.1);
        assert_relative_eq!(bill.total_weight, 2.0);
        assert_relative_eq!(bill.total_volume, 0.5 * 1.1, epsilon = 1.0e-9);
    }

    #[test]
    fn zero_quantity_places_nothing() {
        let straight = part("S1", PartKind::Straight, Some(2.0), 4);
        let mut bill = BillOfMaterials::new();
        bill.place(&straight, 0);
        assert!(bill.is_empty());
        assert_eq!(bill.total_pins, 0);
    }

    #[test]
    fn serialises_counts_and_totals() {
        let straight = part("S1", PartKind::Straight, Some(1.0), 4);
        let mut bill = BillOfMaterials::new();
        bill.place(&straight, 2);
        let json = serde_json::to_value(&bill).expect("bill serialises");
        assert_eq!(json["counts"]["S1 - 1.0m"], 2);
        assert_eq!(json["total_pins"], 8);
        assert!(json.get("selected_parts").is_none());
    }
}
