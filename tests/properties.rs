use proptest::prelude::*;
use trusscalc::{
    adjust, compute, decompose, eurotruss_fd34, filter_available, straight_lengths,
    AvailabilityMap, BuildRequest, PartKind, Structure, LENGTH_TOLERANCE,
};

/// Stock maps over the FD34 straights that always keep the 0.25 m segment.
fn stock_with_quarter_segment() -> impl Strategy<Value = AvailabilityMap> {
    let names: Vec<String> = eurotruss_fd34()
        .into_iter()
        .filter(|part| part.kind == PartKind::Straight && part.name != "FD34-025")
        .map(|part| part.name)
        .collect();
    prop::collection::vec(any::<bool>(), names.len()).prop_map(move |flags| {
        names.iter().cloned().zip(flags).collect::<AvailabilityMap>()
    })
}

proptest! {
    #[test]
    fn adjustment_never_undershoots(target in 0.01f64..60.0, stock in stock_with_quarter_segment()) {
        let catalog = eurotruss_fd34();
        let lengths = straight_lengths(&filter_available(&catalog, &stock));
        prop_assert!(adjust(target, &lengths) >= target - LENGTH_TOLERANCE);
    }

    #[test]
    fn adjustment_is_idempotent(target in 0.01f64..60.0, stock in stock_with_quarter_segment()) {
        let catalog = eurotruss_fd34();
        let lengths = straight_lengths(&filter_available(&catalog, &stock));
        let once = adjust(target, &lengths);
        let twice = adjust(once, &lengths);
        prop_assert!((once - twice).abs() < 1.0e-9);
    }

    #[test]
    fn adjusted_span_decomposes_exactly(target in 0.01f64..60.0, stock in stock_with_quarter_segment()) {
        let catalog = eurotruss_fd34();
        let available = filter_available(&catalog, &stock);
        let span = adjust(target, &straight_lengths(&available));
        let decomposition = decompose(span, 1, &available);
        prop_assert!((decomposition.covered_length() - span).abs() < 1.0e-9);
    }

    #[test]
    fn decomposition_never_undershoots(span in 0.01f64..60.0, replication in 1u32..5) {
        let catalog = eurotruss_fd34();
        let available = filter_available(&catalog, &AvailabilityMap::new());
        let decomposition = decompose(span, replication, &available);
        let per_edge = decomposition.covered_length() / f64::from(replication);
        prop_assert!(per_edge >= span - LENGTH_TOLERANCE);
    }

    #[test]
    fn pins_match_placed_units(length in 0.5f64..20.0, width in 0.5f64..20.0, height in 0.5f64..8.0) {
        let structure = Structure::SelfSupporting { length, width, height };
        let calculation = compute(&BuildRequest::new(structure), &eurotruss_fd34(), &AvailabilityMap::new());
        let pins: u32 = calculation.bill.selected_parts.iter().map(|part| part.pin_count).sum();
        let units: u32 = calculation.bill.counts.values().sum();
        prop_assert_eq!(calculation.bill.total_pins, pins);
        prop_assert_eq!(units as usize, calculation.bill.unit_count());
    }

    #[test]
    fn volume_margin_scales_total(length in 0.5f64..20.0, height in 0.5f64..8.0, margin in 0.0f64..1.0) {
        let structure = Structure::Arch { length, height };
        let catalog = eurotruss_fd34();
        let stock = AvailabilityMap::new();
        let bare = compute(
            &BuildRequest::new(structure).with_volume_margin(0.0).expect("valid margin"),
            &catalog,
            &stock,
        );
        let margined = compute(
            &BuildRequest::new(structure).with_volume_margin(margin).expect("valid margin"),
            &catalog,
            &stock,
        );
        prop_assert!((margined.bill.total_volume - bare.bill.total_volume * (1.0 + margin)).abs() < 1.0e-9);
    }
}
