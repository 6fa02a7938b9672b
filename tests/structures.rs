use approx::assert_relative_eq;
use trusscalc::{
    compute, eurotruss_fd34, AvailabilityMap, BuildRequest, Calculation, PartDefinition,
    PartKind, Structure, StructureType,
};

const CORNER_3_WAY: &str = "FD34 3 WAY CORNER 90˚ + DOWN - 0.5m";
const CORNER_2_WAY: &str = "FD34-L90 (90°) - 0.5m";
const BASE: &str = "FD34-Base - 0.8m";

fn calculate(structure: Structure, availability: &AvailabilityMap) -> Calculation {
    compute(
        &BuildRequest::new(structure),
        &eurotruss_fd34(),
        availability,
    )
}

fn self_supporting_5_3_2_5() -> Structure {
    Structure::from_parts(StructureType::SelfSupporting, 5.0, Some(3.0), 2.5)
        .expect("valid self-supporting dimensions")
}

fn straight_units(calculation: &Calculation) -> usize {
    calculation
        .bill
        .selected_parts
        .iter()
        .filter(|part| part.kind == PartKind::Straight)
        .count()
}

fn only_short_straights(catalog: &[PartDefinition]) -> AvailabilityMap {
    catalog
        .iter()
        .filter(|part| part.kind == PartKind::Straight)
        .map(|part| (part.name.clone(), part.length.unwrap_or(0.0) <= 1.0))
        .collect()
}

#[test]
fn self_supporting_frame_matches_hand_count() {
    let calculation = calculate(self_supporting_5_3_2_5(), &AvailabilityMap::new());

    assert_eq!(calculation.adjusted, self_supporting_5_3_2_5());
    let bill = &calculation.bill;
    assert_eq!(bill.counts.len(), 4);
    assert_eq!(bill.quantity("FD34-400 - 4.0m"), 2);
    assert_eq!(bill.quantity("FD34-200 - 2.0m"), 6);
    assert_eq!(bill.quantity(CORNER_3_WAY), 4);
    assert_eq!(bill.quantity(BASE), 4);
    assert_eq!(bill.unit_count(), 16);

    assert_eq!(bill.total_pins, 8 * 4 + 4 * 12 + 4 * 4);
    assert_relative_eq!(bill.total_weight, 442.0, epsilon = 1.0e-9);
    let unmargined = 4.0 * 0.0841 * 2.0 + 2.0 * 0.0841 * 6.0 + 0.125 * 4.0 + 0.064 * 4.0;
    assert_relative_eq!(bill.total_volume, unmargined * 1.1, epsilon = 1.0e-9);
}

#[test]
fn self_supporting_frame_is_deterministic() {
    let first = calculate(self_supporting_5_3_2_5(), &AvailabilityMap::new());
    let second = calculate(self_supporting_5_3_2_5(), &AvailabilityMap::new());
    assert_eq!(first, second);
    assert_eq!(first.bill.selected_parts, second.bill.selected_parts);
}

#[test]
fn unreachable_dimensions_are_rounded_up() {
    let structure = Structure::from_parts(StructureType::SelfSupporting, 5.1, Some(2.9), 2.3)
        .expect("valid dimensions");
    let calculation = calculate(structure, &AvailabilityMap::new());
    assert_relative_eq!(calculation.adjusted.length(), 5.25, epsilon = 1.0e-12);
    assert_relative_eq!(
        calculation.adjusted.width().expect("frame has a width"),
        3.0,
        epsilon = 1.0e-12
    );
    assert_relative_eq!(calculation.adjusted.height(), 2.5, epsilon = 1.0e-12);
}

#[test]
fn arch_uses_2_way_corners_and_two_legs() {
    let structure =
        Structure::from_parts(StructureType::Arch, 10.0, None, 4.0).expect("valid arch");
    let calculation = calculate(structure, &AvailabilityMap::new());
    let bill = &calculation.bill;

    assert_eq!(bill.quantity("FD34-400 - 4.0m"), 2);
    assert_eq!(bill.quantity("FD34-100 - 1.0m"), 1);
    assert_eq!(bill.quantity("FD34-300 - 3.0m"), 2);
    assert_eq!(bill.quantity(CORNER_2_WAY), 2);
    assert_eq!(bill.quantity(CORNER_3_WAY), 0);
    assert_eq!(bill.quantity(BASE), 2);

    assert_eq!(bill.total_pins, 5 * 4 + 2 * 8 + 2 * 4);
    assert_relative_eq!(bill.total_weight, 245.3, epsilon = 1.0e-9);
}

#[test]
fn arch_ignores_width() {
    let without = Structure::from_parts(StructureType::Arch, 10.0, None, 4.0).expect("valid arch");
    let with = Structure::from_parts(StructureType::Arch, 10.0, Some(250.0), 4.0)
        .expect("width is ignored for arches");
    assert_eq!(without, with);
    assert_eq!(
        calculate(without, &AvailabilityMap::new()),
        calculate(with, &AvailabilityMap::new())
    );
}

#[test]
fn removing_long_straights_needs_more_segments() {
    let catalog = eurotruss_fd34();
    let full = calculate(self_supporting_5_3_2_5(), &AvailabilityMap::new());
    let short = calculate(self_supporting_5_3_2_5(), &only_short_straights(&catalog));

    assert!(short
        .bill
        .selected_parts
        .iter()
        .filter(|part| part.kind == PartKind::Straight)
        .all(|part| part.length.unwrap_or(0.0) <= 1.0));
    assert_eq!(straight_units(&full), 8);
    assert_eq!(straight_units(&short), 20);
    assert!(straight_units(&short) > straight_units(&full));
}

#[test]
fn tiny_frame_uses_only_hardware() {
    let structure = Structure::from_parts(StructureType::SelfSupporting, 1.0, Some(1.0), 0.5)
        .expect("valid dimensions");
    let calculation = calculate(structure, &AvailabilityMap::new());
    assert_eq!(straight_units(&calculation), 0);
    assert_eq!(calculation.bill.quantity(CORNER_3_WAY), 4);
    assert_eq!(calculation.bill.quantity(BASE), 4);
}

#[test]
fn custom_margin_scales_volume() {
    let request = BuildRequest::new(self_supporting_5_3_2_5())
        .with_volume_margin(0.0)
        .expect("zero margin accepted");
    let bare = compute(&request, &eurotruss_fd34(), &AvailabilityMap::new());
    let margined = calculate(self_supporting_5_3_2_5(), &AvailabilityMap::new());
    assert_relative_eq!(
        margined.bill.total_volume,
        bare.bill.total_volume * 1.1,
        epsilon = 1.0e-9
    );
}
