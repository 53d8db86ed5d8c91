use pretty_assertions::assert_eq;

use super::*;

#[test]
fn defaults() {
    let settings = Settings::default();
    assert!(!settings.simulation_comments);
    assert!(settings.output_semicolons);
    assert_eq!(settings.cycle_detection, CycleDetection::SelfReference);
    assert_eq!(settings.max_submodule_depth, 32);
    assert_eq!(settings.settle_limit, None);
}

#[test]
fn builders() {
    let settings = Settings::default()
        .with_simulation_comments(true)
        .with_cycle_detection(CycleDetection::Full)
        .with_max_submodule_depth(4)
        .with_settle_limit(10);
    assert!(settings.simulation_comments);
    assert_eq!(settings.cycle_detection, CycleDetection::Full);
    assert_eq!(settings.max_submodule_depth, 4);
    assert_eq!(settings.settle_limit, Some(10));
}

#[test]
fn cycle_flag() {
    assert_eq!(CycleDetection::from_flag("full"), Some(CycleDetection::Full));
    assert_eq!(
        CycleDetection::from_flag("self"),
        Some(CycleDetection::SelfReference)
    );
    assert_eq!(CycleDetection::from_flag("none"), None);
}
