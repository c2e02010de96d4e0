use wf_schedule::*;

const TWO_SPOT: &str = include_str!("../../../demos/two_spot.yaml");

#[test]
fn demo_schedule_loads() {
    let schedule = from_yaml_str(TWO_SPOT).unwrap();

    assert_eq!(schedule.wells.len(), 2);
    assert_eq!(schedule.num_intervals(), 3);
    assert_eq!(schedule.wells_at(0).len(), 1);
    assert_eq!(schedule.wells_at(1).len(), 2);

    let inj = schedule.well_at(1, "INJ1").unwrap();
    assert!(inj.is_injector());
    assert!(!inj.is_producer());
    let injection = inj.injection.as_ref().unwrap();
    assert_eq!(injection.phase, InjectorPhaseDef::Water);
    assert_eq!(injection.control, InjectorControlDef::Rate);

    let prod = schedule.well_at(2, "PROD1").unwrap();
    assert_eq!(prod.status, WellStatusDef::Stop);
    assert!(prod.ref_depth_m.is_none());
}

#[test]
fn roundtrip_yaml_demo_schedule() {
    let schedule = from_yaml_str(TWO_SPOT).unwrap();

    let path = std::env::temp_dir().join("wf_schedule_roundtrip_two_spot.yaml");
    save_yaml(&path, &schedule).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(schedule, loaded);
}

#[test]
fn roundtrip_json_demo_schedule() {
    let schedule = from_yaml_str(TWO_SPOT).unwrap();

    let path = std::env::temp_dir().join("wf_schedule_roundtrip_two_spot.json");
    save_json(&path, &schedule).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(schedule, loaded);
}

#[test]
fn save_refuses_invalid_schedule() {
    let mut schedule = from_yaml_str(TWO_SPOT).unwrap();
    schedule.grid.nz = 0;

    let path = std::env::temp_dir().join("wf_schedule_invalid.yaml");
    let err = save_yaml(&path, &schedule).unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
}

#[test]
fn malformed_yaml_is_reported() {
    let err = from_yaml_str("version: 1\nname: x\ngrid: { nx: 1 }\n").unwrap_err();
    assert!(matches!(err, ScheduleError::Yaml(_)));
}
