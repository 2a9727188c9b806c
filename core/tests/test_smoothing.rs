use vehicle_energy_core::smoothing::smooth_elevation;

#[test]
fn median_filter_removes_single_spike() {
    let e = vec![100.0, 100.5, 140.0, 101.0, 101.5];
    let s = smooth_elevation(&e);
    assert_eq!(s.len(), e.len());
    assert_eq!(s, vec![100.0, 100.5, 101.0, 101.5, 101.5]);
}

#[test]
fn short_inputs_are_kept() {
    assert!(smooth_elevation(&[]).is_empty());
    assert_eq!(smooth_elevation(&[7.0]), vec![7.0]);
    assert_eq!(smooth_elevation(&[1.0, 3.0]), vec![1.0, 3.0]);
}
