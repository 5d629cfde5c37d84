use evafit_lib::{analyze_capacitor, Error};

#[test]
fn drain_exactly_at_recharge_rate_is_stable() {
    // 375 GJ over 125 s * 2.5 = 7.5 GJ/s sustainable.
    let report = analyze_capacitor(7.5, 375.0, 125.0).expect("valid inputs");
    assert!(report.stable);
    assert_eq!(report.seconds_to_empty, None);
}

#[test]
fn drain_one_unit_above_recharge_empties_in_finite_time() {
    let report = analyze_capacitor(8.5, 375.0, 125.0).expect("valid inputs");
    assert!(!report.stable);
    let ttl = report.seconds_to_empty.expect("finite time to empty");
    assert!(ttl.is_finite() && ttl > 0.0);
    // 375 / (8.5 - 7.5).
    assert!((ttl - 375.0).abs() < 1e-9);
}

#[test]
fn heavier_drain_empties_sooner() {
    let light = analyze_capacitor(9.0, 375.0, 125.0).expect("valid");
    let heavy = analyze_capacitor(12.0, 375.0, 125.0).expect("valid");
    assert!(heavy.seconds_to_empty.unwrap() < light.seconds_to_empty.unwrap());
}

#[test]
fn degenerate_pools_fail_fast_instead_of_producing_nan() {
    assert!(matches!(
        analyze_capacitor(1.0, 375.0, 0.0),
        Err(Error::DegenerateInput { .. })
    ));
    assert!(matches!(
        analyze_capacitor(1.0, -5.0, 125.0),
        Err(Error::DegenerateInput { .. })
    ));
    assert!(matches!(
        analyze_capacitor(f64::NAN, 375.0, 125.0),
        Err(Error::DegenerateInput { .. })
    ));
}
