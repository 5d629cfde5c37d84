use evafit_lib::fitting::stacking::{combine_stacked, stacking_factor};

#[test]
fn single_bonus_is_returned_unpenalized() {
    assert_eq!(combine_stacked(&[1.10]), 1.10);
    assert_eq!(combine_stacked(&[0.85]), 0.85);
    assert_eq!(combine_stacked(&[]), 1.0);
}

#[test]
fn three_ten_percent_modules_combine_to_about_1_264() {
    let combined = combine_stacked(&[1.10, 1.10, 1.10]);

    // 1.10 * (1 + 0.10*0.869) * (1 + 0.10*0.571)
    assert!(
        (combined - 1.2638).abs() < 1e-3,
        "expected approx 1.2638, got {combined}"
    );

    // Not the naive product.
    assert!((combined - 1.331).abs() > 0.05);
    // Not the wrong-exponent variant either: with (i-1)^2 the second module
    // would go unpenalized.
    let wrong_exponent = 1.10 * 1.10 * (1.0 + 0.10 * stacking_factor(1));
    assert!((combined - wrong_exponent).abs() > 0.01);
}

#[test]
fn marginal_contribution_shrinks_with_every_added_module() {
    let mut previous_gain = f64::INFINITY;
    let mut previous_combined = 1.0;

    for count in 1..=6 {
        let bonuses = vec![1.10; count];
        let combined = combine_stacked(&bonuses);
        let gain = combined / previous_combined;
        assert!(
            gain < previous_gain,
            "gain should shrink at {count} modules: {gain} >= {previous_gain}"
        );
        assert!(gain > 1.0, "every module should still help at {count}");
        previous_gain = gain;
        previous_combined = combined;
    }
}

#[test]
fn combined_multiplier_never_exceeds_naive_product() {
    let bonuses = [1.10, 1.15, 1.05, 1.20];
    let combined = combine_stacked(&bonuses);
    let naive: f64 = bonuses.iter().product();
    assert!(combined < naive);
    assert!(combined > bonuses.iter().copied().fold(f64::MIN, f64::max));
}
