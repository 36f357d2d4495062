use super::*;

fn approx(actual: Fx, expected: f32, tol: f32) -> bool {
    (actual.to_num::<f32>() - expected).abs() <= tol
}

#[test]
fn table_endpoints_are_exact() {
    assert_eq!(sin_deg(0), FX_ZERO);
    assert_eq!(sin_deg(90), FX_ONE);
    assert_eq!(sin_deg(180), FX_ZERO);
    assert_eq!(sin_deg(270), -FX_ONE);
    assert_eq!(cos_deg(0), FX_ONE);
    assert_eq!(cos_deg(180), -FX_ONE);
}

#[test]
fn opposite_angles_negate_exactly() {
    for deg in -400..400 {
        assert_eq!(sin_deg(deg + 180), -sin_deg(deg), "sin at {deg}");
        assert_eq!(cos_deg(deg + 180), -cos_deg(deg), "cos at {deg}");
    }
}

#[test]
fn negative_angles_wrap() {
    assert_eq!(sin_deg(-90), -FX_ONE);
    assert_eq!(sin_deg(-30), sin_deg(330));
    assert_eq!(cos_deg(-720), FX_ONE);
}

#[test]
fn interpolated_sine_tracks_table() {
    assert_eq!(sin_fx(fx_i32(30)), sin_deg(30));
    assert!(approx(sin_fx(Fx::from_num(30.5)), 0.5075, 0.001));
    assert!(approx(cos_fx(Fx::from_num(-45.25)), 0.7040, 0.001));
}

#[test]
fn atan2_covers_all_quadrants() {
    let one = FX_ONE;
    assert_eq!(atan2_deg(FX_ZERO, FX_ZERO), FX_ZERO);
    assert!(approx(atan2_deg(FX_ZERO, one), 0.0, 0.01));
    assert!(approx(atan2_deg(one, one), 45.0, 0.01));
    assert!(approx(atan2_deg(one, FX_ZERO), 90.0, 0.01));
    assert!(approx(atan2_deg(one, -one), 135.0, 0.01));
    assert!(approx(atan2_deg(FX_ZERO, -one), 180.0, 0.01));
    assert!(approx(atan2_deg(-one, -one), -135.0, 0.01));
    assert!(approx(atan2_deg(-one, FX_ZERO), -90.0, 0.01));
}

#[test]
fn atan2_error_is_small_over_a_sweep() {
    for deg in (-179..=180).step_by(7) {
        let rad = (deg as f32).to_radians();
        let y = Fx::from_num(rad.sin() * 50.0);
        let x = Fx::from_num(rad.cos() * 50.0);
        let got = atan2_deg(y, x).to_num::<f32>();
        let mut err = (got - deg as f32).abs();
        if err > 180.0 {
            err = 360.0 - err;
        }
        assert!(err < 0.3, "deg {deg}: got {got}");
    }
}

#[test]
fn hypot_matches_pythagoras() {
    assert_eq!(hypot_px(3, 4), fx_i32(5));
    assert_eq!(hypot_px(-6, 8), fx_i32(10));
    assert_eq!(hypot_px(0, 0), FX_ZERO);
    assert!(approx(hypot_px(1, 1), 1.41421, 0.0001));
}

#[test]
fn hypot_saturates_far_vectors() {
    let far = hypot_px(i32::MAX, i32::MIN);
    assert!(far > fx_i32(28_000));
}

#[test]
fn degree_radian_round_trip() {
    assert!(approx(deg_to_rad(fx_i32(180)), core::f32::consts::PI, 0.001));
    assert!(approx(rad_to_deg(Fx::PI / 2), 90.0, 0.01));
}

#[test]
fn truncation_goes_toward_zero() {
    assert_eq!(trunc_px(Fx::from_num(2.75)), 2);
    assert_eq!(trunc_px(Fx::from_num(-2.75)), -2);
    assert_eq!(trunc_px(Fx::from_num(-0.5)), 0);
    assert_eq!(scale_signed(fx_i32(10), Fx::from_num(-0.55)), -5);
    assert_eq!(scale_signed(fx_i32(10), Fx::from_num(0.55)), 5);
}
