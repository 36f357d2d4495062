use super::*;
use crate::eyes::rng::{RandomSource, XorShift32};

fn circle_eye() -> EyeGeometry {
    EyeGeometry::circular(Point::new(80, 120), Point::new(0, 55), 65, 13).expect("valid circle")
}

fn ellipse_eye() -> EyeGeometry {
    EyeGeometry::elliptical(
        Point::new(80, 120),
        Point::new(0, 55),
        Size::new(72, 60),
        Size::new(12, 15),
    )
    .expect("valid ellipse")
}

fn random_offset(rng: &mut XorShift32, span: u32) -> Point {
    let x = rng.below(span * 2 + 1) as i32 - span as i32;
    let y = rng.below(span * 2 + 1) as i32 - span as i32;
    Point::new(x, y)
}

#[test]
fn circle_envelope_is_outer_minus_pupil() {
    assert_eq!(
        circle_eye().envelope(),
        TravelEnvelope::Circle { radius: fx_i32(52) }
    );
}

#[test]
fn ellipse_envelope_applies_margin() {
    assert_eq!(
        ellipse_eye().envelope(),
        TravelEnvelope::Ellipse {
            a: fx_i32(48),
            b: fx_i32(36),
        }
    );
}

#[test]
fn pupil_larger_than_eye_is_rejected() {
    assert_eq!(
        EyeGeometry::circular(Point::zero(), Point::zero(), 10, 11),
        Err(GeometryError::PupilExceedsEye)
    );
    assert_eq!(
        EyeGeometry::elliptical(
            Point::zero(),
            Point::zero(),
            Size::new(40, 20),
            Size::new(10, 25)
        ),
        Err(GeometryError::PupilExceedsEye)
    );
    assert_eq!(
        EyeGeometry::circular(Point::zero(), Point::zero(), 500, 10),
        Err(GeometryError::RadiusOutOfRange)
    );
}

#[test]
fn near_target_is_used_directly() {
    let eye = circle_eye();
    assert_eq!(
        eye.place(Point::new(100, 110), Point::zero()),
        Point::new(100, 110)
    );
}

#[test]
fn far_target_lands_on_circle_edge() {
    let eye = circle_eye();
    assert_eq!(
        eye.place(Point::new(300, 120), Point::zero()),
        Point::new(132, 120)
    );
    assert_eq!(
        eye.place(Point::new(80, -500), Point::zero()),
        Point::new(80, 68)
    );
}

#[test]
fn far_target_on_ellipse_stays_on_its_axis() {
    let eye = ellipse_eye();
    let placed = eye.place(Point::new(1_080, 120), Point::zero());
    assert_eq!(placed.y, 120);
    assert!((126..=128).contains(&placed.x), "got {placed:?}");
}

#[test]
fn every_target_lands_inside_the_envelope() {
    let mut rng = XorShift32::new(0x5EED);
    for eye in [circle_eye(), ellipse_eye()] {
        for _ in 0..3_000 {
            let target = eye.center() + random_offset(&mut rng, 400);
            let jitter = Point::new(rng.below(2) as i32, rng.below(2) as i32);
            let placed = eye.place(target, jitter);
            assert!(
                eye.within_travel(placed),
                "{target:?} + {jitter:?} placed at {placed:?}"
            );
        }
    }
}

#[test]
fn clamping_is_idempotent() {
    let mut rng = XorShift32::new(99);
    for eye in [circle_eye(), ellipse_eye()] {
        let envelope = eye.envelope();
        for _ in 0..2_000 {
            let offset = random_offset(&mut rng, 200);
            let once = envelope.clamp(offset);
            assert_eq!(envelope.clamp(once), once);
            if envelope.contains(offset) {
                assert_eq!(once, offset);
            }
        }
    }
}

#[test]
fn clamped_point_keeps_direction() {
    let envelope = circle_eye().envelope();
    let clamped = envelope.clamp(Point::new(300, 300));
    assert!((clamped.x - clamped.y).abs() <= 1, "got {clamped:?}");
    assert!(clamped.x > 30);
}

#[test]
fn extreme_offsets_clamp_without_overflow() {
    for eye in [circle_eye(), ellipse_eye()] {
        let envelope = eye.envelope();
        for offset in [
            Point::new(i32::MIN, 0),
            Point::new(0, i32::MIN),
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MIN),
        ] {
            let clamped = envelope.clamp(offset);
            assert!(envelope.contains(clamped), "{offset:?} clamped to {clamped:?}");
        }
        let left = envelope.clamp(Point::new(i32::MIN, 0));
        assert!(left.x < 0 && left.y == 0, "got {left:?}");
    }
}

#[test]
fn zero_travel_pins_pupil_to_center() {
    let eye = EyeGeometry::circular(Point::new(50, 50), Point::zero(), 20, 20).expect("valid");
    assert_eq!(eye.place(Point::new(90, 10), Point::new(1, 1)), eye.center());
}

#[test]
fn dizzy_starts_at_rim_and_ends_at_center() {
    let eye = circle_eye();
    assert_eq!(eye.dizzy(0, 1_080, 0), Point::new(132, 120));
    assert_eq!(eye.dizzy(0, 1_080, 180), Point::new(28, 120));
    assert_eq!(eye.dizzy(1_080, 1_080, 0), eye.center());
}

#[test]
fn dizzy_eyes_are_half_a_turn_apart() {
    for eye in [circle_eye(), ellipse_eye()] {
        for sweep in (0..1_080).step_by(15) {
            let left = eye.dizzy(sweep, 1_080, 0) - eye.center();
            let right = eye.dizzy(sweep, 1_080, 180) - eye.center();
            assert_eq!(left, Point::zero() - right, "sweep {sweep}");
            assert!(eye.within_travel(eye.center() + left));
        }
    }
}

#[test]
fn dizzy_radius_decays_with_sweep() {
    let eye = circle_eye();
    let early = eye.dizzy(90, 1_080, 0) - eye.center();
    let late = eye.dizzy(990, 1_080, 0) - eye.center();
    assert!(early.y.abs() > late.y.abs());
}

#[test]
fn local_coordinates_subtract_origin() {
    let eye = circle_eye();
    assert_eq!(eye.to_local(eye.center()), Point::new(80, 65));
}
