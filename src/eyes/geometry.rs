use super::{
    fast_math::{
        atan2_deg, cos_deg, cos_fx, fx_i32, hypot_px, scale_signed, sin_deg, sin_fx, FX_ONE,
        FX_ZERO,
    },
    types::{Fx, Point, Size},
};
use fixed_sqrt::FixedSqrt;

// Radii above this would overflow the squared terms in `limit_at`.
const MAX_RADIUS: u32 = 160;
// Targets further than this are halved toward the center before clamping.
const MAX_TARGET_OFFSET: u32 = 4_096;
// Far outside any envelope; also bounds the i128 products in `contains`.
const MAX_CONTAINS_OFFSET: u32 = 1 << 16;
const ELLIPSE_MARGIN_NUM: i32 = 4;
const ELLIPSE_MARGIN_DEN: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeShape {
    Circle { outer_radius: u32, pupil_radius: u32 },
    Ellipse { outer_radii: Size, pupil_radii: Size },
}

impl EyeShape {
    pub const fn outer_radii(&self) -> Size {
        match *self {
            Self::Circle { outer_radius, .. } => Size::new(outer_radius, outer_radius),
            Self::Ellipse { outer_radii, .. } => outer_radii,
        }
    }

    pub const fn pupil_radii(&self) -> Size {
        match *self {
            Self::Circle { pupil_radius, .. } => Size::new(pupil_radius, pupil_radius),
            Self::Ellipse { pupil_radii, .. } => pupil_radii,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryError {
    PupilExceedsEye,
    RadiusOutOfRange,
}

/// Region the pupil center may occupy, relative to the eye center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelEnvelope {
    Circle { radius: Fx },
    /// Semi-axes with the 0.80 outline margin already applied.
    Ellipse { a: Fx, b: Fx },
}

impl TravelEnvelope {
    pub fn for_shape(shape: EyeShape) -> Self {
        match shape {
            EyeShape::Circle {
                outer_radius,
                pupil_radius,
            } => Self::Circle {
                radius: fx_i32(outer_radius as i32 - pupil_radius as i32),
            },
            EyeShape::Ellipse {
                outer_radii,
                pupil_radii,
            } => {
                let travel_x = outer_radii.width as i32 - pupil_radii.width as i32;
                let travel_y = outer_radii.height as i32 - pupil_radii.height as i32;
                Self::Ellipse {
                    a: fx_i32(travel_x) * ELLIPSE_MARGIN_NUM / ELLIPSE_MARGIN_DEN,
                    b: fx_i32(travel_y) * ELLIPSE_MARGIN_NUM / ELLIPSE_MARGIN_DEN,
                }
            }
        }
    }

    pub const fn semi_axes(&self) -> (Fx, Fx) {
        match *self {
            Self::Circle { radius } => (radius, radius),
            Self::Ellipse { a, b } => (a, b),
        }
    }

    /// Exact test of `x²·b² + y²·a² <= a²·b²` on the raw fixed-point bits.
    pub fn contains(&self, offset: Point) -> bool {
        if offset.x.unsigned_abs() > MAX_CONTAINS_OFFSET
            || offset.y.unsigned_abs() > MAX_CONTAINS_OFFSET
        {
            return false;
        }

        let (a, b) = self.semi_axes();
        let a = a.to_bits() as i128;
        let b = b.to_bits() as i128;
        let x = offset.x as i128;
        let y = offset.y as i128;

        if a <= 0 || b <= 0 {
            return match (a > 0, b > 0) {
                (true, false) => y == 0 && (x << 16).abs() <= a,
                (false, true) => x == 0 && (y << 16).abs() <= b,
                _ => x == 0 && y == 0,
            };
        }

        let lhs = ((x * x * b * b) << 32) + ((y * y * a * a) << 32);
        lhs <= a * a * b * b
    }

    /// Polar radius of the envelope along the unit direction `(cos, sin)`.
    pub fn limit_at(&self, cos: Fx, sin: Fx) -> Fx {
        match *self {
            Self::Circle { radius } => radius,
            Self::Ellipse { a, b } => {
                if a <= FX_ZERO || b <= FX_ZERO {
                    return FX_ZERO;
                }
                let b_cos = b * cos.abs();
                let a_sin = a * sin.abs();
                let denom = FixedSqrt::sqrt((b_cos * b_cos + a_sin * a_sin).max(FX_ZERO));
                if denom == FX_ZERO {
                    return FX_ZERO;
                }
                a * b / denom
            }
        }
    }

    /// Returns `offset` unchanged when inside, otherwise the nearest point
    /// along the same direction that is.
    pub fn clamp(&self, offset: Point) -> Point {
        if self.contains(offset) {
            return offset;
        }

        let mut x = offset.x;
        let mut y = offset.y;
        while x.unsigned_abs() > MAX_TARGET_OFFSET || y.unsigned_abs() > MAX_TARGET_OFFSET {
            x /= 2;
            y /= 2;
        }

        let angle = atan2_deg(fx_i32(y), fx_i32(x));
        let (cos, sin) = (cos_fx(angle), sin_fx(angle));
        let limit = self.limit_at(cos, sin);

        let scaled = match self {
            Self::Circle { .. } => Point::new(scale_signed(limit, cos), scale_signed(limit, sin)),
            Self::Ellipse { .. } => {
                let dist = hypot_px(x, y);
                if dist == FX_ZERO {
                    Point::zero()
                } else {
                    let ratio = limit / dist;
                    Point::new(scale_signed(fx_i32(x), ratio), scale_signed(fx_i32(y), ratio))
                }
            }
        };
        self.settle(scaled)
    }

    /// Point at `angle_deg` and `factor` of the envelope radius.
    pub fn polar(&self, angle_deg: i32, factor: Fx) -> Point {
        let (cos, sin) = (cos_deg(angle_deg), sin_deg(angle_deg));
        let reach = self.limit_at(cos, sin) * factor.clamp(FX_ZERO, FX_ONE);
        self.settle(Point::new(scale_signed(reach, cos), scale_signed(reach, sin)))
    }

    /// Steps one pixel at a time toward the center, along the longer axis
    /// first, until the point is inside.
    fn settle(&self, mut p: Point) -> Point {
        while !self.contains(p) {
            if p.x != 0 && p.x.abs() >= p.y.abs() {
                p.x -= p.x.signum();
            } else {
                p.y -= p.y.signum();
            }
        }
        p
    }
}

/// Fixed placement and size of one eye.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyeGeometry {
    center: Point,
    origin: Point,
    shape: EyeShape,
    envelope: TravelEnvelope,
}

impl EyeGeometry {
    pub fn new(shape: EyeShape, center: Point, origin: Point) -> Result<Self, GeometryError> {
        let outer = shape.outer_radii();
        let pupil = shape.pupil_radii();
        if outer.width > MAX_RADIUS || outer.height > MAX_RADIUS {
            return Err(GeometryError::RadiusOutOfRange);
        }
        if pupil.width > outer.width || pupil.height > outer.height {
            return Err(GeometryError::PupilExceedsEye);
        }

        Ok(Self {
            center,
            origin,
            shape,
            envelope: TravelEnvelope::for_shape(shape),
        })
    }

    pub fn circular(
        center: Point,
        origin: Point,
        outer_radius: u32,
        pupil_radius: u32,
    ) -> Result<Self, GeometryError> {
        Self::new(
            EyeShape::Circle {
                outer_radius,
                pupil_radius,
            },
            center,
            origin,
        )
    }

    pub fn elliptical(
        center: Point,
        origin: Point,
        outer_radii: Size,
        pupil_radii: Size,
    ) -> Result<Self, GeometryError> {
        Self::new(
            EyeShape::Ellipse {
                outer_radii,
                pupil_radii,
            },
            center,
            origin,
        )
    }

    pub const fn center(&self) -> Point {
        self.center
    }

    pub const fn origin(&self) -> Point {
        self.origin
    }

    pub const fn shape(&self) -> EyeShape {
        self.shape
    }

    pub const fn envelope(&self) -> TravelEnvelope {
        self.envelope
    }

    /// World coordinates to the eye's canvas coordinates.
    pub fn to_local(&self, world: Point) -> Point {
        world - self.origin
    }

    pub fn within_travel(&self, world: Point) -> bool {
        self.envelope.contains(world - self.center)
    }

    /// Pupil position for a world-space target plus jitter. Both the target
    /// and the jittered result are clamped.
    pub fn place(&self, target: Point, jitter: Point) -> Point {
        let clamped = self.envelope.clamp(target - self.center);
        self.center + self.envelope.clamp(clamped + jitter)
    }

    /// Dizzy pupil position at `sweep_deg` out of `total_deg`.
    pub fn dizzy(&self, sweep_deg: u16, total_deg: u16, phase_offset_deg: i32) -> Point {
        let factor = if total_deg == 0 {
            FX_ZERO
        } else {
            FX_ONE - fx_i32(sweep_deg as i32) / total_deg as i32
        };
        self.center
            + self
                .envelope
                .polar(sweep_deg as i32 + phase_offset_deg, factor)
    }
}

#[cfg(test)]
mod tests;
