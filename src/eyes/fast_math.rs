//! Fixed-point trigonometry and distance helpers for pupil placement.
//!
//! Angles are degrees. Integer-degree sine/cosine come straight from a
//! quarter-wave table, so `sin_deg(a + 180) == -sin_deg(a)` holds bit for bit.

use super::types::Fx;

pub const FX_ZERO: Fx = Fx::ZERO;
pub const FX_ONE: Fx = Fx::from_bits(1 << 16);
const FX_DEG_90: Fx = Fx::from_bits(90 << 16);
const FX_DEG_180: Fx = Fx::from_bits(180 << 16);
// 0.273 rad expressed in degrees.
const ATAN_CORRECTION_DEG: Fx = Fx::from_bits(1_024_983);
// Keeps squared pixel distances inside the u64 shift below.
const MAX_PX_COMPONENT: i64 = 20_000;

/// sin(d) for d = 0..=90 degrees, as raw I16F16 bits.
const SIN_QUARTER: [i32; 91] = [
    0, 1144, 2287, 3430, 4572, 5712, 6850, 7987, //
    9121, 10252, 11380, 12505, 13626, 14742, 15855, 16962, //
    18064, 19161, 20252, 21336, 22415, 23486, 24550, 25607, //
    26656, 27697, 28729, 29753, 30767, 31772, 32768, 33754, //
    34729, 35693, 36647, 37590, 38521, 39441, 40348, 41243, //
    42126, 42995, 43852, 44695, 45525, 46341, 47143, 47930, //
    48703, 49461, 50203, 50931, 51643, 52339, 53020, 53684, //
    54332, 54963, 55578, 56175, 56756, 57319, 57865, 58393, //
    58903, 59396, 59870, 60326, 60764, 61183, 61584, 61966, //
    62328, 62672, 62997, 63303, 63589, 63856, 64104, 64332, //
    64540, 64729, 64898, 65048, 65177, 65287, 65376, 65446, //
    65496, 65526, 65536,
];

#[inline]
pub const fn fx_i32(v: i32) -> Fx {
    Fx::from_bits(v << 16)
}

pub fn sin_deg(deg: i32) -> Fx {
    let d = deg.rem_euclid(360) as usize;
    let bits = match d {
        0..=90 => SIN_QUARTER[d],
        91..=180 => SIN_QUARTER[180 - d],
        181..=270 => -SIN_QUARTER[d - 180],
        _ => -SIN_QUARTER[360 - d],
    };
    Fx::from_bits(bits)
}

pub fn cos_deg(deg: i32) -> Fx {
    sin_deg(deg.rem_euclid(360) + 90)
}

/// Sine of a fractional angle, interpolated between table entries.
pub fn sin_fx(deg: Fx) -> Fx {
    let bits = deg.to_bits();
    let whole = bits >> 16;
    let frac = Fx::from_bits(bits & 0xFFFF);
    let s0 = sin_deg(whole);
    let s1 = sin_deg(whole + 1);
    s0 + (s1 - s0) * frac
}

pub fn cos_fx(deg: Fx) -> Fx {
    sin_fx(deg + FX_DEG_90)
}

/// Polynomial atan2 in degrees, range (-180, 180]. Error stays under 0.25 degree.
pub fn atan2_deg(y: Fx, x: Fx) -> Fx {
    let ax = x.abs();
    let ay = y.abs();
    if ax == FX_ZERO && ay == FX_ZERO {
        return FX_ZERO;
    }

    let steep = ay > ax;
    let t = if steep { ax / ay } else { ay / ax };
    let mut angle = t * 45 + ATAN_CORRECTION_DEG * t * (FX_ONE - t);

    if steep {
        angle = FX_DEG_90 - angle;
    }
    if x < FX_ZERO {
        angle = FX_DEG_180 - angle;
    }
    if y < FX_ZERO {
        -angle
    } else {
        angle
    }
}

/// Euclidean length of an integer pixel vector.
#[inline]
pub fn hypot_px(dx: i32, dy: i32) -> Fx {
    let dx = (dx as i64).clamp(-MAX_PX_COMPONENT, MAX_PX_COMPONENT);
    let dy = (dy as i64).clamp(-MAX_PX_COMPONENT, MAX_PX_COMPONENT);
    let dist_sq = (dx * dx + dy * dy) as u64;
    let bits = isqrt_u64(dist_sq << 32) as i32;
    Fx::from_bits(bits)
}

pub fn deg_to_rad(deg: Fx) -> Fx {
    deg * Fx::PI / 180
}

pub fn rad_to_deg(rad: Fx) -> Fx {
    rad / Fx::PI * 180
}

/// Integer part of `v`, rounding toward zero.
#[inline]
pub fn trunc_px(v: Fx) -> i32 {
    let bits = v.to_bits() as i64;
    if bits >= 0 {
        (bits >> 16) as i32
    } else {
        -((-bits) >> 16) as i32
    }
}

/// `magnitude * unit`, truncated with the sign applied afterwards so that
/// opposite units give exactly opposite pixels.
#[inline]
pub fn scale_signed(magnitude: Fx, unit: Fx) -> i32 {
    let px = trunc_px(magnitude.abs() * unit.abs());
    if (unit < FX_ZERO) != (magnitude < FX_ZERO) {
        -px
    } else {
        px
    }
}

#[inline]
fn isqrt_u64(mut n: u64) -> u64 {
    let mut res = 0u64;
    let mut bit = 1u64 << 62;

    while bit > n {
        bit >>= 2;
    }

    while bit != 0 {
        if n >= res + bit {
            n -= res + bit;
            res = (res >> 1) + bit;
        } else {
            res >>= 1;
        }
        bit >>= 2;
    }
    res
}

#[cfg(test)]
mod tests;
