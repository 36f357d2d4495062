use super::{
    geometry::{EyeGeometry, EyeShape, GeometryError},
    types::{Fx, Point, Size},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    pub frame_interval_ms: u64,
    pub accel_interval_ms: u64,
    pub touch_interval_ms: u64,
    pub blink_interval_ms: u64,
    pub saccade_interval_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyePlacement {
    /// Eye center in screen coordinates.
    pub center: Point,
    /// Screen position of the eye canvas' top-left corner.
    pub origin: Point,
    pub phase_offset_deg: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkConfig {
    pub initial_ceiling: u16,
    pub random_min: u16,
    pub random_max: u16,
    pub top_band_height: u32,
    /// Canvas row where the lower lid band starts.
    pub bottom_band_y: i32,
    pub bottom_band_height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DizzyConfig {
    /// Acceleration magnitude in g that starts a dizzy episode.
    pub accel_threshold: Fx,
    pub step_deg: u16,
    pub rotations: u16,
}

impl DizzyConfig {
    pub const fn total_deg(&self) -> u16 {
        self.rotations.saturating_mul(360)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaccadeConfig {
    /// Each axis draws from `0..range`.
    pub range: u8,
    pub divisor: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyesConfig {
    pub blink_during_dizzy: bool,
    pub timing: TimingConfig,
    pub shape: EyeShape,
    pub left: EyePlacement,
    pub right: EyePlacement,
    pub blink: BlinkConfig,
    pub dizzy: DizzyConfig,
    pub saccade: SaccadeConfig,
}

impl EyesConfig {
    pub fn geometry(&self, placement: &EyePlacement) -> Result<EyeGeometry, GeometryError> {
        EyeGeometry::new(self.shape, placement.center, placement.origin)
    }

    /// Same layout with the built-in elliptical eye.
    pub const fn with_elliptical_eyes(mut self) -> Self {
        self.shape = EyeShape::Ellipse {
            outer_radii: Size::new(72, 60),
            pupil_radii: Size::new(12, 15),
        };
        self
    }
}

include!(concat!(env!("OUT_DIR"), "/eyes_config.rs"));

pub fn active_config() -> &'static EyesConfig {
    &EYES_CONFIG
}
