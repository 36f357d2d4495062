pub use embedded_graphics::prelude::{Point, Size};
use fixed::types::I16F16;

pub type Fx = I16F16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EyeMode {
    #[default]
    Normal,
    Dizzy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlinkState {
    #[default]
    Open,
    HalfClosed,
    Closed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchState {
    #[default]
    None,
    Touching,
    Released,
    MultiTouch,
}

/// Availability of the acceleration source as last observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SensorStatus {
    #[default]
    Unknown,
    Ready,
    Unavailable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub state: TouchState,
    pub point: Point,
}

/// Snapshot of the animator after one `tick` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTrace {
    pub now_ms: u64,
    pub rendered: bool,
    pub mode: EyeMode,
    pub sweep_deg: u16,
    pub blink: BlinkState,
    pub touch: TouchState,
    pub accel: SensorStatus,
}
