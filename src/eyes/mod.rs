//! Animated eyes: pupil geometry, blink and dizzy state, minimal-redraw
//! compositing into one off-screen buffer per eye.

pub mod animator;
pub mod blink;
pub mod config;
pub mod eye;
pub mod fast_math;
pub mod geometry;
pub mod motion;
pub mod rng;
pub mod saccade;
pub mod surface;
pub mod touch;
pub mod types;

pub use animator::EyeAnimator;
pub use config::{active_config, EyesConfig};
pub use eye::Eye;
pub use geometry::{EyeGeometry, EyeShape, GeometryError};
pub use motion::{AccelSample, AccelSource};
pub use rng::{RandomSource, XorShift32};
pub use surface::{DisplaySurface, EyeCanvas, EyeSurface};
pub use touch::{RawTouch, TouchSource};
pub use types::{BlinkState, EyeMode, FrameTrace, Fx, Point, SensorStatus, TouchState};
