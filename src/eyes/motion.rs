use fixed_sqrt::FixedSqrt;
use log::info;
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    config::DizzyConfig,
    fast_math::FX_ZERO,
    types::{EyeMode, Fx},
};

/// Acceleration in g on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccelSample {
    pub x: Fx,
    pub y: Fx,
    pub z: Fx,
}

impl AccelSample {
    pub const fn new(x: Fx, y: Fx, z: Fx) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> Fx {
        let sum = self
            .x
            .saturating_mul(self.x)
            .saturating_add(self.y.saturating_mul(self.y))
            .saturating_add(self.z.saturating_mul(self.z));
        FixedSqrt::sqrt(sum.max(FX_ZERO))
    }
}

pub trait AccelSource {
    type Error: core::fmt::Debug;

    fn sample(&mut self) -> Result<AccelSample, Self::Error>;
}

#[derive(Clone, Copy, Debug)]
enum MotionEvent {
    Accel { magnitude: Fx },
    Frame,
    Reset,
}

#[derive(Default)]
struct DispatchContext {
    step: MotionStep,
}

/// What one dispatch did to the dizzy episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionStep {
    pub entered_dizzy: bool,
    pub finished: bool,
    /// Sweep angle to render this frame, when dizzy.
    pub sweep_deg: Option<u16>,
}

pub struct MotionEngine {
    machine: statig::blocking::StateMachine<MotionHsm>,
}

impl MotionEngine {
    pub fn new(config: DizzyConfig) -> Self {
        Self {
            machine: MotionHsm::new(config).state_machine(),
        }
    }

    /// Feeds one acceleration magnitude; may start a dizzy episode.
    pub fn accel(&mut self, magnitude: Fx) -> MotionStep {
        self.dispatch(MotionEvent::Accel { magnitude })
    }

    /// Advances the sweep by one render frame while dizzy.
    pub fn frame(&mut self) -> MotionStep {
        self.dispatch(MotionEvent::Frame)
    }

    pub fn reset(&mut self) -> MotionStep {
        self.dispatch(MotionEvent::Reset)
    }

    pub fn mode(&self) -> EyeMode {
        self.machine.inner().mode
    }

    pub fn sweep_deg(&self) -> u16 {
        self.machine.inner().sweep_deg
    }

    pub fn total_deg(&self) -> u16 {
        self.machine.inner().config.total_deg()
    }

    fn dispatch(&mut self, event: MotionEvent) -> MotionStep {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context.step
    }
}

struct MotionHsm {
    config: DizzyConfig,
    mode: EyeMode,
    sweep_deg: u16,
}

impl MotionHsm {
    fn new(config: DizzyConfig) -> Self {
        Self {
            config,
            mode: EyeMode::Normal,
            sweep_deg: 0,
        }
    }

    fn settle_normal(&mut self) {
        self.mode = EyeMode::Normal;
        self.sweep_deg = 0;
    }
}

#[state_machine(initial = "State::normal()")]
impl MotionHsm {
    #[state(superstate = "running")]
    fn normal(&mut self, context: &mut DispatchContext, event: &MotionEvent) -> Outcome<State> {
        match event {
            MotionEvent::Accel { magnitude } => {
                if *magnitude <= self.config.accel_threshold {
                    return Handled;
                }
                info!("motion: dizzy start magnitude={}", magnitude);
                self.mode = EyeMode::Dizzy;
                self.sweep_deg = 0;
                context.step.entered_dizzy = true;
                Transition(State::dizzy())
            }
            MotionEvent::Frame => Handled,
            MotionEvent::Reset => Super,
        }
    }

    #[state(superstate = "running")]
    fn dizzy(&mut self, context: &mut DispatchContext, event: &MotionEvent) -> Outcome<State> {
        match event {
            // Shaking during an episode does not restart it.
            MotionEvent::Accel { .. } => Handled,
            MotionEvent::Frame => {
                context.step.sweep_deg = Some(self.sweep_deg);
                self.sweep_deg = self.sweep_deg.saturating_add(self.config.step_deg);
                if self.sweep_deg < self.config.total_deg() {
                    return Handled;
                }
                info!("motion: dizzy end");
                self.settle_normal();
                context.step.finished = true;
                Transition(State::normal())
            }
            MotionEvent::Reset => Super,
        }
    }

    #[superstate]
    fn running(&mut self, event: &MotionEvent) -> Outcome<State> {
        match event {
            MotionEvent::Reset => {
                self.settle_normal();
                Transition(State::normal())
            }
            _ => Handled,
        }
    }
}
