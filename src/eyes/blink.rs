use super::{config::BlinkConfig, rng::RandomSource, types::BlinkState};

/// Last counter frame that shows the lids anything but open.
pub const LAST_LID_FRAME: u16 = 6;

/// Lid state for a given blink-counter frame.
pub const fn state_for_frame(frame: u16) -> BlinkState {
    match frame {
        1 | 6 => BlinkState::HalfClosed,
        2..=5 => BlinkState::Closed,
        _ => BlinkState::Open,
    }
}

/// Counter-driven blink cycle with a randomized wrap point.
#[derive(Clone, Copy, Debug)]
pub struct BlinkCycle {
    counter: u16,
    ceiling: u16,
    random_min: u16,
    random_max: u16,
}

impl BlinkCycle {
    pub const fn new(config: &BlinkConfig) -> Self {
        Self {
            counter: 0,
            ceiling: config.initial_ceiling,
            random_min: config.random_min,
            random_max: config.random_max,
        }
    }

    pub const fn counter(&self) -> u16 {
        self.counter
    }

    pub const fn ceiling(&self) -> u16 {
        self.ceiling
    }

    pub const fn state(&self) -> BlinkState {
        state_for_frame(self.counter)
    }

    /// One blink-timer step. Past the ceiling the counter wraps to zero and a
    /// new ceiling is drawn from `random_min..random_max`.
    pub fn advance<R: RandomSource>(&mut self, rng: &mut R) -> BlinkState {
        self.counter = self.counter.saturating_add(1);
        if self.counter > self.ceiling {
            self.counter = 0;
            self.ceiling = rng.range(self.random_min as u32, self.random_max as u32) as u16;
        }
        self.state()
    }

    /// Forces the lids open. A cycle inside its lid frames skips to the first
    /// open frame; otherwise the counter and ceiling are kept.
    pub fn reset(&mut self) {
        self.counter = self.counter.max(LAST_LID_FRAME + 1);
    }
}
