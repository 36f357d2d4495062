use super::types::{Point, TouchSample, TouchState};

const CODE_TOUCHING_BIT: u8 = 0b0001;

/// One poll of the touch controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTouch {
    /// Gesture code: bit0 touching, bit1 changed, bit2 holding, bit3 moving.
    pub code: u8,
    pub x: i16,
    pub y: i16,
    pub contacts: u8,
}

pub trait TouchSource {
    fn poll(&mut self) -> RawTouch;
}

pub const fn classify(code: u8, contacts: u8) -> TouchState {
    if code & CODE_TOUCHING_BIT != 0 {
        if contacts > 1 {
            TouchState::MultiTouch
        } else {
            TouchState::Touching
        }
    } else if matches!(code, 2 | 6 | 10 | 14) {
        // End of a touch, hold, flick or drag.
        TouchState::Released
    } else {
        TouchState::None
    }
}

/// Rate-limited touch classification with the last touching coordinate.
#[derive(Clone, Copy, Debug)]
pub struct TouchAdapter {
    interval_ms: u64,
    last_poll_ms: Option<u64>,
    sample: TouchSample,
}

impl TouchAdapter {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_poll_ms: None,
            sample: TouchSample {
                state: TouchState::None,
                point: Point::zero(),
            },
        }
    }

    /// Polls `source` when the interval has elapsed; otherwise returns the
    /// cached sample.
    pub fn update<T: TouchSource + ?Sized>(&mut self, now_ms: u64, source: &mut T) -> TouchSample {
        if self
            .last_poll_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.interval_ms)
        {
            return self.sample;
        }
        self.last_poll_ms = Some(now_ms);

        let raw = source.poll();
        let state = classify(raw.code, raw.contacts);
        if state == TouchState::Touching {
            self.sample.point = Point::new(raw.x as i32, raw.y as i32);
        }
        self.sample.state = state;
        self.sample
    }

    pub const fn sample(&self) -> TouchSample {
        self.sample
    }
}

#[cfg(test)]
mod tests;
