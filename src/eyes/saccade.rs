use super::{config::SaccadeConfig, rng::RandomSource, types::Point};

/// Shared micro-jitter, refreshed at most once per interval.
#[derive(Clone, Copy, Debug)]
pub struct SaccadeGenerator {
    config: SaccadeConfig,
    interval_ms: u64,
    last_at_ms: Option<u64>,
    last: Point,
}

impl SaccadeGenerator {
    pub const fn new(config: SaccadeConfig, interval_ms: u64) -> Self {
        Self {
            config,
            interval_ms,
            last_at_ms: None,
            last: Point::zero(),
        }
    }

    pub fn next<R: RandomSource>(&mut self, now_ms: u64, rng: &mut R) -> Point {
        if self
            .last_at_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.interval_ms)
        {
            return self.last;
        }

        self.last_at_ms = Some(now_ms);
        self.last = Point::new(self.axis(rng), self.axis(rng));
        self.last
    }

    pub const fn current(&self) -> Point {
        self.last
    }

    /// Largest value a single axis can take.
    pub const fn max_axis(&self) -> i32 {
        if self.config.divisor == 0 || self.config.range == 0 {
            return 0;
        }
        (self.config.range as i32 - 1) / self.config.divisor as i32
    }

    fn axis<R: RandomSource>(&self, rng: &mut R) -> i32 {
        if self.config.divisor == 0 {
            return 0;
        }
        rng.below(self.config.range as u32) as i32 / self.config.divisor as i32
    }
}
