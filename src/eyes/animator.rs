use log::{debug, info, warn};

use super::{
    blink::BlinkCycle,
    config::EyesConfig,
    eye::{Eye, LidBands},
    geometry::GeometryError,
    motion::{AccelSource, MotionEngine},
    rng::RandomSource,
    saccade::SaccadeGenerator,
    surface::{DisplaySurface, EyeCanvas, EyeSurface},
    touch::{TouchAdapter, TouchSource},
    types::{EyeMode, FrameTrace, SensorStatus, TouchSample, TouchState},
};

/// Drives both eyes from touch, acceleration and the blink timer.
///
/// All timing is gated on the `now_ms` values passed in; nothing reads a
/// clock. Acceleration is checked on its own interval, independent of the
/// frame interval, and a skipped frame does no drawing at all.
pub struct EyeAnimator<R, S = EyeCanvas> {
    config: EyesConfig,
    left: Eye<S>,
    right: Eye<S>,
    motion: MotionEngine,
    blink: BlinkCycle,
    saccade: SaccadeGenerator,
    touch: TouchAdapter,
    last_touch: TouchState,
    accel_status: SensorStatus,
    refresh_pending: bool,
    last_frame_ms: Option<u64>,
    last_accel_ms: Option<u64>,
    last_blink_ms: Option<u64>,
    rng: R,
}

impl<R: RandomSource> EyeAnimator<R, EyeCanvas> {
    pub fn new(config: EyesConfig, rng: R) -> Result<Self, GeometryError> {
        Self::with_surfaces(config, rng, EyeCanvas::new(), EyeCanvas::new())
    }
}

impl<R: RandomSource, S: EyeSurface> EyeAnimator<R, S> {
    pub fn with_surfaces(
        config: EyesConfig,
        rng: R,
        left_surface: S,
        right_surface: S,
    ) -> Result<Self, GeometryError> {
        let bands = LidBands::from(&config.blink);
        let left = Eye::with_surface(
            config.geometry(&config.left)?,
            config.left.phase_offset_deg,
            bands,
            left_surface,
        );
        let right = Eye::with_surface(
            config.geometry(&config.right)?,
            config.right.phase_offset_deg,
            bands,
            right_surface,
        );

        Ok(Self {
            config,
            left,
            right,
            motion: MotionEngine::new(config.dizzy),
            blink: BlinkCycle::new(&config.blink),
            saccade: SaccadeGenerator::new(config.saccade, config.timing.saccade_interval_ms),
            touch: TouchAdapter::new(config.timing.touch_interval_ms),
            last_touch: TouchState::None,
            accel_status: SensorStatus::Unknown,
            refresh_pending: false,
            last_frame_ms: None,
            last_accel_ms: None,
            last_blink_ms: None,
            rng,
        })
    }

    pub const fn config(&self) -> &EyesConfig {
        &self.config
    }

    pub const fn left(&self) -> &Eye<S> {
        &self.left
    }

    pub const fn right(&self) -> &Eye<S> {
        &self.right
    }

    pub fn left_mut(&mut self) -> &mut Eye<S> {
        &mut self.left
    }

    pub fn right_mut(&mut self) -> &mut Eye<S> {
        &mut self.right
    }

    pub fn mode(&self) -> EyeMode {
        self.motion.mode()
    }

    pub fn sweep_deg(&self) -> u16 {
        self.motion.sweep_deg()
    }

    pub const fn blink(&self) -> &BlinkCycle {
        &self.blink
    }

    pub const fn accel_status(&self) -> SensorStatus {
        self.accel_status
    }

    pub const fn touch_sample(&self) -> TouchSample {
        self.touch.sample()
    }

    /// Draws both eyes from scratch, probes the acceleration source once and
    /// presents. An unavailable sensor is not an error here.
    pub fn setup<A, D>(&mut self, accel: &mut A, display: &mut D) -> Result<(), D::Error>
    where
        A: AccelSource + ?Sized,
        D: DisplaySurface<S> + ?Sized,
    {
        self.left.reset();
        self.right.reset();

        match accel.sample() {
            Ok(sample) => {
                self.mark_accel_ready();
                debug!("eyes: setup accel magnitude={}", sample.magnitude());
            }
            Err(err) => self.mark_accel_unavailable(&err),
        }

        self.present(display)?;
        info!(
            "eyes: setup done accel={:?} mode={:?}",
            self.accel_status,
            self.motion.mode()
        );
        Ok(())
    }

    /// Samples acceleration when its interval has elapsed. Returns true when
    /// this check started a dizzy episode.
    pub fn check_motion<A>(&mut self, now_ms: u64, accel: &mut A) -> bool
    where
        A: AccelSource + ?Sized,
    {
        if self
            .last_accel_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.config.timing.accel_interval_ms)
        {
            return false;
        }
        self.last_accel_ms = Some(now_ms);

        let sample = match accel.sample() {
            Ok(sample) => sample,
            Err(err) => {
                self.mark_accel_unavailable(&err);
                return false;
            }
        };
        self.mark_accel_ready();

        let step = self.motion.accel(sample.magnitude());
        if step.entered_dizzy {
            self.refresh_pending = true;
        }
        step.entered_dizzy
    }

    /// One pass of the animation loop.
    pub fn tick<T, A, D>(
        &mut self,
        now_ms: u64,
        touch: &mut T,
        accel: &mut A,
        display: &mut D,
    ) -> Result<FrameTrace, D::Error>
    where
        T: TouchSource + ?Sized,
        A: AccelSource + ?Sized,
        D: DisplaySurface<S> + ?Sized,
    {
        self.check_motion(now_ms, accel);

        if self
            .last_frame_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.config.timing.frame_interval_ms)
        {
            return Ok(self.trace(now_ms, false));
        }
        self.last_frame_ms = Some(now_ms);

        if self.refresh_pending {
            self.refresh_pending = false;
            self.left.refresh();
            self.right.refresh();
        }

        let mode = self.motion.mode();
        match mode {
            EyeMode::Dizzy => self.dizzy_frame(),
            EyeMode::Normal => {
                let sample = self.touch.update(now_ms, touch);
                let released =
                    sample.state == TouchState::Released && self.last_touch != TouchState::Released;
                self.last_touch = sample.state;

                if released {
                    info!("touch: released; eyes reset");
                    self.reset_eyes();
                    self.present(display)?;
                    return Ok(self.trace(now_ms, true));
                }
                self.gaze_frame(now_ms, sample);
            }
        }

        if mode == EyeMode::Normal || self.config.blink_during_dizzy {
            self.blink_step(now_ms);
        }

        self.present(display)?;
        Ok(self.trace(now_ms, true))
    }

    fn dizzy_frame(&mut self) {
        let step = self.motion.frame();
        if let Some(sweep) = step.sweep_deg {
            let total = self.motion.total_deg();
            self.left.dizzy_pupil(sweep, total);
            self.right.dizzy_pupil(sweep, total);
        }
    }

    fn gaze_frame(&mut self, now_ms: u64, sample: TouchSample) {
        let jitter = self.saccade.next(now_ms, &mut self.rng);
        if sample.state == TouchState::Touching {
            self.left.gaze_at(sample.point, jitter);
            self.right.gaze_at(sample.point, jitter);
        } else {
            self.left.center_pupil(jitter);
            self.right.center_pupil(jitter);
        }
    }

    fn blink_step(&mut self, now_ms: u64) {
        if self
            .last_blink_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.config.timing.blink_interval_ms)
        {
            return;
        }
        self.last_blink_ms = Some(now_ms);

        let state = self.blink.advance(&mut self.rng);
        self.left.draw_blink(state);
        self.right.draw_blink(state);
    }

    fn reset_eyes(&mut self) {
        self.motion.reset();
        self.blink.reset();
        self.refresh_pending = false;
        self.left.reset();
        self.right.reset();
    }

    fn present<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DisplaySurface<S> + ?Sized,
    {
        self.left.render(display)?;
        self.right.render(display)
    }

    fn mark_accel_ready(&mut self) {
        if self.accel_status != SensorStatus::Ready {
            info!("accel: ready");
        }
        self.accel_status = SensorStatus::Ready;
    }

    fn mark_accel_unavailable<E: core::fmt::Debug>(&mut self, err: &E) {
        if self.accel_status != SensorStatus::Unavailable {
            warn!("accel: unavailable err={:?}; dizzy detection paused", err);
        }
        self.accel_status = SensorStatus::Unavailable;
    }

    fn trace(&self, now_ms: u64, rendered: bool) -> FrameTrace {
        FrameTrace {
            now_ms,
            rendered,
            mode: self.motion.mode(),
            sweep_deg: self.motion.sweep_deg(),
            blink: self.left.lids(),
            touch: self.touch.sample().state,
            accel: self.accel_status,
        }
    }
}
