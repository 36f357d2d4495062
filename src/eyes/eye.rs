use embedded_graphics::{pixelcolor::BinaryColor, primitives::Rectangle};

use super::{
    config::BlinkConfig,
    geometry::{EyeGeometry, EyeShape},
    surface::{DisplaySurface, EyeCanvas, EyeSurface, CANVAS_WIDTH, EYE_INK, EYE_WHITE},
    types::{BlinkState, Point, Size},
};

/// Opaque bands drawn over the eye-white while half closed, in canvas rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LidBands {
    pub top_height: u32,
    pub bottom_y: i32,
    pub bottom_height: u32,
}

impl From<&BlinkConfig> for LidBands {
    fn from(config: &BlinkConfig) -> Self {
        Self {
            top_height: config.top_band_height,
            bottom_y: config.bottom_band_y,
            bottom_height: config.bottom_band_height,
        }
    }
}

/// One eye: its buffer, pupil position and last rendered lid state.
///
/// Pupil positions are world (screen) coordinates; drawing translates them
/// into the canvas by the geometry's origin. Moving the pupil erases the old
/// disc and draws the new one, and does nothing when the position is unchanged.
/// While the lids are not open a move is only recorded; opening the lids
/// draws the pupil where it ended up.
pub struct Eye<S = EyeCanvas> {
    geometry: EyeGeometry,
    phase_offset_deg: i32,
    bands: LidBands,
    pupil: Point,
    lids: BlinkState,
    surface: S,
}

impl Eye<EyeCanvas> {
    pub fn new(geometry: EyeGeometry, phase_offset_deg: i32, bands: LidBands) -> Self {
        Self::with_surface(geometry, phase_offset_deg, bands, EyeCanvas::new())
    }
}

impl<S: EyeSurface> Eye<S> {
    pub fn with_surface(
        geometry: EyeGeometry,
        phase_offset_deg: i32,
        bands: LidBands,
        surface: S,
    ) -> Self {
        Self {
            geometry,
            phase_offset_deg,
            bands,
            pupil: geometry.center(),
            lids: BlinkState::Open,
            surface,
        }
    }

    pub const fn geometry(&self) -> &EyeGeometry {
        &self.geometry
    }

    pub const fn phase_offset_deg(&self) -> i32 {
        self.phase_offset_deg
    }

    pub const fn pupil(&self) -> Point {
        self.pupil
    }

    pub const fn lids(&self) -> BlinkState {
        self.lids
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clear(&mut self) {
        self.surface.fill(EYE_INK);
    }

    pub fn draw_white(&mut self) {
        let center = self.geometry.to_local(self.geometry.center());
        match self.geometry.shape() {
            EyeShape::Circle { outer_radius, .. } => {
                self.surface.fill_circle(center, outer_radius, EYE_WHITE)
            }
            EyeShape::Ellipse { outer_radii, .. } => {
                self.surface.fill_ellipse(center, outer_radii, EYE_WHITE)
            }
        }
    }

    /// Redraws the whole buffer from scratch with open lids and a centered pupil.
    pub fn reset(&mut self) {
        self.pupil = self.geometry.center();
        self.lids = BlinkState::Open;
        self.clear();
        self.refresh();
    }

    /// Redraws the buffer for the current lid state and pupil.
    pub fn refresh(&mut self) {
        match self.lids {
            BlinkState::Open => self.draw_open(),
            BlinkState::HalfClosed => {
                self.draw_open();
                self.draw_bands();
            }
            BlinkState::Closed => self.surface.fill(EYE_INK),
        }
    }

    pub fn reset_pupil(&mut self) -> bool {
        self.update_pupil(self.geometry.center())
    }

    pub fn center_pupil(&mut self, jitter: Point) -> bool {
        self.update_pupil(self.geometry.place(self.geometry.center(), jitter))
    }

    pub fn gaze_at(&mut self, target: Point, jitter: Point) -> bool {
        self.update_pupil(self.geometry.place(target, jitter))
    }

    pub fn dizzy_pupil(&mut self, sweep_deg: u16, total_deg: u16) -> bool {
        self.update_pupil(
            self.geometry
                .dizzy(sweep_deg, total_deg, self.phase_offset_deg),
        )
    }

    /// Moves the pupil to `next`; returns whether the position changed.
    pub fn update_pupil(&mut self, next: Point) -> bool {
        if next == self.pupil {
            return false;
        }
        if self.lids == BlinkState::Open {
            self.fill_pupil(self.pupil, EYE_WHITE);
            self.fill_pupil(next, EYE_INK);
        }
        self.pupil = next;
        true
    }

    /// Renders a lid transition; returns false when `state` is already shown.
    pub fn draw_blink(&mut self, state: BlinkState) -> bool {
        if state == self.lids {
            return false;
        }
        match state {
            BlinkState::Open => self.draw_open(),
            BlinkState::HalfClosed => {
                if self.lids == BlinkState::Closed {
                    self.draw_open();
                }
                self.draw_bands();
            }
            BlinkState::Closed => self.surface.fill(EYE_INK),
        }
        self.lids = state;
        true
    }

    pub fn render<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DisplaySurface<S> + ?Sized,
    {
        display.present(self.geometry.origin(), &self.surface)
    }

    fn draw_open(&mut self) {
        self.draw_white();
        self.fill_pupil(self.pupil, EYE_INK);
    }

    fn draw_bands(&mut self) {
        let top = Rectangle::new(
            Point::zero(),
            Size::new(CANVAS_WIDTH, self.bands.top_height),
        );
        let bottom = Rectangle::new(
            Point::new(0, self.bands.bottom_y),
            Size::new(CANVAS_WIDTH, self.bands.bottom_height),
        );
        self.surface.fill_rect(top, EYE_INK);
        self.surface.fill_rect(bottom, EYE_INK);
    }

    fn fill_pupil(&mut self, world: Point, color: BinaryColor) {
        let at = self.geometry.to_local(world);
        match self.geometry.shape() {
            EyeShape::Circle { pupil_radius, .. } => {
                self.surface.fill_circle(at, pupil_radius, color)
            }
            EyeShape::Ellipse { pupil_radii, .. } => {
                self.surface.fill_ellipse(at, pupil_radii, color)
            }
        }
    }
}
