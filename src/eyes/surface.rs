use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Primitive, Size},
    primitives::{Circle, Ellipse, PrimitiveStyle, Rectangle},
    Drawable,
};

pub const CANVAS_WIDTH: u32 = 160;
pub const CANVAS_HEIGHT: u32 = 131;
pub const CANVAS_STRIDE: usize = (CANVAS_WIDTH as usize).div_ceil(8);
pub const CANVAS_BYTES: usize = CANVAS_STRIDE * CANVAS_HEIGHT as usize;

/// Eye-white color; pupils and lids use the opposite.
pub const EYE_WHITE: BinaryColor = BinaryColor::On;
pub const EYE_INK: BinaryColor = BinaryColor::Off;

/// Primitive fills an eye needs from its private buffer.
pub trait EyeSurface {
    fn fill(&mut self, color: BinaryColor);
    fn fill_circle(&mut self, center: Point, radius: u32, color: BinaryColor);
    fn fill_ellipse(&mut self, center: Point, radii: Size, color: BinaryColor);
    fn fill_rect(&mut self, area: Rectangle, color: BinaryColor);
}

/// Physical screen that accepts a finished eye buffer at a top-left offset.
pub trait DisplaySurface<S: ?Sized> {
    type Error: core::fmt::Debug;

    fn present(&mut self, origin: Point, surface: &S) -> Result<(), Self::Error>;
}

/// 1-bit off-screen buffer for one eye, rows packed LSB-first.
#[derive(Clone)]
pub struct EyeCanvas {
    buf: [u8; CANVAS_BYTES],
}

impl Default for EyeCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl EyeCanvas {
    pub const fn new() -> Self {
        Self {
            buf: [0; CANVAS_BYTES],
        }
    }

    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (idx, mask) = Self::locate(point)?;
        Some(BinaryColor::from(self.buf[idx] & mask != 0))
    }

    /// Packed bits of row `y`; bit `x % 8` of byte `x / 8` is pixel `x`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= CANVAS_HEIGHT {
            return None;
        }
        let start = y as usize * CANVAS_STRIDE;
        Some(&self.buf[start..start + CANVAS_STRIDE])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn count(&self, color: BinaryColor) -> usize {
        let on: usize = self.buf.iter().map(|b| b.count_ones() as usize).sum();
        match color {
            BinaryColor::On => on,
            BinaryColor::Off => (CANVAS_WIDTH * CANVAS_HEIGHT) as usize - on,
        }
    }

    fn locate(point: Point) -> Option<(usize, u8)> {
        if point.x < 0
            || point.y < 0
            || point.x >= CANVAS_WIDTH as i32
            || point.y >= CANVAS_HEIGHT as i32
        {
            return None;
        }
        let x = point.x as usize;
        let y = point.y as usize;
        Some((CANVAS_STRIDE * y + x / 8, 1 << (x % 8)))
    }
}

impl OriginDimensions for EyeCanvas {
    fn size(&self) -> Size {
        Size::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl DrawTarget for EyeCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<It>(&mut self, pixels: It) -> core::result::Result<(), Self::Error>
    where
        It: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let Some((idx, mask)) = Self::locate(point) else {
                continue;
            };
            if color.is_on() {
                self.buf[idx] |= mask;
            } else {
                self.buf[idx] &= !mask;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> core::result::Result<(), Self::Error> {
        if color == BinaryColor::On {
            self.buf.fill(0xFF);
        } else {
            self.buf.fill(0x00);
        }
        Ok(())
    }
}

impl EyeSurface for EyeCanvas {
    fn fill(&mut self, color: BinaryColor) {
        let _ = self.clear(color);
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: BinaryColor) {
        let _ = Circle::with_center(center, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self);
    }

    fn fill_ellipse(&mut self, center: Point, radii: Size, color: BinaryColor) {
        let _ = Ellipse::with_center(center, Size::new(radii.width * 2 + 1, radii.height * 2 + 1))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self);
    }

    fn fill_rect(&mut self, area: Rectangle, color: BinaryColor) {
        let _ = area
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self);
    }
}
