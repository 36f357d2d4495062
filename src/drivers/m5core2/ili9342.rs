use embedded_graphics::{pixelcolor::BinaryColor, primitives::Rectangle};

use crate::eyes::types::{Point, Size};

pub const PANEL_WIDTH: u32 = 320;
pub const PANEL_HEIGHT: u32 = 240;

const WHITE_565: u16 = 0xFFFF;
const BLACK_565: u16 = 0x0000;

pub const fn rgb565(color: BinaryColor) -> u16 {
    match color {
        BinaryColor::On => WHITE_565,
        BinaryColor::Off => BLACK_565,
    }
}

/// Part of a `size` block at `origin` that lands on the panel.
pub fn visible_area(origin: Point, size: Size) -> Option<Rectangle> {
    let panel = Rectangle::new(Point::zero(), Size::new(PANEL_WIDTH, PANEL_HEIGHT));
    let area = Rectangle::new(origin, size).intersection(&panel);
    (!area.is_zero_sized()).then_some(area)
}

/// Expands `width` pixels of an LSB-first 1-bit row, starting at pixel
/// `skip`, into big-endian RGB565. Returns the number of bytes written.
pub fn expand_row(row: &[u8], skip: u32, width: u32, out: &mut [u8]) -> usize {
    let mut written = 0;
    for x in skip..skip + width {
        let Some(byte) = row.get((x / 8) as usize) else {
            break;
        };
        let Some(slot) = out.get_mut(written..written + 2) else {
            break;
        };
        let color = if byte & (1 << (x % 8)) != 0 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        };
        slot.copy_from_slice(&rgb565(color).to_be_bytes());
        written += 2;
    }
    written
}

#[cfg(feature = "esp-hal-runtime")]
pub use panel::Ili9342;

#[cfg(feature = "esp-hal-runtime")]
mod panel {
    use esp_hal::{
        gpio::Output,
        spi::{master::Spi, Error as SpiError},
        Blocking,
    };
    use log::info;

    use super::*;
    use crate::{
        eyes::{
            surface::{CANVAS_HEIGHT, CANVAS_WIDTH},
            DisplaySurface, EyeCanvas,
        },
        platform::DelayOps,
    };

    const CMD_SWRESET: u8 = 0x01;
    const CMD_SLPOUT: u8 = 0x11;
    const CMD_INVON: u8 = 0x21;
    const CMD_DISPON: u8 = 0x29;
    const CMD_CASET: u8 = 0x2A;
    const CMD_PASET: u8 = 0x2B;
    const CMD_RAMWR: u8 = 0x2C;
    const CMD_MADCTL: u8 = 0x36;
    const CMD_COLMOD: u8 = 0x3A;

    const LINE_BYTES: usize = PANEL_WIDTH as usize * 2;

    /// ILI9342C over blocking SPI with a GPIO data/command line.
    pub struct Ili9342<'d> {
        spi: Spi<'d, Blocking>,
        dc: Output<'d>,
        cs: Output<'d>,
        line: [u8; LINE_BYTES],
    }

    impl<'d> Ili9342<'d> {
        pub fn new(spi: Spi<'d, Blocking>, dc: Output<'d>, mut cs: Output<'d>) -> Self {
            cs.set_high();
            Self {
                spi,
                dc,
                cs,
                line: [0; LINE_BYTES],
            }
        }

        pub fn init<D: DelayOps>(&mut self, delay: &D) -> Result<(), SpiError> {
            self.command(CMD_SWRESET, &[])?;
            delay.delay_ms(120);
            self.command(CMD_SLPOUT, &[])?;
            delay.delay_ms(120);
            // 16 bits per pixel.
            self.command(CMD_COLMOD, &[0x55])?;
            // BGR order, landscape scan.
            self.command(CMD_MADCTL, &[0x08])?;
            // The Core2 panel is wired inverted.
            self.command(CMD_INVON, &[])?;
            self.command(CMD_DISPON, &[])?;
            delay.delay_ms(20);
            info!("lcd: ili9342 on {}x{}", PANEL_WIDTH, PANEL_HEIGHT);
            Ok(())
        }

        pub fn clear(&mut self, color: BinaryColor) -> Result<(), SpiError> {
            let [hi, lo] = rgb565(color).to_be_bytes();
            for pair in self.line.chunks_exact_mut(2) {
                pair[0] = hi;
                pair[1] = lo;
            }
            self.set_window(0, 0, PANEL_WIDTH - 1, PANEL_HEIGHT - 1)?;
            self.cs.set_low();
            self.dc.set_high();
            let mut result = Ok(());
            for _ in 0..PANEL_HEIGHT {
                result = self.spi.write(&self.line);
                if result.is_err() {
                    break;
                }
            }
            self.cs.set_high();
            result
        }

        fn set_window(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<(), SpiError> {
            let [x0h, x0l] = (x0 as u16).to_be_bytes();
            let [x1h, x1l] = (x1 as u16).to_be_bytes();
            let [y0h, y0l] = (y0 as u16).to_be_bytes();
            let [y1h, y1l] = (y1 as u16).to_be_bytes();
            self.command(CMD_CASET, &[x0h, x0l, x1h, x1l])?;
            self.command(CMD_PASET, &[y0h, y0l, y1h, y1l])?;
            self.command(CMD_RAMWR, &[])
        }

        fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), SpiError> {
            self.cs.set_low();
            self.dc.set_low();
            let mut result = self.spi.write(&[cmd]);
            if result.is_ok() && !params.is_empty() {
                self.dc.set_high();
                result = self.spi.write(params);
            }
            self.cs.set_high();
            result
        }
    }

    impl DisplaySurface<EyeCanvas> for Ili9342<'_> {
        type Error = SpiError;

        fn present(&mut self, origin: Point, surface: &EyeCanvas) -> Result<(), Self::Error> {
            let Some(area) = visible_area(origin, Size::new(CANVAS_WIDTH, CANVAS_HEIGHT)) else {
                return Ok(());
            };
            let x0 = area.top_left.x as u32;
            let y0 = area.top_left.y as u32;
            let skip = (area.top_left.x - origin.x) as u32;
            let first_row = (area.top_left.y - origin.y) as u32;

            self.set_window(
                x0,
                y0,
                x0 + area.size.width - 1,
                y0 + area.size.height - 1,
            )?;

            self.cs.set_low();
            self.dc.set_high();
            let mut result = Ok(());
            for y in first_row..first_row + area.size.height {
                let Some(row) = surface.row(y) else {
                    break;
                };
                let len = expand_row(row, skip, area.size.width, &mut self.line);
                result = self.spi.write(&self.line[..len]);
                if result.is_err() {
                    break;
                }
            }
            self.cs.set_high();
            result
        }
    }
}
