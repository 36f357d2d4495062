//! Board support for the M5Stack Core2: AXP192 power, FT6336 touch, MPU6886
//! IMU on the internal I2C bus, and the ILI9342C panel on SPI.

mod axp192;
mod ft6336;
mod ili9342;
mod mpu6886;
#[cfg(test)]
mod test_bus;

pub use axp192::Axp192;
pub use ft6336::{decode_frame, gesture_code, Ft6336, TouchFrame};
#[cfg(feature = "esp-hal-runtime")]
pub use ili9342::Ili9342;
pub use ili9342::{expand_row, rgb565, visible_area, PANEL_HEIGHT, PANEL_WIDTH};
pub use mpu6886::{accel_from_raw, ImuError, Mpu6886};

pub const AXP192_ADDR: u8 = 0x34;
pub const FT6336_ADDR: u8 = 0x38;
pub const MPU6886_ADDR: u8 = 0x68;

pub const INTERNAL_I2C_KHZ: u32 = 400;
pub const LCD_SPI_KHZ: u32 = 40_000;
