use log::info;

use super::AXP192_ADDR;
use crate::platform::{DelayOps, I2cOps};

const REG_POWER_OUTPUT: u8 = 0x12;
const REG_DCDC3_VOLTAGE: u8 = 0x27;
const REG_LDO23_VOLTAGE: u8 = 0x28;
const REG_VBUS_IPSOUT: u8 = 0x30;
const REG_GPIO4_CTRL: u8 = 0x95;
const REG_GPIO34_LEVEL: u8 = 0x96;

const OUTPUT_DCDC3: u8 = 1 << 1;
const OUTPUT_LDO2: u8 = 1 << 2;
const GPIO4_LEVEL: u8 = 1 << 1;

const LCD_LOGIC_MV: u16 = 3_300;
const BACKLIGHT_DEFAULT_MV: u16 = 2_800;
const BACKLIGHT_MIN_MV: u16 = 2_500;
const BACKLIGHT_MAX_MV: u16 = 3_300;
const LCD_RESET_HOLD_MS: u32 = 100;

/// Power management: LCD logic rail (LDO2), backlight (DCDC3) and the LCD
/// reset line wired to GPIO4.
pub struct Axp192<I2C> {
    i2c: I2C,
}

impl<I2C: I2cOps> Axp192<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Powers the panel and pulses its reset. Returns `Ok(false)` when the
    /// PMU does not answer.
    pub fn init<D: DelayOps>(&mut self, delay: &D) -> Result<bool, I2C::Error> {
        if !self.i2c.probe(AXP192_ADDR)? {
            return Ok(false);
        }

        // VBUS path: no hold voltage limit, 500 mA current limit.
        self.i2c
            .update_reg(AXP192_ADDR, REG_VBUS_IPSOUT, 0xFB, 0x02)?;
        // LDO2 feeds the LCD logic; high nibble, 100 mV steps from 1.8 V.
        self.i2c.update_reg(
            AXP192_ADDR,
            REG_LDO23_VOLTAGE,
            0xF0,
            (ldo_step(LCD_LOGIC_MV) << 4) & 0xF0,
        )?;
        self.set_backlight_mv(BACKLIGHT_DEFAULT_MV)?;
        self.i2c.update_reg(
            AXP192_ADDR,
            REG_POWER_OUTPUT,
            OUTPUT_DCDC3 | OUTPUT_LDO2,
            OUTPUT_DCDC3 | OUTPUT_LDO2,
        )?;
        // GPIO4 as NMOS open-drain output.
        self.i2c
            .update_reg(AXP192_ADDR, REG_GPIO4_CTRL, 0x8D, 0x84)?;

        self.reset_lcd(delay)?;
        info!("axp192: lcd power on backlight_mv={}", BACKLIGHT_DEFAULT_MV);
        Ok(true)
    }

    pub fn reset_lcd<D: DelayOps>(&mut self, delay: &D) -> Result<(), I2C::Error> {
        self.i2c
            .update_reg(AXP192_ADDR, REG_GPIO34_LEVEL, GPIO4_LEVEL, 0)?;
        delay.delay_ms(LCD_RESET_HOLD_MS);
        self.i2c
            .update_reg(AXP192_ADDR, REG_GPIO34_LEVEL, GPIO4_LEVEL, GPIO4_LEVEL)?;
        delay.delay_ms(LCD_RESET_HOLD_MS);
        Ok(())
    }

    /// DCDC3 drives the backlight; 25 mV steps from 0.7 V.
    pub fn set_backlight_mv(&mut self, millivolts: u16) -> Result<(), I2C::Error> {
        let mv = millivolts.clamp(BACKLIGHT_MIN_MV, BACKLIGHT_MAX_MV);
        self.i2c
            .update_reg(AXP192_ADDR, REG_DCDC3_VOLTAGE, 0x7F, dcdc_step(mv))
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

pub(super) const fn ldo_step(millivolts: u16) -> u8 {
    ((millivolts.saturating_sub(1_800)) / 100) as u8
}

pub(super) const fn dcdc_step(millivolts: u16) -> u8 {
    ((millivolts.saturating_sub(700)) / 25) as u8
}
