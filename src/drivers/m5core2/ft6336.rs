use log::debug;

use super::FT6336_ADDR;
use crate::{
    eyes::{RawTouch, TouchSource},
    platform::I2cOps,
};

const REG_TD_STATUS: u8 = 0x02;
const REG_G_MODE: u8 = 0xA4;
const REG_PERIOD_ACTIVE: u8 = 0x88;
const MAX_CONTACTS: u8 = 2;

const CODE_TOUCHING: u8 = 1 << 0;
const CODE_CHANGED: u8 = 1 << 1;

/// First contact of one controller poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchFrame {
    pub contacts: u8,
    pub x: i16,
    pub y: i16,
}

/// Decodes TD_STATUS and the first point registers (0x02..=0x06).
pub fn decode_frame(raw: &[u8; 5]) -> TouchFrame {
    let contacts = raw[0] & 0x0F;
    if contacts == 0 || contacts > MAX_CONTACTS {
        // 0x0F shows up while the controller is idle.
        return TouchFrame::default();
    }
    let x = (u16::from(raw[1] & 0x0F) << 8) | u16::from(raw[2]);
    let y = (u16::from(raw[3] & 0x0F) << 8) | u16::from(raw[4]);
    TouchFrame {
        contacts,
        x: x as i16,
        y: y as i16,
    }
}

/// Gesture code for a contact transition: begin 3, hold 1, end 2, idle 0.
pub const fn gesture_code(was_touching: bool, touching: bool) -> u8 {
    match (was_touching, touching) {
        (false, true) => CODE_TOUCHING | CODE_CHANGED,
        (true, true) => CODE_TOUCHING,
        (true, false) => CODE_CHANGED,
        (false, false) => 0,
    }
}

/// Polled capacitive touch controller.
pub struct Ft6336<I2C> {
    i2c: I2C,
    last: TouchFrame,
    touching: bool,
}

impl<I2C: I2cOps> Ft6336<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            last: TouchFrame::default(),
            touching: false,
        }
    }

    pub fn init(&mut self) -> Result<bool, I2C::Error> {
        if !self.i2c.probe(FT6336_ADDR)? {
            return Ok(false);
        }
        // Polling mode; the INT line is not wired to a handler.
        self.i2c.write_reg(FT6336_ADDR, REG_G_MODE, 0x00)?;
        // Report rate while touched, in Hz.
        self.i2c.write_reg(FT6336_ADDR, REG_PERIOD_ACTIVE, 0x0E)?;
        Ok(true)
    }

    pub fn read_frame(&mut self) -> Result<TouchFrame, I2C::Error> {
        let mut raw = [0u8; 5];
        self.i2c.write_read(FT6336_ADDR, &[REG_TD_STATUS], &mut raw)?;
        Ok(decode_frame(&raw))
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cOps> TouchSource for Ft6336<I2C> {
    fn poll(&mut self) -> RawTouch {
        let frame = match self.read_frame() {
            Ok(frame) => frame,
            Err(err) => {
                debug!("touch: read failed err={:?}", err);
                return RawTouch::default();
            }
        };

        let touching = frame.contacts > 0;
        let code = gesture_code(self.touching, touching);
        self.touching = touching;
        if touching {
            self.last = frame;
        }

        RawTouch {
            code,
            x: self.last.x,
            y: self.last.y,
            contacts: frame.contacts,
        }
    }
}

#[cfg(test)]
mod tests;
