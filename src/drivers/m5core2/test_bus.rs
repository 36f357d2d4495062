use core::cell::Cell;
use std::collections::BTreeMap;

use crate::platform::{DelayOps, I2cOps};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusFault;

/// Register file per device address, with a log of every register write.
#[derive(Default)]
pub struct FakeBus {
    regs: BTreeMap<u8, [u8; 256]>,
    pub writes: Vec<(u8, u8, u8)>,
    pub failing: bool,
}

impl FakeBus {
    pub fn with_device(mut self, addr: u8) -> Self {
        self.regs.insert(addr, [0; 256]);
        self
    }

    pub fn set(&mut self, addr: u8, reg: u8, values: &[u8]) {
        let file = self.regs.entry(addr).or_insert([0; 256]);
        for (offset, value) in values.iter().enumerate() {
            file[reg as usize + offset] = *value;
        }
    }

    pub fn get(&self, addr: u8, reg: u8) -> u8 {
        self.regs.get(&addr).map_or(0, |file| file[reg as usize])
    }

    pub fn last_write(&self, addr: u8, reg: u8) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(a, r, _)| *a == addr && *r == reg)
            .map(|(_, _, v)| *v)
    }
}

impl I2cOps for FakeBus {
    type Error = BusFault;

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.write_read(addr, &[0], buffer)
    }

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.failing || !self.regs.contains_key(&addr) {
            return Err(BusFault);
        }
        if let Some((reg, values)) = bytes.split_first() {
            for (offset, value) in values.iter().enumerate() {
                let target = reg.wrapping_add(offset as u8);
                self.writes.push((addr, target, *value));
            }
            self.set(addr, *reg, values);
        }
        Ok(())
    }

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        if self.failing {
            return Err(BusFault);
        }
        let file = self.regs.get(&addr).ok_or(BusFault)?;
        let start = bytes.first().copied().unwrap_or(0) as usize;
        for (offset, slot) in buffer.iter_mut().enumerate() {
            *slot = file[(start + offset) & 0xFF];
        }
        Ok(())
    }

    fn probe(&mut self, addr: u8) -> Result<bool, Self::Error> {
        if self.failing {
            return Err(BusFault);
        }
        Ok(self.regs.contains_key(&addr))
    }
}

#[derive(Default)]
pub struct CountingDelay {
    pub total_ms: Cell<u32>,
}

impl DelayOps for CountingDelay {
    fn delay_us(&self, _micros: u32) {}

    fn delay_ms(&self, millis: u32) {
        self.total_ms.set(self.total_ms.get() + millis);
    }
}
