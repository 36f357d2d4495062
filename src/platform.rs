use core::cell::RefCell;

#[cfg(feature = "esp-hal-runtime")]
use esp_hal::{
    i2c::master::{Error as I2cError, I2c},
    time::{Duration, Instant},
    Blocking,
};

pub trait DelayOps {
    fn delay_us(&self, micros: u32);
    fn delay_ms(&self, millis: u32);
}

/// Register-level access to a blocking I2C bus.
pub trait I2cOps {
    type Error: core::fmt::Debug;

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;
    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error>;
    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;
    fn probe(&mut self, addr: u8) -> Result<bool, Self::Error>;

    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.write(addr, &[reg, value])
    }

    fn read_reg(&mut self, addr: u8, reg: u8) -> Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.write_read(addr, &[reg], &mut value)?;
        Ok(value[0])
    }

    /// Read-modify-write: keeps the bits outside `mask`.
    fn update_reg(&mut self, addr: u8, reg: u8, mask: u8, bits: u8) -> Result<(), Self::Error> {
        let current = self.read_reg(addr, reg)?;
        self.write_reg(addr, reg, (current & !mask) | (bits & mask))
    }
}

#[cfg(feature = "esp-hal-runtime")]
pub struct HalI2c<'d> {
    bus: I2c<'d, Blocking>,
}

#[cfg(feature = "esp-hal-runtime")]
impl<'d> HalI2c<'d> {
    pub fn new(bus: I2c<'d, Blocking>) -> Self {
        Self { bus }
    }
}

#[cfg(feature = "esp-hal-runtime")]
impl I2cOps for HalI2c<'_> {
    type Error = I2cError;

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(addr, buffer)
    }

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(addr, bytes)
    }

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.write_read(addr, bytes, buffer)
    }

    fn probe(&mut self, addr: u8) -> Result<bool, Self::Error> {
        match self.bus.write(addr, &[0x00]) {
            Ok(()) => Ok(true),
            Err(I2cError::AcknowledgeCheckFailed(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// The PMU, touch controller and IMU share one internal bus. Each driver
/// holds a `&RefCell` and borrows it for a single transaction.
impl<T: I2cOps> I2cOps for &RefCell<T> {
    type Error = T::Error;

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.borrow_mut().read(addr, buffer)
    }

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.borrow_mut().write(addr, bytes)
    }

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.borrow_mut().write_read(addr, bytes, buffer)
    }

    fn probe(&mut self, addr: u8) -> Result<bool, Self::Error> {
        self.borrow_mut().probe(addr)
    }
}

#[cfg(feature = "esp-hal-runtime")]
#[derive(Clone, Copy, Default)]
pub struct BusyDelay;

#[cfg(feature = "esp-hal-runtime")]
impl BusyDelay {
    pub const fn new() -> Self {
        Self
    }

    fn spin(&self, duration: Duration) {
        let start = Instant::now();
        while start.elapsed() < duration {}
    }
}

#[cfg(feature = "esp-hal-runtime")]
impl DelayOps for BusyDelay {
    fn delay_us(&self, micros: u32) {
        self.spin(Duration::from_micros(micros as u64));
    }

    fn delay_ms(&self, millis: u32) {
        self.spin(Duration::from_millis(millis as u64));
    }
}
