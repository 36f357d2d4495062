use log::info;

use super::MPU6886_ADDR;
use crate::{
    eyes::{AccelSample, AccelSource, Fx},
    platform::{DelayOps, I2cOps},
};

const REG_SMPLRT_DIV: u8 = 0x19;
const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_CONFIG2: u8 = 0x1D;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_VALUE: u8 = 0x19;

/// +/-8 g full scale: 4096 LSB per g, so one LSB is 16 fixed-point bits.
const ACCEL_FX_BITS_PER_LSB: i32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImuError<E> {
    Bus(E),
    NotReady,
}

impl<E> From<E> for ImuError<E> {
    fn from(value: E) -> Self {
        Self::Bus(value)
    }
}

pub fn accel_from_raw(raw: &[u8; 6]) -> AccelSample {
    let axis = |hi: u8, lo: u8| {
        Fx::from_bits(i32::from(i16::from_be_bytes([hi, lo])) * ACCEL_FX_BITS_PER_LSB)
    };
    AccelSample::new(
        axis(raw[0], raw[1]),
        axis(raw[2], raw[3]),
        axis(raw[4], raw[5]),
    )
}

/// 6-axis IMU; only the accelerometer is read.
pub struct Mpu6886<I2C> {
    i2c: I2C,
    ready: bool,
}

impl<I2C: I2cOps> Mpu6886<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c, ready: false }
    }

    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn init<D: DelayOps>(&mut self, delay: &D) -> Result<bool, I2C::Error> {
        self.ready = false;
        if self.i2c.read_reg(MPU6886_ADDR, REG_WHO_AM_I)? != WHO_AM_I_VALUE {
            return Ok(false);
        }

        self.i2c.write_reg(MPU6886_ADDR, REG_PWR_MGMT_1, 0x00)?;
        delay.delay_ms(10);
        // Device reset.
        self.i2c.write_reg(MPU6886_ADDR, REG_PWR_MGMT_1, 0x80)?;
        delay.delay_ms(10);
        // Auto-select the PLL clock.
        self.i2c.write_reg(MPU6886_ADDR, REG_PWR_MGMT_1, 0x01)?;
        delay.delay_ms(10);
        // +/-8 g.
        self.i2c.write_reg(MPU6886_ADDR, REG_ACCEL_CONFIG, 0x10)?;
        // +/-2000 dps.
        self.i2c.write_reg(MPU6886_ADDR, REG_GYRO_CONFIG, 0x18)?;
        // DLPF 176 Hz.
        self.i2c.write_reg(MPU6886_ADDR, REG_CONFIG, 0x01)?;
        // 1 kHz / (1 + 5).
        self.i2c.write_reg(MPU6886_ADDR, REG_SMPLRT_DIV, 0x05)?;
        self.i2c.write_reg(MPU6886_ADDR, REG_ACCEL_CONFIG2, 0x00)?;
        delay.delay_ms(1);

        self.ready = true;
        info!("imu: mpu6886 ready range=8g");
        Ok(true)
    }

    pub fn read_accel(&mut self) -> Result<AccelSample, ImuError<I2C::Error>> {
        if !self.ready {
            return Err(ImuError::NotReady);
        }
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(MPU6886_ADDR, &[REG_ACCEL_XOUT_H], &mut raw)?;
        Ok(accel_from_raw(&raw))
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cOps> AccelSource for Mpu6886<I2C> {
    type Error = ImuError<I2C::Error>;

    fn sample(&mut self) -> Result<AccelSample, Self::Error> {
        self.read_accel()
    }
}

#[cfg(test)]
mod tests;
