use super::*;
use crate::{
    drivers::m5core2::test_bus::{BusFault, CountingDelay, FakeBus},
    eyes::fast_math::fx_i32,
};

fn ready_bus() -> FakeBus {
    let mut bus = FakeBus::default().with_device(MPU6886_ADDR);
    bus.set(MPU6886_ADDR, REG_WHO_AM_I, &[WHO_AM_I_VALUE]);
    bus
}

#[test]
fn raw_counts_convert_to_g() {
    // x = +1 g, y = -0.5 g, z = 0
    let sample = accel_from_raw(&[0x10, 0x00, 0xF8, 0x00, 0x00, 0x00]);
    assert_eq!(sample.x, fx_i32(1));
    assert_eq!(sample.y, Fx::from_num(-0.5));
    assert_eq!(sample.z, Fx::ZERO);
    assert!((sample.magnitude().to_num::<f32>() - 1.118).abs() < 0.001);
}

#[test]
fn full_scale_fits_fixed_point() {
    let sample = accel_from_raw(&[0x7F, 0xFF, 0x80, 0x00, 0x00, 0x00]);
    assert!(sample.x < fx_i32(8));
    assert_eq!(sample.y, fx_i32(-8));
}

#[test]
fn init_configures_eight_g_range() {
    let delay = CountingDelay::default();
    let mut imu = Mpu6886::new(ready_bus());
    assert_eq!(imu.init(&delay), Ok(true));
    assert!(imu.is_ready());
    assert!(delay.total_ms.get() >= 30);

    let bus = imu.release();
    assert_eq!(bus.last_write(MPU6886_ADDR, REG_ACCEL_CONFIG), Some(0x10));
    assert_eq!(bus.last_write(MPU6886_ADDR, REG_PWR_MGMT_1), Some(0x01));
}

#[test]
fn wrong_identity_leaves_sensor_unavailable() {
    let mut bus = FakeBus::default().with_device(MPU6886_ADDR);
    bus.set(MPU6886_ADDR, REG_WHO_AM_I, &[0x68]);
    let mut imu = Mpu6886::new(bus);
    assert_eq!(imu.init(&CountingDelay::default()), Ok(false));
    assert_eq!(imu.sample(), Err(ImuError::NotReady));
}

#[test]
fn sample_reads_big_endian_axes() {
    let mut bus = ready_bus();
    bus.set(MPU6886_ADDR, REG_ACCEL_XOUT_H, &[0x00, 0x00, 0x00, 0x00, 0x16, 0x66]);
    let mut imu = Mpu6886::new(bus);
    imu.init(&CountingDelay::default()).expect("bus ok");

    let sample = imu.sample().expect("sensor ready");
    assert!((sample.z.to_num::<f32>() - 1.4).abs() < 0.001);
}

#[test]
fn bus_failure_maps_to_bus_error() {
    let mut imu = Mpu6886::new(ready_bus());
    imu.init(&CountingDelay::default()).expect("bus ok");
    let mut bus = imu.release();
    bus.failing = true;
    let mut imu = Mpu6886 { i2c: bus, ready: true };
    assert_eq!(imu.sample(), Err(ImuError::Bus(BusFault)));
}
