use core::cell::RefCell;

use embassy_time::{Duration, Instant, Ticker};
use log::{debug, error, info, warn};
use oculi::{
    drivers::m5core2::{Ft6336, Mpu6886},
    eyes::{active_config, EyeAnimator, XorShift32},
    platform::BusyDelay,
};

use super::{
    config::{IMU_RETRY_MS, LOOP_INTERVAL_MS},
    types::EyesContext,
};

#[embassy_executor::task]
pub(crate) async fn eyes_task(context: EyesContext) {
    let EyesContext { i2c, mut lcd, seed } = context;
    let bus = RefCell::new(i2c);
    let delay = BusyDelay::new();

    let mut touch = Ft6336::new(&bus);
    match touch.init() {
        Ok(true) => info!("touch: ft6336 ready"),
        Ok(false) => warn!("touch: ft6336 not found"),
        Err(err) => warn!("touch: init failed err={:?}", err),
    }

    let mut imu = Mpu6886::new(&bus);
    if let Err(err) = imu.init(&delay) {
        warn!("imu: init failed err={:?}", err);
    }

    let mut animator = match EyeAnimator::new(*active_config(), XorShift32::new(seed)) {
        Ok(animator) => animator,
        Err(err) => {
            error!("eyes: invalid geometry err={:?}", err);
            return;
        }
    };
    if let Err(err) = animator.setup(&mut imu, &mut lcd) {
        warn!("lcd: setup present failed err={:?}", err);
    }

    let mut last_imu_retry_ms = Instant::now().as_millis();
    let mut ticker = Ticker::every(Duration::from_millis(LOOP_INTERVAL_MS));

    loop {
        ticker.next().await;
        let now_ms = Instant::now().as_millis();

        if !imu.is_ready() && now_ms.saturating_sub(last_imu_retry_ms) >= IMU_RETRY_MS {
            last_imu_retry_ms = now_ms;
            match imu.init(&delay) {
                Ok(true) => info!("imu: recovered"),
                Ok(false) => debug!("imu: still missing"),
                Err(err) => debug!("imu: retry failed err={:?}", err),
            }
        }

        if let Err(err) = animator.tick(now_ms, &mut touch, &mut imu, &mut lcd) {
            warn!("lcd: present failed err={:?}", err);
        }
    }
}
