pub(crate) const LOOP_INTERVAL_MS: u64 = 5;
pub(crate) const IMU_RETRY_MS: u64 = 5_000;
pub(crate) const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
