mod config;
mod display;
mod types;

use embedded_graphics::pixelcolor::BinaryColor;
use esp_hal::{
    gpio::{Level, Output, OutputConfig},
    i2c::master::{Config as I2cConfig, I2c, SoftwareTimeout},
    rng::Rng,
    spi::{
        master::{Config as SpiConfig, Spi},
        Mode as SpiMode,
    },
    time::{Duration as HalDuration, Rate},
    timer::timg::TimerGroup,
};
use log::{info, warn};
use oculi::{
    drivers::m5core2::{Axp192, Ili9342, INTERNAL_I2C_KHZ, LCD_SPI_KHZ},
    platform::{BusyDelay, HalI2c},
};

use self::{config::LOG_LEVEL, types::EyesContext};

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger(LOG_LEVEL);
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);
    let delay = BusyDelay::new();

    let i2c_cfg = I2cConfig::default()
        .with_frequency(Rate::from_khz(INTERNAL_I2C_KHZ))
        .with_software_timeout(SoftwareTimeout::Transaction(HalDuration::from_millis(40)));
    let i2c = I2c::new(peripherals.I2C0, i2c_cfg)
        .expect("failed to init I2C0")
        .with_sda(peripherals.GPIO21)
        .with_scl(peripherals.GPIO22);

    let mut pmu = Axp192::new(HalI2c::new(i2c));
    match pmu.init(&delay) {
        Ok(true) => {}
        Ok(false) => warn!("axp192: no answer; panel may stay dark"),
        Err(_) => halt_forever(),
    }
    let i2c = pmu.release();

    let lcd_spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_khz(LCD_SPI_KHZ))
        .with_mode(SpiMode::_0);
    let lcd_spi = Spi::new(peripherals.SPI2, lcd_spi_cfg)
        .expect("failed to init SPI2 for LCD")
        .with_sck(peripherals.GPIO18)
        .with_mosi(peripherals.GPIO23)
        .with_miso(peripherals.GPIO38);
    let lcd_dc = Output::new(peripherals.GPIO15, Level::Low, OutputConfig::default());
    let lcd_cs = Output::new(peripherals.GPIO5, Level::High, OutputConfig::default());
    let mut lcd = Ili9342::new(lcd_spi, lcd_dc, lcd_cs);
    if lcd.init(&delay).is_err() || lcd.clear(BinaryColor::Off).is_err() {
        halt_forever();
    }

    let rng = Rng::new();
    let seed = rng.random();
    info!("app: boot done seed={:#010x}", seed);

    let eyes_context = EyesContext { i2c, lcd, seed };

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(display::eyes_task(eyes_context));
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
