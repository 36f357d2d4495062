use oculi::{drivers::m5core2::Ili9342, platform::HalI2c};

pub(crate) type InternalI2c = HalI2c<'static>;
pub(crate) type LcdDriver = Ili9342<'static>;

/// Hardware handed from bootstrap to the eyes task. The panel is already
/// powered and initialized.
pub(crate) struct EyesContext {
    pub(crate) i2c: InternalI2c,
    pub(crate) lcd: LcdDriver,
    pub(crate) seed: u32,
}
