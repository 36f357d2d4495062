use std::{fmt, fs, path::Path};

use serde::Deserialize;

/// Width of the per-eye canvas the firmware allocates.
pub const CANVAS_WIDTH: i64 = 160;
/// Height of the per-eye canvas the firmware allocates.
pub const CANVAS_HEIGHT: i64 = 131;
/// Last blink-counter frame that still shows a lid.
pub const LAST_LID_FRAME: u32 = 6;

const FX_FRAC_BITS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EyesFile {
    pub blink_during_dizzy: bool,
    pub timing: TimingSection,
    pub shape: ShapeSection,
    pub left: EyeSection,
    pub right: EyeSection,
    pub blink: BlinkSection,
    pub dizzy: DizzySection,
    pub saccade: SaccadeSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingSection {
    pub frame_interval_ms: u64,
    pub accel_interval_ms: u64,
    pub touch_interval_ms: u64,
    pub blink_interval_ms: u64,
    pub saccade_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSection {
    Circle {
        outer_radius: u32,
        pupil_radius: u32,
    },
    Ellipse {
        outer_radii: [u32; 2],
        pupil_radii: [u32; 2],
    },
}

impl ShapeSection {
    fn outer_radii(&self) -> [u32; 2] {
        match self {
            Self::Circle { outer_radius, .. } => [*outer_radius, *outer_radius],
            Self::Ellipse { outer_radii, .. } => *outer_radii,
        }
    }

    fn pupil_radii(&self) -> [u32; 2] {
        match self {
            Self::Circle { pupil_radius, .. } => [*pupil_radius, *pupil_radius],
            Self::Ellipse { pupil_radii, .. } => *pupil_radii,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EyeSection {
    pub center: [i32; 2],
    pub origin: [i32; 2],
    pub phase_offset_deg: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlinkSection {
    pub initial_ceiling: u32,
    pub random_min: u32,
    pub random_max: u32,
    pub top_band_height: u32,
    pub bottom_band_y: i32,
    pub bottom_band_height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DizzySection {
    pub accel_threshold_g: f64,
    pub step_deg: u32,
    pub rotations: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaccadeSection {
    pub range: u32,
    pub divisor: u32,
}

pub fn parse_eyes_file(path: &Path) -> Result<EyesFile, ConfigCompilerError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_eyes_str(&text)
}

pub fn parse_eyes_str(text: &str) -> Result<EyesFile, ConfigCompilerError> {
    toml::from_str(text).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &EyesFile) -> Result<(), ConfigCompilerError> {
    let timing = &config.timing;
    for (name, value) in [
        ("timing.frame_interval_ms", timing.frame_interval_ms),
        ("timing.accel_interval_ms", timing.accel_interval_ms),
        ("timing.touch_interval_ms", timing.touch_interval_ms),
        ("timing.blink_interval_ms", timing.blink_interval_ms),
        ("timing.saccade_interval_ms", timing.saccade_interval_ms),
    ] {
        if value == 0 {
            return invalid(format!("{name} must be > 0"));
        }
    }

    let outer = config.shape.outer_radii();
    let pupil = config.shape.pupil_radii();
    if pupil.iter().any(|r| *r == 0) {
        return invalid("shape pupil radii must be > 0".into());
    }
    if pupil[0] > outer[0] || pupil[1] > outer[1] {
        return invalid("shape pupil radii must not exceed outer radii".into());
    }

    for (side, eye) in [("left", &config.left), ("right", &config.right)] {
        let local_x = i64::from(eye.center[0]) - i64::from(eye.origin[0]);
        let local_y = i64::from(eye.center[1]) - i64::from(eye.origin[1]);
        let rx = i64::from(outer[0]);
        let ry = i64::from(outer[1]);
        if local_x - rx < 0
            || local_x + rx >= CANVAS_WIDTH
            || local_y - ry < 0
            || local_y + ry >= CANVAS_HEIGHT
        {
            return invalid(format!(
                "{side} eye does not fit the {CANVAS_WIDTH}x{CANVAS_HEIGHT} canvas"
            ));
        }
    }

    let blink = &config.blink;
    if blink.initial_ceiling <= LAST_LID_FRAME {
        return invalid(format!("blink.initial_ceiling must be > {LAST_LID_FRAME}"));
    }
    if blink.random_min <= LAST_LID_FRAME {
        return invalid(format!("blink.random_min must be > {LAST_LID_FRAME}"));
    }
    if blink.random_max <= blink.random_min {
        return invalid("blink.random_max must be > blink.random_min".into());
    }
    if blink.random_max > u32::from(u16::MAX) || blink.initial_ceiling > u32::from(u16::MAX) {
        return invalid("blink ceilings must fit in u16".into());
    }
    if blink.top_band_height == 0 || blink.bottom_band_height == 0 {
        return invalid("blink band heights must be > 0".into());
    }
    if blink.top_band_height <= blink.bottom_band_height {
        return invalid("blink.top_band_height must be > blink.bottom_band_height".into());
    }

    let dizzy = &config.dizzy;
    if !(dizzy.accel_threshold_g > 0.0) || dizzy.accel_threshold_g >= 32_000.0 {
        return invalid("dizzy.accel_threshold_g must be a positive number".into());
    }
    if dizzy.rotations == 0 {
        return invalid("dizzy.rotations must be > 0".into());
    }
    if dizzy.rotations > 100 {
        return invalid("dizzy.rotations must be <= 100".into());
    }
    if dizzy.step_deg == 0 || dizzy.step_deg >= 360 * dizzy.rotations {
        return invalid("dizzy.step_deg must be > 0 and < 360 * dizzy.rotations".into());
    }

    let saccade = &config.saccade;
    if saccade.range == 0 || saccade.range > u32::from(u8::MAX) {
        return invalid("saccade.range must be in 1..=255".into());
    }
    if saccade.divisor == 0 || saccade.divisor > u32::from(u8::MAX) {
        return invalid("saccade.divisor must be in 1..=255".into());
    }

    Ok(())
}

pub fn render_generated_config(config: &EyesFile) -> String {
    let mut out = String::new();
    out.push_str("// @generated by eyes_config_compiler; edit config/eyes.toml instead.\n\n");
    out.push_str("pub static EYES_CONFIG: EyesConfig = EyesConfig {\n");
    out.push_str(&format!(
        "    blink_during_dizzy: {},\n",
        config.blink_during_dizzy
    ));

    let t = &config.timing;
    out.push_str("    timing: TimingConfig {\n");
    out.push_str(&format!("        frame_interval_ms: {},\n", t.frame_interval_ms));
    out.push_str(&format!("        accel_interval_ms: {},\n", t.accel_interval_ms));
    out.push_str(&format!("        touch_interval_ms: {},\n", t.touch_interval_ms));
    out.push_str(&format!("        blink_interval_ms: {},\n", t.blink_interval_ms));
    out.push_str(&format!(
        "        saccade_interval_ms: {},\n",
        t.saccade_interval_ms
    ));
    out.push_str("    },\n");

    match &config.shape {
        ShapeSection::Circle {
            outer_radius,
            pupil_radius,
        } => out.push_str(&format!(
            "    shape: EyeShape::Circle {{ outer_radius: {outer_radius}, pupil_radius: {pupil_radius} }},\n"
        )),
        ShapeSection::Ellipse {
            outer_radii,
            pupil_radii,
        } => out.push_str(&format!(
            "    shape: EyeShape::Ellipse {{ outer_radii: Size::new({}, {}), pupil_radii: Size::new({}, {}) }},\n",
            outer_radii[0], outer_radii[1], pupil_radii[0], pupil_radii[1]
        )),
    }

    for (side, eye) in [("left", &config.left), ("right", &config.right)] {
        out.push_str(&format!(
            "    {side}: EyePlacement {{ center: Point::new({}, {}), origin: Point::new({}, {}), phase_offset_deg: {} }},\n",
            eye.center[0], eye.center[1], eye.origin[0], eye.origin[1], eye.phase_offset_deg
        ));
    }

    let b = &config.blink;
    out.push_str("    blink: BlinkConfig {\n");
    out.push_str(&format!("        initial_ceiling: {},\n", b.initial_ceiling));
    out.push_str(&format!("        random_min: {},\n", b.random_min));
    out.push_str(&format!("        random_max: {},\n", b.random_max));
    out.push_str(&format!("        top_band_height: {},\n", b.top_band_height));
    out.push_str(&format!("        bottom_band_y: {},\n", b.bottom_band_y));
    out.push_str(&format!(
        "        bottom_band_height: {},\n",
        b.bottom_band_height
    ));
    out.push_str("    },\n");

    let d = &config.dizzy;
    out.push_str("    dizzy: DizzyConfig {\n");
    out.push_str(&format!(
        "        accel_threshold: Fx::from_bits({}),\n",
        fx_bits(d.accel_threshold_g)
    ));
    out.push_str(&format!("        step_deg: {},\n", d.step_deg));
    out.push_str(&format!("        rotations: {},\n", d.rotations));
    out.push_str("    },\n");

    let s = &config.saccade;
    out.push_str("    saccade: SaccadeConfig {\n");
    out.push_str(&format!("        range: {},\n", s.range));
    out.push_str(&format!("        divisor: {},\n", s.divisor));
    out.push_str("    },\n");

    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_eyes_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}

/// Raw bits of a signed 16.16 fixed-point value, rounded to nearest.
pub fn fx_bits(value: f64) -> i32 {
    (value * f64::from(1u32 << FX_FRAC_BITS)).round() as i32
}

fn invalid(msg: String) -> Result<(), ConfigCompilerError> {
    Err(ConfigCompilerError::Validation(msg))
}
