use std::{
    convert::Infallible,
    env, fs,
    path::{Path, PathBuf},
};

use oculi::{
    drivers::m5core2::{PANEL_HEIGHT, PANEL_WIDTH},
    eyes::{
        active_config, fast_math::fx_i32, surface::CANVAS_WIDTH, AccelSample, AccelSource,
        DisplaySurface, EyeAnimator, EyeCanvas, EyeMode, Fx, Point, RawTouch, TouchSource,
        XorShift32,
    },
};

const STEP_MS: u64 = 5;
const DRAG_START_MS: u64 = 1_000;
const DRAG_END_MS: u64 = 2_000;
const SHAKE_MS: u64 = 2_500;

struct Config {
    out_dir: PathBuf,
    duration_ms: u64,
    every_ms: u64,
    seed: u32,
    ellipse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("tools/eyes_preview/out"),
            duration_ms: 5_000,
            every_ms: 100,
            seed: 12_345,
            ellipse: false,
        }
    }
}

/// Idle, then a diagonal drag, a release, and one shake.
struct ScriptedTouch {
    now_ms: u64,
    touching: bool,
}

impl TouchSource for ScriptedTouch {
    fn poll(&mut self) -> RawTouch {
        let active = (DRAG_START_MS..DRAG_END_MS).contains(&self.now_ms);
        let code = match (self.touching, active) {
            (false, true) => 3,
            (true, true) => 1,
            (true, false) => 2,
            (false, false) => 0,
        };
        self.touching = active;

        let t = self.now_ms.clamp(DRAG_START_MS, DRAG_END_MS) - DRAG_START_MS;
        let span = DRAG_END_MS - DRAG_START_MS;
        RawTouch {
            code,
            x: (20 + t * 280 / span) as i16,
            y: (30 + t * 180 / span) as i16,
            contacts: u8::from(active),
        }
    }
}

struct ScriptedAccel {
    now_ms: u64,
}

impl AccelSource for ScriptedAccel {
    type Error = Infallible;

    fn sample(&mut self) -> Result<AccelSample, Self::Error> {
        let z = if (SHAKE_MS..SHAKE_MS + 20).contains(&self.now_ms) {
            Fx::from_num(2.2)
        } else {
            fx_i32(1)
        };
        Ok(AccelSample::new(Fx::ZERO, Fx::ZERO, z))
    }
}

/// Grayscale copy of the panel.
struct Panel {
    pixels: Vec<u8>,
}

impl Panel {
    fn new() -> Self {
        Self {
            pixels: vec![0; (PANEL_WIDTH * PANEL_HEIGHT) as usize],
        }
    }
}

impl DisplaySurface<EyeCanvas> for Panel {
    type Error = Infallible;

    fn present(&mut self, origin: Point, surface: &EyeCanvas) -> Result<(), Self::Error> {
        let mut y = 0;
        while let Some(row) = surface.row(y) {
            let py = origin.y + y as i32;
            y += 1;
            if !(0..PANEL_HEIGHT as i32).contains(&py) {
                continue;
            }
            for x in 0..CANVAS_WIDTH {
                let px = origin.x + x as i32;
                if !(0..PANEL_WIDTH as i32).contains(&px) {
                    continue;
                }
                let on = row[(x / 8) as usize] & (1 << (x % 8)) != 0;
                self.pixels[(py as u32 * PANEL_WIDTH + px as u32) as usize] =
                    if on { 255 } else { 0 };
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), String> {
    let cfg = parse_args(env::args().skip(1))?;
    if cfg.every_ms == 0 {
        return Err("--every must be > 0".to_owned());
    }
    fs::create_dir_all(&cfg.out_dir).map_err(|e| format!("create output dir: {e}"))?;

    let eyes = if cfg.ellipse {
        active_config().with_elliptical_eyes()
    } else {
        *active_config()
    };
    let mut animator = EyeAnimator::new(eyes, XorShift32::new(cfg.seed))
        .map_err(|e| format!("eye geometry: {e:?}"))?;
    let mut touch = ScriptedTouch {
        now_ms: 0,
        touching: false,
    };
    let mut accel = ScriptedAccel { now_ms: 0 };
    let mut panel = Panel::new();

    let _ = animator.setup(&mut accel, &mut panel);

    let mut now_ms = 0;
    let mut written = 0u32;
    while now_ms <= cfg.duration_ms {
        touch.now_ms = now_ms;
        accel.now_ms = now_ms;
        let _ = animator.tick(now_ms, &mut touch, &mut accel, &mut panel);

        if now_ms % cfg.every_ms == 0 {
            let mode = match animator.mode() {
                EyeMode::Normal => "normal",
                EyeMode::Dizzy => "dizzy",
            };
            let path = cfg.out_dir.join(format!("eyes_{now_ms:05}ms_{mode}.png"));
            image::save_buffer(
                &path,
                &panel.pixels,
                PANEL_WIDTH,
                PANEL_HEIGHT,
                image::ColorType::L8,
            )
            .map_err(|e| format!("save {}: {e}", path.display()))?;
            written += 1;
        }
        now_ms += STEP_MS;
    }

    println!("wrote {written} frames to {}", cfg.out_dir.display());
    Ok(())
}

fn parse_args<I>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = String>,
{
    let mut cfg = Config::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" => cfg.out_dir = PathBuf::from(next_value("--out", &mut it)?),
            "--duration" => {
                cfg.duration_ms = parse_num(next_value("--duration", &mut it)?, "--duration")?
            }
            "--every" => cfg.every_ms = parse_num(next_value("--every", &mut it)?, "--every")?,
            "--seed" => cfg.seed = parse_num(next_value("--seed", &mut it)?, "--seed")?,
            "--ellipse" => cfg.ellipse = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(format!("unknown arg: {arg}")),
        }
    }
    Ok(cfg)
}

fn next_value<I>(flag: &str, it: &mut I) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    it.next()
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_num<T>(raw: String, name: &str) -> Result<T, String>
where
    T: core::str::FromStr,
{
    raw.parse::<T>()
        .map_err(|_| format!("invalid numeric value for {name}: {raw}"))
}

fn print_help() {
    let exe = env::args()
        .next()
        .and_then(|p| {
            Path::new(&p)
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_owned())
        })
        .unwrap_or_else(|| "eyes_preview".to_owned());
    println!("Usage: {exe} [--out DIR] [--duration MS] [--every MS] [--seed N] [--ellipse]");
}
