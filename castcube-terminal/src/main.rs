/// castcube terminal demo - rotating cube
///
/// Usage: castcube-terminal [--config <scene.json>] [--snapshot] [--size <W>x<H>]
///
/// Controls:
///   - A/D / Left/Right: Nudge the cube
///   - W/S / Up/Down: Change spin speed
///   - Space: Pause
///   - Q/ESC: Quit

use anyhow::{anyhow, Context, Result};
use castcube_core::{CubeScene, SceneConfig, CUBE_VERTICES};
use castcube_terminal::renderer::MAX_DIMENSION;
use castcube_terminal::{snapshot, TerminalApp};
use std::env;
use std::path::PathBuf;

const USAGE: &str =
    "Usage: castcube-terminal [--config <scene.json>] [--snapshot] [--size <W>x<H>]";

/// Upper bound on `--size` width times height
const MAX_CELLS: usize = 1 << 20;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;

    let config = match &options.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene from {}", path.display()))?,
        None => SceneConfig::default(),
    };
    log::info!("scene: {:?}", config);

    let scene = CubeScene::new(&config);

    if options.snapshot {
        let (width, height) = options.size;
        let frame = snapshot(&CUBE_VERTICES, &scene, width, height);
        for row in frame.rows() {
            println!("{}", row.trim_end());
        }
        return Ok(());
    }

    let mut app = TerminalApp::new(&CUBE_VERTICES, scene).context("failed to query terminal size")?;
    app.run().context("terminal renderer failed")
}

#[derive(Debug)]
struct CliOptions {
    config: Option<PathBuf>,
    snapshot: bool,
    size: (usize, usize),
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = Self {
            config: None,
            snapshot: false,
            size: (80, 24),
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("--config needs a path. {USAGE}"))?;
                    options.config = Some(PathBuf::from(path));
                }
                "--snapshot" => options.snapshot = true,
                "--size" => {
                    let size = args.next().ok_or_else(|| anyhow!("--size needs <W>x<H>. {USAGE}"))?;
                    options.size = parse_size(&size)?;
                }
                other => return Err(anyhow!("Unknown argument: {other}. {USAGE}")),
            }
        }
        Ok(options)
    }
}

fn parse_size(text: &str) -> Result<(usize, usize)> {
    let (w, h) = text
        .split_once('x')
        .ok_or_else(|| anyhow!("size must look like 80x24, got {text}"))?;
    let width: usize = w.parse().with_context(|| format!("bad width in {text}"))?;
    let height: usize = h.parse().with_context(|| format!("bad height in {text}"))?;
    if width == 0 || height == 0 {
        return Err(anyhow!("size must be non-zero, got {text}"));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(anyhow!(
            "size must be at most {MAX_DIMENSION}x{MAX_DIMENSION}, got {text}"
        ));
    }
    match width.checked_mul(height) {
        Some(cells) if cells <= MAX_CELLS => Ok((width, height)),
        _ => Err(anyhow!("too many cells in {text}, the limit is {MAX_CELLS}")),
    }
}
