use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use fbtile_wm::actor::wm_controller::{WmCommand, WmController};
use fbtile_wm::common::config::{Config, config_file};
use fbtile_wm::common::log;
use fbtile_wm::sys::framebuffer::{Canvas, Framebuffer};
use fbtile_wm::sys::hotkey::Hotkey;
use tracing::{error, info, warn};

/// Headless host: paints into an in-memory framebuffer and reads one command
/// (`new_window`, `switch_to_workspace 2`) or hotkey (`Alt + W`) per line
/// from stdin.
#[derive(Parser)]
struct Cli {
    /// Config file to use instead of ~/.fbtile.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Pixels per framebuffer row. Defaults to the width.
    #[arg(long)]
    pitch: Option<u32>,

    /// Write the final framebuffer to this path as a binary PPM.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Check the config file and exit.
    #[arg(long)]
    validate: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::read(path).with_context(|| format!("reading {}", path.display()));
    }
    match config_file() {
        Some(path) if path.exists() => {
            Config::read(&path).with_context(|| format!("reading {}", path.display()))
        }
        _ => Ok(Config::default()),
    }
}

fn write_ppm(path: &Path, fb: &Framebuffer) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut out = BufWriter::new(file);
    let size = fb.size();
    write!(out, "P6\n{} {}\n255\n", size.width, size.height)?;
    for y in 0..size.height {
        let Some(row) = fb.row(y) else { break };
        for &pixel in row {
            out.write_all(&[(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8])?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opt: Cli = Parser::parse();
    log::init_logging();

    let mut config = load_config(opt.config.as_deref())?;
    let issues = config.validate();
    for issue in &issues {
        warn!("config: {issue}");
    }
    if opt.validate {
        if issues.is_empty() {
            println!("config ok");
            return Ok(());
        }
        anyhow::bail!("{} config issue(s) found", issues.len());
    }
    let fixes = config.auto_fix_values();
    if fixes > 0 {
        info!(fixes, "reset out-of-range config values to defaults");
    }

    let pitch = opt.pitch.unwrap_or(opt.width);
    let fb = Framebuffer::new(
        vec![0u32; pitch as usize * opt.height as usize],
        opt.width,
        opt.height,
        pitch,
    )?;
    info!(width = opt.width, height = opt.height, pitch, "starting");
    let mut controller = WmController::new(&config, fb);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Ok(command) = line.parse::<WmCommand>() {
            let outcome = controller.handle_command(&command);
            info!(%command, ?outcome, "handled command");
        } else if let Ok(hotkey) = line.parse::<Hotkey>() {
            let outcome = controller.handle_key(hotkey.key_code.scancode(), hotkey.modifiers.bits());
            info!(%hotkey, ?outcome, "handled key");
        } else {
            error!("could not parse input line {line:?}");
        }
    }

    if let Some(path) = &opt.snapshot {
        let reactor = controller.into_reactor();
        write_ppm(path, reactor.canvas()).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote snapshot");
    }
    Ok(())
}
