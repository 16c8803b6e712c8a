//! Frame player CLI - play every .frame file in a directory.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, process, thread};

use log::{info, warn};
use serde::Deserialize;

use pixelframe::frame::{FrameReader, Player};
use pixelframe::source::Rgb;
use pixelframe::surface::{PixelSurface, TerminalSurface};

/// Playback options, optionally loaded from `player.json` inside the
/// frame directory.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct PlayOptions {
    /// Play the directory once instead of looping forever.
    once: bool,
    /// Blank the surface when playback ends.
    clear_on_exit: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            once: false,
            clear_on_exit: true,
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut directory: Option<PathBuf> = None;
    let mut once_flag = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--once" => once_flag = true,
            _ if directory.is_none() && !arg.starts_with('-') => {
                directory = Some(PathBuf::from(arg));
            }
            _ => usage(&args[0]),
        }
    }

    let Some(directory) = directory else {
        usage(&args[0]);
    };

    let mut options = load_options(&directory);
    if once_flag {
        options.once = true;
    }

    let mut surface = TerminalSurface::new();
    let mut player = Player::new();

    loop {
        // Re-scan between passes so added and removed files are noticed.
        let files = scan(&directory).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", directory.display());
            process::exit(1);
        });

        if files.is_empty() {
            warn!("no .frame files in {}", directory.display());
        }

        for file in &files {
            // An unreadable or corrupt file is skipped, never fatal to
            // the batch.
            let mut reader = match FrameReader::open(file) {
                Ok(reader) => reader,
                Err(err) => {
                    warn!("skipping {}: {err}", file.display());
                    continue;
                }
            };

            info!("playing {}", file.display());
            if let Err(err) = player.play(&mut reader, &mut surface) {
                warn!("playback of {} failed: {err}", file.display());
            }
        }

        if options.once {
            break;
        }
        if files.is_empty() {
            // Wait for files to appear without spinning.
            thread::sleep(Duration::from_secs(1));
        }
    }

    if options.clear_on_exit {
        blank(&mut surface);
    }
}

/// Load `player.json` when present, like a sidecar config.
fn load_options(directory: &Path) -> PlayOptions {
    let path = directory.join("player.json");
    if !path.exists() {
        return PlayOptions::default();
    }

    let text = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading options file: {e}");
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing options file: {e}");
        process::exit(1);
    })
}

/// All .frame files in the directory, in name order.
fn scan(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "frame"))
        .collect();
    files.sort();
    Ok(files)
}

fn blank<S: PixelSurface>(surface: &mut S) {
    for y in 0..16 {
        for x in 0..16 {
            surface.set_pixel(x, y, Rgb(0, 0, 0));
        }
    }
    let _ = surface.draw();
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <directory> [--once]");
    eprintln!();
    eprintln!("Play every .frame file in a directory on the terminal.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --once   play the directory once instead of looping");
    eprintln!();
    eprintln!("A player.json file in the directory can set options:");
    eprintln!("  {{\"once\": false, \"clear_on_exit\": true}}");
    process::exit(1);
}
