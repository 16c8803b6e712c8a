//! Frame parser CLI - convert an animated GIF into a .frame binary.

use std::path::{Path, PathBuf};
use std::process;

use pixelframe::frame::{self, Version};
use pixelframe::{extract, source};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut image: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut version_arg: u8 = 1;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => match iter.next() {
                Some(value) => output = Some(PathBuf::from(value)),
                None => usage(&args[0]),
            },
            "-v" | "--version" => match iter.next().and_then(|value| value.parse().ok()) {
                Some(value) => version_arg = value,
                None => usage(&args[0]),
            },
            _ if image.is_none() && !arg.starts_with('-') => image = Some(PathBuf::from(arg)),
            _ => usage(&args[0]),
        }
    }

    let Some(image) = image else {
        usage(&args[0]);
    };

    let version = Version::from_u8(version_arg).unwrap_or_else(|| {
        eprintln!("Error: unsupported frame file version {version_arg}, expected 1 or 2");
        process::exit(1);
    });

    let (descriptor, blocks) = source::read_gif(&image).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", image.display());
        process::exit(1);
    });

    let animation = extract::extract(&descriptor, blocks).unwrap_or_else(|e| {
        eprintln!("Error extracting frames: {e}");
        process::exit(1);
    });

    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("out"));
    let directory = output.unwrap_or_else(|| {
        image
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    let destination = directory.join(format!("{stem}.frame"));

    frame::write_file(&destination, &animation, version).unwrap_or_else(|e| {
        eprintln!("Error writing {}: {e}", destination.display());
        process::exit(1);
    });

    println!(
        "wrote {} ({} frames, {} loops)",
        destination.display(),
        animation.frames.len(),
        animation.loop_count
    );
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <image.gif> [options]");
    eprintln!();
    eprintln!("Convert a 16x16 animated GIF into a .frame binary.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output DIR   destination directory (default: next to the image)");
    eprintln!("  -v, --version N    frame file version, 1 or 2 (default: 1)");
    process::exit(1);
}
