use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use authentix_core::config::AppConfig;
use authentix_core::io::handle::HandleTracker;
use authentix_core::photo::profile::{process_profile_bytes, CropSession};
use clap::Args;
use tracing::debug;

use crate::summary::print_crop_summary;

#[derive(Args)]
pub struct CropArgs {
    /// Input image file
    pub file: PathBuf,

    /// Output JPEG path (defaults to <stem>_profile.jpg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Horizontal pan in preview pixels (defaults to centred)
    #[arg(long, conflicts_with = "drag")]
    pub pan_x: Option<f64>,

    /// Vertical pan in preview pixels (defaults to centred)
    #[arg(long, conflicts_with = "drag")]
    pub pan_y: Option<f64>,

    /// Pointer drag from the centred position, as DX,DY preview pixels
    #[arg(long, value_parser = parse_drag, allow_hyphen_values = true)]
    pub drag: Option<(f64, f64)>,

    /// Output side in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Keep the whole photo, only shrinking it to the profile bound
    #[arg(long, conflicts_with_all = ["pan_x", "pan_y", "drag", "size"])]
    pub no_crop: bool,

    /// Print the data URI to stdout instead of writing a file
    #[arg(long)]
    pub data_uri: bool,
}

fn parse_drag(s: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let dx: f64 = dx.trim().parse().map_err(|e| format!("bad DX: {e}"))?;
    let dy: f64 = dy.trim().parse().map_err(|e| format!("bad DY: {e}"))?;
    Ok((dx, dy))
}

pub fn run(args: &CropArgs, config: &AppConfig) -> Result<()> {
    if args.no_crop {
        return run_uncropped(args, config);
    }

    let mut imaging = config.imaging.clone();
    if let Some(size) = args.size {
        imaging.profile_output_side = size;
        imaging.validate()?;
    }

    let mut session = CropSession::new(imaging, HandleTracker::new());
    session
        .load_file(&args.file)
        .map_err(|e| anyhow!("{}: {}", e.user_message(), e))
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let start = session
        .viewport()
        .map(|v| v.pan())
        .ok_or_else(|| anyhow!("Crop session has no viewport"))?;

    // Positioning goes through the same pointer events the preview uses.
    let drag = match (args.drag, args.pan_x, args.pan_y) {
        (Some(delta), _, _) => Some(delta),
        (None, None, None) => None,
        (None, x, y) => Some((
            x.map_or(0.0, |x| start.0 - x),
            y.map_or(0.0, |y| start.1 - y),
        )),
    };
    if let Some((dx, dy)) = drag {
        if !session.pointer_down(0.0, 0.0) {
            bail!("Crop session is not ready ({})", session.phase());
        }
        session.pointer_move(dx, dy);
        session.pointer_up();
        debug!(dx, dy, "Applied drag");
    }

    let viewport = session
        .viewport()
        .cloned()
        .ok_or_else(|| anyhow!("Crop session has no viewport"))?;
    let info = session
        .source()
        .map(|s| s.info())
        .ok_or_else(|| anyhow!("Crop session has no source"))?;

    let encoded = session
        .apply()
        .map_err(|e| anyhow!("{}: {}", e.user_message(), e))?
        .clone();

    if args.data_uri {
        println!("{}", encoded.to_data_uri());
        return Ok(());
    }

    let out = args
        .output
        .clone()
        .unwrap_or_else(|| super::derived_path(&args.file, None, "profile", "jpg"));
    encoded
        .save(&out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    print_crop_summary(&args.file, &info, &viewport, &encoded, Some(&out));

    Ok(())
}

fn run_uncropped(args: &CropArgs, config: &AppConfig) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let encoded = process_profile_bytes(&bytes, &config.imaging, &HandleTracker::new())
        .map_err(|e| anyhow!("{}: {}", e.user_message(), e))
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    if args.data_uri {
        println!("{}", encoded.to_data_uri());
        return Ok(());
    }

    let out = args
        .output
        .clone()
        .unwrap_or_else(|| super::derived_path(&args.file, None, "profile", "jpg"));
    encoded
        .save(&out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!(
        "Profile photo {}x{} saved to {}",
        encoded.width,
        encoded.height,
        out.display()
    );
    Ok(())
}
