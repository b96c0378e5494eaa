use std::path::PathBuf;

use anyhow::{Context, Result};
use authentix_core::config::AppConfig;
use authentix_core::geometry::{bounded_dimensions, Viewport};
use authentix_core::io::decode::decode_file;
use authentix_core::io::handle::HandleTracker;
use clap::Args;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs, config: &AppConfig) -> Result<()> {
    let tracker = HandleTracker::new();
    let source = decode_file(&args.file, &tracker)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let info = source.info();
    let imaging = &config.imaging;

    println!("File:        {}", args.file.display());
    println!("Type:        {}", info.mime);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("File size:   {:.1} KB", info.byte_len as f64 / 1024.0);

    let (lw, lh) = bounded_dimensions(info.width, info.height, imaging.listing_max_side)?;
    println!("Listing:     {lw}x{lh}");

    let viewport = Viewport::fit(info.width, info.height, imaging.preview_side)?;
    let region = viewport.source_region();
    println!(
        "Crop scale:  {:.4} ({:.0}x{:.0} scaled)",
        viewport.scale(),
        viewport.scaled_width(),
        viewport.scaled_height()
    );
    println!(
        "Crop window: {:.0}x{:.0} at ({:.0}, {:.0}) -> {}x{}",
        region.size,
        region.size,
        region.x,
        region.y,
        imaging.profile_output_side,
        imaging.profile_output_side
    );
    if viewport.needs_repositioning() {
        println!(
            "Pan range:   0..{:.0} x 0..{:.0}",
            viewport.max_pan_x(),
            viewport.max_pan_y()
        );
    }

    Ok(())
}
