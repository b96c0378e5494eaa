use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use authentix_core::config::{AppConfig, ImagingConfig};
use authentix_core::io::encode::EncodedImage;
use authentix_core::io::handle::HandleTracker;
use authentix_core::photo::listing::{process_listing_bytes, ListingPhotos};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::warn;

use crate::summary::print_resize_summary;

#[derive(Args)]
pub struct ResizeArgs {
    /// Input image files, in listing order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output directory (defaults to each file's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Longest edge in pixels
    #[arg(long)]
    pub max_side: Option<u32>,

    /// JPEG quality (1-100)
    #[arg(long)]
    pub quality: Option<u8>,

    /// Print data URIs to stdout instead of writing JPEG files
    #[arg(long)]
    pub data_uri: bool,
}

pub fn run(args: &ResizeArgs, config: &AppConfig) -> Result<()> {
    let imaging = imaging_config(args, &config.imaging)?;
    if args.files.len() > imaging.max_listing_images {
        bail!(
            "A listing holds at most {} photos, got {}",
            imaging.max_listing_images,
            args.files.len()
        );
    }
    if let Some(ref dir) = args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let tracker = HandleTracker::new();
    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Resizing [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let results: Vec<(&PathBuf, Result<EncodedImage>)> = args
        .files
        .par_iter()
        .map(|path| {
            let result = encode_file(path, &imaging, &tracker);
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut photos = ListingPhotos::with_config(&imaging);
    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(encoded) => {
                if !args.data_uri {
                    let out =
                        super::derived_path(path, args.output.as_deref(), "listing", "jpg");
                    encoded
                        .save(&out)
                        .with_context(|| format!("Failed to write {}", out.display()))?;
                }
                photos.push(encoded)?;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Listing photo skipped");
                eprintln!("{}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    if args.data_uri {
        for uri in photos.data_uris() {
            println!("{uri}");
        }
    } else {
        print_resize_summary(&imaging, photos.len(), failed);
    }

    if failed > 0 {
        bail!("{failed} of {} files could not be loaded", args.files.len());
    }
    Ok(())
}

fn imaging_config(args: &ResizeArgs, base: &ImagingConfig) -> Result<ImagingConfig> {
    let mut imaging = base.clone();
    if let Some(side) = args.max_side {
        imaging.listing_max_side = side;
    }
    if let Some(quality) = args.quality {
        imaging.jpeg_quality = quality;
    }
    imaging.validate()?;
    Ok(imaging)
}

fn encode_file(
    path: &Path,
    imaging: &ImagingConfig,
    tracker: &HandleTracker,
) -> Result<EncodedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let encoded = process_listing_bytes(&bytes, imaging, tracker)
        .with_context(|| format!("Failed to encode {}", path.display()))?;
    Ok(encoded)
}
