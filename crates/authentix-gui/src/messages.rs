use std::path::PathBuf;

use authentix_core::error::Result;
use authentix_core::io::decode::DecodedSource;
use authentix_core::io::encode::EncodedImage;
use authentix_core::io::handle::HandleTracker;
use authentix_core::photo::profile::{ApplyTicket, CropJob, LoadTicket};
use image::RgbaImage;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode a selected file and build its on-screen raster.
    Load {
        path: PathBuf,
        ticket: LoadTicket,
        tracker: HandleTracker,
        display_side: u32,
    },

    /// Render and encode a frozen crop window.
    Apply { job: CropJob },
}

/// A decoded source together with its display copy.
pub struct LoadedPreview {
    pub source: DecodedSource,
    pub raster: RgbaImage,
}

/// Results sent from worker thread (or dialog threads) back to UI thread.
pub enum WorkerResult {
    /// A file was chosen in the open dialog.
    FilePicked { path: PathBuf },

    Loaded {
        path: PathBuf,
        ticket: LoadTicket,
        result: Result<LoadedPreview>,
    },

    Applied {
        ticket: ApplyTicket,
        result: Result<EncodedImage>,
    },

    Saved { path: PathBuf },

    Error { message: String },

    Log { message: String },
}
