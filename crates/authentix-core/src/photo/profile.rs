//! Interactive square crop for profile photos.
//!
//! A [`CropSession`] owns one upload widget's state from file selection to
//! the encoded output:
//!
//! ```text
//! Idle -> Loading -> Ready <-> Dragging -> Applying -> Applied
//!                      \__________________________\-> Cancelled
//! ```
//!
//! Selecting a new file restarts at `Loading` from any phase and supersedes
//! whatever was in flight. Results carry the ticket they were issued with;
//! a result whose ticket is stale is dropped.

use std::fmt;
use std::mem;
use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::ImagingConfig;
use crate::error::{AuthentixError, Result};
use crate::geometry::{SourceRegion, Viewport};
use crate::io::decode::{decode_bytes, decode_file, DecodedSource};
use crate::io::encode::{encode_jpeg, EncodedImage};
use crate::io::handle::HandleTracker;
use crate::photo::listing::encode_bounded;
use crate::raster::render_region;

/// Decode an image file and shrink it for use as a profile photo as-is.
///
/// Keeps the aspect ratio; neither edge exceeds `profile_max_side`. The
/// decoded source is released before returning.
pub fn process_profile_bytes(
    bytes: &[u8],
    config: &ImagingConfig,
    tracker: &HandleTracker,
) -> Result<EncodedImage> {
    let source = decode_bytes(bytes, tracker)?;
    let encoded = encode_bounded(&source, config.profile_max_side, config)?;
    info!(
        src_w = source.width(),
        src_h = source.height(),
        out_w = encoded.width,
        out_h = encoded.height,
        "Profile photo resized"
    );
    Ok(encoded)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropPhase {
    Idle,
    Loading,
    Ready,
    Dragging,
    Applying,
    Applied,
    Cancelled,
}

impl CropPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Dragging => "dragging",
            Self::Applying => "applying",
            Self::Applied => "applied",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CropPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a completed operation was taken up by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    /// A newer file selection or a cancel replaced the operation.
    Superseded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyTicket {
    generation: u64,
}

/// Self-contained crop render, runnable on a worker thread.
#[derive(Clone, Debug)]
pub struct CropJob {
    image: Arc<DynamicImage>,
    region: SourceRegion,
    output_side: u32,
    quality: u8,
    max_surface_side: u32,
    ticket: ApplyTicket,
}

impl CropJob {
    pub fn ticket(&self) -> ApplyTicket {
        self.ticket
    }

    pub fn region(&self) -> SourceRegion {
        self.region
    }

    pub fn run(&self) -> Result<EncodedImage> {
        let raster = render_region(
            &self.image,
            self.region,
            self.output_side,
            self.max_surface_side,
        )?;
        encode_jpeg(&raster, self.quality)
    }
}

#[derive(Debug)]
struct Loaded {
    source: DecodedSource,
    viewport: Viewport,
}

#[derive(Debug)]
enum State {
    Idle,
    Loading {
        generation: u64,
    },
    Ready(Loaded),
    Dragging {
        loaded: Loaded,
        origin: (f64, f64),
        start_pan: (f64, f64),
    },
    Applying {
        loaded: Loaded,
        generation: u64,
    },
    Applied(EncodedImage),
    Cancelled,
}

#[derive(Debug)]
pub struct CropSession {
    config: ImagingConfig,
    tracker: HandleTracker,
    generation: u64,
    state: State,
}

impl CropSession {
    pub fn new(config: ImagingConfig, tracker: HandleTracker) -> Self {
        Self {
            config,
            tracker,
            generation: 0,
            state: State::Idle,
        }
    }

    pub fn config(&self) -> &ImagingConfig {
        &self.config
    }

    pub fn tracker(&self) -> &HandleTracker {
        &self.tracker
    }

    pub fn phase(&self) -> CropPhase {
        phase_of(&self.state)
    }

    /// An operation is pending; the apply control stays disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, State::Loading { .. } | State::Applying { .. })
    }

    pub fn can_apply(&self) -> bool {
        matches!(self.state, State::Ready(_) | State::Dragging { .. })
    }

    fn loaded(&self) -> Option<&Loaded> {
        match &self.state {
            State::Ready(loaded)
            | State::Dragging { loaded, .. }
            | State::Applying { loaded, .. } => Some(loaded),
            _ => None,
        }
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.loaded().map(|l| &l.viewport)
    }

    pub fn source(&self) -> Option<&DecodedSource> {
        self.loaded().map(|l| &l.source)
    }

    pub fn output(&self) -> Option<&EncodedImage> {
        match &self.state {
            State::Applied(encoded) => Some(encoded),
            _ => None,
        }
    }

    /// Whether to show the "drag to position" hint.
    pub fn show_drag_hint(&self) -> bool {
        self.viewport().is_some_and(Viewport::needs_repositioning)
    }

    /// Start a new file selection. Any previous source is released.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let previous = mem::replace(
            &mut self.state,
            State::Loading {
                generation: self.generation,
            },
        );
        debug!(
            generation = self.generation,
            from = ?phase_of(&previous),
            "Crop load started"
        );
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Deliver the decode result for `ticket`.
    ///
    /// On failure the session returns to `Idle` and no viewport is created.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<DecodedSource>,
    ) -> Result<Outcome> {
        match self.state {
            State::Loading { generation } if generation == ticket.generation => {}
            _ => {
                debug!(generation = ticket.generation, "Stale crop load dropped");
                return Ok(Outcome::Superseded);
            }
        }

        let source = match result {
            Ok(source) => source,
            Err(e) => {
                warn!(error = %e, "Crop source failed to load");
                self.state = State::Idle;
                return Err(e);
            }
        };

        let viewport = match Viewport::fit(source.width(), source.height(), self.config.preview_side)
        {
            Ok(viewport) => viewport,
            Err(e) => {
                self.state = State::Idle;
                return Err(e);
            }
        };

        info!(
            width = source.width(),
            height = source.height(),
            scale = viewport.scale(),
            "Crop source ready"
        );
        self.state = State::Ready(Loaded { source, viewport });
        Ok(Outcome::Accepted)
    }

    /// Select an in-memory image file and decode it synchronously.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Outcome> {
        let ticket = self.begin_load();
        let result = decode_bytes(bytes, &self.tracker);
        self.complete_load(ticket, result)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<Outcome> {
        let ticket = self.begin_load();
        let result = decode_file(path, &self.tracker);
        self.complete_load(ticket, result)
    }

    /// Press inside the preview. Returns whether the event was consumed.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        match mem::replace(&mut self.state, State::Idle) {
            State::Ready(loaded) => {
                let start_pan = loaded.viewport.pan();
                self.state = State::Dragging {
                    loaded,
                    origin: (x, y),
                    start_pan,
                };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        match &mut self.state {
            State::Dragging {
                loaded,
                origin,
                start_pan,
            } => {
                loaded
                    .viewport
                    .drag_from(*start_pan, x - origin.0, y - origin.1);
                true
            }
            _ => false,
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        match mem::replace(&mut self.state, State::Idle) {
            State::Dragging { loaded, .. } => {
                debug!(pan = ?loaded.viewport.pan(), "Crop drag finished");
                self.state = State::Ready(loaded);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Freeze the current crop window into a job and mark the session busy.
    pub fn prepare_apply(&mut self) -> Result<CropJob> {
        let loaded = match mem::replace(&mut self.state, State::Idle) {
            State::Ready(loaded) | State::Dragging { loaded, .. } => loaded,
            other => {
                let phase = phase_of(&other);
                self.state = other;
                return Err(AuthentixError::InvalidState {
                    phase: phase.as_str(),
                });
            }
        };

        self.generation += 1;
        let job = CropJob {
            image: loaded.source.shared_image(),
            region: loaded.viewport.source_region(),
            output_side: self.config.profile_output_side,
            quality: self.config.jpeg_quality,
            max_surface_side: self.config.max_surface_side,
            ticket: ApplyTicket {
                generation: self.generation,
            },
        };
        debug!(region = ?job.region, "Crop apply started");
        self.state = State::Applying {
            loaded,
            generation: self.generation,
        };
        Ok(job)
    }

    /// Deliver the render result for `ticket`.
    ///
    /// On success the source is released. On failure the session goes back
    /// to `Ready` so the user can retry by hand.
    pub fn finish_apply(
        &mut self,
        ticket: ApplyTicket,
        result: Result<EncodedImage>,
    ) -> Result<Outcome> {
        let loaded = match mem::replace(&mut self.state, State::Idle) {
            State::Applying { loaded, generation } if generation == ticket.generation => loaded,
            other => {
                self.state = other;
                debug!(generation = ticket.generation, "Stale crop result dropped");
                return Ok(Outcome::Superseded);
            }
        };

        match result {
            Ok(encoded) => {
                info!(
                    side = encoded.width,
                    bytes = encoded.bytes.len(),
                    "Profile photo cropped"
                );
                drop(loaded);
                self.state = State::Applied(encoded);
                Ok(Outcome::Accepted)
            }
            Err(e) => {
                warn!(error = %e, "Crop apply failed");
                self.state = State::Ready(loaded);
                Err(e)
            }
        }
    }

    /// Render and encode the current crop on the calling thread.
    pub fn apply(&mut self) -> Result<&EncodedImage> {
        let job = self.prepare_apply()?;
        let result = job.run();
        self.finish_apply(job.ticket(), result)?;
        self.output().ok_or(AuthentixError::InvalidState {
            phase: CropPhase::Applying.as_str(),
        })
    }

    /// Close the modal. Releases the source and supersedes in-flight work.
    pub fn cancel(&mut self) {
        self.generation += 1;
        let previous = mem::replace(&mut self.state, State::Cancelled);
        debug!(from = ?phase_of(&previous), "Crop cancelled");
    }
}

fn phase_of(state: &State) -> CropPhase {
    match state {
        State::Idle => CropPhase::Idle,
        State::Loading { .. } => CropPhase::Loading,
        State::Ready(_) => CropPhase::Ready,
        State::Dragging { .. } => CropPhase::Dragging,
        State::Applying { .. } => CropPhase::Applying,
        State::Applied(_) => CropPhase::Applied,
        State::Cancelled => CropPhase::Cancelled,
    }
}
