use std::path::PathBuf;
use std::sync::mpsc;

use authentix_core::config::AppConfig;
use authentix_core::error::AuthentixError;
use authentix_core::io::handle::HandleTracker;
use authentix_core::photo::profile::{CropPhase, CropSession, Outcome};
use image::ImageFormat;
use tracing::warn;

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{UIState, MAX_DISPLAY_SIDE};
use crate::worker;

pub struct AuthentixApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub session: CropSession,
    pub ui_state: UIState,
    pub show_about: bool,
}

impl AuthentixApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone())?;
        let session = CropSession::new(config.imaging, HandleTracker::new());

        Ok(Self {
            cmd_tx,
            result_tx,
            result_rx,
            session,
            ui_state: UIState::default(),
            show_about: false,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FilePicked { path } => {
                    self.open_path(path);
                }
                WorkerResult::Loaded {
                    path,
                    ticket,
                    result,
                } => {
                    let (result, raster) = match result {
                        Ok(loaded) => (Ok(loaded.source), Some(loaded.raster)),
                        Err(e) => (Err(e), None),
                    };
                    match self.session.complete_load(ticket, result) {
                        Ok(Outcome::Accepted) => {
                            if let Some(raster) = raster {
                                let image = rgba_to_color_image(&raster);
                                self.ui_state.preview = Some(ctx.load_texture(
                                    "crop_preview",
                                    image,
                                    egui::TextureOptions::LINEAR,
                                ));
                            }
                            let info = self.session.source().map(|s| s.info());
                            if let Some(ref info) = info {
                                self.ui_state.add_log(format!(
                                    "Opened: {} ({}x{}, {})",
                                    path.display(),
                                    info.width,
                                    info.height,
                                    info.mime
                                ));
                            }
                            self.ui_state.source_info = info;
                        }
                        Ok(Outcome::Superseded) => {}
                        Err(e) => self.report(&e),
                    }
                }
                WorkerResult::Applied { ticket, result } => {
                    match self.session.finish_apply(ticket, result) {
                        Ok(Outcome::Accepted) => {
                            self.ui_state.preview = None;
                            self.update_output_texture(ctx);
                        }
                        Ok(Outcome::Superseded) => {}
                        Err(e) => self.report(&e),
                    }
                }
                WorkerResult::Saved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn update_output_texture(&mut self, ctx: &egui::Context) {
        let Some(output) = self.session.output() else {
            return;
        };
        self.ui_state.add_log(format!(
            "Cropped to {}x{} ({:.1} KB)",
            output.width,
            output.height,
            output.bytes.len() as f64 / 1024.0
        ));
        match image::load_from_memory_with_format(&output.bytes, ImageFormat::Jpeg) {
            Ok(decoded) => {
                let image = rgba_to_color_image(&decoded.to_rgba8());
                self.ui_state.output_preview = Some(ctx.load_texture(
                    "output_preview",
                    image,
                    egui::TextureOptions::LINEAR,
                ));
            }
            Err(e) => warn!(error = %e, "Output preview not decodable"),
        }
    }

    fn report(&mut self, e: &AuthentixError) {
        warn!(error = %e, "Crop operation failed");
        self.ui_state
            .add_log(format!("ERROR: {} ({e})", e.user_message()));
    }

    /// Start a new selection. Whatever the modal was doing is superseded.
    pub fn open_path(&mut self, path: PathBuf) {
        let ticket = self.session.begin_load();
        self.ui_state.clear_images();
        self.ui_state.file_path = Some(path.clone());
        self.send_command(WorkerCommand::Load {
            path,
            ticket,
            tracker: self.session.tracker().clone(),
            display_side: MAX_DISPLAY_SIDE,
        });
    }

    pub fn apply_crop(&mut self) {
        match self.session.prepare_apply() {
            Ok(job) => self.send_command(WorkerCommand::Apply { job }),
            Err(e) => self.report(&e),
        }
    }

    pub fn cancel_crop(&mut self) {
        self.session.cancel();
        self.ui_state.clear_images();
        self.ui_state.add_log("Crop cancelled".into());
    }

    pub fn copy_data_uri(&mut self, ctx: &egui::Context) {
        if let Some(output) = self.session.output() {
            ctx.copy_text(output.to_data_uri());
            self.ui_state.add_log("Data URI copied to clipboard".into());
        }
    }

    /// The crop modal is up while a source is loading or loaded.
    pub fn modal_open(&self) -> bool {
        matches!(
            self.session.phase(),
            CropPhase::Loading | CropPhase::Ready | CropPhase::Dragging | CropPhase::Applying
        )
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for AuthentixApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::output::show(ctx, self);
        panels::crop_modal::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Authentix")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Authentix");
                        ui.label("Profile photo cropper");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
