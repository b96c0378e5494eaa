use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use authentix_core::io::decode::decode_file;
use authentix_core::io::handle::HandleTracker;
use authentix_core::photo::profile::{CropJob, LoadTicket};
use authentix_core::raster::display_raster;
use tracing::debug;

use crate::messages::{LoadedPreview, WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the sender for commands.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("authentix-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

pub fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Load {
                path,
                ticket,
                tracker,
                display_side,
            } => {
                handle_load(path, ticket, &tracker, display_side, &tx, &ctx);
            }
            WorkerCommand::Apply { job } => {
                handle_apply(&job, &tx, &ctx);
            }
        }
    }
    debug!("Worker channel closed");
}

fn handle_load(
    path: PathBuf,
    ticket: LoadTicket,
    tracker: &HandleTracker,
    display_side: u32,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = decode_file(&path, tracker).map(|source| {
        let raster = display_raster(source.image(), display_side);
        LoadedPreview { source, raster }
    });
    if result.is_ok() {
        send_log(
            tx,
            ctx,
            format!("Decoded {} in {}ms", file_name(&path), start.elapsed().as_millis()),
        );
    }
    send(tx, ctx, WorkerResult::Loaded { path, ticket, result });
}

fn handle_apply(job: &CropJob, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let start = Instant::now();
    let result = job.run();
    debug!(
        region = ?job.region(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Crop job finished"
    );
    send(
        tx,
        ctx,
        WorkerResult::Applied {
            ticket: job.ticket(),
            result,
        },
    );
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
