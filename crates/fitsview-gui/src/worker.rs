use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use fitsview_core::image::FitsImage;
use fitsview_core::io::fits::load_fits;
use fitsview_core::io::fits_writer::write_fits;
use fitsview_core::render::save_png;
use image::RgbImage;

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("fitsview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        send(
            &tx,
            &ctx,
            WorkerResult::Started {
                task: cmd.task_label().to_string(),
            },
        );
        match cmd {
            WorkerCommand::LoadFile { path } => handle_load_file(&path, &tx, &ctx),
            WorkerCommand::SaveRoi { path, image } => handle_save_roi(&path, &image, &tx, &ctx),
            WorkerCommand::SaveView { path, rgb } => handle_save_view(&path, &rgb, &tx, &ctx),
        }
    }
}

fn handle_load_file(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    send_log(tx, ctx, format!("Loading {}...", path.display()));
    let start = Instant::now();
    match load_fits(path) {
        Ok(image) => {
            send_log(
                tx,
                ctx,
                format!("Decoded in {:.0}ms", start.elapsed().as_secs_f64() * 1000.0),
            );
            send(
                tx,
                ctx,
                WorkerResult::FileLoaded {
                    path: path.to_path_buf(),
                    image,
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

fn handle_save_roi(
    path: &Path,
    image: &FitsImage,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match write_fits(path, image) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::RoiSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save ROI: {e}")),
    }
}

fn handle_save_view(
    path: &Path,
    rgb: &RgbImage,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match save_png(rgb, path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::ViewSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save view: {e}")),
    }
}
