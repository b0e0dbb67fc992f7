use std::sync::mpsc;

use fitsview_core::config::ViewerConfig;
use fitsview_core::consts::HISTOGRAM_BINS;
use fitsview_core::render::histogram;
use fitsview_core::viewer::Viewer;

use crate::convert::rgb_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{NormDialogState, Popup, UIState, ViewportState};
use crate::worker;

pub struct FitsViewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub viewer: Viewer,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
}

impl FitsViewApp {
    pub fn new(ctx: &egui::Context) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone())?;
        let viewer = Viewer::new();

        Ok(Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState {
                norm_dialog: NormDialogState::from_state(viewer.normalization()),
                ..UIState::default()
            },
            viewer,
            viewport: ViewportState::default(),
            show_about: false,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Started { task } => {
                    self.ui_state.running_task = Some(task);
                }
                WorkerResult::FileLoaded { path, image } => {
                    self.ui_state.running_task = None;
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, BITPIX={})",
                        path.display(),
                        image.width(),
                        image.height(),
                        image.bitpix.code()
                    ));
                    self.ui_state.norm_dialog.histogram = histogram(&image.data, HISTOGRAM_BINS).ok();
                    if let Err(e) = self.viewer.set_image(path, image) {
                        self.ui_state.add_log(format!("ERROR: cannot draw image: {e}"));
                        self.ui_state.push_popup(Popup::error("Display", e.to_string()));
                    }
                    self.ui_state.norm_dialog.sync(self.viewer.normalization());
                    self.ui_state.roi_mode = false;
                    self.ui_state.show_header = false;
                    self.viewport.fit_pending = true;
                    self.refresh_texture(ctx);
                }
                WorkerResult::RoiSaved { path } => {
                    self.ui_state.running_task = None;
                    let message = format!("ROI saved as {}", path.display());
                    self.ui_state.add_log(message.clone());
                    self.ui_state.push_popup(Popup::info("Save ROI", message));
                }
                WorkerResult::ViewSaved { path } => {
                    self.ui_state.running_task = None;
                    self.ui_state.add_log(format!("View saved as {}", path.display()));
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(ctx, &config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.running_task = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.ui_state.push_popup(Popup::error("Error", message));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Re-render the loaded image with the viewer's current settings.
    pub fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(rgb) = self.viewer.render() else {
            self.viewport.texture = None;
            self.viewport.image_size = None;
            return;
        };
        let image = rgb_to_color_image(&rgb);
        let size = image.size;
        let texture = ctx.load_texture("viewport", image, egui::TextureOptions::NEAREST);
        self.viewport.texture = Some(texture);
        self.viewport.image_size = Some(size);

        let norm = self.viewer.normalization();
        self.viewport.viewing_label = format!(
            "{} p{}-p{}, {}, origin {}",
            norm.mode, norm.vmin_percentile, norm.vmax_percentile, self.viewer.colormap, self.viewer.origin
        );
    }

    pub fn apply_config(&mut self, ctx: &egui::Context, config: &ViewerConfig) {
        match self.viewer.apply_config(config) {
            Ok(()) => {
                self.ui_state.norm_dialog.sync(self.viewer.normalization());
                self.ui_state.add_log("Config imported".into());
                self.refresh_texture(ctx);
            }
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: config rejected: {e}"));
                self.ui_state.push_popup(Popup::error("Import Config", e.to_string()));
            }
        }
    }
}

impl eframe::App for FitsViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::dialogs::show(ctx, self);

        if self.show_about {
            egui::Window::new("About FitsView")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("FitsView");
                        ui.label("FITS Image Viewer");
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
