use fitsview_core::config::ViewerConfig;

use crate::app::FitsViewApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::states::Popup;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut)))
                    .clicked()
                {
                    ui.close();
                    open_file(app);
                }

                let has_image = app.viewer.image().is_some();
                if ui
                    .add_enabled(
                        has_image,
                        egui::Button::new("Save ROI As...").shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    save_roi(app);
                }

                if ui
                    .add_enabled(has_image, egui::Button::new("Save View As PNG..."))
                    .clicked()
                {
                    ui.close();
                    save_view(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Adjust Normalization...").clicked() {
                    ui.close();
                    app.ui_state.norm_dialog.sync(app.viewer.normalization());
                    app.ui_state.norm_dialog.open = true;
                }
                if ui
                    .add_enabled(app.viewer.image().is_some(), egui::Button::new("Show Header"))
                    .clicked()
                {
                    ui.close();
                    show_header(app);
                }
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    app.viewport.fit_pending = true;
                }
                ui.separator();
                if ui.button("Reset Display Defaults").clicked() {
                    ui.close();
                    let config = ViewerConfig {
                        export: app.viewer.export,
                        ..ViewerConfig::default()
                    };
                    app.apply_config(ctx, &config);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save_shortcut)) {
            save_roi(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn open_file(app: &mut FitsViewApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("FITS files", &["fits", "fit", "fts"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadFile { path });
        }
    });
}

/// Crop to the current selection, then ask where to write it.
pub(crate) fn save_roi(app: &mut FitsViewApp) {
    let image = match app.viewer.crop_selection() {
        Ok(image) => image,
        Err(e) => {
            app.ui_state.add_log(format!("Save ROI: {e}"));
            app.ui_state.push_popup(Popup::error("Save ROI", e.to_string()));
            return;
        }
    };

    let file_name = app
        .viewer
        .path()
        .and_then(|p| p.file_stem())
        .map(|s| format!("{}_roi.fits", s.to_string_lossy()))
        .unwrap_or_else(|| "roi.fits".to_string());

    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("FITS", &["fits", "fit", "fts"])
            .set_file_name(file_name)
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveRoi { path, image });
        }
    });
}

pub(crate) fn save_view(app: &mut FitsViewApp) {
    let Some(rgb) = app.viewer.render() else {
        app.ui_state
            .push_popup(Popup::error("Save View", "No image is loaded"));
        return;
    };

    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("view.png")
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveView { path, rgb });
        }
    });
}

pub(crate) fn show_header(app: &mut FitsViewApp) {
    match app.viewer.header_text() {
        Some(text) => {
            app.ui_state.header_text = text;
            app.ui_state.show_header = true;
        }
        None => app
            .ui_state
            .push_popup(Popup::error("Header", "No image is loaded")),
    }
}

fn import_config(ctx: &egui::Context, app: &mut FitsViewApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match ViewerConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}

fn export_config(ctx: &egui::Context, app: &mut FitsViewApp) {
    let config = app.viewer.config();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("fitsview.toml")
            .save_file()
        else {
            return;
        };
        let result = match config.save(&path) {
            Ok(()) => WorkerResult::Log {
                message: format!("Config exported to {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to export config: {e}"),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}
