use fitsview_core::image::SourceInfo;
use fitsview_core::render::Colormap;
use fitsview_core::roi::DisplayOrigin;

use super::{enum_combo, menu_bar, section_header};
use crate::app::FitsViewApp;
use crate::states::Popup;

const LEFT_PANEL_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file_section(ui, app);
                ui.separator();
                display_section(ctx, ui, app);
                ui.separator();
                roi_section(ui, app);
                ui.separator();
                metadata_section(ui, app);
            });
        });
}

fn file_section(ui: &mut egui::Ui, app: &mut FitsViewApp) {
    let status = app.ui_state.running_task.as_deref();
    section_header(ui, "File", status);
    ui.add_space(4.0);

    let idle = !app.ui_state.is_busy();
    if ui.add_enabled(idle, egui::Button::new("Open...")).clicked() {
        menu_bar::open_file(app);
    }

    let Some(file) = app.viewer.file() else {
        ui.small("No file loaded");
        return;
    };
    let info = SourceInfo::from_image(&file.path, &file.image);

    ui.label(
        info.filename
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    );
    ui.small(format!("{}x{}, BITPIX {}", info.width, info.height, info.bitpix.code()));
    if info.header_axes.len() > 2 {
        ui.small(format!("Header axes: {:?}", info.header_axes));
    }
    if let Some(ref object) = info.object {
        ui.small(format!("Object: {object}"));
    }
    if let Some(ref telescope) = info.telescope {
        ui.small(format!("Telescope: {telescope}"));
    }
}

fn display_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut FitsViewApp) {
    section_header(ui, "Display", None);
    ui.add_space(4.0);

    if ui.button("Adjust Normalization...").clicked() {
        app.ui_state.norm_dialog.sync(app.viewer.normalization());
        app.ui_state.norm_dialog.open = true;
    }

    let norm = *app.viewer.normalization();
    ui.small(format!(
        "{} scale, percentiles {} to {}",
        norm.mode, norm.vmin_percentile, norm.vmax_percentile
    ));
    if let Some(bounds) = app.viewer.bounds() {
        ui.small(format!("Data range {:.6e} to {:.6e}", bounds.low, bounds.high));
    }

    ui.add_space(4.0);
    let mut colormap = app.viewer.colormap;
    let mut origin = app.viewer.origin;
    let changed = enum_combo(ui, "Colormap", &mut colormap, Colormap::ALL)
        | enum_combo(ui, "Origin", &mut origin, DisplayOrigin::ALL);
    if changed {
        app.viewer.colormap = colormap;
        app.viewer.origin = origin;
        app.refresh_texture(ctx);
    }
}

fn roi_section(ui: &mut egui::Ui, app: &mut FitsViewApp) {
    let roi = app.viewer.roi();
    let status = roi.map(|r| r.to_string());
    section_header(ui, "Region of Interest", status.as_deref());
    ui.add_space(4.0);

    let has_image = app.viewer.image().is_some();
    ui.add_enabled_ui(has_image, |ui| {
        ui.horizontal(|ui| {
            ui.toggle_value(&mut app.ui_state.roi_mode, "Set ROI")
                .on_hover_text("Drag on the image to select a rectangle");
            if ui.add_enabled(roi.is_some(), egui::Button::new("Clear")).clicked() {
                app.viewer.selector_mut().clear();
            }
        });

        if let Some((image, roi)) = app.viewer.image().zip(roi) {
            match roi.bounds(image.width(), image.height()) {
                Ok(b) => {
                    ui.small(format!("{}x{} pixels", b.width(), b.height()));
                }
                Err(_) => {
                    ui.colored_label(egui::Color32::from_rgb(230, 120, 60), "Selection is outside the image");
                }
            }
        }

        ui.checkbox(&mut app.viewer.export.shift_reference_pixel, "Shift CRPIX on export");

        if ui.button("Save ROI as File...").clicked() {
            menu_bar::save_roi(app);
        }
    });
}

fn metadata_section(ui: &mut egui::Ui, app: &mut FitsViewApp) {
    section_header(ui, "Metadata", None);
    ui.add_space(4.0);

    ui.add_enabled_ui(app.viewer.image().is_some(), |ui| {
        if ui.button("Show Header").clicked() {
            menu_bar::show_header(app);
        }
        ui.horizontal_wrapped(|ui| {
            if ui.button("Frequency").clicked() {
                let result = app.viewer.frequency().map(|f| f.to_string());
                show_result(app, "Frequency", result);
            }
            if ui.button("Clean Beam").clicked() {
                let result = app.viewer.clean_beam().map(|b| b.to_string());
                show_result(app, "Clean Beam", result);
            }
            if ui.button("Pixel Scale").clicked() {
                let result = app.viewer.pixel_scale().map(|s| s.to_string());
                show_result(app, "Pixel Scale", result);
            }
        });
    });
}

fn show_result(app: &mut FitsViewApp, title: &str, result: fitsview_core::error::Result<String>) {
    let popup = match result {
        Ok(message) => Popup::info(title, message),
        Err(e) => Popup::error(title, e.to_string()),
    };
    app.ui_state.push_popup(popup);
}
