use egui_plot::{Bar, BarChart, Plot, VLine};
use fitsview_core::normalize::ScaleMode;
use fitsview_core::render::Histogram;

use crate::app::FitsViewApp;
use crate::states::{Popup, PopupKind};

const CHART_HEIGHT: f32 = 140.0;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    normalization_window(ctx, app);
    header_window(ctx, app);
    popup_modal(ctx, app);
}

fn normalization_window(ctx: &egui::Context, app: &mut FitsViewApp) {
    let mut open = app.ui_state.norm_dialog.open;
    let mut apply = false;

    egui::Window::new("Normalization")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            let dialog = &mut app.ui_state.norm_dialog;

            ui.horizontal(|ui| {
                ui.label("Scale:");
                for &mode in ScaleMode::ALL {
                    ui.radio_value(&mut dialog.mode, mode, mode.label());
                }
            });

            egui::Grid::new("norm_percentiles")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("vmin percentile");
                    ui.add(egui::TextEdit::singleline(&mut dialog.vmin_text).desired_width(80.0));
                    ui.end_row();
                    ui.label("vmax percentile");
                    ui.add(egui::TextEdit::singleline(&mut dialog.vmax_text).desired_width(80.0));
                    ui.end_row();
                });

            if let Some(ref histogram) = dialog.histogram {
                ui.add_space(4.0);
                let bounds = app.viewer.bounds().map(|b| (b.low, b.high));
                histogram_chart(ui, histogram, bounds);
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    apply = true;
                }
                if ui.button("Reset").clicked() {
                    dialog.sync(app.viewer.normalization());
                }
            });
        });

    app.ui_state.norm_dialog.open = open;
    if apply {
        apply_normalization(ctx, app);
    }
}

fn apply_normalization(ctx: &egui::Context, app: &mut FitsViewApp) {
    let dialog = &app.ui_state.norm_dialog;
    let result = app
        .viewer
        .apply_normalization(dialog.mode, &dialog.vmin_text, &dialog.vmax_text);

    match result {
        Ok(bounds) => {
            let norm = *app.viewer.normalization();
            let msg = match bounds {
                Some(b) => format!(
                    "Normalization: {} p{}-p{} -> [{:.6e}, {:.6e}]",
                    norm.mode, norm.vmin_percentile, norm.vmax_percentile, b.low, b.high
                ),
                None => format!(
                    "Normalization: {} p{}-p{} (applies on next load)",
                    norm.mode, norm.vmin_percentile, norm.vmax_percentile
                ),
            };
            app.ui_state.add_log(msg);
            app.refresh_texture(ctx);
        }
        Err(e) => {
            app.ui_state.add_log(format!("Normalization rejected: {e}"));
            app.ui_state.push_popup(Popup::error("Normalization", e.to_string()));
        }
    }
}

fn histogram_chart(ui: &mut egui::Ui, histogram: &Histogram, bounds: Option<(f64, f64)>) {
    let width = histogram.bin_width();
    let bar_color = egui::Color32::from_rgb(110, 150, 200);

    // Log counts keep sparse tails visible next to the sky peak.
    let bars: Vec<Bar> = histogram
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(histogram.bin_center(i), (count as f64).ln_1p())
                .width(width)
                .fill(bar_color)
        })
        .collect();

    let chart = BarChart::new("histogram", bars);
    let marker_color = egui::Color32::from_rgb(255, 160, 40);

    Plot::new("normalization_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .y_axis_label("ln(1 + count)")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            if let Some((low, high)) = bounds {
                plot_ui.vline(VLine::new("vmin", low).color(marker_color).width(1.5));
                plot_ui.vline(VLine::new("vmax", high).color(marker_color).width(1.5));
            }
        });
}

fn header_window(ctx: &egui::Context, app: &mut FitsViewApp) {
    let mut open = app.ui_state.show_header;
    egui::Window::new("FITS Header")
        .open(&mut open)
        .default_size([620.0, 480.0])
        .show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let mut text = app.ui_state.header_text.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });
        });
    app.ui_state.show_header = open;
}

/// Show the oldest queued message until it is dismissed.
fn popup_modal(ctx: &egui::Context, app: &mut FitsViewApp) {
    let Some(popup) = app.ui_state.popups.first() else {
        return;
    };

    let mut dismissed = false;
    let modal = egui::Modal::new(egui::Id::new("popup_modal")).show(ctx, |ui| {
        ui.set_width(320.0);
        match popup.kind {
            PopupKind::Info => ui.heading(&popup.title),
            PopupKind::Error => ui.heading(
                egui::RichText::new(&popup.title).color(egui::Color32::from_rgb(230, 90, 80)),
            ),
        };
        ui.add_space(8.0);
        ui.label(&popup.message);
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });

    if dismissed || modal.should_close() {
        app.ui_state.popups.remove(0);
    }
}
