use crate::app::FitsViewApp;
use crate::panels::roi_interaction;

const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 40.0;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());
        let (Some(texture_id), Some(image_size)) = (texture_id, app.viewport.image_size) else {
            let message = if app.viewer.file().is_some() {
                "Image cannot be drawn with the current normalization"
            } else {
                "Open a FITS file to begin"
            };
            show_placeholder(ui, message);
            return;
        };
        let size_vec = egui::vec2(image_size[0] as f32, image_size[1] as f32);

        if app.viewport.fit_pending {
            fit_to_rect(&mut app.viewport.zoom, &mut app.viewport.pan_offset, size_vec, rect);
            app.viewport.fit_pending = false;
        }

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        handle_zoom(ui, &response, app, rect);
        handle_pan(ui, &response, app);

        let img_rect = compute_img_rect(rect, size_vec, app);
        if app.ui_state.roi_mode {
            roi_interaction::handle_roi_interaction(ctx, &response, ui, app, img_rect, image_size);
        }

        if response.double_clicked() {
            fit_to_rect(&mut app.viewport.zoom, &mut app.viewport.pan_offset, size_vec, rect);
        }

        let img_rect = compute_img_rect(rect, size_vec, app);
        draw_image(ui, texture_id, img_rect);
        roi_interaction::draw_roi_overlay(ui, app, img_rect, image_size);
        draw_viewing_label(ui, rect, &app.viewport.viewing_label);

        update_cursor_readout(&response, app, img_rect, image_size);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut FitsViewApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    let zoom_factor = (scroll_delta * 0.005).exp();
    let new_zoom = (app.viewport.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);

    // Zoom toward mouse cursor
    if let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) {
        let center = rect.center().to_vec2() + app.viewport.pan_offset;
        let mouse_rel = mouse_pos.to_vec2() - center;
        let scale_change = new_zoom / app.viewport.zoom;
        app.viewport.pan_offset += mouse_rel * (1.0 - scale_change);
    }

    app.viewport.zoom = new_zoom;
}

/// Middle or Ctrl+primary drag always pans. Plain primary drag pans only
/// while ROI selection is off.
fn handle_pan(ui: &egui::Ui, response: &egui::Response, app: &mut FitsViewApp) {
    let command = ui.input(|i| i.modifiers.command);
    let primary = response.dragged_by(egui::PointerButton::Primary);
    if response.dragged_by(egui::PointerButton::Middle)
        || (primary && (command || !app.ui_state.roi_mode))
    {
        app.viewport.pan_offset += response.drag_delta();
    }
}

fn compute_img_rect(rect: egui::Rect, image_size: egui::Vec2, app: &FitsViewApp) -> egui::Rect {
    let scaled = image_size * app.viewport.zoom;
    let center = rect.center() + app.viewport.pan_offset;
    egui::Rect::from_center_size(center, scaled)
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn update_cursor_readout(
    response: &egui::Response,
    app: &mut FitsViewApp,
    img_rect: egui::Rect,
    image_size: [usize; 2],
) {
    app.ui_state.cursor_readout = response
        .hover_pos()
        .filter(|pos| img_rect.contains(*pos))
        .and_then(|pos| {
            let (x, y) =
                roi_interaction::screen_to_pixel(pos, img_rect, image_size, app.viewer.origin);
            let value = app.viewer.value_at(x, y)?;
            Some((x as usize, y as usize, value))
        });
}

fn show_placeholder(ui: &mut egui::Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(message)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}

fn fit_to_rect(zoom: &mut f32, pan: &mut egui::Vec2, image_size: egui::Vec2, rect: egui::Rect) {
    let available = rect.size();
    let fit_x = available.x / image_size.x;
    let fit_y = available.y / image_size.y;
    *zoom = fit_x.min(fit_y).clamp(MIN_ZOOM, MAX_ZOOM);
    *pan = egui::Vec2::ZERO;
}
