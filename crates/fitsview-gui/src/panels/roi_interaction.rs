use fitsview_core::roi::{DisplayOrigin, Point};

use crate::app::FitsViewApp;

const BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);

/// Convert a screen position to image pixel coordinates.
pub fn screen_to_pixel(
    pos: egui::Pos2,
    img_rect: egui::Rect,
    image_size: [usize; 2],
    origin: DisplayOrigin,
) -> Point {
    let fx = ((pos.x - img_rect.left()) / img_rect.width()) as f64;
    let fy = ((pos.y - img_rect.top()) / img_rect.height()) as f64;
    origin.display_to_pixel(fx, fy, image_size[0], image_size[1])
}

fn pixel_to_screen(
    p: Point,
    img_rect: egui::Rect,
    image_size: [usize; 2],
    origin: DisplayOrigin,
) -> egui::Pos2 {
    let (fx, fy) = origin.pixel_to_display(p.0, p.1, image_size[0], image_size[1]);
    egui::pos2(
        img_rect.left() + fx as f32 * img_rect.width(),
        img_rect.top() + fy as f32 * img_rect.height(),
    )
}

/// Drive the selector from a primary-button drag. Escape abandons the drag.
pub fn handle_roi_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    ui: &egui::Ui,
    app: &mut FitsViewApp,
    img_rect: egui::Rect,
    image_size: [usize; 2],
) {
    let origin = app.viewer.origin;
    let no_ctrl = !ui.input(|i| i.modifiers.command);
    let to_pixel = |pos: egui::Pos2| screen_to_pixel(pos, img_rect, image_size, origin);

    if response.drag_started_by(egui::PointerButton::Primary) && no_ctrl {
        if let Some(pos) = response.interact_pointer_pos() {
            app.viewer.selector_mut().press(to_pixel(pos));
        }
    }

    if app.viewer.selector().is_dragging() {
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            app.viewer.selector_mut().cancel();
            app.ui_state.add_log("ROI selection cancelled".into());
        } else if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
            let p = to_pixel(pos);
            if response.drag_stopped_by(egui::PointerButton::Primary) {
                if let Some(roi) = app.viewer.selector_mut().release(p) {
                    app.ui_state.add_log(format!("ROI: {roi}"));
                }
            } else {
                app.viewer.selector_mut().drag(p);
            }
        }
    }

    if response.hovered() {
        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
    }
}

/// Draw the selection or the rectangle being dragged.
pub fn draw_roi_overlay(
    ui: &egui::Ui,
    app: &FitsViewApp,
    img_rect: egui::Rect,
    image_size: [usize; 2],
) {
    let origin = app.viewer.origin;
    let selector = app.viewer.selector();

    let corners = if let Some((start, current)) = selector.live_corners() {
        (start, current)
    } else if let Some(roi) = selector.roi() {
        ((roi.x1 as f64, roi.y1 as f64), (roi.x2 as f64, roi.y2 as f64))
    } else {
        return;
    };

    let a = pixel_to_screen(corners.0, img_rect, image_size, origin);
    let b = pixel_to_screen(corners.1, img_rect, image_size, origin);
    let roi_screen = egui::Rect::from_two_pos(a, b).intersect(img_rect);
    if !roi_screen.is_positive() {
        return;
    }

    draw_dim_regions(ui, img_rect, roi_screen);
    ui.painter().rect_stroke(
        roi_screen,
        0.0,
        egui::Stroke::new(1.5, BORDER_COLOR),
        egui::epaint::StrokeKind::Outside,
    );

    let width = (corners.1 .0 - corners.0 .0).abs().trunc();
    let height = (corners.1 .1 - corners.0 .1).abs().trunc();
    ui.painter().text(
        egui::pos2(roi_screen.right() - 4.0, roi_screen.bottom() + 4.0),
        egui::Align2::RIGHT_TOP,
        format!("{width}x{height}"),
        egui::FontId::proportional(12.0),
        BORDER_COLOR,
    );
}

fn draw_dim_regions(ui: &egui::Ui, img_rect: egui::Rect, roi_screen: egui::Rect) {
    let dim_color = egui::Color32::from_black_alpha(140);
    let painter = ui.painter();

    // Top
    painter.rect_filled(
        egui::Rect::from_min_max(img_rect.left_top(), egui::pos2(img_rect.right(), roi_screen.top())),
        0.0,
        dim_color,
    );
    // Bottom
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(img_rect.left(), roi_screen.bottom()), img_rect.right_bottom()),
        0.0,
        dim_color,
    );
    // Left
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(img_rect.left(), roi_screen.top()),
            egui::pos2(roi_screen.left(), roi_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
    // Right
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(roi_screen.right(), roi_screen.top()),
            egui::pos2(img_rect.right(), roi_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
}
