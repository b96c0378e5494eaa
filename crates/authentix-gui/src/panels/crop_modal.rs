use authentix_core::photo::profile::CropPhase;

use crate::app::AuthentixApp;

/// Modal with the square crop preview and the Apply / Cancel controls.
pub fn show(ctx: &egui::Context, app: &mut AuthentixApp) {
    if !app.modal_open() {
        return;
    }

    let mut open = true;
    let mut cancel = false;
    let mut apply = false;

    egui::Window::new("Crop profile photo")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let side = app.session.config().preview_side as f32;
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::drag());

            draw_preview(ui, app, rect);
            handle_drag(ctx, &response, app);

            ui.add_space(4.0);
            if app.session.show_drag_hint() {
                ui.small("Drag the photo to position it");
            } else {
                ui.small(" ");
            }
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
                let label = if app.session.phase() == CropPhase::Applying {
                    "Applying..."
                } else {
                    "Apply"
                };
                if ui
                    .add_enabled(app.session.can_apply(), egui::Button::new(label))
                    .clicked()
                {
                    apply = true;
                }
                if app.session.is_busy() {
                    ui.spinner();
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        cancel = true;
    }

    if !open || cancel {
        app.cancel_crop();
    } else if apply {
        app.apply_crop();
    }
}

fn draw_preview(ui: &egui::Ui, app: &AuthentixApp, rect: egui::Rect) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(24));

    match (&app.ui_state.preview, app.session.viewport()) {
        (Some(texture), Some(viewport)) => {
            let [u0, v0, u1, v1] = viewport.visible_uv();
            let uv = egui::Rect::from_min_max(
                egui::pos2(u0 as f32, v0 as f32),
                egui::pos2(u1 as f32, v1 as f32),
            );
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
        _ => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Loading...",
                egui::FontId::proportional(14.0),
                egui::Color32::GRAY,
            );
        }
    }

    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
        egui::epaint::StrokeKind::Inside,
    );
}

/// Forward pointer events on the preview to the crop session.
fn handle_drag(ctx: &egui::Context, response: &egui::Response, app: &mut AuthentixApp) {
    let local = |pos: egui::Pos2| {
        let p = pos - response.rect.min;
        (p.x as f64, p.y as f64)
    };

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = local(pos);
            app.session.pointer_down(x, y);
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = local(pos);
            app.session.pointer_move(x, y);
        }
    }

    if response.drag_stopped() {
        app.session.pointer_up();
    }

    if app.session.phase() == CropPhase::Dragging {
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if response.hovered() && app.session.show_drag_hint() {
        ctx.set_cursor_icon(egui::CursorIcon::Grab);
    }
}
