use crate::app::AuthentixApp;

pub fn show(ctx: &egui::Context, app: &mut AuthentixApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some(ref info) = app.ui_state.source_info {
                ui.label(format!("{}x{}", info.width, info.height));
                ui.separator();
            }
            if let Some(viewport) = app.session.viewport() {
                ui.label(format!("Scale: {:.0}%", viewport.scale() * 100.0));
                ui.separator();
            }
            ui.label(format!("Crop: {}", app.session.phase()));
            ui.separator();
            ui.label(format!("Handles: {}", app.session.tracker().live()));
        });

        ui.add_space(2.0);
    });
}
