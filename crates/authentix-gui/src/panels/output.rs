use crate::app::AuthentixApp;

pub fn show(ctx: &egui::Context, app: &mut AuthentixApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            let Some(texture) = app.ui_state.output_preview.clone() else {
                ui.label("Open a photo to crop (Ctrl+O)");
                return;
            };

            let side = app.session.config().profile_output_side as f32;
            let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
            ui.painter().image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Save As...").clicked() {
                    super::menu_bar::save_output(ctx, app);
                }
                if ui.button("Copy Data URI").clicked() {
                    app.copy_data_uri(ctx);
                }
                if ui.button("Choose Another...").clicked() {
                    super::menu_bar::pick_source(ctx, app);
                }
            });
        });
    });
}
