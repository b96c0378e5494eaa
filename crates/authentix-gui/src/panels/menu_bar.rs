use crate::app::AuthentixApp;
use crate::messages::WorkerResult;
use crate::worker;

pub fn show(ctx: &egui::Context, app: &mut AuthentixApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    pick_source(ctx, app);
                }

                let has_output = app.session.output().is_some();
                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui
                    .add_enabled(
                        has_output,
                        egui::Button::new("Save As...").shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    save_output(ctx, app);
                }

                if ui.add_enabled(has_output, egui::Button::new("Copy Data URI")).clicked() {
                    ui.close();
                    app.copy_data_uri(ctx);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
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
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            pick_source(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            save_output(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub fn pick_source(ctx: &egui::Context, app: &mut AuthentixApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "webp", "gif", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            worker::send(&result_tx, &ctx, WorkerResult::FilePicked { path });
        }
    });
}

pub fn save_output(ctx: &egui::Context, app: &mut AuthentixApp) {
    let Some(output) = app.session.output().cloned() else {
        return;
    };
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name("profile.jpg")
            .save_file()
        {
            let result = match output.save(&path) {
                Ok(()) => WorkerResult::Saved { path },
                Err(e) => WorkerResult::Error {
                    message: format!("Failed to save {}: {e}", path.display()),
                },
            };
            worker::send(&result_tx, &ctx, result);
        }
    });
}
