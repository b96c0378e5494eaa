mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod worker;

use std::path::PathBuf;

use authentix_core::config::AppConfig;
use tracing::warn;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 480.0])
            .with_title("Authentix"),
        ..Default::default()
    };

    eframe::run_native(
        "Authentix",
        options,
        Box::new(move |cc| Ok(Box::new(app::AuthentixApp::new(&cc.egui_ctx, config)?))),
    )
}

/// Config file given as the first argument, or the defaults.
fn load_config(path: Option<PathBuf>) -> AppConfig {
    let Some(path) = path else {
        return AppConfig::default();
    };
    match AppConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Config not loaded, using defaults");
            AppConfig::default()
        }
    }
}
