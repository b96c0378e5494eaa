use std::path::PathBuf;

use authentix_core::io::decode::SourceInfo;

/// Longest edge of the texture uploaded for the crop preview.
pub const MAX_DISPLAY_SIDE: u32 = 2048;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    pub source_info: Option<SourceInfo>,

    /// Display copy of the source being cropped.
    pub preview: Option<egui::TextureHandle>,
    /// The applied profile photo.
    pub output_preview: Option<egui::TextureHandle>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn clear_images(&mut self) {
        self.preview = None;
        self.output_preview = None;
        self.source_info = None;
    }
}
