pub mod config;
pub mod crop;
pub mod info;
pub mod location;
pub mod resize;

use std::path::{Path, PathBuf};

/// `<dir>/<stem>_<suffix>.<ext>`, next to the source unless `dir` is given.
pub fn derived_path(source: &Path, dir: Option<&Path>, suffix: &str, ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = dir.unwrap_or_else(|| source.parent().unwrap_or(Path::new(".")));
    parent.join(format!("{stem}_{suffix}.{ext}"))
}
