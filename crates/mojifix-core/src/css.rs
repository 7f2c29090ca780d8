// crates/mojifix-core/src/css.rs
//
// Append-once layout patch for the site stylesheet. The marker comment
// guards the append, so the block appears at most once per file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{FixError, Result};

pub const LAYOUT_PATCH_MARKER: &str = "/* Emergency Layout Patch */";

pub const LAYOUT_PATCH: &str = "
/* Emergency Layout Patch */
img {
  max-width: 100% !important;
  height: auto !important;
  display: block;
}
.detail-img, .thumb, .class-card img {
  max-width: 100% !important;
  height: auto !important;
}
.container {
  overflow-x: hidden !important;
}
";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PatchOutcome {
    Appended,
    AlreadyPresent,
    Missing,
}

pub fn needs_layout_patch(css: &str) -> bool {
    !css.contains(LAYOUT_PATCH_MARKER)
}

pub fn patch_stylesheet(path: &Path) -> Result<PatchOutcome> {
    if !path.is_file() {
        return Ok(PatchOutcome::Missing);
    }

    let bytes = std::fs::read(path).map_err(|e| FixError::io(path, e))?;
    let css = std::str::from_utf8(&bytes).map_err(|_| FixError::NotUtf8 {
        path: path.to_path_buf(),
    })?;

    if !needs_layout_patch(css) {
        tracing::debug!(path = %path.display(), "layout patch already present");
        return Ok(PatchOutcome::AlreadyPresent);
    }

    let mut f = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| FixError::io(path, e))?;
    f.write_all(LAYOUT_PATCH.as_bytes())
        .map_err(|e| FixError::io(path, e))?;

    tracing::info!(path = %path.display(), "appended layout patch");
    Ok(PatchOutcome::Appended)
}
