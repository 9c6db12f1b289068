//! Sheet Exporter
//!
//! Splits the tall layout canvas into one document per sheet. A shape belongs
//! to every sheet its vertical extent overlaps, so a piece that straddles a
//! sheet edge is written to both files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wallkit_camtools::{DrawableScene, SceneShape};

use crate::error::{ExportError, ExportResult};
use crate::svg_renderer::render_sheet_svg;

pub const DEFAULT_FILE_PREFIX: &str = "laser_sheet";

/// A rendered sheet ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDocument {
    /// Zero-based sheet index
    pub index: usize,
    pub file_name: String,
    pub svg: String,
}

/// `<prefix>_<n>.svg` with `n` counted from 1.
pub fn sheet_file_name(prefix: &str, index: usize) -> String {
    let prefix = if prefix.trim().is_empty() {
        DEFAULT_FILE_PREFIX
    } else {
        prefix
    };
    format!("{}_{}.svg", prefix, index + 1)
}

/// Exportable shapes overlapping sheet `index`, in scene order.
pub fn select_sheet_shapes(scene: &DrawableScene, index: usize) -> Vec<&SceneShape> {
    let top = index as f64 * scene.sheet_height;
    let bottom = top + scene.sheet_height;
    scene
        .exportable_shapes()
        .filter(|shape| {
            shape
                .bounds()
                .is_some_and(|b| b.intersects_band(top, bottom))
        })
        .collect()
}

/// Render every sheet of the scene.
pub fn export_sheets(scene: &DrawableScene, prefix: &str) -> ExportResult<Vec<SheetDocument>> {
    (0..scene.sheet_count)
        .map(|index| {
            let svg = render_sheet_svg(scene, index)?;
            Ok(SheetDocument {
                index,
                file_name: sheet_file_name(prefix, index),
                svg,
            })
        })
        .collect()
}

/// Render every sheet and write it into `dir`, creating the directory if needed.
///
/// Returns the written paths in sheet order.
pub fn write_sheets(
    scene: &DrawableScene,
    dir: impl AsRef<Path>,
    prefix: &str,
) -> ExportResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(scene.sheet_count);
    for doc in export_sheets(scene, prefix)? {
        let path = dir.join(&doc.file_name);
        fs::write(&path, doc.svg.as_bytes()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote sheet {} to {}", doc.index + 1, path.display());
        written.push(path);
    }
    info!("Exported {} sheet(s) to {}", written.len(), dir.display());
    Ok(written)
}
