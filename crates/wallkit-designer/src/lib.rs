//! # WallKit Designer
//!
//! Turns a laid-out scene into files a laser cutter accepts: one standalone
//! SVG document per sheet, holding only the exportable shapes that overlap
//! that sheet. A full-canvas preview with every helper shape is available
//! for inspection.

pub mod error;
pub mod sheet_export;
pub mod svg_renderer;

pub use error::{ExportError, ExportResult};
pub use sheet_export::{
    export_sheets, select_sheet_shapes, sheet_file_name, write_sheets, SheetDocument,
    DEFAULT_FILE_PREFIX,
};
pub use svg_renderer::{path_data, render_canvas_svg, render_shape, render_sheet_svg};
