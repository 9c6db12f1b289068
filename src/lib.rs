//! # WallKit
//!
//! Turns a floor plan of rectangular rooms into flat wall panels for a
//! laser cutter:
//! - Room sides are merged into physical walls
//! - Each wall becomes a closed outline, optionally finger-jointed
//! - Doors and windows are cut out of the walls they sit on
//! - Panels are packed onto 730 × 420 sheets and written as one SVG per sheet
//!
//! ## Architecture
//!
//! WallKit is organized as a workspace with multiple crates:
//!
//! 1. **wallkit-core** - Plan model, units, constants, visibility maps
//! 2. **wallkit-camtools** - Wall merging, outlines, openings, sheet packing
//! 3. **wallkit-designer** - Per-sheet SVG rendering and export
//! 4. **wallkit-settings** - Configuration files and plan documents
//! 5. **wallkit** - Command line binary that integrates all crates

pub use wallkit_camtools as camtools;
pub use wallkit_designer as designer;
pub use wallkit_settings as settings;

pub use wallkit_core::{FloorPlan, Opening, OpeningKind, Room, Side, Visibility, WallKey};

pub use wallkit_camtools::{
    merge_rooms, rebuild, DrawableScene, PointerKind, SheetLayout, UnrollParameters, WallSpan,
    WallUnroller,
};

pub use wallkit_designer::{render_canvas_svg, render_sheet_svg, write_sheets, SheetDocument};

pub use wallkit_settings::{Config, PlanDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
