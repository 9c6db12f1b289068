//! wallkit CLI
//!
//! Rebuilds the wall layout of a saved floor plan and writes the laser sheets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use wallkit::{
    init_logging, merge_rooms, render_canvas_svg, write_sheets, Config, DrawableScene, FloorPlan,
    PlanDocument, Visibility, WallUnroller, BUILD_DATE, VERSION,
};
use wallkit_core::format_meters;
use wallkit_settings::VisibilityMaps;

#[derive(Parser)]
#[command(name = "wallkit", version)]
#[command(about = "Unroll a floor plan into laser-cut wall panels", long_about = None)]
struct Cli {
    /// Layout configuration (.toml or .json); defaults to the user config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one SVG file per laser sheet
    Export {
        /// Saved plan document (.json)
        plan: PathBuf,
        /// Output directory (default: from the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// File name prefix (default: from the configuration)
        #[arg(long)]
        prefix: Option<String>,
        /// Store the wall and floor toggles back into the plan document
        #[arg(long)]
        update_plan: bool,
    },
    /// List the merged walls and where they were placed
    Info {
        /// Saved plan document (.json)
        plan: PathBuf,
    },
    /// Write the whole layout canvas, all sheets stacked, as one SVG
    Preview {
        /// Saved plan document (.json)
        plan: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// A loaded plan ready to be laid out
struct Session {
    document: PlanDocument,
    plan: FloorPlan,
    visibility: Visibility,
    unroller: WallUnroller,
}

impl Session {
    fn open(plan_path: &Path, config: &Config) -> Result<Self> {
        let document = PlanDocument::load(plan_path)
            .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;
        let (plan, visibility) = document.to_plan();

        // the configuration wins, the plan fills in what it leaves open
        let mut params = config.to_unroll_parameters();
        if params.student_name.is_empty() {
            params.student_name = document.meta.student_name.trim().to_string();
        }
        params.joined_mode |= document.ui.joined_mode;

        let unroller = WallUnroller::new(params).context("Invalid layout parameters")?;
        debug!(
            "Opened {} with {} rooms and {} openings",
            plan_path.display(),
            plan.rooms().len(),
            plan.openings().len()
        );

        Ok(Self {
            document,
            plan,
            visibility,
            unroller,
        })
    }

    fn rebuild(&mut self) -> DrawableScene {
        self.unroller.rebuild(&self.plan, &mut self.visibility)
    }
}

fn main() -> Result<()> {
    init_logging()?;
    debug!("wallkit {} (built {})", VERSION, BUILD_DATE);

    let cli = Cli::parse();
    let config =
        Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Export {
            plan,
            output,
            prefix,
            update_plan,
        } => export(&plan, &config, output, prefix, update_plan)?,
        Commands::Info { plan } => show_info(&plan, &config)?,
        Commands::Preview { plan, output } => preview(&plan, &config, &output)?,
    }

    Ok(())
}

fn export(
    plan_path: &Path,
    config: &Config,
    output: Option<PathBuf>,
    prefix: Option<String>,
    update_plan: bool,
) -> Result<()> {
    let mut session = Session::open(plan_path, config)?;
    let scene = session.rebuild();
    if scene.is_empty() {
        warn!("{} has no walls to cut", plan_path.display());
    }

    let dir = output.unwrap_or_else(|| config.export.output_directory.clone());
    let prefix = prefix.unwrap_or_else(|| config.export.file_prefix.clone());
    let written = write_sheets(&scene, &dir, &prefix)
        .with_context(|| format!("Failed to write sheets to {}", dir.display()))?;
    for path in &written {
        println!("{}", path.display());
    }

    if update_plan {
        session.document.visibility = VisibilityMaps::from_visibility(&session.visibility);
        session
            .document
            .save(plan_path)
            .with_context(|| format!("Failed to update plan {}", plan_path.display()))?;
        info!("Stored wall toggles in {}", plan_path.display());
    }

    Ok(())
}

fn show_info(plan_path: &Path, config: &Config) -> Result<()> {
    let mut session = Session::open(plan_path, config)?;
    println!(
        "{}: {} rooms, {} openings",
        plan_path.display(),
        session.plan.rooms().len(),
        session.plan.openings().len()
    );

    let spans = merge_rooms(session.plan.rooms());
    println!("\nWalls ({}):", spans.len());
    for span in &spans {
        let rooms: Vec<&str> = span.segments.iter().map(|s| s.room_id.as_str()).collect();
        println!(
            "  {:<28} {:>8}  rooms {}",
            span.key().as_str(),
            format_meters(span.length()),
            rooms.join(", ")
        );
    }

    let scene = session.rebuild();
    println!("\nPlacement:");
    for wall in &scene.walls {
        println!(
            "  {:<28} sheet {:>2}  x {:>6.1}  y {:>6.1}  holes {}{}",
            wall.key.as_str(),
            wall.sheet + 1,
            wall.rect.x,
            wall.rect.y,
            wall.hole_count,
            if wall.enabled { "" } else { "  (off)" }
        );
    }
    for floor in &scene.floors {
        println!(
            "  {:<28} sheet {:>2}  x {:>6.1}  y {:>6.1}{}",
            format!("floor {}", floor.room_id),
            floor.sheet + 1,
            floor.rect.x,
            floor.rect.y,
            if floor.enabled { "" } else { "  (off)" }
        );
    }
    println!("\n{} sheet(s)", scene.sheet_count);

    Ok(())
}

fn preview(plan_path: &Path, config: &Config, output: &Path) -> Result<()> {
    let mut session = Session::open(plan_path, config)?;
    let scene = session.rebuild();

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(output, render_canvas_svg(&scene))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Wrote preview of {} sheet(s) to {}",
        scene.sheet_count,
        output.display()
    );

    Ok(())
}
