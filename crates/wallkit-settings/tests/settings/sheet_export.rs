//! Plan document to sheet files, the way the `export` command runs it

use tempfile::TempDir;
use wallkit_camtools::{ShapeKind, WallUnroller};
use wallkit_core::{FloorPlan, Room, Visibility};
use wallkit_designer::write_sheets;
use wallkit_settings::{Config, PlanDocument, VisibilityMaps};

fn saved_plan(dir: &TempDir) -> std::path::PathBuf {
    let plan = FloorPlan::from_parts(
        vec![
            Room::new("1", "Living", 0.0, 0.0, 100.0, 100.0),
            Room::new("2", "Bed", 100.0, 0.0, 100.0, 100.0),
        ],
        vec![],
    );
    let path = dir.path().join("plan.json");
    PlanDocument::from_plan(&plan, &Visibility::new(), "Ada", false)
        .save(&path)
        .unwrap();
    path
}

#[test]
fn saved_plan_exports_one_sheet() {
    let dir = TempDir::new().unwrap();
    let path = saved_plan(&dir);

    let doc = PlanDocument::load(&path).unwrap();
    let (plan, mut vis) = doc.to_plan();
    let config = Config::new();
    let unroller = WallUnroller::new(config.to_unroll_parameters()).unwrap();
    let scene = unroller.rebuild(&plan, &mut vis);
    assert_eq!(scene.walls.len(), 5);
    assert_eq!(scene.sheet_count, 1);

    let out = dir.path().join("sheets");
    let written = write_sheets(&scene, &out, &config.export.file_prefix).unwrap();
    assert_eq!(written, vec![out.join("laser_sheet_1.svg")]);

    let svg = std::fs::read_to_string(&written[0]).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert_eq!(svg.matches("stroke=\"rgb(255,0,0)\"").count(), 5);
}

#[test]
fn wall_toggles_survive_a_save() {
    let dir = TempDir::new().unwrap();
    let path = saved_plan(&dir);

    let mut doc = PlanDocument::load(&path).unwrap();
    let (plan, mut vis) = doc.to_plan();
    let unroller = WallUnroller::new(Config::new().to_unroll_parameters()).unwrap();
    let key = unroller.rebuild(&plan, &mut vis).walls[2].key.clone();
    let scene = unroller.toggle_wall(&plan, &mut vis, &key);
    assert!(!scene.walls[2].enabled);

    doc.visibility = VisibilityMaps::from_visibility(&vis);
    doc.save(&path).unwrap();

    let (plan, mut vis) = PlanDocument::load(&path).unwrap().to_plan();
    let scene = unroller.rebuild(&plan, &mut vis);
    assert!(!scene.walls[2].enabled);
    let cut_outlines = scene
        .exportable_shapes()
        .filter(|s| s.kind == ShapeKind::WallOutline)
        .count();
    assert_eq!(cut_outlines, 4);
}
