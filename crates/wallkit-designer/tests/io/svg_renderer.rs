use wallkit_camtools::{rebuild, UnrollParameters};
use wallkit_core::{FloorPlan, Opening, OpeningKind, Room, Side, Visibility};
use wallkit_designer::{render_canvas_svg, render_sheet_svg, ExportError};

fn sample_scene() -> wallkit_camtools::DrawableScene {
    let plan = FloorPlan::from_parts(
        vec![Room::new("1", "Hall", 0.0, 0.0, 100.0, 60.0)],
        vec![Opening::new("1", "1", Side::Top, 20.0, 13.5, OpeningKind::Door)],
    );
    let params = UnrollParameters {
        student_name: "Lin".into(),
        thickness: 3.0,
        joined_mode: true,
        ..UnrollParameters::default()
    };
    let mut vis = Visibility::new();
    rebuild(&plan, &params, &mut vis)
}

#[test]
fn sheet_document_layout() {
    let svg = render_sheet_svg(&sample_scene(), 0).unwrap();
    assert!(svg.starts_with("<?xml version=\"1.0\" standalone=\"no\"?>\n<svg"));
    assert!(svg.contains("width=\"730\" height=\"420\" viewBox=\"0 0 730 420\""));
    assert!(svg.contains("<g transform=\"translate(0, -0)\">"));
    assert!(svg.trim_end().ends_with("</g>\n</svg>"));
}

#[test]
fn sheet_holds_cuts_and_labels_only() {
    let svg = render_sheet_svg(&sample_scene(), 0).unwrap();
    // four walls and one floor patch
    assert_eq!(svg.matches("<path ").count(), 4);
    assert_eq!(svg.matches("<text ").count(), 5);
    // one door hole plus the floor outline
    assert_eq!(svg.matches("<rect ").count(), 2);
    assert!(!svg.contains("rgba(0,0,0,0)"));
    assert!(svg.contains("PHS Lin"));
    assert!(svg.contains("Hall top"));
    assert!(svg.contains("Hall floor"));
    assert!(svg.contains("stroke=\"rgb(255,0,0)\" stroke-width=\"1\""));
}

#[test]
fn sheet_index_is_checked() {
    let scene = sample_scene();
    let err = render_sheet_svg(&scene, scene.sheet_count).unwrap_err();
    assert!(matches!(err, ExportError::SheetOutOfRange { .. }));
}

#[test]
fn preview_includes_hit_areas() {
    let scene = sample_scene();
    let svg = render_canvas_svg(&scene);
    assert!(svg.contains("rgba(0,0,0,0)"));
    assert_eq!(svg.matches("pointer-events=\"stroke\"").count(), 4);
    assert!(svg.contains(&format!(
        "viewBox=\"0 0 730 {}\"",
        420 * scene.sheet_count
    )));
}
