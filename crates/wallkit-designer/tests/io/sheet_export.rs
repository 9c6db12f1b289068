use proptest::prelude::*;
use wallkit_camtools::{
    rebuild, DrawableScene, Geometry, Rect, SceneShape, ShapeKind, UnrollParameters,
};
use wallkit_core::{FloorPlan, Room, Visibility};
use wallkit_designer::select_sheet_shapes;

fn hole(y: f64, height: f64) -> SceneShape {
    SceneShape {
        kind: ShapeKind::Hole,
        geometry: Geometry::Rect {
            rect: Rect::new(10.0, y, 20.0, height),
        },
        exportable: true,
        stroke_width: 1.0,
        toggle: None,
    }
}

fn scattered_rooms() -> impl Strategy<Value = Vec<Room>> {
    prop::collection::vec((1u16..400, 1u16..300), 1..40).prop_map(|sizes| {
        sizes
            .into_iter()
            .enumerate()
            .map(|(i, (w, h))| {
                let offset = i as f64 * 1000.0;
                Room::new(
                    (i + 1).to_string(),
                    "",
                    offset,
                    offset,
                    f64::from(w),
                    f64::from(h),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn every_exportable_shape_lands_on_a_sheet(rooms in scattered_rooms(), joined in any::<bool>()) {
        let params = UnrollParameters { joined_mode: joined, ..UnrollParameters::default() };
        let mut vis = Visibility::new();
        let scene = rebuild(&FloorPlan::from_parts(rooms, vec![]), &params, &mut vis);

        let mut seen = vec![0usize; scene.shapes.len()];
        for index in 0..scene.sheet_count {
            let top = index as f64 * scene.sheet_height;
            for shape in select_sheet_shapes(&scene, index) {
                prop_assert!(shape.exportable);
                let b = shape.bounds().unwrap();
                prop_assert!(b.max_y > top && b.min_y < top + scene.sheet_height);
                let pos = scene.shapes.iter().position(|s| std::ptr::eq(s, shape)).unwrap();
                seen[pos] += 1;
            }
        }
        for (shape, count) in scene.shapes.iter().zip(&seen) {
            if shape.exportable {
                prop_assert!(*count >= 1);
            } else {
                prop_assert_eq!(*count, 0);
            }
        }
    }
}

#[test]
fn straddling_shape_goes_to_both_sheets() {
    let mut scene = DrawableScene::empty(730.0, 420.0);
    scene.sheet_count = 2;
    scene.shapes.push(hole(400.0, 40.0));
    scene.shapes.push(hole(100.0, 20.0));
    scene.shapes.push(hole(500.0, 20.0));

    assert_eq!(select_sheet_shapes(&scene, 0).len(), 2);
    assert_eq!(select_sheet_shapes(&scene, 1).len(), 2);
}

#[test]
fn shape_ending_on_the_edge_stays_on_its_sheet() {
    let mut scene = DrawableScene::empty(730.0, 420.0);
    scene.sheet_count = 2;
    scene.shapes.push(hole(380.0, 40.0));

    assert_eq!(select_sheet_shapes(&scene, 0).len(), 1);
    assert!(select_sheet_shapes(&scene, 1).is_empty());
}

#[test]
fn hidden_shapes_are_not_exported() {
    let mut scene = DrawableScene::empty(730.0, 420.0);
    let mut shape = hole(10.0, 10.0);
    shape.exportable = false;
    scene.shapes.push(shape);
    assert!(select_sheet_shapes(&scene, 0).is_empty());
}
