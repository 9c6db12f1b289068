use proptest::prelude::*;
use wallkit_camtools::{rebuild, SheetLayout, SheetUsage, UnrollParameters, WallPacker};
use wallkit_core::{FloorPlan, Room, Visibility};

proptest! {
    #[test]
    fn walls_never_cross_a_sheet_edge(
        widths in prop::collection::vec(1.0f64..650.0, 1..60),
        wall_height in 10.0f64..200.0,
        gap in 5.0f64..12.0,
    ) {
        let layout = SheetLayout::default();
        let mut usage = SheetUsage::new();
        let mut packer = WallPacker::new(layout, wall_height, gap, &mut usage);

        for width in widths {
            let (x, y) = packer.place(width, &mut usage);
            let sheet = packer.sheet_index();
            let top = layout.sheet_top(sheet);

            prop_assert!(x >= layout.side_margin);
            prop_assert!(x + width + gap <= layout.max_row_width() + 1e-9);
            prop_assert!(y >= top + layout.top_padding - 1e-9);
            prop_assert!(y + wall_height + layout.bottom_guard <= top + layout.sheet_height + 1e-9);
            prop_assert!(usage.contains(sheet));
        }
    }
}

#[test]
fn many_rooms_spill_onto_more_sheets() {
    let rooms: Vec<Room> = (0..40)
        .map(|i| {
            let offset = f64::from(i) * 1000.0;
            Room::new((i + 1).to_string(), "", offset, offset, 300.0, 200.0)
        })
        .collect();
    let plan = FloorPlan::from_parts(rooms, vec![]);
    let mut vis = Visibility::new();
    let scene = rebuild(&plan, &UnrollParameters::default(), &mut vis);

    assert_eq!(scene.walls.len(), 160);
    assert!(scene.sheet_count > 1);
    assert_eq!(scene.total_height(), 420.0 * scene.sheet_count as f64);
    let last_sheet = scene.walls.iter().map(|w| w.sheet).max().unwrap();
    assert_eq!(last_sheet + 1, scene.sheet_count);
    for wall in &scene.walls {
        let top = wall.sheet as f64 * 420.0;
        assert!(wall.rect.y >= top && wall.rect.bottom() <= top + 420.0);
    }
}
