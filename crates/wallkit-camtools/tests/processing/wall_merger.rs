use proptest::prelude::*;
use wallkit_camtools::wall_merger::{collect_segments, merge_rooms, merge_segments};
use wallkit_core::Room;

fn grid_rooms() -> impl Strategy<Value = Vec<Room>> {
    prop::collection::vec((0u8..20, 0u8..20, 1u8..10, 1u8..10), 1..8).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, w, h))| {
                Room::new(
                    (i + 1).to_string(),
                    "",
                    f64::from(x) * 10.0,
                    f64::from(y) * 10.0,
                    f64::from(w) * 10.0,
                    f64::from(h) * 10.0,
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn every_side_is_covered_by_one_span(rooms in grid_rooms()) {
        let spans = merge_rooms(&rooms);
        for seg in collect_segments(&rooms) {
            let covering = spans
                .iter()
                .filter(|s| {
                    s.orientation == seg.orientation
                        && (s.axis - seg.axis).abs() < 0.05
                        && s.start <= seg.start
                        && s.end >= seg.end
                })
                .count();
            prop_assert_eq!(covering, 1);
        }
    }

    #[test]
    fn merging_twice_changes_nothing(rooms in grid_rooms()) {
        let once = merge_rooms(&rooms);
        let twice = merge_segments(once.iter().map(|s| s.to_segment()).collect());
        let shape = |spans: &[wallkit_camtools::WallSpan]| {
            spans
                .iter()
                .map(|s| (s.orientation, s.axis, s.start, s.end))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(shape(&once), shape(&twice));
    }

    #[test]
    fn spans_on_a_line_stay_apart(rooms in grid_rooms()) {
        let spans = merge_rooms(&rooms);
        for (i, a) in spans.iter().enumerate() {
            for b in &spans[i + 1..] {
                if a.orientation == b.orientation && (a.axis - b.axis).abs() < 0.05 {
                    prop_assert!(a.end + 0.5 < b.start || b.end + 0.5 < a.start);
                }
            }
        }
    }
}

#[test]
fn spans_remember_their_rooms() {
    let rooms = vec![
        Room::new("a", "", 0.0, 0.0, 50.0, 50.0),
        Room::new("b", "", 50.0, 0.0, 50.0, 50.0),
    ];
    let spans = merge_rooms(&rooms);
    let shared = spans
        .iter()
        .find(|s| s.key().as_str() == "v:50.0:0.0:50.0")
        .unwrap();
    let ids: Vec<&str> = shared.segments.iter().map(|s| s.room_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}
