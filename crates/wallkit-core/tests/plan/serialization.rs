use serde_json::json;
use wallkit_core::{FloorPlan, Opening, OpeningKind, Room, Side};

#[test]
fn opening_kind_is_flattened() {
    let window = Opening::new("3", "1", Side::Left, 5.0, 20.0, OpeningKind::window());
    let value = serde_json::to_value(&window).unwrap();
    assert_eq!(value["kind"], "window");
    assert_eq!(value["head_m"], 2.0);
    assert_eq!(value["side"], "left");

    let door = Opening::new("4", "1", Side::Top, 5.0, 20.0, OpeningKind::Door);
    let value = serde_json::to_value(&door).unwrap();
    assert_eq!(value["kind"], "door");
    assert!(value.get("head_m").is_none());
}

#[test]
fn plan_from_json_allocates_fresh_ids() {
    let value = json!({
        "rooms": [
            { "id": "4", "name": "Study", "x": 0.0, "y": 0.0, "width": 60.0, "height": 40.0 }
        ],
        "openings": [
            { "id": "9", "room_id": "4", "side": "top", "offset": 10.0, "length": 15.0, "kind": "door" }
        ]
    });
    let mut plan: FloorPlan = serde_json::from_value(value).unwrap();
    assert_eq!(plan.rooms()[0], Room::new("4", "Study", 0.0, 0.0, 60.0, 40.0));
    assert_eq!(plan.openings()[0].kind, OpeningKind::Door);

    assert_eq!(plan.add_room("", 60.0, 0.0, 20.0, 40.0).unwrap(), "5");
    let id = plan
        .place_opening("5", OpeningKind::Door, wallkit_core::PlanPoint::new(70.0, 0.0))
        .unwrap();
    assert_eq!(id, "10");
}
