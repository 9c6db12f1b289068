use tempfile::TempDir;
use wallkit_core::{FloorPlan, Opening, OpeningKind, Side, Visibility, WallKey};
use wallkit_settings::{PersistenceError, PlanDocument, DOCUMENT_VERSION};

fn sample_plan() -> FloorPlan {
    let mut plan = FloorPlan::new();
    let living = plan.add_room("Living", 0.0, 0.0, 100.0, 100.0).unwrap();
    let bed = plan.add_room("Bed", 100.0, 0.0, 100.0, 100.0).unwrap();
    plan.insert_opening(Opening::new("1", living, Side::Bottom, 40.0, 15.0, OpeningKind::Door))
        .unwrap();
    plan.insert_opening(Opening::new("2", bed, Side::Right, 30.0, 20.0, OpeningKind::window()))
        .unwrap();
    plan
}

#[test]
fn plan_survives_a_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.json");

    let plan = sample_plan();
    let mut vis = Visibility::new();
    vis.set_wall(WallKey::from("h:0.0:0.0:200.0"), false);
    vis.set_floor("2", false);

    let doc = PlanDocument::from_plan(&plan, &vis, "Ada", true);
    assert!(doc.meta.saved_at.is_some());
    doc.save(&path).unwrap();

    let loaded = PlanDocument::load(&path).unwrap();
    assert_eq!(loaded.version, DOCUMENT_VERSION);
    assert_eq!(loaded.meta.student_name, "Ada");
    assert!(loaded.ui.joined_mode);
    assert_eq!(loaded.features.len(), 2);

    let (restored, restored_vis) = loaded.to_plan();
    assert_eq!(restored.rooms(), plan.rooms());
    assert_eq!(restored.openings(), plan.openings());
    assert_eq!(restored_vis, vis);
    assert_eq!(restored.next_room_id(), 3);
    assert_eq!(restored.next_opening_id(), 3);
}

#[test]
fn editor_payload_with_string_values() {
    let json = r#"{
        "version": 1,
        "meta": { "savedAt": "2024-03-01T10:00:00.000Z", "studentName": "Ada" },
        "counters": { "nextRoomId": 3, "nextFeatureId": 3 },
        "ui": { "joinedMode": true, "currentTool": "room", "lockSizes": false },
        "visibility": {
            "wallVis": { "h:0.0:0.0:150.0": false },
            "floorVis": { "1": false }
        },
        "rooms": [
            { "roomId": "1", "roomName": "Kitchen", "x": "0", "y": "0", "width": "150", "height": "90" },
            { "roomId": "2", "roomName": "", "x": 150, "y": 0, "width": 0, "height": 90 }
        ],
        "features": [
            {
                "featureId": "1", "room": "1", "feature": "door",
                "x": "27", "y": "-3", "width": "15", "height": "6",
                "data": { "side": "top", "wallOffsetPx": "27", "lengthPx": "15", "windowHeadM": "" }
            },
            {
                "featureId": "2", "room": "9", "feature": "window",
                "x": "0", "y": "0", "width": "4", "height": "20",
                "data": { "side": "left", "wallOffsetPx": "0", "lengthPx": "20", "windowHeadM": "2.1" }
            }
        ]
    }"#;

    let doc = PlanDocument::from_json(json).unwrap();
    assert!(doc.meta.saved_at.is_some());
    assert_eq!(doc.ui.current_tool.as_deref(), Some("room"));

    let (plan, vis) = doc.to_plan();
    assert_eq!(plan.rooms().len(), 1);
    assert_eq!(plan.rooms()[0].name, "Kitchen");
    assert_eq!(plan.openings().len(), 1);

    let door = &plan.openings()[0];
    assert!(door.kind.is_door());
    assert_eq!(door.offset, 27.0);
    assert_eq!(door.length, 15.0);

    assert!(!vis.is_wall_enabled(&WallKey::from("h:0.0:0.0:150.0")));
    assert!(!vis.is_floor_enabled("1"));
}

#[test]
fn missing_ids_are_assigned_above_existing_ones() {
    let json = r#"{
        "rooms": [
            { "roomName": "A", "x": 0, "y": 0, "width": 50, "height": 50 },
            { "roomId": "room5", "roomName": "B", "x": 50, "y": 0, "width": 50, "height": 50 }
        ],
        "features": [
            { "room": "room5", "feature": "window",
              "data": { "side": "right", "wallOffsetPx": 5, "lengthPx": 20 } }
        ]
    }"#;

    let (plan, _) = PlanDocument::from_json(json).unwrap().to_plan();
    let ids: Vec<&str> = plan.rooms().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "room5"]);
    assert_eq!(plan.next_room_id(), 7);

    let window = &plan.openings()[0];
    assert_eq!(window.id, "1");
    assert_eq!(window.room_id, "room5");
    assert_eq!(window.kind.window_head_m(), Some(2.0));
}

#[test]
fn oversized_opening_is_clamped_on_restore() {
    let json = r#"{
        "rooms": [ { "roomId": "1", "x": 0, "y": 0, "width": 60, "height": 40 } ],
        "features": [
            { "featureId": "1", "room": "1", "feature": "door",
              "data": { "side": "bottom", "wallOffsetPx": 50, "lengthPx": 30 } }
        ]
    }"#;

    let (plan, _) = PlanDocument::from_json(json).unwrap().to_plan();
    let door = &plan.openings()[0];
    assert_eq!(door.length, 30.0);
    assert_eq!(door.offset, 30.0);
}

#[test]
fn newer_documents_are_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(&path, r#"{ "version": 3, "rooms": [] }"#).unwrap();

    assert!(matches!(
        PlanDocument::load(&path),
        Err(PersistenceError::UnsupportedVersion(3))
    ));
}
