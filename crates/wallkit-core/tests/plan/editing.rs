use wallkit_core::{
    m_to_px, Error, FloorPlan, Opening, OpeningEdit, OpeningKind, PlanError, PlanPoint, Side,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn one_room() -> (FloorPlan, String) {
    let mut plan = FloorPlan::new();
    let id = plan.add_room("Hall", 0.0, 0.0, 100.0, 60.0).unwrap();
    (plan, id)
}

#[test]
fn room_ids_count_up() {
    let mut plan = FloorPlan::new();
    assert_eq!(plan.add_room("", 0.0, 0.0, 10.0, 10.0).unwrap(), "1");
    assert_eq!(plan.add_room("", 10.0, 0.0, 10.0, 10.0).unwrap(), "2");
    plan.remove_room("2").unwrap();
    assert_eq!(plan.add_room("", 10.0, 0.0, 10.0, 10.0).unwrap(), "3");
    assert_eq!(plan.room_display_name("3"), "Room 3");
    assert_eq!(plan.room_display_name("42"), "Room 42");
}

#[test]
fn invalid_rooms_are_rejected() {
    let mut plan = FloorPlan::new();
    assert!(plan.add_room("", 0.0, 0.0, 0.0, 10.0).is_err());
    assert!(plan.add_room("", f64::NAN, 0.0, 10.0, 10.0).is_err());
    assert!(plan.rooms().is_empty());
}

#[test]
fn removing_a_room_removes_its_openings() {
    let (mut plan, hall) = one_room();
    let bath = plan.add_room("Bath", 100.0, 0.0, 40.0, 60.0).unwrap();
    plan.place_opening(&hall, OpeningKind::Door, PlanPoint::new(50.0, 0.0))
        .unwrap();
    plan.place_opening(&hall, OpeningKind::window(), PlanPoint::new(0.0, 30.0))
        .unwrap();
    let kept = plan
        .place_opening(&bath, OpeningKind::Door, PlanPoint::new(120.0, 60.0))
        .unwrap();

    plan.remove_room(&hall).unwrap();
    assert_eq!(plan.rooms().len(), 1);
    assert_eq!(plan.openings().len(), 1);
    assert_eq!(plan.openings()[0].id, kept);

    assert!(matches!(
        plan.remove_room(&hall),
        Err(Error::Plan(PlanError::UnknownRoom { .. }))
    ));
}

#[test]
fn opening_lands_on_the_nearest_wall() {
    let (mut plan, hall) = one_room();
    let id = plan
        .place_opening(&hall, OpeningKind::Door, PlanPoint::new(50.0, 58.0))
        .unwrap();
    let door = plan.opening(&id).unwrap();
    assert_eq!(door.side, Side::Bottom);
    assert!(approx(door.length, m_to_px(0.9)));
    assert!(approx(door.offset, 50.0 - m_to_px(0.9) / 2.0));
}

#[test]
fn opening_near_a_corner_stays_on_the_wall() {
    let (mut plan, hall) = one_room();
    // equally close to the bottom and right walls
    let id = plan
        .place_opening(&hall, OpeningKind::window(), PlanPoint::new(98.0, 58.0))
        .unwrap();
    let window = plan.opening(&id).unwrap();
    assert_eq!(window.side, Side::Bottom);
    assert!(approx(window.offset + window.length, 100.0));
    assert_eq!(window.kind.window_head_m(), Some(2.0));
}

#[test]
fn window_without_head_gets_the_default() {
    let (mut plan, hall) = one_room();
    let id = plan
        .place_opening(
            &hall,
            OpeningKind::Window { head_m: None },
            PlanPoint::new(30.0, 0.0),
        )
        .unwrap();
    assert_eq!(
        plan.opening(&id).unwrap().kind,
        OpeningKind::Window { head_m: Some(2.0) }
    );
}

#[test]
fn edits_are_clamped_into_the_wall() {
    let (mut plan, hall) = one_room();
    let id = plan
        .place_opening(&hall, OpeningKind::Door, PlanPoint::new(50.0, 0.0))
        .unwrap();

    // 10 m is wider than the 100 px wall
    let edit = OpeningEdit {
        width_m: 10.0,
        offset_m: 2.0,
        head_m: None,
    };
    plan.edit_opening(&id, edit, 2.4).unwrap();
    let door = plan.opening(&id).unwrap();
    assert_eq!(door.length, 100.0);
    assert_eq!(door.offset, 0.0);

    let edit = OpeningEdit {
        width_m: 0.3,
        offset_m: -4.0,
        head_m: None,
    };
    plan.edit_opening(&id, edit, 2.4).unwrap();
    let door = plan.opening(&id).unwrap();
    assert_eq!(door.length, 10.0);
    assert_eq!(door.offset, 0.0);
}

#[test]
fn rejected_edits_leave_the_opening_alone() {
    let (mut plan, hall) = one_room();
    let id = plan
        .place_opening(&hall, OpeningKind::Door, PlanPoint::new(50.0, 0.0))
        .unwrap();
    let before = plan.opening(&id).unwrap().clone();

    let edit = OpeningEdit {
        width_m: 0.0,
        offset_m: 1.0,
        head_m: None,
    };
    let err = plan.edit_opening(&id, edit, 2.4).unwrap_err();
    assert!(err.is_plan_error());
    assert_eq!(plan.opening(&id), Some(&before));

    assert!(plan.edit_opening("missing", OpeningEdit { width_m: 1.0, ..edit }, 2.4).is_err());
}

#[test]
fn window_head_is_capped_at_the_wall_height() {
    let (mut plan, hall) = one_room();
    let id = plan
        .place_opening(&hall, OpeningKind::window(), PlanPoint::new(0.0, 30.0))
        .unwrap();

    let mut edit = OpeningEdit {
        width_m: 1.0,
        offset_m: 0.5,
        head_m: Some(5.0),
    };
    plan.edit_opening(&id, edit, 2.4).unwrap();
    assert_eq!(plan.opening(&id).unwrap().kind.window_head_m(), Some(2.4));

    edit.head_m = Some(-1.0);
    plan.edit_opening(&id, edit, 2.4).unwrap();
    assert_eq!(plan.opening(&id).unwrap().kind.window_head_m(), Some(2.0));
}

#[test]
fn resizing_pulls_openings_back_inside() {
    let (mut plan, hall) = one_room();
    plan.insert_opening(Opening::new("1", hall.clone(), Side::Top, 80.0, 15.0, OpeningKind::Door))
        .unwrap();
    plan.insert_opening(Opening::new("2", hall.clone(), Side::Right, 40.0, 15.0, OpeningKind::window()))
        .unwrap();

    plan.resize_room(&hall, 50.0, 30.0).unwrap();
    let top = plan.opening("1").unwrap();
    assert_eq!((top.offset, top.length), (35.0, 15.0));
    let right = plan.opening("2").unwrap();
    assert_eq!((right.offset, right.length), (15.0, 15.0));

    assert!(plan.resize_room(&hall, -1.0, 30.0).is_err());
    plan.move_room(&hall, 25.0, 5.0).unwrap();
    assert_eq!(plan.room(&hall).unwrap().x, 25.0);
}

#[test]
fn duplicate_ids_are_refused() {
    let (mut plan, hall) = one_room();
    plan.insert_opening(Opening::new("7", hall.clone(), Side::Top, 0.0, 20.0, OpeningKind::Door))
        .unwrap();
    assert!(matches!(
        plan.insert_opening(Opening::new("7", hall.clone(), Side::Left, 0.0, 20.0, OpeningKind::Door)),
        Err(Error::Plan(PlanError::DuplicateOpening { .. }))
    ));
    assert_eq!(plan.next_opening_id(), 8);

    let err = plan
        .insert_opening(Opening::new("8", "nowhere", Side::Top, 0.0, 20.0, OpeningKind::Door))
        .unwrap_err();
    assert!(matches!(err, Error::Plan(PlanError::UnknownRoom { .. })));
}
