use super::*;
use serde_json::json;

fn segment(id: serde_json::Value, name: &str, pixels: serde_json::Value) -> serde_json::Value {
    json!({
        "__class": "MapLayer",
        "type": "segment",
        "metaData": {"segmentId": id, "name": name},
        "compressedPixels": pixels,
    })
}

#[test]
fn room_box_spans_runs_scaled_by_pixel_size() {
    let root = json!({"layers": [
        {"__class": "MapLayer", "type": "floor", "compressedPixels": [0, 0, 5]},
        segment(json!("16"), "Kitchen", json!([10, 4, 3, 12, 8, 1])),
    ]});
    let rooms = extract_rooms(&root, 5);
    assert_eq!(rooms.len(), 1);
    let r = &rooms[0];
    assert_eq!(r.id, "16");
    assert_eq!(r.name.as_deref(), Some("Kitchen"));
    assert_eq!((r.left, r.top, r.right, r.bottom), (50, 20, 60, 40));
    assert_eq!(r.outline[2], (60, 40));
    assert_eq!(r.center, (55, 30));
}

#[test]
fn numeric_segment_ids_are_stringified() {
    let root = json!({"layers": [segment(json!(3), "Hall", json!([0, 0, 1]))]});
    assert_eq!(extract_rooms(&root, 1)[0].id, "3");
}

#[test]
fn empty_segments_and_missing_layers_are_skipped() {
    assert!(extract_rooms(&json!({}), 5).is_empty());
    let root = json!({"layers": [segment(json!("1"), "Void", json!([]))]});
    assert!(extract_rooms(&root, 5).is_empty());
}

#[test]
fn tracker_prefers_last_room_then_scans() {
    let root = json!({"layers": [
        segment(json!("1"), "A", json!([0, 0, 10, 0, 10, 10])),
        segment(json!("2"), "B", json!([5, 5, 10, 5, 15, 10])),
    ]});
    let rooms = extract_rooms(&root, 1);
    let mut tracker = RoomTracker::default();

    assert_eq!(tracker.locate(&rooms, 12, 12).map(|r| r.id.as_str()), Some("2"));
    // (7, 7) lies in both boxes; the remembered room wins.
    assert_eq!(tracker.locate(&rooms, 7, 7).map(|r| r.id.as_str()), Some("2"));
    assert_eq!(tracker.locate(&rooms, 1, 1).map(|r| r.id.as_str()), Some("1"));
    assert_eq!(tracker.locate(&rooms, 7, 7).map(|r| r.id.as_str()), Some("1"));
    assert!(tracker.locate(&rooms, 100, 100).is_none());

    tracker.reset();
    assert_eq!(tracker.locate(&rooms, 7, 7).map(|r| r.id.as_str()), Some("1"));
}

#[test]
fn tracker_keeps_last_room_across_a_miss() {
    let root = json!({"layers": [
        segment(json!("1"), "A", json!([0, 0, 10, 0, 10, 10])),
        segment(json!("2"), "B", json!([5, 5, 10, 5, 15, 10])),
    ]});
    let rooms = extract_rooms(&root, 1);
    let mut tracker = RoomTracker::default();

    assert_eq!(tracker.locate(&rooms, 12, 12).map(|r| r.id.as_str()), Some("2"));
    assert!(tracker.locate(&rooms, 500, 500).is_none());
    // Still remembered, so the overlap resolves to "2" rather than the first box.
    assert_eq!(tracker.locate(&rooms, 7, 7).map(|r| r.id.as_str()), Some("2"));
}

#[test]
fn extreme_runs_saturate_instead_of_overflowing() {
    let root = json!({"layers": [
        segment(json!("far"), "Far", json!([i64::MAX - 1, i64::MIN, i64::MAX])),
    ]});
    let rooms = extract_rooms(&root, 5);
    assert_eq!(rooms.len(), 1);
    let r = &rooms[0];
    assert_eq!((r.left, r.top, r.right, r.bottom), (i64::MAX, i64::MIN, i64::MAX, i64::MIN));
    assert_eq!(r.center, (i64::MAX, i64::MIN));
    assert!(r.contains(i64::MAX, i64::MIN));
}
