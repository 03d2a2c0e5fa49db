use super::*;
use serde_json::json;

fn minimal() -> Value {
    json!({
        "__class": "ValetudoMap",
        "metaData": {"nonce": "abc-123"},
        "size": {"x": 200, "y": 100},
        "pixelSize": 5,
        "layers": [
            {"__class": "MapLayer", "type": "floor", "compressedPixels": [1, 1, 4, 2, 3, 1]},
            {"__class": "MapLayer", "type": "wall", "compressedPixels": [0, 0, 2]},
        ],
        "entities": [
            {"__class": "PathMapEntity", "type": "path", "points": [10, 10, 20, 10, 20, 30]},
            {
                "__class": "PointMapEntity",
                "type": "robot_position",
                "points": [50, 40],
                "metaData": {"angle": 135}
            },
            {"__class": "PointMapEntity", "type": "charger_location", "points": [60, 45]},
        ],
    })
}

#[test]
fn parses_required_and_optional_fields() {
    let snap = MapSnapshot::parse(&minimal()).unwrap();
    assert_eq!(snap.size.width, 200);
    assert_eq!(snap.size.center, (100, 50));
    assert_eq!(snap.pixel_size, 5);
    assert_eq!(snap.nonce.as_deref(), Some("abc-123"));
    assert_eq!(snap.floor.len(), 2);
    assert_eq!(snap.walls, vec![PixelRun { x: 0, y: 0, len: 2 }]);
    assert_eq!(snap.path, vec![(10, 10), (20, 10), (20, 30)]);
    assert_eq!(
        snap.robot,
        RobotPosition {
            x: 50,
            y: 40,
            angle: 135.0,
            in_room: None
        }
    );
    assert_eq!(snap.charger, Some(ChargerPosition { x: 60, y: 45 }));
    assert!(snap.go_to.is_none());
    assert!(snap.predicted_path.is_empty());
    assert!(snap.active_zones.is_empty());
}

#[test]
fn missing_robot_is_incomplete() {
    let mut m = minimal();
    m["entities"].as_array_mut().unwrap().remove(1);
    let err = MapSnapshot::parse(&m).unwrap_err();
    assert!(matches!(err, MapError::IncompleteMap(_)), "{err}");
    assert!(err.is_data_error());
}

#[test]
fn missing_size_or_pixel_size_is_incomplete() {
    for field in ["size", "pixelSize", "layers"] {
        let mut m = minimal();
        m.as_object_mut().unwrap().remove(field);
        assert!(
            matches!(MapSnapshot::parse(&m), Err(MapError::IncompleteMap(_))),
            "{field}"
        );
    }
    let mut m = minimal();
    m["pixelSize"] = json!(0);
    assert!(matches!(MapSnapshot::parse(&m), Err(MapError::IncompleteMap(_))));
}

#[test]
fn missing_wall_layer_is_incomplete() {
    let mut m = minimal();
    m["layers"].as_array_mut().unwrap().truncate(1);
    let err = MapSnapshot::parse(&m).unwrap_err();
    assert!(err.to_string().contains("layers[1]"), "{err}");
}

#[test]
fn robot_without_angle_faces_zero() {
    let mut m = minimal();
    m["entities"][1]["metaData"] = json!({});
    assert_eq!(MapSnapshot::parse(&m).unwrap().robot.angle, 0.0);
}

#[test]
fn non_string_nonce_is_kept_as_json_text() {
    let mut m = minimal();
    m["metaData"]["nonce"] = json!(42);
    assert_eq!(MapSnapshot::parse(&m).unwrap().nonce.as_deref(), Some("42"));
    m["metaData"] = json!({});
    assert_eq!(MapSnapshot::parse(&m).unwrap().nonce, None);
}

#[test]
fn restricted_areas_and_obstacles_are_collected() {
    let mut m = minimal();
    let entities = m["entities"].as_array_mut().unwrap();
    entities.push(json!({"__class": "PolygonMapEntity", "type": "active_zone", "points": [0, 0, 10, 0, 10, 10, 0, 10]}));
    entities.push(json!({"__class": "PolygonMapEntity", "type": "no_go_area", "points": [1, 1, 5, 1, 5, 5]}));
    entities.push(json!({"__class": "PolygonMapEntity", "type": "no_mop_area", "points": [2, 2, 6, 2, 6, 6]}));
    entities.push(json!({"__class": "LineMapEntity", "type": "virtual_wall", "points": [3, 3, 30, 3]}));
    entities.push(json!({"__class": "PointMapEntity", "type": "go_to_target", "points": [70, 20]}));
    entities.push(json!({"__class": "PathMapEntity", "type": "predicted_path", "points": [50, 40, 70, 20]}));
    entities.push(json!({"__class": "PointMapEntity", "type": "obstacle", "points": [8, 9], "metaData": {"label": "cable"}}));
    entities.push(json!({"__class": "PointMapEntity", "type": "obstacle", "points": [1, 1]}));

    let snap = MapSnapshot::parse(&m).unwrap();
    assert_eq!(snap.active_zones, vec![vec![(0, 0), (10, 0), (10, 10), (0, 10)]]);
    assert_eq!(snap.no_go_areas.len(), 1);
    assert_eq!(snap.no_mop_areas.len(), 1);
    assert_eq!(snap.virtual_walls, vec![vec![(3, 3), (30, 3)]]);
    assert_eq!(snap.go_to, Some((70, 20)));
    assert_eq!(snap.predicted_path, vec![(50, 40), (70, 20)]);
    assert_eq!(
        snap.obstacles,
        vec![Obstacle {
            label: "cable".into(),
            x: 8,
            y: 9
        }]
    );
}

#[test]
fn fingerprint_tracks_base_inputs_only() {
    let base = MapSnapshot::parse(&minimal()).unwrap();

    let mut moved = minimal();
    moved["entities"][1]["points"] = json!([90, 80]);
    moved["entities"][0]["points"] = json!([1, 1, 2, 2]);
    let moved = MapSnapshot::parse(&moved).unwrap();
    assert_eq!(base.base_fingerprint(), moved.base_fingerprint());

    let mut edited = minimal();
    edited["layers"][1]["compressedPixels"] = json!([0, 0, 3]);
    let edited = MapSnapshot::parse(&edited).unwrap();
    assert_ne!(base.base_fingerprint(), edited.base_fingerprint());

    let mut with_obstacle = minimal();
    with_obstacle["entities"].as_array_mut().unwrap().push(json!({
        "__class": "PointMapEntity",
        "type": "obstacle",
        "points": [30, 30],
        "metaData": {"label": "shoe"}
    }));
    let with_obstacle = MapSnapshot::parse(&with_obstacle).unwrap();
    assert_ne!(base.base_fingerprint(), with_obstacle.base_fingerprint());

    let mut no_charger = minimal();
    no_charger["entities"].as_array_mut().unwrap().remove(2);
    let no_charger = MapSnapshot::parse(&no_charger).unwrap();
    assert_ne!(base.base_fingerprint(), no_charger.base_fingerprint());
}
