use super::*;
use crate::foundation::core::Point;
use kurbo::Affine;

const ALL: [RotationAngle; 4] = [
    RotationAngle::Deg0,
    RotationAngle::Deg90,
    RotationAngle::Deg180,
    RotationAngle::Deg270,
];

fn pt(xy: XY) -> Point {
    Point::new(xy.x as f64, xy.y as f64)
}

/// Affine taking map coordinates to vacuum coordinates, fitted on three corners.
fn map_to_vacuum(points: &[CalibrationPoint; 4], w: f64, h: f64) -> Affine {
    let v0 = pt(points[0].vacuum);
    let dx = pt(points[1].vacuum) - v0;
    let dy = pt(points[3].vacuum) - v0;
    Affine::new([dx.x / w, dx.y / w, dy.x / h, dy.y / h, v0.x, v0.y])
}

#[test]
fn unrotated_points_follow_crop_corners() {
    let crop = CropBox::centered(200, 100, 25).unwrap();
    let pts = calibration_points(&crop, RotationAngle::Deg0);
    assert_eq!(pts[0].vacuum, XY { x: 88, y: 38 });
    assert_eq!(pts[2].vacuum, XY { x: 112, y: 62 });
    assert_eq!(pts[1].map, XY { x: 24, y: 0 });
    assert_eq!(pts[3].map, XY { x: 0, y: 24 });
}

#[test]
fn quarter_turn_shifts_vacuum_corners_left() {
    let crop = CropBox::centered(200, 100, 25).unwrap();
    let base = calibration_points(&crop, RotationAngle::Deg0);
    for rot in ALL {
        let pts = calibration_points(&crop, rot);
        let k = usize::from(rot.quarter_turns());
        for i in 0..4 {
            assert_eq!(pts[i].vacuum, base[(i + k) % 4].vacuum, "{rot:?} corner {i}");
            assert_eq!(pts[i].map, base[i].map);
        }
    }
}

#[test]
fn implied_affine_round_trips_for_every_rotation() {
    let crop = CropBox::centered(640, 480, 60).unwrap();
    let (w, h) = (crop.width() as f64, crop.height() as f64);
    for rot in ALL {
        let pts = calibration_points(&crop, rot);
        let fwd = map_to_vacuum(&pts, w, h);
        let inv = fwd.inverse();
        for p in &pts {
            let v = fwd * pt(p.map);
            assert!((v - pt(p.vacuum)).hypot() < 1e-9, "{rot:?}: {v:?} vs {:?}", p.vacuum);
            let back = inv * pt(p.vacuum);
            assert!((back - pt(p.map)).hypot() < 1e-9, "{rot:?}: {back:?}");
        }
    }
}

#[test]
fn rotation_accepts_only_quarter_turns() {
    for d in [0, 90, 180, 270] {
        assert_eq!(RotationAngle::from_degrees(d).unwrap().degrees(), d);
    }
    for d in [45, -90, 360, 1] {
        assert!(matches!(
            RotationAngle::from_degrees(d),
            Err(MapError::InvalidRotation(x)) if x == d
        ));
    }
}

#[test]
fn rotation_serde_uses_degrees() {
    let r: RotationAngle = serde_json::from_str("180").unwrap();
    assert_eq!(r, RotationAngle::Deg180);
    assert_eq!(serde_json::to_string(&RotationAngle::Deg270).unwrap(), "270");
    assert!(serde_json::from_str::<RotationAngle>("45").is_err());
}
