use super::*;

#[test]
fn premul_of_opaque_is_identity() {
    let c = Rgba8Premul::from_straight_rgba(12, 200, 99, 255);
    assert_eq!(c.to_array(), [12, 200, 99, 255]);
}

#[test]
fn premul_scales_channels_by_alpha() {
    let c = Rgba8Premul::from_straight([0, 0, 255, 64]);
    assert_eq!(c.to_array(), [0, 0, 64, 64]);
    assert_eq!(Rgba8Premul::from_straight([255, 255, 255, 0]), Rgba8Premul::transparent());
}

#[test]
fn outline_halves_rgb_and_is_opaque() {
    assert_eq!(outline_of([255, 255, 204, 10]), [127, 127, 102, 255]);
}

#[test]
fn map_size_center_uses_integer_division() {
    let s = MapSize::new(5, 8).unwrap();
    assert_eq!(s.center, (2, 4));
}

#[test]
fn map_size_rejects_zero() {
    assert!(matches!(
        MapSize::new(0, 10),
        Err(MapError::IncompleteMap(_))
    ));
}
