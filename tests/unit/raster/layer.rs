use super::*;

fn red() -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(255, 0, 0, 255)
}

#[test]
fn filled_layer_has_uniform_pixels() {
    let bg = Rgba8Premul::from_straight_rgba(0, 125, 255, 255);
    let l = RasterLayer::filled(3, 2, bg).unwrap();
    assert_eq!(l.data.len(), 24);
    assert!(l.data.chunks_exact(4).all(|px| px == [0, 125, 255, 255]));
}

#[test]
fn fill_rect_clips_to_bounds() {
    let mut l = RasterLayer::new(4, 4).unwrap();
    let written = l.fill_rect(-2, -2, 2, 2, red());
    assert_eq!(written, 4);
    assert_eq!(l.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(l.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(l.pixel(2, 2), Some([0, 0, 0, 0]));

    assert_eq!(l.fill_rect(10, 10, 20, 20, red()), 0);
    assert_eq!(l.fill_rect(3, 0, 3, 4, red()), 0);
}

#[test]
fn put_pixel_outside_is_ignored() {
    let mut l = RasterLayer::new(2, 2).unwrap();
    l.put_pixel(-1, 0, red());
    l.put_pixel(2, 1, red());
    assert!(l.data.iter().all(|&b| b == 0));
    l.put_pixel(1, 1, red());
    assert_eq!(l.pixel(1, 1), Some([255, 0, 0, 255]));
}

#[test]
fn sub_layer_copies_region() {
    let mut l = RasterLayer::new(4, 4).unwrap();
    l.put_pixel(2, 1, red());
    let s = l.sub_layer(1, 1, 3, 3).unwrap();
    assert_eq!((s.width, s.height), (2, 2));
    assert_eq!(s.pixel(1, 0), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert!(l.sub_layer(0, 0, 5, 4).is_err());
}

#[test]
fn from_premul_bytes_checks_length() {
    assert!(RasterLayer::from_premul_bytes(2, 2, vec![0; 15]).is_err());
    assert!(RasterLayer::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn rgba_image_is_unpremultiplied() {
    let mut l = RasterLayer::new(1, 1).unwrap();
    l.put_pixel(0, 0, Rgba8Premul::from_straight_rgba(0, 0, 255, 64));
    let img = l.to_rgba_image().unwrap();
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px[3], 64);
    assert!(px[2] >= 253);
}
