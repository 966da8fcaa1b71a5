use image::{Rgba, RgbaImage};

use super::*;
use crate::foundation::core::Rgba8;

fn solid(w: u32, h: u32, px: [u8; 4]) -> NormalizedImage {
    NormalizedImage::new(RgbaImage::from_pixel(w, h, Rgba(px))).unwrap()
}

fn white() -> Background {
    Background::Solid(Rgba8::rgb(255, 255, 255))
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn single_output_matches_canvas_for_many_sizes() {
    let img = solid(37, 91, [200, 0, 0, 255]);
    for (w, h, p) in [(320, 180, 5), (64, 64, 0), (17, 9, 4), (1, 1, 0), (500, 20, 9)] {
        let frame = compose_single(&img, canvas(w, h), white(), p);
        assert_eq!((frame.width(), frame.height()), (w, h));
        let rgba = frame.into_rgba();
        assert_eq!(rgba.as_raw().len() as u64, canvas(w, h).area() * 4);
    }
}

#[test]
fn blank_frame_is_filled_with_the_background() {
    let rgba = Frame::blank(canvas(3, 2), white()).into_rgba();
    assert!(rgba.pixels().all(|p| p.0 == [255, 255, 255, 255]));

    let rgba = Frame::blank(canvas(3, 2), Background::Transparent).into_rgba();
    assert!(rgba.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn matching_aspect_fills_safe_box_exactly() {
    let img = solid(31, 17, [255, 0, 0, 255]);
    let frame = compose_single(&img, canvas(320, 180), white(), 5);
    let px = frame.pixels();

    // Padding ring is untouched background.
    for (x, y) in [(4, 90), (315, 90), (160, 4), (160, 175), (0, 0), (319, 179)] {
        assert_eq!(px.get_pixel(x, y).0, [255, 255, 255, 255], "({x},{y})");
    }
    // Safe box corners and center are covered.
    for (x, y) in [(5, 5), (314, 5), (5, 174), (314, 174), (160, 90)] {
        assert!(close(px.get_pixel(x, y).0, [255, 0, 0, 255]), "({x},{y})");
    }
}

#[test]
fn square_on_wide_canvas_is_centered_with_side_margins() {
    let img = solid(100, 100, [0, 0, 255, 255]);
    let frame = compose_single(&img, canvas(320, 180), white(), 5);
    let px = frame.pixels();
    // Scaled to 170x170 at x=75.
    assert_eq!(px.get_pixel(74, 90).0, [255, 255, 255, 255]);
    assert!(close(px.get_pixel(75, 90).0, [0, 0, 255, 255]));
    assert!(close(px.get_pixel(244, 90).0, [0, 0, 255, 255]));
    assert_eq!(px.get_pixel(245, 90).0, [255, 255, 255, 255]);
}

#[test]
fn group_of_one_is_pixel_identical_to_single() {
    let mut src = RgbaImage::from_pixel(40, 25, Rgba([10, 200, 30, 255]));
    src.put_pixel(3, 3, Rgba([0, 0, 0, 0]));
    let img = NormalizedImage::new(src).unwrap();

    for bg in [white(), Background::Transparent] {
        let single = compose_single(&img, canvas(320, 180), bg, 5);
        let group = compose_group(std::slice::from_ref(&img), canvas(320, 180), bg, 5).unwrap();
        assert_eq!(single, group);
    }
}

#[test]
fn empty_group_is_rejected() {
    assert!(matches!(
        compose_group::<NormalizedImage>(&[], canvas(320, 180), white(), 5),
        Err(BadgeloopError::EmptyGroup)
    ));
}

#[test]
fn three_badges_land_in_their_columns() {
    let images = [
        solid(100, 100, [255, 0, 0, 255]),
        solid(100, 100, [0, 255, 0, 255]),
        solid(100, 100, [0, 0, 255, 255]),
    ];
    let frame = compose_group(&images, canvas(320, 180), white(), 5).unwrap();
    let px = frame.pixels();
    assert_eq!((frame.width(), frame.height()), (320, 180));

    // Columns at x = 5, 110, 215 with width 100; images are exactly column-sized.
    assert_eq!(px.get_pixel(5, 40).0, [255, 0, 0, 255]);
    assert_eq!(px.get_pixel(104, 139).0, [255, 0, 0, 255]);
    assert_eq!(px.get_pixel(107, 90).0, [255, 255, 255, 255]);
    assert_eq!(px.get_pixel(110, 90).0, [0, 255, 0, 255]);
    assert_eq!(px.get_pixel(214, 90).0, [255, 255, 255, 255]);
    assert_eq!(px.get_pixel(215, 90).0, [0, 0, 255, 255]);
    assert_eq!(px.get_pixel(314, 90).0, [0, 0, 255, 255]);
    // Vertical centering leaves bands above and below.
    assert_eq!(px.get_pixel(50, 39).0, [255, 255, 255, 255]);
    assert_eq!(px.get_pixel(50, 140).0, [255, 255, 255, 255]);
}

#[test]
fn two_items_split_the_canvas_in_half() {
    let images = [
        solid(1, 1, [255, 0, 0, 255]),
        solid(1, 1, [0, 255, 0, 255]),
    ];
    let frame = compose_group(&images, canvas(4, 4), white(), 0).unwrap();
    let px = frame.pixels();
    assert_eq!((frame.width(), frame.height()), (4, 4));
    // Two 2px columns without spacing; each 1x1 source scales to 2x2 at y = 1.
    assert_eq!(px.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert!(close(px.get_pixel(0, 1).0, [255, 0, 0, 255]));
    assert!(close(px.get_pixel(1, 2).0, [255, 0, 0, 255]));
    assert!(close(px.get_pixel(2, 1).0, [0, 255, 0, 255]));
    assert!(close(px.get_pixel(3, 2).0, [0, 255, 0, 255]));
    assert_eq!(px.get_pixel(3, 3).0, [255, 255, 255, 255]);
}

#[test]
fn transparent_pixels_show_the_background() {
    let mut src = RgbaImage::from_pixel(310, 170, Rgba([0, 0, 0, 255]));
    src.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    let img = NormalizedImage::new(src).unwrap();

    let frame = compose_single(&img, canvas(320, 180), white(), 5);
    assert_eq!(frame.pixels().get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(frame.pixels().get_pixel(6, 5).0, [0, 0, 0, 255]);

    let frame = compose_single(&img, canvas(320, 180), Background::Transparent, 5);
    assert_eq!(frame.pixels().get_pixel(5, 5).0[3], 0);
    assert_eq!(frame.pixels().get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(frame.pixels().get_pixel(6, 5).0, [0, 0, 0, 255]);
}

#[test]
fn composition_does_not_mutate_sources() {
    let img = solid(50, 20, [1, 2, 3, 200]);
    let before = img.clone();
    let _ = compose_single(&img, canvas(320, 180), white(), 5);
    let _ = compose_group(&[img.clone(), img.clone()], canvas(320, 180), white(), 5).unwrap();
    assert_eq!(img, before);
}
