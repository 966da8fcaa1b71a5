use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::*;
use crate::encode::gif::inspect_animation;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn solid(px: [u8; 4]) -> NormalizedImage {
    NormalizedImage::new(RgbaImage::from_pixel(10, 10, Rgba(px))).unwrap()
}

fn png_bytes(px: [u8; 4]) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba(px)))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn at(frame: &Frame, x: u32, y: u32) -> [u8; 4] {
    frame.pixels().get_pixel(x, y).0
}

#[test]
fn badge_groups_come_before_logos_with_their_durations() {
    let badges = [solid(RED), solid(GREEN), solid(BLUE), solid(BLACK)];
    let logos = [solid(BLUE), solid(GREEN)];
    let frames = plan_frames(&badges, &logos, &GifConfig::default()).unwrap();

    let durations: Vec<u32> = frames.iter().map(|(_, d)| *d).collect();
    assert_eq!(durations, vec![1500, 1500, 2500, 2500]);
    assert!(frames
        .iter()
        .all(|(f, _)| (f.width(), f.height()) == (320, 180)));

    // 320x180, padding 5, three columns of 100px starting at x=5 and 105px apart.
    let (first, _) = &frames[0];
    assert_eq!(at(first, 55, 90), RED);
    assert_eq!(at(first, 160, 90), GREEN);
    assert_eq!(at(first, 265, 90), BLUE);
    assert_eq!(at(first, 2, 2), [255, 255, 255, 255]);

    // The short last group is topped up from the start of the list.
    let (second, _) = &frames[1];
    assert_eq!(at(second, 55, 90), BLACK);
    assert_eq!(at(second, 160, 90), RED);
    assert_eq!(at(second, 265, 90), GREEN);

    assert_eq!(at(&frames[2].0, 160, 90), BLUE);
    assert_eq!(at(&frames[3].0, 160, 90), GREEN);
}

#[test]
fn parallel_composition_keeps_sequential_order() {
    let badges: Vec<NormalizedImage> = [RED, GREEN, BLUE, BLACK, RED, BLUE, GREEN]
        .into_iter()
        .map(solid)
        .collect();
    let logos = [solid(BLACK), solid(RED)];

    let sequential = plan_frames(&badges, &logos, &GifConfig::default()).unwrap();
    let cfg = GifConfig {
        parallel: true,
        threads: Some(3),
        ..GifConfig::default()
    };
    let parallel = plan_frames(&badges, &logos, &cfg).unwrap();
    assert_eq!(sequential.len(), 5);
    assert_eq!(sequential, parallel);
}

#[test]
fn nothing_to_show_is_no_content() {
    assert!(matches!(
        plan_frames(&[], &[], &GifConfig::default()),
        Err(BadgeloopError::NoContent)
    ));
    assert!(matches!(
        generate_gif(&[], &[], &GifConfig::default()),
        Err(BadgeloopError::NoContent)
    ));
}

#[test]
fn bad_background_fails_before_any_frame_work() {
    let cfg = GifConfig {
        background: "not-a-color".to_owned(),
        ..GifConfig::default()
    };
    assert!(matches!(
        plan_frames(&[], &[], &cfg),
        Err(BadgeloopError::InvalidColor(_))
    ));
    let corrupt: [&[u8]; 1] = [b"garbage"];
    assert!(matches!(
        generate_gif_from_bytes(&corrupt, &[], &cfg, DecodePolicy::Abort),
        Err(BadgeloopError::InvalidColor(_))
    ));
}

#[test]
fn zero_threads_is_rejected() {
    let cfg = GifConfig {
        parallel: true,
        threads: Some(0),
        ..GifConfig::default()
    };
    assert!(matches!(
        plan_frames(&[solid(RED)], &[], &cfg),
        Err(BadgeloopError::Validation(_))
    ));
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
}

#[test]
fn generated_gif_decodes_to_planned_frames() {
    let cfg = GifConfig {
        loop_count: 2,
        ..GifConfig::default()
    };
    let bytes = generate_gif(&[solid(RED), solid(GREEN)], &[solid(BLUE)], &cfg).unwrap();
    let info = inspect_animation(&bytes).unwrap();
    assert_eq!((info.width, info.height), (320, 180));
    assert_eq!(info.delays_ms, vec![1500, 2500]);
    assert_eq!(info.loop_count, Some(2));
}

#[test]
fn abort_policy_reports_the_failing_index() {
    let badges = vec![png_bytes(RED), b"not an image".to_vec(), png_bytes(BLUE)];
    let err = generate_gif_from_bytes(&badges, &[], &GifConfig::default(), DecodePolicy::Abort)
        .unwrap_err();
    match err {
        BadgeloopError::UnsupportedImage { index, .. } => assert_eq!(index, Some(1)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn skip_policy_drops_undecodable_inputs() {
    let badges = vec![png_bytes(RED), Vec::new(), png_bytes(BLUE)];
    let logos = vec![b"junk".to_vec(), png_bytes(GREEN)];
    let cfg = GifConfig {
        group_size: 1,
        ..GifConfig::default()
    };
    let bytes = generate_gif_from_bytes(&badges, &logos, &cfg, DecodePolicy::Skip).unwrap();
    let info = inspect_animation(&bytes).unwrap();
    assert_eq!(info.frame_count, 3);
    assert_eq!(info.delays_ms, vec![1500, 1500, 2500]);

    let all_bad = vec![b"junk".to_vec()];
    assert!(matches!(
        generate_gif_from_bytes(&all_bad, &all_bad, &cfg, DecodePolicy::Skip),
        Err(BadgeloopError::NoContent)
    ));
}

#[test]
fn transparent_background_with_white_removal_produces_transparent_frames() {
    let mut img = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
    img.put_pixel(4, 4, Rgba(RED));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    let cfg = GifConfig {
        background: "transparent".to_owned(),
        remove_white_bg: true,
        ..GifConfig::default()
    };
    let bytes =
        generate_gif_from_bytes(&[out.into_inner()], &[], &cfg, DecodePolicy::Abort).unwrap();
    let info = inspect_animation(&bytes).unwrap();
    assert_eq!(info.frame_count, 1);
    assert_eq!(info.transparent_frames, 1);
}

#[test]
fn frame_count_matches_grouping() {
    assert_eq!(frame_count(7, 2, 3), 5);
    assert_eq!(frame_count(6, 0, 3), 2);
    assert_eq!(frame_count(0, 0, 3), 0);
    assert_eq!(frame_count(2, 1, 0), 3);
}
