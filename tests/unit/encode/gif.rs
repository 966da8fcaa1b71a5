use image::{Rgba, RgbaImage};

use super::*;
use crate::encode::sink::InMemorySink;

fn solid_frame(w: u32, h: u32, px: [u8; 4]) -> Frame {
    Frame::from_rgba(RgbaImage::from_pixel(w, h, Rgba(px)))
}

#[test]
fn three_frames_keep_their_durations_and_loop_forever() {
    let frames = vec![
        (solid_frame(32, 18, [255, 0, 0, 255]), 1500),
        (solid_frame(32, 18, [0, 255, 0, 255]), 1500),
        (solid_frame(32, 18, [0, 0, 255, 255]), 2500),
    ];
    let bytes = assemble_animation(&frames, 0).unwrap();
    assert_eq!(&bytes[0..6], b"GIF89a");

    let info = inspect_animation(&bytes).unwrap();
    assert_eq!((info.width, info.height), (32, 18));
    assert_eq!(info.frame_count, 3);
    assert_eq!(info.delays_ms, vec![1500, 1500, 2500]);
    assert_eq!(info.loop_count, Some(0));
    assert!(info.full_replace);
    assert_eq!(info.transparent_frames, 0);
}

#[test]
fn finite_loop_count_round_trips() {
    let frames = vec![(solid_frame(4, 4, [9, 9, 9, 255]), 100)];
    for n in [1u16, 3, 65535] {
        let info = inspect_animation(&assemble_animation(&frames, n).unwrap()).unwrap();
        assert_eq!(info.loop_count, Some(n));
        assert_eq!(info.frame_count, 1);
    }
}

#[test]
fn empty_frame_list_is_no_content() {
    assert!(matches!(
        assemble_animation(&[], 0),
        Err(BadgeloopError::NoContent)
    ));
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        loop_count: 0,
    };
    assert!(matches!(
        write_frames(&mut sink, &[], cfg),
        Err(BadgeloopError::NoContent)
    ));
    assert!(sink.config().is_none());
}

#[test]
fn mismatched_frame_sizes_are_rejected() {
    let frames = vec![
        (solid_frame(8, 8, [0, 0, 0, 255]), 100),
        (solid_frame(8, 9, [0, 0, 0, 255]), 100),
    ];
    assert!(matches!(
        assemble_animation(&frames, 0),
        Err(BadgeloopError::Validation(_))
    ));
}

#[test]
fn oversized_canvas_is_rejected() {
    let mut sink = GifSink::new(GifSinkOpts::default());
    let cfg = SinkConfig {
        width: 70_000,
        height: 1,
        loop_count: 0,
    };
    assert!(matches!(sink.begin(cfg), Err(BadgeloopError::Validation(_))));

    let mut sink = GifSink::new(GifSinkOpts { quant_speed: 0 });
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        loop_count: 0,
    };
    assert!(sink.begin(cfg).is_err());
}

#[test]
fn transparent_pixels_get_a_transparent_index() {
    let mut img = RgbaImage::from_pixel(6, 6, Rgba([0, 0, 0, 0]));
    img.put_pixel(2, 2, Rgba([255, 0, 0, 255]));
    img.put_pixel(3, 3, Rgba([0, 255, 0, 200]));
    let frames = vec![
        (Frame::from_rgba(img), 500),
        (solid_frame(6, 6, [1, 2, 3, 255]), 500),
    ];
    let info = inspect_animation(&assemble_animation(&frames, 0).unwrap()).unwrap();
    assert_eq!(info.transparent_frames, 1);
}

#[test]
fn sink_lifecycle_is_enforced() {
    let frame = solid_frame(2, 2, [0, 0, 0, 255]);
    let mut sink = GifSink::new(GifSinkOpts::default());
    assert!(sink.push_frame(&frame, 10).is_err());
    assert!(sink.end().is_err());

    let sink = GifSink::new(GifSinkOpts::default());
    assert!(sink.into_bytes().is_err());
}

#[test]
fn in_memory_sink_captures_order_and_durations() {
    let frames = vec![
        (solid_frame(2, 2, [1, 0, 0, 255]), 10),
        (solid_frame(2, 2, [2, 0, 0, 255]), 20),
    ];
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        loop_count: 5,
    };
    write_frames(&mut sink, &frames, cfg).unwrap();
    assert_eq!(sink.config(), Some(cfg));
    assert_eq!(sink.frames(), frames.as_slice());
    assert!(sink.is_ended());
}

#[test]
fn durations_truncate_to_centiseconds() {
    assert_eq!(ms_to_centis(1500), 150);
    assert_eq!(ms_to_centis(1505), 150);
    assert_eq!(ms_to_centis(1509), 150);
    assert_eq!(ms_to_centis(1510), 151);
    assert_eq!(ms_to_centis(9), 1);
    assert_eq!(ms_to_centis(0), 1);
    assert_eq!(ms_to_centis(u32::MAX), u16::MAX);
}

#[test]
fn odd_durations_are_truncated_in_the_artifact() {
    let frames = vec![
        (solid_frame(4, 4, [0, 0, 0, 255]), 1505),
        (solid_frame(4, 4, [255, 255, 255, 255]), 2599),
    ];
    let info = inspect_animation(&assemble_animation(&frames, 0).unwrap()).unwrap();
    assert_eq!(info.delays_ms, vec![1500, 2590]);
}

#[test]
fn alpha_is_binarized_at_the_cutoff() {
    let mut px = vec![10, 20, 30, 127, 10, 20, 30, 128, 10, 20, 30, 255];
    binarize_alpha(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 10, 20, 30, 255, 10, 20, 30, 255]);
}

#[test]
fn garbage_is_not_an_animation() {
    assert!(inspect_animation(b"not a gif").is_err());
}
