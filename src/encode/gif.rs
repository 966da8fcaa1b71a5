use std::io::Cursor;

use gif::{DisposalMethod, Encoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{BadgeloopError, BadgeloopResult};
use crate::render::compose::Frame;

/// Default NeuQuant sampling speed (1 = best quality, 30 = fastest).
pub const DEFAULT_QUANT_SPEED: i32 = 10;

/// Alpha below this becomes the transparent palette entry; the rest is opaque.
pub const ALPHA_CUTOFF: u8 = 128;

/// Options for [`GifSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifSinkOpts {
    /// Palette quantization speed, `1..=30`.
    pub quant_speed: i32,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            quant_speed: DEFAULT_QUANT_SPEED,
        }
    }
}

/// Sink that encodes frames into an in-memory GIF89a.
///
/// Every frame is disposed to background before the next one is drawn, so frames fully
/// replace each other.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<Encoder<Vec<u8>>>,
    cfg: Option<SinkConfig>,
    frames_written: usize,
    bytes: Option<Vec<u8>>,
}

impl GifSink {
    /// Create a sink; nothing is written until [`FrameSink::begin`].
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            frames_written: 0,
            bytes: None,
        }
    }

    /// Number of frames encoded so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Take the finished artifact. Only available after [`FrameSink::end`].
    pub fn into_bytes(self) -> BadgeloopResult<Vec<u8>> {
        self.bytes
            .ok_or_else(|| BadgeloopError::encode("gif sink was not finished"))
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> BadgeloopResult<()> {
        if !(1..=30).contains(&self.opts.quant_speed) {
            return Err(BadgeloopError::validation("gif quant_speed must be in 1..=30"));
        }
        let width = u16::try_from(cfg.width)
            .map_err(|_| BadgeloopError::validation("gif width must fit in 16 bits"))?;
        let height = u16::try_from(cfg.height)
            .map_err(|_| BadgeloopError::validation("gif height must fit in 16 bits"))?;
        if width == 0 || height == 0 {
            return Err(BadgeloopError::validation(
                "gif sink width/height must be non-zero",
            ));
        }

        let mut encoder = Encoder::new(Vec::new(), width, height, &[])
            .map_err(|e| BadgeloopError::encode(format!("gif header: {e}")))?;
        let repeat = match cfg.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| BadgeloopError::encode(format!("gif loop extension: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.frames_written = 0;
        self.bytes = None;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame, duration_ms: u32) -> BadgeloopResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg, self.encoder.as_mut()) else {
            return Err(BadgeloopError::encode("push_frame called before begin"));
        };
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(BadgeloopError::validation(format!(
                "frame {} is {}x{}, expected {}x{}",
                self.frames_written,
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }

        let mut pixels = frame.pixels().as_raw().clone();
        binarize_alpha(&mut pixels);

        // Dimensions were range-checked in `begin`.
        let mut gif_frame = gif::Frame::from_rgba_speed(
            cfg.width as u16,
            cfg.height as u16,
            &mut pixels,
            self.opts.quant_speed,
        );
        gif_frame.delay = ms_to_centis(duration_ms);
        gif_frame.dispose = DisposalMethod::Background;

        encoder
            .write_frame(&gif_frame)
            .map_err(|e| {
                BadgeloopError::encode(format!("gif frame {}: {e}", self.frames_written))
            })?;
        self.frames_written += 1;
        tracing::debug!(
            frame = self.frames_written - 1,
            duration_ms,
            transparent = gif_frame.transparent.is_some(),
            "encoded gif frame"
        );
        Ok(())
    }

    fn end(&mut self) -> BadgeloopResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| BadgeloopError::encode("end called before begin"))?;
        let bytes = encoder
            .into_inner()
            .map_err(|e| BadgeloopError::encode(format!("gif trailer: {e}")))?;
        self.bytes = Some(bytes);
        Ok(())
    }
}

/// Encode `(frame, duration_ms)` pairs into one looping GIF.
///
/// `loop_count == 0` repeats forever. Fails with [`BadgeloopError::NoContent`] when `frames`
/// is empty; all frames must share the first frame's size.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn assemble_animation(frames: &[(Frame, u32)], loop_count: u16) -> BadgeloopResult<Vec<u8>> {
    assemble_animation_with(frames, loop_count, GifSinkOpts::default())
}

/// [`assemble_animation`] with explicit encoder options.
pub fn assemble_animation_with(
    frames: &[(Frame, u32)],
    loop_count: u16,
    opts: GifSinkOpts,
) -> BadgeloopResult<Vec<u8>> {
    let Some((first, _)) = frames.first() else {
        return Err(BadgeloopError::NoContent);
    };

    let mut sink = GifSink::new(opts);
    let cfg = SinkConfig {
        width: first.width(),
        height: first.height(),
        loop_count,
    };
    write_frames(&mut sink, frames, cfg)?;
    let bytes = sink.into_bytes()?;
    tracing::info!(frames = frames.len(), bytes = bytes.len(), "assembled animation");
    Ok(bytes)
}

/// Drive any [`FrameSink`] through `begin`, every frame in order, and `end`.
pub fn write_frames<S: FrameSink + ?Sized>(
    sink: &mut S,
    frames: &[(Frame, u32)],
    cfg: SinkConfig,
) -> BadgeloopResult<()> {
    if frames.is_empty() {
        return Err(BadgeloopError::NoContent);
    }
    sink.begin(cfg)?;
    for (frame, duration_ms) in frames {
        sink.push_frame(frame, *duration_ms)?;
    }
    sink.end()
}

/// Milliseconds to GIF centiseconds, truncated and kept within `1..=u16::MAX`.
fn ms_to_centis(ms: u32) -> u16 {
    (ms / 10).clamp(1, u32::from(u16::MAX)) as u16
}

fn binarize_alpha(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        if px[3] < ALPHA_CUTOFF {
            px.copy_from_slice(&[0, 0, 0, 0]);
        } else {
            px[3] = 255;
        }
    }
}

/// Summary of a decoded GIF artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationInfo {
    /// Logical screen width.
    pub width: u32,
    /// Logical screen height.
    pub height: u32,
    /// Number of image frames.
    pub frame_count: usize,
    /// Per-frame display time in milliseconds (centisecond resolution).
    pub delays_ms: Vec<u32>,
    /// Repeats from the loop extension; `Some(0)` loops forever, `None` means no extension.
    pub loop_count: Option<u16>,
    /// Every frame is disposed to background.
    pub full_replace: bool,
    /// Frames that carry a transparent palette entry.
    pub transparent_frames: usize,
}

/// Decode an artifact produced by [`assemble_animation`] and report its structure.
pub fn inspect_animation(bytes: &[u8]) -> BadgeloopResult<AnimationInfo> {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = opts
        .read_info(Cursor::new(bytes))
        .map_err(|e| BadgeloopError::encode(format!("read gif header: {e}")))?;

    let mut delays_ms = Vec::new();
    let mut full_replace = true;
    let mut transparent_frames = 0;
    while let Some(frame) = decoder
        .read_next_frame()
        .map_err(|e| BadgeloopError::encode(format!("read gif frame: {e}")))?
    {
        delays_ms.push(u32::from(frame.delay) * 10);
        full_replace &= frame.dispose == DisposalMethod::Background;
        if frame.transparent.is_some() {
            transparent_frames += 1;
        }
    }

    // The decoder reports `Finite(0)` when no loop extension is present.
    let loop_count = match decoder.repeat() {
        Repeat::Infinite => Some(0),
        Repeat::Finite(0) => None,
        Repeat::Finite(n) => Some(n),
    };

    Ok(AnimationInfo {
        width: u32::from(decoder.width()),
        height: u32::from(decoder.height()),
        frame_count: delays_ms.len(),
        delays_ms,
        loop_count,
        full_replace,
        transparent_frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
