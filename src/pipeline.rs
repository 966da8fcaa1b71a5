use rayon::prelude::*;

use crate::assets::decode::{LoadOptions, NormalizedImage, load_image_with};
use crate::encode::gif::assemble_animation;
use crate::foundation::config::GifConfig;
use crate::foundation::core::{Background, Canvas};
use crate::foundation::error::{BadgeloopError, BadgeloopResult};
use crate::render::compose::{Frame, compose_group};
use crate::render::group::group_images;

/// What to do with an input that fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Stop at the first undecodable input and report its index.
    #[default]
    Abort,
    /// Log the failure and leave the input out of the animation.
    Skip,
}

/// One frame to compose: badge groups hold `group_size` images, logos hold one.
struct FrameJob<'a> {
    images: Vec<&'a NormalizedImage>,
    duration_ms: u32,
}

struct ComposeSettings {
    canvas: Canvas,
    background: Background,
    padding: u32,
}

/// Number of frames `badges` and `logos` produce for a given group size.
pub fn frame_count(badges: usize, logos: usize, group_size: u32) -> usize {
    let g = (group_size as usize).max(1);
    badges.div_ceil(g) + logos
}

/// Compose every frame in display order (badge groups, then logos) without encoding.
///
/// The config is validated and the background resolved before any composition starts.
#[tracing::instrument(skip_all, fields(badges = badges.len(), logos = logos.len()))]
pub fn plan_frames(
    badges: &[NormalizedImage],
    logos: &[NormalizedImage],
    cfg: &GifConfig,
) -> BadgeloopResult<Vec<(Frame, u32)>> {
    cfg.validate()?;
    let settings = ComposeSettings {
        canvas: cfg.size,
        background: cfg.resolve_background()?,
        padding: cfg.padding,
    };

    let badge_refs: Vec<&NormalizedImage> = badges.iter().collect();
    let mut jobs: Vec<FrameJob<'_>> = group_images(&badge_refs, cfg.group_size as usize)
        .into_iter()
        .map(|images| FrameJob {
            images,
            duration_ms: cfg.duration_ms,
        })
        .collect();
    jobs.extend(logos.iter().map(|logo| FrameJob {
        images: vec![logo],
        duration_ms: cfg.logo_duration_ms,
    }));

    if jobs.is_empty() {
        return Err(BadgeloopError::NoContent);
    }

    let composed = if cfg.parallel {
        let pool = build_thread_pool(cfg.threads)?;
        tracing::debug!(
            threads = pool.current_num_threads(),
            jobs = jobs.len(),
            transparent = settings.background.is_transparent(),
            "composing frames in parallel"
        );
        pool.install(|| {
            jobs.par_iter()
                .map(|job| compose_job(job, &settings))
                .collect::<Vec<_>>()
        })
    } else {
        jobs.iter()
            .map(|job| compose_job(job, &settings))
            .collect::<Vec<_>>()
    };

    let mut frames = Vec::with_capacity(composed.len());
    for item in composed {
        frames.push(item?);
    }
    tracing::debug!(frames = frames.len(), "planned frames");
    Ok(frames)
}

fn compose_job(job: &FrameJob<'_>, s: &ComposeSettings) -> BadgeloopResult<(Frame, u32)> {
    let frame = compose_group(&job.images, s.canvas, s.background, s.padding)?;
    Ok((frame, job.duration_ms))
}

/// Compose and encode decoded badges and logos into one GIF.
#[tracing::instrument(skip_all, fields(badges = badges.len(), logos = logos.len()))]
pub fn generate_gif(
    badges: &[NormalizedImage],
    logos: &[NormalizedImage],
    cfg: &GifConfig,
) -> BadgeloopResult<Vec<u8>> {
    let frames = plan_frames(badges, logos, cfg)?;
    assemble_animation(&frames, cfg.loop_count)
}

/// Decode raw inputs under `policy`, then run [`generate_gif`].
///
/// With [`DecodePolicy::Abort`] the first failure is returned with its position in its own
/// list. With [`DecodePolicy::Skip`] failures are logged and dropped; if nothing decodes the
/// result is [`BadgeloopError::NoContent`].
pub fn generate_gif_from_bytes<B: AsRef<[u8]>>(
    badges: &[B],
    logos: &[B],
    cfg: &GifConfig,
    policy: DecodePolicy,
) -> BadgeloopResult<Vec<u8>> {
    // Bad config or background must fail before any decoding work.
    cfg.validate()?;
    cfg.resolve_background()?;

    let opts = LoadOptions {
        remove_white_bg: cfg.remove_white_bg,
        white_threshold: cfg.white_threshold,
    };
    let badges = decode_all(badges, &opts, policy, "badge")?;
    let logos = decode_all(logos, &opts, policy, "logo")?;
    generate_gif(&badges, &logos, cfg)
}

fn decode_all<B: AsRef<[u8]>>(
    inputs: &[B],
    opts: &LoadOptions,
    policy: DecodePolicy,
    kind: &'static str,
) -> BadgeloopResult<Vec<NormalizedImage>> {
    let mut out = Vec::with_capacity(inputs.len());
    for (index, bytes) in inputs.iter().enumerate() {
        match load_image_with(bytes.as_ref(), opts) {
            Ok(img) => out.push(img),
            Err(err) => match policy {
                DecodePolicy::Abort => return Err(err.at_index(index)),
                DecodePolicy::Skip => {
                    tracing::warn!(kind, index, error = %err, "skipping undecodable image");
                }
            },
        }
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> BadgeloopResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BadgeloopError::validation(
            "'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BadgeloopError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
