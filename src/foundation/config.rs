use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Background, Canvas};
use crate::foundation::error::{BadgeloopError, BadgeloopResult};

/// Largest accepted canvas width or height.
pub const MAX_DIMENSION: u32 = 2000;

/// Canvas size used when none is given.
pub const DEFAULT_SIZE: Canvas = Canvas {
    width: 320,
    height: 180,
};

/// Immutable settings for one animation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifConfig {
    /// Frame size in pixels.
    pub size: Canvas,
    /// Background specification: a color or `"transparent"`.
    pub background: String,
    /// Symmetric padding in pixels around the content and between columns.
    pub padding: u32,
    /// Badges per multi-item frame.
    pub group_size: u32,
    /// Display time of each badge frame.
    pub duration_ms: u32,
    /// Display time of each logo frame.
    pub logo_duration_ms: u32,
    /// Animation repeats; `0` loops forever.
    pub loop_count: u16,
    /// Key out near-white pixels of images that carry no transparency of their own.
    pub remove_white_bg: bool,
    /// Channel value at or above which a pixel counts as white.
    pub white_threshold: u8,
    /// Compose frames on a rayon pool.
    pub parallel: bool,
    /// Worker count for the rayon pool. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            background: "#FFFFFF".to_owned(),
            padding: 5,
            group_size: 3,
            duration_ms: 1500,
            logo_duration_ms: 2500,
            loop_count: 0,
            remove_white_bg: false,
            white_threshold: 250,
            parallel: false,
            threads: None,
        }
    }
}

impl GifConfig {
    /// Read a JSON config file and validate it. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> BadgeloopResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse config JSON and validate it.
    pub fn from_json_str(text: &str) -> BadgeloopResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| BadgeloopError::validation(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges. Background parsing is left to [`GifConfig::resolve_background`].
    pub fn validate(&self) -> BadgeloopResult<()> {
        validate_size(self.size)?;
        if self.group_size == 0 {
            return Err(BadgeloopError::validation("group_size must be >= 1"));
        }
        if self.duration_ms == 0 || self.logo_duration_ms == 0 {
            return Err(BadgeloopError::validation(
                "duration_ms and logo_duration_ms must be > 0",
            ));
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(BadgeloopError::validation(
                "'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Resolve the background specification.
    pub fn resolve_background(&self) -> BadgeloopResult<Background> {
        Background::parse(&self.background)
    }
}

/// Parse `WIDTHxHEIGHT` (the separator is case-insensitive).
///
/// An empty string yields [`DEFAULT_SIZE`].
pub fn parse_size(text: &str) -> BadgeloopResult<Canvas> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DEFAULT_SIZE);
    }

    let bad = || {
        BadgeloopError::validation(format!(
            "size must be WIDTHxHEIGHT (e.g. 320x180), got \"{text}\""
        ))
    };

    let lower = text.to_ascii_lowercase();
    let (w, h) = lower.split_once('x').ok_or_else(bad)?;
    let width: u32 = w.trim().parse().map_err(|_| bad())?;
    let height: u32 = h.trim().parse().map_err(|_| bad())?;
    let size = Canvas { width, height };
    validate_size(size)?;
    Ok(size)
}

fn validate_size(size: Canvas) -> BadgeloopResult<()> {
    if size.width == 0 || size.height == 0 {
        return Err(BadgeloopError::validation("dimensions must be positive"));
    }
    if size.width > MAX_DIMENSION || size.height > MAX_DIMENSION {
        return Err(BadgeloopError::validation(format!(
            "maximum dimension is {MAX_DIMENSION}px, got {size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
