use std::io::{BufRead as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use badgeloop::{GifConfig, LoadOptions, NormalizedImage};

/// Frame counts above this ask for confirmation unless `--yes` is given.
const MAX_FRAMES_WITHOUT_CONFIRM: usize = 20;

#[derive(Parser, Debug)]
#[command(
    name = "badgeloop",
    version,
    about = "Build a looping GIF from a folder of badges and logos"
)]
struct Cli {
    /// Folder with badge images; files under a `logo`/`logos` subfolder become logo frames.
    input_folder: PathBuf,

    /// Output GIF path. An existing file is never overwritten; `-1`, `-2`, ... is appended.
    #[arg(short, long, default_value = "badge_slideshow.gif")]
    output: PathBuf,

    /// JSON config file; flags given on the command line override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Badge frame duration in milliseconds [default: 1500].
    #[arg(long)]
    duration: Option<u32>,

    /// Logo frame duration in milliseconds [default: 2500].
    #[arg(long)]
    logo_duration: Option<u32>,

    /// Number of repeats, 0 loops forever [default: 0].
    #[arg(long = "loop")]
    loop_count: Option<u16>,

    /// Canvas size as WIDTHxHEIGHT [default: 320x180].
    #[arg(long)]
    size: Option<String>,

    /// Background color or `transparent` [default: #FFFFFF].
    #[arg(long)]
    background: Option<String>,

    /// Padding in pixels around and between badges [default: 5].
    #[arg(long)]
    padding: Option<u32>,

    /// Badges per frame [default: 3].
    #[arg(long)]
    group_size: Option<u32>,

    /// Key out near-white backgrounds of fully opaque images.
    #[arg(long, default_value_t = false)]
    remove_white_bg: bool,

    /// Channel value at or above which a pixel counts as white [default: 250].
    #[arg(long)]
    white_threshold: Option<u8>,

    /// Compose frames on a rayon thread pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Skip the confirmation prompt for large frame counts.
    #[arg(short = 'y', long, default_value_t = false)]
    yes: bool,

    /// More log output (`-v` debug, `-vv` trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = build_config(&cli)?;
    let found = badgeloop::discover_images(&cli.input_folder)?;
    tracing::info!(
        badges = found.badges.len(),
        logos = found.logos.len(),
        folder = %cli.input_folder.display(),
        "discovered images"
    );

    let frames = badgeloop::frame_count(found.badges.len(), found.logos.len(), cfg.group_size);
    if frames > MAX_FRAMES_WITHOUT_CONFIRM && !cli.yes && !confirm(frames)? {
        println!("Aborted.");
        return Ok(());
    }

    let opts = LoadOptions {
        remove_white_bg: cfg.remove_white_bg,
        white_threshold: cfg.white_threshold,
    };
    let badges = load_all(&found.badges, &opts)?;
    let logos = load_all(&found.logos, &opts)?;
    let bytes = badgeloop::generate_gif(&badges, &logos, &cfg)?;

    let target = badgeloop::resolve_unique_path(&cli.output);
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&target, &bytes)
        .with_context(|| format!("write gif '{}'", target.display()))?;

    if target != cli.output {
        println!(
            "Existing file detected. Saved new animation as {} instead.",
            target.display()
        );
    }
    println!("Created GIF with {frames} frames at {}", target.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "badgeloop=info",
        1 => "badgeloop=debug",
        _ => "badgeloop=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<GifConfig> {
    let mut cfg = match &cli.config {
        Some(path) => GifConfig::from_path(path)?,
        None => GifConfig::default(),
    };

    if let Some(size) = &cli.size {
        cfg.size = badgeloop::parse_size(size)?;
    }
    if let Some(background) = &cli.background {
        cfg.background = background.clone();
    }
    if let Some(v) = cli.duration {
        cfg.duration_ms = v;
    }
    if let Some(v) = cli.logo_duration {
        cfg.logo_duration_ms = v;
    }
    if let Some(v) = cli.loop_count {
        cfg.loop_count = v;
    }
    if let Some(v) = cli.padding {
        cfg.padding = v;
    }
    if let Some(v) = cli.group_size {
        cfg.group_size = v;
    }
    if let Some(v) = cli.white_threshold {
        cfg.white_threshold = v;
    }
    cfg.remove_white_bg |= cli.remove_white_bg;
    cfg.parallel |= cli.parallel;
    if cli.threads.is_some() {
        cfg.threads = cli.threads;
    }

    cfg.validate()?;
    cfg.resolve_background().context(
        "background must be a color name, hex value, rgb()/hsl()/hsv() or 'transparent'",
    )?;
    Ok(cfg)
}

fn load_all(paths: &[PathBuf], opts: &LoadOptions) -> anyhow::Result<Vec<NormalizedImage>> {
    paths.iter().map(|path| load_one(path, opts)).collect()
}

fn load_one(path: &Path, opts: &LoadOptions) -> anyhow::Result<NormalizedImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let img = badgeloop::load_image_with(&bytes, opts)
        .with_context(|| format!("decode '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), w = img.width(), h = img.height(), "loaded image");
    Ok(img)
}

fn confirm(frames: usize) -> anyhow::Result<bool> {
    println!("This will generate {frames} frames.");
    print!("Continue? [y/N] ");
    std::io::stdout().flush().context("flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
