use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan every frame of a project and write the render manifest.
    Plan(PlanArgs),
    /// Print the plan for a single frame as JSON.
    Frame(FrameArgs),
    /// Group caption tokens and print the resulting cues as JSON.
    Captions(CaptionsArgs),
    /// Build a project file from a directory of images and audio.
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output manifest JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per batch (parallel mode only).
    #[arg(long, default_value_t = 256)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    /// Caption token JSON (`[{text, startMs, endMs}, ...]`).
    #[arg(long)]
    tokens: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Video length in frames.
    #[arg(long)]
    total_frames: u64,

    /// Tokens starting within this many ms of the previous one share a page.
    #[arg(long, default_value_t = slidereel::DEFAULT_MERGE_WINDOW_MS)]
    merge_window_ms: u64,
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Directory holding the slideshow images.
    #[arg(long)]
    images: PathBuf,

    /// Directory holding narration and `bgmusic*` files (defaults to `--images`).
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Video length in seconds.
    #[arg(long)]
    duration_secs: f64,

    /// Caption token JSON to embed in the project.
    #[arg(long)]
    captions: Option<PathBuf>,

    /// Output project JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Captions(args) => cmd_captions(args),
        Command::Scan(args) => cmd_scan(args),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let project = slidereel::Project::from_path(&args.in_path)
        .with_context(|| format!("load project '{}'", args.in_path.display()))?;
    let threading = slidereel::PlanThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let manifest = project.plan(&threading)?;
    write_json(&args.out, &manifest)?;
    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        manifest.total_frames
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let project = slidereel::Project::from_path(&args.in_path)
        .with_context(|| format!("load project '{}'", args.in_path.display()))?;
    let timeline = project.timeline()?;
    let pipeline = project.pipeline()?;
    let plan = slidereel::plan_frame(&timeline, &pipeline, slidereel::FrameIndex(args.frame))?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn cmd_captions(args: CaptionsArgs) -> anyhow::Result<()> {
    let tokens = slidereel::load_tokens(&args.tokens)?;
    let fps = slidereel::Fps::new(args.fps)?;
    let track =
        slidereel::CaptionTrack::from_tokens(&tokens, args.merge_window_ms, fps, args.total_frames)?;
    println!("{}", serde_json::to_string_pretty(&track.cues)?);
    Ok(())
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<()> {
    let assets = slidereel::discover_images(&args.images)?;
    if assets.is_empty() {
        anyhow::bail!("no images found in '{}'", args.images.display());
    }

    let audio_dir = args.audio_dir.as_deref().unwrap_or(&args.images);
    let mut project = slidereel::Project::new(assets, args.duration_secs);
    project.audio = slidereel::discover_narration(audio_dir)?.map(path_string);
    project.background_music =
        slidereel::discover_background_music(audio_dir)?.map(|p| slidereel::BackgroundMusic {
            path: path_string(p),
            volume: 0.15,
        });
    if let Some(path) = &args.captions {
        project.captions = slidereel::load_tokens(path)?;
    }
    project.validate()?;

    write_json(&args.out, &project)?;
    eprintln!(
        "wrote {} ({} assets)",
        args.out.display(),
        project.assets.len()
    );
    Ok(())
}

fn path_string(p: PathBuf) -> String {
    p.to_string_lossy().into_owned()
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("write json '{}'", path.display()))?;
    Ok(())
}
