use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use gifreel::{
    CaptureMetadata, FrameIndex, GifEncodeOpts, METADATA_FILE, Rect, RecorderConfig,
    RecordingSurface, Registry, Replay, ScenarioManifest, capture_frame_count,
    frame_step_ms, required_frames,
};

#[derive(Parser, Debug)]
#[command(name = "gifreel", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List scenarios declared in a manifest.
    List(ManifestArgs),
    /// Compile and validate every scenario in a manifest.
    Validate(ManifestArgs),
    /// Print the compiled gesture plan of one scenario as JSON.
    Plan(PlanArgs),
    /// Encode a captured frame directory into a GIF (requires `ffmpeg` and `gifsicle`).
    Encode(EncodeArgs),
    /// Capture scenarios on an Android device and encode them (requires `adb`).
    Record(RecordArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Scenario manifest JSON.
    #[arg(long)]
    manifest: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Scenario manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Scenario name (defaults to the first declared scenario).
    #[arg(long)]
    scenario: Option<String>,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Directory holding `frame-0001.png`, `frame-0002.png`, ...
    #[arg(long)]
    frames: PathBuf,

    /// Directory the GIF is written to.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output name without extension (defaults to the metadata scenario, then the frame dir name).
    #[arg(long)]
    name: Option<String>,

    /// Playback frame rate (defaults to the metadata fps, then 50).
    #[arg(long)]
    fps: Option<u32>,

    /// GIF width in pixels.
    #[arg(long, default_value_t = 540)]
    width: u32,

    /// GIF height in pixels (0 keeps the aspect ratio).
    #[arg(long, default_value_t = 0)]
    height: u32,

    /// Scratch directory for intermediates.
    #[arg(long, default_value = "target/gifreel")]
    work_dir: PathBuf,

    /// `ffmpeg` binary.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg_bin: String,

    /// `gifsicle` binary.
    #[arg(long, default_value = "gifsicle")]
    gifsicle_bin: String,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    /// Scenario manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Recorder config JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Application id of the app under test.
    #[arg(long)]
    application_id: Option<String>,

    /// `all`, a scenario name, or empty for the first scenario.
    #[arg(long)]
    scenario: Option<String>,

    /// Device serial or `auto`.
    #[arg(long)]
    serial: Option<String>,

    /// Output directory for GIFs.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_registry(path: &Path) -> anyhow::Result<Registry> {
    let manifest = ScenarioManifest::from_path(path)?;
    let registry = manifest
        .into_registry()
        .with_context(|| format!("compile manifest '{}'", path.display()))?;
    Ok(registry)
}

fn cmd_list(args: ManifestArgs) -> anyhow::Result<()> {
    let registry = load_registry(&args.manifest)?;
    if registry.is_empty() {
        anyhow::bail!("no scenarios declared in '{}'", args.manifest.display());
    }
    println!("scenarios:");
    for (spec, content) in registry.iter() {
        println!(" - {} ({content})", spec.name);
    }
    Ok(())
}

fn cmd_validate(args: ManifestArgs) -> anyhow::Result<()> {
    let registry = load_registry(&args.manifest)?;
    println!("ok: {} scenario(s)", registry.len());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let registry = load_registry(&args.manifest)?;
    let spec = registry.resolve(args.scenario.as_deref())?;
    let capture = &spec.capture;

    let fps = u32::try_from(capture.fps).context("fps out of range")?;
    let duration_ms = u32::try_from(capture.duration_ms).context("duration out of range")?;
    let total_frames = capture_frame_count(duration_ms, fps);

    // Dry run against a unit surface: exercises budget truncation without pixels.
    let mut surface = RecordingSurface::new(Rect::new(0.0, 0.0, 1.0, 1.0));
    let report = Replay::new(&capture.gestures, total_frames, FrameIndex::FIRST).run(&mut surface)?;

    let plan = serde_json::json!({
        "scenario": spec.name,
        "content": registry.content_id(&spec.name)?,
        "fps": fps,
        "duration_ms": duration_ms,
        "frame_step_ms": frame_step_ms(fps),
        "total_frames": total_frames,
        "required_frames": required_frames(&capture.gestures),
        "gesture_frames_captured": report.frames_captured,
        "replay": format!("{:?}", report.state),
        "gestures": capture.gestures,
    });
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let meta_path = args.frames.join(METADATA_FILE);
    let meta = if meta_path.is_file() {
        Some(CaptureMetadata::from_path(&meta_path)?)
    } else {
        None
    };

    let name = args
        .name
        .or_else(|| meta.as_ref().map(|m| m.scenario.clone()))
        .or_else(|| {
            args.frames
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .context("cannot derive an output name; pass --name")?;
    let fps = args
        .fps
        .or_else(|| meta.as_ref().map(|m| m.fps))
        .unwrap_or(50);

    let opts = GifEncodeOpts {
        ffmpeg_bin: args.ffmpeg_bin,
        gifsicle_bin: args.gifsicle_bin,
        fps,
        width: args.width,
        height: args.height,
    };

    let gif = gifreel::encode_gif(&args.frames, &args.work_dir, &args.out_dir, &name, &opts)?;
    eprintln!("wrote {}", gif.display());
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let registry = load_registry(&args.manifest)?;

    let mut config = match &args.config {
        Some(path) => RecorderConfig::from_path(path)?,
        None => RecorderConfig::default(),
    };
    if let Some(id) = args.application_id {
        config.application_id = id;
    }
    if let Some(scenario) = args.scenario {
        config.scenario = scenario;
    }
    if let Some(serial) = args.serial {
        config.adb_serial = serial;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    for recorded in gifreel::record_scenarios(&config, &registry)? {
        eprintln!("{}: wrote {}", recorded.scenario, recorded.gif.display());
    }
    Ok(())
}
