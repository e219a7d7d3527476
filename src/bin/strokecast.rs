use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "strokecast", version)]
struct Cli {
    /// Log per-frame progress.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one animation to a looping GIF.
    Render(RenderArgs),
    /// Render a single sampled frame as a PNG.
    Frame(FrameArgs),
    /// Print the stroke geometry at a progress value as JSON.
    Geometry(GeometryArgs),
    /// Render the stock circle, square, triangle and cancel animations.
    Presets(PresetArgs),
}

#[derive(Args, Debug)]
struct SpecArgs {
    /// Animation JSON; inline flags are ignored when set.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shape to draw.
    #[arg(long, value_enum, default_value_t = strokecast::ShapeKind::Circle)]
    shape: strokecast::ShapeKind,

    /// Radius (circle) or side length / width (square, triangle, cancel).
    #[arg(long, default_value_t = 200.0)]
    size: f64,

    /// Cancel-mark height (defaults to --size).
    #[arg(long)]
    height: Option<f64>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 400)]
    width_px: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 400)]
    height_px: u32,

    /// Stroke width in pixels.
    #[arg(long, default_value_t = 30)]
    stroke_width: u32,

    /// Stroke color as #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "#24b55cff")]
    color: strokecast::Rgba8,

    /// Number of progress steps (frame_count + 1 frames are sampled).
    #[arg(long, default_value_t = strokecast::DEFAULT_FRAME_COUNT)]
    frames: u32,

    /// Extra frames holding the finished shape.
    #[arg(long, default_value_t = strokecast::DEFAULT_HOLD_FRAMES)]
    hold: u32,

    /// Display duration of each frame.
    #[arg(long, default_value_t = strokecast::DEFAULT_FRAME_DELAY_MS)]
    delay_ms: u32,

    /// Output path (overrides the config's `out`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ThreadArgs {
    /// Rasterize frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    spec: SpecArgs,

    #[command(flatten)]
    threading: ThreadArgs,

    /// Refuse to replace an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    spec: SpecArgs,

    /// Sample index, 0..=frames.
    #[arg(long)]
    index: u32,
}

#[derive(Parser, Debug)]
struct GeometryArgs {
    #[command(flatten)]
    spec: SpecArgs,

    /// Progress in [0, 1].
    #[arg(long)]
    progress: f64,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Directory receiving circle.gif, square.gif, triangle.gif and cancel.gif.
    #[arg(long, default_value = "images")]
    out_dir: PathBuf,

    #[command(flatten)]
    threading: ThreadArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Geometry(args) => cmd_geometry(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_def(args: &SpecArgs, default_out: &str) -> anyhow::Result<strokecast::AnimationDef> {
    let mut def = match &args.config {
        Some(path) => strokecast::AnimationDef::from_path(path)
            .with_context(|| format!("load animation config '{}'", path.display()))?,
        None => strokecast::AnimationDef {
            canvas: strokecast::Canvas {
                width: args.width_px,
                height: args.height_px,
            },
            shape: args.shape,
            size: args.size,
            height: args.height,
            stroke: strokecast::StrokeStyle {
                width: args.stroke_width,
                color: args.color,
            },
            frame_count: args.frames,
            hold_frames: args.hold,
            frame_delay_ms: args.delay_ms,
            out: PathBuf::from(default_out),
        },
    };
    if let Some(out) = &args.out {
        def.out = out.clone();
    }
    Ok(def)
}

fn threading(args: &ThreadArgs) -> strokecast::RenderThreading {
    strokecast::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let default_out = format!("{}.gif", args.spec.shape.name());
    let def = build_def(&args.spec, &default_out)?;
    let spec = strokecast::AnimationSpec::from_def(&def)?;
    let opts = strokecast::GifSinkOpts {
        out_path: spec.out.clone(),
        overwrite: !args.no_overwrite,
    };
    strokecast::render_to_gif(&spec, &opts, &threading(&args.threading))
        .with_context(|| format!("render '{}'", spec.out.display()))?;

    eprintln!("wrote {}", spec.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let default_out = format!("{}_{}.png", args.spec.shape.name(), args.index);
    let def = build_def(&args.spec, &default_out)?;
    let spec = strokecast::AnimationSpec::from_def(&def)?;
    let frame = strokecast::render_sample(&spec, args.index)?;

    write_png(&spec.out, &frame)?;
    eprintln!("wrote {}", spec.out.display());
    Ok(())
}

fn cmd_geometry(args: GeometryArgs) -> anyhow::Result<()> {
    let def = build_def(&args.spec, "-")?;
    let spec = strokecast::AnimationSpec::from_def(&def)?;
    let progress = strokecast::Progress::new(args.progress)?;
    let geometry = strokecast::map_progress(&spec.shape, progress);

    let json = serde_json::to_string_pretty(&geometry).context("serialize geometry")?;
    println!("{json}");
    Ok(())
}

fn cmd_presets(args: PresetArgs) -> anyhow::Result<()> {
    let threading = threading(&args.threading);
    for def in strokecast::AnimationDef::reference_set(&args.out_dir) {
        let spec = strokecast::AnimationSpec::from_def(&def)?;
        let opts = strokecast::GifSinkOpts {
            out_path: spec.out.clone(),
            overwrite: true,
        };
        strokecast::render_to_gif(&spec, &opts, &threading)
            .with_context(|| format!("render '{}'", spec.out.display()))?;
        eprintln!("wrote {}", spec.out.display());
    }
    Ok(())
}

fn write_png(path: &Path, frame: &strokecast::FrameRGBA) -> anyhow::Result<()> {
    strokecast::ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
