use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vacmap", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a map payload to a PNG.
    Render(RenderArgs),
    /// Print the calibration points for a map payload.
    Calibrate(CalibrateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input map JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Write render metadata (calibration, robot, rooms, ...) as JSON to this path.
    #[arg(long)]
    meta: Option<PathBuf>,

    /// Render settings JSON; defaults apply to any missing field.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Render the payload this many times, exercising the base-layer cache.
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

#[derive(Parser, Debug)]
struct CalibrateArgs {
    /// Input map JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Render settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Rotation in degrees (0, 90, 180 or 270).
    #[arg(long, default_value_t = 0)]
    rotation: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Calibrate(args) => cmd_calibrate(args),
    }
}

fn read_map_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open map '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse map JSON '{}'", path.display()))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<vacmap::RenderSettings> {
    let Some(path) = path else {
        return Ok(vacmap::RenderSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    vacmap::RenderSettings::from_json(&text)
        .with_context(|| format!("load settings '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }
    let map = read_map_json(&args.in_path)?;
    let settings = load_settings(args.settings.as_deref())?;
    let mut renderer = vacmap::MapRenderer::new(settings)?;

    let mut last = None;
    for _ in 0..args.frames {
        last = Some(renderer.render(&map)?);
    }
    let render = last.context("no frame rendered")?;
    tracing::info!(
        rebuilds = renderer.cache().rebuilds(),
        frames = args.frames,
        "render finished"
    );

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    render
        .image
        .to_rgba_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(meta) = &args.meta {
        let f = File::create(meta).with_context(|| format!("create '{}'", meta.display()))?;
        serde_json::to_writer_pretty(f, &render)
            .with_context(|| format!("write metadata '{}'", meta.display()))?;
        eprintln!("wrote {}", meta.display());
    }
    Ok(())
}

fn cmd_calibrate(args: CalibrateArgs) -> anyhow::Result<()> {
    let map = read_map_json(&args.in_path)?;
    let settings = load_settings(args.settings.as_deref())?;
    let mut renderer = vacmap::MapRenderer::new(settings)?;
    renderer.render(&map)?;

    let points = renderer.calibration_data(args.rotation)?;
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}
