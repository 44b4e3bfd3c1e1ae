#![deny(unsafe_code)]
//! Offline renderer for the swirl particle field.
//!
//! Subcommands:
//! - `render [engine]`: run N frames and write the last one as a PNG
//! - `frames [engine]`: run N frames and write every k-th frame to a directory
//! - `noise-range`: sample the value-noise field and report its observed range
//! - `list`: print available engines and palettes

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use swirl_core::noise::sample_range;
use swirl_core::{Palette, Raster, Seed};
use swirl_engines::{Animation, EngineKind, FixedRate, FramePacer, Tick, Unpaced};
use tracing::{info, Level};

const DEFAULT_WIDTH: usize = 800;
const DEFAULT_HEIGHT: usize = 600;
const DEFAULT_STEPS: usize = 600;
const DEFAULT_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "swirl", about = "Swirl particle field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Run description shared by `render` and `frames`. Flags override `--config`.
#[derive(Args)]
struct RunArgs {
    /// Engine name (default "swirl").
    engine: Option<String>,

    /// Seed file (engine, width, height, params, seed, steps) as JSON.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Surface height in pixels.
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Number of frames to simulate.
    #[arg(short, long)]
    steps: Option<usize>,

    /// PRNG seed for deterministic output.
    #[arg(long)]
    seed: Option<u64>,

    /// Particle palette (swirl, ember, glacier).
    #[arg(short, long)]
    palette: Option<String>,

    /// Engine parameters as a JSON object, merged over the config's.
    #[arg(long)]
    params: Option<String>,

    /// Pace frames at this rate instead of running flat out.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    fps: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the field for N frames and write the final frame as a PNG.
    Render {
        #[command(flatten)]
        args: RunArgs,

        /// Output file path.
        #[arg(short, long, default_value = "swirl.png")]
        output: PathBuf,
    },
    /// Run the field for N frames and write every k-th frame as a PNG.
    Frames {
        #[command(flatten)]
        args: RunArgs,

        /// Output directory, created if missing.
        #[arg(short, long, default_value = "frames")]
        out_dir: PathBuf,

        /// Write one frame out of every `every`.
        #[arg(short, long, default_value_t = 10)]
        every: usize,
    },
    /// Sample value noise on a grid and report min, max, and mean.
    NoiseRange {
        /// Lower corner of the sampled square, on both axes.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        origin: f64,

        /// Side length of the sampled square, in lattice units.
        #[arg(long, default_value_t = 256.0)]
        extent: f64,

        /// Samples per axis.
        #[arg(long, default_value_t = 512)]
        samples: usize,
    },
    /// List available engines and palettes.
    List,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the run description: config file (if any), then flags on top.
fn resolve_seed(args: &RunArgs) -> Result<Seed, CliError> {
    let mut seed = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
            serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display())))?
        }
        None => {
            let mut seed = Seed::new("swirl", DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_SEED);
            seed.steps = DEFAULT_STEPS;
            seed
        }
    };

    if let Some(engine) = &args.engine {
        seed.engine = engine.clone();
    }
    if let Some(width) = args.width {
        seed.width = width;
    }
    if let Some(height) = args.height {
        seed.height = height;
    }
    if let Some(steps) = args.steps {
        seed.steps = steps;
    }
    if let Some(s) = args.seed {
        seed.seed = s;
    }

    if let Some(raw) = &args.params {
        let overrides: Value = serde_json::from_str(raw)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let Value::Object(overrides) = overrides else {
            return Err(CliError::Input("--params must be a JSON object".into()));
        };
        merge_params(&mut seed.params, overrides);
    }
    if let Some(palette) = &args.palette {
        let mut overrides = serde_json::Map::new();
        overrides.insert("palette".into(), Value::String(palette.clone()));
        merge_params(&mut seed.params, overrides);
    }

    seed.validate()?;
    Ok(seed)
}

fn merge_params(params: &mut Value, overrides: serde_json::Map<String, Value>) {
    match params {
        Value::Object(map) => map.extend(overrides),
        other => *other = Value::Object(overrides),
    }
}

fn build(seed: &Seed) -> Result<Animation<EngineKind, Raster>, CliError> {
    let engine = EngineKind::from_name(
        &seed.engine,
        seed.width as f64,
        seed.height as f64,
        seed.seed,
        &seed.params,
    )?;
    let raster = Raster::new(seed.width, seed.height)?;
    Ok(Animation::new(engine, raster))
}

fn pacer(fps: Option<u32>) -> Box<dyn FramePacer> {
    match fps {
        Some(fps) => Box::new(FixedRate::new(fps)),
        None => Box::new(Unpaced::default()),
    }
}

fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{frame:05}.png"))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            let palettes = Palette::list_names();
            if cli.json {
                print_json(&json!({
                    "engines": engines,
                    "palettes": palettes,
                }))?;
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Render { args, output } => {
            let seed = resolve_seed(&args)?;
            let mut anim = build(&seed)?;
            anim.start();
            let frames = anim.run(pacer(args.fps).as_mut(), Some(seed.steps as u64))?;
            swirl_engines::snapshot::write_png(anim.surface(), &output)?;
            info!(frames, output = %output.display(), "render complete");

            if cli.json {
                print_json(&json!({
                    "seed": seed,
                    "output": output.display().to_string(),
                }))?;
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} frames, seed {}) -> {}",
                    seed.engine,
                    seed.width,
                    seed.height,
                    frames,
                    seed.seed,
                    output.display()
                );
            }
        }
        Command::Frames { args, out_dir, every } => {
            if every == 0 {
                return Err(CliError::Input("--every must be at least 1".into()));
            }
            let seed = resolve_seed(&args)?;
            fs::create_dir_all(&out_dir)
                .map_err(|e| CliError::Io(format!("creating {}: {e}", out_dir.display())))?;
            let mut anim = build(&seed)?;
            anim.start();

            let mut pacer = pacer(args.fps);
            let mut written = Vec::new();
            for _ in 0..seed.steps {
                pacer.wait_for_frame();
                if anim.tick()? == Tick::Stopped {
                    break;
                }
                let frame = anim.frames();
                if frame % every as u64 == 0 {
                    let path = frame_path(&out_dir, frame);
                    swirl_engines::snapshot::write_png(anim.surface(), &path)?;
                    written.push(path);
                }
            }
            info!(frames = anim.frames(), written = written.len(), "frames complete");

            if cli.json {
                let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
                print_json(&json!({
                    "seed": seed,
                    "files": files,
                }))?;
            } else {
                eprintln!(
                    "wrote {} frames of {} to {}",
                    written.len(),
                    seed.engine,
                    out_dir.display()
                );
            }
        }
        Command::NoiseRange {
            origin,
            extent,
            samples,
        } => {
            if !(origin.is_finite() && extent.is_finite() && extent > 0.0) {
                return Err(CliError::Input("--origin and --extent must be finite, --extent positive".into()));
            }
            let range = sample_range(origin, extent, samples)
                .ok_or_else(|| CliError::Input("--samples must be at least 1".into()))?;
            if cli.json {
                print_json(&serde_json::to_value(range)?)?;
            } else {
                println!(
                    "{} samples: min {:.6}, max {:.6}, mean {:.6}",
                    range.samples, range.min, range.max, range.mean
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
