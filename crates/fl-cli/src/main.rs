mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use fl_core::{
    Automaton, Boundary, Coord, DenseField, FrameSink, FrameView, RunSummary, SimConfig, Simulation,
    vacuum_for,
};
use fl_io::{Canvas, GRID_COLOR, GifRecorder, read_life105_file, render_dense, write_gif, write_life105};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{SimArgs, parse_offset, parse_size};

#[derive(Parser)]
#[command(name = "fuzzy-life", about = "Continuous Game of Life on an unbounded grid")]
struct Cli {
    /// TOML file with simulation parameters (defaults to $FUZZY_LIFE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sparse simulation with an auto-framing camera
    Run(RunArgs),

    /// Run the bounded dense-field simulation
    Dense(DenseArgs),

    /// Print the vacuum (background) value for the configured sharpness
    Vacuum {
        #[command(flatten)]
        sim: SimArgs,
    },

    /// Read a Life 1.05 file and print it normalized
    Pattern {
        /// Pattern file
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Initial pattern (Life 1.05); a random block is used when absent
    #[arg(long)]
    pattern: Option<PathBuf>,

    /// Size of the random starting block
    #[arg(long, value_parser = parse_size, default_value = "20x20")]
    random: (u32, u32),

    /// Seed for the random starting block
    #[arg(long)]
    seed: Option<u64>,

    /// Where to place the pattern's origin
    #[arg(long, value_parser = parse_offset, default_value = "0,0", allow_hyphen_values = true)]
    offset: (i64, i64),

    /// Maximum number of generations
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Write every frame to an animated GIF
    #[arg(long)]
    gif: Option<PathBuf>,

    /// Write the final frame as an image (format from extension)
    #[arg(long)]
    last_frame: Option<PathBuf>,

    /// Frame size in pixels
    #[arg(long, value_parser = parse_size, default_value = "800x450")]
    size: (u32, u32),

    /// Draw grid lines every 10 cells
    #[arg(long)]
    grid: bool,

    /// Delay between GIF frames in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u32,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BoundaryArg {
    Wrap,
    Zero,
}

impl From<BoundaryArg> for Boundary {
    fn from(b: BoundaryArg) -> Self {
        match b {
            BoundaryArg::Wrap => Boundary::Wrap,
            BoundaryArg::Zero => Boundary::Zero,
        }
    }
}

#[derive(clap::Args)]
struct DenseArgs {
    #[command(flatten)]
    sim: SimArgs,

    #[arg(long, default_value_t = 200)]
    width: usize,

    #[arg(long, default_value_t = 200)]
    height: usize,

    /// How cells past the edge are read
    #[arg(long, value_enum, default_value = "wrap")]
    boundary: BoundaryArg,

    /// Initial pattern (Life 1.05), centered; random values when absent
    #[arg(long)]
    pattern: Option<PathBuf>,

    /// Keep only the middle third of a random start
    #[arg(long)]
    mask: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Write every frame to an animated GIF
    #[arg(long)]
    gif: Option<PathBuf>,

    #[arg(long, default_value_t = 100)]
    delay_ms: u32,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn rng_from(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Run(args) => cmd_run(&cli, args),
        Commands::Dense(args) => cmd_dense(&cli, args),
        Commands::Vacuum { sim } => cmd_vacuum(&cli, sim),
        Commands::Pattern { path } => cmd_pattern(path),
    }
}

fn resolve_config(cli: &Cli, sim: &SimArgs) -> Result<SimConfig> {
    config::resolve(cli.config.as_deref(), sim).context("invalid simulation parameters")
}

/// Logs each frame and optionally keeps it for export.
struct Driver {
    recorder: Option<GifRecorder>,
}

impl FrameSink for Driver {
    fn paint(&mut self, frame: &FrameView<'_>) {
        tracing::debug!(
            generation = frame.generation,
            live = frame.cells.len(),
            x_min = frame.viewport.x_min,
            y_min = frame.viewport.y_min,
            x_max = frame.viewport.x_max,
            y_max = frame.viewport.y_max,
            "frame"
        );
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.paint(frame);
        }
    }
}

fn load_pattern(path: &Path, (x0, y0): (i64, i64)) -> Result<Vec<Coord>> {
    let cells = read_life105_file(x0, y0, path)
        .with_context(|| format!("failed to read pattern {}", path.display()))?;
    if cells.is_empty() {
        bail!("pattern {} has no live cells", path.display());
    }
    Ok(cells.into_iter().collect())
}

fn cmd_run(cli: &Cli, args: &RunArgs) -> Result<()> {
    let config = resolve_config(cli, &args.sim)?;

    let automaton = match &args.pattern {
        Some(path) => Automaton::from_points(&config, load_pattern(path, args.offset)?)?,
        None => {
            let (w, h) = args.random;
            let origin = Coord::from(args.offset);
            Automaton::from_random(&config, origin, w, h, &mut rng_from(args.seed))?
        }
    };

    let vacuum = automaton.vacuum_estimate();
    tracing::info!(
        sharpness = automaton.sharpness(),
        epsilon = automaton.epsilon(),
        vacuum = vacuum.value,
        iterations = vacuum.iterations,
        residual = vacuum.residual,
        "estimated vacuum"
    );
    if vacuum.residual > automaton.epsilon() {
        tracing::warn!(
            "vacuum estimate did not settle (residual {:.3e}); background may be wrong",
            vacuum.residual
        );
    }

    let recorder = (args.gif.is_some() || args.last_frame.is_some()).then(|| {
        let (w, h) = args.size;
        let canvas = Canvas::new(w, h);
        GifRecorder::new(if args.grid { canvas.with_grid(GRID_COLOR) } else { canvas })
    });
    let mut driver = Driver { recorder };

    let mut sim = Simulation::from_config(&config, automaton);
    let summary = sim.run(args.steps, &mut driver);

    if let Some(recorder) = &driver.recorder {
        if let Some(path) = &args.gif {
            recorder
                .write_animation(path, args.delay_ms)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        if let Some(path) = &args.last_frame {
            recorder
                .write_last(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }

    print_summary(&summary, args.json)
}

fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
        println!("{text}");
        return Ok(());
    }
    if summary.decayed {
        println!("decayed at generation {}", summary.generations);
    }
    println!("generations: {}", summary.generations);
    println!("live:        {} (peak {})", summary.final_live, summary.peak_live);
    println!("vacuum:      {:.6e}", summary.vacuum);
    if let Some(vp) = summary.viewport {
        println!(
            "viewport:    x [{}, {}]  y [{}, {}]",
            vp.x_min, vp.x_max, vp.y_min, vp.y_max
        );
    }
    Ok(())
}

fn cmd_dense(cli: &Cli, args: &DenseArgs) -> Result<()> {
    let config = resolve_config(cli, &args.sim)?;
    let mut field = DenseField::new(
        args.width,
        args.height,
        config.sharpness,
        args.boundary.into(),
    )?;

    match &args.pattern {
        Some(path) => {
            let origin = ((args.width / 2) as i64, (args.height / 2) as i64);
            field.stamp(load_pattern(path, origin)?);
        }
        None => {
            field.randomize(&mut rng_from(args.seed));
            if args.mask {
                field.mask_center();
            }
        }
    }

    let mut frames = Vec::new();
    if args.gif.is_some() {
        frames.push(render_dense(&field));
    }
    for generation in 1..=args.steps {
        field.step();
        tracing::debug!(generation, "dense step");
        if args.gif.is_some() {
            frames.push(render_dense(&field));
        }
    }

    if let Some(path) = &args.gif {
        write_gif(path, &frames, args.delay_ms)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let mean = field.cells().iter().sum::<f64>() / field.cells().len() as f64;
    println!(
        "dense {}x{}: {} steps, mean value {:.4}",
        field.width(),
        field.height(),
        args.steps,
        mean
    );
    Ok(())
}

fn cmd_vacuum(cli: &Cli, sim: &SimArgs) -> Result<()> {
    let config = resolve_config(cli, sim)?;
    let est = vacuum_for(&config)?;
    println!("sharpness:  {}", config.sharpness);
    println!("vacuum:     {:.6e}", est.value);
    println!("iterations: {}", est.iterations);
    println!("residual:   {:.3e}", est.residual);
    Ok(())
}

fn cmd_pattern(path: &Path) -> Result<()> {
    let cells = read_life105_file(0, 0, path)
        .with_context(|| format!("failed to read pattern {}", path.display()))?;
    write_life105(&cells, std::io::stdout().lock()).context("failed to write pattern")?;
    Ok(())
}
