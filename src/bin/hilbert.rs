//! `hilbert`: generates walk statistics and plays "Running out of Hilbert space".
//!
//! **Usage:**
//! ```
//! hilbert generate [--device ibmqx4] [--length 30] [--samples 10] [--structure hypercube|graph]
//! hilbert play [--method run|load|auto] [--variant classic|quantpus] [--no-intro]
//! ```
//!
//! The backend is taken from `QREATIVE_BACKEND`, `QREATIVE_SHOTS` and
//! `QREATIVE_SEED`, each overridable on the command line.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info, warn};
use qreative::core::constants::walk::{LENGTH, SAMPLES};
use qreative::game::Console;
use qreative::{
    BackendConfig, GameConfig, Graph, QreativeError, Session, Status, Structure, Variant, WalkConfig, WalkData,
    backend_from_config, cache, generate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Quantum random walks and the game built on them.
#[derive(Parser)]
#[command(name = "hilbert", about = "Walk statistics and the 'Running out of Hilbert space' game")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run walks on a backend and write their statistics to the cache.
    Generate {
        #[command(flatten)]
        walk: WalkArgs,
        /// Space explored by the walk.
        #[arg(long, value_enum, default_value_t = StructureArg::Hypercube)]
        structure: StructureArg,
        /// Start state shared by every sample (bitstring or node index).
        #[arg(long)]
        start: Option<String>,
    },
    /// Play a game on generated or cached statistics.
    Play {
        #[command(flatten)]
        walk: WalkArgs,
        /// Where the statistics come from.
        #[arg(long, value_enum, default_value_t = Method::Auto)]
        method: Method,
        /// Rule set: `classic` or `quantpus`.
        #[arg(long, default_value = "quantpus")]
        variant: Variant,
        /// Skip the story before a quantpus game.
        #[arg(long)]
        no_intro: bool,
    },
}

#[derive(Args)]
struct WalkArgs {
    /// Device name (`ibmqx4`, `ibmq_5_tenerife`), qubit count, or `grid:LxW`.
    #[arg(long, default_value = "ibmqx4")]
    device: String,
    /// Steps per walk.
    #[arg(long, default_value_t = LENGTH)]
    length: usize,
    /// Independent walks.
    #[arg(long, default_value_t = SAMPLES)]
    samples: usize,
    /// Statistics cache file. Defaults to `walk_<device>_<length>.json`.
    #[arg(long)]
    cache: Option<PathBuf>,
    /// Backend name, overriding `QREATIVE_BACKEND`.
    #[arg(long)]
    backend: Option<String>,
    /// Shots per circuit, overriding `QREATIVE_SHOTS`.
    #[arg(long)]
    shots: Option<usize>,
    /// Seed for reproducible runs, overriding `QREATIVE_SEED`.
    #[arg(long)]
    seed: Option<u64>,
}

impl WalkArgs {
    fn backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::from_env();
        if let Some(name) = &self.backend {
            config.kind = name.parse();
        }
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }

    fn cache_path(&self) -> PathBuf {
        self.cache.clone().unwrap_or_else(|| {
            let device: String = self.device.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
            PathBuf::from(format!("walk_{}_{}.json", device, self.length))
        })
    }

    fn walk_config(&self, shots: usize) -> WalkConfig {
        WalkConfig { length: self.length, samples: self.samples, shots, ..WalkConfig::default() }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StructureArg {
    Hypercube,
    Graph,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Generate fresh statistics and cache them.
    Run,
    /// Use the cache only.
    Load,
    /// Generate when a backend is available, otherwise use the cache.
    Auto,
}

fn setup_logger(verbosity: u8) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message)))
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run_walks(
    args: &WalkArgs,
    structure: &Structure,
    start: Option<&str>,
    config: &BackendConfig,
    rng: &mut StdRng,
) -> Result<WalkData, QreativeError> {
    let mut backend = backend_from_config(config)?;
    generate(backend.as_mut(), structure, &args.walk_config(config.shots), start, rng)
}

fn load_cache(path: &Path) -> Result<WalkData> {
    cache::load(path).with_context(|| format!("Failed to load statistics from {}", path.display()))
}

fn statistics(args: &WalkArgs, method: Method, rng: &mut StdRng) -> Result<WalkData> {
    let path = args.cache_path();
    if method == Method::Load {
        return load_cache(&path);
    }
    let config = args.backend_config();
    let structure = Structure::Hypercube(Graph::device(&args.device).context("Unknown device")?);
    match run_walks(args, &structure, None, &config, rng) {
        Ok(data) => {
            cache::save(&path, &data).with_context(|| format!("Failed to cache statistics to {}", path.display()))?;
            Ok(data)
        }
        Err(QreativeError::BackendUnavailable { message }) if method == Method::Auto => {
            warn!("{}; falling back to {}", message, path.display());
            load_cache(&path)
        }
        Err(e) => Err(e).context("Failed to generate walk statistics"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose).context("Failed to set up logging")?;

    match cli.command {
        Command::Generate { walk, structure, start } => {
            let config = walk.backend_config();
            let graph = Graph::device(&walk.device).context("Unknown device")?;
            let structure = match structure {
                StructureArg::Hypercube => Structure::Hypercube(graph),
                StructureArg::Graph => Structure::Graph(graph),
            };
            let mut rng = make_rng(config.seed);
            let data = run_walks(&walk, &structure, start.as_deref(), &config, &mut rng)
                .context("Failed to generate walk statistics")?;
            let path = walk.cache_path();
            cache::save(&path, &data).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Written: {} ({} samples, {} steps each)", path.display(), data.samples(), data.length());
        }
        Command::Play { walk, method, variant, no_intro } => {
            let mut rng = make_rng(walk.backend_config().seed);
            let data = statistics(&walk, method, &mut rng)?;
            info!("playing on {} sample(s) of length {}", data.samples(), data.length());
            let config = GameConfig { variant, ..GameConfig::default() };
            let mut session = Session::from_walk(&data, config, &mut rng).context("Failed to start a session")?;

            let mut console = Console::new(io::stdin().lock(), io::stdout());
            if variant == Variant::Quantpus && !no_intro {
                console.intro()?;
            }
            let status = console.play(&mut session, &mut rng)?;
            if status != Status::Won {
                info!("session ended with {:?} at {}", status, session.position());
            }
        }
    }
    Ok(())
}
