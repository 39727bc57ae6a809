mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use forager_core::{Experiment, MovementPolicy, NullVisualizer, SimConfig};
use render::TextRenderer;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Movement {
    /// Truncate outputs to whole steps (the agent never moves)
    Truncate,
    /// Read outputs as 2o - 1 and round
    ScaleShift,
}

impl From<Movement> for MovementPolicy {
    fn from(m: Movement) -> Self {
        match m {
            Movement::Truncate => MovementPolicy::Truncate,
            Movement::ScaleShift => MovementPolicy::ScaleShift,
        }
    }
}

/// Train a tiny neural controller online to walk a grid agent to food.
#[derive(Parser, Debug)]
#[command(name = "forager", version)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Placement RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulations run on the shared controller
    #[arg(long)]
    simulations: Option<usize>,

    /// Step budget per episode
    #[arg(long)]
    steps: Option<usize>,

    /// Hidden layer width
    #[arg(long)]
    hidden: Option<usize>,

    /// Learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// How controller outputs become moves
    #[arg(long, value_enum)]
    movement: Option<Movement>,

    /// Print the grid after every step
    #[arg(long)]
    render: bool,

    /// Seconds to wait between rendered frames
    #[arg(long)]
    frame_delay: Option<f64>,

    /// Print the full summary as JSON instead of the one-line report
    #[arg(long)]
    json: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Where rendered frames are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameSink {
    Stdout,
    // JSON output owns stdout.
    Stderr,
}

impl FrameSink {
    fn writer(self) -> Box<dyn Write> {
        match self {
            FrameSink::Stdout => Box::new(io::stdout().lock()),
            FrameSink::Stderr => Box::new(io::stderr().lock()),
        }
    }
}

impl Cli {
    fn frame_sink(&self) -> FrameSink {
        if self.json {
            FrameSink::Stderr
        } else {
            FrameSink::Stdout
        }
    }

    fn build_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(n) = self.simulations {
            config.simulations = n;
        }
        if let Some(n) = self.steps {
            config.step_budget = n;
        }
        if let Some(n) = self.hidden {
            config.hidden_count = n;
        }
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(m) = self.movement {
            config.movement = m.into();
        }
        if self.render {
            config.render = true;
        }
        if let Some(delay) = self.frame_delay {
            config.frame_delay_secs = delay;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = cli.build_config()?;
    let mut experiment = Experiment::try_new(config).context("invalid configuration")?;

    let summary = if experiment.config().render {
        let delay = Duration::from_secs_f64(experiment.config().frame_delay_secs);
        let mut renderer = TextRenderer::new(cli.frame_sink().writer(), delay);
        experiment.run(&mut renderer)?
    } else {
        experiment.run(&mut NullVisualizer)?
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing summary")?
        );
    } else {
        println!("{}", summary.summary_line());
    }
    Ok(())
}
