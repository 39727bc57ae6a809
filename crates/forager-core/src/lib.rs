pub mod config;
pub mod episode;
pub mod matrix;
pub mod movement;
pub mod nn;
pub mod target;
pub mod training;
pub mod trend;
pub mod visualizer;
pub mod world;

pub use config::{SimConfig, SimConfigError};
pub use episode::{EpisodeOutcome, EpisodeRunner, EpisodeState};
pub use movement::MovementPolicy;
pub use nn::{Activations, Controller};
pub use training::{Experiment, TrainingError, TrainingSummary};
pub use trend::{linear_regression, Trend, TrendError};
pub use visualizer::{Frame, NullVisualizer, Visualizer};
pub use world::{CellState, GridWorld, Position};
