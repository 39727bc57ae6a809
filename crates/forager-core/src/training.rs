use crate::config::{SimConfig, SimConfigError};
use crate::episode::{EpisodeOutcome, EpisodeRunner, EpisodeState};
use crate::nn::Controller;
use crate::trend::{linear_regression, Trend, TrendError};
use crate::visualizer::Visualizer;
use crate::world::GridWorld;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainingError {
    #[error("cannot summarise training: {0}")]
    Trend(#[from] TrendError),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub seed: u64,
    /// Steps taken in each simulation, in run order.
    pub records: Vec<usize>,
    pub outcomes: Vec<EpisodeOutcome>,
    pub arrivals: usize,
    pub trend: Trend,
}

impl TrainingSummary {
    pub fn summary_line(&self) -> String {
        format!(
            "improvement = {}, steps at start = {}, steps at end = {}",
            self.trend.improvement as i64,
            self.trend.start_level as i64,
            self.trend.end_level as i64
        )
    }
}

/// Runs simulations back to back on one persistent controller.
pub struct Experiment {
    config: SimConfig,
    controller: Controller,
    world: GridWorld,
    rng: ChaCha12Rng,
}

impl Experiment {
    pub fn new(config: SimConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(config: SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        Ok(Self {
            controller: Controller::from_config(&config),
            world: GridWorld::new(config.width, config.height),
            rng: ChaCha12Rng::seed_from_u64(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Place agent and food at random and run a single episode.
    pub fn run_episode(
        &mut self,
        simulation: usize,
        visualizer: &mut dyn Visualizer,
    ) -> EpisodeOutcome {
        self.world.place_random(&mut self.rng);
        let outcome = EpisodeRunner::new(
            &mut self.controller,
            &mut self.world,
            self.config.movement,
            self.config.step_budget,
        )
        .with_simulation(simulation)
        .run(visualizer);
        log::debug!(
            "simulation {simulation}: {:?} after {} steps (mean loss {:.4})",
            outcome.state,
            outcome.steps,
            outcome.mean_loss
        );
        outcome
    }

    pub fn run(&mut self, visualizer: &mut dyn Visualizer) -> Result<TrainingSummary, TrainingError> {
        log::info!(
            "running {} simulations on a {}x{} grid (budget {}, hidden {}, movement {:?}, seed {})",
            self.config.simulations,
            self.config.width,
            self.config.height,
            self.config.step_budget,
            self.config.hidden_count,
            self.config.movement,
            self.config.seed
        );

        let mut outcomes = Vec::with_capacity(self.config.simulations);
        for simulation in 0..self.config.simulations {
            outcomes.push(self.run_episode(simulation, visualizer));
        }

        let records: Vec<usize> = outcomes.iter().map(|o| o.steps).collect();
        let series: Vec<f64> = records.iter().map(|&s| s as f64).collect();
        let trend = linear_regression(&series)?;
        let arrivals = outcomes
            .iter()
            .filter(|o| o.state == EpisodeState::Arrived)
            .count();
        log::info!(
            "{arrivals}/{} arrivals; trend {:.2} -> {:.2} (improvement {:.2})",
            outcomes.len(),
            trend.start_level,
            trend.end_level,
            trend.improvement
        );

        Ok(TrainingSummary {
            seed: self.config.seed,
            records,
            outcomes,
            arrivals,
            trend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementPolicy;
    use crate::visualizer::NullVisualizer;

    #[test]
    fn records_one_entry_per_simulation() {
        let config = SimConfig {
            simulations: 7,
            ..SimConfig::default()
        };
        let summary = Experiment::new(config).run(&mut NullVisualizer).unwrap();
        assert_eq!(summary.records.len(), 7);
        assert_eq!(summary.outcomes.len(), 7);
    }

    #[test]
    fn truncate_runs_are_flat_at_the_budget() {
        let summary = Experiment::new(SimConfig::default())
            .run(&mut NullVisualizer)
            .unwrap();
        assert_eq!(summary.records, vec![20; 5]);
        assert_eq!(summary.arrivals, 0);
        assert_eq!(
            summary.summary_line(),
            "improvement = 0, steps at start = 20, steps at end = 20"
        );
    }

    #[test]
    fn single_simulation_is_degenerate() {
        let config = SimConfig {
            simulations: 1,
            ..SimConfig::default()
        };
        let err = Experiment::new(config).run(&mut NullVisualizer).unwrap_err();
        assert_eq!(
            err,
            TrainingError::Trend(TrendError::DegenerateRegression { points: 1 })
        );
        assert_eq!(
            err.to_string(),
            "cannot summarise training: regression needs at least two distinct points, got 1"
        );
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = SimConfig {
            width: 1,
            height: 1,
            ..SimConfig::default()
        };
        assert!(matches!(
            Experiment::try_new(config),
            Err(SimConfigError::SingleCellGrid)
        ));
    }

    #[test]
    fn controller_is_shared_across_simulations() {
        let config = SimConfig {
            movement: MovementPolicy::ScaleShift,
            ..SimConfig::default()
        };
        let mut experiment = Experiment::new(config);
        let fresh = experiment.controller().weights_ho().clone();
        experiment.run_episode(0, &mut NullVisualizer);
        let after_one = experiment.controller().weights_ho().clone();
        experiment.run_episode(1, &mut NullVisualizer);
        assert_ne!(&fresh, &after_one);
        assert_ne!(experiment.controller().weights_ho(), &after_one);
    }

    #[test]
    fn summary_serializes_to_json() {
        let summary = Experiment::new(SimConfig::default())
            .run(&mut NullVisualizer)
            .unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"budget_exhausted\""));
        let back: TrainingSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records, summary.records);
    }
}
