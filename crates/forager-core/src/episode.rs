use crate::movement::MovementPolicy;
use crate::nn::{squared_error, Controller};
use crate::target::target_signal;
use crate::visualizer::{Frame, Visualizer};
use crate::world::GridWorld;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeState {
    Running,
    Arrived,
    BudgetExhausted,
}

impl EpisodeState {
    pub fn is_terminal(self) -> bool {
        self != EpisodeState::Running
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    pub state: EpisodeState,
    /// Steps taken before the episode ended. Equals the budget on exhaustion.
    pub steps: usize,
    /// Mean squared error between output and training target over the episode.
    pub mean_loss: f64,
}

/// Drives one episode on a borrowed controller and world.
///
/// The world's agent and food must already be placed; the controller keeps
/// whatever it learns once the runner is dropped.
pub struct EpisodeRunner<'a> {
    controller: &'a mut Controller,
    world: &'a mut GridWorld,
    movement: MovementPolicy,
    step_budget: usize,
    simulation: usize,
    state: EpisodeState,
    steps: usize,
    loss_sum: f64,
}

impl<'a> EpisodeRunner<'a> {
    pub fn new(
        controller: &'a mut Controller,
        world: &'a mut GridWorld,
        movement: MovementPolicy,
        step_budget: usize,
    ) -> Self {
        assert!(step_budget > 0, "step_budget must be positive");
        Self {
            controller,
            world,
            movement,
            step_budget,
            simulation: 0,
            state: EpisodeState::Running,
            steps: 0,
            loss_sum: 0.0,
        }
    }

    /// Simulation index reported in visualizer frames.
    pub fn with_simulation(mut self, simulation: usize) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn world(&self) -> &GridWorld {
        &*self.world
    }

    /// Advance one step. A no-op once the episode is terminal.
    pub fn step(&mut self, visualizer: &mut dyn Visualizer) -> EpisodeState {
        if self.state.is_terminal() {
            return self.state;
        }

        // The controller only ever sees where the food is.
        let input = self.world.food().coords();
        let act = self.controller.forward(&input);

        let (dx, dy) = self.movement.delta(&act.output);
        self.world.move_agent(dx, dy);

        let target = self
            .movement
            .training_target(target_signal(self.world.agent(), self.world.food()));
        self.loss_sum += squared_error(&act.output, &target);
        self.controller.update(&input, &act, &target);

        self.steps += 1;
        log::trace!(
            "sim {} step {}: output {:?} move ({dx}, {dy}) agent {:?} food {:?}",
            self.simulation,
            self.steps,
            act.output,
            self.world.agent(),
            self.world.food()
        );
        self.notify(visualizer);

        self.state = if self.world.arrived() {
            EpisodeState::Arrived
        } else if self.steps >= self.step_budget {
            EpisodeState::BudgetExhausted
        } else {
            EpisodeState::Running
        };
        self.state
    }

    fn notify(&self, visualizer: &mut dyn Visualizer) {
        if !visualizer.enabled() {
            return;
        }
        let cells = self.world.frame();
        visualizer.observe(&Frame {
            simulation: self.simulation,
            step: self.steps,
            width: self.world.width(),
            height: self.world.height(),
            cells: &cells,
        });
    }

    pub fn outcome(&self) -> EpisodeOutcome {
        EpisodeOutcome {
            state: self.state,
            steps: self.steps,
            mean_loss: if self.steps > 0 {
                self.loss_sum / self.steps as f64
            } else {
                0.0
            },
        }
    }

    /// Run to a terminal state, showing the initial placement first.
    pub fn run(mut self, visualizer: &mut dyn Visualizer) -> EpisodeOutcome {
        self.notify(visualizer);
        while !self.step(visualizer).is_terminal() {}
        self.outcome()
    }
}
