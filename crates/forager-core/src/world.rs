use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn coords(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

/// Cell contents as seen by a visualizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CellState {
    Empty = 0,
    Agent = 1,
    Food = 2,
    AgentOnFood = 3,
}

impl CellState {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Toroidal grid holding one agent and one food cell.
#[derive(Clone, Debug)]
pub struct GridWorld {
    width: usize,
    height: usize,
    agent: Position,
    food: Position,
}

impl GridWorld {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_positions(width, height, Position::new(0, 0), Position::new(0, 0))
    }

    pub fn with_positions(width: usize, height: usize, agent: Position, food: Position) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let world = Self {
            width,
            height,
            agent,
            food,
        };
        assert!(
            world.contains(agent) && world.contains(food),
            "positions {agent:?} / {food:?} outside {width}x{height} grid"
        );
        world
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn set_agent(&mut self, pos: Position) {
        self.assert_in_bounds(pos);
        self.agent = pos;
    }

    pub fn set_food(&mut self, pos: Position) {
        self.assert_in_bounds(pos);
        self.food = pos;
    }

    fn assert_in_bounds(&self, pos: Position) {
        assert!(
            self.contains(pos),
            "position {pos:?} outside {}x{} grid",
            self.width,
            self.height
        );
    }

    /// Random agent, then food re-drawn until it lands on a different cell.
    ///
    /// Panics on a single-cell grid, where no distinct food cell exists.
    pub fn place_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let cells = self.width.checked_mul(self.height).unwrap_or(usize::MAX);
        assert!(
            cells > 1,
            "need two distinct cells to place food, grid is {}x{}",
            self.width,
            self.height
        );
        self.agent = self.random_position(rng);
        self.food = self.random_position(rng);
        while self.food == self.agent {
            self.food = self.random_position(rng);
        }
    }

    fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Offset `pos` by `(dx, dy)` with toroidal wrapping.
    pub fn step(&self, pos: Position, dx: i64, dy: i64) -> Position {
        Position::new(
            wrap(pos.x, dx, self.width),
            wrap(pos.y, dy, self.height),
        )
    }

    pub fn move_agent(&mut self, dx: i64, dy: i64) -> Position {
        self.agent = self.step(self.agent, dx, dy);
        self.agent
    }

    pub fn arrived(&self) -> bool {
        self.agent == self.food
    }

    pub fn cell(&self, x: usize, y: usize) -> CellState {
        let here = Position::new(x, y);
        match (here == self.agent, here == self.food) {
            (true, true) => CellState::AgentOnFood,
            (true, false) => CellState::Agent,
            (false, true) => CellState::Food,
            (false, false) => CellState::Empty,
        }
    }

    /// Row-major cell states, `height` rows of `width` cells.
    pub fn frame(&self) -> Vec<CellState> {
        let mut cells = vec![CellState::Empty; self.width * self.height];
        cells[self.food.y * self.width + self.food.x] = CellState::Food;
        let agent_idx = self.agent.y * self.width + self.agent.x;
        cells[agent_idx] = if self.arrived() {
            CellState::AgentOnFood
        } else {
            CellState::Agent
        };
        cells
    }
}

fn wrap(coord: usize, delta: i64, size: usize) -> usize {
    let size = size as i128;
    (coord as i128 + delta as i128).rem_euclid(size) as usize
}
