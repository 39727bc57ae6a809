use crate::world::Position;
use std::cmp::Ordering;

fn axis_direction(agent: usize, food: usize) -> f64 {
    match agent.cmp(&food) {
        Ordering::Less => 1.0,
        Ordering::Greater => -1.0,
        Ordering::Equal => 0.0,
    }
}

/// Direction the agent should have moved on each axis, in {-1, 0, 1}.
///
/// Compares raw coordinates; wraparound shortcuts are not considered.
pub fn target_signal(agent: Position, food: Position) -> [f64; 2] {
    [
        axis_direction(agent.x, food.x),
        axis_direction(agent.y, food.y),
    ]
}
