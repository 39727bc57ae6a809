use crate::world::CellState;

/// Grid snapshot handed to a [`Visualizer`] after each step.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub simulation: usize,
    /// 0 for the initial placement, then the number of steps taken.
    pub step: usize,
    pub width: usize,
    pub height: usize,
    /// Row-major, `height` rows of `width` cells.
    pub cells: &'a [CellState],
}

impl Frame<'_> {
    pub fn row(&self, y: usize) -> &[CellState] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }
}

/// Observer notified with every grid frame. Must not influence the run.
pub trait Visualizer {
    fn enabled(&self) -> bool {
        true
    }

    fn observe(&mut self, frame: &Frame<'_>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {
    fn enabled(&self) -> bool {
        false
    }

    fn observe(&mut self, _frame: &Frame<'_>) {}
}
