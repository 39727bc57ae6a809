use forager_core::{Frame, Visualizer};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Prints each frame as a digit grid and sleeps between frames.
pub struct TextRenderer<W: Write> {
    out: W,
    frame_delay: Duration,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, frame_delay: Duration) -> Self {
        Self { out, frame_delay }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let bound = format!("|{}|", "-".repeat(frame.width));
        writeln!(self.out, "simulation {} | step {}", frame.simulation, frame.step)?;
        writeln!(self.out, "{bound}")?;
        for y in 0..frame.height {
            let row: String = frame
                .row(y)
                .iter()
                .map(|c| char::from(b'0' + c.code()))
                .collect();
            writeln!(self.out, "|{row}|")?;
        }
        writeln!(self.out, "{bound}")?;
        self.out.flush()
    }
}

impl<W: Write> Visualizer for TextRenderer<W> {
    fn observe(&mut self, frame: &Frame<'_>) {
        if let Err(e) = self.write_frame(frame) {
            log::warn!("failed to render frame: {e}");
        }
        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forager_core::{GridWorld, Position};

    #[test]
    fn renders_bounded_digit_grid() {
        let world = GridWorld::with_positions(4, 2, Position::new(1, 0), Position::new(3, 1));
        let cells = world.frame();
        let frame = Frame {
            simulation: 2,
            step: 7,
            width: 4,
            height: 2,
            cells: &cells,
        };
        let mut renderer = TextRenderer::new(Vec::new(), Duration::ZERO);
        renderer.observe(&frame);
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(
            text,
            "simulation 2 | step 7\n|----|\n|0100|\n|0002|\n|----|\n"
        );
    }
}
