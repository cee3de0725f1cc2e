//! ASCII rendering of traversal snapshots.
//!
//! One frame per step: `#` blocked, `o` path, `@` the agent, `T` the
//! target, `.` everything else. Pacing and terminal control stay out of
//! the core; this is just an observer.

use std::io::{self, Stdout, Write};

use gridpath_core::{TraversalObserver, TraversalSnapshot};

pub struct AsciiRenderer<W: Write> {
    out: W,
}

impl AsciiRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn draw(&mut self, snapshot: &TraversalSnapshot<'_>) -> io::Result<()> {
        writeln!(self.out, "step {}", snapshot.step_count)?;
        for row in 0..snapshot.rows {
            for col in 0..snapshot.cols {
                let cell = row * snapshot.cols + col;
                let glyph = if snapshot.current == Some(cell) {
                    '@'
                } else if cell == snapshot.target {
                    'T'
                } else if snapshot.blocked.contains(&cell) {
                    '#'
                } else if snapshot.path.contains(&cell) {
                    'o'
                } else {
                    '.'
                };
                write!(self.out, "{} ", glyph)?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> TraversalObserver for AsciiRenderer<W> {
    fn on_step(&mut self, snapshot: &TraversalSnapshot<'_>) {
        if self.draw(snapshot).is_err() {
            // Output is gone; keep stepping, the report still matters.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_frame_glyphs() {
        let blocked = HashSet::from([1]);
        let path = [0, 2];
        let snapshot = TraversalSnapshot {
            rows: 2,
            cols: 2,
            blocked: &blocked,
            path: &path,
            current: Some(2),
            target: 3,
            step_count: 1,
        };

        let mut renderer = AsciiRenderer::new(Vec::new());
        renderer.on_step(&snapshot);
        let frame = String::from_utf8(renderer.out).unwrap();

        assert_eq!(frame, "step 1\no # \n@ T \n\n");
    }
}
