use crate::graphics::GraphicsTrace;

/// A turtle-style drawing surface driven by the learner's program
///
/// The grader never sees pixels. It only reads back the trace of headings
/// and segment lengths once the program has finished.
pub trait DrawingSurface {
    /// Relative heading change in degrees, positive turns clockwise
    fn turn(&mut self, degrees: f64);

    /// Draws a segment of signed `length` along the current heading
    fn move_by(&mut self, length: f64);

    /// Clears the drawing before an attempt
    fn reset(&mut self);

    /// The segments drawn since the last reset
    fn trace(&self) -> GraphicsTrace;
}

/// Bearing-keyed turtle
///
/// Segments drawn along the same heading are merged into one entry, and
/// the trace lists headings in ascending order. A square therefore looks
/// the same whichever corner it was started from.
#[derive(Debug, Default)]
pub struct Turtle {
    bearing: f64,
    /// `(bearing, total length)` in first-drawn order
    history: Vec<(f64, f64)>,
}

impl Turtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }
}

/// Folds any heading into `[0, 360)`
fn normalize_bearing(bearing: f64) -> f64 {
    let folded = if bearing >= 0.0 {
        bearing % 360.0
    } else {
        360.0 - (-bearing) % 360.0
    };
    folded % 360.0
}

impl DrawingSurface for Turtle {
    fn turn(&mut self, degrees: f64) {
        self.bearing = normalize_bearing(self.bearing + degrees);
    }

    #[allow(clippy::float_cmp)]
    fn move_by(&mut self, length: f64) {
        let bearing = self.bearing;
        match self.history.iter_mut().find(|(b, _)| *b == bearing) {
            Some((_, total)) => *total += length,
            None => self.history.push((bearing, length)),
        }
    }

    fn reset(&mut self) {
        self.bearing = 0.0;
        self.history.clear();
    }

    fn trace(&self) -> GraphicsTrace {
        let mut segments: Vec<(f64, f64)> = self
            .history
            .iter()
            .map(|&(bearing, length)| (bearing.trunc(), length))
            .collect();
        segments.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut trace = GraphicsTrace::new();
        for (angle, length) in segments {
            trace.record_segment(angle, length);
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_forward_then_right() {
        let mut turtle = Turtle::new();
        for _ in 0..4 {
            turtle.move_by(10.0);
            turtle.turn(90.0);
        }
        let trace = turtle.trace();
        assert_eq!(trace.angles(), [0.0, 90.0, 180.0, 270.0]);
        assert!(trace.is_regular_polygon(4));
    }

    #[test]
    fn test_square_right_then_forward() {
        let mut turtle = Turtle::new();
        for _ in 0..4 {
            turtle.turn(90.0);
            turtle.move_by(10.0);
        }
        assert!(turtle.trace().is_regular_polygon(4));
    }

    #[test]
    fn test_hexagon_turning_left() {
        let mut turtle = Turtle::new();
        for _ in 0..6 {
            turtle.turn(-60.0);
            turtle.move_by(25.0);
        }
        let trace = turtle.trace();
        assert_eq!(trace.angles(), [0.0, 60.0, 120.0, 180.0, 240.0, 300.0]);
        assert!(trace.is_regular_polygon(6));
    }

    #[test]
    fn test_same_heading_accumulates() {
        let mut turtle = Turtle::new();
        turtle.move_by(5.0);
        turtle.move_by(5.0);
        turtle.turn(360.0);
        turtle.move_by(1.0);
        let trace = turtle.trace();
        assert_eq!(trace.angles(), [0.0]);
        assert_eq!(trace.lengths(), [11.0]);
    }

    #[test]
    fn test_bearing_normalization() {
        assert_eq!(normalize_bearing(450.0), 90.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(-360.0), 0.0);
        assert_eq!(normalize_bearing(0.0), 0.0);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut turtle = Turtle::new();
        turtle.turn(45.0);
        turtle.move_by(3.0);
        turtle.reset();
        assert_eq!(turtle.bearing(), 0.0);
        assert!(turtle.trace().is_empty());
    }
}
