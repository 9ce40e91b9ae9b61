use serde::Serialize;

/// Headings and segment lengths reported by a drawing surface
///
/// Entry `i` of `angles` is the heading the `i`-th segment was drawn along,
/// entry `i` of `lengths` is that segment's length.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct GraphicsTrace {
    angles: Vec<f64>,
    lengths: Vec<f64>,
}

impl GraphicsTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_segment(&mut self, angle: f64, length: f64) {
        self.angles.push(angle);
        self.lengths.push(length);
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn clear(&mut self) {
        self.angles.clear();
        self.lengths.clear();
    }

    /// Whether the trace is exactly `num_sides` equal segments, each turned
    /// `360 / num_sides` degrees from the previous one
    ///
    /// Comparisons are exact. A shape drawn with accumulated rounding error
    /// does not count.
    #[allow(clippy::float_cmp)]
    pub fn is_regular_polygon(&self, num_sides: usize) -> bool {
        if num_sides == 0 || self.len() != num_sides {
            return false;
        }

        let angle = 360.0 / num_sides as f64;
        let length = self.lengths[0];
        if length == 0.0 {
            return false;
        }

        (1..num_sides).all(|i| {
            self.angles[i] - self.angles[i - 1] == angle && self.lengths[i] == length
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace_of(segments: &[(f64, f64)]) -> GraphicsTrace {
        let mut trace = GraphicsTrace::new();
        for &(angle, length) in segments {
            trace.record_segment(angle, length);
        }
        trace
    }

    #[test]
    fn test_square_passes() {
        let trace = trace_of(&[(90.0, 10.0), (180.0, 10.0), (270.0, 10.0), (360.0, 10.0)]);
        assert!(trace.is_regular_polygon(4));
    }

    #[test]
    fn test_unequal_side_fails() {
        let trace = trace_of(&[(90.0, 10.0), (180.0, 10.0), (270.0, 10.0), (360.0, 9.0)]);
        assert!(!trace.is_regular_polygon(4));
    }

    #[test]
    fn test_wrong_segment_count_fails() {
        let trace = trace_of(&[
            (90.0, 10.0),
            (180.0, 10.0),
            (270.0, 10.0),
            (360.0, 10.0),
            (450.0, 10.0),
        ]);
        assert!(!trace.is_regular_polygon(4));
    }

    #[test]
    fn test_zero_length_fails() {
        let trace = trace_of(&[(0.0, 0.0), (90.0, 0.0), (180.0, 0.0), (270.0, 0.0)]);
        assert!(!trace.is_regular_polygon(4));
    }

    #[test]
    fn test_out_of_order_fails() {
        let trace = trace_of(&[(0.0, 5.0), (180.0, 5.0), (90.0, 5.0), (270.0, 5.0)]);
        assert!(!trace.is_regular_polygon(4));
    }

    #[test]
    fn test_rounding_drift_fails() {
        let trace = trace_of(&[
            (0.0, 5.0),
            (60.0, 5.0),
            (120.0, 5.0),
            (180.000_001, 5.0),
            (240.0, 5.0),
            (300.0, 5.0),
        ]);
        assert!(!trace.is_regular_polygon(6));
    }

    #[test]
    fn test_empty_trace_is_not_a_polygon() {
        assert!(!GraphicsTrace::new().is_regular_polygon(0));
        assert!(!GraphicsTrace::new().is_regular_polygon(3));
    }
}
