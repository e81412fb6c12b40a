//! Time grid at which the solution is reported.

use crate::{Float, error::Error};

/// Ordered, immutable sequence of sample times over `[t_start, t_end]`.
///
/// Both trajectories of a comparison run share one grid, which is what
/// makes pointwise numerical-vs-analytical comparison meaningful.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    times: Vec<Float>,
    t_start: Float,
    t_end: Float,
}

impl TimeGrid {
    /// `count` evenly spaced samples over `[t_start, t_end]`, both endpoints
    /// included.
    pub fn linspace(t_start: Float, t_end: Float, count: usize) -> Result<Self, Error> {
        if t_end <= t_start {
            return Err(Error::InvalidTimeSpan { start: t_start, end: t_end });
        }
        if count < 2 {
            return Err(Error::InvalidSampleCount(count));
        }
        let dt = (t_end - t_start) / (count - 1) as Float;
        let mut times: Vec<Float> = (0..count).map(|i| t_start + i as Float * dt).collect();
        // Pin the endpoints so accumulated rounding cannot push the last
        // sample past t_end.
        times[0] = t_start;
        times[count - 1] = t_end;
        Ok(Self { times, t_start, t_end })
    }

    /// Samples spaced `dt` apart starting at `t_start`, excluding `t_end`
    /// (numpy.arange semantics).
    pub fn with_step(t_start: Float, t_end: Float, dt: Float) -> Result<Self, Error> {
        if t_end <= t_start {
            return Err(Error::InvalidTimeSpan { start: t_start, end: t_end });
        }
        if !(dt > 0.0) {
            return Err(Error::InvalidSampleStep(dt));
        }
        let count = ((t_end - t_start) / dt).ceil() as usize;
        if count < 2 {
            return Err(Error::InvalidSampleStep(dt));
        }
        let times: Vec<Float> = (0..count)
            .map(|i| t_start + i as Float * dt)
            .filter(|&t| t < t_end)
            .collect();
        Ok(Self { times, t_start, t_end })
    }

    pub fn times(&self) -> &[Float] {
        &self.times
    }

    /// The integration span, which may extend past the last sample for
    /// step-constructed grids.
    pub fn span(&self) -> (Float, Float) {
        (self.t_start, self.t_end)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_both_endpoints() {
        let grid = TimeGrid::linspace(0.0, 5.0, 11).unwrap();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid.times()[0], 0.0);
        assert_eq!(grid.times()[10], 5.0);
        assert_relative_eq!(grid.times()[3], 1.5);
    }

    #[test]
    fn with_step_excludes_the_end() {
        let grid = TimeGrid::with_step(0.0, 1.0, 0.25).unwrap();
        assert_eq!(grid.times(), &[0.0, 0.25, 0.5, 0.75][..]);
        assert_eq!(grid.span(), (0.0, 1.0));
    }

    #[test]
    fn empty_span_is_rejected() {
        assert!(matches!(
            TimeGrid::linspace(1.0, 1.0, 10),
            Err(Error::InvalidTimeSpan { .. })
        ));
        assert!(matches!(
            TimeGrid::with_step(2.0, 1.0, 0.1),
            Err(Error::InvalidTimeSpan { .. })
        ));
    }

    #[test]
    fn degenerate_sampling_is_rejected() {
        assert!(matches!(TimeGrid::linspace(0.0, 1.0, 1), Err(Error::InvalidSampleCount(1))));
        assert!(matches!(TimeGrid::with_step(0.0, 1.0, 0.0), Err(Error::InvalidSampleStep(_))));
        assert!(matches!(TimeGrid::with_step(0.0, 1.0, -0.5), Err(Error::InvalidSampleStep(_))));
    }
}
