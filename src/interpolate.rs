//! Shared interpolation implementations for dense output.

use crate::Float;

/// Trait for interpolating the solution within an accepted step.
pub trait Interpolate {
    /// Interpolate the solution at the given time `ti`.
    fn interpolate(&self, ti: Float, yi: &mut [Float]);
}

/// Cubic Hermite interpolant over one step, built from the state and
/// derivative at both endpoints. Used by the fixed-step RK4 integrator,
/// whose stages do not yield free dense-output coefficients.
pub struct CubicHermite<'a> {
    t0: Float,
    h: Float,
    y0: &'a [Float],
    y1: &'a [Float],
    dy0: &'a [Float],
    dy1: &'a [Float],
}

impl<'a> CubicHermite<'a> {
    pub fn new(
        t0: Float,
        h: Float,
        y0: &'a [Float],
        y1: &'a [Float],
        dy0: &'a [Float],
        dy1: &'a [Float],
    ) -> Self {
        Self { t0, h, y0, y1, dy0, dy1 }
    }
}

impl<'a> Interpolate for CubicHermite<'a> {
    fn interpolate(&self, ti: Float, yi: &mut [Float]) {
        let s = (ti - self.t0) / self.h;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        for i in 0..self.y0.len() {
            yi[i] = h00 * self.y0[i]
                + h10 * self.h * self.dy0[i]
                + h01 * self.y1[i]
                + h11 * self.h * self.dy1[i];
        }
    }
}
