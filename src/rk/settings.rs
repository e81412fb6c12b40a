//! Settings for the Runge-Kutta integrators.

use std::ops::Index;

use bon::Builder;

use crate::Float;

/// Tuning knobs for the integrators. The defaults suit non-stiff problems
/// at moderate tolerances; most callers never touch anything here.
#[derive(Builder, Clone, Debug)]
pub struct Settings {
    /// The rounding unit, typically machine epsilon.
    pub uround: Option<Float>,
    /// Safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Lower bound for the step-size ratio hnew/hold.
    pub scale_min: Option<Float>,
    /// Upper bound for the step-size ratio hnew/hold.
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values
    /// ( <= 0.2 ) make the step size control more stable.
    pub beta: Option<Float>,
    /// Maximal step size. Defaults to the span of the interval.
    pub hmax: Option<Float>,
    /// Initial step size. None will result in an initial guess computed by
    /// [`crate::rk::hinit`].
    pub h0: Option<Float>,
    /// Maximum number of allowed internal steps before giving up.
    #[builder(default = 100_000)]
    pub nmax: usize,
    /// Number of accepted steps between stiffness tests.
    #[builder(default = 1000)]
    pub nstiff: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::builder().build()
    }
}

/// Tolerance that is either one scalar for every component or one value per
/// component. [`Into`] conversions let callers pass a bare `Float`, an
/// array, or a `Vec` without caring about the distinction.
#[derive(Clone, Debug)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}
