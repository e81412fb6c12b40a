//! Runge-Kutta integrators and the sampling interface on top of them.
//!
//! [`dopri5`] and [`rk4`] are the low-level step loops; [`Integrator`] is
//! the seam the solver works against, so a fixed-step reference method can
//! be substituted for the adaptive pair in tests.

mod dopri5;
mod hinit;
mod rk4;
mod settings;

pub use dopri5::{contd5, dopri5};
pub use hinit::hinit;
pub use rk4::rk4;
pub use settings::{Settings, Tolerance};

use bon::Builder;

use crate::{
    Float,
    error::Error,
    ode::ODE,
    solout::{Sampler, SolOut},
    status::Status,
};

/// Raw output of a low-level integrator: final state plus run statistics.
#[derive(Clone, Debug)]
pub struct IntegrationResult {
    /// Final value of the independent variable.
    pub t: Float,
    /// Final state vector.
    pub y: Vec<Float>,
    /// Step size of the next (not taken) step.
    pub h: Float,
    /// Number of right-hand-side evaluations.
    pub nfev: usize,
    /// Number of internal steps taken.
    pub nstep: usize,
    /// Number of accepted steps.
    pub naccpt: usize,
    /// Number of rejected steps.
    pub nrejct: usize,
    /// Terminal status of the run.
    pub status: Status,
}

/// Solution sampled at the requested output times.
#[derive(Clone, Debug)]
pub struct Sampled {
    pub t: Vec<Float>,
    pub y: Vec<Vec<Float>>,
    pub nfev: usize,
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
}

/// An integrator that can produce the solution of `y' = f(t, y)` at a fixed
/// ascending list of sample times inside `[t0, tend]`.
///
/// Guarantees of every implementation:
/// - the output is aligned 1:1 with `sample_times`; a sample time outside
///   `[t0, tend]` is rejected with [`Error::SampleOutOfSpan`] rather than
///   silently shortening the trajectory;
/// - a sample at `t0` is the initial state bit-for-bit;
/// - a non-success terminal status becomes [`Error::IntegrationFailure`],
///   never a partial trajectory.
pub trait Integrator {
    fn integrate<F: ODE>(
        &self,
        f: &F,
        t0: Float,
        tend: Float,
        y0: &[Float],
        sample_times: &[Float],
    ) -> Result<Sampled, Error>;
}

/// Adaptive Dormand-Prince 5(4) integrator with dense-output sampling.
#[derive(Builder, Clone, Debug)]
pub struct Dopri5 {
    /// Relative tolerance for the local error estimate.
    #[builder(default = 1e-6, into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for the local error estimate.
    #[builder(default = 1e-6, into)]
    pub atol: Tolerance,
    /// Integrator tuning knobs.
    #[builder(default)]
    pub settings: Settings,
}

impl Default for Dopri5 {
    fn default() -> Self {
        Dopri5::builder().build()
    }
}

impl Integrator for Dopri5 {
    fn integrate<F: ODE>(
        &self,
        f: &F,
        t0: Float,
        tend: Float,
        y0: &[Float],
        sample_times: &[Float],
    ) -> Result<Sampled, Error> {
        check_span(t0, tend, sample_times)?;
        let mut sampler = Sampler::new(sample_times);
        let result = dopri5(
            f,
            t0,
            tend,
            y0,
            self.rtol.clone(),
            self.atol.clone(),
            Some(&mut sampler),
            &self.settings,
        )?;
        finish(result, sampler, t0, tend)
    }
}

impl Dopri5 {
    /// Like [`Integrator::integrate`], additionally forwarding every
    /// accepted step to `user`. An interrupt from the callback terminates
    /// the run and surfaces as
    /// [`Error::IntegrationFailure`]`(`[`Status::Interrupted`]`)`, never as
    /// a partial trajectory.
    pub fn integrate_with_callback<F: ODE, U: SolOut>(
        &self,
        f: &F,
        t0: Float,
        tend: Float,
        y0: &[Float],
        sample_times: &[Float],
        user: &mut U,
    ) -> Result<Sampled, Error> {
        check_span(t0, tend, sample_times)?;
        let mut sampler = Sampler::with_callback(sample_times, user);
        let result = dopri5(
            f,
            t0,
            tend,
            y0,
            self.rtol.clone(),
            self.atol.clone(),
            Some(&mut sampler),
            &self.settings,
        )?;
        finish(result, sampler, t0, tend)
    }
}

/// Fixed-step RK4 integrator with cubic Hermite sampling. Deterministic
/// given the step size; the reference method for cross-checking the
/// adaptive pair.
#[derive(Builder, Clone, Debug)]
pub struct Rk4 {
    /// Fixed step size.
    pub h: Float,
    /// Integrator tuning knobs (only the step budget applies).
    #[builder(default)]
    pub settings: Settings,
}

impl Rk4 {
    pub fn new(h: Float) -> Self {
        Rk4::builder().h(h).build()
    }
}

impl Integrator for Rk4 {
    fn integrate<F: ODE>(
        &self,
        f: &F,
        t0: Float,
        tend: Float,
        y0: &[Float],
        sample_times: &[Float],
    ) -> Result<Sampled, Error> {
        check_span(t0, tend, sample_times)?;
        let mut sampler = Sampler::new(sample_times);
        let result = rk4(f, t0, tend, y0, self.h, Some(&mut sampler), &self.settings)?;
        finish(result, sampler, t0, tend)
    }
}

fn check_span(t0: Float, tend: Float, sample_times: &[Float]) -> Result<(), Error> {
    if tend <= t0 {
        return Err(Error::InvalidTimeSpan { start: t0, end: tend });
    }
    for &time in sample_times {
        if !(time >= t0 && time <= tend) {
            return Err(Error::SampleOutOfSpan { time, start: t0, end: tend });
        }
    }
    Ok(())
}

fn finish<U: SolOut>(
    result: IntegrationResult,
    sampler: Sampler<'_, U>,
    t0: Float,
    tend: Float,
) -> Result<Sampled, Error> {
    if result.status != Status::Success {
        return Err(Error::IntegrationFailure(result.status));
    }
    // A successful run must have swept every sample time; a shortfall means
    // the list was not ascending and samples were skipped.
    if let Some(time) = sampler.pending() {
        return Err(Error::SampleOutOfSpan { time, start: t0, end: tend });
    }
    let (t, y) = sampler.into_data();
    Ok(Sampled {
        t,
        y,
        nfev: result.nfev,
        nstep: result.nstep,
        naccpt: result.naccpt,
        nrejct: result.nrejct,
    })
}
