//! Orchestration: integrate numerically, evaluate the closed form on the
//! same grid, and package both trajectories for a plotting frontend.

use log::debug;

use crate::{
    Float,
    analytical::{self, Regime},
    error::Error,
    grid::TimeGrid,
    params::{InitialState, Parameters},
    rk::Integrator,
    scenario::Scenario,
};

/// Displacement over time, aligned index-for-index with its grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    t: Vec<Float>,
    x: Vec<Float>,
}

impl Trajectory {
    fn new(t: Vec<Float>, x: Vec<Float>) -> Self {
        debug_assert_eq!(t.len(), x.len());
        Self { t, x }
    }

    pub fn times(&self) -> &[Float] {
        &self.t
    }

    pub fn displacements(&self) -> &[Float] {
        &self.x
    }

    /// Iterate over (time, displacement) pairs.
    pub fn samples(&self) -> impl Iterator<Item = (Float, Float)> + '_ {
        self.t.iter().copied().zip(self.x.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// One labeled curve of the handoff bundle.
#[derive(Clone, Debug)]
pub struct Series {
    pub t: Vec<Float>,
    pub x: Vec<Float>,
    pub label: String,
}

/// Everything a plotting frontend needs; the crate itself never renders.
#[derive(Clone, Debug)]
pub struct PlotData {
    pub series: Vec<Series>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Result of one comparison run: the numerically integrated trajectory and
/// the closed-form trajectory on the same grid, plus integrator statistics.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub regime: Regime,
    pub numerical: Trajectory,
    pub analytical: Trajectory,
    /// Number of right-hand-side evaluations.
    pub nfev: usize,
    /// Number of internal integrator steps.
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
}

impl Comparison {
    /// Largest pointwise |numerical - analytical| over the grid.
    pub fn max_abs_deviation(&self) -> Float {
        self.numerical
            .displacements()
            .iter()
            .zip(self.analytical.displacements())
            .map(|(n, a)| (n - a).abs())
            .fold(0.0, Float::max)
    }

    /// Package both trajectories with labels for the plotting collaborator.
    pub fn plot_data(&self) -> PlotData {
        PlotData {
            series: vec![
                Series {
                    t: self.numerical.times().to_vec(),
                    x: self.numerical.displacements().to_vec(),
                    label: "Numerical Solution".to_string(),
                },
                Series {
                    t: self.analytical.times().to_vec(),
                    x: self.analytical.displacements().to_vec(),
                    label: "Analytical Solution".to_string(),
                },
            ],
            title: self.regime.title().to_string(),
            x_label: "Time (s)".to_string(),
            y_label: "Displacement (m)".to_string(),
        }
    }
}

/// Run one scenario end to end with the given integrator.
pub fn simulate<I: Integrator>(scenario: &Scenario, integrator: &I) -> Result<Comparison, Error> {
    let (params, state, grid) = scenario.resolve()?;
    compare(&params, state, &grid, integrator)
}

/// Like [`simulate`], but from already-validated pieces. The regime is
/// classified from the parameters; use [`compare_in_regime`] to force one.
pub fn compare<I: Integrator>(
    params: &Parameters,
    state: InitialState,
    grid: &TimeGrid,
    integrator: &I,
) -> Result<Comparison, Error> {
    let regime = Regime::classify(params);
    compare_in_regime(params, state, grid, regime, integrator)
}

/// Compare numerical integration against the closed form of an explicitly
/// chosen regime.
pub fn compare_in_regime<I: Integrator>(
    params: &Parameters,
    state: InitialState,
    grid: &TimeGrid,
    regime: Regime,
    integrator: &I,
) -> Result<Comparison, Error> {
    params.validate()?;
    debug!(
        "regime {:?}: omega_n = {}, beta = {}",
        regime,
        params.omega_n(),
        params.beta()
    );

    // Derive the closed form first: an unsupported regime must fail before
    // any integration work is spent.
    let closed = analytical::trajectory(grid.times(), params, state, regime)?;
    let analytical = Trajectory::new(grid.times().to_vec(), closed);

    let (t_start, t_end) = grid.span();
    let y0 = state.as_vector();
    let sampled = integrator.integrate(params, t_start, t_end, &y0, grid.times())?;
    debug!(
        "integration done: nfev = {}, nstep = {}, naccpt = {}, nrejct = {}",
        sampled.nfev, sampled.nstep, sampled.naccpt, sampled.nrejct
    );

    let displacement: Vec<Float> = sampled.y.iter().map(|y| y[0]).collect();
    let numerical = Trajectory::new(sampled.t, displacement);

    Ok(Comparison {
        regime,
        numerical,
        analytical,
        nfev: sampled.nfev,
        nstep: sampled.nstep,
        naccpt: sampled.naccpt,
        nrejct: sampled.nrejct,
    })
}
