//! Scenario: the complete numeric configuration of one comparison run.

use bon::Builder;

use crate::{
    Float,
    error::Error,
    grid::TimeGrid,
    params::{InitialState, Parameters},
};

/// Everything a run needs, as one immutable value. This replaces the
/// script-level constants of a typical throwaway simulation: nothing is
/// ambient, the solver receives the whole configuration explicitly.
///
/// Exactly one of `sample_count` (evenly spaced, endpoint included) and
/// `sample_step` (fixed spacing, endpoint excluded) must be set.
///
/// # Example
///
/// ```ignore
/// let scenario = Scenario::builder()
///     .mass(1.0)
///     .stiffness(4.0)
///     .damping(0.5)
///     .initial_displacement(1.0)
///     .t_end(10.0)
///     .sample_count(1000)
///     .build();
/// ```
#[derive(Builder, Clone, Debug)]
pub struct Scenario {
    /// Mass (kg).
    pub mass: Float,
    /// Spring constant (N/m).
    pub stiffness: Float,
    /// Damping coefficient (kg/s).
    #[builder(default = 0.0)]
    pub damping: Float,
    /// Driving force amplitude (N).
    #[builder(default = 0.0)]
    pub forcing_amplitude: Float,
    /// Driving angular frequency (rad/s).
    #[builder(default = 0.0)]
    pub forcing_frequency: Float,
    /// Initial displacement (m).
    pub initial_displacement: Float,
    /// Initial velocity (m/s).
    #[builder(default = 0.0)]
    pub initial_velocity: Float,
    /// Start of the simulated interval (s).
    #[builder(default = 0.0)]
    pub t_start: Float,
    /// End of the simulated interval (s).
    pub t_end: Float,
    /// Number of evenly spaced samples over the interval.
    pub sample_count: Option<usize>,
    /// Fixed spacing between samples (s).
    pub sample_step: Option<Float>,
}

impl Scenario {
    /// Validate and split into the solver's inputs.
    pub fn resolve(&self) -> Result<(Parameters, InitialState, TimeGrid), Error> {
        let params = Parameters::builder()
            .mass(self.mass)
            .stiffness(self.stiffness)
            .damping(self.damping)
            .forcing_amplitude(self.forcing_amplitude)
            .forcing_frequency(self.forcing_frequency)
            .build();
        params.validate()?;

        let grid = match (self.sample_count, self.sample_step) {
            (Some(count), None) => TimeGrid::linspace(self.t_start, self.t_end, count)?,
            (None, Some(dt)) => TimeGrid::with_step(self.t_start, self.t_end, dt)?,
            _ => return Err(Error::AmbiguousSampling),
        };

        let state = InitialState::new(self.initial_displacement, self.initial_velocity);
        Ok((params, state, grid))
    }
}
