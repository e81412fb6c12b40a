//! Convenient prelude: import the most commonly used traits and types.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use oscillate::prelude::*;
//! ```

pub use crate::{
    ControlFlag, Error, Float, Interpolate, ODE, SolOut, Status,
    analytical::{ClosedForm, Regime},
    grid::TimeGrid,
    params::{InitialState, Parameters},
    rk::{Dopri5, Integrator, Rk4, Sampled, Settings, Tolerance},
    scenario::Scenario,
    solver::{Comparison, PlotData, Series, Trajectory, compare, compare_in_regime, simulate},
};
