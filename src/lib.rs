//! Simulation of a linear harmonic oscillator (free, damped, and driven),
//! comparing an adaptive Runge-Kutta numerical solution against the
//! closed-form analytical solution on a shared time grid.
//!
//! The crate never renders anything: [`solver::Comparison::plot_data`]
//! hands aligned (time, displacement) series plus labels to whatever
//! plotting frontend the caller uses.

mod error;
mod interpolate;
mod ode;
mod solout;
mod status;

pub mod analytical;
pub mod grid;
pub mod params;
pub mod rk;
pub mod scenario;
pub mod solver;

pub mod prelude;

pub use error::Error;
pub use interpolate::Interpolate;
pub use ode::ODE;
pub use solout::{ControlFlag, SolOut};
pub use status::Status;

/// Floating point type used throughout the crate.
pub type Float = f64;
