//! User-supplied ODE system.

use crate::Float;

/// Right-hand side of a first-order system y' = f(t, y).
///
/// The integrator repeatedly calls `ode` with the current time `t` and state
/// `y` and expects `dydt` to be filled with the derivative values. The
/// function must be pure: the integrator evaluates it at arbitrary
/// intermediate times of its own choosing while controlling the step size,
/// not only at output grid points.
///
/// # Example
///
/// ```ignore
/// struct Pendulum { omega: f64 }
/// impl ODE for Pendulum {
///     fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
///         dydt[0] = y[1];
///         dydt[1] = -self.omega * self.omega * y[0].sin();
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, t: Float, y: &[Float], dydt: &mut [Float]);
}
