//! Classic explicit Runge-Kutta 4 (RK4) fixed-step integrator.
//!
//! No error estimate and no step control; useful as a deterministic
//! reference against the adaptive pair. Dense output is provided via cubic
//! Hermite interpolation over each step.

use crate::{
    Float,
    error::Error,
    interpolate::CubicHermite,
    ode::ODE,
    rk::{IntegrationResult, settings::Settings},
    solout::{ControlFlag, SolOut},
    status::Status,
};

/// Integrate `y' = f(t, y)` from `t0` to `tend` with fixed step `h`.
///
/// The final step is shortened to land exactly on `tend`. Fails with
/// [`Error::InvalidStepSize`] when `h` is zero or points away from `tend`.
pub fn rk4<F, S>(
    f: &F,
    t0: Float,
    tend: Float,
    y0: &[Float],
    h: Float,
    mut solout: Option<&mut S>,
    settings: &Settings,
) -> Result<IntegrationResult, Error>
where
    F: ODE,
    S: SolOut,
{
    // --- Input validation ---
    let direction = (tend - t0).signum();
    if h == 0.0 || h.signum() != direction {
        return Err(Error::InvalidStepSize(h));
    }

    // --- Declarations ---
    let n = y0.len();
    let mut t = t0;
    let mut y = y0.to_vec();
    let mut k0 = vec![0.0; n];
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut yt = vec![0.0; n];
    let mut yold = vec![0.0; n];
    let mut nfev = 0;
    let mut nstep = 0;
    let mut status = Status::Success;
    let nmax = settings.nmax;

    // --- Initializations ---
    f.ode(t, &y, &mut k1);
    nfev += 1;

    if let Some(s) = solout.as_mut() {
        if s.solout::<CubicHermite>(t, t, &y, None) == ControlFlag::Interrupt {
            return Ok(IntegrationResult {
                t,
                y,
                h,
                nfev,
                nstep,
                naccpt: 0,
                nrejct: 0,
                status: Status::Interrupted,
            });
        }
    }

    // --- Main integration loop ---
    loop {
        if nstep >= nmax {
            status = Status::NeedLargerNMax;
            break;
        }

        // Shorten the last step so we land exactly on tend
        let mut last = false;
        let mut hs = h;
        if (t + 1.01 * h - tend) * direction > 0.0 {
            hs = tend - t;
            last = true;
        }

        // Stage computations
        for i in 0..n {
            yt[i] = y[i] + hs * A21 * k1[i];
        }
        f.ode(t + C2 * hs, &yt, &mut k2);

        for i in 0..n {
            yt[i] = y[i] + hs * A32 * k2[i];
        }
        f.ode(t + C3 * hs, &yt, &mut k3);

        for i in 0..n {
            yt[i] = y[i] + hs * A43 * k3[i];
        }
        f.ode(t + C4 * hs, &yt, &mut k4);

        // Keep the state and derivative at the left end for dense output
        yold.copy_from_slice(&y);
        k0.copy_from_slice(&k1);

        // Advance
        let told = t;
        t += hs;
        for i in 0..n {
            y[i] += hs * (B1 * k0[i] + B2 * k2[i] + B3 * k3[i] + B4 * k4[i]);
        }
        f.ode(t, &y, &mut k1);

        nfev += 4;
        nstep += 1;

        if let Some(s) = solout.as_mut() {
            let interp = CubicHermite::new(told, hs, &yold, &y, &k0, &k1);
            if s.solout(told, t, &y, Some(&interp)) == ControlFlag::Interrupt {
                status = Status::Interrupted;
                break;
            }
        }

        if last {
            break;
        }
    }

    Ok(IntegrationResult {
        t,
        y,
        h,
        nfev,
        nstep,
        naccpt: nstep,
        nrejct: 0,
        status,
    })
}

// Classical RK4 coefficients
const C2: Float = 0.5;
const C3: Float = 0.5;
const C4: Float = 1.0;
const A21: Float = 0.5;
const A32: Float = 0.5;
const A43: Float = 1.0;
const B1: Float = 1.0 / 6.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 1.0 / 3.0;
const B4: Float = 1.0 / 6.0;
