//! DOPRI5 - Dormand-Prince 5(4) explicit Runge-Kutta integrator.
//!
//! Embedded pair with adaptive step-size control (Lund stabilization),
//! stiffness detection, and dense output on every accepted step.
//!
//! Reference: E. Hairer, S. P. Norsett, and G. Wanner, "Solving Ordinary
//! Differential Equations I. Nonstiff Problems", 2nd ed., Springer (1993).

use crate::{
    Float,
    error::Error,
    interpolate::Interpolate,
    ode::ODE,
    rk::{
        IntegrationResult,
        hinit::hinit,
        settings::{Settings, Tolerance},
    },
    solout::{ControlFlag, SolOut},
    status::Status,
};

/// Integrate `y' = f(t, y)` from `t0` to `tend` with the Dormand-Prince
/// 5(4) pair, controlling the local error against `rtol`/`atol`.
///
/// After every accepted step the optional `solout` callback receives the
/// step endpoints and a dense-output interpolant valid on the step, which
/// is how output at arbitrary sample times is produced without constraining
/// the step sequence. The initial call carries no interpolant.
///
/// Termination is guaranteed: the run aborts with a non-success
/// [`Status`] when the step budget `settings.nmax` is exhausted, when the
/// step size underflows machine rounding, or when repeated stiffness
/// detections fire.
pub fn dopri5<F, S>(
    f: &F,
    t0: Float,
    tend: Float,
    y0: &[Float],
    rtol: impl Into<Tolerance>,
    atol: impl Into<Tolerance>,
    mut solout: Option<&mut S>,
    settings: &Settings,
) -> Result<IntegrationResult, Error>
where
    F: ODE,
    S: SolOut,
{
    let rtol = rtol.into();
    let atol = atol.into();

    // --- Input validation ---
    let uround = match settings.uround {
        Some(u) => {
            if u <= 1e-35 || u >= 1.0 {
                return Err(Error::SettingOutOfRange { name: "uround", value: u });
            }
            u
        }
        None => 2.3e-16,
    };

    let safety_factor = match settings.safety_factor {
        Some(fac) => {
            if fac >= 1.0 || fac <= 1e-4 {
                return Err(Error::SettingOutOfRange { name: "safety_factor", value: fac });
            }
            fac
        }
        None => 0.9,
    };

    // Bounds for the step size ratio: scale_min <= hnew/h <= scale_max
    let facc1 = match settings.scale_min {
        Some(fac) => 1.0 / fac,
        None => 5.0,
    };
    let facc2 = match settings.scale_max {
        Some(fac) => 1.0 / fac,
        None => 1.0 / 10.0,
    };

    // Beta for step control stabilization
    let beta = match settings.beta {
        Some(b) => {
            if b > 0.2 {
                return Err(Error::SettingOutOfRange { name: "beta", value: b });
            }
            b
        }
        None => 0.04,
    };

    let hmax = match settings.hmax {
        Some(h) => h.abs(),
        None => (tend - t0).abs(),
    };

    let nmax = settings.nmax;
    let nstiff = settings.nstiff;

    // --- Declarations ---
    let n = y0.len();
    let mut t = t0;
    let mut y = y0.to_vec();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut y1 = vec![0.0; n];
    let mut cont = vec![0.0; n * 5];
    let mut facold: Float = 1e-4;
    let mut last = false;
    let mut reject = false;
    let mut nonstiff = 0;
    let mut hlamb = 0.0;
    let mut iasti = 0;
    let mut nfev = 0;
    let mut nstep = 0;
    let mut naccpt = 0;
    let mut nrejct = 0;
    let mut told = t;
    let status;
    let expo1 = 0.2 - beta * 0.75;
    let posneg = (tend - t).signum();

    // --- Initializations ---
    f.ode(t, &y, &mut k1);
    nfev += 1;
    let mut h = match settings.h0 {
        Some(h0) => h0.abs() * posneg,
        None => {
            nfev += 1;
            hinit(f, t, &y, posneg, &k1, &mut k2, &mut y1, 5, hmax, &atol, &rtol)
        }
    };

    // Initial callback, no interpolant yet
    if let Some(s) = solout.as_mut() {
        if s.solout::<Dopri5Interpolant>(told, t, &y, None) == ControlFlag::Interrupt {
            return Ok(IntegrationResult {
                t,
                y,
                h,
                nfev,
                nstep,
                naccpt,
                nrejct,
                status: Status::Interrupted,
            });
        }
    }

    // --- Main integration loop ---
    loop {
        if nstep > nmax {
            status = Status::NeedLargerNMax;
            break;
        }

        // Underflow due to machine rounding
        if 0.1 * h.abs() <= t.abs() * uround {
            status = Status::StepSizeTooSmall;
            break;
        }

        // Adjust the last step to land on tend
        if (t + 1.01 * h - tend) * posneg > 0.0 {
            h = tend - t;
            last = true;
        }

        nstep += 1;

        // Stage 2
        for i in 0..n {
            y1[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(t + C2 * h, &y1, &mut k2);

        // Stage 3
        for i in 0..n {
            y1[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        f.ode(t + C3 * h, &y1, &mut k3);

        // Stage 4
        for i in 0..n {
            y1[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        f.ode(t + C4 * h, &y1, &mut k4);

        // Stage 5
        for i in 0..n {
            y1[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        f.ode(t + C5 * h, &y1, &mut k5);

        // Stage 6
        for i in 0..n {
            y1[i] =
                y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        let tph = t + h;
        f.ode(tph, &y1, &mut k6);

        // Final stage; k2 receives f at the new point (FSAL)
        for i in 0..n {
            y1[i] =
                y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        f.ode(tph, &y1, &mut k2);
        nfev += 6;

        // Last segment of the dense output, before k4 is reused below
        if solout.is_some() {
            for i in 0..n {
                cont[4 * n + i] = h
                    * (D1 * k1[i] + D3 * k3[i] + D4 * k4[i] + D5 * k5[i] + D6 * k6[i] + D7 * k2[i]);
            }
        }

        // k4 scaled for the error estimate
        for i in 0..n {
            k4[i] =
                (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k2[i]) * h;
        }

        // Error norm
        let mut err = 0.0_f64;
        for i in 0..n {
            let sk = atol[i] + rtol[i] * y[i].abs().max(y1[i].abs());
            err += (k4[i] / sk) * (k4[i] / sk);
        }
        err = (err / n as Float).sqrt();

        // Computation of hnew with Lund stabilization
        let fac11 = err.powf(expo1);
        let mut fac = fac11 / facold.powf(beta);
        fac = facc2.max(facc1.min(fac / safety_factor));
        let mut hnew = h / fac;

        if err <= 1.0 {
            // Step accepted
            facold = err.max(1.0e-4);
            naccpt += 1;

            // Stiffness detection
            if (naccpt % nstiff == 0) || (iasti > 0) {
                let mut stnum = 0.0_f64;
                let mut stden = 0.0_f64;
                for i in 0..n {
                    let d1 = k2[i] - k6[i];
                    let ysti = y[i]
                        + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
                    let d2 = y1[i] - ysti;
                    stnum += d1 * d1;
                    stden += d2 * d2;
                }
                if stden > 0.0 {
                    hlamb = h.abs() * (stnum / stden).sqrt();
                }
                if hlamb > 3.25 {
                    nonstiff = 0;
                    iasti += 1;
                    if iasti == 15 {
                        status = Status::ProbablyStiff;
                        break;
                    }
                } else {
                    nonstiff += 1;
                    if nonstiff == 6 {
                        iasti = 0;
                    }
                }
            }

            // Remaining dense output coefficients
            if solout.is_some() {
                for i in 0..n {
                    let ydiff = y1[i] - y[i];
                    let bspl = h * k1[i] - ydiff;
                    cont[i] = y[i];
                    cont[n + i] = ydiff;
                    cont[2 * n + i] = bspl;
                    cont[3 * n + i] = -h * k2[i] + ydiff - bspl;
                }
            }

            // Update state
            k1.copy_from_slice(&k2);
            y.copy_from_slice(&y1);
            told = t;
            t = tph;

            if let Some(s) = solout.as_mut() {
                let interp = Dopri5Interpolant { cont: &cont, told, h };
                if s.solout(told, t, &y, Some(&interp)) == ControlFlag::Interrupt {
                    status = Status::Interrupted;
                    break;
                }
            }

            // Normal exit
            if last {
                h = hnew;
                status = Status::Success;
                break;
            }

            if hnew.abs() > hmax.abs() {
                hnew = posneg * hmax.abs();
            }

            // Prevent oscillations after a rejected step
            if reject {
                hnew = posneg * hnew.abs().min(h.abs());
                reject = false;
            }
        } else {
            // Step rejected
            hnew = h / facc1.min(fac11 / safety_factor);
            reject = true;
            if naccpt > 1 {
                nrejct += 1;
            }
            last = false;
        }
        h = hnew;
    }

    Ok(IntegrationResult {
        t,
        y,
        h,
        nfev,
        nstep,
        naccpt,
        nrejct,
        status,
    })
}

/// Continuous output evaluation for DOPRI5.
pub fn contd5(ti: Float, yi: &mut [Float], cont: &[Float], told: Float, h: Float) {
    let n = cont.len() / 5;
    let theta = (ti - told) / h;
    let theta1 = 1.0 - theta;
    for i in 0..n {
        yi[i] = cont[i]
            + theta
                * (cont[n + i]
                    + theta1
                        * (cont[2 * n + i] + theta * (cont[3 * n + i] + theta1 * cont[4 * n + i])));
    }
}

/// Dense output interpolant over one accepted DOPRI5 step.
struct Dopri5Interpolant<'a> {
    cont: &'a [Float],
    told: Float,
    h: Float,
}

impl<'a> Interpolate for Dopri5Interpolant<'a> {
    fn interpolate(&self, ti: Float, yi: &mut [Float]) {
        contd5(ti, yi, self.cont, self.told, self.h);
    }
}

// DOPRI5 Butcher tableau coefficients
const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

const E1: Float = 71.0 / 57600.0;
const E3: Float = -71.0 / 16695.0;
const E4: Float = 71.0 / 1920.0;
const E5: Float = -17253.0 / 339200.0;
const E6: Float = 22.0 / 525.0;
const E7: Float = -1.0 / 40.0;

const D1: Float = -12715105075.0 / 11282082432.0;
const D3: Float = 87487479700.0 / 32700410799.0;
const D4: Float = -10690763975.0 / 1880347072.0;
const D5: Float = 701980252875.0 / 199316789632.0;
const D6: Float = -1453857185.0 / 822651844.0;
const D7: Float = 69997945.0 / 29380423.0;
