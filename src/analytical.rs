//! Closed-form solutions, dispatched on an explicit regime tag.

use crate::{
    Float,
    error::Error,
    params::{InitialState, Parameters},
};

/// Which closed-form solution applies.
///
/// The regime is an explicit tag rather than branching buried inside the
/// formulas, so callers can see (and tests can force) which variant ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// No damping, no forcing: x(t) = A cos(omega_n t + phi).
    FreeUndamped,
    /// Underdamped free decay:
    /// x(t) = e^(-beta t) (A cos(omega_d t) + B sin(omega_d t)).
    FreeDamped,
    /// Sinusoidally driven impulse response from rest.
    Forced,
}

impl Regime {
    /// Pick the regime the parameters fall into: any forcing wins, then any
    /// damping, else the free undamped oscillator.
    pub fn classify(params: &Parameters) -> Regime {
        if params.forcing_amplitude > 0.0 {
            Regime::Forced
        } else if params.damping > 0.0 {
            Regime::FreeDamped
        } else {
            Regime::FreeUndamped
        }
    }

    /// Plot title used in the handoff bundle.
    pub fn title(&self) -> &'static str {
        match self {
            Regime::FreeUndamped => "Undamped Harmonic Oscillator: Numerical vs Analytical Solution",
            Regime::FreeDamped => "Damped Harmonic Oscillator: Numerical vs Analytical Solution",
            Regime::Forced => "Impulse Response: Numerical vs. Analytical Solutions",
        }
    }
}

/// A fully-resolved closed form: coefficients are derived once from the
/// parameters and initial state, then evaluation is a pure function of `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClosedForm {
    FreeUndamped {
        amplitude: Float,
        phase: Float,
        omega_n: Float,
    },
    FreeDamped {
        a: Float,
        b: Float,
        beta: Float,
        omega_d: Float,
    },
    /// (F0/m) sin(omega t) (1 - cos(omega t)). This structure cannot
    /// represent resonance: at omega == omega_n the physical amplitude
    /// grows without bound, while the formula stays bounded. Resonant
    /// inputs are not guarded and evaluate the formula as written.
    ForcedUndamped { scale: Float, omega: Float },
    /// (F0/(m omega_d)) e^(-beta t) sin(omega_d t).
    ForcedDamped {
        scale: Float,
        beta: Float,
        omega_d: Float,
    },
}

impl ClosedForm {
    /// Derive the coefficients for the given regime, rejecting parameters
    /// the closed form does not exist for.
    pub fn new(regime: Regime, params: &Parameters, state: InitialState) -> Result<Self, Error> {
        params.validate()?;
        match regime {
            Regime::FreeUndamped => {
                if params.stiffness <= 0.0 {
                    return Err(Error::InvalidStiffness(params.stiffness));
                }
                let omega_n = params.omega_n();
                let x0 = state.displacement;
                let v0 = state.velocity;
                // x0 = A cos(phi), v0 = -A omega_n sin(phi)
                let amplitude = (x0 * x0 + (v0 / omega_n) * (v0 / omega_n)).sqrt();
                let phase = (-v0 / omega_n).atan2(x0);
                Ok(ClosedForm::FreeUndamped { amplitude, phase, omega_n })
            }
            Regime::FreeDamped => {
                let omega_d = params.omega_d()?;
                let beta = params.beta();
                let a = state.displacement;
                let b = (state.velocity + beta * state.displacement) / omega_d;
                Ok(ClosedForm::FreeDamped { a, b, beta, omega_d })
            }
            Regime::Forced => {
                if params.damping == 0.0 {
                    Ok(ClosedForm::ForcedUndamped {
                        scale: params.forcing_amplitude / params.mass,
                        omega: params.forcing_frequency,
                    })
                } else {
                    let omega_d = params.omega_d()?;
                    Ok(ClosedForm::ForcedDamped {
                        scale: params.forcing_amplitude / (params.mass * omega_d),
                        beta: params.beta(),
                        omega_d,
                    })
                }
            }
        }
    }

    /// Displacement at time `t`.
    pub fn displacement(&self, t: Float) -> Float {
        match *self {
            ClosedForm::FreeUndamped { amplitude, phase, omega_n } => {
                amplitude * (omega_n * t + phase).cos()
            }
            ClosedForm::FreeDamped { a, b, beta, omega_d } => {
                (-beta * t).exp() * (a * (omega_d * t).cos() + b * (omega_d * t).sin())
            }
            ClosedForm::ForcedUndamped { scale, omega } => {
                scale * (omega * t).sin() * (1.0 - (omega * t).cos())
            }
            ClosedForm::ForcedDamped { scale, beta, omega_d } => {
                scale * (-beta * t).exp() * (omega_d * t).sin()
            }
        }
    }
}

/// Evaluate the closed form for `regime` at every sample time.
///
/// Deterministic: identical inputs produce bit-identical output.
pub fn trajectory(
    sample_times: &[Float],
    params: &Parameters,
    state: InitialState,
    regime: Regime,
) -> Result<Vec<Float>, Error> {
    let form = ClosedForm::new(regime, params, state)?;
    Ok(sample_times.iter().map(|&t| form.displacement(t)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn state(x0: Float, v0: Float) -> InitialState {
        InitialState::new(x0, v0)
    }

    #[test]
    fn undamped_amplitude_and_phase_from_initial_state() {
        // A = 1, omega_n = 2 pi, phi = 0
        let p = Parameters::builder().mass(1.0).stiffness(4.0 * PI * PI).build();
        let form = ClosedForm::new(Regime::FreeUndamped, &p, state(1.0, 0.0)).unwrap();
        assert_relative_eq!(form.displacement(0.0), 1.0);
        // cos(2 pi * 0.25) = cos(pi/2) = 0
        assert_abs_diff_eq!(form.displacement(0.25), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn undamped_velocity_only_start_is_a_sine() {
        let p = Parameters::builder().mass(1.0).stiffness(4.0).build();
        let form = ClosedForm::new(Regime::FreeUndamped, &p, state(0.0, 2.0)).unwrap();
        // x0 = 0, v0 = 2, omega_n = 2 -> x(t) = sin(2t)
        for t in [0.1, 0.5, 1.3] {
            assert_abs_diff_eq!(form.displacement(t), (2.0 * t).sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn damped_form_matches_hand_derivation() {
        let p = Parameters::builder().mass(1.0).stiffness(4.0).damping(0.5).build();
        let form = ClosedForm::new(Regime::FreeDamped, &p, state(1.0, 0.0)).unwrap();
        assert_eq!(form.displacement(0.0), 1.0);
        let omega_d = 3.9375_f64.sqrt();
        let b = 0.25 / omega_d;
        let t = 0.7_f64;
        let expected = (-0.25 * t).exp() * ((omega_d * t).cos() + b * (omega_d * t).sin());
        assert_relative_eq!(form.displacement(t), expected);
    }

    #[test]
    fn overdamped_request_is_unsupported() {
        let p = Parameters::builder().mass(1.0).stiffness(1.0).damping(10.0).build();
        assert!(matches!(
            ClosedForm::new(Regime::FreeDamped, &p, state(1.0, 0.0)),
            Err(Error::UnsupportedRegime { .. })
        ));
    }

    #[test]
    fn zero_stiffness_has_no_undamped_form() {
        let p = Parameters::builder().mass(1.0).stiffness(0.0).build();
        assert!(matches!(
            ClosedForm::new(Regime::FreeUndamped, &p, state(1.0, 0.0)),
            Err(Error::InvalidStiffness(_))
        ));
    }

    #[test]
    fn classification_prefers_forcing_over_damping() {
        let p = Parameters::builder()
            .mass(1.0)
            .stiffness(1.0)
            .damping(0.2)
            .forcing_amplitude(1.0)
            .forcing_frequency(1.5)
            .build();
        assert_eq!(Regime::classify(&p), Regime::Forced);
        let free = Parameters::builder().mass(1.0).stiffness(1.0).damping(0.2).build();
        assert_eq!(Regime::classify(&free), Regime::FreeDamped);
        let undamped = Parameters::builder().mass(1.0).stiffness(1.0).build();
        assert_eq!(Regime::classify(&undamped), Regime::FreeUndamped);
    }

    #[test]
    fn trajectory_is_bit_identical_across_invocations() {
        let p = Parameters::builder().mass(1.0).stiffness(4.0).damping(0.5).build();
        let times: Vec<Float> = (0..100).map(|i| i as Float * 0.1).collect();
        let a = trajectory(&times, &p, state(1.0, 0.0), Regime::FreeDamped).unwrap();
        let b = trajectory(&times, &p, state(1.0, 0.0), Regime::FreeDamped).unwrap();
        assert_eq!(a, b);
    }
}
