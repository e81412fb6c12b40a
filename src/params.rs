//! Physical parameters and initial state of the oscillator.

use bon::Builder;

use crate::{Float, error::Error, ode::ODE};

/// Physical parameters of a driven, damped harmonic oscillator:
/// `m x'' + c x' + k x = F0 sin(omega t)`.
///
/// Constructed once and never mutated. The derived frequencies are computed
/// on demand rather than stored, so they can never drift out of sync with
/// the raw coefficients.
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    /// Mass (kg). Must be strictly positive.
    pub mass: Float,
    /// Spring constant (N/m).
    pub stiffness: Float,
    /// Damping coefficient (kg/s).
    #[builder(default = 0.0)]
    pub damping: Float,
    /// Driving force amplitude F0 (N). Zero means unforced.
    #[builder(default = 0.0)]
    pub forcing_amplitude: Float,
    /// Driving angular frequency omega (rad/s).
    #[builder(default = 0.0)]
    pub forcing_frequency: Float,
}

impl Parameters {
    /// Natural angular frequency omega_n = sqrt(k/m).
    pub fn omega_n(&self) -> Float {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping factor beta = c/(2m), the decay rate of the envelope.
    pub fn beta(&self) -> Float {
        self.damping / (2.0 * self.mass)
    }

    /// Damped angular frequency omega_d = sqrt(omega_n^2 - beta^2).
    ///
    /// Only defined for underdamped systems (omega_n > beta); critically
    /// damped and overdamped parameters yield [`Error::UnsupportedRegime`]
    /// instead of a NaN.
    pub fn omega_d(&self) -> Result<Float, Error> {
        let omega_n = self.omega_n();
        let beta = self.beta();
        if omega_n <= beta {
            return Err(Error::UnsupportedRegime { omega_n, beta });
        }
        Ok((omega_n * omega_n - beta * beta).sqrt())
    }

    /// Check the basic invariants the dynamics rely on.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.mass > 0.0) {
            return Err(Error::InvalidMass(self.mass));
        }
        if self.stiffness < 0.0 || !self.stiffness.is_finite() {
            return Err(Error::InvalidStiffness(self.stiffness));
        }
        Ok(())
    }

    /// Driving force F(t) = F0 sin(omega t); zero when unforced.
    pub fn forcing(&self, t: Float) -> Float {
        if self.forcing_amplitude == 0.0 {
            0.0
        } else {
            self.forcing_amplitude * (self.forcing_frequency * t).sin()
        }
    }
}

/// The equation of motion as a first-order system in (x, v):
/// x' = v, v' = (F(t) - c v - k x) / m.
impl ODE for Parameters {
    fn ode(&self, t: Float, y: &[Float], dydt: &mut [Float]) {
        let (x, v) = (y[0], y[1]);
        dydt[0] = v;
        dydt[1] = (self.forcing(t) - self.damping * v - self.stiffness * x) / self.mass;
    }
}

/// Displacement and velocity at t = 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InitialState {
    pub displacement: Float,
    pub velocity: Float,
}

impl InitialState {
    pub fn new(displacement: Float, velocity: Float) -> Self {
        Self { displacement, velocity }
    }

    /// State vector in integrator layout.
    pub fn as_vector(&self) -> [Float; 2] {
        [self.displacement, self.velocity]
    }
}

impl From<(Float, Float)> for InitialState {
    fn from((displacement, velocity): (Float, Float)) -> Self {
        Self { displacement, velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn damped() -> Parameters {
        Parameters::builder().mass(1.0).stiffness(4.0).damping(0.5).build()
    }

    #[test]
    fn derived_frequencies() {
        let p = damped();
        assert_relative_eq!(p.omega_n(), 2.0);
        assert_relative_eq!(p.beta(), 0.25);
        assert_relative_eq!(p.omega_d().unwrap(), 3.9375_f64.sqrt());
    }

    #[test]
    fn overdamped_has_no_omega_d() {
        let p = Parameters::builder().mass(1.0).stiffness(1.0).damping(5.0).build();
        assert!(matches!(p.omega_d(), Err(Error::UnsupportedRegime { .. })));
    }

    #[test]
    fn critically_damped_has_no_omega_d() {
        // omega_n = 2, beta = 2
        let p = Parameters::builder().mass(1.0).stiffness(4.0).damping(4.0).build();
        assert!(matches!(p.omega_d(), Err(Error::UnsupportedRegime { .. })));
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        for mass in [0.0, -1.0, Float::NAN] {
            let p = Parameters::builder().mass(mass).stiffness(1.0).build();
            assert!(matches!(p.validate(), Err(Error::InvalidMass(_))));
        }
    }

    #[test]
    fn dynamics_matches_equation_of_motion() {
        let p = Parameters::builder()
            .mass(2.0)
            .stiffness(3.0)
            .damping(0.5)
            .forcing_amplitude(1.0)
            .forcing_frequency(1.5)
            .build();
        let y = [0.4, -0.2];
        let mut dydt = [0.0; 2];
        p.ode(1.0, &y, &mut dydt);
        assert_relative_eq!(dydt[0], -0.2);
        assert_relative_eq!(dydt[1], ((1.5_f64).sin() - 0.5 * -0.2 - 3.0 * 0.4) / 2.0);
    }
}
