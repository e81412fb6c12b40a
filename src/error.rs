//! Errors for parameter validation, regime selection, and integration.

use crate::{Float, status::Status};

/// All failure modes of the crate.
///
/// Variants fall into three classes: invalid parameters (rejected before any
/// computation starts), unsupported analytical regime (the requested closed
/// form does not exist for the given parameters), and integration failure
/// (the numerical integrator terminated without reaching the end of the
/// interval). No variant is ever replaced by a fallback numeric value.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Mass must be strictly positive (the dynamics divide by it).
    InvalidMass(Float),
    /// Stiffness must be strictly positive for an oscillatory closed form.
    InvalidStiffness(Float),
    /// Time span is empty or inverted (t_end <= t_start).
    InvalidTimeSpan { start: Float, end: Float },
    /// A grid needs at least two sample points.
    InvalidSampleCount(usize),
    /// Sample step must be strictly positive.
    InvalidSampleStep(Float),
    /// Exactly one of sample_count / sample_step must be given.
    AmbiguousSampling,
    /// Fixed step size is zero or points away from the end of the interval.
    InvalidStepSize(Float),
    /// A requested sample time lies outside the integration span.
    SampleOutOfSpan { time: Float, start: Float, end: Float },
    /// An integrator setting is outside its admissible range.
    SettingOutOfRange { name: &'static str, value: Float },
    /// The closed form requires an underdamped system (omega_n > beta).
    UnsupportedRegime { omega_n: Float, beta: Float },
    /// The integrator stopped before reaching the end of the interval.
    IntegrationFailure(Status),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidMass(m) => write!(f, "mass must be positive (got {})", m),
            Error::InvalidStiffness(k) => write!(f, "stiffness must be positive (got {})", k),
            Error::InvalidTimeSpan { start, end } => {
                write!(f, "time span must satisfy t_end > t_start (got [{}, {}])", start, end)
            }
            Error::InvalidSampleCount(n) => {
                write!(f, "sample count must be at least 2 (got {})", n)
            }
            Error::InvalidSampleStep(dt) => {
                write!(f, "sample step must be positive (got {})", dt)
            }
            Error::AmbiguousSampling => {
                write!(f, "give exactly one of sample_count or sample_step")
            }
            Error::InvalidStepSize(h) => write!(f, "step size h has invalid sign (got {})", h),
            Error::SampleOutOfSpan { time, start, end } => write!(
                f,
                "sample time {} lies outside the integration span [{}, {}]",
                time, start, end
            ),
            Error::SettingOutOfRange { name, value } => {
                write!(f, "integrator setting {} is out of range (got {})", name, value)
            }
            Error::UnsupportedRegime { omega_n, beta } => write!(
                f,
                "closed form requires an underdamped system: omega_n = {} <= beta = {}",
                omega_n, beta
            ),
            Error::IntegrationFailure(status) => write!(f, "integration failed: {}", status),
        }
    }
}

impl std::error::Error for Error {}
