//! Status codes for integrators

/// Terminal status of an integration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// A [`crate::SolOut`] callback requested early termination.
    Interrupted,
    /// The step budget (`nmax`) was exhausted before reaching the end of
    /// the interval.
    NeedLargerNMax,
    /// The step size underflowed below machine rounding at the current
    /// abscissa.
    StepSizeTooSmall,
    /// Repeated stiffness detections; an explicit method is the wrong tool.
    ProbablyStiff,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Interrupted => write!(f, "interrupted by callback"),
            Status::NeedLargerNMax => write!(f, "maximum number of steps exceeded"),
            Status::StepSizeTooSmall => write!(f, "step size became too small"),
            Status::ProbablyStiff => write!(f, "problem seems to become stiff"),
        }
    }
}
