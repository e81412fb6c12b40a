//! Callback hook executed after each accepted step, plus the default
//! implementation that samples the solution at requested output times.

use crate::{Float, interpolate::Interpolate};

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller; the
///   run terminates with [`crate::Status::Interrupted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// The callback is invoked once before the main loop (with `told == t`) and
/// after every accepted step with the left and right ends of the step, the
/// state at `t`, and, when available, a dense-output interpolant valid on
/// `[told, t]`. The initial call carries no interpolant.
pub trait SolOut {
    fn solout<I: Interpolate>(
        &mut self,
        told: Float,
        t: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag;
}

/// A [`SolOut`] that does nothing; the default callback slot of [`Sampler`].
pub struct NoCallback;

impl SolOut for NoCallback {
    fn solout<I: Interpolate>(
        &mut self,
        _told: Float,
        _t: Float,
        _y: &[Float],
        _interpolator: Option<&I>,
    ) -> ControlFlag {
        ControlFlag::Continue
    }
}

/// Records the solution at a fixed, ascending list of sample times,
/// optionally forwarding each accepted step to a user callback.
///
/// Samples that coincide with a step endpoint (within `tol`) are copied from
/// the integrator state verbatim, so the first recorded sample is the exact
/// initial condition. Samples strictly inside a step are evaluated through
/// the dense-output interpolant. An interrupt from the user callback is
/// forwarded to the integrator.
pub struct Sampler<'a, U: SolOut = NoCallback> {
    sample_times: &'a [Float],
    next_idx: usize,
    tol: Float,
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
    user: Option<&'a mut U>,
}

impl<'a> Sampler<'a, NoCallback> {
    pub fn new(sample_times: &'a [Float]) -> Self {
        Self {
            sample_times,
            next_idx: 0,
            tol: 1e-12,
            t: Vec::with_capacity(sample_times.len()),
            y: Vec::with_capacity(sample_times.len()),
            user: None,
        }
    }
}

impl<'a, U: SolOut> Sampler<'a, U> {
    pub fn with_callback(sample_times: &'a [Float], user: &'a mut U) -> Self {
        Self {
            sample_times,
            next_idx: 0,
            tol: 1e-12,
            t: Vec::with_capacity(sample_times.len()),
            y: Vec::with_capacity(sample_times.len()),
            user: Some(user),
        }
    }

    /// First sample time not recorded yet, if any.
    pub fn pending(&self) -> Option<Float> {
        self.sample_times.get(self.next_idx).copied()
    }

    /// Consume the sampler, returning the recorded times and states.
    pub fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>) {
        (self.t, self.y)
    }
}

impl<'a, U: SolOut> SolOut for Sampler<'a, U> {
    fn solout<I: Interpolate>(
        &mut self,
        told: Float,
        t: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag {
        let te = self.sample_times;
        let mut i = self.next_idx;

        if (told - t).abs() <= self.tol {
            // Initial call: only sample times coinciding with t0 can be
            // recorded, and they are copied exactly.
            while i < te.len() && (te[i] - t).abs() <= self.tol {
                self.t.push(te[i]);
                self.y.push(y.to_vec());
                i += 1;
            }
        } else {
            // Accepted step: record every sample time in (told, t].
            while i < te.len() && te[i] <= t + self.tol {
                if (te[i] - t).abs() <= self.tol {
                    self.t.push(te[i]);
                    self.y.push(y.to_vec());
                } else if let Some(interp) = interpolator {
                    let mut yi = vec![0.0; y.len()];
                    interp.interpolate(te[i], &mut yi);
                    self.t.push(te[i]);
                    self.y.push(yi);
                } else {
                    break;
                }
                i += 1;
            }
        }
        self.next_idx = i;

        if let Some(user) = self.user.as_deref_mut() {
            return user.solout(told, t, y, interpolator);
        }

        ControlFlag::Continue
    }
}
