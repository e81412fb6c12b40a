//! Shared fixtures: the three scenarios the crate is built around.
#![allow(dead_code)]

use oscillate::prelude::*;
use std::f64::consts::PI;

/// Free oscillation, no damping: A = 1, omega_n = 2 pi, phi = 0.
/// 1001 samples over 5 s puts a sample exactly every 0.005 s.
pub fn undamped_scenario() -> Scenario {
    Scenario::builder()
        .mass(1.0)
        .stiffness(4.0 * PI * PI)
        .initial_displacement(1.0)
        .t_end(5.0)
        .sample_count(1001)
        .build()
}

/// Underdamped free decay: omega_n = 2, beta = 0.25, omega_d ~ 1.9843.
pub fn damped_scenario() -> Scenario {
    Scenario::builder()
        .mass(1.0)
        .stiffness(4.0)
        .damping(0.5)
        .initial_displacement(1.0)
        .t_end(10.0)
        .sample_count(1000)
        .build()
}

/// Driven oscillator started from rest, fixed-step sampling.
pub fn forced_scenario(damping: f64) -> Scenario {
    Scenario::builder()
        .mass(1.0)
        .stiffness(1.0)
        .damping(damping)
        .forcing_amplitude(1.0)
        .forcing_frequency(1.5)
        .initial_displacement(0.0)
        .t_end(20.0)
        .sample_step(0.01)
        .build()
}

pub fn tight_dopri5() -> Dopri5 {
    Dopri5::builder().rtol(1e-8).atol(1e-8).build()
}
