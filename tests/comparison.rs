//! Numerical-vs-analytical agreement over the three scenarios.

use approx::assert_abs_diff_eq;
use oscillate::prelude::*;

mod common;
use common::{damped_scenario, forced_scenario, tight_dopri5, undamped_scenario};

#[test]
fn undamped_numerical_matches_closed_form_everywhere() {
    let run = simulate(&undamped_scenario(), &Dopri5::default()).unwrap();
    assert_eq!(run.regime, Regime::FreeUndamped);
    assert_eq!(run.numerical.len(), 1001);
    assert!(
        run.max_abs_deviation() <= 1e-3,
        "max deviation {} exceeds 1e-3",
        run.max_abs_deviation()
    );
}

#[test]
fn undamped_amplitude_neither_decays_nor_grows() {
    let run = simulate(&undamped_scenario(), &tight_dopri5()).unwrap();
    // Period is 1 s and the grid steps by 0.005 s, so every integer time is
    // a sample and a displacement peak.
    for k in 1..=5 {
        let idx = k * 200;
        let (t, x) = run.numerical.samples().nth(idx).unwrap();
        assert_abs_diff_eq!(t, k as f64, epsilon = 1e-12);
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-3);
    }
    // Energy conservation also bounds the displacement between peaks.
    for (_, x) in run.numerical.samples() {
        assert!(x.abs() <= 1.0 + 1e-3);
    }
}

#[test]
fn undamped_closed_form_crosses_zero_at_quarter_period() {
    // A = 1, omega_n = 2 pi, phi = 0: x(0.25) = cos(pi/2) = 0.
    let run = simulate(&undamped_scenario(), &tight_dopri5()).unwrap();
    let (t, x) = run.analytical.samples().nth(50).unwrap();
    assert_abs_diff_eq!(t, 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
}

#[test]
fn damped_initial_condition_passes_through_exactly() {
    let run = simulate(&damped_scenario(), &Dopri5::default()).unwrap();
    assert_eq!(run.regime, Regime::FreeDamped);
    // Both trajectories must start at exactly x0 = 1.0, no interpolation.
    assert_eq!(run.numerical.displacements()[0], 1.0);
    assert_eq!(run.analytical.displacements()[0], 1.0);
}

#[test]
fn damped_displacement_stays_inside_the_envelope() {
    let run = simulate(&damped_scenario(), &tight_dopri5()).unwrap();
    let beta = 0.25;
    for (t, x) in run.numerical.samples() {
        let envelope = 1.05 * (-beta * t).exp();
        assert!(
            x.abs() <= envelope,
            "|x({})| = {} escapes envelope {}",
            t,
            x.abs(),
            envelope
        );
    }
}

#[test]
fn damped_numerical_matches_closed_form() {
    let run = simulate(&damped_scenario(), &tight_dopri5()).unwrap();
    assert!(run.max_abs_deviation() <= 1e-3);
}

#[test]
fn forced_runs_classify_and_start_from_rest() {
    for damping in [0.0, 0.2] {
        let run = simulate(&forced_scenario(damping), &Dopri5::default()).unwrap();
        assert_eq!(run.regime, Regime::Forced);
        assert_eq!(run.numerical.displacements()[0], 0.0);
        assert_eq!(run.analytical.displacements()[0], 0.0);
        assert_eq!(run.numerical.len(), run.analytical.len());
        assert_eq!(run.numerical.len(), 2000);
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let a = simulate(&damped_scenario(), &Dopri5::default()).unwrap();
    let b = simulate(&damped_scenario(), &Dopri5::default()).unwrap();
    assert_eq!(a.analytical, b.analytical);
    assert_eq!(a.numerical, b.numerical);
}

#[test]
fn fixed_step_reference_integrator_substitutes_for_the_adaptive_pair() {
    let run = simulate(&damped_scenario(), &Rk4::new(0.001)).unwrap();
    assert_eq!(run.numerical.displacements()[0], 1.0);
    assert!(run.max_abs_deviation() <= 1e-3);
}

#[test]
fn plot_data_carries_labels_and_aligned_series() {
    let run = simulate(&undamped_scenario(), &Dopri5::default()).unwrap();
    let plot = run.plot_data();
    assert_eq!(plot.series.len(), 2);
    assert_eq!(plot.series[0].label, "Numerical Solution");
    assert_eq!(plot.series[1].label, "Analytical Solution");
    assert_eq!(plot.series[0].t, plot.series[1].t);
    assert_eq!(plot.x_label, "Time (s)");
    assert_eq!(plot.y_label, "Displacement (m)");
    assert!(plot.title.contains("Undamped"));
}
