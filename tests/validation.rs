//! Parameter validation, regime rejection, and integration failure paths.

use oscillate::prelude::*;

mod common;
use common::damped_scenario;

fn scenario_with(mass: f64, t_start: f64, t_end: f64) -> Scenario {
    Scenario::builder()
        .mass(mass)
        .stiffness(4.0)
        .initial_displacement(1.0)
        .t_start(t_start)
        .t_end(t_end)
        .sample_count(100)
        .build()
}

#[test]
fn empty_time_span_is_invalid() {
    let err = simulate(&scenario_with(1.0, 2.0, 2.0), &Dopri5::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidTimeSpan { start, end } if start == 2.0 && end == 2.0));

    let err = simulate(&scenario_with(1.0, 5.0, 1.0), &Dopri5::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidTimeSpan { .. }));
}

#[test]
fn non_positive_mass_is_invalid() {
    for mass in [0.0, -2.5] {
        let err = simulate(&scenario_with(mass, 0.0, 1.0), &Dopri5::default()).unwrap_err();
        assert_eq!(err, Error::InvalidMass(mass));
    }
}

#[test]
fn overdamped_system_has_no_damped_closed_form() {
    // omega_n = 2, beta = 5: the free-damped formula does not exist, and the
    // solver must refuse rather than plot NaN physics.
    let scenario = Scenario::builder()
        .mass(1.0)
        .stiffness(4.0)
        .damping(10.0)
        .initial_displacement(1.0)
        .t_end(5.0)
        .sample_count(100)
        .build();
    let err = simulate(&scenario, &Dopri5::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedRegime { omega_n, beta } if omega_n == 2.0 && beta == 5.0));
}

#[test]
fn critically_damped_request_through_the_damped_formula_fails() {
    // omega_n = beta = 2: omega_d would be zero, dividing B by it.
    let params = Parameters::builder().mass(1.0).stiffness(4.0).damping(4.0).build();
    let grid = TimeGrid::linspace(0.0, 1.0, 10).unwrap();
    let err = compare_in_regime(
        &params,
        InitialState::new(1.0, 0.0),
        &grid,
        Regime::FreeDamped,
        &Dopri5::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedRegime { omega_n, beta } if omega_n == beta));
}

#[test]
fn fixed_step_must_point_at_the_end_of_the_interval() {
    let err = simulate(&damped_scenario(), &Rk4::new(-0.1)).unwrap_err();
    assert_eq!(err, Error::InvalidStepSize(-0.1));
    let err = simulate(&damped_scenario(), &Rk4::new(0.0)).unwrap_err();
    assert_eq!(err, Error::InvalidStepSize(0.0));
}

#[test]
fn out_of_range_settings_are_rejected() {
    let integrator = Dopri5::builder()
        .settings(Settings::builder().safety_factor(1.5).build())
        .build();
    let err = simulate(&damped_scenario(), &integrator).unwrap_err();
    assert!(matches!(err, Error::SettingOutOfRange { name: "safety_factor", .. }));

    let integrator = Dopri5::builder()
        .settings(Settings::builder().beta(0.5).build())
        .build();
    let err = simulate(&damped_scenario(), &integrator).unwrap_err();
    assert!(matches!(err, Error::SettingOutOfRange { name: "beta", .. }));
}

#[test]
fn exhausted_step_budget_is_an_integration_failure_not_a_partial_result() {
    let integrator = Dopri5::builder()
        .settings(Settings::builder().nmax(3).build())
        .build();
    let err = simulate(&damped_scenario(), &integrator).unwrap_err();
    assert_eq!(err, Error::IntegrationFailure(Status::NeedLargerNMax));
}

struct StopImmediately;

impl SolOut for StopImmediately {
    fn solout<I: Interpolate>(
        &mut self,
        told: f64,
        t: f64,
        _y: &[f64],
        _interpolator: Option<&I>,
    ) -> ControlFlag {
        if told == t {
            // Let the initial call pass, stop on the first real step.
            ControlFlag::Continue
        } else {
            ControlFlag::Interrupt
        }
    }
}

#[test]
fn callback_interrupt_stops_the_step_loop() {
    use oscillate::rk::dopri5;

    let params = Parameters::builder().mass(1.0).stiffness(4.0).build();
    let result = dopri5(
        &params,
        0.0,
        10.0,
        &[1.0, 0.0],
        1e-6,
        1e-6,
        Some(&mut StopImmediately),
        &Settings::default(),
    )
    .unwrap();
    assert_eq!(result.status, Status::Interrupted);
    assert!(result.t < 10.0);
}

#[test]
fn callback_interrupt_surfaces_as_integration_failure() {
    let params = Parameters::builder().mass(1.0).stiffness(4.0).build();
    let grid = TimeGrid::linspace(0.0, 10.0, 100).unwrap();
    let err = Dopri5::default()
        .integrate_with_callback(
            &params,
            0.0,
            10.0,
            &[1.0, 0.0],
            grid.times(),
            &mut StopImmediately,
        )
        .unwrap_err();
    assert_eq!(err, Error::IntegrationFailure(Status::Interrupted));
}

#[test]
fn sample_times_outside_the_span_are_rejected() {
    let params = Parameters::builder().mass(1.0).stiffness(4.0).build();
    let y0 = [1.0, 0.0];

    let err = Dopri5::default()
        .integrate(&params, 0.0, 1.0, &y0, &[0.0, 0.5, 2.0])
        .unwrap_err();
    assert_eq!(err, Error::SampleOutOfSpan { time: 2.0, start: 0.0, end: 1.0 });

    let err = Rk4::new(0.01)
        .integrate(&params, 0.0, 1.0, &y0, &[-0.5, 0.5])
        .unwrap_err();
    assert_eq!(err, Error::SampleOutOfSpan { time: -0.5, start: 0.0, end: 1.0 });
}
