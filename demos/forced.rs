//! Driven oscillator from rest: F(t) = sin(1.5 t), with and without damping.

use oscillate::prelude::*;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<(), Error> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    // Set damping to 0.0 for the undamped impulse-response formula.
    for damping in [0.2, 0.0] {
        let scenario = Scenario::builder()
            .mass(1.0)
            .stiffness(1.0)
            .damping(damping)
            .forcing_amplitude(1.0)
            .forcing_frequency(1.5)
            .initial_displacement(0.0)
            .t_end(20.0)
            .sample_step(0.01)
            .build();

        let run = simulate(&scenario, &Dopri5::default())?;

        let plot = run.plot_data();
        println!("{} (c = {})", plot.title, damping);
        println!(
            "{:>10}  {:>14}  {:>14}",
            plot.x_label, plot.series[0].label, plot.series[1].label
        );
        for ((t, num), ana) in run
            .numerical
            .samples()
            .zip(run.analytical.displacements())
            .step_by(200)
        {
            println!("{:>10.4}  {:>14.8}  {:>14.8}", t, num, ana);
        }
        println!();
    }
    Ok(())
}
