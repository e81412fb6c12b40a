//! Underdamped free decay: m = 1 kg, k = 4 N/m, c = 0.5 kg/s.

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

    let scenario = Scenario::builder()
        .mass(1.0)
        .stiffness(4.0)
        .damping(0.5)
        .initial_displacement(1.0)
        .t_end(10.0)
        .sample_count(1000)
        .build();

    let run = simulate(&scenario, &Dopri5::default())?;

    let plot = run.plot_data();
    println!("{}", plot.title);
    println!(
        "{:>10}  {:>14}  {:>14}",
        plot.x_label, plot.series[0].label, plot.series[1].label
    );
    for ((t, num), ana) in run
        .numerical
        .samples()
        .zip(run.analytical.displacements())
        .step_by(50)
    {
        println!("{:>10.4}  {:>14.8}  {:>14.8}", t, num, ana);
    }
    println!(
        "max |numerical - analytical| = {:.3e} ({} accepted / {} rejected steps)",
        run.max_abs_deviation(),
        run.naccpt,
        run.nrejct
    );
    Ok(())
}
