//! Star and comet demo
//!
//! Runs the two-body scene the browser front-end starts with and prints
//! conservation diagnostics, then repeats it with outgassing switched on.
//!
//! Run with: cargo run --package nbody --example comet_orbit

use nbody::body::Body;
use nbody::config::{IntegratorKind, SimulationConfig};
use nbody::forces::gravity::circular_velocity;
use nbody::outgassing::OutgassingConfig;
use nbody::system::System;

fn scene(config: SimulationConfig) -> nbody::Result<System> {
    let mut system = System::with_config(config)?;
    system.add(Body::star().build());
    system.add(
        Body::comet()
            .mass(1.0)?
            .position(0.3, 0.3)?
            .velocity(0.0, -0.14)?
            .build(),
    );
    Ok(system)
}

fn report(label: &str, system: &mut System, ticks: usize) {
    let initial_energy = system.total_energy();
    let initial_momentum = system.total_momentum();
    let initial_l = system.total_angular_momentum();

    println!("\n{}", label);
    println!("{}", "-".repeat(60));
    println!("  Initial energy: {:.6e}", initial_energy);
    println!("  Initial angular momentum: {:.6e}", initial_l);

    for block in 1..=5 {
        system.run(ticks / 5);
        let comet = system.body(1).map(|b| (b.qx(), b.qy()));
        if let Ok((x, y)) = comet {
            println!(
                "  t={:>6.2}  comet=({:+.4}, {:+.4})  bodies={}",
                system.time(),
                x,
                y,
                system.count()
            );
        }
        if block == 5 {
            let energy_error = ((system.total_energy() - initial_energy) / initial_energy).abs();
            let momentum_drift = (system.total_momentum() - initial_momentum).magnitude();
            let l_error = ((system.total_angular_momentum() - initial_l) / initial_l).abs();
            println!("  Energy error: {:.2e}", energy_error);
            println!("  Momentum drift: {:.2e}", momentum_drift);
            println!("  Angular momentum error: {:.2e}", l_error);
        }
    }
}

fn main() -> nbody::Result<()> {
    println!("Comet orbit demo");
    println!("{}", "=".repeat(60));

    let defaults = SimulationConfig::default();
    let r = (0.3f64 * 0.3 + 0.3 * 0.3).sqrt();
    println!(
        "Circular speed at r={:.3}: {:.4} (comet starts at 0.14)",
        r,
        circular_velocity(defaults.g, 1000.0, r)
    );

    let mut euler = scene(defaults)?;
    report("Semi-implicit Euler", &mut euler, 5_000);

    let mut leapfrog = scene(SimulationConfig {
        integrator: IntegratorKind::Leapfrog,
        ..defaults
    })?;
    report("Leapfrog", &mut leapfrog, 5_000);

    let mut dusty = scene(SimulationConfig {
        outgassing: Some(OutgassingConfig {
            seed: 1,
            ..OutgassingConfig::default()
        }),
        radiation_pressure: 1.0e-4,
        ..defaults
    })?;
    report("Outgassing with radiation pressure", &mut dusty, 5_000);

    let dust = dusty.iter().filter(|b| b.parent().is_some()).count();
    println!("\nDust particles shed: {}", dust);

    Ok(())
}
