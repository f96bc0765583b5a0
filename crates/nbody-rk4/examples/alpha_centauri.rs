//! Alpha Centauri triple integration example
//!
//! Loads the reference scenario, integrates it with RK4 in
//! non-dimensional units, and reports conservation diagnostics.
//!
//! Run with: cargo run --package nbody-rk4 --example alpha_centauri -- -f circular_binary.yaml

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use nbody_rk4::config::ScenarioConfig;
use nbody_rk4::diagnostics::{
    centre_of_mass, relative_energy_error, total_angular_momentum, total_energy, total_momentum,
};

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "alpha_centauri.yaml")]
    file_name: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&args.file_name);

    println!("RK4 N-body Integrator: {}\n", args.file_name);
    println!("{}", "=".repeat(60));

    let scenario = ScenarioConfig::from_path(&path)
        .with_context(|| format!("loading {}", path.display()))?
        .build()?;
    let constants = scenario.constants;

    println!("\nCoupling constants:");
    println!("  K1 = {:.6}", constants.k1());
    println!("  K2 = {:.6}", constants.k2());

    println!("\nInitial conditions:");
    for body in &scenario.bodies {
        println!(
            "  {:<12} m = {:.3}  r = [{:+.3}, {:+.3}, {:+.3}]  v = [{:+.3}, {:+.3}, {:+.3}]",
            body.name,
            body.mass(),
            body.position.x,
            body.position.y,
            body.position.z,
            body.velocity.x,
            body.velocity.y,
            body.velocity.z,
        );
    }

    let initial_energy = total_energy(&scenario.bodies, &constants);
    let initial_com = centre_of_mass(&scenario.bodies);

    println!("\nIntegration parameters:");
    println!("  Timestep: {}", scenario.tau);
    println!("  Total steps: {}", scenario.num_steps);
    if let Some(reference) = constants.reference() {
        let years = constants.to_physical_time(scenario.tau * scenario.num_steps as f64)
            / nbody_rk4::constants::SECONDS_PER_YEAR;
        println!("  Physical span: {:.1} years (t₀ = {:.3e} s)", years, reference.time);
    }

    println!("\nIntegrating...");
    let trajectory = scenario.run()?;

    let Some(final_bodies) = trajectory.final_bodies() else {
        return Ok(());
    };

    println!("\nFinal positions (t = {}):", trajectory.times().last().copied().unwrap_or(0.0));
    for body in &final_bodies {
        println!(
            "  {:<12} [{:+.4}, {:+.4}, {:+.4}]",
            body.name, body.position.x, body.position.y, body.position.z
        );
    }

    let final_energy = total_energy(&final_bodies, &constants);
    let com_shift = (centre_of_mass(&final_bodies) - initial_com).magnitude();

    println!("\nDiagnostics:");
    println!("  Energy: {:.6e} → {:.6e}", initial_energy, final_energy);
    println!(
        "  Relative energy error: {:.3e}",
        relative_energy_error(initial_energy, final_energy)
    );
    println!("  Centre of mass shift: {:.3e}", com_shift);
    println!("  Net momentum: {:.3e}", total_momentum(&final_bodies).magnitude());
    println!(
        "  Angular momentum: {:.6e}",
        total_angular_momentum(&final_bodies).magnitude()
    );

    let non_finite = trajectory.frames().iter().position(|f| !f.is_finite());
    match non_finite {
        Some(step) => println!("\n⚠ Non-finite state from step {}", step),
        None => println!("\n✓ All {} frames finite", trajectory.len()),
    }

    Ok(())
}
