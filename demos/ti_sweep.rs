//! Turbulence-intensity sweep of the meander compensation.
//!
//! Solves the same boundary condition across ambient turbulence intensities
//! and prints how the meander statistic and the observed (compensated)
//! centerline deficit respond.
//!
//! Run with: `cargo run --example ti_sweep --release`

use wake_rs::{MeanderCompensator, RadialProfile, StaticWake};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let r: Vec<f64> = (0..121).map(|i| i as f64 * 0.05).collect();
    let induction = RadialProfile::from_fn(r, |ri| if ri <= 1.0 { 0.25 } else { 0.0 })?;

    for ti in [0.0001, 0.05, 0.1, 0.15, 0.2] {
        let sol = StaticWake::new()
            .with_turbulence_intensity(ti)
            .solve_profile(&induction)?;

        let nx = sol.grid.nx();
        let compensator = MeanderCompensator::new(ti)?;
        println!(
            "TI {ti:>6}: meander std (10 R) = {:.3} R, static U_c(10D) = {:.3}, meandered U_c(10D) = {:.3}",
            compensator.meander_std(10.0),
            sol.u.get(nx - 1, 0),
            sol.u_meandered.get(nx - 1, 0),
        );
    }
    Ok(())
}
