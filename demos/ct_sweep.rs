//! Thrust-coefficient sweep on the reference case.
//!
//! Solves the wake at Ct = 0.3, 0.6, 0.9 for each closure formulation and
//! prints the centerline recovery, mirroring the standard validation sweep.
//!
//! Run with: `cargo run --example ct_sweep --release`

use wake_rs::{analysis, StaticWake, ViscosityClosure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tsr = 7.0;
    let cts = [0.3, 0.6, 0.9];

    for closure in [
        ViscosityClosure::Iec,
        ViscosityClosure::Madsen,
        ViscosityClosure::Larsen,
        ViscosityClosure::Keck,
    ] {
        println!("closure: {}", closure.name());
        for &ct in &cts {
            let sol = StaticWake::new()
                .with_turbulence_intensity(0.1)
                .with_closure(closure)
                .solve_ct(tsr, ct)?;

            let centerline = analysis::centerline_velocity(&sol.u);
            let nx = sol.grid.nx();
            println!(
                "  ct {ct}: U_c(0) = {:.3}, U_c(5D) = {:.3}, U_c(10D) = {:.3}, width(10D) = {:.2} R",
                centerline[0],
                centerline[nx / 2],
                centerline[nx - 1],
                sol.widths[nx - 1],
            );
        }
    }
    Ok(())
}
