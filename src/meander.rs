//! Meander compensation.
//!
//! The marching solver produces the wake in its own (meandering) frame of
//! reference. Large-scale ambient turbulence displaces the wake core
//! laterally, so a fixed observer downstream sees a smoother, wider,
//! shallower time-averaged deficit. This module converts the quasi-steady
//! fields into that fixed-frame average.
//!
//! The lateral displacement is modeled as an isotropic 2-D Gaussian with a
//! standard deviation growing downstream (a passive-transport model:
//! displacement accumulates in proportion to travel distance and ambient
//! turbulence intensity). Averaging an axisymmetric profile over that
//! displacement reduces exactly to a one-dimensional radial integral with a
//! Rician kernel,
//!
//! ```text
//! K(r, r') = (r'/sigma^2) exp(-(r - r')^2 / (2 sigma^2)) I0e(r r'/sigma^2)
//! ```
//!
//! where `I0e` is the exponentially scaled modified Bessel function of
//! order zero. The deficit `1 - U` is blurred rather than U itself, so a
//! deficit-free flow is preserved exactly and no station can overshoot the
//! free stream. The kernel satisfies the adjoint identity
//! `r K(r, r') = r' K(r', r)`, which makes the continuum transport conserve
//! the integral deficit `∫ r (1 - U) dr`; on the truncated radial domain
//! each source sample is divided by its own in-domain kernel mass (equal,
//! by the same identity, to the row mass at that radius), so the discrete
//! transport conserves the integral deficit exactly — the blur
//! redistributes the deficit without injecting or losing energy.

use crate::error::WakeError;
use crate::grid::{FlowField, Grid};
use crate::solver::StaticField;

/// Below this fraction of the radial spacing the discrete kernel is not
/// resolvable (and numerically degenerates to all-zero weights near the
/// axis), so the station is copied unchanged. This also covers the rotor
/// plane (sigma = 0) and the calm-flow limit.
const SIGMA_FLOOR_CELLS: f64 = 0.25;

/// Meander-compensation stage.
#[derive(Debug, Clone, Copy)]
pub struct MeanderCompensator {
    /// Ambient turbulence intensity
    ti: f64,
    /// Lateral transport calibration constant
    k_m: f64,
}

impl MeanderCompensator {
    /// Create a compensator for the given ambient turbulence intensity.
    ///
    /// # Errors
    /// `InvalidParameter` for turbulence intensity outside [0, 1).
    pub fn new(ti: f64) -> Result<Self, WakeError> {
        if !(0.0..1.0).contains(&ti) || !ti.is_finite() {
            return Err(WakeError::InvalidParameter {
                name: "ti",
                value: ti,
                expected: "turbulence intensity in [0, 1)",
            });
        }
        Ok(Self { ti, k_m: 0.8 })
    }

    /// Override the transport calibration constant (default 0.8).
    pub fn with_transport_constant(mut self, k_m: f64) -> Self {
        self.k_m = k_m;
        self
    }

    /// Lateral meander standard deviation at downstream position `x`
    /// (rotor radii).
    ///
    /// Zero at the rotor plane, growing linearly with travel distance and
    /// proportionally to ambient turbulence intensity.
    pub fn meander_std(&self, x: f64) -> f64 {
        self.k_m * self.ti * x
    }

    /// The sigma curve on a grid's downstream stations.
    pub fn meander_std_curve(&self, grid: &Grid) -> Vec<f64> {
        grid.x.iter().map(|&x| self.meander_std(x)).collect()
    }

    /// Blur the static fields station by station, producing new meandered
    /// fields. The originals are not touched.
    pub fn apply(&self, field: &StaticField, grid: &Grid) -> (FlowField, FlowField) {
        let nx = grid.nx();
        let nr = grid.nr();
        let mut u_m = FlowField::filled(nx, nr, 1.0);
        let mut v_m = FlowField::zeros(grid);
        let mut kernel = vec![0.0; nr];
        let mut source_norm = vec![0.0; nr];
        let mut deficit = vec![0.0; nr];
        let mut v_scaled = vec![0.0; nr];
        let sigma_floor = SIGMA_FLOOR_CELLS * grid.dr;

        for j in 0..nx {
            let sigma = self.meander_std(grid.x[j]);
            let u_row = field.u.row(j);
            let v_row = field.v.row(j);
            if sigma < sigma_floor {
                u_m.row_mut(j).copy_from_slice(u_row);
                v_m.row_mut(j).copy_from_slice(v_row);
                continue;
            }
            // In-domain mass seen from each radius. By the adjoint
            // identity this row mass is also the fraction of a source at
            // that radius whose transported deficit lands inside [0, r_max].
            for i in 0..nr {
                fill_kernel(grid.r[i], &grid.r, sigma, &mut kernel);
                source_norm[i] = trapezoid(&kernel, grid.dr);
            }
            // Blur the deficit so U -> 1 is exact in the free stream.
            // Scaling each source by 1/source_norm conserves the trapezoid
            // integral of r (1 - U) to roundoff.
            for k in 0..nr {
                deficit[k] = (1.0 - u_row[k]) / source_norm[k];
                v_scaled[k] = v_row[k] / source_norm[k];
            }
            for i in 0..nr {
                fill_kernel(grid.r[i], &grid.r, sigma, &mut kernel);
                u_m.row_mut(j)[i] = 1.0 - weighted_trapezoid(&kernel, &deficit, grid.dr);
                v_m.row_mut(j)[i] = weighted_trapezoid(&kernel, &v_scaled, grid.dr);
            }
        }
        (u_m, v_m)
    }
}

/// Rician smearing kernel for target radius `r` over source radii `rp`.
fn fill_kernel(r: f64, rp: &[f64], sigma: f64, out: &mut [f64]) {
    let s2 = sigma * sigma;
    for (k, &rpk) in rp.iter().enumerate() {
        let d = r - rpk;
        out[k] = rpk / s2 * (-d * d / (2.0 * s2)).exp() * bessel_i0e(r * rpk / s2);
    }
}

fn trapezoid(f: &[f64], h: f64) -> f64 {
    let n = f.len();
    let interior: f64 = f[1..n - 1].iter().sum();
    h * (0.5 * (f[0] + f[n - 1]) + interior)
}

fn weighted_trapezoid(w: &[f64], f: &[f64], h: f64) -> f64 {
    let n = f.len();
    let mut acc = 0.5 * (w[0] * f[0] + w[n - 1] * f[n - 1]);
    for k in 1..n - 1 {
        acc += w[k] * f[k];
    }
    h * acc
}

/// Exponentially scaled modified Bessel function `I0(x) e^-x` for x >= 0.
///
/// Abramowitz & Stegun 9.8.1 / 9.8.2 polynomial fits; the scaled form avoids
/// overflow for the large arguments that arise at small sigma.
fn bessel_i0e(x: f64) -> f64 {
    debug_assert!(x >= 0.0);
    if x < 3.75 {
        let t = x / 3.75;
        let t2 = t * t;
        let i0 = 1.0
            + t2 * (3.5156229
                + t2 * (3.0899424
                    + t2 * (1.2067492 + t2 * (0.2659732 + t2 * (0.0360768 + t2 * 0.0045813)))));
        i0 * (-x).exp()
    } else {
        let t = 3.75 / x;
        (0.39894228
            + t * (0.01328592
                + t * (0.00225319
                    + t * (-0.00157565
                        + t * (0.00916281
                            + t * (-0.02057706
                                + t * (0.02635537 + t * (-0.01647633 + t * 0.00392377))))))))
            / x.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::integral_deficit;
    use crate::grid::GridConfig;
    use crate::solver::{SolverConfig, WakeSolver};
    use crate::viscosity::ViscosityClosure;

    fn solved_field() -> (Grid, StaticField) {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let row: Vec<f64> = grid
            .r
            .iter()
            .map(|&r| if r <= 1.0 { 0.7 } else { 1.0 })
            .collect();
        let solver = WakeSolver::new(
            grid.clone(),
            ViscosityClosure::Madsen,
            SolverConfig::default(),
        );
        let field = solver.solve(&row, 0.1).unwrap();
        (grid, field)
    }

    #[test]
    fn test_bessel_i0e_small_arguments() {
        // I0(0) = 1; I0(1) = 1.2660658..., so I0e(1) = 0.4657596...
        assert!((bessel_i0e(0.0) - 1.0).abs() < 1e-12);
        assert!((bessel_i0e(1.0) - 0.46575961).abs() < 1e-7);
        // I0(2) = 2.2795853..., I0e(2) = 0.30850832...
        assert!((bessel_i0e(2.0) - 0.30850832).abs() < 1e-7);
    }

    #[test]
    fn test_bessel_i0e_large_arguments() {
        // Asymptotically I0e(x) ~ 1/sqrt(2 pi x)
        for &x in &[10.0, 50.0, 500.0] {
            let asymptotic = 1.0 / (2.0 * std::f64::consts::PI * x).sqrt();
            assert!(
                (bessel_i0e(x) - asymptotic).abs() / asymptotic < 0.02,
                "x = {x}"
            );
        }
        // Continuity across the branch switch
        assert!((bessel_i0e(3.75 - 1e-9) - bessel_i0e(3.75 + 1e-9)).abs() < 1e-6);
    }

    #[test]
    fn test_sigma_grows_with_x_and_ti() {
        let low = MeanderCompensator::new(0.05).unwrap();
        let high = MeanderCompensator::new(0.15).unwrap();
        let mut prev = -1.0;
        for k in 0..=20 {
            let x = k as f64;
            let s = low.meander_std(x);
            assert!(s >= prev, "sigma not non-decreasing at x = {x}");
            assert!(high.meander_std(x) >= s);
            prev = s;
        }
        assert!(low.meander_std(0.0).abs() < 1e-14);
    }

    #[test]
    fn test_invalid_ti_rejected() {
        assert!(MeanderCompensator::new(-0.1).is_err());
        assert!(MeanderCompensator::new(1.0).is_err());
        assert!(MeanderCompensator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_ti_is_identity() {
        let (grid, field) = solved_field();
        let comp = MeanderCompensator::new(0.0).unwrap();
        let (u_m, v_m) = comp.apply(&field, &grid);
        assert_eq!(u_m.as_slice(), field.u.as_slice());
        assert_eq!(v_m.as_slice(), field.v.as_slice());
    }

    #[test]
    fn test_rotor_plane_station_unchanged() {
        let (grid, field) = solved_field();
        let comp = MeanderCompensator::new(0.15).unwrap();
        let (u_m, _) = comp.apply(&field, &grid);
        // sigma(0) = 0: the x = 0 row must come through untouched
        assert_eq!(u_m.row(0), field.u.row(0));
    }

    #[test]
    fn test_blur_widens_and_shallows_the_deficit() {
        let (grid, field) = solved_field();
        let comp = MeanderCompensator::new(0.15).unwrap();
        let (u_m, _) = comp.apply(&field, &grid);
        let j = grid.nx() - 1;
        // Shallower on the axis
        assert!(u_m.get(j, 0) > field.u.get(j, 0));
        // Wider in the flank: some radius outside the static wake edge now
        // carries more deficit than before
        let i_flank = grid.r.iter().position(|&r| r > 2.5).unwrap();
        assert!(u_m.get(j, i_flank) <= field.u.get(j, i_flank) + 1e-12);
    }

    #[test]
    fn test_blur_conserves_integral_deficit() {
        let (grid, field) = solved_field();
        let comp = MeanderCompensator::new(0.1).unwrap();
        let (u_m, _) = comp.apply(&field, &grid);
        // Source normalization makes the transport conservative in the
        // trapezoid sense, so the match is down at roundoff even at the
        // last station where sigma spans a quarter of the domain.
        for j in [10, 50, grid.nx() - 1] {
            let before = integral_deficit(&grid.r, field.u.row(j));
            let after = integral_deficit(&grid.r, u_m.row(j));
            assert!(
                (after - before).abs() < 1e-9 * before.max(1e-12),
                "station {j}: {before} -> {after}"
            );
        }
    }

    #[test]
    fn test_free_stream_preserved_exactly() {
        // A field with no deficit anywhere must come through the blur as
        // exact free stream at every radius and station.
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let field = StaticField {
            u: FlowField::filled(grid.nx(), grid.nr(), 1.0),
            v: FlowField::zeros(&grid),
            widths: vec![0.0; grid.nx()],
        };
        let comp = MeanderCompensator::new(0.2).unwrap();
        let (u_m, v_m) = comp.apply(&field, &grid);
        for (&u, &v) in u_m.as_slice().iter().zip(v_m.as_slice()) {
            assert!((u - 1.0).abs() < 1e-14);
            assert!(v.abs() < 1e-14);
        }
    }

    #[test]
    fn test_blur_never_overshoots_free_stream() {
        // The kernel weights are nonnegative, so blurring a nonnegative
        // deficit can never push U above 1 anywhere, boundary included.
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let row: Vec<f64> = grid
            .r
            .iter()
            .map(|&r| if r <= 1.0 { 0.7 } else { 1.0 })
            .collect();
        let mut u = FlowField::filled(grid.nx(), grid.nr(), 1.0);
        for j in 0..grid.nx() {
            u.row_mut(j).copy_from_slice(&row);
        }
        let field = StaticField {
            u,
            v: FlowField::zeros(&grid),
            widths: vec![1.0; grid.nx()],
        };
        let comp = MeanderCompensator::new(0.2).unwrap();
        let (u_m, _) = comp.apply(&field, &grid);
        for (k, &u) in u_m.as_slice().iter().enumerate() {
            assert!(u <= 1.0 + 1e-12, "sample {k}: {u}");
        }
    }
}
