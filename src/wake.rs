//! Static-wake façade.
//!
//! Composes the induction model, boundary method, marching solver, and
//! meander compensator into a single `solve` entry point. This is the only
//! surface external tooling (file I/O, plotting, comparison scripts)
//! depends on; everything it returns is plain numeric arrays on
//! [`WakeSolution`]. All quantities are nondimensional (velocities by the
//! freestream speed, lengths by the rotor radius), so rescaling to a
//! particular turbine is a caller-side multiplication.
//!
//! Independent solves share no mutable state: a `StaticWake` is a bundle of
//! `Copy` configuration, so callers are free to run many solves concurrently
//! (see [`StaticWake::solve_batch_ct`] behind the `parallel` feature).

use crate::boundary::BoundaryMethod;
use crate::error::WakeError;
use crate::grid::{Grid, GridConfig, WakeSolution};
use crate::induction::GenericActuatorDisk;
use crate::meander::MeanderCompensator;
use crate::profile::RadialProfile;
use crate::solver::{SolverConfig, WakeSolver};
use crate::viscosity::ViscosityClosure;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Wake-solve entry point: induction → marching solver → meander blur.
#[derive(Debug, Clone, Copy)]
pub struct StaticWake {
    disk: GenericActuatorDisk,
    boundary: BoundaryMethod,
    closure: ViscosityClosure,
    grid_config: GridConfig,
    solver_config: SolverConfig,
    /// Ambient turbulence intensity, fixed per solve
    ti: f64,
}

impl Default for StaticWake {
    fn default() -> Self {
        Self {
            disk: GenericActuatorDisk::default(),
            boundary: BoundaryMethod::default(),
            closure: ViscosityClosure::default(),
            grid_config: GridConfig::default(),
            solver_config: SolverConfig::default(),
            ti: 0.1,
        }
    }
}

impl StaticWake {
    /// Default configuration: rotor boundary method, madsen closure,
    /// TI = 0.1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient turbulence intensity.
    pub fn with_turbulence_intensity(mut self, ti: f64) -> Self {
        self.ti = ti;
        self
    }

    /// Set the actuator-disk shape constants.
    pub fn with_actuator_disk(mut self, disk: GenericActuatorDisk) -> Self {
        self.disk = disk;
        self
    }

    /// Set the rotor-plane boundary method.
    pub fn with_boundary_method(mut self, boundary: BoundaryMethod) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the eddy-viscosity closure.
    pub fn with_closure(mut self, closure: ViscosityClosure) -> Self {
        self.closure = closure;
        self
    }

    /// Select boundary method and closure by name, failing fast on
    /// unrecognized selectors.
    pub fn with_methods(mut self, boundary: &str, closure: &str) -> Result<Self, WakeError> {
        self.boundary = boundary.parse()?;
        self.closure = closure.parse()?;
        Ok(self)
    }

    /// Set the grid extents/resolution.
    pub fn with_grid(mut self, grid_config: GridConfig) -> Self {
        self.grid_config = grid_config;
        self
    }

    /// Set the numerical controls of the marching scheme.
    pub fn with_solver(mut self, solver_config: SolverConfig) -> Self {
        self.solver_config = solver_config;
        self
    }

    /// Solve from a supplied rotor-plane induction profile (tabulated data
    /// or any externally produced boundary condition).
    pub fn solve_profile(&self, induction: &RadialProfile) -> Result<WakeSolution, WakeError> {
        let grid = Grid::new(&self.grid_config)?;
        let compensator = MeanderCompensator::new(self.ti)?;
        let initial_row = self.boundary.initial_row(induction, &grid)?;

        let solver = WakeSolver::new(grid.clone(), self.closure, self.solver_config);
        let field = solver.solve(&initial_row, self.ti)?;

        let (u_meandered, v_meandered) = compensator.apply(&field, &grid);
        let meander_std = compensator.meander_std_curve(&grid);

        Ok(WakeSolution {
            grid,
            u: field.u,
            v: field.v,
            u_meandered,
            v_meandered,
            widths: field.widths,
            meander_std,
        })
    }

    /// Solve from rotor operating parameters via the actuator-disk model.
    pub fn solve_ct(&self, tsr: f64, ct: f64) -> Result<WakeSolution, WakeError> {
        let grid = Grid::new(&self.grid_config)?;
        let induction = self.disk.profile(&grid.r, tsr, ct)?;
        self.solve_profile(&induction)
    }

    /// Solve a batch of (tsr, ct) cases across a thread pool.
    ///
    /// Each case is an independent solve with no shared mutable state, so
    /// failures are per case.
    #[cfg(feature = "parallel")]
    pub fn solve_batch_ct(&self, cases: &[(f64, f64)]) -> Vec<Result<WakeSolution, WakeError>> {
        cases
            .par_iter()
            .map(|&(tsr, ct)| self.solve_ct(tsr, ct))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_hat(a: f64) -> RadialProfile {
        let r: Vec<f64> = (0..121).map(|i| i as f64 * 0.05).collect();
        RadialProfile::from_fn(r, |ri| if ri <= 1.0 { a } else { 0.0 }).unwrap()
    }

    #[test]
    fn test_solve_profile_returns_consistent_shapes() {
        let sol = StaticWake::new().solve_profile(&top_hat(0.2)).unwrap();
        let (nx, nr) = (sol.grid.nx(), sol.grid.nr());
        assert_eq!(sol.u.nx(), nx);
        assert_eq!(sol.u.nr(), nr);
        assert_eq!(sol.v.nx(), nx);
        assert_eq!(sol.u_meandered.nr(), nr);
        assert_eq!(sol.widths.len(), nx);
        assert_eq!(sol.meander_std.len(), nx);
    }

    #[test]
    fn test_unknown_selectors_fail_fast() {
        assert!(matches!(
            StaticWake::new().with_methods("rotor", "nonsense"),
            Err(WakeError::UnknownClosure(_))
        ));
        assert!(matches!(
            StaticWake::new().with_methods("nonsense", "keck"),
            Err(WakeError::UnknownBoundaryMethod(_))
        ));
    }

    #[test]
    fn test_invalid_ti_rejected_before_marching() {
        let err = StaticWake::new()
            .with_turbulence_intensity(1.5)
            .solve_profile(&top_hat(0.2))
            .unwrap_err();
        assert!(matches!(err, WakeError::InvalidParameter { .. }));
    }

    #[test]
    fn test_solve_ct_deepens_with_thrust() {
        let wake = StaticWake::new();
        let s3 = wake.solve_ct(7.0, 0.3).unwrap();
        let s6 = wake.solve_ct(7.0, 0.6).unwrap();
        let min3 = s3.u.row(0).iter().copied().fold(f64::INFINITY, f64::min);
        let min6 = s6.u.row(0).iter().copied().fold(f64::INFINITY, f64::min);
        assert!(min6 < min3);
    }

    #[test]
    fn test_meander_std_attached_to_solution() {
        let sol = StaticWake::new()
            .with_turbulence_intensity(0.1)
            .solve_profile(&top_hat(0.2))
            .unwrap();
        assert!(sol.meander_std[0].abs() < 1e-14);
        assert!(sol.meander_std.windows(2).all(|w| w[1] >= w[0]));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_batch_matches_sequential() {
        let wake = StaticWake::new();
        let cases = [(7.0, 0.3), (7.0, 0.6)];
        let batch = wake.solve_batch_ct(&cases);
        let seq = wake.solve_ct(7.0, 0.3).unwrap();
        let b0 = batch[0].as_ref().unwrap();
        assert_eq!(b0.u.as_slice(), seq.u.as_slice());
    }
}
