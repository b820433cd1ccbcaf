//! Parabolic marching solver for the axisymmetric thin-shear-layer wake.
//!
//! Integrates the boundary-layer approximation of the axisymmetric momentum
//! equation downstream from the rotor plane:
//!
//! ```text
//! U dU/dx + V dU/dr = nu_t (1/r) d/dr (r dU/dr)
//! ```
//!
//! closed by an eddy-viscosity formulation and coupled to the continuity
//! equation for V. Each output station is advanced by a semi-implicit
//! scheme: diffusion implicit, the nonlinear advection coefficients frozen
//! at the previous profile, giving one tridiagonal system per step solved by
//! the Thomas algorithm. The downstream step is internally subdivided so
//! that the diffusion number `nu dx / (u dr^2)` stays below a configured
//! bound; this bound, not the output resolution, is what keeps the frozen
//! coefficients honest and the march stable.
//!
//! Boundary conditions: axisymmetric regularity at r = 0 (the curvature
//! term's symmetric limit, V = 0) and free-stream recovery U = 1 at the
//! outer radial boundary.

use crate::error::{InstabilityKind, WakeError};
use crate::grid::{FlowField, Grid};
use crate::viscosity::ViscosityClosure;

/// Numerical controls for the marching scheme.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Upper bound on the diffusion number `nu dx / (u dr^2)` per substep
    pub max_diffusion_number: f64,
    /// Hard cap on substeps per output station
    pub max_substeps: usize,
    /// Sane lower bound on U/U∞; values below abort the solve
    pub u_floor: f64,
    /// Sane upper bound on U/U∞
    pub u_ceil: f64,
    /// Wake-width threshold, relative to the station's peak deficit
    pub width_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_diffusion_number: 0.5,
            max_substeps: 10_000,
            // Small slack for roundoff on either side of [0, 1]
            u_floor: -1e-3,
            u_ceil: 1.0 + 1e-3,
            width_threshold: 0.05,
        }
    }
}

impl SolverConfig {
    /// Set the diffusion-number bound.
    pub fn with_max_diffusion_number(mut self, dn: f64) -> Self {
        self.max_diffusion_number = dn;
        self
    }

    /// Set the sane U/U∞ bounds.
    pub fn with_bounds(mut self, floor: f64, ceil: f64) -> Self {
        self.u_floor = floor;
        self.u_ceil = ceil;
        self
    }

    /// Set the wake-width threshold (fraction of peak deficit).
    pub fn with_width_threshold(mut self, threshold: f64) -> Self {
        self.width_threshold = threshold;
        self
    }
}

/// Static (quasi-steady) wake fields produced by one march.
#[derive(Clone, Debug)]
pub struct StaticField {
    /// Axial velocity U/U∞, `[station, radial]`
    pub u: FlowField,
    /// Radial velocity V/U∞, `[station, radial]`
    pub v: FlowField,
    /// Wake radial extent per station
    pub widths: Vec<f64>,
}

/// Downstream marching solver.
///
/// Owns the discretized grid and the closure selection; both are fixed for
/// the lifetime of one solve.
#[derive(Clone, Debug)]
pub struct WakeSolver {
    grid: Grid,
    closure: ViscosityClosure,
    config: SolverConfig,
}

impl WakeSolver {
    /// Create a solver on the given grid.
    pub fn new(grid: Grid, closure: ViscosityClosure, config: SolverConfig) -> Self {
        Self {
            grid,
            closure,
            config,
        }
    }

    /// The solver's grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// March the wake downstream from the rotor-plane velocity row.
    ///
    /// `initial_row` is U/U∞ on the solver's radial grid at x = 0 (as built
    /// by a boundary method); `ti` is the ambient turbulence intensity.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the initial row does not match the radial grid
    /// - `InvalidParameter` for turbulence intensity outside [0, 1)
    /// - `NumericalInstability` with the failing station if the march leaves
    ///   the sane bounds, the closure returns a non-physical viscosity, or
    ///   the tridiagonal sweep breaks down
    pub fn solve(&self, initial_row: &[f64], ti: f64) -> Result<StaticField, WakeError> {
        let nr = self.grid.nr();
        let nx = self.grid.nx();
        if initial_row.len() != nr {
            return Err(WakeError::ShapeMismatch {
                expected: nr,
                actual: initial_row.len(),
            });
        }
        if !(0.0..1.0).contains(&ti) || !ti.is_finite() {
            return Err(WakeError::InvalidParameter {
                name: "ti",
                value: ti,
                expected: "turbulence intensity in [0, 1)",
            });
        }

        let mut u = FlowField::filled(nx, nr, 1.0);
        let mut v = FlowField::zeros(&self.grid);
        let mut widths = vec![0.0; nx];

        u.row_mut(0).copy_from_slice(initial_row);
        // The initial condition is subject to the same sanity bounds as the
        // marched profiles (an out-of-range row means the caller supplied an
        // invalid boundary condition).
        self.check_row(0, u.row(0))?;
        widths[0] = wake_width(&self.grid.r, u.row(0), self.config.width_threshold);

        let mut u_cur = initial_row.to_vec();
        let mut v_cur = vec![0.0; nr];
        let mut nu = vec![0.0; nr];
        let mut u_next = vec![0.0; nr];

        for j in 1..nx {
            let n_sub = self.advance_station(j, ti, &mut u_cur, &mut v_cur, &mut nu, &mut u_next)?;
            debug_assert!(n_sub >= 1);

            self.check_row(j, &u_cur)?;
            u.row_mut(j).copy_from_slice(&u_cur);
            v.row_mut(j).copy_from_slice(&v_cur);
            widths[j] = wake_width(&self.grid.r, &u_cur, self.config.width_threshold);
        }

        Ok(StaticField { u, v, widths })
    }

    /// Advance from station j-1 to station j with diffusion-number-bounded
    /// substepping. Returns the number of substeps taken.
    fn advance_station(
        &self,
        j: usize,
        ti: f64,
        u_cur: &mut Vec<f64>,
        v_cur: &mut Vec<f64>,
        nu: &mut [f64],
        u_next: &mut Vec<f64>,
    ) -> Result<usize, WakeError> {
        let dr = self.grid.dr;
        let dx = self.grid.dx;
        let x_prev = self.grid.x[j - 1];

        // Size the substeps from the state at the previous station. The
        // viscosity grows slowly between stations, so one sizing per output
        // step is sufficient as long as the bound carries a safety margin.
        self.closure
            .eddy_viscosity(x_prev, &self.grid.r, u_cur, ti, nu);
        self.check_viscosity(j, nu)?;
        let nu_max = nu.iter().copied().fold(0.0_f64, f64::max);
        let u_min = u_cur.iter().copied().fold(f64::INFINITY, f64::min).max(1e-3);
        let n_sub = if nu_max > 0.0 {
            let dx_stable = self.config.max_diffusion_number * dr * dr * u_min / nu_max;
            ((dx / dx_stable).ceil() as usize)
                .clamp(1, self.config.max_substeps)
        } else {
            1
        };
        let h = dx / n_sub as f64;

        for k in 0..n_sub {
            let x_sub = x_prev + k as f64 * h;
            if k > 0 {
                self.closure
                    .eddy_viscosity(x_sub, &self.grid.r, u_cur, ti, nu);
                self.check_viscosity(j, nu)?;
            }
            self.step(j, h, u_cur, v_cur, nu, u_next)?;
            // V from continuity: (r V)' = -r dU/dx, integrated from the axis
            // by trapezoid; V(0) = 0 by symmetry.
            let mut rv = 0.0;
            v_cur[0] = 0.0;
            for i in 1..u_cur.len() {
                let g0 = self.grid.r[i - 1] * (u_next[i - 1] - u_cur[i - 1]) / h;
                let g1 = self.grid.r[i] * (u_next[i] - u_cur[i]) / h;
                rv -= 0.5 * dr * (g0 + g1);
                v_cur[i] = rv / self.grid.r[i];
            }
            std::mem::swap(u_cur, u_next);
        }
        Ok(n_sub)
    }

    /// One semi-implicit substep of size `h`: assemble and solve the
    /// tridiagonal system for the next U row.
    fn step(
        &self,
        station: usize,
        h: f64,
        u_cur: &[f64],
        v_cur: &[f64],
        nu: &[f64],
        u_next: &mut [f64],
    ) -> Result<(), WakeError> {
        let nr = u_cur.len();
        let dr = self.grid.dr;

        let mut lower = vec![0.0; nr];
        let mut diag = vec![0.0; nr];
        let mut upper = vec![0.0; nr];
        let mut rhs = vec![0.0; nr];

        // Axis (r = 0): dU/dr = 0, V = 0; the curvature term's symmetric
        // limit turns (1/r) d/dr(r dU/dr) into 2 d2U/dr2.
        diag[0] = u_cur[0] / h + 4.0 * nu[0] / (dr * dr);
        upper[0] = -4.0 * nu[0] / (dr * dr);
        rhs[0] = u_cur[0] * u_cur[0] / h;

        for i in 1..nr - 1 {
            let adv = v_cur[i] / (2.0 * dr);
            let dif = nu[i] / (dr * dr);
            let cur = nu[i] / (2.0 * self.grid.r[i] * dr);
            lower[i] = -adv - dif + cur;
            diag[i] = u_cur[i] / h + 2.0 * dif;
            upper[i] = adv - dif - cur;
            rhs[i] = u_cur[i] * u_cur[i] / h;
        }

        // Outer boundary: free-stream recovery, U = 1.
        diag[nr - 1] = 1.0;
        rhs[nr - 1] = 1.0;

        thomas_solve(&mut lower, &mut diag, &mut upper, &mut rhs, u_next).map_err(|row| {
            WakeError::NumericalInstability {
                station,
                x: self.grid.x[station],
                reason: InstabilityKind::SingularSystem { row },
            }
        })
    }

    fn check_viscosity(&self, station: usize, nu: &[f64]) -> Result<(), WakeError> {
        for &v in nu {
            if !v.is_finite() || v < 0.0 {
                return Err(WakeError::NumericalInstability {
                    station,
                    x: self.grid.x[station],
                    reason: InstabilityKind::NonPhysicalViscosity { value: v },
                });
            }
        }
        Ok(())
    }

    fn check_row(&self, station: usize, u: &[f64]) -> Result<(), WakeError> {
        for (i, &value) in u.iter().enumerate() {
            if !value.is_finite() {
                return Err(WakeError::NumericalInstability {
                    station,
                    x: self.grid.x[station],
                    reason: InstabilityKind::NonFiniteValue { radial: i },
                });
            }
            if value < self.config.u_floor || value > self.config.u_ceil {
                return Err(WakeError::NumericalInstability {
                    station,
                    x: self.grid.x[station],
                    reason: InstabilityKind::VelocityOutOfBounds { radial: i, value },
                });
            }
        }
        Ok(())
    }
}

/// Wake width of a velocity row: the outermost radius whose deficit exceeds
/// `threshold` times the row's peak deficit. Zero for a deficit-free row.
pub fn wake_width(r: &[f64], u: &[f64], threshold: f64) -> f64 {
    let peak = u.iter().map(|&ui| 1.0 - ui).fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return 0.0;
    }
    let cut = threshold * peak;
    let mut width = 0.0;
    for i in 0..u.len() {
        if 1.0 - u[i] >= cut {
            width = r[i];
        }
    }
    width
}

/// Thomas algorithm for a tridiagonal system, in place.
///
/// `lower[0]` and `upper[n-1]` are unused. On a vanishing pivot returns the
/// failing row. The sweep destroys the coefficient arrays.
fn thomas_solve(
    lower: &mut [f64],
    diag: &mut [f64],
    upper: &mut [f64],
    rhs: &mut [f64],
    out: &mut [f64],
) -> Result<(), usize> {
    let n = diag.len();
    const PIVOT_MIN: f64 = 1e-14;

    if diag[0].abs() < PIVOT_MIN {
        return Err(0);
    }
    for i in 1..n {
        let w = lower[i] / diag[i - 1];
        diag[i] -= w * upper[i - 1];
        rhs[i] -= w * rhs[i - 1];
        if diag[i].abs() < PIVOT_MIN {
            return Err(i);
        }
    }
    out[n - 1] = rhs[n - 1] / diag[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = (rhs[i] - upper[i] * out[i + 1]) / diag[i];
    }
    Ok(())
}
