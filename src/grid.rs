//! Solution grids and dense field containers.
//!
//! The grid is a rectangular sampling lattice: a uniform radial axis
//! `0..=r_max` and a uniform downstream axis `0..=x_max`, both in rotor
//! radii. Dimensions are known before the marching loop starts, so fields
//! are stored as pre-allocated flat arrays with layout `[station, radial]`
//! (station-major), accessed through slice views per station.

use crate::error::WakeError;

/// Grid extents and resolution, in rotor radii.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    /// Outer radial boundary (several radii beyond the rotor tip so wake
    /// expansion never reaches the Dirichlet boundary)
    pub r_max: f64,
    /// Number of radial samples (including r = 0 and r = r_max)
    pub nr: usize,
    /// Downstream extent (20 R = 10 rotor diameters)
    pub x_max: f64,
    /// Number of downstream stations (including x = 0)
    pub nx: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            r_max: 6.0,
            nr: 121,
            x_max: 20.0,
            nx: 101,
        }
    }
}

impl GridConfig {
    /// Set the radial extent and sample count.
    pub fn with_radial(mut self, r_max: f64, nr: usize) -> Self {
        self.r_max = r_max;
        self.nr = nr;
        self
    }

    /// Set the downstream extent and station count.
    pub fn with_downstream(mut self, x_max: f64, nx: usize) -> Self {
        self.x_max = x_max;
        self.nx = nx;
        self
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), WakeError> {
        if !(self.r_max > 1.0 && self.r_max.is_finite()) {
            return Err(WakeError::InvalidParameter {
                name: "grid.r_max",
                value: self.r_max,
                expected: "> 1 rotor radius",
            });
        }
        if self.nr < 3 {
            return Err(WakeError::InvalidParameter {
                name: "grid.nr",
                value: self.nr as f64,
                expected: ">= 3 radial samples",
            });
        }
        if !(self.x_max > 0.0 && self.x_max.is_finite()) {
            return Err(WakeError::InvalidParameter {
                name: "grid.x_max",
                value: self.x_max,
                expected: "positive downstream extent",
            });
        }
        if self.nx < 2 {
            return Err(WakeError::InvalidParameter {
                name: "grid.nx",
                value: self.nx as f64,
                expected: ">= 2 downstream stations",
            });
        }
        Ok(())
    }
}

/// Immutable rectangular sampling lattice, created once per solve.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Radial positions, uniform, `r[0] = 0`
    pub r: Vec<f64>,
    /// Downstream positions, uniform, `x[0] = 0`
    pub x: Vec<f64>,
    /// Radial spacing
    pub dr: f64,
    /// Downstream station spacing
    pub dx: f64,
}

impl Grid {
    /// Build a uniform grid from the configuration.
    pub fn new(config: &GridConfig) -> Result<Self, WakeError> {
        config.validate()?;
        let dr = config.r_max / (config.nr - 1) as f64;
        let dx = config.x_max / (config.nx - 1) as f64;
        let r = (0..config.nr).map(|i| i as f64 * dr).collect();
        let x = (0..config.nx).map(|j| j as f64 * dx).collect();
        Ok(Self { r, x, dr, dx })
    }

    /// Number of radial samples.
    pub fn nr(&self) -> usize {
        self.r.len()
    }

    /// Number of downstream stations.
    pub fn nx(&self) -> usize {
        self.x.len()
    }
}

/// Dense 2-D field indexed by (downstream station, radial sample).
///
/// Stored as `data[j * nr + i]` for station j, radial sample i.
#[derive(Clone, Debug)]
pub struct FlowField {
    data: Vec<f64>,
    nx: usize,
    nr: usize,
}

impl FlowField {
    /// Create a field of the given dimensions, filled with `fill`.
    pub fn filled(nx: usize, nr: usize, fill: f64) -> Self {
        Self {
            data: vec![fill; nx * nr],
            nx,
            nr,
        }
    }

    /// Create a zero field matching the grid.
    pub fn zeros(grid: &Grid) -> Self {
        Self::filled(grid.nx(), grid.nr(), 0.0)
    }

    /// Number of downstream stations.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of radial samples.
    pub fn nr(&self) -> usize {
        self.nr
    }

    /// Radial profile at station j.
    pub fn row(&self, j: usize) -> &[f64] {
        let start = j * self.nr;
        &self.data[start..start + self.nr]
    }

    /// Mutable radial profile at station j.
    pub fn row_mut(&mut self, j: usize) -> &mut [f64] {
        let start = j * self.nr;
        &mut self.data[start..start + self.nr]
    }

    /// Value at (station j, radial sample i).
    pub fn get(&self, j: usize, i: usize) -> f64 {
        self.data[j * self.nr + i]
    }

    /// Flat view of the whole field, station-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Complete output of one wake solve.
///
/// The static fields are the quasi-steady wake in the meandering frame of
/// reference; the meandered fields are what a fixed observer measures after
/// compensating for lateral wake wandering.
#[derive(Clone, Debug)]
pub struct WakeSolution {
    /// Sampling lattice shared by all fields
    pub grid: Grid,
    /// Static axial velocity U/U∞
    pub u: FlowField,
    /// Static radial velocity V/U∞
    pub v: FlowField,
    /// Meander-compensated axial velocity
    pub u_meandered: FlowField,
    /// Meander-compensated radial velocity
    pub v_meandered: FlowField,
    /// Wake radial extent per station, in rotor radii
    pub widths: Vec<f64>,
    /// Lateral meander standard deviation per station, in rotor radii
    pub meander_std: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_grid() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        assert_eq!(grid.nr(), 121);
        assert_eq!(grid.nx(), 101);
        assert!((grid.dr - 0.05).abs() < 1e-14);
        assert!((grid.dx - 0.2).abs() < 1e-14);
        assert!((grid.r[0]).abs() < 1e-14);
        assert!((grid.r[120] - 6.0).abs() < 1e-12);
        assert!((grid.x[100] - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Grid::new(&GridConfig::default().with_radial(0.5, 121)).is_err());
        assert!(Grid::new(&GridConfig::default().with_radial(6.0, 2)).is_err());
        assert!(Grid::new(&GridConfig::default().with_downstream(-1.0, 101)).is_err());
        assert!(Grid::new(&GridConfig::default().with_downstream(20.0, 1)).is_err());
    }

    #[test]
    fn test_field_layout_is_station_major() {
        let mut f = FlowField::filled(3, 4, 0.0);
        f.row_mut(1)[2] = 7.0;
        assert!((f.get(1, 2) - 7.0).abs() < 1e-14);
        assert!((f.as_slice()[1 * 4 + 2] - 7.0).abs() < 1e-14);
        assert!((f.row(1)[2] - 7.0).abs() < 1e-14);
    }

    #[test]
    fn test_rows_are_independent() {
        let mut f = FlowField::filled(2, 3, 1.0);
        for v in f.row_mut(0) {
            *v = 0.5;
        }
        assert!(f.row(1).iter().all(|&v| (v - 1.0).abs() < 1e-14));
    }
}
