//! Rotor-plane boundary-condition methods.
//!
//! Turns an axial-induction profile into the initial axial-velocity row the
//! marching solver starts from. The methods form a small closed set of named
//! variants selected per solve; an unrecognized name is a configuration
//! error, never a silent default.

use std::str::FromStr;

use crate::error::WakeError;
use crate::grid::Grid;
use crate::profile::RadialProfile;

/// Madsen expansion singularity: `sqrt((1-a)/(1-2a))` blows up toward a=0.5.
const A_EXPANSION_MAX: f64 = 0.45;

/// Rotor-plane boundary-condition method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMethod {
    /// Identity condition at the rotor plane: `U = 1 - a(r)`.
    #[default]
    Rotor,
    /// Pressure-recovered far condition: deficit `2a` applied at radially
    /// expanded positions `r sqrt((1-a)/(1-2a))`.
    Madsen,
    /// Deficit `2a` with the whole profile expanded uniformly by the
    /// disk-averaged induction, so the deficit shape is preserved.
    Keck,
    /// Deficit `2a` at unexpanded radii.
    Iec,
}

impl BoundaryMethod {
    /// Selector name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rotor => "rotor",
            Self::Madsen => "madsen",
            Self::Keck => "keck",
            Self::Iec => "iec",
        }
    }

    /// Build the initial U/U∞ row on the solver's radial grid.
    ///
    /// Beyond the sampled induction radii the flow is ambient (a = 0,
    /// U = 1).
    ///
    /// # Errors
    /// - `InvalidParameter` for inductions outside [0, 0.5); the madsen
    ///   expansion further rejects samples >= 0.45 and the keck expansion a
    ///   disk-averaged induction >= 0.45
    pub fn initial_row(
        &self,
        induction: &RadialProfile,
        grid: &Grid,
    ) -> Result<Vec<f64>, WakeError> {
        for &a in induction.values() {
            if !(0.0..0.5).contains(&a) {
                return Err(WakeError::InvalidParameter {
                    name: "induction",
                    value: a,
                    expected: "axial induction in [0, 0.5)",
                });
            }
        }
        match self {
            Self::Rotor => Ok(grid
                .r
                .iter()
                .map(|&r| 1.0 - induction.interpolate(r, 0.0))
                .collect()),
            Self::Iec => Ok(grid
                .r
                .iter()
                .map(|&r| 1.0 - 2.0 * induction.interpolate(r, 0.0))
                .collect()),
            Self::Madsen => {
                let expanded = Self::expand(induction)?;
                Ok(grid
                    .r
                    .iter()
                    .map(|&r| expanded.interpolate(r, 1.0))
                    .collect())
            }
            Self::Keck => {
                let expanded = Self::expand_uniform(induction)?;
                Ok(grid
                    .r
                    .iter()
                    .map(|&r| expanded.interpolate(r, 1.0))
                    .collect())
            }
        }
    }

    /// Momentum-conserving radial expansion of the deficit profile.
    ///
    /// Loaded samples expand more than ambient ones, so ambient samples can
    /// end up inside the expanded wake edge; those are overlapped by the
    /// deficit and dropped to keep the radii strictly increasing.
    fn expand(induction: &RadialProfile) -> Result<RadialProfile, WakeError> {
        let mut r_exp: Vec<f64> = Vec::with_capacity(induction.len());
        let mut u = Vec::with_capacity(induction.len());
        for (&r, &a) in induction.r().iter().zip(induction.values()) {
            if a >= A_EXPANSION_MAX {
                return Err(WakeError::InvalidParameter {
                    name: "induction",
                    value: a,
                    expected: "< 0.45 for the madsen expansion",
                });
            }
            let re = r * ((1.0 - a) / (1.0 - 2.0 * a)).sqrt();
            if let Some(&last) = r_exp.last() {
                if re <= last {
                    continue;
                }
            }
            r_exp.push(re);
            u.push(1.0 - 2.0 * a);
        }
        RadialProfile::new(r_exp, u)
    }

    /// Uniform radial expansion by the disk-averaged induction.
    ///
    /// Every sample scales by the same `sqrt((1-ā)/(1-2ā))`, so the radii
    /// stay strictly increasing and the deficit shape is preserved.
    fn expand_uniform(induction: &RadialProfile) -> Result<RadialProfile, WakeError> {
        let a_mean = disk_mean_induction(induction);
        if a_mean >= A_EXPANSION_MAX {
            return Err(WakeError::InvalidParameter {
                name: "induction",
                value: a_mean,
                expected: "disk-averaged induction < 0.45 for the keck expansion",
            });
        }
        let factor = ((1.0 - a_mean) / (1.0 - 2.0 * a_mean)).sqrt();
        let r_exp = induction.r().iter().map(|&r| r * factor).collect();
        let u = induction.values().iter().map(|&a| 1.0 - 2.0 * a).collect();
        RadialProfile::new(r_exp, u)
    }
}

/// Area-weighted mean induction over the rotor disk, `2 ∫ r a dr` on r ≤ 1.
fn disk_mean_induction(induction: &RadialProfile) -> f64 {
    let r = induction.r();
    let a = induction.values();
    let mut acc = 0.0;
    for i in 1..r.len() {
        if r[i] > 1.0 {
            break;
        }
        acc += 0.5 * (r[i] - r[i - 1]) * (r[i - 1] * a[i - 1] + r[i] * a[i]);
    }
    2.0 * acc
}

impl FromStr for BoundaryMethod {
    type Err = WakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rotor" => Ok(Self::Rotor),
            "madsen" => Ok(Self::Madsen),
            "keck" => Ok(Self::Keck),
            "iec" => Ok(Self::Iec),
            other => Err(WakeError::UnknownBoundaryMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;

    fn top_hat(a: f64) -> RadialProfile {
        let r: Vec<f64> = (0..61).map(|i| i as f64 * 0.05).collect();
        RadialProfile::from_fn(r, |ri| if ri <= 1.0 { a } else { 0.0 }).unwrap()
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("rotor".parse::<BoundaryMethod>().unwrap(), BoundaryMethod::Rotor);
        assert_eq!("MADSEN".parse::<BoundaryMethod>().unwrap(), BoundaryMethod::Madsen);
        assert_eq!("keck".parse::<BoundaryMethod>().unwrap(), BoundaryMethod::Keck);
        assert_eq!("iec".parse::<BoundaryMethod>().unwrap(), BoundaryMethod::Iec);
        assert!(matches!(
            "smagorinsky".parse::<BoundaryMethod>(),
            Err(WakeError::UnknownBoundaryMethod(_))
        ));
    }

    #[test]
    fn test_rotor_is_identity() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let row = BoundaryMethod::Rotor.initial_row(&top_hat(0.2), &grid).unwrap();
        for (i, &r) in grid.r.iter().enumerate() {
            let expected = if r <= 1.0 { 0.8 } else { 1.0 };
            assert!(
                (row[i] - expected).abs() < 1e-12,
                "r = {r}: U = {}",
                row[i]
            );
        }
    }

    #[test]
    fn test_iec_doubles_the_deficit() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let row = BoundaryMethod::Iec.initial_row(&top_hat(0.2), &grid).unwrap();
        assert!((row[0] - 0.6).abs() < 1e-12);
        assert!((row[grid.nr() - 1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_madsen_expands_the_wake() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let row = BoundaryMethod::Madsen.initial_row(&top_hat(0.2), &grid).unwrap();
        // Deficit doubled on the axis
        assert!((row[0] - 0.6).abs() < 1e-12);
        // Expansion factor sqrt(0.8/0.6) ≈ 1.155: the deficit now reaches
        // past r = 1
        let i_r11 = grid.r.iter().position(|&r| r > 1.1).unwrap();
        assert!(row[i_r11] < 0.95);
    }

    #[test]
    fn test_keck_expands_uniformly() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let row = BoundaryMethod::Keck.initial_row(&top_hat(0.2), &grid).unwrap();
        // Deficit doubled on the axis
        assert!((row[0] - 0.6).abs() < 1e-12);
        // Disk mean of a 0.2 top hat is 0.2, factor sqrt(0.8/0.6) ≈ 1.155
        let i_r11 = grid.r.iter().position(|&r| r > 1.1).unwrap();
        assert!(row[i_r11] < 0.95);
        let i_r12 = grid.r.iter().position(|&r| r > 1.2).unwrap();
        assert!((row[i_r12] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_keck_differs_from_madsen_for_nonuniform_loading() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let r: Vec<f64> = (0..61).map(|i| i as f64 * 0.05).collect();
        let parabolic =
            RadialProfile::from_fn(r, |ri| (0.3 * (1.0 - ri * ri)).max(0.0)).unwrap();
        let keck = BoundaryMethod::Keck.initial_row(&parabolic, &grid).unwrap();
        let madsen = BoundaryMethod::Madsen.initial_row(&parabolic, &grid).unwrap();
        // Per-sample expansion stretches the heavily loaded core more than
        // the uniform disk-mean factor does
        let max_diff = keck
            .iter()
            .zip(&madsen)
            .map(|(k, m)| (k - m).abs())
            .fold(0.0, f64::max);
        assert!(max_diff > 0.01, "rows agree to {max_diff}");
    }

    #[test]
    fn test_keck_rejects_heavy_mean_loading() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let err = BoundaryMethod::Keck
            .initial_row(&top_hat(0.46), &grid)
            .unwrap_err();
        assert!(matches!(err, WakeError::InvalidParameter { .. }));
    }

    #[test]
    fn test_madsen_rejects_heavy_loading() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let err = BoundaryMethod::Madsen
            .initial_row(&top_hat(0.46), &grid)
            .unwrap_err();
        assert!(matches!(err, WakeError::InvalidParameter { .. }));
    }

    #[test]
    fn test_negative_induction_rejected() {
        let grid = Grid::new(&GridConfig::default()).unwrap();
        let r: Vec<f64> = (0..11).map(|i| i as f64 * 0.1).collect();
        let p = RadialProfile::from_fn(r, |_| -0.1).unwrap();
        assert!(BoundaryMethod::Rotor.initial_row(&p, &grid).is_err());
    }
}
