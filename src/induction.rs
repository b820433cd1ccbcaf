//! Actuator-disk axial-induction model.
//!
//! Maps rotor operating parameters (thrust coefficient, tip-speed ratio) to
//! a radial induction profile a(r) at the rotor plane. The disk-averaged
//! induction is pinned to the 1-D momentum-theory target
//! `a_t = (1 - sqrt(1 - Ct)) / 2`; the three shape constants only
//! redistribute that loading radially:
//!
//! - `b`, `delta`: tip-taper exponent and sharpness, `(1 - r^b)^delta`,
//!   taking the profile continuously to zero at the tip (r = 1);
//! - `a`: root-loss steepness, `tanh(a * tsr * r)`, unloading the hub
//!   region more at low tip-speed ratio.
//!
//! The closed-form momentum relation is only trusted for Ct in [0, 0.9];
//! beyond that the disk is in the turbulent-wake state and the relation is
//! flagged rather than extrapolated.
//!
//! The solver does not depend on this model: any [`RadialProfile`] (e.g. one
//! tabulated from a BEM code and loaded from file) is an equally valid
//! boundary condition.

use crate::error::WakeError;
use crate::profile::RadialProfile;

/// Highest thrust coefficient for which the momentum relation is accepted.
pub const CT_MAX: f64 = 0.9;

/// Quadrature resolution for the shape normalization integral.
const N_QUAD: usize = 400;

/// Parametric actuator-disk induction model.
#[derive(Debug, Clone, Copy)]
pub struct GenericActuatorDisk {
    /// Tip-taper exponent
    pub b: f64,
    /// Root-loss steepness
    pub a: f64,
    /// Tip-taper sharpness
    pub delta: f64,
}

impl Default for GenericActuatorDisk {
    fn default() -> Self {
        Self {
            b: 2.0,
            a: 1.256,
            delta: 0.2,
        }
    }
}

impl GenericActuatorDisk {
    /// Create a disk with explicit shape constants.
    pub fn new(b: f64, a: f64, delta: f64) -> Self {
        Self { b, a, delta }
    }

    /// Disk-averaged induction from 1-D momentum theory, `Ct = 4a(1 - a)`.
    ///
    /// # Errors
    /// `InvalidParameter` for Ct outside [0, [`CT_MAX`]].
    pub fn target_induction(&self, ct: f64) -> Result<f64, WakeError> {
        if !(0.0..=CT_MAX).contains(&ct) || !ct.is_finite() {
            return Err(WakeError::InvalidParameter {
                name: "ct",
                value: ct,
                expected: "thrust coefficient in [0, 0.9]",
            });
        }
        Ok(0.5 * (1.0 - (1.0 - ct).sqrt()))
    }

    /// Unnormalized radial shape function, zero at and beyond the tip.
    fn shape(&self, r: f64, tsr: f64) -> f64 {
        if r >= 1.0 {
            return 0.0;
        }
        (1.0 - r.powf(self.b)).powf(self.delta) * (self.a * tsr * r).tanh()
    }

    /// Area-averaged shape over the disk, `2 ∫0^1 r s(r) dr`, by trapezoid.
    fn shape_mean(&self, tsr: f64) -> f64 {
        let h = 1.0 / N_QUAD as f64;
        let mut acc = 0.0;
        for k in 0..N_QUAD {
            let r0 = k as f64 * h;
            let r1 = r0 + h;
            acc += 0.5 * h * (r0 * self.shape(r0, tsr) + r1 * self.shape(r1, tsr));
        }
        2.0 * acc
    }

    /// Axial induction at radius `r` (rotor radii).
    ///
    /// Returns 0 for r > 1 (ambient flow outside the disk) and is continuous
    /// at r = 1.
    ///
    /// # Errors
    /// `InvalidParameter` for Ct outside [0, 0.9] or non-positive tip-speed
    /// ratio.
    pub fn induction(&self, r: f64, tsr: f64, ct: f64) -> Result<f64, WakeError> {
        let a_t = self.target_induction(ct)?;
        if !(tsr > 0.0 && tsr.is_finite()) {
            return Err(WakeError::InvalidParameter {
                name: "tsr",
                value: tsr,
                expected: "positive tip-speed ratio",
            });
        }
        if r > 1.0 {
            return Ok(0.0);
        }
        let mean = self.shape_mean(tsr);
        Ok(a_t * self.shape(r, tsr) / mean)
    }

    /// Evaluate the induction profile onto the given radii.
    pub fn profile(&self, r: &[f64], tsr: f64, ct: f64) -> Result<RadialProfile, WakeError> {
        let a_t = self.target_induction(ct)?;
        if !(tsr > 0.0 && tsr.is_finite()) {
            return Err(WakeError::InvalidParameter {
                name: "tsr",
                value: tsr,
                expected: "positive tip-speed ratio",
            });
        }
        let mean = self.shape_mean(tsr);
        let values = r
            .iter()
            .map(|&ri| a_t * self.shape(ri, tsr) / mean)
            .collect();
        RadialProfile::new(r.to_vec(), values)
    }
}
