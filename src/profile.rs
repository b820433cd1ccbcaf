//! Radial sample profiles.
//!
//! A [`RadialProfile`] is an ordered sequence of (radial position, value)
//! pairs, nondimensionalized by rotor radius. It is the uniform currency for
//! rotor-plane boundary conditions: the analytical actuator-disk model
//! produces one, and tabulated data loaded from a file produces one, so the
//! solver never knows which path supplied its initial condition.

use crate::error::WakeError;

/// Ordered (r, value) samples with strictly increasing radii.
#[derive(Clone, Debug)]
pub struct RadialProfile {
    r: Vec<f64>,
    values: Vec<f64>,
}

impl RadialProfile {
    /// Create a profile from paired arrays.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the arrays differ in length
    /// - `InvalidParameter` if the arrays are empty, radii are negative,
    ///   non-finite, or not strictly increasing
    pub fn new(r: Vec<f64>, values: Vec<f64>) -> Result<Self, WakeError> {
        if r.len() != values.len() {
            return Err(WakeError::ShapeMismatch {
                expected: r.len(),
                actual: values.len(),
            });
        }
        if r.is_empty() {
            return Err(WakeError::InvalidParameter {
                name: "radial_profile",
                value: 0.0,
                expected: "at least one sample",
            });
        }
        if r[0] < 0.0 || !r[0].is_finite() {
            return Err(WakeError::InvalidParameter {
                name: "radial_profile.r",
                value: r[0],
                expected: "finite, nonnegative radii",
            });
        }
        for i in 1..r.len() {
            if !r[i].is_finite() || r[i] <= r[i - 1] {
                return Err(WakeError::InvalidParameter {
                    name: "radial_profile.r",
                    value: r[i],
                    expected: "strictly increasing radii",
                });
            }
        }
        for &v in &values {
            if !v.is_finite() {
                return Err(WakeError::InvalidParameter {
                    name: "radial_profile.value",
                    value: v,
                    expected: "finite values",
                });
            }
        }
        Ok(Self { r, values })
    }

    /// Sample a function onto the given radii.
    pub fn from_fn<F>(r: Vec<f64>, f: F) -> Result<Self, WakeError>
    where
        F: Fn(f64) -> f64,
    {
        let values = r.iter().map(|&ri| f(ri)).collect();
        Self::new(r, values)
    }

    /// Radial positions.
    pub fn r(&self) -> &[f64] {
        &self.r
    }

    /// Sampled values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.r.len()
    }

    /// Whether the profile has no samples (unreachable after construction).
    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Largest sampled radius.
    pub fn r_max(&self) -> f64 {
        *self.r.last().unwrap_or(&0.0)
    }

    /// Linearly interpolate the profile at `r`.
    ///
    /// Outside the sampled range the profile is treated as `outside` —
    /// induction profiles extend as zero (ambient flow beyond the last
    /// sample), deficit profiles as their boundary value; the caller picks.
    pub fn interpolate(&self, r: f64, outside: f64) -> f64 {
        if r < self.r[0] || r > self.r_max() {
            return outside;
        }
        // partition_point: first index with r[i] > r
        let hi = self.r.partition_point(|&ri| ri <= r);
        if hi == 0 {
            return self.values[0];
        }
        if hi == self.r.len() {
            return self.values[self.r.len() - 1];
        }
        let lo = hi - 1;
        let t = (r - self.r[lo]) / (self.r[hi] - self.r[lo]);
        self.values[lo] + t * (self.values[hi] - self.values[lo])
    }
}
