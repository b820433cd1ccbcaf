//! Error types for the wake engine.
//!
//! Errors fall into three families:
//! - configuration errors (bad parameter values, unrecognized selector names),
//!   raised before any marching starts;
//! - shape errors (mismatched paired arrays), raised before any computation;
//! - numerical instability, raised mid-march with the failing downstream
//!   station so the caller can diagnose (and, if desired, retry with a finer
//!   grid — the solver itself never retries).

use thiserror::Error;

/// Error type for wake solves.
#[derive(Debug, Error)]
pub enum WakeError {
    /// A scalar input is outside its supported domain.
    #[error("invalid parameter {name}: got {value}, expected {expected}")]
    InvalidParameter {
        /// Parameter name as it appears in the public API
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable description of the supported domain
        expected: &'static str,
    },

    /// Paired arrays have different lengths.
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch {
        /// Length implied by the partner array
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Unrecognized eddy-viscosity closure name.
    #[error("unknown viscosity closure '{0}' (expected one of: madsen, larsen, keck, iec)")]
    UnknownClosure(String),

    /// Unrecognized rotor-plane boundary-method name.
    #[error("unknown boundary method '{0}' (expected one of: rotor, madsen, keck, iec)")]
    UnknownBoundaryMethod(String),

    /// The marching scheme left the physically sane range.
    ///
    /// Reported with the downstream station index and position at which the
    /// check failed; the solve aborts at that station.
    #[error("numerical instability at station {station} (x = {x:.3} R): {reason}")]
    NumericalInstability {
        /// Index into the downstream grid
        station: usize,
        /// Downstream position in rotor radii
        x: f64,
        /// What went out of bounds
        reason: InstabilityKind,
    },
}

/// What the solver detected when it aborted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstabilityKind {
    /// Axial velocity outside the sane bounds configured on the solver.
    VelocityOutOfBounds {
        /// Radial sample index
        radial: usize,
        /// Offending U/U∞ value
        value: f64,
    },
    /// Non-finite value (NaN or Inf) in the updated profile.
    NonFiniteValue {
        /// Radial sample index
        radial: usize,
    },
    /// The closure produced a negative or non-finite eddy viscosity.
    NonPhysicalViscosity {
        /// Offending ν value
        value: f64,
    },
    /// The tridiagonal sweep hit a vanishing pivot.
    SingularSystem {
        /// Row at which elimination broke down
        row: usize,
    },
}

impl std::fmt::Display for InstabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VelocityOutOfBounds { radial, value } => {
                write!(f, "U = {value:.4} out of bounds at radial sample {radial}")
            }
            Self::NonFiniteValue { radial } => {
                write!(f, "non-finite value at radial sample {radial}")
            }
            Self::NonPhysicalViscosity { value } => {
                write!(f, "non-physical eddy viscosity {value:.4e}")
            }
            Self::SingularSystem { row } => {
                write!(f, "singular tridiagonal system at row {row}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_station() {
        let err = WakeError::NumericalInstability {
            station: 42,
            x: 8.4,
            reason: InstabilityKind::NonFiniteValue { radial: 7 },
        };
        let msg = err.to_string();
        assert!(msg.contains("station 42"));
        assert!(msg.contains("8.400"));
        assert!(msg.contains("radial sample 7"));
    }

    #[test]
    fn test_unknown_closure_lists_options() {
        let err = WakeError::UnknownClosure("smagorinsky".to_string());
        assert!(err.to_string().contains("madsen"));
        assert!(err.to_string().contains("larsen"));
        assert!(err.to_string().contains("keck"));
    }
}
