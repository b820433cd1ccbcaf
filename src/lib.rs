//! # wake-rs
//!
//! An axisymmetric wind-turbine wake-deficit engine. Given a rotor-plane
//! axial-induction profile, it produces the downstream (axial, radial)
//! velocity field, the wake's radial growth, and a meander-compensated
//! field matching what a fixed observer measures behind a wandering wake.
//!
//! The crate provides the building blocks of the model:
//! - Actuator-disk induction profiles (thrust coefficient, tip-speed ratio)
//! - Rotor-plane boundary-condition methods
//! - Interchangeable eddy-viscosity closures (Ainslie-type)
//! - A parabolic thin-shear-layer marching solver (tridiagonal per step)
//! - Meander compensation by axisymmetric Gaussian smearing
//! - Integral wake diagnostics and a boundary-condition file reader
//!
//! # Example
//!
//! ```
//! use wake_rs::{RadialProfile, StaticWake};
//!
//! // Top-hat induction of 0.2 over the rotor disk
//! let r: Vec<f64> = (0..121).map(|i| i as f64 * 0.05).collect();
//! let induction =
//!     RadialProfile::from_fn(r, |ri| if ri <= 1.0 { 0.2 } else { 0.0 }).unwrap();
//!
//! let solution = StaticWake::new()
//!     .with_turbulence_intensity(0.1)
//!     .solve_profile(&induction)
//!     .unwrap();
//!
//! // Rotor-plane deficit reproduces the boundary condition
//! assert!((solution.u.get(0, 0) - 0.8).abs() < 1e-12);
//! ```
//!
//! All quantities are nondimensional: lengths by rotor radius, velocities
//! by freestream speed. Independent solves share no mutable state and may
//! run concurrently; the `parallel` feature adds a rayon-backed batch
//! helper.

pub mod analysis;
pub mod boundary;
pub mod error;
pub mod grid;
pub mod induction;
pub mod io;
pub mod meander;
pub mod profile;
pub mod solver;
pub mod viscosity;
pub mod wake;

// Re-export the main types for convenience
pub use boundary::BoundaryMethod;
pub use error::{InstabilityKind, WakeError};
pub use grid::{FlowField, Grid, GridConfig, WakeSolution};
pub use induction::GenericActuatorDisk;
pub use io::{read_induction_table, InductionFileError};
pub use meander::MeanderCompensator;
pub use profile::RadialProfile;
pub use solver::{wake_width, SolverConfig, StaticField, WakeSolver};
pub use viscosity::ViscosityClosure;
pub use wake::StaticWake;
