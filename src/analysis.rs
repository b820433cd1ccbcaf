//! Integral wake diagnostics.
//!
//! Post-hoc quantities derived from solved fields, used by the test suite
//! and by downstream comparison tooling. Nothing here feeds back into the
//! march.

use std::f64::consts::PI;

use crate::grid::FlowField;

/// Momentum deficit of one station, `∫ 2π r U (1 - U) dr` (trapezoid).
///
/// In a parallel shear flow this is the conserved momentum-flux deficit of
/// the wake; it decays only through pressure and viscous effects the
/// thin-shear-layer model neglects, so it should drift slowly downstream.
pub fn momentum_deficit(r: &[f64], u: &[f64]) -> f64 {
    integrate(r, u, |ri, ui| 2.0 * PI * ri * ui * (1.0 - ui))
}

/// Integral velocity deficit of one station, `∫ 2π r (1 - U) dr`.
pub fn integral_deficit(r: &[f64], u: &[f64]) -> f64 {
    integrate(r, u, |ri, ui| 2.0 * PI * ri * (1.0 - ui))
}

/// Centerline axial velocity per station.
pub fn centerline_velocity(u: &FlowField) -> Vec<f64> {
    (0..u.nx()).map(|j| u.get(j, 0)).collect()
}

/// Peak deficit per station (1 minus the row minimum).
pub fn peak_deficit(u: &FlowField) -> Vec<f64> {
    (0..u.nx())
        .map(|j| {
            1.0 - u
                .row(j)
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

fn integrate<F>(r: &[f64], u: &[f64], f: F) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    debug_assert_eq!(r.len(), u.len());
    let mut acc = 0.0;
    for i in 1..r.len() {
        let h = r[i] - r[i - 1];
        acc += 0.5 * h * (f(r[i - 1], u[i - 1]) + f(r[i], u[i]));
    }
    acc
}
