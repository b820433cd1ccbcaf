//! Reader for rotor-plane induction tables.
//!
//! Parses the two-column boundary-condition files produced by upstream
//! actuator-disk or BEM tooling.
//!
//! # File Format
//!
//! ```text
//! # optional comment lines
//! 0.000 0.2134
//! 0.006 0.2139
//! 0.012 0.2145
//! ```
//!
//! No header; whitespace-delimited; column 1 is radial position in rotor
//! radii, column 2 the axial induction. Radii must be strictly increasing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::error::WakeError;
use crate::profile::RadialProfile;

/// Error type for induction table parsing.
#[derive(Debug, Error)]
pub enum InductionFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parse error with line number
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Empty file (no data rows)
    #[error("Induction table contains no data")]
    EmptyFile,

    /// Non-monotonic radial positions
    #[error("Non-increasing radius at line {line}")]
    NonMonotonic { line: usize },

    /// The parsed table failed profile validation
    #[error(transparent)]
    Invalid(#[from] WakeError),
}

/// Read a two-column (radius, induction) table into a [`RadialProfile`].
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
/// - `IoError` if the file cannot be opened or read
/// - `ParseError` for malformed rows (wrong column count, bad floats),
///   reported with the 1-based line number
/// - `EmptyFile` if no data rows are present
/// - `NonMonotonic` if radii do not strictly increase
pub fn read_induction_table<P: AsRef<Path>>(path: P) -> Result<RadialProfile, InductionFileError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut r = Vec::new();
    let mut a = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(InductionFileError::ParseError {
                line: line_no,
                message: format!("expected 2 columns, found {}", fields.len()),
            });
        }

        let ri: f64 = fields[0]
            .parse()
            .map_err(|e| InductionFileError::ParseError {
                line: line_no,
                message: format!("bad radius '{}': {e}", fields[0]),
            })?;
        let ai: f64 = fields[1]
            .parse()
            .map_err(|e| InductionFileError::ParseError {
                line: line_no,
                message: format!("bad induction '{}': {e}", fields[1]),
            })?;

        if let Some(&prev) = r.last() {
            if ri <= prev {
                return Err(InductionFileError::NonMonotonic { line: line_no });
            }
        }
        r.push(ri);
        a.push(ai);
    }

    if r.is_empty() {
        return Err(InductionFileError::EmptyFile);
    }

    Ok(RadialProfile::new(r, a)?)
}
