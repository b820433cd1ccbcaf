//! File input for externally supplied boundary conditions.
//!
//! The engine itself never touches the filesystem during a solve;
//! serialization of results is left to surrounding tooling, which consumes
//! the plain arrays on [`crate::grid::WakeSolution`].

mod induction_reader;

pub use induction_reader::{read_induction_table, InductionFileError};
