//! Incremental coordinate-uniform merit evaluation.

mod cbc;
mod state;

pub use cbc::{CoordUniformCbc, MeritSeq};
pub use state::CoordUniformState;

#[cfg(test)]
pub(crate) use cbc::brute_force_merit;
