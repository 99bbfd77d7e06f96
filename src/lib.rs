//! latsearch - Rank-1 lattice rule search
//!
//! Good quasi-Monte Carlo point sets are found, not computed. This library
//! searches for rank-1 lattice rules by optimizing coordinate-uniform figures
//! of merit incrementally, one generator component at a time.

pub mod error;
pub mod genseq;
pub mod kernel;
pub mod merit;
pub mod meritseq;
pub mod rule;
pub mod search;
pub mod size;
pub mod storage;
pub mod util;
pub mod weights;

pub use error::SearchError;
pub use kernel::{Kernel, PAlpha};
pub use merit::MeritValue;
pub use meritseq::CoordUniformCbc;
pub use rule::LatticeRule;
pub use search::{
    CbcSearch, ExhaustiveSearch, KorobovSearch, RandomCbcSearch, RandomKorobovSearch,
    RandomVectorSearch, SearchConfig, SearchResult,
};
pub use size::SizeParam;
pub use storage::{Compression, Storage};
pub use weights::{OrderDependentWeights, ProductWeights, Weights};
