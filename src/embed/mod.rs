//! joint spectral embedding of graph collections.
//!
//! The embedding pipeline is built from two numeric primitives usable on their
//! own : a truncated svd (dense or csr, full or randomized) in [svdapprox] and a
//! profile likelihood elbow detector in [elbow]. Module [mase] assembles them
//! into the multiple adjacency spectral embedding.


pub mod svdapprox;

pub mod elbow;

pub mod mase;

pub use svdapprox::{MatRepr, SvdMode, SvdResult, truncated_svd};

pub use elbow::select_dimension;

pub use mase::{MultipleAse, MultipleAseParams};
