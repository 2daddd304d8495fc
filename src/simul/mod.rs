//! random graph sampling.
//!
//! The module provides samplers for the classical generative models of network
//! statistics : Erdos-Renyi in both the (n, p) and (n, m) forms, the stochastic
//! block model with optional degree correction, the structured independent edge
//! model, the random dot product graph and correlated Bernoulli graph pairs.
//!
//! Every sampler takes the random generator as an explicit argument.


pub mod params;

pub mod sampling;

pub mod corr;

pub use params::{WeightSampler, EdgeWeight, BlockWeights, CommWeights, DegreeCorrection};

pub use sampling::{sample_edges, er_np, er_nm, sbm, sbm_with_labels, siem, siem_with_labels, rdpg, p_from_latent};

pub use corr::sample_edges_corr;
