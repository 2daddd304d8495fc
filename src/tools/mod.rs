//! matrix utilities shared by the samplers and the embedder


pub mod symetry;

pub mod degrees;
