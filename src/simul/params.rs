//! weight and degree correction specifications for the graph samplers.
//!
//! An edge weight is either a constant or an independent draw from a distribution.
//! The heterogeneous forms accepted by the samplers (one model for the whole graph,
//! one per block pair, one per edge community) are resolved once during validation,
//! the sampling loops then only see [EdgeWeight] values.


use anyhow::{anyhow};

use ndarray::{Array1, Array2};

use rand::distributions::Distribution;
use rand_xoshiro::Xoshiro256PlusPlus;


/// object safe facade over a distribution on f64.
/// Blanket implemented for every [rand_distr::Distribution] on f64 so any
/// distribution of the rand_distr crate can be passed to the samplers.
pub trait WeightSampler {
    fn sample_weight(&self, rng : &mut Xoshiro256PlusPlus) -> f64;
}

impl<D> WeightSampler for D
    where D : Distribution<f64> {
    fn sample_weight(&self, rng : &mut Xoshiro256PlusPlus) -> f64 {
        self.sample(rng)
    }
} // end of impl WeightSampler


/// the weight affected to a sampled edge
#[derive(Clone, Copy)]
pub enum EdgeWeight<'a> {
    /// constant weight. Const(1.) gives a binary graph
    Const(f64),
    /// an independent draw per accepted edge
    Sampler(&'a dyn WeightSampler),
}

impl EdgeWeight<'_> {

    /// weight of one accepted edge
    pub fn draw(&self, rng : &mut Xoshiro256PlusPlus) -> f64 {
        match self {
            EdgeWeight::Const(w) => *w,
            EdgeWeight::Sampler(s) => s.sample_weight(rng),
        }
    } // end of draw

    // Used by the symmetry checks of the undirected samplers. Two sampler variants
    // compare by the address of the sampler they point to.
    pub(crate) fn same_as(&self, other : &EdgeWeight) -> bool {
        match (self, other) {
            (EdgeWeight::Const(a), EdgeWeight::Const(b)) => a == b,
            (EdgeWeight::Sampler(a), EdgeWeight::Sampler(b)) => {
                std::ptr::eq(*a as *const dyn WeightSampler as *const u8,
                             *b as *const dyn WeightSampler as *const u8)
            },
            _ => false,
        }
    } // end of same_as

} // end of impl EdgeWeight


/// weights for the stochastic block model, either one model shared by every
/// block pair or one model per block pair
pub enum BlockWeights<'a> {
    /// same weight model for every block pair
    Shared(EdgeWeight<'a>),
    /// weight model of the (i,j) block pair, dimension (nb_comm, nb_comm)
    PerBlock(Array2<EdgeWeight<'a>>),
}

impl BlockWeights<'_> {

    /// weight model of block pair (i,j)
    pub fn get(&self, i : usize, j : usize) -> EdgeWeight {
        match self {
            BlockWeights::Shared(w) => *w,
            BlockWeights::PerBlock(arr) => arr[[i,j]],
        }
    } // end of get

    pub(crate) fn check(&self, nb_comm : usize, directed : bool) -> Result<(), anyhow::Error> {
        if let BlockWeights::PerBlock(arr) = self {
            if arr.dim() != (nb_comm, nb_comm) {
                return Err(anyhow!("wt must have dimension ({}, {}), got ({}, {})",
                        nb_comm, nb_comm, arr.dim().0, arr.dim().1));
            }
            if !directed {
                for i in 0..nb_comm {
                    for j in 0..i {
                        if !arr[[i,j]].same_as(&arr[[j,i]]) {
                            return Err(anyhow!("specified undirected, but wt is directed"));
                        }
                    }
                }
            }
        }
        Ok(())
    } // end of check

} // end of impl BlockWeights


/// weights for the structured independent edge model, either one model shared
/// by every edge community or one model per edge community
pub enum CommWeights<'a> {
    /// same weight model for every edge community
    Shared(EdgeWeight<'a>),
    /// weight model of community k at index k-1, length = nb of communities
    PerCommunity(Vec<EdgeWeight<'a>>),
}

impl CommWeights<'_> {

    /// weight model of edge community k (k in 1..=K)
    pub fn get(&self, k : usize) -> EdgeWeight {
        match self {
            CommWeights::Shared(w) => *w,
            CommWeights::PerCommunity(v) => v[k - 1],
        }
    } // end of get

    pub(crate) fn check(&self, nb_comm : usize) -> Result<(), anyhow::Error> {
        if let CommWeights::PerCommunity(v) = self {
            if v.len() != nb_comm {
                return Err(anyhow!("wt must have size {}, not {}", nb_comm, v.len()));
            }
        }
        Ok(())
    } // end of check

} // end of impl CommWeights


/// degree correction specification for the stochastic block model.
/// All the forms resolve into one non negative weight per vertex, summing to 1
/// within each community, before the sampling loop runs.
pub enum DegreeCorrection<'a> {
    /// one draw per vertex from the same sampler, renormalized within each community
    Sampler(&'a dyn WeightSampler),
    /// explicit per vertex weights. They should sum to 1 within each community,
    /// otherwise they are renormalized and a warning is logged
    Weights(Array1<f64>),
    /// one sampler per community, index in declaration order of the blocks
    PerBlockSamplers(Vec<&'a dyn WeightSampler>),
}

impl DegreeCorrection<'_> {

    /// resolves the specification into one weight per vertex.
    /// n gives the community sizes in declaration order.
    pub(crate) fn resolve(&self, n : &[usize], rng : &mut Xoshiro256PlusPlus) -> Result<Array1<f64>, anyhow::Error> {
        let n_total : usize = n.iter().sum();
        let mut probs = match self {
            DegreeCorrection::Sampler(s) => {
                Array1::from_iter((0..n_total).map(|_| s.sample_weight(rng)))
            },
            DegreeCorrection::Weights(w) => {
                if w.len() != n_total {
                    return Err(anyhow!("dc must have size equal to the number of vertices {}, not {}", n_total, w.len()));
                }
                if w.iter().any(|&x| x < 0.) {
                    return Err(anyhow!("values in dc cannot be negative"));
                }
                w.clone()
            },
            DegreeCorrection::PerBlockSamplers(samplers) => {
                if samplers.len() != n.len() {
                    return Err(anyhow!("dc must have size equal to the number of blocks {}, not {}", n.len(), samplers.len()));
                }
                let mut v = Vec::<f64>::with_capacity(n_total);
                for (sampler, &size) in samplers.iter().zip(n.iter()) {
                    for _ in 0..size {
                        v.push(sampler.sample_weight(rng));
                    }
                }
                Array1::from_vec(v)
            },
        };
        // per community renormalization. For explicit weights a deviation from 1 is
        // reported, the output stays usable.
        let explicit = matches!(self, DegreeCorrection::Weights(_));
        let mut first = 0usize;
        for (block, &size) in n.iter().enumerate() {
            let mut slice = probs.slice_mut(ndarray::s![first..first + size]);
            let sum = slice.sum();
            if !(sum > 0.) {
                return Err(anyhow!("dc weights of block {} sum to 0, cannot renormalize", block));
            }
            if (sum - 1.).abs() > 1.0E-8 {
                if explicit {
                    log::warn!("block {} dc probabilities sum to {:.3e}, normalizing", block, sum);
                }
                slice.mapv_inplace(|x| x / sum);
            }
            first += size;
        }
        Ok(probs)
    } // end of resolve

} // end of impl DegreeCorrection


//========================================================================================


#[cfg(test)]
mod tests {

#[allow(unused)]
use super::*;

use rand_xoshiro::rand_core::SeedableRng;
use rand_distr::Uniform;

#[allow(dead_code)]
fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_edge_weight_draw() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(234567);
    assert_eq!(EdgeWeight::Const(3.5).draw(&mut rng), 3.5);
    let uniform = Uniform::new(2., 4.);
    let w = EdgeWeight::Sampler(&uniform).draw(&mut rng);
    assert!(w >= 2. && w < 4.);
} // end of test_edge_weight_draw


#[test]
fn test_block_weights_symetry() {
    log_init_test();
    //
    let uniform = Uniform::new(0., 1.);
    let w = EdgeWeight::Sampler(&uniform);
    let sym = Array2::from_elem((2,2), w);
    assert!(BlockWeights::PerBlock(sym).check(2, false).is_ok());
    //
    let other = Uniform::new(0., 2.);
    let mut asym = Array2::from_elem((2,2), w);
    asym[[0,1]] = EdgeWeight::Sampler(&other);
    assert!(BlockWeights::PerBlock(asym).check(2, false).is_err());
} // end of test_block_weights_symetry


#[test]
fn test_dc_renormalization() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(777351);
    // weights not summing to 1 within blocks get renormalized
    let dc = DegreeCorrection::Weights(ndarray::arr1(&[2., 2., 1., 3.]));
    let probs = dc.resolve(&[2, 2], &mut rng).unwrap();
    assert!((probs[0] - 0.5).abs() < 1.0E-10);
    assert!((probs[2] - 0.25).abs() < 1.0E-10);
    assert!((probs[3] - 0.75).abs() < 1.0E-10);
} // end of test_dc_renormalization


#[test]
fn test_dc_errors() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(777351);
    let dc = DegreeCorrection::Weights(ndarray::arr1(&[0.5, -0.5]));
    assert!(dc.resolve(&[2], &mut rng).is_err());
    let dc = DegreeCorrection::Weights(ndarray::arr1(&[0.5, 0.5, 0.5]));
    assert!(dc.resolve(&[2], &mut rng).is_err());
} // end of test_dc_errors


}  // end of mod tests
