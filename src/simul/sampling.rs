//! random graph samplers.
//!
//! The samplers generate adjacency matrices from a probability specification :
//! a scalar probability ([er_np]), an exact edge count ([er_nm]), a block
//! structure ([sbm]), an explicit edge community matrix ([siem]) or latent
//! positions ([rdpg]).
//! Based on the models surveyed in :
//!     *A Consistent Adjacency Spectral Embedding for Stochastic Blockmodel Graphs*
//!     Sussman, Tang, Fishkind, Priebe. JASA 107(499), 2012
//! and for the degree corrected variant :
//!     *Regularized spectral clustering under the Degree-Corrected Stochastic Blockmodel*
//!     Qin, Rohe. NIPS 2013.
//!
//! All routines are generative : parameters in, one adjacency matrix out. The
//! random generator is an explicit argument so runs are reproducible and
//! parallel callers can hold one generator per worker.


use anyhow::{anyhow};

use ndarray::{Array1, Array2};

use rand::distributions::{Uniform, Distribution};
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::params::{EdgeWeight, BlockWeights, CommWeights, DegreeCorrection};
use crate::tools::symetry::{symetrize_triu, zero_diagonal, is_almost_symetric, check_probability_matrix};


// vertex labels of the blocks in declaration order : block i owns the contiguous
// index range starting after the i-1 first blocks
fn n_to_labels(n : &[usize]) -> Array1<usize> {
    let n_total : usize = n.iter().sum();
    let mut labels = Array1::<usize>::zeros(n_total);
    let mut first = 0usize;
    for (block, &size) in n.iter().enumerate() {
        for v in first..first + size {
            labels[v] = block;
        }
        first += size;
    }
    labels
} // end of n_to_labels


/// Generates a binary random graph from the probability matrix p.
/// Each entry p\[i,j\] is the probability of a connection between vertex i and vertex j.
///
/// In the undirected case only the upper triangle (diagonal included) is sampled and
/// mirrored, so one Bernoulli draw governs both a\[i,j\] and a\[j,i\].
/// If loops is false the diagonal is zeroed after sampling.
pub fn sample_edges(p : &Array2<f64>, directed : bool, loops : bool, rng : &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
    let (nb_row, nb_col) = p.dim();
    if nb_row != nb_col {
        return Err(anyhow!("p must be a square matrix, got dimensions ({}, {})", nb_row, nb_col));
    }
    //
    let uniform = Uniform::<f64>::new(0., 1.);
    let mut a = Array2::<f64>::zeros((nb_row, nb_row));
    if !directed {
        // can cut down on sampling by half
        for i in 0..nb_row {
            for j in i..nb_row {
                if uniform.sample(rng) < p[[i,j]] {
                    a[[i,j]] = 1.;
                }
            }
        }
        symetrize_triu(&mut a);
    }
    else {
        for i in 0..nb_row {
            for j in 0..nb_row {
                if uniform.sample(rng) < p[[i,j]] {
                    a[[i,j]] = 1.;
                }
            }
        }
    }
    if !loops {
        zero_diagonal(&mut a);
    }
    Ok(a)
} // end of sample_edges


/// Samples an Erdos-Renyi (n, p) graph : n vertices, each possible edge present
/// with probability p.
///
/// The model is the one block degenerate case of [sbm], to which this delegates,
/// so the degree corrected variant is available here too.
pub fn er_np(n : usize, p : f64, directed : bool, loops : bool,
        wt : Option<&EdgeWeight>, dc : Option<&DegreeCorrection>,
        rng : &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
    if n == 0 {
        return Err(anyhow!("n must be > 0"));
    }
    if !(0. ..=1.).contains(&p) {
        return Err(anyhow!("p must be in between 0 and 1, got {}", p));
    }
    let n_sbm = [n];
    let p_sbm = Array2::from_elem((1,1), p);
    let wt_sbm = wt.map(|w| BlockWeights::Shared(*w));
    sbm(&n_sbm, &p_sbm, directed, loops, wt_sbm.as_ref(), dc, rng)
} // end of er_np


/// Samples an Erdos-Renyi (n, m) graph : n vertices and exactly m edges drawn
/// uniformly among the eligible vertex pairs.
///
/// m must not exceed the number of eligible pairs, namely n^2, n(n+1)/2, n(n-1)
/// or n(n-1)/2 depending on the directed and loops flags.
pub fn er_nm(n : usize, m : usize, directed : bool, loops : bool,
        wt : Option<&EdgeWeight>, rng : &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
    if n == 0 {
        return Err(anyhow!("n must be > 0"));
    }
    if m == 0 {
        return Err(anyhow!("m must be > 0"));
    }
    //
    let (max_edges, formula) = match (loops, directed) {
        (true, true)  => (n * n, "n^2"),
        (true, false) => (n * (n + 1) / 2, "n(n+1)/2"),
        (false, true) => (n * (n - 1), "n(n-1)"),
        (false, false) => (n * (n - 1) / 2, "n(n-1)/2"),
    };
    if m > max_edges {
        return Err(anyhow!("you have passed a number of edges, {}, exceeding {}, {}", m, formula, max_edges));
    }
    // eligible index pairs under the directedness and loop constraints
    let mut pairs = Vec::<(usize, usize)>::with_capacity(max_edges);
    if directed {
        for i in 0..n {
            for j in 0..n {
                if loops || i != j {
                    pairs.push((i, j));
                }
            }
        }
    }
    else {
        let k = if loops { 0 } else { 1 };
        for i in 0..n {
            for j in (i + k)..n {
                pairs.push((i, j));
            }
        }
    }
    debug_assert_eq!(pairs.len(), max_edges);
    //
    let weight = wt.copied().unwrap_or(EdgeWeight::Const(1.));
    let mut a = Array2::<f64>::zeros((n, n));
    let chosen = rand::seq::index::sample(rng, pairs.len(), m);
    for idx in chosen.iter() {
        let (i, j) = pairs[idx];
        a[[i,j]] = weight.draw(rng);
    }
    if !directed {
        symetrize_triu(&mut a);
    }
    Ok(a)
} // end of er_nm


/// Samples a graph from the stochastic block model.
///
/// n gives the number of vertices of each community, p\[i,j\] the probability of an
/// edge between a vertex of community i and one of community j. Vertices are
/// numbered by blocks in declaration order.
/// The degree corrected variant (dc) redistributes the edges of each block pair
/// over the vertex pairs proportionally to the product of the two vertex weights.
pub fn sbm(n : &[usize], p : &Array2<f64>, directed : bool, loops : bool,
        wt : Option<&BlockWeights>, dc : Option<&DegreeCorrection>,
        rng : &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
    // Check n
    if n.is_empty() {
        return Err(anyhow!("n must give at least one community size"));
    }
    let nb_comm = n.len();
    let n_total : usize = n.iter().sum();
    // Check p
    if p.dim() != (nb_comm, nb_comm) {
        return Err(anyhow!("p must have dimension ({}, {}), got ({}, {})", nb_comm, nb_comm, p.dim().0, p.dim().1));
    }
    check_probability_matrix(p, "p")?;
    // Check wt
    if let Some(wt) = wt {
        wt.check(nb_comm, directed)?;
    }
    // Check directedness
    if !directed && !is_almost_symetric(p, 0.) {
        return Err(anyhow!("specified undirected, but p is directed"));
    }
    // community index ranges, blocks own contiguous ranges in declaration order
    let mut cmties = Vec::<std::ops::Range<usize>>::with_capacity(nb_comm);
    let mut counter = 0usize;
    for &size in n {
        cmties.push(counter..counter + size);
        counter += size;
    }
    // resolve degree correction into one weight per vertex
    let dcprobs = match dc {
        Some(dc) => Some(dc.resolve(n, rng)?),
        None => None,
    };
    //
    let uniform = Uniform::<f64>::new(0., 1.);
    let mut a = Array2::<f64>::zeros((n_total, n_total));
    for i in 0..nb_comm {
        let j_first = if directed { 0 } else { i };
        for j in j_first..nb_comm {
            let block_p = p[[i,j]];
            let block_wt = match wt {
                Some(wt) => wt.get(i, j),
                None => EdgeWeight::Const(1.),
            };
            // candidate edges : cartesian product of the two vertex ranges
            let mut pairs = Vec::<(usize, usize)>::with_capacity(n[i] * n[j]);
            for u in cmties[i].clone() {
                for v in cmties[j].clone() {
                    pairs.push((u, v));
                }
            }
            // uniform draw per candidate, acceptance below the block probability
            let pchoice : Vec<f64> = (0..pairs.len()).map(|_| uniform.sample(rng)).collect();
            let accepted : Vec<(usize, usize)>;
            if let Some(dcprobs) = &dcprobs {
                // (u,v) connected with probability p * dcprobs[u] * dcprobs[v] :
                // the block edge count comes from the threshold comparison, the edges are
                // then redistributed proportionally to the pairwise dc weights
                let mut nb_edges = pchoice.iter().filter(|&&x| x < block_p).count();
                let support = pairs.iter().filter(|&&(u,v)| dcprobs[u] * dcprobs[v] > 0.).count();
                if nb_edges > support {
                    log::warn!("more edges sampled than nonzero pairwise dc entries, picking fewer edges");
                    nb_edges = support;
                }
                accepted = pairs
                    .choose_multiple_weighted(rng, nb_edges, |&(u, v)| dcprobs[u] * dcprobs[v])
                    .map_err(|e| anyhow!("degree corrected edge sampling failed : {}", e))?
                    .copied()
                    .collect();
            }
            else {
                accepted = pairs.into_iter().zip(pchoice.iter())
                    .filter(|(_, &x)| x < block_p)
                    .map(|(pair, _)| pair)
                    .collect();
            }
            log::trace!("block ({}, {}) : {} edges accepted", i, j, accepted.len());
            for (u, v) in accepted {
                a[[u,v]] = block_wt.draw(rng);
            }
        }
    }
    //
    if !loops {
        zero_diagonal(&mut a);
    }
    if !directed {
        symetrize_triu(&mut a);
    }
    Ok(a)
} // end of sbm


/// same as [sbm], returning also the community label of each vertex
/// (zero indexed block number in declaration order).
pub fn sbm_with_labels(n : &[usize], p : &Array2<f64>, directed : bool, loops : bool,
        wt : Option<&BlockWeights>, dc : Option<&DegreeCorrection>,
        rng : &mut Xoshiro256PlusPlus) -> Result<(Array2<f64>, Array1<usize>), anyhow::Error> {
    let a = sbm(n, p, directed, loops, wt, dc, rng)?;
    let labels = n_to_labels(n);
    Ok((a, labels))
} // end of sbm_with_labels


// validation of the edge community matrix of the siem sampler.
// Returns the number of communities.
fn check_edge_comm(n : usize, edge_comm : &Array2<usize>, directed : bool, loops : bool) -> Result<usize, anyhow::Error> {
    let (nb_row, nb_col) = edge_comm.dim();
    if nb_row != nb_col {
        return Err(anyhow!("edge_comm should be square, edge_comm has dimensions ({}, {})", nb_row, nb_col));
    }
    if nb_row != n {
        return Err(anyhow!("edge_comm should have dimension ({}, {}), got ({}, {})", n, n, nb_row, nb_col));
    }
    //
    let nb_comm = *edge_comm.iter().max().unwrap();
    let distinct = {
        let mut seen = vec![false; nb_comm + 1];
        for &c in edge_comm.iter() {
            seen[c] = true;
        }
        seen.iter().filter(|&&s| s).count()
    };
    if loops {
        if edge_comm.iter().min() != Some(&1) {
            return Err(anyhow!("edge_comm should all be numbered sequentially from 1:K, the minimum is not 1"));
        }
        if distinct != nb_comm {
            return Err(anyhow!("edge_comm should be numbered sequentially from 1:K, the sequence is not consecutive"));
        }
    }
    else {
        let off_diag_min = edge_comm.indexed_iter()
            .filter(|((i, j), _)| i != j)
            .map(|(_, &c)| c)
            .min();
        if off_diag_min != Some(1) {
            return Err(anyhow!("since the graph has no loops, all off diagonal elements of edge_comm should have a minimum of 1"));
        }
        if edge_comm.diag().iter().any(|&c| c != 0) {
            return Err(anyhow!("a loopless graph was requested but a diagonal element is assigned to a nonzero community, all diagonal elements of edge_comm should be zero if loops is false"));
        }
        if distinct != nb_comm + 1 {
            return Err(anyhow!("edge_comm should be numbered sequentially from 1:K for off diagonals and 0 on the diagonal, the sequence is not consecutive"));
        }
    }
    // an asymetric community assignment under an undirected model would be silently
    // rewritten by the final symmetrization, so it is rejected
    if !directed {
        for i in 0..nb_row {
            for j in 0..i {
                if edge_comm[[i,j]] != edge_comm[[j,i]] {
                    return Err(anyhow!("an undirected siem was requested, but edge_comm is directed"));
                }
            }
        }
    }
    Ok(nb_comm)
} // end of check_edge_comm


/// Samples a graph from the structured independent edge model.
///
/// Every cell of the n x n matrix is assigned an edge community in 1..=K through
/// edge_comm (0 is reserved for the diagonal when loops is false) and the cells of
/// community k are independent Bernoulli draws of probability p\[k-1\].
/// p holds either one probability per community or a single value broadcast to all
/// of them.
pub fn siem(n : usize, p : &[f64], edge_comm : &Array2<usize>, directed : bool, loops : bool,
        wt : Option<&CommWeights>, rng : &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
    if n == 0 {
        return Err(anyhow!("n must be > 0"));
    }
    let nb_comm = check_edge_comm(n, edge_comm, directed, loops)?;
    // Check p, a single probability is broadcast over the communities
    let probs : Vec<f64> = match p.len() {
        1 => vec![p[0]; nb_comm],
        l if l == nb_comm => p.to_vec(),
        _ => {
            return Err(anyhow!("number of probabilities in p ({}) and number of communities in edge_comm ({}) don't match up", p.len(), nb_comm));
        },
    };
    if probs.iter().any(|x| !(0. ..=1.).contains(x)) {
        return Err(anyhow!("values in p must be in between 0 and 1"));
    }
    // Check wt
    if let Some(wt) = wt {
        wt.check(nb_comm)?;
    }
    //
    let uniform = Uniform::<f64>::new(0., 1.);
    let mut a = Array2::<f64>::zeros((n, n));
    for k in 1..=nb_comm {
        let p_k = probs[k - 1];
        let wt_k = match wt {
            Some(wt) => wt.get(k),
            None => EdgeWeight::Const(1.),
        };
        for ((i, j), &comm) in edge_comm.indexed_iter() {
            if comm == k && uniform.sample(rng) < p_k {
                a[[i,j]] = wt_k.draw(rng);
            }
        }
    }
    // if not directed, just look at upper triangle and duplicate
    if !directed {
        symetrize_triu(&mut a);
    }
    Ok(a)
} // end of siem


/// same as [siem], returning also the edge community matrix alongside the
/// adjacency matrix.
pub fn siem_with_labels(n : usize, p : &[f64], edge_comm : &Array2<usize>, directed : bool, loops : bool,
        wt : Option<&CommWeights>, rng : &mut Xoshiro256PlusPlus) -> Result<(Array2<f64>, Array2<usize>), anyhow::Error> {
    let a = siem(n, p, edge_comm, directed, loops, wt, rng)?;
    Ok((a, edge_comm.clone()))
} // end of siem_with_labels


/// Connection probability matrix from latent positions : P = X Yt, with Y
/// defaulting to X.
///
/// Entries outside \[0,1\] are clipped, or when rescale is true the matrix is
/// shifted by its minimum (if negative) and divided by its maximum (if above 1).
/// When loops is false the diagonal is zeroed before the postprocessing, which may
/// affect the rescaling.
pub fn p_from_latent(x : &Array2<f64>, y : Option<&Array2<f64>>, rescale : bool, loops : bool) -> Result<Array2<f64>, anyhow::Error> {
    let y = y.unwrap_or(x);
    if x.dim() != y.dim() {
        return Err(anyhow!("dimensions of latent positions x ({:?}) and y ({:?}) must be the same", x.dim(), y.dim()));
    }
    //
    let mut p = x.dot(&y.t());
    if !loops {
        zero_diagonal(&mut p);
    }
    if rescale {
        let min = p.iter().cloned().fold(f64::INFINITY, f64::min);
        if min < 0. {
            p.mapv_inplace(|v| v - min);
        }
        let max = p.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if max > 1. {
            p.mapv_inplace(|v| v / max);
        }
    }
    else {
        p.mapv_inplace(|v| v.clamp(0., 1.));
    }
    Ok(p)
} // end of p_from_latent


/// Samples a random dot product graph from the latent positions in x (and
/// optionally y).
///
/// The probability matrix comes from [p_from_latent], a binary graph is drawn by
/// [sample_edges], then weights are applied : a constant multiplies the adjacency
/// matrix, a sampler replaces each nonzero cell by an independent draw.
pub fn rdpg(x : &Array2<f64>, y : Option<&Array2<f64>>, rescale : bool, directed : bool, loops : bool,
        wt : Option<&EdgeWeight>, rng : &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
    let p = p_from_latent(x, y, rescale, loops)?;
    let mut a = sample_edges(&p, directed, loops, rng)?;
    match wt {
        None => {},
        Some(EdgeWeight::Const(w)) => {
            let w = *w;
            if w != 1. {
                a.mapv_inplace(|v| v * w);
            }
        },
        Some(EdgeWeight::Sampler(s)) => {
            a.mapv_inplace(|v| if v > 0. { s.sample_weight(rng) } else { v });
        },
    }
    Ok(a)
} // end of rdpg


//========================================================================================


#[cfg(test)]
mod tests {

#[allow(unused)]
use super::*;

use rand_xoshiro::rand_core::SeedableRng;
use rand_distr::{Uniform as DistUniform, Poisson};

#[allow(dead_code)]
fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_sample_edges_undirected() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1235437);
    let p = Array2::from_elem((20, 20), 0.5);
    let a = sample_edges(&p, false, false, &mut rng).unwrap();
    assert!(is_almost_symetric(&a, 0.));
    for i in 0..20 {
        assert_eq!(a[[i,i]], 0.);
    }
    assert!(a.iter().all(|&v| v == 0. || v == 1.));
} // end of test_sample_edges_undirected


#[test]
fn test_sample_edges_not_square() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1235437);
    let p = Array2::from_elem((3, 4), 0.5);
    assert!(sample_edges(&p, true, true, &mut rng).is_err());
} // end of test_sample_edges_not_square


#[test]
fn test_sample_edges_deterministic() {
    log_init_test();
    // the crate owns no hidden random state, equal seeds give equal graphs
    let p = Array2::from_elem((15, 15), 0.3);
    let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(4664397);
    let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(4664397);
    let a1 = sample_edges(&p, false, false, &mut rng1).unwrap();
    let a2 = sample_edges(&p, false, false, &mut rng2).unwrap();
    assert_eq!(a1, a2);
} // end of test_sample_edges_deterministic


#[test]
fn test_er_nm_edge_count() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(456231);
    // directed without loops : exactly m nonzero entries
    let a = er_nm(10, 30, true, false, None, &mut rng).unwrap();
    assert_eq!(a.iter().filter(|&&v| v != 0.).count(), 30);
    for i in 0..10 {
        assert_eq!(a[[i,i]], 0.);
    }
    // undirected : every edge appears twice, none on the diagonal
    let a = er_nm(10, 30, false, false, None, &mut rng).unwrap();
    assert_eq!(a.iter().filter(|&&v| v != 0.).count(), 60);
    assert!(is_almost_symetric(&a, 0.));
} // end of test_er_nm_edge_count


#[test]
fn test_er_nm_too_many_edges() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(456231);
    // max for n = 5 undirected loopless is 10
    assert!(er_nm(5, 11, false, false, None, &mut rng).is_err());
    assert!(er_nm(5, 10, false, false, None, &mut rng).is_ok());
    // and n(n+1)/2 = 15 with loops
    assert!(er_nm(5, 15, false, true, None, &mut rng).is_ok());
} // end of test_er_nm_too_many_edges


#[test]
fn test_er_nm_weighted() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(893221);
    let uniform = DistUniform::new(2., 3.);
    let wt = EdgeWeight::Sampler(&uniform);
    let a = er_nm(8, 10, true, false, Some(&wt), &mut rng).unwrap();
    let nonzero : Vec<f64> = a.iter().cloned().filter(|&v| v != 0.).collect();
    assert_eq!(nonzero.len(), 10);
    assert!(nonzero.iter().all(|&v| v >= 2. && v < 3.));
} // end of test_er_nm_weighted


#[test]
fn test_er_np_matches_single_block_sbm() {
    log_init_test();
    // the er_np law is the one block sbm law, draw for draw under equal seeds
    let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(1235437);
    let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(1235437);
    let a1 = er_np(12, 0.4, false, false, None, None, &mut rng1).unwrap();
    let p = Array2::from_elem((1,1), 0.4);
    let a2 = sbm(&[12], &p, false, false, None, None, &mut rng2).unwrap();
    assert_eq!(a1, a2);
} // end of test_er_np_matches_single_block_sbm


#[test]
fn test_sbm_labels() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1235437);
    let p = ndarray::arr2(&[ [0.5, 0.1], [0.1, 0.5] ]);
    let (a, labels) = sbm_with_labels(&[3, 3], &p, false, false, None, None, &mut rng).unwrap();
    assert_eq!(a.dim(), (6, 6));
    assert!(is_almost_symetric(&a, 0.));
    assert_eq!(labels.to_vec(), vec![0, 0, 0, 1, 1, 1]);
} // end of test_sbm_labels


#[test]
fn test_sbm_block_structure() {
    log_init_test();
    // extreme probabilities pin down the block structure exactly
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(777351);
    let p = ndarray::arr2(&[ [1., 0.], [0., 1.] ]);
    let a = sbm(&[4, 4], &p, false, false, None, None, &mut rng).unwrap();
    for i in 0..4 {
        for j in 0..4 {
            if i != j {
                assert_eq!(a[[i,j]], 1.);
                assert_eq!(a[[i + 4, j + 4]], 1.);
            }
            assert_eq!(a[[i, j + 4]], 0.);
        }
    }
} // end of test_sbm_block_structure


#[test]
fn test_sbm_asymetric_p_rejected() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(777351);
    let p = ndarray::arr2(&[ [0.5, 0.2], [0.1, 0.5] ]);
    assert!(sbm(&[3, 3], &p, false, false, None, None, &mut rng).is_err());
    // the same matrix is fine for a directed model
    assert!(sbm(&[3, 3], &p, true, false, None, None, &mut rng).is_ok());
} // end of test_sbm_asymetric_p_rejected


#[test]
fn test_sbm_weighted() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(893221);
    let p = ndarray::arr2(&[ [1.] ]);
    let poisson = Poisson::new(2.).unwrap();
    let wt = BlockWeights::Shared(EdgeWeight::Sampler(&poisson));
    let a = sbm(&[6], &p, false, false, Some(&wt), None, &mut rng).unwrap();
    // all off diagonal entries present with integer valued weights
    for i in 0..6 {
        for j in 0..6 {
            if i != j {
                assert_eq!(a[[i,j]], a[[i,j]].round());
            }
        }
    }
    assert!(is_almost_symetric(&a, 0.));
} // end of test_sbm_weighted


#[test]
fn test_sbm_degree_corrected() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(893221);
    // vertex 0 takes all the weight of block 0, so no edge can land on vertex 1
    // inside the block pair (0,0)
    let dc = DegreeCorrection::Weights(ndarray::arr1(&[1., 0., 0., 0.5, 0.5]));
    let p = ndarray::arr2(&[ [0.9, 0.], [0., 0.9] ]);
    let a = sbm(&[3, 2], &p, false, false, None, Some(&dc), &mut rng).unwrap();
    assert_eq!(a[[1,2]], 0.);
    assert_eq!(a[[2,1]], 0.);
    assert!(is_almost_symetric(&a, 0.));
} // end of test_sbm_degree_corrected


#[test]
fn test_siem_basic() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(456231);
    // two edge communities on a 4 vertex loopless graph : community 1 always
    // connects, community 2 never does
    let edge_comm = ndarray::arr2(&[ [0, 1, 1, 2],
                                     [1, 0, 2, 2],
                                     [1, 2, 0, 1],
                                     [2, 2, 1, 0] ]);
    let (a, labels) = siem_with_labels(4, &[1., 0.], &edge_comm, false, false, None, &mut rng).unwrap();
    assert_eq!(labels, edge_comm);
    for ((i, j), &c) in edge_comm.indexed_iter() {
        match c {
            1 => assert_eq!(a[[i,j]], 1.),
            _ => assert_eq!(a[[i,j]], 0.),
        }
    }
} // end of test_siem_basic


#[test]
fn test_siem_rejects_bad_labels() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(456231);
    // nonzero diagonal under loops = false
    let edge_comm = ndarray::arr2(&[ [1, 1], [1, 1] ]);
    assert!(siem(2, &[0.5], &edge_comm, false, false, None, &mut rng).is_err());
    // non consecutive labels : 1 and 3 but no 2
    let edge_comm = ndarray::arr2(&[ [0, 1], [3, 0] ]);
    assert!(siem(2, &[0.5], &edge_comm, true, false, None, &mut rng).is_err());
    // dimension mismatch with n
    let edge_comm = ndarray::arr2(&[ [0, 1], [1, 0] ]);
    assert!(siem(3, &[0.5], &edge_comm, false, false, None, &mut rng).is_err());
} // end of test_siem_rejects_bad_labels


#[test]
fn test_siem_asymetric_comm_rejected() {
    log_init_test();
    // the undirected model rejects an asymetric community assignment
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(456231);
    let edge_comm = ndarray::arr2(&[ [0, 1, 2],
                                     [2, 0, 1],
                                     [2, 1, 0] ]);
    assert!(siem(3, &[0.5, 0.5], &edge_comm, false, false, None, &mut rng).is_err());
    // and accepts it when directed
    assert!(siem(3, &[0.5, 0.5], &edge_comm, true, false, None, &mut rng).is_ok());
} // end of test_siem_asymetric_comm_rejected


#[test]
fn test_p_from_latent_clip_and_rescale() {
    log_init_test();
    //
    let x = ndarray::arr2(&[ [1., 0.], [0., 2.], [1., 1.] ]);
    // clip policy : entries capped at 1
    let p = p_from_latent(&x, None, false, true).unwrap();
    assert!(is_almost_symetric(&p, 1.0E-12));
    assert!(p.iter().all(|&v| (0. ..=1.).contains(&v)));
    assert_eq!(p[[1,1]], 1.);    // 4 clipped to 1
    // rescale policy : divided by the maximum, ratios preserved
    let p = p_from_latent(&x, None, true, true).unwrap();
    assert!((p[[1,1]] - 1.).abs() < 1.0E-12);
    assert!((p[[0,0]] - 0.25).abs() < 1.0E-12);
    // loopless : diagonal zeroed
    let p = p_from_latent(&x, None, false, false).unwrap();
    for i in 0..3 {
        assert_eq!(p[[i,i]], 0.);
    }
} // end of test_p_from_latent_clip_and_rescale


#[test]
fn test_p_from_latent_dim_mismatch() {
    log_init_test();
    //
    let x = Array2::<f64>::zeros((3, 2));
    let y = Array2::<f64>::zeros((4, 2));
    assert!(p_from_latent(&x, Some(&y), false, true).is_err());
} // end of test_p_from_latent_dim_mismatch


#[test]
fn test_rdpg() {
    log_init_test();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(4664397);
    let x = Array2::from_elem((10, 2), 0.5);   // all probabilities 0.5
    let a = rdpg(&x, None, false, false, false, None, &mut rng).unwrap();
    assert!(is_almost_symetric(&a, 0.));
    assert!(a.iter().all(|&v| v == 0. || v == 1.));
    // constant weight multiplies the adjacency matrix
    let a = rdpg(&x, None, false, false, false, Some(&EdgeWeight::Const(2.5)), &mut rng).unwrap();
    assert!(a.iter().all(|&v| v == 0. || v == 2.5));
} // end of test_rdpg


}  // end of mod tests
