//! Multiple Adjacency Spectral Embedding.
//!
//! Based on the paper :
//!     *Inference for multiple heterogeneous networks with a common invariant subspace*
//!     Arroyo, Athreya, Cape, Chen, Priebe, Vogelstein. JMLR 22, 2021
//!
//! A collection of graphs on a matched vertex set is embedded jointly : each graph
//! is decomposed separately, the per graph factors are concatenated and decomposed
//! a second time, giving latent positions shared by the whole collection plus one
//! score matrix per graph.


use anyhow::{anyhow};

use ndarray::{Array2, Array3, Axis, s, concatenate};

use rand_xoshiro::Xoshiro256PlusPlus;

use super::svdapprox::{MatRepr, SvdMode, truncated_svd};
use super::elbow::select_dimension;
use crate::tools::degrees::diagonal_augmentation;
use crate::tools::symetry::is_almost_symetric;


// symmetry tolerance of the directedness check
const SYMETRY_EPSIL : f64 = 1.0E-8;


/// hyper parameters of the embedding
#[derive(Clone, Copy, Debug)]
pub struct MultipleAseParams {
    /// dimension of the output positions. None asks for automatic elbow selection
    pub n_components : Option<usize>,
    /// number of elbows retained by the automatic selection (the last one wins)
    pub n_elbows : usize,
    /// svd algorithm used by both embedding stages
    pub svd_mode : SvdMode,
    /// whether the per graph factors are scaled by the square root of their
    /// singular values before concatenation (reduces to the usual adjacency
    /// spectral embedding normalization)
    pub scaled : bool,
    /// whether the diagonal of each graph is replaced by the vertex degree
    /// before embedding
    pub diag_aug : bool,
    /// for a directed population, whether fit_transform concatenates the left
    /// and right positions column wise
    pub concat : bool,
} // end of struct MultipleAseParams


impl MultipleAseParams {

    pub fn new(n_components : Option<usize>, n_elbows : usize, svd_mode : SvdMode,
            scaled : bool, diag_aug : bool, concat : bool) -> Self {
        MultipleAseParams{n_components, n_elbows, svd_mode, scaled, diag_aug, concat}
    }

} // end of impl MultipleAseParams


impl Default for MultipleAseParams {
    fn default() -> Self {
        MultipleAseParams{n_components : None, n_elbows : 2,
            svd_mode : SvdMode::Randomized{ nb_iter : 5 },
            scaled : true, diag_aug : true, concat : false}
    }
} // end of impl Default


#[cfg_attr(doc, katexit::katexit)]
/// Joint embedding of a collection of graphs sharing a vertex set.
///
/// For an undirected population the graphs are modeled as sampled around
/// $V R^{(i)} V^T$ with a common $V \in \mathbb{R}^{n \times d}$ and one symmetric
/// score matrix $R^{(i)} \in \mathbb{R}^{d \times d}$ per graph.
/// For a directed population the model is $U R^{(i)} V^T$ and the score matrices
/// may be rectangular, with the two sides possibly embedded in different
/// dimensions.
///
/// The struct is a small state machine : construct with the hyper parameters,
/// then [fit](MultipleAse::fit) populates the latent positions and the scores.
pub struct MultipleAse {
    params : MultipleAseParams,
    /// number of graphs seen at fit time
    nb_graphs : Option<usize>,
    /// number of vertices of each graph
    nb_vertices : Option<usize>,
    /// true if every fitted graph passed the symmetry test
    undirected : Option<bool>,
    /// joint left latent positions, one row per vertex
    latent_left : Option<Array2<f64>>,
    /// joint right latent positions. None for an undirected population
    latent_right : Option<Array2<f64>>,
    /// one score matrix per fitted graph
    scores : Option<Vec<Array2<f64>>>,
} // end of struct MultipleAse


impl MultipleAse {

    pub fn new(params : MultipleAseParams) -> Self {
        MultipleAse{params, nb_graphs : None, nb_vertices : None, undirected : None,
            latent_left : None, latent_right : None, scores : None}
    }

    /// number of graphs of the fitted collection
    pub fn get_nb_graphs(&self) -> Option<usize> { self.nb_graphs }

    /// number of vertices of each fitted graph
    pub fn get_nb_vertices(&self) -> Option<usize> { self.nb_vertices }

    /// true if the whole fitted collection passed the symmetry test
    pub fn is_undirected(&self) -> Option<bool> { self.undirected }

    /// joint left latent positions
    pub fn get_latent_left(&self) -> Option<&Array2<f64>> { self.latent_left.as_ref() }

    /// joint right latent positions, absent for an undirected population
    pub fn get_latent_right(&self) -> Option<&Array2<f64>> { self.latent_right.as_ref() }

    /// per graph score matrices
    pub fn get_scores(&self) -> Option<&Vec<Array2<f64>>> { self.scores.as_ref() }


    // input collection validation : non empty, square, all the same shape
    fn check_graphs(graphs : &[Array2<f64>]) -> Result<usize, anyhow::Error> {
        if graphs.is_empty() {
            return Err(anyhow!("the graph collection is empty"));
        }
        let (nb_row, nb_col) = graphs[0].dim();
        if nb_row != nb_col {
            return Err(anyhow!("graphs must be square matrices, got dimensions ({}, {})", nb_row, nb_col));
        }
        if nb_row < 2 {
            return Err(anyhow!("graphs must have at least 2 vertices"));
        }
        for (i, g) in graphs.iter().enumerate() {
            if g.dim() != (nb_row, nb_col) {
                return Err(anyhow!("graph {} has dimensions {:?}, expected ({}, {})", i, g.dim(), nb_row, nb_col));
            }
        }
        Ok(nb_row)
    } // end of check_graphs


    // second stage decomposition : svd of a concatenated factor block with the
    // rank either given by the user or elbow selected on the singular values
    fn select_svd(&self, mat : &Array2<f64>, rng : &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
        let full_rank = mat.nrows().min(mat.ncols());
        let rank = match self.params.n_components {
            Some(d) => d.min(full_rank),
            None => full_rank,
        };
        let res = truncated_svd(&MatRepr::from_array2(mat.clone()), rank, self.params.svd_mode, rng)?;
        match self.params.n_components {
            Some(_) => Ok(res.u),
            None => {
                let elbows = select_dimension(&res.s, self.params.n_elbows)?;
                let dim = *elbows.last().unwrap();
                log::debug!("select_svd keeps {} of {} singular directions", dim, full_rank);
                Ok(res.u.slice(s![.., ..dim]).to_owned())
            },
        }
    } // end of select_svd


    /// Fits the embedding on a collection of same shaped square adjacency matrices.
    ///
    /// The two stage pipeline : every graph is reduced to ceil(log2(n)) singular
    /// directions, a common dimension is chosen (user given, or the max of the per
    /// graph elbows), the truncated factors are concatenated across graphs and a
    /// second svd of the concatenation gives the joint positions. Scores are
    /// recovered by projecting each graph on the joint positions.
    pub fn fit(&mut self, graphs : &[Array2<f64>], rng : &mut Xoshiro256PlusPlus) -> Result<(), anyhow::Error> {
        let nb_vertices = Self::check_graphs(graphs)?;
        let nb_graphs = graphs.len();
        // directedness of the population
        let undirected = graphs.iter().all(|g| is_almost_symetric(g, SYMETRY_EPSIL));
        log::info!("MultipleAse::fit {} graphs of {} vertices, undirected : {}", nb_graphs, nb_vertices, undirected);
        // diagonal augmentation
        let graphs_proc : Vec<Array2<f64>> = if self.params.diag_aug {
            graphs.iter().map(diagonal_augmentation).collect()
        }
        else {
            graphs.to_vec()
        };
        // first stage : embed each graph into ceil(log2(n)) directions
        let d_first = ((nb_vertices as f64).log2().ceil() as usize).max(1);
        let mut svds = Vec::with_capacity(nb_graphs);
        for g in &graphs_proc {
            svds.push(truncated_svd(&MatRepr::from_array2(g.clone()), d_first, self.params.svd_mode, rng)?);
        }
        // common truncation dimension over the collection
        let best_dimension = match self.params.n_components {
            Some(d) => {
                if d == 0 {
                    return Err(anyhow!("n_components must be > 0"));
                }
                if d > d_first {
                    log::warn!("n_components {} exceeds the first stage dimension {}, capping", d, d_first);
                }
                d.min(d_first)
            },
            None => {
                let mut best = 0usize;
                for res in &svds {
                    let elbows = select_dimension(&res.s, self.params.n_elbows)?;
                    best = best.max(*elbows.last().unwrap());
                }
                best
            },
        };
        log::debug!("first stage dimension {}, common truncation {}", d_first, best_dimension);
        // truncate, optionally rescale by sqrt of singular values, concatenate
        let mut u_blocks = Vec::<Array2<f64>>::with_capacity(nb_graphs);
        let mut v_blocks = Vec::<Array2<f64>>::with_capacity(nb_graphs);
        for res in &svds {
            let mut u = res.u.slice(s![.., ..best_dimension]).to_owned();
            let mut v = res.vt.slice(s![..best_dimension, ..]).t().to_owned();
            if self.params.scaled {
                for j in 0..best_dimension {
                    let scale = res.s[j].sqrt();
                    u.column_mut(j).mapv_inplace(|x| x * scale);
                    v.column_mut(j).mapv_inplace(|x| x * scale);
                }
            }
            u_blocks.push(u);
            v_blocks.push(v);
        }
        let us = concatenate(Axis(1), &u_blocks.iter().map(|a| a.view()).collect::<Vec<_>>())
            .map_err(|e| anyhow!("concatenation of left factors failed : {}", e))?;
        let vs = concatenate(Axis(1), &v_blocks.iter().map(|a| a.view()).collect::<Vec<_>>())
            .map_err(|e| anyhow!("concatenation of right factors failed : {}", e))?;
        // second stage : joint decomposition of the concatenated factors
        let latent_left = self.select_svd(&us, rng)?;
        let latent_right = if undirected { None } else { Some(self.select_svd(&vs, rng)?) };
        // scores : project each (augmented) graph on the joint positions
        let scores : Vec<Array2<f64>> = graphs_proc.iter().map(|a| {
            match &latent_right {
                Some(right) => latent_left.t().dot(a).dot(right),
                None => latent_left.t().dot(a).dot(&latent_left),
            }
        }).collect();
        //
        self.nb_graphs = Some(nb_graphs);
        self.nb_vertices = Some(nb_vertices);
        self.undirected = Some(undirected);
        self.latent_left = Some(latent_left);
        self.latent_right = latent_right;
        self.scores = Some(scores);
        Ok(())
    } // end of fit


    /// same as [fit](MultipleAse::fit) on a 3-d stack of graphs, outer axis
    /// indexing the graphs.
    pub fn fit_stack(&mut self, stack : &Array3<f64>, rng : &mut Xoshiro256PlusPlus) -> Result<(), anyhow::Error> {
        let graphs : Vec<Array2<f64>> = stack.outer_iter().map(|g| g.to_owned()).collect();
        self.fit(&graphs, rng)
    } // end of fit_stack


    /// Fits and returns the latent positions.
    ///
    /// For an undirected population the second component is None. For a directed
    /// one it holds the right positions, unless concat was asked in which case
    /// left and right are concatenated column wise into the first component.
    pub fn fit_transform(&mut self, graphs : &[Array2<f64>], rng : &mut Xoshiro256PlusPlus) -> Result<(Array2<f64>, Option<Array2<f64>>), anyhow::Error> {
        self.fit(graphs, rng)?;
        let left = self.latent_left.as_ref().unwrap();
        match &self.latent_right {
            None => Ok((left.clone(), None)),
            Some(right) => {
                if self.params.concat {
                    let both = concatenate(Axis(1), &[left.view(), right.view()])
                        .map_err(|e| anyhow!("concatenation of latent positions failed : {}", e))?;
                    Ok((both, None))
                }
                else {
                    Ok((left.clone(), Some(right.clone())))
                }
            },
        }
    } // end of fit_transform

} // end of impl MultipleAse


//========================================================================================


// end of mod tests
