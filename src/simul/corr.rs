//! correlated Bernoulli graph pair sampler.
//!
//! Based on the construction used in :
//!     *Seeded Graph Matching for Correlated Erdos-Renyi Graphs*
//!     Lyzinski, Fishkind, Priebe. JMLR 15, 2014


use anyhow::{anyhow};

use ndarray::{Array2, Zip};

use rand_xoshiro::Xoshiro256PlusPlus;

use super::sampling::sample_edges;


/// Generates a pair of correlated binary graphs with common marginal law
/// Bernoulli(p) and cellwise Pearson correlation r.
///
/// The first graph g1 is drawn from p. The second is drawn from the conditional
/// probability matrix p2 with p2 = p + r (1 - p) on the cells where g1 has an
/// edge and p2 = p (1 - r) elsewhere, which gives the requested marginal and
/// correlation. As r goes to 0 the two graphs become independent draws from p,
/// as r goes to 1 they coincide.
pub fn sample_edges_corr(p : &Array2<f64>, r : &Array2<f64>, directed : bool, loops : bool,
        rng : &mut Xoshiro256PlusPlus) -> Result<(Array2<f64>, Array2<f64>), anyhow::Error> {
    if p.dim() != r.dim() {
        return Err(anyhow!("p and r must have the same dimensions, got {:?} and {:?}", p.dim(), r.dim()));
    }
    //
    let g1 = sample_edges(p, directed, loops, rng)?;
    let mut p2 = Array2::<f64>::zeros(p.dim());
    Zip::from(&mut p2).and(&g1).and(p).and(r).for_each(|p2, &g, &p, &r| {
        *p2 = if g == 1. { p + r * (1. - p) } else { p * (1. - r) };
    });
    let g2 = sample_edges(&p2, directed, loops, rng)?;
    Ok((g1, g2))
} // end of sample_edges_corr


//========================================================================================


// end of mod tests
