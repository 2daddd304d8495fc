//! truncated svd of a dense or compressed sparse row matrix.
//!
//! The randomized mode implements the range approximation of :
//!     *Finding Structure with Randomness: Probabilistic Algorithms for Constructing
//!     Approximate Matrix Decompositions*
//!     Halko, Martinsson, Tropp. SIAM Review 2011
//! with a Gaussian test matrix and power iterations re-orthonormalized by QR.
//! The full mode goes through Lapack gesdd on the dense matrix and truncates.


use anyhow::{anyhow};

use num_traits::float::*;
use num_traits::cast::FromPrimitive;

use ndarray::{Array1, Array2, s};

use ndarray_linalg::{Scalar, Lapack, SVD, QR};

use rand::distributions::Distribution;
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256PlusPlus;

use sprs::{CsMatI, prod};


/// how the matrix is stored, dense or compressed sparse row
pub enum MatRepr<F> {
    FULL(Array2<F>),
    CSR(CsMatI<F, usize>),
} // end of enum MatRepr


impl<F> MatRepr<F>
    where F : Float + Scalar<Real = F> + Lapack + ndarray::ScalarOperand + sprs::MulAcc + FromPrimitive + Default + 'static {

    pub fn from_array2(mat : Array2<F>) -> Self {
        MatRepr::FULL(mat)
    }

    pub fn from_csrmat(mat : CsMatI<F, usize>) -> Self {
        assert!(mat.is_csr());
        MatRepr::CSR(mat)
    }

    pub fn shape(&self) -> (usize, usize) {
        match self {
            MatRepr::FULL(mat) => mat.dim(),
            MatRepr::CSR(mat) => mat.shape(),
        }
    }

    /// densifies, used by the full svd mode
    pub fn to_dense(&self) -> Array2<F> {
        match self {
            MatRepr::FULL(mat) => mat.clone(),
            MatRepr::CSR(mat) => mat.to_dense(),
        }
    } // end of to_dense

    // computes self * omega for a dense omega. The csr branch goes through
    // sprs mat vec products column by column and never densifies self.
    pub(crate) fn mat_dot_dense(&self, omega : &Array2<F>) -> Array2<F> {
        match self {
            MatRepr::FULL(mat) => mat.dot(omega),
            MatRepr::CSR(mat) => {
                let (nb_row, _) = mat.shape();
                let nb_col = omega.ncols();
                let mut res = Array2::<F>::zeros((nb_row, nb_col));
                for j in 0..nb_col {
                    let col = omega.column(j).to_vec();
                    let mut out = vec![F::zero(); nb_row];
                    prod::mul_acc_mat_vec_csr(mat.view(), col.as_slice(), out.as_mut_slice());
                    for i in 0..nb_row {
                        res[[i,j]] = out[i];
                    }
                }
                res
            },
        }
    } // end of mat_dot_dense

    // computes transpose(self) * q for a dense q, by accumulation over the
    // stored triplets in the csr branch
    pub(crate) fn t_dot_dense(&self, q : &Array2<F>) -> Array2<F> {
        match self {
            MatRepr::FULL(mat) => mat.t().dot(q),
            MatRepr::CSR(mat) => {
                let (_, nb_col) = mat.shape();
                let k = q.ncols();
                let mut res = Array2::<F>::zeros((nb_col, k));
                for (val, (i, j)) in mat.iter() {
                    for l in 0..k {
                        res[[j,l]] = res[[j,l]] + *val * q[[i,l]];
                    }
                }
                res
            },
        }
    } // end of t_dot_dense

} // end of impl MatRepr


/// the svd algorithm to run
#[derive(Clone, Copy, Debug)]
pub enum SvdMode {
    /// Lapack svd of the densified matrix, truncated afterwards
    Full,
    /// randomized range approximation, nb_iter power iterations
    Randomized { nb_iter : usize },
} // end of enum SvdMode


/// result of a truncated svd. Factors are truncated to the asked rank,
/// singular values are in non increasing order.
pub struct SvdResult<F> {
    /// left singular vectors, dimension (m, rank)
    pub u : Array2<F>,
    /// singular values
    pub s : Array1<F>,
    /// transposed right singular vectors, dimension (rank, n)
    pub vt : Array2<F>,
} // end of struct SvdResult


// gaussian test matrix of the randomized range finder
fn gaussian_matrix<F>(nb_row : usize, nb_col : usize, rng : &mut Xoshiro256PlusPlus) -> Array2<F>
    where F : Float + FromPrimitive {
    let mut omega = Array2::<F>::zeros((nb_row, nb_col));
    for v in omega.iter_mut() {
        let xsi : f64 = StandardNormal.sample(rng);
        *v = F::from_f64(xsi).unwrap();
    }
    omega
} // end of gaussian_matrix


/// computes a rank truncated svd of mat.
/// rank is capped at min(nb_row, nb_col). The randomized mode only touches mat
/// through matrix products so the csr representation is never densified.
pub fn truncated_svd<F>(mat : &MatRepr<F>, rank : usize, mode : SvdMode, rng : &mut Xoshiro256PlusPlus) -> Result<SvdResult<F>, anyhow::Error>
    where F : Float + Scalar<Real = F> + Lapack + ndarray::ScalarOperand + sprs::MulAcc + FromPrimitive + Default + 'static {
    //
    let (nb_row, nb_col) = mat.shape();
    if rank == 0 {
        return Err(anyhow!("rank must be > 0"));
    }
    let rank = rank.min(nb_row.min(nb_col));
    //
    match mode {
        SvdMode::Full => {
            let dense = mat.to_dense();
            let (u, sigma, vt) = dense.svd(true, true)
                .map_err(|e| anyhow!("lapack svd failed : {}", e))?;
            let u = u.unwrap();
            let vt = vt.unwrap();
            Ok(SvdResult {
                u : u.slice(s![.., ..rank]).to_owned(),
                s : sigma.slice(s![..rank]).to_owned(),
                vt : vt.slice(s![..rank, ..]).to_owned(),
            })
        },
        SvdMode::Randomized { nb_iter } => {
            // oversampled range finder
            let l = (rank + 10).min(nb_row.min(nb_col));
            let omega = gaussian_matrix::<F>(nb_col, l, rng);
            let y = mat.mat_dot_dense(&omega);
            let (mut q, _) = y.qr().map_err(|e| anyhow!("qr failed in range finder : {}", e))?;
            // power iterations, re-orthonormalized at each half step to avoid
            // collapse of the small singular directions
            for iter in 0..nb_iter {
                let z = mat.t_dot_dense(&q);
                let (qz, _) = z.qr().map_err(|e| anyhow!("qr failed at power iteration {} : {}", iter, e))?;
                let y = mat.mat_dot_dense(&qz);
                let (qy, _) = y.qr().map_err(|e| anyhow!("qr failed at power iteration {} : {}", iter, e))?;
                q = qy;
            }
            // svd of the small projected matrix b = transpose(q) * mat, of dimension (l, nb_col)
            let bt = mat.t_dot_dense(&q);
            let b = bt.t().to_owned();
            let (u_b, sigma, vt) = b.svd(true, true)
                .map_err(|e| anyhow!("lapack svd failed on projected matrix : {}", e))?;
            let u = q.dot(&u_b.unwrap());
            let vt = vt.unwrap();
            log::trace!("randomized svd : asked rank {}, sketch size {}, first sigma {:.3e}", rank, l, sigma[0].to_f64().unwrap());
            Ok(SvdResult {
                u : u.slice(s![.., ..rank]).to_owned(),
                s : sigma.slice(s![..rank]).to_owned(),
                vt : vt.slice(s![..rank, ..]).to_owned(),
            })
        },
    }
} // end of truncated_svd


//========================================================================================


// end of mod tests
