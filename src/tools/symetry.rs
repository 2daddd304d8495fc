//! symmetrization and symmetry tests on dense adjacency matrices


use anyhow::{anyhow};

use ndarray::{Array2};


/// mirrors the upper triangle (diagonal included) onto the lower triangle so that
/// a single draw governs both a\[i,j\] and a\[j,i\].
/// The previous content of the lower triangle is discarded.
pub fn symetrize_triu(a : &mut Array2<f64>) {
    let (nb_row, nb_col) = a.dim();
    assert_eq!(nb_row, nb_col);
    for i in 0..nb_row {
        for j in 0..i {
            a[[i,j]] = a[[j,i]];
        }
    }
} // end of symetrize_triu


/// set the diagonal to 0. Used when self loops are not sampled.
pub fn zero_diagonal(a : &mut Array2<f64>) {
    let n = a.nrows().min(a.ncols());
    for i in 0..n {
        a[[i,i]] = 0.;
    }
} // end of zero_diagonal


/// tests whether a square matrix is symetric up to tolerance epsil.
pub fn is_almost_symetric(a : &Array2<f64>, epsil : f64) -> bool {
    let (nb_row, nb_col) = a.dim();
    if nb_row != nb_col {
        return false;
    }
    for i in 0..nb_row {
        for j in 0..i {
            if (a[[i,j]] - a[[j,i]]).abs() > epsil {
                return false;
            }
        }
    }
    true
} // end of is_almost_symetric


/// checks a probability matrix : square and entries in \[0,1\]
pub fn check_probability_matrix(p : &Array2<f64>, name : &str) -> Result<(), anyhow::Error> {
    let (nb_row, nb_col) = p.dim();
    if nb_row != nb_col {
        return Err(anyhow!("{} must be a square matrix, got dimensions ({}, {})", name, nb_row, nb_col));
    }
    if p.iter().any(|&x| !(0. ..=1.).contains(&x)) {
        return Err(anyhow!("values in {} must be in between 0 and 1", name));
    }
    Ok(())
} // end of check_probability_matrix


//========================================================================================


#[cfg(test)]
mod tests {

#[allow(unused)]
use super::*;

#[allow(dead_code)]
fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_symetrize_triu() {
    log_init_test();
    //
    let mut a = ndarray::arr2(&[ [1., 2., 3.],
                                 [9., 1., 4.],
                                 [9., 9., 1.] ]);
    symetrize_triu(&mut a);
    assert!(is_almost_symetric(&a, 0.));
    assert_eq!(a[[1,0]], 2.);
    assert_eq!(a[[2,0]], 3.);
    assert_eq!(a[[2,1]], 4.);
} // end of test_symetrize_triu


#[test]
fn test_is_almost_symetric() {
    log_init_test();
    //
    let a = ndarray::arr2(&[ [0., 1.], [1., 0.] ]);
    assert!(is_almost_symetric(&a, 1.0E-10));
    let b = ndarray::arr2(&[ [0., 1.], [0.5, 0.] ]);
    assert!(!is_almost_symetric(&b, 1.0E-10));
} // end of test_is_almost_symetric


#[test]
fn test_check_probability_matrix() {
    log_init_test();
    //
    let p = ndarray::arr2(&[ [0.5, 0.1], [0.1, 0.5] ]);
    assert!(check_probability_matrix(&p, "p").is_ok());
    let bad = ndarray::arr2(&[ [0.5, 1.1], [0.1, 0.5] ]);
    assert!(check_probability_matrix(&bad, "p").is_err());
    let rect = Array2::<f64>::zeros((2,3));
    assert!(check_probability_matrix(&rect, "p").is_err());
} // end of test_check_probability_matrix


}  // end of mod tests
