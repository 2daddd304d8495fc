//! elbow selection on a scree plot by Gaussian profile likelihood.
//!
//! Implements the method of :
//!     *Automatic dimensionality selection from the scree plot via the use of
//!     profile likelihood*
//!     Zhu, Ghodsi. Computational Statistics and Data Analysis 51, 2006
//!
//! The singular value profile is split at every candidate position, each side is
//! modeled as a Gaussian sample with its own mean and a pooled variance, and the
//! split maximizing the total log likelihood is the elbow. Successive elbows are
//! found by recursing on the tail of the profile.


use anyhow::{anyhow};

use ndarray::{Array1};


// log density of a normal distribution at x
fn norm_logpdf(x : f64, mu : f64, sigma : f64) -> f64 {
    let z = (x - mu) / sigma;
    -0.5 * z * z - sigma.ln() - 0.5 * (2. * std::f64::consts::PI).ln()
} // end of norm_logpdf


// profile log likelihood of every split position of arr.
// likelihood[idx - 1] corresponds to the split (arr[..idx], arr[idx..])
fn compute_likelihood(arr : &[f64]) -> Vec<f64> {
    let nb_elements = arr.len();
    let mut likelihoods = vec![f64::NEG_INFINITY; nb_elements];
    for idx in 1..=nb_elements {
        let s1 = &arr[..idx];
        let s2 = &arr[idx..];
        if s1.len() == 1 && s2.len() == 1 {
            continue;
        }
        let mu1 = s1.iter().sum::<f64>() / s1.len() as f64;
        let mu2 = if !s2.is_empty() { s2.iter().sum::<f64>() / s2.len() as f64 } else { 0. };
        // pooled variance of the two sides
        let ss1 = s1.iter().map(|x| (x - mu1) * (x - mu1)).sum::<f64>();
        let ss2 = s2.iter().map(|x| (x - mu2) * (x - mu2)).sum::<f64>();
        let divisor = nb_elements as i64 - 1 - i64::from(idx < nb_elements);
        if divisor <= 0 {
            continue;
        }
        let variance = (ss1 + ss2) / divisor as f64;
        if !(variance > 0.) {
            continue;
        }
        let sigma = variance.sqrt();
        likelihoods[idx - 1] = s1.iter().map(|&x| norm_logpdf(x, mu1, sigma)).sum::<f64>()
            + s2.iter().map(|&x| norm_logpdf(x, mu2, sigma)).sum::<f64>();
    }
    likelihoods
} // end of compute_likelihood


// first position of the maximum
fn argmax(values : &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
} // end of argmax


/// Finds up to n_elbows elbows of a non increasing singular value profile and
/// returns them as 1 based dimensions, best candidates first.
/// Fewer than n_elbows values are returned when the profile runs out.
pub fn select_dimension(s : &Array1<f64>, n_elbows : usize) -> Result<Vec<usize>, anyhow::Error> {
    if n_elbows == 0 {
        return Err(anyhow!("n_elbows must be > 0"));
    }
    if s.is_empty() {
        return Err(anyhow!("cannot select a dimension from an empty singular value profile"));
    }
    if s.iter().any(|&x| x < 0.) {
        return Err(anyhow!("singular values must be non negative"));
    }
    let values = s.to_vec();
    //
    let mut elbows = Vec::<usize>::with_capacity(n_elbows);
    let mut idx = 0usize;
    for _ in 0..n_elbows {
        let arr = &values[idx..];
        if arr.is_empty() {
            break;
        }
        let likelihoods = compute_likelihood(arr);
        idx += argmax(&likelihoods) + 1;
        elbows.push(idx);
        if idx == values.len() {
            break;
        }
    }
    log::debug!("select_dimension elbows : {:?}", elbows);
    Ok(elbows)
} // end of select_dimension


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
fn test_two_scale_profile() {
    log_init_test();
    // three large values then a flat noise floor, the first elbow is at 3
    let s = ndarray::arr1(&[10., 9.8, 9.5, 1., 0.95, 0.9, 0.85, 0.8]);
    let elbows = select_dimension(&s, 2).unwrap();
    assert_eq!(elbows[0], 3);
    assert!(elbows.len() <= 2);
} // end of test_two_scale_profile


#[test]
fn test_elbow_errors() {
    log_init_test();
    //
    let s = ndarray::arr1(&[3., 2., 1.]);
    assert!(select_dimension(&s, 0).is_err());
    let empty = Array1::<f64>::zeros(0);
    assert!(select_dimension(&empty, 2).is_err());
    let negative = ndarray::arr1(&[3., -1.]);
    assert!(select_dimension(&negative, 1).is_err());
} // end of test_elbow_errors


#[test]
fn test_elbows_are_increasing() {
    log_init_test();
    //
    let s = ndarray::arr1(&[20., 19., 18., 5., 4.8, 4.6, 1., 0.9, 0.8, 0.7]);
    let elbows = select_dimension(&s, 3).unwrap();
    for w in elbows.windows(2) {
        assert!(w[1] > w[0]);
    }
    assert!(*elbows.last().unwrap() <= s.len());
} // end of test_elbows_are_increasing


#[test]
fn test_single_value_profile() {
    log_init_test();
    // a one element profile yields the only possible dimension
    let s = ndarray::arr1(&[4.]);
    let elbows = select_dimension(&s, 2).unwrap();
    assert_eq!(elbows, vec![1]);
} // end of test_single_value_profile


}  // end of mod tests
