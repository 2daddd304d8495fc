//! weighted degrees and diagonal augmentation for dense adjacency matrices


use ndarray::{Array1, Array2};


/// first component is in, second component is out!
/// For a weighted graph degrees accumulate edge weights.
#[derive(Copy, Clone, Debug)]
pub struct Degree {
    pub d_in : f64,
    pub d_out : f64,
}

impl Degree {
    fn new(d_in : f64, d_out : f64) -> Self { Degree{d_in, d_out} }
    /// get degree in
    pub fn degree_in(&self) -> f64 { self.d_in }
    /// get degree out
    pub fn degree_out(&self) -> f64 { self.d_out }
}  // end of impl Degree


/// returns the weighted (in, out) degrees of each vertex.
/// Self loops are not taken into account.
pub fn get_degrees(a : &Array2<f64>) -> Vec<Degree> {
    let (nb_row, nb_col) = a.dim();
    assert_eq!(nb_row, nb_col);
    let mut degrees = (0..nb_row).map(|_| Degree::new(0., 0.)).collect::<Vec<Degree>>();
    for i in 0..nb_row {
        for j in 0..nb_col {
            if i != j {
                degrees[i].d_out += a[[i,j]];
                degrees[j].d_in += a[[i,j]];
            }
        }
    }
    degrees
}  // end of get_degrees


/// takes an adjacency matrix and replaces its diagonal by the mean of in and out
/// weighted degree of each vertex divided by nb_nodes - 1.
/// This reduces the bias of spectral embeddings of loopless graphs.
pub fn diagonal_augmentation(a : &Array2<f64>) -> Array2<f64> {
    let nb_nodes = a.nrows();
    assert_eq!(nb_nodes, a.ncols());
    //
    let degrees = get_degrees(a);
    let divisor = (nb_nodes - 1).max(1) as f64;
    let diag = Array1::from_iter(degrees.iter().map(|d| 0.5 * (d.d_in + d.d_out) / divisor));
    //
    let mut augmented = a.clone();
    for i in 0..nb_nodes {
        augmented[[i,i]] = diag[i];
    }
    log::trace!("diagonal_augmentation mean diag : {:.3e}", diag.sum() / nb_nodes as f64);
    augmented
} // end of diagonal_augmentation


//========================================================================================


// end of mod tests
