//! To ease the use of the crate by avoiding detailed module paths


pub use crate::simul::{WeightSampler, EdgeWeight, BlockWeights, CommWeights, DegreeCorrection,
    sample_edges, er_np, er_nm, sbm, sbm_with_labels, siem, siem_with_labels, rdpg, p_from_latent,
    sample_edges_corr};

pub use crate::embed::{MatRepr, SvdMode, SvdResult, truncated_svd, select_dimension,
    MultipleAse, MultipleAseParams};

pub use crate::tools::symetry::{symetrize_triu, zero_diagonal, is_almost_symetric};

pub use crate::tools::degrees::{Degree, get_degrees, diagonal_augmentation};
