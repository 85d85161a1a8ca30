//! # PawMatch Classifier
//!
//! The frozen clustering model that maps a [`FeatureVector`] to a cluster.
//!
//! The service only ever calls [`ClusterClassifier::predict`]; training happens
//! elsewhere and the result is shipped as a JSON model artifact holding the
//! mixture parameters in the layout scikit-learn exports them:
//!
//! ```json
//! {
//!   "covariance_type": "diag",
//!   "weights": [0.6, 0.4],
//!   "means": [[...25 values...], [...25 values...]],
//!   "precisions_cholesky": [[...25 values...], [...25 values...]],
//!   "feature_names": ["adoptionFee", "num_breeds", "..."],
//!   "cluster_names": {"0": "Sociable and calm"}
//! }
//! ```
//!
//! [`FeatureVector`]: pawmatch_core::FeatureVector

pub mod classifier;
pub mod gmm;

pub use classifier::ClusterClassifier;
pub use gmm::{CovarianceType, GaussianMixture, ModelArtifact};
