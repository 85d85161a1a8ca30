//! # PawMatch
//!
//! Matches prospective adopters with shelter animals.
//!
//! A handful of preferences (size, age, household, activity, sociability) is
//! turned into a feature vector, a frozen Gaussian mixture predicts which
//! cluster of animals fits, and a fallback cascade picks a short,
//! never-empty list of candidates from that cluster.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! pawmatch --dataset data/pets.csv --model data/model.json --http-port 8501
//! curl -X POST localhost:8501/recommend -H 'content-type: application/json' \
//!   -d '{"size":"small","age":"baby","has_kids":true,"activity":"calm","social":"friendly"}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use pawmatch::prelude::*;
//!
//! let recommender = Recommender::from_paths(
//!     "data/pets.csv",
//!     "data/model.json",
//!     &DatasetConfig::default(),
//!     RecommendConfig::default(),
//! ).unwrap();
//!
//! let prefs = UserPreferences {
//!     size: SizeGroup::Small,
//!     age: AgeGroup::Baby,
//!     has_dogs: false,
//!     has_cats: true,
//!     has_kids: true,
//!     activity: ActivityLevel::Calm,
//!     social: SocialContact::Friendly,
//! };
//! let recommendation = recommender.recommend(&prefs).unwrap();
//! println!("{}: {} candidates", recommendation.cluster_label, recommendation.candidates.len());
//! ```
//!
//! ## Crate Structure
//!
//! - `pawmatch-core` - Feature schema, preferences, dataset, filters
//! - `pawmatch-classifier` - Cluster classifier trait and Gaussian mixture
//! - `pawmatch-recommend` - Selection cascade, labels, cards, application state
//! - `pawmatch-api` - REST API

// Re-export core types
pub use pawmatch_core::{
    ActivityLevel, AgeGroup, AnimalRecord, ClusterId, Dataset, DatasetConfig, Error, Feature,
    FeatureBuilder, FeatureMeans, FeatureVector, Result, SizeGroup, SocialContact,
    UserPreferences,
};

// Re-export the classifier
pub use pawmatch_classifier::{ClusterClassifier, CovarianceType, GaussianMixture};

// Re-export recommendation
pub use pawmatch_recommend::{
    CandidateCard, CandidateSelector, ClusterLabels, DisplayMode, RecommendConfig, Recommendation,
    Recommender, Relaxation, Selection,
};

// Re-export API
pub use pawmatch_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ActivityLevel, AgeGroup, ClusterId, Dataset, DatasetConfig, Error, Result,
        SizeGroup, SocialContact, UserPreferences,
        ClusterClassifier, GaussianMixture,
        RecommendConfig, Recommender, Relaxation,
    };
}
