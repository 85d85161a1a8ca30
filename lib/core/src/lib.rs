//! # PawMatch Core
//!
//! Core library for the PawMatch adoption matcher.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Feature`] - The ordered training schema of the cluster model
//! - [`FeatureVector`] - A complete, correctly ordered model input
//! - [`UserPreferences`] - Closed enumerations for every adopter choice
//! - [`FeatureBuilder`] - Preferences plus dataset means to feature vector
//! - [`Dataset`] - The static shelter table loaded from CSV
//! - [`RecordFilter`] - Cluster, age and size filters over records
//!
//! ## Example
//!
//! ```rust
//! use pawmatch_core::{
//!     ActivityLevel, AgeGroup, Feature, FeatureBuilder, FeatureMeans, SizeGroup,
//!     SocialContact, UserPreferences,
//! };
//!
//! let prefs = UserPreferences {
//!     size: SizeGroup::Medium,
//!     age: AgeGroup::Young,
//!     has_dogs: true,
//!     has_cats: false,
//!     has_kids: true,
//!     activity: ActivityLevel::Active,
//!     social: SocialContact::Friendly,
//! };
//!
//! let means = FeatureMeans::from_values([0.5; 25]);
//! let vector = FeatureBuilder::new(&means).build(&prefs);
//! assert_eq!(vector[Feature::SizeGroupOrd], 1.0);
//! assert_eq!(vector[Feature::AdoptionFee], 0.5);
//! ```

pub mod error;
pub mod schema;
pub mod vector;
pub mod preferences;
pub mod features;
pub mod record;
pub mod dataset;
pub mod filter;

pub use error::{Error, Result};
pub use schema::{Feature, FieldSource, FEATURE_COUNT};
pub use vector::FeatureVector;
pub use preferences::{ActivityLevel, AgeGroup, SizeGroup, SocialContact, UserPreferences};
pub use features::{build_features, FeatureBuilder, FeatureMeans};
pub use record::{AnimalRecord, ClusterId};
pub use dataset::{Dataset, DatasetConfig};
pub use filter::{Filter, FilterCondition, RecordFilter};
