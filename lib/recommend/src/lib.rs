//! # PawMatch Recommend
//!
//! Turns a predicted cluster and an adopter's preferences into a short list
//! of animals.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Preferences │────>│  Features   │────>│ Classifier  │
//! │  (request)  │     │ (+ means)   │     │  (predict)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │              ┌─────────────┐           │
//!       └─────────────>│  Selector   │<──────────┘
//!                      │ (cascade)   │
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │   Cards     │
//!                      │ (+ labels)  │
//!                      └─────────────┘
//! ```
//!
//! The selector never returns an empty list for a non-empty dataset: when
//! the predicted cluster has nothing for the requested age it tries sibling
//! clusters, and as a last resort the whole dataset. The [`Relaxation`] on
//! each result says which constraint was dropped.

pub mod config;
pub mod labels;
pub mod selector;
pub mod explain;
pub mod recommender;

pub use config::{DisplayMode, RecommendConfig, DEFAULT_DISPLAY_COUNT};
pub use labels::{ClusterLabels, GENERAL_LABEL, UNKNOWN_LABEL};
pub use selector::{CandidateSelector, Relaxation, Selection};
pub use explain::{CandidateCard, ClusterSummary, Recommendation, PLACEHOLDER_NAME, PLACEHOLDER_PHOTO};
pub use recommender::Recommender;
