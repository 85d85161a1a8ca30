//! # PawMatch API
//!
//! REST interface over a shared [`Recommender`](pawmatch_recommend::Recommender):
//!
//! - `GET /health`
//! - `GET /clusters` - clusters present in the dataset with labels and counts
//! - `POST /recommend` - preferences in, predicted cluster and candidates out

pub mod rest;

pub use rest::{RestApi, MAX_LIMIT};
