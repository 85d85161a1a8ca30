//! Output structures handed to the presentation layer
//!
//! Turns selected records into display cards with coarse labels and explains
//! which cluster the candidates came from and what was relaxed.

use crate::selector::Relaxation;
use pawmatch_core::{AnimalRecord, ClusterId, Feature};
use serde::Serialize;

/// Name shown when a record has none
pub const PLACEHOLDER_NAME: &str = "Unnamed pup";
/// Text shown instead of a missing photo
pub const PLACEHOLDER_PHOTO: &str = "No photo available";

/// One candidate as the adopter sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateCard {
    pub row: usize,
    pub name: String,
    pub age: &'static str,
    pub size: &'static str,
    pub energy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_placeholder: Option<&'static str>,
    pub cluster: ClusterId,
}

impl CandidateCard {
    pub fn from_record(record: &AnimalRecord) -> Self {
        Self {
            row: record.row,
            name: record.name.clone().unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            age: age_label(record),
            size: ordinal_label(record.feature(Feature::SizeGroupOrd), ["Small", "Medium", "Large"]),
            energy: ordinal_label(record.feature(Feature::EnergyLevelOrd), ["Low", "Medium", "High"]),
            photo_placeholder: record.photo_url.is_none().then_some(PLACEHOLDER_PHOTO),
            photo_url: record.photo_url.clone(),
            cluster: record.cluster,
        }
    }
}

/// First set age dummy, checked adult, baby, young, senior
fn age_label(record: &AnimalRecord) -> &'static str {
    [
        (Feature::AgeGroupAdult, "Adult"),
        (Feature::AgeGroupBaby, "Baby"),
        (Feature::AgeGroupYoung, "Young"),
        (Feature::AgeGroupSenior, "Senior"),
    ]
    .into_iter()
    .find(|(feature, _)| record.features.is_set(*feature))
    .map(|(_, label)| label)
    .unwrap_or("Unknown")
}

fn ordinal_label(value: f64, labels: [&'static str; 3]) -> &'static str {
    labels
        .iter()
        .enumerate()
        .find(|(code, _)| value == *code as f64)
        .map(|(_, label)| *label)
        .unwrap_or("N/A")
}

/// Full answer to one recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub predicted_cluster: ClusterId,
    pub predicted_label: String,
    /// Posterior probability of the predicted cluster, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Cluster the candidates came from; absent on whole-dataset fallback
    pub matched_cluster: Option<ClusterId>,
    pub cluster_label: String,
    pub relaxation: Relaxation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub pool_size: usize,
    pub candidates: Vec<CandidateCard>,
}

/// Per-cluster summary of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub id: ClusterId,
    pub label: String,
    pub count: usize,
}
