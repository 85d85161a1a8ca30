//! Application state
//!
//! Dataset, model, labels and selection config, built once at startup and
//! shared read-only by every request.

use crate::config::RecommendConfig;
use crate::explain::{CandidateCard, ClusterSummary, Recommendation};
use crate::labels::ClusterLabels;
use crate::selector::CandidateSelector;
use pawmatch_classifier::{ClusterClassifier, GaussianMixture};
use pawmatch_core::{
    ClusterId, Dataset, DatasetConfig, FeatureBuilder, FeatureVector, Result, UserPreferences,
};
use std::path::Path;
use tracing::{debug, info};

pub struct Recommender {
    dataset: Dataset,
    classifier: Box<dyn ClusterClassifier>,
    labels: ClusterLabels,
    selector: CandidateSelector,
}

impl Recommender {
    pub fn new(
        dataset: Dataset,
        classifier: Box<dyn ClusterClassifier>,
        labels: ClusterLabels,
        config: RecommendConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dataset,
            classifier,
            labels,
            selector: CandidateSelector::new(config),
        })
    }

    /// Load the dataset and the mixture model from disk
    pub fn from_paths<P, Q>(
        dataset_path: P,
        model_path: Q,
        dataset_config: &DatasetConfig,
        config: RecommendConfig,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let dataset = Dataset::load(dataset_path, dataset_config)?;
        let model = GaussianMixture::load(model_path)?;
        let labels = ClusterLabels::default().with_overrides(model.cluster_names());
        info!(
            "Recommender ready: {} animals, {} model clusters, display count {}",
            dataset.len(),
            model.n_clusters(),
            config.display_count
        );
        Self::new(dataset, Box::new(model), labels, config)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn labels(&self) -> &ClusterLabels {
        &self.labels
    }

    pub fn config(&self) -> &RecommendConfig {
        self.selector.config()
    }

    /// Model input for a set of preferences
    pub fn features(&self, prefs: &UserPreferences) -> FeatureVector {
        FeatureBuilder::new(self.dataset.means()).build(prefs)
    }

    /// Predicted cluster and, when the model provides it, its probability
    pub fn predict(&self, prefs: &UserPreferences) -> (ClusterId, Option<f64>) {
        let features = self.features(prefs);
        let cluster = self.classifier.predict(&features);
        let confidence = self
            .classifier
            .probabilities(&features)
            .and_then(|probs| probs.into_iter().find(|(c, _)| *c == cluster).map(|(_, p)| p));
        (cluster, confidence)
    }

    /// Recommend with the configured display count
    pub fn recommend(&self, prefs: &UserPreferences) -> Result<Recommendation> {
        self.recommend_limited(prefs, self.config().display_count)
    }

    /// Recommend at most `limit` candidates
    pub fn recommend_limited(&self, prefs: &UserPreferences, limit: usize) -> Result<Recommendation> {
        let (predicted, confidence) = self.predict(prefs);
        let selection = self.selector.select_limited(&self.dataset, predicted, prefs, limit)?;

        debug!(
            "Predicted cluster {} -> matched {:?} ({:?}), {} candidates",
            predicted,
            selection.matched_cluster,
            selection.relaxation,
            selection.len()
        );

        Ok(Recommendation {
            predicted_cluster: predicted,
            predicted_label: self.labels.label(predicted).to_string(),
            confidence,
            matched_cluster: selection.matched_cluster,
            cluster_label: self.labels.matched_label(selection.matched_cluster).to_string(),
            relaxation: selection.relaxation,
            notice: selection.relaxation.notice(),
            pool_size: selection.pool_size,
            candidates: selection.records.iter().map(|r| CandidateCard::from_record(r)).collect(),
        })
    }

    /// Clusters present in the dataset, first-seen order
    pub fn cluster_summary(&self) -> Vec<ClusterSummary> {
        self.dataset
            .clusters()
            .into_iter()
            .map(|(id, count)| ClusterSummary {
                id,
                label: self.labels.label(id).to_string(),
                count,
            })
            .collect()
    }
}
