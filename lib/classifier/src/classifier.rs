use pawmatch_core::{ClusterId, FeatureVector};

/// A trained model that assigns a feature vector to one cluster.
///
/// Implementations are immutable after loading and shared across requests.
pub trait ClusterClassifier: Send + Sync {
    /// The most likely cluster for `features`. Deterministic.
    fn predict(&self, features: &FeatureVector) -> ClusterId;

    /// Posterior membership per cluster, when the model can provide it
    fn probabilities(&self, _features: &FeatureVector) -> Option<Vec<(ClusterId, f64)>> {
        None
    }

    /// Number of clusters the model knows about
    fn n_clusters(&self) -> usize;
}

impl<T: ClusterClassifier + ?Sized> ClusterClassifier for Box<T> {
    fn predict(&self, features: &FeatureVector) -> ClusterId {
        (**self).predict(features)
    }

    fn probabilities(&self, features: &FeatureVector) -> Option<Vec<(ClusterId, f64)>> {
        (**self).probabilities(features)
    }

    fn n_clusters(&self) -> usize {
        (**self).n_clusters()
    }
}
