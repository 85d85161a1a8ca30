use crate::schema::Feature;
use crate::vector::FeatureVector;
use serde::{Deserialize, Serialize};

/// Cluster label assigned by the mixture model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub i64);

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClusterId {
    fn from(id: i64) -> Self {
        ClusterId(id)
    }
}

/// One animal from the shelter dataset
#[derive(Debug, Clone, Serialize)]
pub struct AnimalRecord {
    /// Zero-based position in the dataset file
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub features: FeatureVector,
    /// Precomputed at dataset build time, never recomputed here
    pub cluster: ClusterId,
}

impl AnimalRecord {
    #[inline]
    #[must_use]
    pub fn new(row: usize, features: FeatureVector, cluster: ClusterId) -> Self {
        Self {
            row,
            name: None,
            photo_url: None,
            features,
            cluster,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_photo(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    #[inline]
    pub fn feature(&self, feature: Feature) -> f64 {
        self.features.get(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let record = AnimalRecord::new(3, FeatureVector::from_fn(|_| 0.0), ClusterId(2))
            .with_name("Canela")
            .with_photo("https://example.org/canela.jpg");
        assert_eq!(record.row, 3);
        assert_eq!(record.name.as_deref(), Some("Canela"));
        assert_eq!(record.cluster, ClusterId(2));
        assert_eq!(record.feature(Feature::SizeGroupOrd), 0.0);
    }

    #[test]
    fn test_cluster_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ClusterId(4)).unwrap(), "4");
        assert_eq!(ClusterId(-1).to_string(), "-1");
    }
}
