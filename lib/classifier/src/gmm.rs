//! Gaussian mixture model
//!
//! Scores each component with `log w_k + log N(x | mu_k, Sigma_k)` using the
//! Cholesky factors of the precision matrices and predicts the argmax.

use crate::classifier::ClusterClassifier;
use pawmatch_core::{ClusterId, Error, Feature, FeatureVector, Result, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Covariance parameterisation of the mixture
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CovarianceType {
    /// One full matrix per component; factors are `k x d x d`
    Full,
    /// One full matrix shared by all components; factor is `d x d`
    Tied,
    /// Diagonal per component; factors are `k x d`
    Diag,
    /// Single variance per component; factors are `k`
    Spherical,
}

/// On-disk form of a trained mixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub covariance_type: CovarianceType,
    pub weights: Vec<f64>,
    pub means: Vec<Vec<f64>>,
    /// Shape depends on `covariance_type`
    pub precisions_cholesky: serde_json::Value,
    /// Training column order; checked against the feature schema when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Cluster id per component; defaults to the component index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_ids: Option<Vec<i64>>,
    /// Display names per cluster id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cluster_names: BTreeMap<i64, String>,
}

#[derive(Debug, Clone)]
enum Precision {
    /// Upper-triangular Cholesky factor of the precision matrix, row-major
    Full(Vec<f64>),
    Diag(Vec<f64>),
    Spherical(f64),
}

#[derive(Debug, Clone)]
struct Component {
    cluster: ClusterId,
    log_weight: f64,
    mean: Vec<f64>,
    precision: Precision,
    /// log-determinant of the precision Cholesky factor
    log_det: f64,
}

impl Component {
    fn log_score(&self, x: &[f64]) -> f64 {
        let d = self.mean.len();
        let mahalanobis = match &self.precision {
            Precision::Full(chol) => {
                let mut total = 0.0;
                for j in 0..d {
                    let mut y = 0.0;
                    for i in 0..d {
                        y += (x[i] - self.mean[i]) * chol[i * d + j];
                    }
                    total += y * y;
                }
                total
            }
            Precision::Diag(chol) => x
                .iter()
                .zip(&self.mean)
                .zip(chol)
                .map(|((xi, mi), pi)| {
                    let y = (xi - mi) * pi;
                    y * y
                })
                .sum(),
            Precision::Spherical(chol) => {
                let sq: f64 = x.iter().zip(&self.mean).map(|(xi, mi)| (xi - mi) * (xi - mi)).sum();
                chol * chol * sq
            }
        };
        -0.5 * (d as f64 * LN_2PI + mahalanobis) + self.log_det + self.log_weight
    }
}

/// A frozen Gaussian mixture over the feature schema
#[derive(Debug, Clone)]
pub struct GaussianMixture {
    covariance_type: CovarianceType,
    components: Vec<Component>,
    cluster_names: BTreeMap<ClusterId, String>,
}

impl GaussianMixture {
    /// Load and validate a model artifact. Any failure is fatal to startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&text)?;
        info!(
            "Loaded {:?} Gaussian mixture with {} components from {:?}",
            model.covariance_type,
            model.components.len(),
            path
        );
        Ok(model)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(text).map_err(|e| Error::Model(format!("invalid model artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        if let Some(names) = &artifact.feature_names {
            if let Some(unknown) = names.iter().find(|n| Feature::from_name(n).is_none()) {
                return Err(Error::SchemaMismatch(format!(
                    "model was trained on unknown feature '{}'",
                    unknown
                )));
            }
            let expected = Feature::names();
            if names.len() != expected.len() || names.iter().zip(&expected).any(|(a, b)| a != b) {
                return Err(Error::SchemaMismatch(format!(
                    "model was trained on {:?}, expected {:?}",
                    names, expected
                )));
            }
        }

        let k = artifact.weights.len();
        if k == 0 {
            return Err(Error::Model("mixture has no components".to_string()));
        }
        if artifact.means.len() != k {
            return Err(Error::Model(format!(
                "expected {} component means, got {}",
                k,
                artifact.means.len()
            )));
        }
        for (idx, mean) in artifact.means.iter().enumerate() {
            if mean.len() != FEATURE_COUNT {
                return Err(Error::SchemaMismatch(format!(
                    "component {} mean has {} dimensions, expected {}",
                    idx,
                    mean.len(),
                    FEATURE_COUNT
                )));
            }
        }
        if let Some(w) = artifact.weights.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(Error::Model(format!("invalid component weight {}", w)));
        }

        let cluster_ids: Vec<ClusterId> = match &artifact.cluster_ids {
            Some(ids) if ids.len() != k => {
                return Err(Error::Model(format!("expected {} cluster ids, got {}", k, ids.len())));
            }
            Some(ids) => ids.iter().copied().map(ClusterId).collect(),
            None => (0..k as i64).map(ClusterId).collect(),
        };

        let precisions = parse_precisions(artifact.covariance_type, &artifact.precisions_cholesky, k)?;

        let components = precisions
            .into_iter()
            .enumerate()
            .map(|(idx, precision)| {
                let det = log_det(&precision)?;
                Ok(Component {
                    cluster: cluster_ids[idx],
                    log_weight: artifact.weights[idx].ln(),
                    mean: artifact.means[idx].clone(),
                    precision,
                    log_det: det,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cluster_names = artifact
            .cluster_names
            .into_iter()
            .map(|(id, name)| (ClusterId(id), name))
            .collect();

        Ok(Self {
            covariance_type: artifact.covariance_type,
            components,
            cluster_names,
        })
    }

    pub fn covariance_type(&self) -> CovarianceType {
        self.covariance_type
    }

    /// Display names shipped with the model, possibly empty
    pub fn cluster_names(&self) -> &BTreeMap<ClusterId, String> {
        &self.cluster_names
    }

    /// Weighted log-likelihood of `features` under each component
    pub fn log_scores(&self, features: &FeatureVector) -> Vec<f64> {
        let x = features.as_slice();
        self.components.iter().map(|c| c.log_score(x)).collect()
    }
}

impl ClusterClassifier for GaussianMixture {
    fn predict(&self, features: &FeatureVector) -> ClusterId {
        let scores = self.log_scores(features);
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate() {
            // strict comparison keeps the lowest index on ties
            if *score > scores[best] || scores[best].is_nan() {
                best = idx;
            }
        }
        self.components[best].cluster
    }

    fn probabilities(&self, features: &FeatureVector) -> Option<Vec<(ClusterId, f64)>> {
        let scores = self.log_scores(features);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return None;
        }
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        Some(
            self.components
                .iter()
                .zip(exp)
                .map(|(c, e)| (c.cluster, e / total))
                .collect(),
        )
    }

    fn n_clusters(&self) -> usize {
        self.components.len()
    }
}

fn parse_precisions(covariance_type: CovarianceType, raw: &serde_json::Value, k: usize) -> Result<Vec<Precision>> {
    let d = FEATURE_COUNT;
    let shape_error = |what: &str| Error::Model(format!("precisions_cholesky for {:?}: {}", covariance_type, what));
    let decode = |what: &str| shape_error(&format!("expected {}", what));

    match covariance_type {
        CovarianceType::Full => {
            let mats: Vec<Vec<Vec<f64>>> =
                serde_json::from_value(raw.clone()).map_err(|_| decode("k x d x d array"))?;
            if mats.len() != k {
                return Err(shape_error(&format!("{} matrices for {} components", mats.len(), k)));
            }
            mats.into_iter().map(|m| flatten_square(m, d).map(Precision::Full)).collect::<Result<_>>()
        }
        CovarianceType::Tied => {
            let mat: Vec<Vec<f64>> = serde_json::from_value(raw.clone()).map_err(|_| decode("d x d array"))?;
            let flat = flatten_square(mat, d)?;
            Ok((0..k).map(|_| Precision::Full(flat.clone())).collect())
        }
        CovarianceType::Diag => {
            let rows: Vec<Vec<f64>> = serde_json::from_value(raw.clone()).map_err(|_| decode("k x d array"))?;
            if rows.len() != k || rows.iter().any(|r| r.len() != d) {
                return Err(shape_error(&format!("shape must be {} x {}", k, d)));
            }
            Ok(rows.into_iter().map(Precision::Diag).collect())
        }
        CovarianceType::Spherical => {
            let values: Vec<f64> = serde_json::from_value(raw.clone()).map_err(|_| decode("k array"))?;
            if values.len() != k {
                return Err(shape_error(&format!("{} values for {} components", values.len(), k)));
            }
            Ok(values.into_iter().map(Precision::Spherical).collect())
        }
    }
}

fn flatten_square(mat: Vec<Vec<f64>>, d: usize) -> Result<Vec<f64>> {
    if mat.len() != d || mat.iter().any(|row| row.len() != d) {
        return Err(Error::SchemaMismatch(format!("precision factor must be {} x {}", d, d)));
    }
    Ok(mat.into_iter().flatten().collect())
}

fn log_det(precision: &Precision) -> Result<f64> {
    let diagonal: Vec<f64> = match precision {
        Precision::Full(chol) => (0..FEATURE_COUNT).map(|i| chol[i * FEATURE_COUNT + i]).collect(),
        Precision::Diag(chol) => chol.clone(),
        Precision::Spherical(chol) => vec![*chol; FEATURE_COUNT],
    };
    if let Some(bad) = diagonal.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
        return Err(Error::Model(format!("precision factor has non-positive diagonal entry {}", bad)));
    }
    Ok(diagonal.iter().map(|v| v.ln()).sum())
}
