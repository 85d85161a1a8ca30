use crate::schema::{Feature, FEATURE_COUNT};
use serde::Serialize;
use std::ops::Index;

/// A fully populated feature record in training order.
///
/// The only constructors walk [`Feature::ALL`], so a vector can never be
/// missing a field or hold them in a different order than the model expects.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FeatureVector {
    data: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build a vector by asking `f` for every field in training order
    #[inline]
    #[must_use]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Feature) -> f64,
    {
        let mut data = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            data[feature.index()] = f(feature);
        }
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        self.data[feature.index()]
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        FEATURE_COUNT
    }

    /// True when a 0/1 flag column is set
    #[inline]
    pub fn is_set(&self, feature: Feature) -> bool {
        self.get(feature) == 1.0
    }

    /// True when an ordinal column holds exactly `code`.
    /// Missing (NaN) cells never match.
    #[inline]
    pub fn has_code(&self, feature: Feature, code: u8) -> bool {
        self.get(feature) == f64::from(code)
    }

    /// True when every field holds a finite number
    pub fn is_complete(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

impl Index<Feature> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.data[feature.index()]
    }
}
