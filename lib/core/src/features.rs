//! Feature vector builder
//!
//! Turns a set of [`UserPreferences`] into the model's input. Fields the
//! adopter has no say in are pinned near the population centroid (dataset
//! means) or to 0 for listing-status flags, so the prediction is driven by the
//! axes the user actually chose.

use crate::preferences::UserPreferences;
use crate::schema::{Feature, FieldSource, FEATURE_COUNT};
use crate::vector::FeatureVector;
use serde::Serialize;

/// Column means of every schema field over a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureMeans {
    values: [f64; FEATURE_COUNT],
}

impl FeatureMeans {
    /// Means from an iterator of rows. Non-finite cells are skipped; a column
    /// with no finite value at all gets 0.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a FeatureVector>,
    {
        let mut sums = [0.0f64; FEATURE_COUNT];
        let mut counts = [0usize; FEATURE_COUNT];

        for row in rows {
            for (i, value) in row.as_slice().iter().enumerate() {
                if value.is_finite() {
                    sums[i] += value;
                    counts[i] += 1;
                }
            }
        }

        let mut values = [0.0f64; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            if counts[i] > 0 {
                values[i] = sums[i] / counts[i] as f64;
            }
        }
        Self { values }
    }

    /// Build from explicit values in training order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }
}

/// Builds model input vectors from user preferences
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder<'a> {
    means: &'a FeatureMeans,
}

impl<'a> FeatureBuilder<'a> {
    pub fn new(means: &'a FeatureMeans) -> Self {
        Self { means }
    }

    /// Build the complete feature vector for one request
    pub fn build(&self, prefs: &UserPreferences) -> FeatureVector {
        FeatureVector::from_fn(|feature| match feature.source() {
            FieldSource::User => user_value(prefs, feature),
            FieldSource::DatasetMean => self.means.get(feature),
            FieldSource::Neutral => 0.0,
        })
    }
}

/// Value of a [`FieldSource::User`] field. Other fields never reach here.
fn user_value(prefs: &UserPreferences, feature: Feature) -> f64 {
    let friendly = f64::from(prefs.social.friendly());
    match feature {
        Feature::IsCatsOk => flag(prefs.has_cats),
        Feature::IsDogsOk => flag(prefs.has_dogs),
        Feature::IsKidsOk => flag(prefs.has_kids),
        Feature::ActivityLevelOrd => f64::from(prefs.activity.ordinal()),
        Feature::SizeGroupOrd => f64::from(prefs.size.ordinal()),
        Feature::AgeGroupAdult
        | Feature::AgeGroupBaby
        | Feature::AgeGroupSenior
        | Feature::AgeGroupYoung => flag(feature == prefs.age.dummy()),
        Feature::NewPeopleReactionFriendly => friendly,
        Feature::NewPeopleReactionCautious => 1.0 - friendly,
        _ => f64::NAN,
    }
}

/// Shorthand for building without keeping a builder around
pub fn build_features(prefs: &UserPreferences, means: &FeatureMeans) -> FeatureVector {
    FeatureBuilder::new(means).build(prefs)
}

#[inline]
fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{ActivityLevel, AgeGroup, SizeGroup, SocialContact};

    fn means() -> FeatureMeans {
        FeatureMeans::from_values(std::array::from_fn(|i| 100.0 + i as f64))
    }

    fn all_preferences() -> Vec<UserPreferences> {
        let mut out = Vec::new();
        for size in SizeGroup::ALL {
            for age in AgeGroup::ALL {
                for activity in ActivityLevel::ALL {
                    for social in SocialContact::ALL {
                        for bits in 0..8u8 {
                            out.push(UserPreferences {
                                size,
                                age,
                                has_dogs: bits & 1 != 0,
                                has_cats: bits & 2 != 0,
                                has_kids: bits & 4 != 0,
                                activity,
                                social,
                            });
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_vector_is_complete_for_every_preference() {
        let means = means();
        for prefs in all_preferences() {
            let v = build_features(&prefs, &means);
            assert!(v.is_complete());

            let age_sum = v[Feature::AgeGroupAdult]
                + v[Feature::AgeGroupBaby]
                + v[Feature::AgeGroupSenior]
                + v[Feature::AgeGroupYoung];
            assert_eq!(age_sum, 1.0);
            assert!(v.is_set(prefs.age.dummy()));

            let social_sum = v[Feature::NewPeopleReactionCautious] + v[Feature::NewPeopleReactionFriendly];
            assert_eq!(social_sum, 1.0);
        }
    }

    #[test]
    fn test_user_controlled_fields() {
        let prefs = UserPreferences {
            size: SizeGroup::Large,
            age: AgeGroup::Young,
            has_dogs: true,
            has_cats: false,
            has_kids: true,
            activity: ActivityLevel::Moderate,
            social: SocialContact::Cautious,
        };
        let v = build_features(&prefs, &means());

        assert_eq!(v[Feature::SizeGroupOrd], 2.0);
        assert_eq!(v[Feature::ActivityLevelOrd], 1.0);
        assert_eq!(v[Feature::IsDogsOk], 1.0);
        assert_eq!(v[Feature::IsCatsOk], 0.0);
        assert_eq!(v[Feature::IsKidsOk], 1.0);
        assert_eq!(v[Feature::AgeGroupYoung], 1.0);
        assert_eq!(v[Feature::NewPeopleReactionFriendly], 0.0);
        assert_eq!(v[Feature::NewPeopleReactionCautious], 1.0);
    }

    #[test]
    fn test_uncontrolled_fields_use_means_or_zero() {
        let prefs = UserPreferences {
            size: SizeGroup::Small,
            age: AgeGroup::Baby,
            has_dogs: false,
            has_cats: false,
            has_kids: false,
            activity: ActivityLevel::Calm,
            social: SocialContact::Friendly,
        };
        let means = means();
        let v = build_features(&prefs, &means);

        for feature in Feature::ALL {
            match feature.source() {
                FieldSource::DatasetMean => assert_eq!(v[feature], means.get(feature), "{feature}"),
                FieldSource::Neutral => assert_eq!(v[feature], 0.0, "{feature}"),
                FieldSource::User => assert!(v[feature].is_finite(), "{feature}"),
            }
        }
        assert_eq!(v[Feature::EnergyLevelOrd], 114.0);
    }

    #[test]
    fn test_means_skip_missing_cells() {
        let a = FeatureVector::from_fn(|f| if f == Feature::AdoptionFee { 50.0 } else { 1.0 });
        let b = FeatureVector::from_fn(|f| if f == Feature::AdoptionFee { f64::NAN } else { 3.0 });
        let c = FeatureVector::from_fn(|f| if f == Feature::AdoptionFee { 150.0 } else { f64::NAN });

        let means = FeatureMeans::from_rows([&a, &b, &c]);
        assert_eq!(means.get(Feature::AdoptionFee), 100.0);
        assert_eq!(means.get(Feature::CareScore), 2.0);

        let empty = FeatureMeans::from_rows(std::iter::empty::<&FeatureVector>());
        assert_eq!(empty.get(Feature::CareScore), 0.0);
    }
}
