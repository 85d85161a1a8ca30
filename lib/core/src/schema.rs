//! Feature schema
//!
//! The one ordered list of numeric fields the cluster model was trained on.
//! Everything that lays out a feature vector (the builder, the dataset loader,
//! the model artifact check) walks [`Feature::ALL`], so the order is defined
//! exactly once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fields in the training schema
pub const FEATURE_COUNT: usize = 25;

/// A single field of the training schema.
///
/// Variants are declared in training order; the discriminant is the column
/// index in a [`FeatureVector`](crate::FeatureVector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "adoptionFee")]
    AdoptionFee,
    #[serde(rename = "num_breeds")]
    NumBreeds,
    #[serde(rename = "compat_score")]
    CompatScore,
    #[serde(rename = "care_score")]
    CareScore,
    #[serde(rename = "isCourtesyListing")]
    IsCourtesyListing,
    #[serde(rename = "isNeedingFoster")]
    IsNeedingFoster,
    #[serde(rename = "isSponsorable")]
    IsSponsorable,
    #[serde(rename = "isCatsOk")]
    IsCatsOk,
    #[serde(rename = "isDogsOk")]
    IsDogsOk,
    #[serde(rename = "isKidsOk")]
    IsKidsOk,
    #[serde(rename = "isSpecialNeeds")]
    IsSpecialNeeds,
    #[serde(rename = "isHousetrained")]
    IsHousetrained,
    #[serde(rename = "coatLength_ord")]
    CoatLengthOrd,
    #[serde(rename = "activityLevel_ord")]
    ActivityLevelOrd,
    #[serde(rename = "energyLevel_ord")]
    EnergyLevelOrd,
    #[serde(rename = "sizeGroup_ord")]
    SizeGroupOrd,
    #[serde(rename = "obedienceTraining_ord")]
    ObedienceTrainingOrd,
    #[serde(rename = "ageGroup_adult")]
    AgeGroupAdult,
    #[serde(rename = "ageGroup_baby")]
    AgeGroupBaby,
    #[serde(rename = "ageGroup_senior")]
    AgeGroupSenior,
    #[serde(rename = "ageGroup_young")]
    AgeGroupYoung,
    #[serde(rename = "sex_female")]
    SexFemale,
    #[serde(rename = "sex_male")]
    SexMale,
    #[serde(rename = "newPeopleReaction_cautious")]
    NewPeopleReactionCautious,
    #[serde(rename = "newPeopleReaction_friendly")]
    NewPeopleReactionFriendly,
}

/// How a field gets its value when building a query vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// Derived from the user's preferences
    User,
    /// Column mean over the whole dataset
    DatasetMean,
    /// Listing-status flag, fixed to 0 for a hypothetical query
    Neutral,
}

impl Feature {
    /// All fields in training order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::AdoptionFee,
        Feature::NumBreeds,
        Feature::CompatScore,
        Feature::CareScore,
        Feature::IsCourtesyListing,
        Feature::IsNeedingFoster,
        Feature::IsSponsorable,
        Feature::IsCatsOk,
        Feature::IsDogsOk,
        Feature::IsKidsOk,
        Feature::IsSpecialNeeds,
        Feature::IsHousetrained,
        Feature::CoatLengthOrd,
        Feature::ActivityLevelOrd,
        Feature::EnergyLevelOrd,
        Feature::SizeGroupOrd,
        Feature::ObedienceTrainingOrd,
        Feature::AgeGroupAdult,
        Feature::AgeGroupBaby,
        Feature::AgeGroupSenior,
        Feature::AgeGroupYoung,
        Feature::SexFemale,
        Feature::SexMale,
        Feature::NewPeopleReactionCautious,
        Feature::NewPeopleReactionFriendly,
    ];

    /// Column index in a feature vector
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as it appears in the dataset and model artifact
    pub fn name(self) -> &'static str {
        match self {
            Feature::AdoptionFee => "adoptionFee",
            Feature::NumBreeds => "num_breeds",
            Feature::CompatScore => "compat_score",
            Feature::CareScore => "care_score",
            Feature::IsCourtesyListing => "isCourtesyListing",
            Feature::IsNeedingFoster => "isNeedingFoster",
            Feature::IsSponsorable => "isSponsorable",
            Feature::IsCatsOk => "isCatsOk",
            Feature::IsDogsOk => "isDogsOk",
            Feature::IsKidsOk => "isKidsOk",
            Feature::IsSpecialNeeds => "isSpecialNeeds",
            Feature::IsHousetrained => "isHousetrained",
            Feature::CoatLengthOrd => "coatLength_ord",
            Feature::ActivityLevelOrd => "activityLevel_ord",
            Feature::EnergyLevelOrd => "energyLevel_ord",
            Feature::SizeGroupOrd => "sizeGroup_ord",
            Feature::ObedienceTrainingOrd => "obedienceTraining_ord",
            Feature::AgeGroupAdult => "ageGroup_adult",
            Feature::AgeGroupBaby => "ageGroup_baby",
            Feature::AgeGroupSenior => "ageGroup_senior",
            Feature::AgeGroupYoung => "ageGroup_young",
            Feature::SexFemale => "sex_female",
            Feature::SexMale => "sex_male",
            Feature::NewPeopleReactionCautious => "newPeopleReaction_cautious",
            Feature::NewPeopleReactionFriendly => "newPeopleReaction_friendly",
        }
    }

    /// Look up a field by its column name
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Where the value of this field comes from in a query vector
    pub fn source(self) -> FieldSource {
        match self {
            Feature::IsCatsOk
            | Feature::IsDogsOk
            | Feature::IsKidsOk
            | Feature::ActivityLevelOrd
            | Feature::SizeGroupOrd
            | Feature::AgeGroupAdult
            | Feature::AgeGroupBaby
            | Feature::AgeGroupSenior
            | Feature::AgeGroupYoung
            | Feature::NewPeopleReactionCautious
            | Feature::NewPeopleReactionFriendly => FieldSource::User,
            Feature::AdoptionFee
            | Feature::NumBreeds
            | Feature::CompatScore
            | Feature::CareScore
            | Feature::IsHousetrained
            | Feature::CoatLengthOrd
            | Feature::ObedienceTrainingOrd
            | Feature::EnergyLevelOrd => FieldSource::DatasetMean,
            Feature::IsCourtesyListing
            | Feature::IsNeedingFoster
            | Feature::IsSponsorable
            | Feature::IsSpecialNeeds
            | Feature::SexFemale
            | Feature::SexMale => FieldSource::Neutral,
        }
    }

    /// Column names in training order
    pub fn names() -> Vec<&'static str> {
        Feature::ALL.iter().map(|f| f.name()).collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
