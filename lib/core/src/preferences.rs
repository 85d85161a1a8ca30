//! User preferences
//!
//! Closed enumerations for every choice an adopter makes. Ordinal codes are
//! the ones the cluster model was trained with and run low to high.

use crate::schema::Feature;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preferred size of the animal. Ordinal: small=0, medium=1, large=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeGroup {
    Small,
    Medium,
    Large,
}

impl SizeGroup {
    pub const ALL: [SizeGroup; 3] = [SizeGroup::Small, SizeGroup::Medium, SizeGroup::Large];

    #[inline]
    pub fn ordinal(self) -> u8 {
        match self {
            SizeGroup::Small => 0,
            SizeGroup::Medium => 1,
            SizeGroup::Large => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeGroup::Small => "small",
            SizeGroup::Medium => "medium",
            SizeGroup::Large => "large",
        }
    }
}

/// Preferred age group, one-hot encoded into four dummies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Baby,
    Young,
    Adult,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [AgeGroup::Baby, AgeGroup::Young, AgeGroup::Adult, AgeGroup::Senior];

    /// The dummy column that marks membership in this age group
    pub fn dummy(self) -> Feature {
        match self {
            AgeGroup::Baby => Feature::AgeGroupBaby,
            AgeGroup::Young => Feature::AgeGroupYoung,
            AgeGroup::Adult => Feature::AgeGroupAdult,
            AgeGroup::Senior => Feature::AgeGroupSenior,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Baby => "baby",
            AgeGroup::Young => "young",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }
}

/// Daily activity level of the adopter. Ordinal: calm=0, moderate=1, active=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Calm,
    Moderate,
    Active,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [ActivityLevel::Calm, ActivityLevel::Moderate, ActivityLevel::Active];

    #[inline]
    pub fn ordinal(self) -> u8 {
        match self {
            ActivityLevel::Calm => 0,
            ActivityLevel::Moderate => 1,
            ActivityLevel::Active => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Calm => "calm",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }
}

/// Whether the animal will be in constant contact with other people
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialContact {
    Friendly,
    Cautious,
}

impl SocialContact {
    pub const ALL: [SocialContact; 2] = [SocialContact::Friendly, SocialContact::Cautious];

    /// Value of the `newPeopleReaction_friendly` dummy
    #[inline]
    pub fn friendly(self) -> u8 {
        match self {
            SocialContact::Friendly => 1,
            SocialContact::Cautious => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SocialContact::Friendly => "friendly",
            SocialContact::Cautious => "cautious",
        }
    }
}

macro_rules! impl_choice {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim().to_ascii_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| Error::InvalidConfig(format!("unknown {} '{}'", $what, s)))
            }
        }
    };
}

impl_choice!(SizeGroup, "size");
impl_choice!(AgeGroup, "age group");
impl_choice!(ActivityLevel, "activity level");
impl_choice!(SocialContact, "social contact");

/// Everything an adopter tells us, captured once per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub size: SizeGroup,
    pub age: AgeGroup,
    #[serde(default)]
    pub has_dogs: bool,
    #[serde(default)]
    pub has_cats: bool,
    #[serde(default)]
    pub has_kids: bool,
    pub activity: ActivityLevel,
    pub social: SocialContact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_run_low_to_high() {
        let sizes: Vec<u8> = SizeGroup::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(sizes, vec![0, 1, 2]);
        let activity: Vec<u8> = ActivityLevel::ALL.iter().map(|a| a.ordinal()).collect();
        assert_eq!(activity, vec![0, 1, 2]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Medium".parse::<SizeGroup>().unwrap(), SizeGroup::Medium);
        assert_eq!(" senior ".parse::<AgeGroup>().unwrap(), AgeGroup::Senior);
        assert!("huge".parse::<SizeGroup>().is_err());
        assert!("".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_category() {
        let ok = serde_json::json!({
            "size": "small",
            "age": "baby",
            "has_dogs": true,
            "activity": "active",
            "social": "cautious"
        });
        let prefs: UserPreferences = serde_json::from_value(ok).unwrap();
        assert_eq!(prefs.size, SizeGroup::Small);
        assert!(prefs.has_dogs);
        assert!(!prefs.has_cats);

        let bad = serde_json::json!({
            "size": "giant",
            "age": "baby",
            "activity": "active",
            "social": "cautious"
        });
        assert!(serde_json::from_value::<UserPreferences>(bad).is_err());
    }

    #[test]
    fn test_age_dummies_are_distinct() {
        let mut dummies: Vec<Feature> = AgeGroup::ALL.iter().map(|a| a.dummy()).collect();
        dummies.sort();
        dummies.dedup();
        assert_eq!(dummies.len(), 4);
    }
}
