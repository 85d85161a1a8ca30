// Record filters over the in-memory dataset
use crate::preferences::{AgeGroup, SizeGroup};
use crate::record::{AnimalRecord, ClusterId};
use crate::schema::Feature;

pub trait Filter {
    fn matches(&self, record: &AnimalRecord) -> bool;

    /// Keep the matching records, preserving their order
    fn apply<'a>(&self, records: &[&'a AnimalRecord]) -> Vec<&'a AnimalRecord> {
        records.iter().copied().filter(|r| self.matches(r)).collect()
    }
}

pub struct RecordFilter {
    condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    InCluster(ClusterId),
    FlagSet(Feature),
    CodeEquals { feature: Feature, code: u8 },
    And(Vec<FilterCondition>),
}

impl FilterCondition {
    /// Rows whose one-hot dummy for `age` is set
    pub fn age(age: AgeGroup) -> Self {
        FilterCondition::FlagSet(age.dummy())
    }

    /// Rows whose size ordinal equals the code of `size`
    pub fn size(size: SizeGroup) -> Self {
        FilterCondition::CodeEquals {
            feature: Feature::SizeGroupOrd,
            code: size.ordinal(),
        }
    }

    /// Rows of `cluster` whose age dummy for `age` is set
    pub fn cluster_age(cluster: ClusterId, age: AgeGroup) -> Self {
        FilterCondition::And(vec![FilterCondition::InCluster(cluster), Self::age(age)])
    }
}

impl RecordFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    fn matches_condition(condition: &FilterCondition, record: &AnimalRecord) -> bool {
        match condition {
            FilterCondition::InCluster(cluster) => record.cluster == *cluster,
            FilterCondition::FlagSet(feature) => record.features.is_set(*feature),
            FilterCondition::CodeEquals { feature, code } => record.features.has_code(*feature, *code),
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, record))
            }
        }
    }
}

impl Filter for RecordFilter {
    fn matches(&self, record: &AnimalRecord) -> bool {
        Self::matches_condition(&self.condition, record)
    }
}
