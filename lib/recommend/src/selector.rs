//! Candidate selection cascade
//!
//! Walks clusters starting with the predicted one and relaxes the adopter's
//! constraints until something matches:
//!
//! 1. cluster + age + size
//! 2. cluster + age (size relaxed)
//! 3. next cluster in first-seen order, same two steps
//! 4. the whole dataset (age relaxed)
//!
//! The pool is then cut to the display count. A non-empty dataset always
//! yields a non-empty selection.

use crate::config::{DisplayMode, RecommendConfig};
use pawmatch_core::{
    AnimalRecord, ClusterId, Dataset, Error, Filter, FilterCondition, RecordFilter, Result,
    UserPreferences,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which constraints the cascade had to drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relaxation {
    /// Cluster, age and size all satisfied
    Exact,
    /// Cluster and age satisfied, no row of the requested size
    SizeRelaxed,
    /// No cluster had the requested age; whole dataset used
    AgeRelaxed,
}

impl Relaxation {
    /// Explanation for the adopter, `None` when nothing was relaxed
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Relaxation::Exact => None,
            Relaxation::SizeRelaxed => {
                Some("No animals of your preferred size matched, so we are showing other sizes of the same age.")
            }
            Relaxation::AgeRelaxed => {
                Some("No animals of your preferred age are available, so we are showing general picks from the shelter.")
            }
        }
    }
}

/// Outcome of the cascade
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub records: Vec<&'a AnimalRecord>,
    pub relaxation: Relaxation,
    /// Cluster that supplied the candidates; `None` for the whole dataset
    pub matched_cluster: Option<ClusterId>,
    /// Size of the filtered pool before the display cut
    pub pool_size: usize,
}

impl Selection<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn rows(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.row).collect()
    }
}

/// Runs the fallback cascade over a dataset
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    config: RecommendConfig,
}

impl CandidateSelector {
    pub fn new(config: RecommendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Full cascade result, before the display cut
    pub fn cascade<'a>(
        &self,
        dataset: &'a Dataset,
        predicted: ClusterId,
        prefs: &UserPreferences,
    ) -> Result<Selection<'a>> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let all = dataset.all();
        let size_filter = RecordFilter::new(FilterCondition::size(prefs.size));

        for cluster in dataset.cluster_order(predicted) {
            let by_age = RecordFilter::new(FilterCondition::cluster_age(cluster, prefs.age)).apply(&all);
            if by_age.is_empty() {
                debug!("Cluster {} has no {} animals, trying next", cluster, prefs.age);
                continue;
            }

            let by_size = size_filter.apply(&by_age);
            let (records, relaxation) = if by_size.is_empty() {
                (by_age, Relaxation::SizeRelaxed)
            } else {
                (by_size, Relaxation::Exact)
            };
            return Ok(Selection {
                pool_size: records.len(),
                records,
                relaxation,
                matched_cluster: Some(cluster),
            });
        }

        Ok(Selection {
            pool_size: all.len(),
            records: all,
            relaxation: Relaxation::AgeRelaxed,
            matched_cluster: None,
        })
    }

    /// Cascade followed by the configured display cut
    pub fn select<'a>(
        &self,
        dataset: &'a Dataset,
        predicted: ClusterId,
        prefs: &UserPreferences,
    ) -> Result<Selection<'a>> {
        self.select_limited(dataset, predicted, prefs, self.config.display_count)
    }

    /// Cascade followed by a display cut of `count` rows
    pub fn select_limited<'a>(
        &self,
        dataset: &'a Dataset,
        predicted: ClusterId,
        prefs: &UserPreferences,
        count: usize,
    ) -> Result<Selection<'a>> {
        let mut selection = self.cascade(dataset, predicted, prefs)?;
        selection.records = match (self.config.mode, self.config.seed) {
            (DisplayMode::Head, _) => take_head(selection.records, count),
            (DisplayMode::Sample, Some(seed)) => {
                sample(selection.records, count, &mut StdRng::seed_from_u64(seed))
            }
            (DisplayMode::Sample, None) => sample(selection.records, count, &mut rand::rng()),
        };
        debug!(
            "Selected {} of {} candidates ({:?}, cluster {:?})",
            selection.records.len(),
            selection.pool_size,
            selection.relaxation,
            selection.matched_cluster
        );
        Ok(selection)
    }
}

/// First `count` records; all of them when fewer exist
pub fn take_head<T>(mut records: Vec<T>, count: usize) -> Vec<T> {
    records.truncate(count);
    records
}

/// Uniform sample without replacement, clamped to the population and kept
/// in the original order
pub fn sample<T, R>(records: Vec<T>, count: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let amount = count.min(records.len());
    if amount == records.len() {
        return records;
    }
    let mut picked = rand::seq::index::sample(rng, records.len(), amount).into_vec();
    picked.sort_unstable();

    let mut keep = vec![false; records.len()];
    for idx in picked {
        keep[idx] = true;
    }
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, kept)| kept.then_some(record))
        .collect()
}
