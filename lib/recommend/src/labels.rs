//! Display names for clusters. Purely cosmetic; selection only ever looks at
//! the numeric id.

use pawmatch_core::ClusterId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label for an id the table does not know
pub const UNKNOWN_LABEL: &str = "Unknown group";
/// Label used when candidates came from the whole dataset
pub const GENERAL_LABEL: &str = "General shelter picks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterLabels {
    names: BTreeMap<ClusterId, String>,
}

impl Default for ClusterLabels {
    fn default() -> Self {
        let names = [
            (0, "Sociable and calm"),
            (1, "Friendly youngsters"),
            (2, "Small and cute"),
            (3, "The most affectionate"),
            (4, "Sensitive fluffballs"),
        ]
        .into_iter()
        .map(|(id, name)| (ClusterId(id), name.to_string()))
        .collect();
        Self { names }
    }
}

impl ClusterLabels {
    /// Replace or add names, keeping the rest
    #[must_use]
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a ClusterId, &'a String)>,
    {
        for (id, name) in overrides {
            self.names.insert(*id, name.clone());
        }
        self
    }

    pub fn label(&self, cluster: ClusterId) -> &str {
        self.names.get(&cluster).map(String::as_str).unwrap_or(UNKNOWN_LABEL)
    }

    /// Label of the cluster that supplied candidates, or the general label
    /// when the selection fell back to the whole dataset
    pub fn matched_label(&self, cluster: Option<ClusterId>) -> &str {
        match cluster {
            Some(c) => self.label(c),
            None => GENERAL_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let labels = ClusterLabels::default();
        assert_eq!(labels.label(ClusterId(0)), "Sociable and calm");
        assert_eq!(labels.label(ClusterId(4)), "Sensitive fluffballs");
        assert_eq!(labels.label(ClusterId(5)), UNKNOWN_LABEL);
        assert_eq!(labels.label(ClusterId(-1)), UNKNOWN_LABEL);
    }

    #[test]
    fn test_matched_label() {
        let labels = ClusterLabels::default();
        assert_eq!(labels.matched_label(None), GENERAL_LABEL);
        assert_eq!(labels.matched_label(Some(ClusterId(2))), "Small and cute");
    }

    #[test]
    fn test_overrides() {
        let mut extra = BTreeMap::new();
        extra.insert(ClusterId(2), "Pocket size".to_string());
        extra.insert(ClusterId(9), "Night owls".to_string());
        let labels = ClusterLabels::default().with_overrides(&extra);

        assert_eq!(labels.label(ClusterId(2)), "Pocket size");
        assert_eq!(labels.label(ClusterId(9)), "Night owls");
        assert_eq!(labels.label(ClusterId(1)), "Friendly youngsters");
    }
}
