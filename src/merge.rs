//! Folding effects that are configured as behaviorally identical.

use crate::errors::{DatagenError, DatagenResult};
use crate::registry::MergeGroup;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Edit distance between two sequences.
pub fn levenshtein<T: PartialEq>(s: &[T], t: &[T]) -> usize {
    if s.is_empty() {
        return t.len();
    }
    if t.is_empty() {
        return s.len();
    }

    let mut prev: Vec<usize> = (0..=s.len()).collect();
    let mut row = vec![0; s.len() + 1];
    for (i, ti) in t.iter().enumerate() {
        row[0] = i + 1;
        for (j, sj) in s.iter().enumerate() {
            let substitution = prev[j] + usize::from(sj != ti);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(substitution);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[s.len()]
}

/// One dispatch branch covering several effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBranch {
    pub canonical: String,
    /// The active members of the group, in group order.
    pub labels: Vec<String>,
}

/// The outcome of checking every merge group against observed commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    branches: BTreeMap<String, MergedBranch>,
    folded: BTreeMap<String, String>,
}

impl MergePlan {
    /// The canonical member an alias was folded into.
    pub fn folded_into(&self, effect: &str) -> Option<&str> {
        self.folded.get(effect).map(String::as_str)
    }

    /// The merged branch headed by `canonical`, if it heads one.
    pub fn branch(&self, canonical: &str) -> Option<&MergedBranch> {
        self.branches.get(canonical)
    }

    /// The merged branch any member of a group belongs to.
    pub fn group_of(&self, effect: &str) -> Option<&MergedBranch> {
        let canonical = self.folded_into(effect).unwrap_or(effect);
        self.branches.get(canonical)
    }

    pub fn branches(&self) -> impl Iterator<Item = &MergedBranch> {
        self.branches.values()
    }
}

/// Check each group and fold its aliases into the canonical member.
///
/// `active` holds every effect of the enumeration, `None` included. Only
/// groups with at least one member among them take part. An alias
/// without a command listing is folded without comparison. An alias whose
/// listing is further than the group tolerance from the canonical listing
/// aborts the run, as does a group whose canonical listing is missing.
pub fn plan(
    groups: &[MergeGroup],
    commands: &BTreeMap<String, Vec<String>>,
    active: &BTreeSet<String>,
) -> DatagenResult<MergePlan> {
    let mut merged = MergePlan::default();

    for group in groups {
        if !group.members.iter().any(|member| active.contains(*member)) {
            continue;
        }
        let canonical = group.canonical();
        let canonical_commands = commands.get(canonical);

        for alias in group.aliases() {
            if let Some(alias_commands) = commands.get(*alias) {
                let Some(canonical_commands) = canonical_commands else {
                    return Err(DatagenError::MissingCanonical {
                        canonical: canonical.to_string(),
                    });
                };
                let distance = levenshtein(alias_commands, canonical_commands);
                if distance > group.tolerance {
                    return Err(DatagenError::InvalidGrouping {
                        alias: (*alias).to_string(),
                        canonical: canonical.to_string(),
                        distance,
                        tolerance: group.tolerance,
                    });
                }
                debug!(alias, canonical, distance, "merged effect");
            }
            merged
                .folded
                .insert((*alias).to_string(), canonical.to_string());
        }

        merged.branches.insert(
            canonical.to_string(),
            MergedBranch {
                canonical: canonical.to_string(),
                labels: group
                    .members
                    .iter()
                    .filter(|member| active.contains(**member))
                    .map(|member| (*member).to_string())
                    .collect(),
            },
        );
    }

    Ok(merged)
}
