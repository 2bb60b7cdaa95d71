//! Partitioning effects into categories and assigning them contiguous codes.
//!
//! Code 0 is reserved for "no effect". Every observed effect gets exactly one
//! code, and every category (and every curated sub-range inside one) covers a
//! contiguous run of codes, so membership reduces to two integer comparisons.

use crate::errors::{DatagenError, DatagenResult};
use crate::registry::{Anchor, Category, PredicateSpec, Registry};
use std::collections::{BTreeMap, BTreeSet};

pub const NO_EFFECT: &str = "None";

/// An inclusive run of effect codes. Empty when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub start: usize,
    pub end: usize,
}

impl CodeRange {
    pub fn contains(&self, code: usize) -> bool {
        self.start <= code && code <= self.end
    }

    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRange {
    pub name: &'static str,
    pub range: CodeRange,
    pub members: Vec<String>,
    pub sub_ranges: Vec<(&'static str, CodeRange)>,
}

/// A resolved predicate helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub name: &'static str,
    pub doc: &'static str,
    pub range: CodeRange,
}

/// The coded effect enumeration of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectCoding {
    pub categories: Vec<CategoryRange>,
    pub predicates: Vec<Predicate>,
    codes: BTreeMap<String, usize>,
}

impl EffectCoding {
    /// Effect names in code order, starting at code 1.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|category| category.members.iter().map(String::as_str))
    }

    pub fn code(&self, effect: &str) -> Option<usize> {
        if effect == NO_EFFECT {
            return Some(0);
        }
        self.codes.get(effect).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn category_of(&self, effect: &str) -> Option<&'static str> {
        let code = self.code(effect)?;
        self.categories
            .iter()
            .find(|category| category.range.contains(code))
            .map(|category| category.name)
    }

    /// Range of a category or sub-range by name.
    pub fn range(&self, name: &str) -> Option<CodeRange> {
        self.categories.iter().find_map(|category| {
            if category.name == name {
                return Some(category.range);
            }
            category
                .sub_ranges
                .iter()
                .find(|(sub, _)| *sub == name)
                .map(|(_, range)| *range)
        })
    }

    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    fn resolve(&self, anchor: Anchor) -> Option<usize> {
        match anchor {
            Anchor::Start(name) => self.range(name).map(|r| r.start),
            Anchor::End(name) => self.range(name).map(|r| r.end),
            Anchor::BeforeEnd(name) => self.range(name).map(|r| r.end.saturating_sub(1)),
        }
    }
}

fn category_for<'r>(categories: &'r [Category], effect: &str) -> Option<&'r Category> {
    categories
        .iter()
        .find(|category| category.members.iter().any(|m| *m == effect))
        .or_else(|| categories.iter().find(|category| category.fallback))
}

/// Assign every observed effect a category and a code.
///
/// `observed` must not contain `None`; it is always code 0. Effects are laid
/// out category by category in registry order, curated sub-range members
/// first in declared order, the rest sorted. A curated member that was never
/// observed is an error, since it would shift every range after it.
pub fn classify<'e, I>(registry: &Registry, observed: I) -> DatagenResult<EffectCoding>
where
    I: IntoIterator<Item = &'e str>,
{
    let observed: BTreeSet<&str> = observed
        .into_iter()
        .filter(|effect| *effect != NO_EFFECT)
        .collect();

    let mut buckets: BTreeMap<&'static str, BTreeSet<&str>> = BTreeMap::new();
    for effect in &observed {
        if let Some(category) = category_for(registry.categories, effect) {
            buckets.entry(category.name).or_default().insert(*effect);
        }
    }

    let mut categories = Vec::with_capacity(registry.categories.len());
    let mut codes = BTreeMap::new();
    let mut next = 1;

    for category in registry.categories {
        let mut remaining = buckets.remove(category.name).unwrap_or_default();
        let start = next;
        let mut members = Vec::with_capacity(remaining.len());
        let mut sub_ranges = Vec::with_capacity(category.sub_ranges.len());

        for sub in category.sub_ranges {
            let sub_start = next;
            for effect in sub.members {
                if !remaining.remove(effect) {
                    return Err(DatagenError::MissingCuratedEffect {
                        category: category.name.to_string(),
                        effect: (*effect).to_string(),
                    });
                }
                members.push((*effect).to_string());
                next += 1;
            }
            sub_ranges.push((
                sub.name,
                CodeRange {
                    start: sub_start,
                    end: next - 1,
                },
            ));
        }

        // BTreeSet iteration is already lexicographic.
        for effect in remaining {
            members.push(effect.to_string());
            next += 1;
        }

        for (offset, effect) in members.iter().enumerate() {
            codes.insert(effect.clone(), start + offset);
        }
        categories.push(CategoryRange {
            name: category.name,
            range: CodeRange {
                start,
                end: next - 1,
            },
            members,
            sub_ranges,
        });
    }

    let mut coding = EffectCoding {
        categories,
        predicates: Vec::new(),
        codes,
    };
    coding.predicates = resolve_predicates(&coding, registry.predicates);
    Ok(coding)
}

fn resolve_predicates(coding: &EffectCoding, specs: &[PredicateSpec]) -> Vec<Predicate> {
    specs
        .iter()
        .filter_map(|spec| {
            let start = coding.resolve(spec.from)?;
            let end = coding.resolve(spec.to)?;
            Some(Predicate {
                name: spec.name,
                doc: spec.doc,
                range: CodeRange { start, end },
            })
        })
        .collect()
}
