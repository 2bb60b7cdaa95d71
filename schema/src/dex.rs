use crate::{DexMove, DexSpecies, Generation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexItem {
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// The reference dex for one generation, keyed by id (see [`to_id`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dex {
    pub generation: Generation,
    #[serde(default)]
    pub moves: BTreeMap<String, DexMove>,
    #[serde(default)]
    pub species: BTreeMap<String, DexSpecies>,
    #[serde(default)]
    pub items: BTreeMap<String, DexItem>,
}

impl Dex {
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            moves: BTreeMap::new(),
            species: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    /// Look up a move by any spelling of its name or constant.
    pub fn get_move(&self, name: &str) -> Option<&DexMove> {
        self.moves.get(&to_id(name))
    }

    pub fn get_species(&self, name: &str) -> Option<&DexSpecies> {
        self.species.get(&to_id(name))
    }

    pub fn get_item(&self, name: &str) -> Option<&DexItem> {
        self.items.get(&to_id(name))
    }
}

/// Reduce a name or constant to its dex id: lowercase ASCII alphanumerics only.
/// `"KARATE_CHOP"`, `"Karate Chop"` and `"karatechop"` all map to `"karatechop"`.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
