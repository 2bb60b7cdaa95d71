use crate::TypeName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub spa: u8,
    pub spd: u8,
    pub spe: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gender {
    Genderless,
    Ratio { female: f32 }, // fraction of the species that is female
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Ratio { female: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexSpecies {
    pub num: u16,
    pub name: String,
    pub types: Vec<TypeName>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub gender: Gender,
}

impl DexSpecies {
    /// Both type slots, repeating the primary type for mono-typed species.
    pub fn type_pair(&self) -> Option<[TypeName; 2]> {
        match self.types.as_slice() {
            [single] => Some([*single, *single]),
            [first, second] => Some([*first, *second]),
            _ => None,
        }
    }
}
