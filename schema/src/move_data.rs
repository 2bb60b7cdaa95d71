use crate::TypeName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Targeting behavior as recorded by the reference dex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveTarget {
    AdjacentAlly,
    AdjacentAllyOrSelf,
    AdjacentFoe,
    All,
    AllAdjacent,
    AllAdjacentFoes,
    Allies,
    AllySide,
    AllyTeam,
    Any,
    FoeSide,
    Normal,
    RandomNormal,
    Scripted,
    #[serde(rename = "self")]
    User,
}

impl MoveTarget {
    /// The engine's name for this targeting behavior.
    pub fn engine_name(self) -> &'static str {
        match self {
            MoveTarget::AdjacentAlly => "Ally",
            MoveTarget::AdjacentAllyOrSelf => "AllyOrSelf",
            MoveTarget::AdjacentFoe => "Foe",
            MoveTarget::All => "All",
            MoveTarget::AllAdjacent => "AllOthers",
            MoveTarget::AllAdjacentFoes => "Foes",
            MoveTarget::Allies => "Allies",
            MoveTarget::AllySide => "AllySide",
            MoveTarget::AllyTeam => "Self_",
            MoveTarget::Any => "Any",
            MoveTarget::FoeSide => "FoeSide",
            MoveTarget::Normal => "Other",
            MoveTarget::RandomNormal => "RandomFoe",
            MoveTarget::Scripted => "Depends",
            MoveTarget::User => "Self_",
        }
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.engine_name())
    }
}

/// Authoritative facts about a single move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexMove {
    pub num: u16,
    pub name: String,
    pub base_power: u8,
    #[serde(rename = "type")]
    pub move_type: TypeName,
    pub accuracy: Option<u8>, // None for moves that never miss
    pub pp: u8,
    pub target: MoveTarget,
    #[serde(default)]
    pub secondary_chance: Option<u8>,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub short_desc: String,
}

impl DexMove {
    /// Accuracy as a percentage, treating never-miss moves as 100.
    pub fn accuracy_percent(&self) -> u8 {
        self.accuracy.unwrap_or(100)
    }
}
