use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The two supported game generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Generation {
    Gen1,
    Gen2,
}

impl Generation {
    pub const ALL: [Generation; 2] = [Generation::Gen1, Generation::Gen2];

    pub fn from_num(num: u8) -> Option<Generation> {
        match num {
            1 => Some(Generation::Gen1),
            2 => Some(Generation::Gen2),
            _ => None,
        }
    }

    pub fn num(self) -> u8 {
        match self {
            Generation::Gen1 => 1,
            Generation::Gen2 => 2,
        }
    }

    /// Number of distinct types the generation's type chart covers.
    pub fn type_count(self) -> usize {
        match self {
            Generation::Gen1 => 15,
            Generation::Gen2 => 18,
        }
    }

    /// Roman numeral used in emitted doc comments.
    pub fn roman(self) -> &'static str {
        match self {
            Generation::Gen1 => "I",
            Generation::Gen2 => "II",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.num())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum TypeName {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    #[serde(rename = "???")]
    #[strum(serialize = "???")]
    Unknown,
}

impl TypeName {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Identifier-safe spelling used in emitted source (`???` has none).
    pub fn ident(self) -> &'static str {
        match self {
            TypeName::Unknown => "Unknown",
            other => other.name(),
        }
    }
}

/// The four discrete outcomes of a single attacker/defender matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Effectiveness {
    Super,
    Neutral,
    Resisted,
    Immune,
}

impl Effectiveness {
    /// Classify a damage multiplier. Anything other than 2, 1, ½ or 0 has no category.
    pub fn from_multiplier(multiplier: f32) -> Option<Effectiveness> {
        if multiplier == 2.0 {
            Some(Effectiveness::Super)
        } else if multiplier == 1.0 {
            Some(Effectiveness::Neutral)
        } else if multiplier == 0.5 {
            Some(Effectiveness::Resisted)
        } else if multiplier == 0.0 {
            Some(Effectiveness::Immune)
        } else {
            None
        }
    }

    pub fn multiplier(self) -> f32 {
        match self {
            Effectiveness::Super => 2.0,
            Effectiveness::Neutral => 1.0,
            Effectiveness::Resisted => 0.5,
            Effectiveness::Immune => 0.0,
        }
    }

    /// Single letter used in compact chart literals.
    pub fn symbol(self) -> char {
        match self {
            Effectiveness::Super => 'S',
            Effectiveness::Neutral => 'N',
            Effectiveness::Resisted => 'R',
            Effectiveness::Immune => 'I',
        }
    }
}

/// Damage multiplier of `attacking` against `defending` in the given generation.
/// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
pub fn type_effectiveness(generation: Generation, attacking: TypeName, defending: TypeName) -> f32 {
    match generation {
        Generation::Gen1 => gen1_effectiveness(attacking, defending),
        Generation::Gen2 => gen2_effectiveness(attacking, defending),
    }
}

// Red/Blue matchups, including the cartridge quirks (Ghost cannot touch
// Psychic, Bug and Poison hit each other super effectively, Ice is neutral
// against Fire).
fn gen1_effectiveness(attacking: TypeName, defending: TypeName) -> f32 {
    use TypeName::*;

    match (attacking, defending) {
        // Normal
        (Normal, Rock) => 0.5,
        (Normal, Ghost) => 0.0,

        // Fighting
        (Fighting, Normal) | (Fighting, Rock) | (Fighting, Ice) => 2.0,
        (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => 0.5,
        (Fighting, Ghost) => 0.0,

        // Flying
        (Flying, Fighting) | (Flying, Bug) | (Flying, Grass) => 2.0,
        (Flying, Rock) | (Flying, Electric) => 0.5,

        // Poison
        (Poison, Bug) | (Poison, Grass) => 2.0,
        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,

        // Ground
        (Ground, Poison) | (Ground, Rock) | (Ground, Fire) | (Ground, Electric) => 2.0,
        (Ground, Bug) | (Ground, Grass) => 0.5,
        (Ground, Flying) => 0.0,

        // Rock
        (Rock, Flying) | (Rock, Bug) | (Rock, Fire) | (Rock, Ice) => 2.0,
        (Rock, Fighting) | (Rock, Ground) => 0.5,

        // Bug
        (Bug, Poison) | (Bug, Grass) | (Bug, Psychic) => 2.0,
        (Bug, Fighting) | (Bug, Flying) | (Bug, Ghost) | (Bug, Fire) => 0.5,

        // Ghost
        (Ghost, Ghost) => 2.0,
        (Ghost, Normal) | (Ghost, Psychic) => 0.0,

        // Fire
        (Fire, Bug) | (Fire, Grass) | (Fire, Ice) => 2.0,
        (Fire, Rock) | (Fire, Fire) | (Fire, Water) | (Fire, Dragon) => 0.5,

        // Water
        (Water, Ground) | (Water, Rock) | (Water, Fire) => 2.0,
        (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,

        // Grass
        (Grass, Ground) | (Grass, Rock) | (Grass, Water) => 2.0,
        (Grass, Flying)
        | (Grass, Poison)
        | (Grass, Bug)
        | (Grass, Fire)
        | (Grass, Grass)
        | (Grass, Dragon) => 0.5,

        // Electric
        (Electric, Flying) | (Electric, Water) => 2.0,
        (Electric, Grass) | (Electric, Electric) | (Electric, Dragon) => 0.5,
        (Electric, Ground) => 0.0,

        // Psychic
        (Psychic, Fighting) | (Psychic, Poison) => 2.0,
        (Psychic, Psychic) => 0.5,

        // Ice
        (Ice, Flying) | (Ice, Ground) | (Ice, Grass) | (Ice, Dragon) => 2.0,
        (Ice, Water) | (Ice, Ice) => 0.5,

        // Dragon
        (Dragon, Dragon) => 2.0,

        _ => 1.0,
    }
}

fn gen2_effectiveness(attacking: TypeName, defending: TypeName) -> f32 {
    use TypeName::*;

    match (attacking, defending) {
        // Normal
        (Normal, Rock) | (Normal, Steel) => 0.5,
        (Normal, Ghost) => 0.0,

        // Fighting
        (Fighting, Normal) | (Fighting, Rock) | (Fighting, Steel) | (Fighting, Ice) | (Fighting, Dark) => 2.0,
        (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => 0.5,
        (Fighting, Ghost) => 0.0,

        // Flying
        (Flying, Fighting) | (Flying, Bug) | (Flying, Grass) => 2.0,
        (Flying, Rock) | (Flying, Steel) | (Flying, Electric) => 0.5,

        // Poison
        (Poison, Grass) => 2.0,
        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
        (Poison, Steel) => 0.0,

        // Ground
        (Ground, Poison) | (Ground, Rock) | (Ground, Steel) | (Ground, Fire) | (Ground, Electric) => 2.0,
        (Ground, Bug) | (Ground, Grass) => 0.5,
        (Ground, Flying) => 0.0,

        // Rock
        (Rock, Flying) | (Rock, Bug) | (Rock, Fire) | (Rock, Ice) => 2.0,
        (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,

        // Bug
        (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
        (Bug, Fighting)
        | (Bug, Flying)
        | (Bug, Poison)
        | (Bug, Ghost)
        | (Bug, Steel)
        | (Bug, Fire) => 0.5,

        // Ghost
        (Ghost, Ghost) | (Ghost, Psychic) => 2.0,
        (Ghost, Steel) | (Ghost, Dark) => 0.5,
        (Ghost, Normal) => 0.0,

        // Steel
        (Steel, Rock) | (Steel, Ice) => 2.0,
        (Steel, Steel) | (Steel, Fire) | (Steel, Water) | (Steel, Electric) => 0.5,

        // Fire
        (Fire, Bug) | (Fire, Steel) | (Fire, Grass) | (Fire, Ice) => 2.0,
        (Fire, Rock) | (Fire, Fire) | (Fire, Water) | (Fire, Dragon) => 0.5,

        // Water
        (Water, Ground) | (Water, Rock) | (Water, Fire) => 2.0,
        (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,

        // Grass
        (Grass, Ground) | (Grass, Rock) | (Grass, Water) => 2.0,
        (Grass, Flying)
        | (Grass, Poison)
        | (Grass, Bug)
        | (Grass, Steel)
        | (Grass, Fire)
        | (Grass, Grass)
        | (Grass, Dragon) => 0.5,

        // Electric
        (Electric, Flying) | (Electric, Water) => 2.0,
        (Electric, Grass) | (Electric, Electric) | (Electric, Dragon) => 0.5,
        (Electric, Ground) => 0.0,

        // Psychic
        (Psychic, Fighting) | (Psychic, Poison) => 2.0,
        (Psychic, Steel) | (Psychic, Psychic) => 0.5,
        (Psychic, Dark) => 0.0,

        // Ice
        (Ice, Flying) | (Ice, Ground) | (Ice, Grass) | (Ice, Dragon) => 2.0,
        (Ice, Steel) | (Ice, Fire) | (Ice, Water) | (Ice, Ice) => 0.5,

        // Dragon
        (Dragon, Dragon) => 2.0,
        (Dragon, Steel) => 0.5,

        // Dark
        (Dark, Ghost) | (Dark, Psychic) => 2.0,
        (Dark, Fighting) | (Dark, Steel) | (Dark, Dark) => 0.5,

        // ??? (Curse) is neutral in both directions
        _ => 1.0,
    }
}
