//! Immutable configuration shared by every stage of the pipeline.
//!
//! Each supported generation gets one [`Registry`] value built entirely from
//! `&'static` data. Tables that are keyed by upstream spellings live in
//! `phf` maps so lookups need no runtime initialization.

use crate::errors::{DatagenError, DatagenResult};
use crate::source::Domain;
use phf::{phf_map, phf_set};
use schema::{Generation, TypeName};

/// A named run of effects that must be laid out contiguously, in this order,
/// at the front of its category.
#[derive(Debug, Clone, Copy)]
pub struct SubRange {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

/// A partition of the effect enumeration.
///
/// `members` decides membership; `sub_ranges` fixes the order of the front of
/// the category. A category with `fallback` set receives every effect not
/// claimed by another one.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub members: &'static [&'static str],
    pub sub_ranges: &'static [SubRange],
    pub fallback: bool,
}

/// One bound of a predicate, expressed against a category or sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start(&'static str),
    End(&'static str),
    /// The code just before the end of the named range.
    BeforeEnd(&'static str),
}

/// A membership helper emitted as two integer comparisons on the effect code.
#[derive(Debug, Clone, Copy)]
pub struct PredicateSpec {
    pub name: &'static str,
    pub doc: &'static str,
    pub from: Anchor,
    pub to: Anchor,
}

/// Effects believed to behave identically. The last member is canonical.
#[derive(Debug, Clone, Copy)]
pub struct MergeGroup {
    pub members: &'static [&'static str],
    pub tolerance: usize,
}

impl MergeGroup {
    pub fn canonical(&self) -> &'static str {
        self.members.last().copied().unwrap_or_default()
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self.members.split_last() {
            Some((_, aliases)) => aliases,
            None => &[],
        }
    }
}

/// Move ids that carry extra engine flags.
#[derive(Debug, Clone, Copy)]
pub struct MoveFlagLists {
    pub continuous: &'static [&'static str],
    pub no_sleep_talk: &'static [&'static str],
    pub flying: &'static [&'static str],
    pub underground: &'static [&'static str],
    /// Position + 1 becomes the 3-bit binding protocol.
    pub binding: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesGrammar {
    /// `const DEX_<NAME>` lines from the pokedex constants
    DexConstants,
    /// `const <NAME>` lines from the pokemon constants, minus eggs and Unown forms
    PokemonConstants,
}

#[derive(Debug, Clone, Copy)]
pub enum Precedence {
    /// Derived from the order of the matchup listing.
    Derived,
    /// Literal rank for every type.
    Ranked(&'static [TypeName]),
}

/// Type tables only Generation II carries.
#[derive(Debug, Clone, Copy)]
pub struct TypeExtras {
    pub indexes: &'static [(TypeName, u8)],
    /// Conversion 2 rolls below this engine index come from the table.
    pub conversion_limit: u8,
    pub conversion_placeholder_slot: usize,
    pub conversion_2_size: usize,
    pub hidden_power: &'static [TypeName],
    pub hidden_power_size: usize,
    pub showdown: &'static [TypeName],
}

#[derive(Debug, Clone, Copy)]
pub struct ItemConfig {
    pub special_held: &'static [&'static str],
    pub no_effect: &'static [&'static str],
    pub berries: &'static [&'static str],
    /// Fills the booster slot of the `???` type.
    pub unknown_type_booster: &'static str,
}

/// Everything the pipeline knows about one generation ahead of time.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    pub generation: Generation,
    pub domains: &'static [Domain],
    pub types: &'static [TypeName],
    pub categories: &'static [Category],
    pub predicates: &'static [PredicateSpec],
    /// Move listing constants whose id differs from the dex id of the move.
    pub move_aliases: &'static phf::Map<&'static str, &'static str>,
    pub high_critical_moves: &'static [&'static str],
    pub high_critical_effects: &'static [&'static str],
    pub merge_groups: &'static [MergeGroup],
    pub no_metronome: &'static [&'static str],
    pub move_flags: Option<MoveFlagLists>,
    /// Bytes per packed move record.
    pub move_data_size: usize,
    pub skip_turn_sentinel: bool,
    pub species: SpeciesGrammar,
    pub precedence: Precedence,
    pub type_extras: Option<TypeExtras>,
    pub items: Option<ItemConfig>,
}

/// Look up the registry for a generation number.
pub fn registry(num: u8) -> DatagenResult<&'static Registry> {
    match Generation::from_num(num) {
        Some(generation) => Ok(for_generation(generation)),
        None => Err(DatagenError::UnsupportedGeneration(num)),
    }
}

pub fn for_generation(generation: Generation) -> &'static Registry {
    match generation {
        Generation::Gen1 => &GEN1,
        Generation::Gen2 => &GEN2,
    }
}

// --- Generation I ---

const STAT_DOWN: &[&str] = &[
    "AccuracyDown1",
    "AttackDown1",
    "DefenseDown1",
    "DefenseDown2",
    "SpeedDown1",
];

const STAT_DOWN_CHANCE: &[&str] = &[
    "AttackDownChance",
    "DefenseDownChance",
    "SpeedDownChance",
    "SpecialDownChance",
];

const SECONDARY_CHANCE: &[&str] = &[
    "BurnChance1",
    "BurnChance2",
    "ConfusionChance",
    "FlinchChance1",
    "FlinchChance2",
    "FreezeChance",
    "ParalyzeChance1",
    "ParalyzeChance2",
    "PoisonChance1",
    "PoisonChance2",
];

// Rage always happens but is treated as special so it is only ever run once.
const ALWAYS_HAPPEN_SPECIAL: &[&str] = &[
    "DrainHP",
    "DreamEater",
    "Explode",
    "JumpKick",
    "PayDay",
    "Rage",
    "Recoil",
];

const GEN1_CATEGORIES: &[Category] = &[
    Category {
        name: "on_begin",
        members: &[
            "Conversion",
            "Haze",
            "SwitchAndTeleport",
            "Mist",
            "FocusEnergy",
            "Confusion",
            "Heal",
            "Transform",
            "LightScreen",
            "Reflect",
            "Poison",
            "Paralyze",
            "Substitute",
            "Mimic",
            "LeechSeed",
            "Splash",
        ],
        sub_ranges: &[],
        fallback: false,
    },
    Category {
        name: "on_end",
        members: &[
            "AccuracyDown1",
            "AttackDown1",
            "DefenseDown1",
            "DefenseDown2",
            "SpeedDown1",
            "AttackUp1",
            "AttackUp2",
            "Bide",
            "DefenseUp1",
            "DefenseUp2",
            "EvasionUp1",
            "Sleep",
            "SpecialUp1",
            "SpecialUp2",
            "SpeedUp2",
        ],
        sub_ranges: &[SubRange {
            name: "stat_down",
            members: STAT_DOWN,
        }],
        fallback: false,
    },
    Category {
        name: "special",
        members: &[
            "DrainHP",
            "DreamEater",
            "Explode",
            "JumpKick",
            "PayDay",
            "Rage",
            "Recoil",
            "Swift",
            "Charge",
            "SuperFang",
            "SpecialDamage",
            "Thrashing",
            "Binding",
        ],
        sub_ranges: &[SubRange {
            name: "always_happens",
            members: ALWAYS_HAPPEN_SPECIAL,
        }],
        fallback: false,
    },
    // DoubleHit and MultiHit are special too, but the engine treats the whole
    // group separately.
    Category {
        name: "multi",
        members: &["DoubleHit", "MultiHit", "Twineedle"],
        sub_ranges: &[],
        fallback: false,
    },
    Category {
        name: "other",
        members: &[],
        sub_ranges: &[
            SubRange {
                name: "stat_down_chance",
                members: STAT_DOWN_CHANCE,
            },
            SubRange {
                name: "secondary_chance",
                members: SECONDARY_CHANCE,
            },
        ],
        fallback: true,
    },
];

const GEN1_PREDICATES: &[PredicateSpec] = &[
    PredicateSpec {
        name: "on_begin",
        doc: "Whether this effect activates during the \"begin\" step of move execution.",
        from: Anchor::Start("on_begin"),
        to: Anchor::End("on_begin"),
    },
    PredicateSpec {
        name: "is_stat_down",
        doc: "Whether this effect lowers stats.",
        from: Anchor::Start("stat_down"),
        to: Anchor::End("stat_down"),
    },
    PredicateSpec {
        name: "on_end",
        doc: "Whether this effect activates during the \"end\" step of move execution.",
        from: Anchor::Start("on_end"),
        to: Anchor::End("on_end"),
    },
    PredicateSpec {
        name: "always_happens",
        doc: "Whether this effect is considered to \"always happen\".",
        from: Anchor::Start("always_happens"),
        to: Anchor::End("always_happens"),
    },
    // Includes the multi-hit effects up to, but not including, Twineedle.
    PredicateSpec {
        name: "is_special",
        doc: "Whether this effect is handled specially by the engine.",
        from: Anchor::Start("special"),
        to: Anchor::BeforeEnd("multi"),
    },
    PredicateSpec {
        name: "is_multi",
        doc: "Whether this effect is a multi-hit effect.",
        from: Anchor::Start("multi"),
        to: Anchor::End("multi"),
    },
    PredicateSpec {
        name: "is_stat_down_chance",
        doc: "Whether this effect has a chance of lowering stats.",
        from: Anchor::Start("stat_down_chance"),
        to: Anchor::End("stat_down_chance"),
    },
    // Includes Twineedle and the stat-down chances.
    PredicateSpec {
        name: "is_secondary_chance",
        doc: "Whether this effect has a secondary chance.",
        from: Anchor::End("multi"),
        to: Anchor::End("secondary_chance"),
    },
];

pub const GEN1_TYPES: &[TypeName] = &[
    TypeName::Normal,
    TypeName::Fighting,
    TypeName::Flying,
    TypeName::Poison,
    TypeName::Ground,
    TypeName::Rock,
    TypeName::Bug,
    TypeName::Ghost,
    TypeName::Fire,
    TypeName::Water,
    TypeName::Grass,
    TypeName::Electric,
    TypeName::Psychic,
    TypeName::Ice,
    TypeName::Dragon,
];

pub static GEN1: Registry = Registry {
    generation: Generation::Gen1,
    domains: &[Domain::Moves, Domain::Species, Domain::Types],
    types: GEN1_TYPES,
    categories: GEN1_CATEGORIES,
    predicates: GEN1_PREDICATES,
    move_aliases: &GEN1_MOVE_ALIASES,
    high_critical_moves: &["KARATE_CHOP", "RAZOR_LEAF", "CRABHAMMER", "SLASH"],
    high_critical_effects: &[],
    merge_groups: &[],
    no_metronome: &["metronome", "struggle"],
    move_flags: None,
    move_data_size: 4,
    skip_turn_sentinel: true,
    species: SpeciesGrammar::DexConstants,
    precedence: Precedence::Derived,
    type_extras: None,
    items: None,
};

// --- Generation II ---

const GEN2_CATEGORIES: &[Category] = &[Category {
    name: "effects",
    members: &[],
    sub_ranges: &[],
    fallback: true,
}];

pub const GEN2_TYPES: &[TypeName] = &[
    TypeName::Ground,
    TypeName::Rock,
    TypeName::Steel,
    TypeName::Normal,
    TypeName::Fighting,
    TypeName::Flying,
    TypeName::Poison,
    TypeName::Bug,
    TypeName::Ghost,
    TypeName::Unknown,
    TypeName::Fire,
    TypeName::Water,
    TypeName::Grass,
    TypeName::Electric,
    TypeName::Psychic,
    TypeName::Ice,
    TypeName::Dragon,
    TypeName::Dark,
];

// Order of the engine's type matchup table.
const GEN2_PRECEDENCE: &[TypeName] = &[
    TypeName::Unknown,
    TypeName::Normal,
    TypeName::Fire,
    TypeName::Water,
    TypeName::Electric,
    TypeName::Grass,
    TypeName::Ice,
    TypeName::Fighting,
    TypeName::Poison,
    TypeName::Ground,
    TypeName::Flying,
    TypeName::Psychic,
    TypeName::Bug,
    TypeName::Rock,
    TypeName::Ghost,
    TypeName::Dragon,
    TypeName::Dark,
    TypeName::Steel,
];

const GEN2_HIDDEN_POWER: &[TypeName] = &[
    TypeName::Normal,
    TypeName::Fighting,
    TypeName::Flying,
    TypeName::Poison,
    TypeName::Ground,
    TypeName::Rock,
    TypeName::Bug,
    TypeName::Ghost,
    TypeName::Steel,
    TypeName::Unknown,
    TypeName::Fire,
    TypeName::Water,
    TypeName::Grass,
    TypeName::Electric,
    TypeName::Psychic,
    TypeName::Ice,
    TypeName::Dragon,
    TypeName::Dark,
];

// Internal type constants; Present and Conversion 2 do arithmetic on these.
const GEN2_TYPE_INDEXES: &[(TypeName, u8)] = &[
    (TypeName::Normal, 0),
    (TypeName::Fighting, 1),
    (TypeName::Flying, 2),
    (TypeName::Poison, 3),
    (TypeName::Ground, 4),
    (TypeName::Rock, 5),
    (TypeName::Bug, 7),
    (TypeName::Ghost, 8),
    (TypeName::Steel, 9),
    (TypeName::Unknown, 19),
    (TypeName::Fire, 20),
    (TypeName::Water, 21),
    (TypeName::Grass, 22),
    (TypeName::Electric, 23),
    (TypeName::Psychic, 24),
    (TypeName::Ice, 25),
    (TypeName::Dragon, 26),
    (TypeName::Dark, 27),
];

const GEN2_SHOWDOWN_TYPES: &[TypeName] = &[
    TypeName::Unknown,
    TypeName::Bug,
    TypeName::Dark,
    TypeName::Dragon,
    TypeName::Electric,
    TypeName::Fighting,
    TypeName::Fire,
    TypeName::Flying,
    TypeName::Ghost,
    TypeName::Grass,
    TypeName::Ground,
    TypeName::Ice,
    TypeName::Normal,
    TypeName::Poison,
    TypeName::Psychic,
    TypeName::Rock,
    TypeName::Steel,
    TypeName::Water,
];

const GEN2_MERGE_GROUPS: &[MergeGroup] = &[
    MergeGroup {
        members: &["Frustration", "Return"],
        tolerance: 1,
    },
    MergeGroup {
        members: &["Endure", "Protect"],
        tolerance: 1,
    },
    MergeGroup {
        members: &["Toxic", "Poison"],
        tolerance: 1,
    },
    MergeGroup {
        members: &["AlwaysHit", "HighCritical", "Priority", "JumpKick", "None"],
        tolerance: 1,
    },
    MergeGroup {
        members: &["LightScreen", "Reflect"],
        tolerance: 1,
    },
    MergeGroup {
        members: &["SuperFang", "LevelDamage", "Psywave", "FixedDamage"],
        tolerance: 1,
    },
    MergeGroup {
        members: &["DoubleHit", "MultiHit"],
        tolerance: 1,
    },
    MergeGroup {
        members: &["MorningSun", "Synthesis", "Moonlight"],
        tolerance: 1,
    },
    // Dream Eater never triggers King's Rock.
    MergeGroup {
        members: &["DreamEater", "DrainHP"],
        tolerance: 2,
    },
    MergeGroup {
        members: &["FlameWheel", "SacredFire"],
        tolerance: 1,
    },
];

pub static GEN2: Registry = Registry {
    generation: Generation::Gen2,
    domains: &[Domain::Items, Domain::Moves, Domain::Effects, Domain::Species],
    types: GEN2_TYPES,
    categories: GEN2_CATEGORIES,
    predicates: &[],
    move_aliases: &GEN2_MOVE_ALIASES,
    // Razor Wind also has a high critical hit ratio but keeps its own effect.
    high_critical_moves: &[
        "KARATE_CHOP",
        "RAZOR_LEAF",
        "CRABHAMMER",
        "SLASH",
        "AEROBLAST",
        "CROSS_CHOP",
    ],
    high_critical_effects: &["HighCritical", "RazorWind"],
    merge_groups: GEN2_MERGE_GROUPS,
    no_metronome: &[
        "metronome",
        "struggle",
        "sketch",
        "mimic",
        "counter",
        "mirrorcoat",
        "protect",
        "detect",
        "endure",
        "destinybond",
        "sleeptalk",
        "thief",
    ],
    move_flags: Some(MoveFlagLists {
        continuous: &[
            "razorwind",
            "skyattack",
            "skullbash",
            "solarbeam",
            "fly",
            "rollout",
            "bide",
            "thrash",
            "petaldance",
            "outrage",
        ],
        no_sleep_talk: &[
            "skullbash",
            "razorwind",
            "skyattack",
            "solarbeam",
            "fly",
            "dig",
            "bide",
        ],
        flying: &["gust", "whirlwind", "thunder", "twister"],
        underground: &["earthquake", "fissure", "magnitude"],
        binding: &["bind", "wrap", "firespin", "clamp", "whirlpool"],
    }),
    move_data_size: 8,
    skip_turn_sentinel: false,
    species: SpeciesGrammar::PokemonConstants,
    precedence: Precedence::Ranked(GEN2_PRECEDENCE),
    type_extras: Some(TypeExtras {
        indexes: GEN2_TYPE_INDEXES,
        conversion_limit: 10,
        conversion_placeholder_slot: 6,
        conversion_2_size: 10,
        hidden_power: GEN2_HIDDEN_POWER,
        hidden_power_size: 16,
        showdown: GEN2_SHOWDOWN_TYPES,
    }),
    items: Some(ItemConfig {
        special_held: &["ThickClub", "LightBall", "BerserkGene", "Stick"],
        no_effect: &["AmuletCoin", "CleanseTag", "SmokeBall"],
        berries: &[
            "Berry",
            "BerryJuice",
            "GoldBerry",
            "MintBerry",
            "PSNCureBerry",
            "PRZCureBerry",
            "IceBerry",
            "BurntBerry",
            "MiracleBerry",
            "BitterBerry",
            "MysteryBerry",
        ],
        unknown_type_booster: "PolkadotBow",
    }),
};

// --- Shared tables ---

/// Upstream constants whose canonical name does not follow from their casing.
pub static NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    // Items
    "BLACKBELT_I" => "BlackBelt",
    "BLACKGLASSES" => "BlackGlasses",
    "BLK_APRICORN" => "BlackApricorn",
    "BLU_APRICORN" => "BlueApricorn",
    "BLUESKY_MAIL" => "BlueSkyMail",
    "BRIGHTPOWDER" => "BrightPowder",
    "ELIXER" => "Elixir",
    "ENERGYPOWDER" => "EnergyPowder",
    "GRN_APRICORN" => "GreenApricorn",
    "HP_UP" => "HPUp",
    "LITEBLUEMAIL" => "LightBlueMail",
    "MAX_ELIXER" => "MaxElixir",
    "MIRACLEBERRY" => "MiracleBerry",
    "MYSTERYBERRY" => "MysteryBerry",
    "NEVERMELTICE" => "NeverMeltIce",
    "PARLYZ_HEAL" => "ParylzeHeal",
    "PNK_APRICORN" => "PinkApricorn",
    "PORTRAITMAIL" => "PortrailMail",
    "PP_UP" => "PPUp",
    "PRZCUREBERRY" => "PRZCureBerry",
    "PSNCUREBERRY" => "PSNCureBerry",
    "RAGECANDYBAR" => "RageCandyBar",
    "SILVERPOWDER" => "SilverPowder",
    "SLOWPOKETAIL" => "SlowpokeTail",
    "THUNDERSTONE" => "ThunderStone",
    "TINYMUSHROOM" => "TinyMushroom",
    "TWISTEDSPOON" => "TwistedSpoon",
    "WHT_APRICORN" => "WhiteApricorn",
    "YLW_APRICORN" => "YellowApricorn",
    "RESTORE_PP" => "RestorePP",
    // Moves
    "SMELLING_SALT" => "SmellingSalts",
    // Effects
    "NO_ADDITIONAL_EFFECT" => "None",
    "EFFECT_NORMAL_HIT" => "None",
    "FLY_EFFECT" => "Charge",
    "TWO_TO_FIVE_ATTACKS_EFFECT" => "MultiHit",
    "ATTACK_TWICE_EFFECT" => "DoubleHit",
    "OHKO_EFFECT" => "OHKO",
    "TRAPPING_EFFECT" => "Binding",
    "EFFECT_OHKO" => "OHKO",
    "DRAIN_HP_EFFECT" => "DrainHP",
    "EFFECT_LEECH_HIT" => "DrainHP",
    "EFFECT_ACCURACY_DOWN_HIT" => "AccuracyDownChance",
    "EFFECT_ACCURACY_DOWN" => "AccuracyDown1",
    "EFFECT_ALL_UP_HIT" => "AllStatUpChance",
    "EFFECT_ATTACK_DOWN_HIT" => "AttackDownChance",
    "EFFECT_ATTACK_DOWN" => "AttackDown1",
    "EFFECT_ATTACK_UP_HIT" => "AttackUpChance",
    "EFFECT_ATTACK_UP" => "AttackUp1",
    "EFFECT_BURN_HIT" => "BurnChance",
    "EFFECT_CONFUSE_HIT" => "ConfusionChance",
    "EFFECT_CONFUSE" => "Confusion",
    "EFFECT_DEFENSE_DOWN_HIT" => "DefenseDownChance",
    "EFFECT_DEFENSE_DOWN" => "DefenseDown1",
    "EFFECT_DEFENSE_UP_HIT" => "DefenseUpChance",
    "EFFECT_DEFENSE_UP" => "DefenseUp1",
    "EFFECT_EVASION_DOWN" => "EvasionDown1",
    "EFFECT_EVASION_UP" => "EvasionUp1",
    "EFFECT_FLINCH_HIT" => "FlinchChance",
    "EFFECT_FREEZE_HIT" => "FreezeChance",
    "EFFECT_PARALYZE_HIT" => "ParalyzeChance",
    "EFFECT_POISON_HIT" => "PoisonChance",
    "EFFECT_POISON_MULTI_HIT" => "Twineedle",
    "EFFECT_PRIORITY_HIT" => "Priority",
    "EFFECT_RAMPAGE" => "Thrashing",
    "EFFECT_RECOIL_HIT" => "Recoil",
    "EFFECT_STATIC_DAMAGE" => "FixedDamage",
    "THRASH_PETAL_DANCE_EFFECT" => "Thrashing",
    "EFFECT_SELFDESTRUCT" => "Explode",
    "EFFECT_SP_ATK_UP" => "SpAtkUp1",
    "EFFECT_SP_DEF_DOWN_HIT" => "SpDefDownChance",
    "EFFECT_SPEED_DOWN" => "SpeedDown1",
    "EFFECT_SPEED_DOWN_HIT" => "SpeedDownChance",
    "EFFECT_TRAP_TARGET" => "Binding",
    "EFFECT_RESET_STATS" => "Haze",
    "EFFECT_FLY" => "FlyDig",
};

/// Generation I move constants mapped to dex names.
pub static GEN1_MOVE_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "PSYCHIC_M" => "Psychic",
    "HI_JUMP_KICK" => "High Jump Kick",
    "VICEGRIP" => "Vise Grip",
};

/// Generation II move constants mapped to dex names.
pub static GEN2_MOVE_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "PSYCHIC_M" => "Psychic",
    "HI_JUMP_KICK" => "High Jump Kick",
    "VICEGRIP" => "Vise Grip",
    "FAINT_ATTACK" => "Feint Attack",
};

/// Effect listing labels whose name differs from the move table's effect name.
pub static EFFECT_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "NormalHit" => "None",
    "DoSleep" => "Sleep",
    "PoisonHit" => "PoisonChance",
    "LeechHit" => "DrainHP",
    "BurnHit" => "BurnChance",
    "FreezeHit" => "FreezeChance",
    "ParalyzeHit" => "ParalyzeChance",
    "Fly" => "FlyDig",
    "Selfdestruct" => "Explode",
    "ResetStats" => "Haze",
    "Rampage" => "Thrashing",
    "StaticDamage" => "FixedDamage",
    "PoisonMultiHit" => "Twineedle",
    "FlinchHit" => "FlinchChance",
    "OHKOHit" => "OHKO",
    "TrapTarget" => "Binding",
    "RecoilHit" => "Recoil",
    "DoConfuse" => "Confusion",
    "ConfuseHit" => "ConfusionChance",
    "DoPoison" => "Poison",
    "DoParalyze" => "Paralyze",
    "AllUpHit" => "AllStatUpChance",
};

/// Structural commands with no behavior of their own.
pub static SKIP: phf::Set<&'static str> = phf_set! {
    "checkobedience",
    "lowersub",
    "raisesub",
    "moveanim",
    "moveanimnosub",
    "endmove",
    "statupanim",
    "statupmessage",
    "statupfailtext",
};

/// Engine operations for commands that map onto a single call.
pub static OPERATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "checkhit" => "check_hit",
    "critical" => "check_critical_hit",
    "stab" => "adjust_damage",
    "damagevariation" => "randomize_damage",
    "applydamage" => "apply_damage",
    "buildopponentrage" => "build_rage",
    "kingsrock" => "kings_rock",
    "burntarget" => "effects::burn_chance",
    "freezetarget" => "effects::freeze_chance",
    "ohko" => "effects::ohko",
    "startsun" => "effects::sunny_day",
    "startsandstorm" => "effects::sandstorm",
    "paralyzetarget" => "effects::paralyze_chance",
    "arenatrap" => "effects::mean_look",
    "traptarget" => "effects::binding",
    "flinchtarget" => "effects::flinch_chance",
    "poisontarget" => "effects::poison_chance",
    "sleeptarget" => "effects::sleep",
    "resetstats" => "effects::haze",
    "confuse" => "effects::confusion",
    "constantdamage" => "effects::fixed_damage",
    "confusetarget" => "effects::confusion_chance",
    "selfdestruct" => "effects::explode",
    "rechargenextturn" => "effects::hyper_beam",
    "draintarget" => "effects::drain_hp",
    "skipsuncharge" => "effects::solar_beam",
    "curl" => "effects::defense_curl",
    "defenseup" => "effects::boost",
    "screen" => "effects::screens",
    "tristatuschance" => "effects::tri_attack",
    "defrost" => "effects::defrost",
    "happinesspower" => "effects::happiness",
    "startrain" => "effects::rain_dance",
    "clearhazards" => "effects::rapid_spin",
    "healnite" => "effects::weather_heal",
    "allstatsup" => "effects::all_stat_up_chance",
};

/// Commands spliced inline instead of called.
pub static SNIPPETS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "usedmovetext" => &[
        "// usedmovetext",
        "log.used_move(ident, state.mv, foe_ident)?;",
    ],
    "doturn" => &[
        "// doturn",
        "let skip_pp = state.mv == Move::Struggle",
        "    || volatiles.beat_up",
        "    || volatiles.thrashing",
        "    || volatiles.bide;",
        "if !skip_pp {",
        "    decrement_pp(side, state.mv, state.slot);",
        "}",
        "",
    ],
    "criticaltext" => &[
        "",
        "// criticaltext",
        "if state.crit {",
        "    log.crit(foe_ident)?;",
        "}",
    ],
    "supereffectivetext" => &[
        "// supereffectivetext",
        "if !state.immune() {",
        "    if state.effectiveness > Effectiveness::Neutral {",
        "        log.super_effective(foe_ident)?;",
        "    } else if state.effectiveness < Effectiveness::Neutral {",
        "        log.resisted(foe_ident)?;",
        "    }",
        "}",
        "",
    ],
    "checkfaint" => &[
        "destiny_bond(battle, player, state, log)?;",
    ],
    "ragedamage" => &[
        "// ragedamage",
        "debug_assert!(volatiles.rage);",
        "state.damage = state.damage.saturating_mul(u16::from(volatiles.rage_count.saturating_add(1)));",
        "",
    ],
};

/// Engine helpers imported by the generated dispatcher.
pub const IMPORTS: &[&str] = &[
    "adjust_damage",
    "apply_damage",
    "build_rage",
    "calc_damage",
    "check_critical_hit",
    "check_hit",
    "decrement_pp",
    "destiny_bond",
    "kings_rock",
    "randomize_damage",
];
