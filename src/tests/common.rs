use crate::canonical::display_name;
use crate::errors::{DatagenError, DatagenResult};
use crate::source::{Domain, Fetch};
use schema::{
    to_id, BaseStats, Dex, DexItem, DexMove, DexSpecies, Gender, Generation, MoveTarget, TypeName,
};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// An in-memory listing source that counts how often it is asked.
#[derive(Default)]
pub struct MemoryFetch {
    listings: BTreeMap<(Generation, Domain), String>,
    calls: Cell<usize>,
}

impl MemoryFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listing for one generation and domain.
    pub fn with(mut self, generation: Generation, domain: Domain, text: impl Into<String>) -> Self {
        self.listings.insert((generation, domain), text.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Fetch for MemoryFetch {
    fn fetch(&self, generation: Generation, domain: Domain) -> DatagenResult<String> {
        self.calls.set(self.calls.get() + 1);
        self.listings
            .get(&(generation, domain))
            .cloned()
            .ok_or_else(|| DatagenError::MissingSource(PathBuf::from(format!("{generation}/{domain}.asm"))))
    }
}

pub fn dex_move(num: u16, name: &str, move_type: TypeName) -> DexMove {
    DexMove {
        num,
        name: name.to_string(),
        base_power: 40,
        move_type,
        accuracy: Some(100),
        pp: 35,
        target: MoveTarget::Normal,
        secondary_chance: None,
        priority: 0,
        desc: format!("{name} does something."),
        short_desc: format!("{name} does something."),
    }
}

pub fn dex_species(num: u16, name: &str, types: &[TypeName], gender: Gender) -> DexSpecies {
    DexSpecies {
        num,
        name: name.to_string(),
        types: types.to_vec(),
        base_stats: BaseStats {
            hp: 45,
            atk: 49,
            def: 49,
            spa: 65,
            spd: 60,
            spe: 45,
        },
        gender,
    }
}

pub fn insert_move(dex: &mut Dex, mv: DexMove) {
    dex.moves.insert(to_id(&mv.name), mv);
}

pub fn insert_species(dex: &mut Dex, species: DexSpecies) {
    dex.species.insert(to_id(&species.name), species);
}

// --- Generation I ---

/// (name, listing constant, effect constant); the dex number is the position + 1.
pub const GEN1_MOVES: &[(&str, &str, &str)] = &[
    ("Pound", "POUND", "NO_ADDITIONAL_EFFECT"),
    ("Karate Chop", "KARATE_CHOP", "NO_ADDITIONAL_EFFECT"),
    ("Double Slap", "DOUBLESLAP", "TWO_TO_FIVE_ATTACKS_EFFECT"),
    ("Pay Day", "PAY_DAY", "PAY_DAY_EFFECT"),
    ("Fire Punch", "FIRE_PUNCH", "BURN_SIDE_EFFECT1"),
    ("Ice Punch", "ICE_PUNCH", "FREEZE_SIDE_EFFECT"),
    ("Thunder Punch", "THUNDERPUNCH", "PARALYZE_SIDE_EFFECT1"),
    ("Guillotine", "GUILLOTINE", "OHKO_EFFECT"),
    ("Swords Dance", "SWORDS_DANCE", "ATTACK_UP2_EFFECT"),
    ("Wrap", "WRAP", "TRAPPING_EFFECT"),
    ("Double Kick", "DOUBLE_KICK", "ATTACK_TWICE_EFFECT"),
    ("Jump Kick", "JUMP_KICK", "JUMP_KICK_EFFECT"),
    ("Sand Attack", "SAND_ATTACK", "ACCURACY_DOWN1_EFFECT"),
    ("Headbutt", "HEADBUTT", "FLINCH_SIDE_EFFECT2"),
    ("Tail Whip", "TAIL_WHIP", "DEFENSE_DOWN1_EFFECT"),
    ("Poison Sting", "POISON_STING", "POISON_SIDE_EFFECT1"),
    ("Twineedle", "TWINEEDLE", "TWINEEDLE_EFFECT"),
    ("Growl", "GROWL", "ATTACK_DOWN1_EFFECT"),
    ("Supersonic", "SUPERSONIC", "CONFUSION_EFFECT"),
    ("Acid", "ACID", "DEFENSE_DOWN_SIDE_EFFECT"),
    ("Fire Blast", "FIRE_BLAST", "BURN_SIDE_EFFECT2"),
    ("Stomp", "STOMP", "FLINCH_SIDE_EFFECT1"),
    ("Body Slam", "BODY_SLAM", "PARALYZE_SIDE_EFFECT2"),
    ("Sludge", "SLUDGE", "POISON_SIDE_EFFECT2"),
    ("Psybeam", "PSYBEAM", "CONFUSION_SIDE_EFFECT"),
    ("Aurora Beam", "AURORA_BEAM", "ATTACK_DOWN_SIDE_EFFECT"),
    ("Bubble Beam", "BUBBLEBEAM", "SPEED_DOWN_SIDE_EFFECT"),
    ("Psychic", "PSYCHIC_M", "SPECIAL_DOWN_SIDE_EFFECT"),
    ("Screech", "SCREECH", "DEFENSE_DOWN2_EFFECT"),
    ("String Shot", "STRING_SHOT", "SPEED_DOWN1_EFFECT"),
    ("Absorb", "ABSORB", "DRAIN_HP_EFFECT"),
    ("Dream Eater", "DREAM_EATER", "DREAM_EATER_EFFECT"),
    ("Self-Destruct", "SELFDESTRUCT", "EXPLODE_EFFECT"),
    ("Rage", "RAGE", "RAGE_EFFECT"),
    ("Take Down", "TAKE_DOWN", "RECOIL_EFFECT"),
    ("Swift", "SWIFT", "SWIFT_EFFECT"),
    ("Metronome", "METRONOME", "METRONOME_EFFECT"),
    ("Struggle", "STRUGGLE", "RECOIL_EFFECT"),
];

/// (name, listing constant, types).
pub const GEN1_SPECIES: &[(&str, &str, &[TypeName])] = &[
    ("Bulbasaur", "BULBASAUR", &[TypeName::Grass, TypeName::Poison]),
    ("Charmander", "CHARMANDER", &[TypeName::Fire]),
    ("Pidgey", "PIDGEY", &[TypeName::Normal, TypeName::Flying]),
    ("Geodude", "GEODUDE", &[TypeName::Rock, TypeName::Ground]),
    ("Mr. Mime", "MR_MIME", &[TypeName::Psychic]),
];

pub fn gen1_dex() -> Dex {
    let mut dex = Dex::new(Generation::Gen1);
    for (i, (name, _, _)) in GEN1_MOVES.iter().enumerate() {
        let move_type = if *name == "Psychic" {
            TypeName::Psychic
        } else {
            TypeName::Normal
        };
        let mut mv = dex_move(i as u16 + 1, name, move_type);
        if *name == "Pound" {
            mv.short_desc = "No additional effect.".to_string();
        }
        insert_move(&mut dex, mv);
    }
    for (i, (name, _, types)) in GEN1_SPECIES.iter().enumerate() {
        insert_species(
            &mut dex,
            dex_species(i as u16 + 1, name, types, Gender::Ratio { female: 0.5 }),
        );
    }
    dex
}

pub fn gen1_moves_listing() -> String {
    let mut text = String::from("Moves:\n; name, effect, power, type, accuracy, pp\n");
    for (_, constant, effect) in GEN1_MOVES {
        text.push_str(&format!(
            "\tmove {:<14} {:<28} 40, NORMAL, 100, 35\n",
            format!("{constant},"),
            format!("{effect},")
        ));
    }
    text.push_str("\tassert_table_length NUM_ATTACKS\n");
    text
}

pub fn gen1_species_listing() -> String {
    let mut text = String::from("\tconst_def 1\n");
    for (i, (_, constant, _)) in GEN1_SPECIES.iter().enumerate() {
        text.push_str(&format!("\tconst DEX_{constant:<10} ; {}\n", i + 1));
    }
    text.push_str("NUM_POKEMON EQU const_value - 1\n");
    text
}

/// Includes every matchup that decides the outcome against a dual-typed
/// fixture species, interleaved with irrelevant and repeated ones.
pub const GEN1_TYPES_LISTING: &str = "TypeEffects:
; attacker, defender, *=
\tdb WATER, FIRE, SUPER_EFFECTIVE
\tdb POISON, POISON, NOT_VERY_EFFECTIVE
\tdb GROUND, POISON, SUPER_EFFECTIVE
\tdb FIGHTING, NORMAL, SUPER_EFFECTIVE
\tdb POISON, GRASS, SUPER_EFFECTIVE
\tdb PSYCHIC_TYPE, PSYCHIC_TYPE, NOT_VERY_EFFECTIVE
\tdb GROUND, GRASS, NOT_VERY_EFFECTIVE
\tdb FIGHTING, FLYING, NOT_VERY_EFFECTIVE
\tdb POISON, POISON, NOT_VERY_EFFECTIVE
\tdb -1 ; end
";

/// Every effect name the Generation I fixture moves carry, `None` included.
pub fn gen1_effects() -> Vec<&'static str> {
    vec![
        "None",
        "HighCritical",
        "MultiHit",
        "PayDay",
        "BurnChance1",
        "FreezeChance",
        "ParalyzeChance1",
        "OHKO",
        "AttackUp2",
        "Binding",
        "DoubleHit",
        "JumpKick",
        "AccuracyDown1",
        "FlinchChance2",
        "DefenseDown1",
        "PoisonChance1",
        "Twineedle",
        "AttackDown1",
        "Confusion",
        "DefenseDownChance",
        "BurnChance2",
        "FlinchChance1",
        "ParalyzeChance2",
        "PoisonChance2",
        "ConfusionChance",
        "AttackDownChance",
        "SpeedDownChance",
        "SpecialDownChance",
        "DefenseDown2",
        "SpeedDown1",
        "DrainHP",
        "DreamEater",
        "Explode",
        "Rage",
        "Recoil",
        "Swift",
        "Metronome",
    ]
}

pub fn gen1_fetch() -> MemoryFetch {
    MemoryFetch::new()
        .with(Generation::Gen1, Domain::Moves, gen1_moves_listing())
        .with(Generation::Gen1, Domain::Species, gen1_species_listing())
        .with(Generation::Gen1, Domain::Types, GEN1_TYPES_LISTING)
}

// --- Generation II ---

pub const GEN2_MOVES: &[(&str, &str, &str)] = &[
    ("Pound", "POUND", "EFFECT_NORMAL_HIT"),
    ("Karate Chop", "KARATE_CHOP", "EFFECT_NORMAL_HIT"),
    ("Absorb", "ABSORB", "EFFECT_LEECH_HIT"),
    ("Dream Eater", "DREAM_EATER", "EFFECT_DREAM_EATER"),
    ("Swords Dance", "SWORDS_DANCE", "EFFECT_ATTACK_UP_2"),
    ("Growl", "GROWL", "EFFECT_ATTACK_DOWN"),
    ("Bubble Beam", "BUBBLEBEAM", "EFFECT_SPEED_DOWN_HIT"),
    ("Poison Sting", "POISON_STING", "EFFECT_POISON_HIT"),
    ("Metronome", "METRONOME", "EFFECT_METRONOME"),
    ("Sleep Powder", "SLEEP_POWDER", "EFFECT_SLEEP"),
    ("Return", "RETURN", "EFFECT_RETURN"),
    ("Frustration", "FRUSTRATION", "EFFECT_FRUSTRATION"),
    ("Fire Spin", "FIRE_SPIN", "EFFECT_TRAP_TARGET"),
    ("Fly", "FLY", "EFFECT_FLY"),
    ("Struggle", "STRUGGLE", "EFFECT_RECOIL_HIT"),
    ("Psychic", "PSYCHIC_M", "EFFECT_SP_DEF_DOWN_HIT"),
];

pub const GEN2_SPECIES: &[(&str, &str, &[TypeName], Gender)] = &[
    (
        "Bulbasaur",
        "BULBASAUR",
        &[TypeName::Grass, TypeName::Poison],
        Gender::Ratio { female: 0.125 },
    ),
    (
        "Magnemite",
        "MAGNEMITE",
        &[TypeName::Electric, TypeName::Steel],
        Gender::Genderless,
    ),
    (
        "Nidoran-F",
        "NIDORAN_F",
        &[TypeName::Poison],
        Gender::Ratio { female: 1.0 },
    ),
];

/// (constant, held effect constant); listing order.
pub const GEN2_ITEMS: &[(&str, &str)] = &[
    ("POKE_BALL", "HELD_NONE"),
    ("BICYCLE", "KEY"),
    ("MOON_STONE", "HELD_NONE"),
    ("BRIGHTPOWDER", "HELD_BRIGHTPOWDER"),
    ("PINK_BOW", "HELD_NORMAL_BOOST"),
    ("BLACKBELT_I", "HELD_FIGHTING_BOOST"),
    ("SHARP_BEAK", "HELD_FLYING_BOOST"),
    ("POISON_BARB", "HELD_POISON_BOOST"),
    ("SOFT_SAND", "HELD_GROUND_BOOST"),
    ("HARD_STONE", "HELD_ROCK_BOOST"),
    ("SILVERPOWDER", "HELD_BUG_BOOST"),
    ("SPELL_TAG", "HELD_GHOST_BOOST"),
    ("METAL_COAT", "HELD_STEEL_BOOST"),
    ("CHARCOAL", "HELD_FIRE_BOOST"),
    ("MYSTIC_WATER", "HELD_WATER_BOOST"),
    ("MIRACLE_SEED", "HELD_GRASS_BOOST"),
    ("MAGNET", "HELD_ELECTRIC_BOOST"),
    ("TWISTEDSPOON", "HELD_PSYCHIC_BOOST"),
    ("NEVERMELTICE", "HELD_ICE_BOOST"),
    ("DRAGON_FANG", "HELD_DRAGON_BOOST"),
    ("BLACKGLASSES", "HELD_DARK_BOOST"),
    ("POLKADOT_BOW", "HELD_NORMAL_BOOST"),
    ("LEFTOVERS", "HELD_LEFTOVERS"),
    ("THICK_CLUB", "HELD_NONE"),
    ("AMULET_COIN", "HELD_AMULET_COIN"),
    ("BERRY", "HELD_BERRY"),
    ("GOLD_BERRY", "HELD_BERRY"),
    ("BERRY_JUICE", "HELD_BERRY"),
    ("MINT_BERRY", "HELD_HEAL_SLEEP"),
    ("PSNCUREBERRY", "HELD_HEAL_POISON"),
    ("PRZCUREBERRY", "HELD_HEAL_PARALYZE"),
    ("ICE_BERRY", "HELD_HEAL_BURN"),
    ("BURNT_BERRY", "HELD_HEAL_FREEZE"),
    ("MIRACLEBERRY", "HELD_HEAL_STATUS"),
    ("BITTER_BERRY", "HELD_HEAL_CONFUSION"),
    ("MYSTERYBERRY", "HELD_RESTORE_PP"),
    ("SMOKE_BALL", "HELD_ESCAPE"),
    ("LIGHT_BALL", "HELD_NONE"),
    ("QUICK_CLAW", "HELD_QUICK_CLAW"),
    ("FLOWER_MAIL", "HELD_NONE"),
    ("TERU_SAMA", "HELD_NONE"),
    ("SURF_MAIL", "HELD_NONE"),
];

/// Items the Generation II dex does not know.
pub const GEN2_MISSING_ITEMS: &[&str] = &["TeruSama"];

pub fn gen2_items_listing() -> String {
    let mut text = String::from("ItemAttributes:\n; entries correspond to item ids\n\titem_attribute $9999, HELD_NONE, 0, CANT_SELECT, ITEM, ITEMMENU_NOUSE, ITEMMENU_NOUSE\n");
    for (constant, held) in GEN2_ITEMS {
        text.push_str(&format!("; {constant}\n"));
        if *held == "KEY" {
            text.push_str("\titem_attribute 0, HELD_NONE, 0, CANT_SELECT, KEY_ITEM, ITEMMENU_NOUSE, ITEMMENU_NOUSE\n");
        } else {
            text.push_str(&format!(
                "\titem_attribute 100, {held}, 0, CANT_SELECT, ITEM, ITEMMENU_NOUSE, ITEMMENU_NOUSE\n"
            ));
        }
    }
    text.push_str("; BUG: This item has no name.\n");
    text.push_str("\titem_attribute 0, HELD_NONE, 0, CANT_SELECT, ITEM, ITEMMENU_NOUSE, ITEMMENU_NOUSE\n");
    text.push_str("; HM01\n");
    text.push_str("\titem_attribute 0, HELD_NONE, 0, CANT_SELECT, TM_HM, ITEMMENU_NOUSE, ITEMMENU_NOUSE\n");
    text
}

/// `MoveEffects` and `Frustration` fall through to the label after them.
pub const GEN2_EFFECTS_LISTING: &str = "MoveEffects:
NormalHit:
\tcheckobedience
\tusedmovetext
\tdoturn
\tcritical
\tdamagestats
\tdamagecalc
\tstab
\tdamagevariation
\tcheckhit
\tmoveanim
\tfailuretext
\tapplydamage
\tcriticaltext
\tsupereffectivetext
\tcheckfaint
\tbuildopponentrage
\tkingsrock
\tendmove

DoSleep:
\tcheckobedience
\tusedmovetext
\tdoturn
\tcheckhit
\tmoveanim
\tsleeptarget
\tendmove

LeechHit:
\tcheckobedience
\tusedmovetext
\tdoturn
\tcritical
\tdamagestats
\tdamagecalc
\tstab
\tdamagevariation
\tcheckhit
\tapplydamage
\tcriticaltext
\tsupereffectivetext
\tdraintarget
\tbuildopponentrage
\tkingsrock
\tendmove

DreamEater:
\tcheckobedience
\tusedmovetext
\tdoturn
\tcritical
\tdamagestats
\tdamagecalc
\tstab
\tdamagevariation
\tcheckhit
\tapplydamage
\tcriticaltext
\tsupereffectivetext
\teatdream
\tbuildopponentrage
\tendmove

Frustration:
Return:
\tcheckobedience
\tusedmovetext
\tdoturn
\tcritical
\thappinesspower
\tdamagestats
\tdamagecalc
\tstab
\tdamagevariation
\tcheckhit
\tapplydamage
\tendmove

Metronome:
\tcheckobedience
\tusedmovetext
\tdoturn
\tmetronome
\tendmove
";

pub fn gen2_dex() -> Dex {
    let mut dex = Dex::new(Generation::Gen2);
    for (i, (name, _, _)) in GEN2_MOVES.iter().enumerate() {
        let move_type = if *name == "Psychic" {
            TypeName::Psychic
        } else {
            TypeName::Normal
        };
        let mut mv = dex_move(i as u16 + 1, name, move_type);
        if *name == "Poison Sting" {
            mv.secondary_chance = Some(30);
        }
        insert_move(&mut dex, mv);
    }
    for (i, (name, _, types, gender)) in GEN2_SPECIES.iter().enumerate() {
        insert_species(&mut dex, dex_species(i as u16 + 1, name, types, *gender));
    }
    for (i, (constant, held)) in GEN2_ITEMS.iter().enumerate() {
        if *held == "KEY" {
            continue;
        }
        let ident = crate::canonical::const_to_enum(constant);
        if GEN2_MISSING_ITEMS.contains(&ident.as_str()) {
            continue;
        }
        dex.items.insert(
            to_id(&ident),
            DexItem {
                name: display_name(&ident),
                desc: format!("Item {} does something.", i + 1),
            },
        );
    }
    dex
}

pub fn gen2_moves_listing() -> String {
    let mut text = String::from("Moves:\n; entries correspond to move ids\n");
    for (_, constant, effect) in GEN2_MOVES {
        text.push_str(&format!(
            "\tmove {:<14} {:<24} 40, NORMAL,       100, 35,   0\n",
            format!("{constant},"),
            format!("{effect},")
        ));
    }
    text
}

/// Moves whose listing constant does not reduce to their dex id:
/// (name, listing constant, effect constant, type).
pub const GEN1_RENAMED_MOVES: &[(&str, &str, &str, TypeName)] = &[
    ("High Jump Kick", "HI_JUMP_KICK", "JUMP_KICK_EFFECT", TypeName::Fighting),
    ("Vise Grip", "VICEGRIP", "NO_ADDITIONAL_EFFECT", TypeName::Normal),
    ("Psychic", "PSYCHIC_M", "SPECIAL_DOWN_SIDE_EFFECT", TypeName::Psychic),
];

pub const GEN2_RENAMED_MOVES: &[(&str, &str, &str, TypeName)] = &[
    ("High Jump Kick", "HI_JUMP_KICK", "EFFECT_JUMP_KICK", TypeName::Fighting),
    ("Vise Grip", "VICEGRIP", "EFFECT_NORMAL_HIT", TypeName::Normal),
    ("Feint Attack", "FAINT_ATTACK", "EFFECT_ALWAYS_HIT", TypeName::Dark),
    ("Psychic", "PSYCHIC_M", "EFFECT_SP_DEF_DOWN_HIT", TypeName::Psychic),
];

/// A dex holding only `moves`, numbered in order.
pub fn renamed_moves_dex(generation: Generation, moves: &[(&str, &str, &str, TypeName)]) -> Dex {
    let mut dex = Dex::new(generation);
    for (i, (name, _, _, move_type)) in moves.iter().enumerate() {
        insert_move(&mut dex, dex_move(i as u16 + 1, name, *move_type));
    }
    dex
}

pub fn renamed_moves_listing(moves: &[(&str, &str, &str, TypeName)]) -> String {
    let mut text = String::from("Moves:\n");
    for (_, constant, effect, _) in moves {
        text.push_str(&format!(
            "\tmove {:<14} {:<24} 85, FIGHTING,     90, 20\n",
            format!("{constant},"),
            format!("{effect},")
        ));
    }
    text
}

pub fn gen2_species_listing() -> String {
    let mut text = String::from("\tconst_def 1\n");
    for (i, (_, constant, _, _)) in GEN2_SPECIES.iter().enumerate() {
        text.push_str(&format!("\tconst {constant:<10} ; {:02x}\n", i + 1));
    }
    text.push_str("\tconst EGG ; fd\n");
    text.push_str("\tconst UNOWN_A ; 1\n");
    text
}

pub fn gen2_fetch() -> MemoryFetch {
    MemoryFetch::new()
        .with(Generation::Gen2, Domain::Items, gen2_items_listing())
        .with(Generation::Gen2, Domain::Moves, gen2_moves_listing())
        .with(Generation::Gen2, Domain::Effects, GEN2_EFFECTS_LISTING)
        .with(Generation::Gen2, Domain::Species, gen2_species_listing())
}

/// Both generations' listings in one source.
pub fn full_fetch() -> MemoryFetch {
    MemoryFetch::new()
        .with(Generation::Gen1, Domain::Moves, gen1_moves_listing())
        .with(Generation::Gen1, Domain::Species, gen1_species_listing())
        .with(Generation::Gen1, Domain::Types, GEN1_TYPES_LISTING)
        .with(Generation::Gen2, Domain::Items, gen2_items_listing())
        .with(Generation::Gen2, Domain::Moves, gen2_moves_listing())
        .with(Generation::Gen2, Domain::Effects, GEN2_EFFECTS_LISTING)
        .with(Generation::Gen2, Domain::Species, gen2_species_listing())
}
