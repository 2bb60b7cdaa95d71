//! The move listing, the move data table and the effect enumeration.

use crate::canonical::{const_to_effect, move_dex_name, name_to_enum};
use crate::classify::{self, EffectCoding, NO_EFFECT};
use crate::emit::{generated_file, lookup_map, CodeWriter};
use crate::errors::{check_position, DatagenError, DatagenResult};
use crate::registry::{MoveFlagLists, Registry};
use crate::source::{CacheLine, Domain};
use regex::Regex;
use schema::{to_id, Dex, DexMove, Generation, MoveTarget, TypeName};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::info;

static MOVE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"move (\w+),\W+(\w+),").expect("move pattern is valid"));

/// A move as it appears in the listing: its name and canonical effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEntry {
    pub name: String,
    pub effect: String,
}

impl CacheLine for MoveEntry {
    fn to_line(&self) -> String {
        format!("{} {}", self.name, self.effect)
    }

    fn from_line(line: &str) -> DatagenResult<Self> {
        match line.split_once(' ') {
            Some((name, effect)) if !name.is_empty() && !effect.is_empty() => Ok(MoveEntry {
                name: name.to_string(),
                effect: effect.to_string(),
            }),
            _ => Err(DatagenError::MalformedLine {
                domain: Domain::Moves,
                line: line.to_string(),
            }),
        }
    }
}

fn lookup<'d>(dex: &'d Dex, generation: Generation, name: &str) -> DatagenResult<&'d DexMove> {
    dex.get_move(name).ok_or_else(|| DatagenError::UnknownName {
        generation,
        domain: Domain::Moves,
        name: name.to_string(),
    })
}

/// Matcher for the move listing. The move on the `accepted + 1`th matching
/// line must carry that dex number.
pub fn match_move_line(
    registry: &Registry,
    dex: &Dex,
    line: &str,
    accepted: usize,
) -> DatagenResult<Option<MoveEntry>> {
    let Some(caps) = MOVE_LINE.captures(line) else {
        return Ok(None);
    };
    let constant = &caps[1];
    let mv = lookup(dex, registry.generation, move_dex_name(registry, constant))
        .map_err(|_| DatagenError::UnknownName {
            generation: registry.generation,
            domain: Domain::Moves,
            name: constant.to_string(),
        })?;
    check_position(&mv.name, mv.num, accepted + 1)?;

    let effect = if registry.high_critical_moves.iter().any(|m| *m == constant) {
        "HIGH_CRITICAL_EFFECT"
    } else {
        &caps[2]
    };
    Ok(Some(MoveEntry {
        name: name_to_enum(&mv.name),
        effect: const_to_effect(effect),
    }))
}

/// Flags packed into the extra byte of a Generation II move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFlags {
    pub metronome: bool,
    pub sleep_talk: bool,
    pub continuous: bool,
    pub flying: bool,
    pub underground: bool,
    /// 3-bit binding protocol, 0 for moves that do not bind.
    pub protocol: u8,
}

impl Default for MoveFlags {
    fn default() -> Self {
        Self {
            metronome: true,
            sleep_talk: true,
            continuous: false,
            flying: false,
            underground: false,
            protocol: 0,
        }
    }
}

impl MoveFlags {
    /// Flags of the move with id `id`. Only the first matching rule applies.
    pub fn for_move(lists: &MoveFlagLists, no_metronome: &[&str], id: &str) -> Self {
        let listed = |list: &[&str]| list.iter().any(|m| *m == id);
        let mut flags = MoveFlags::default();
        if listed(no_metronome) {
            flags.metronome = false;
        } else if listed(lists.continuous) && listed(lists.no_sleep_talk) {
            flags.sleep_talk = false;
            flags.continuous = true;
        } else if listed(lists.continuous) {
            flags.continuous = true;
        } else if listed(lists.no_sleep_talk) {
            flags.sleep_talk = false;
        } else if listed(lists.flying) {
            flags.flying = true;
        } else if listed(lists.underground) {
            flags.underground = true;
        } else if let Some(i) = lists.binding.iter().position(|b| *b == id) {
            flags.protocol = (i + 1) as u8 & 0b111;
        }
        flags
    }

    /// Bits 0-4 hold the booleans in declaration order, bits 5-7 the protocol.
    pub fn to_byte(self) -> u8 {
        u8::from(self.metronome)
            | u8::from(self.sleep_talk) << 1
            | u8::from(self.continuous) << 2
            | u8::from(self.flying) << 3
            | u8::from(self.underground) << 4
            | (self.protocol & 0b111) << 5
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub name: String,
    pub id: String,
    pub num: u16,
    pub effect: String,
    pub base_power: u8,
    pub move_type: TypeName,
    pub accuracy: u8,
    pub target: MoveTarget,
    pub pp: u8,
    pub chance: Option<u8>,
    pub priority: i8,
    pub flags: Option<MoveFlags>,
    pub display_name: String,
    pub desc: String,
    pub short_desc: String,
}

/// The move table of one generation and its effect enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTable {
    pub generation: Generation,
    pub records: Vec<MoveRecord>,
    pub coding: EffectCoding,
    /// How many moves Metronome can call.
    pub metronome: usize,
    /// Bytes taken by the packed move records.
    pub data_size: usize,
}

impl MoveTable {
    /// Distinct effects other than `None`, in listing order.
    pub fn effects(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|r| r.effect.as_str())
            .filter(|e| *e != NO_EFFECT && seen.insert(*e))
            .collect()
    }
}

/// Resolve listing entries against the dex and code their effects.
pub fn build(registry: &Registry, dex: &Dex, entries: &[MoveEntry]) -> DatagenResult<MoveTable> {
    let generation = registry.generation;
    let mut records = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let mv = lookup(dex, generation, &entry.name)?;
        check_position(&mv.name, mv.num, i + 1)?;
        let id = to_id(&mv.name);

        let move_type = match (generation, mv.move_type) {
            (Generation::Gen1, TypeName::Unknown) => TypeName::Normal,
            (_, t) => t,
        };
        let flags = registry
            .move_flags
            .as_ref()
            .map(|lists| MoveFlags::for_move(lists, registry.no_metronome, &id));

        records.push(MoveRecord {
            name: entry.name.clone(),
            id,
            num: mv.num,
            effect: entry.effect.clone(),
            base_power: mv.base_power,
            move_type,
            accuracy: mv.accuracy_percent(),
            target: mv.target,
            pp: mv.pp,
            chance: mv.secondary_chance.filter(|c| *c > 0),
            priority: mv.priority,
            flags,
            display_name: mv.name.clone(),
            desc: mv.desc.clone(),
            short_desc: mv.short_desc.clone(),
        });
    }

    let observed: Vec<&str> = records.iter().map(|r| r.effect.as_str()).collect();
    let coding = classify::classify(registry, observed)?;

    let excluded = records
        .iter()
        .filter(|r| registry.no_metronome.iter().any(|m| *m == r.id))
        .count();
    let metronome = records.len() - excluded;
    let data_size = records.len() * registry.move_data_size;

    info!(
        %generation,
        moves = records.len(),
        effects = coding.len(),
        metronome,
        "built move table"
    );
    Ok(MoveTable {
        generation,
        records,
        coding,
        metronome,
        data_size,
    })
}

impl MoveTable {
    pub fn render(&self, registry: &Registry) -> DatagenResult<String> {
        let n = self.records.len();
        let gen2 = registry.move_flags.is_some();
        let mut w = generated_file(&format!(
            "Generation {} moves.",
            self.generation.roman()
        ));
        w.line("use super::{percent, Target, Type};");
        w.blank();

        w.doc(&format!(
            "Representation of a Generation {} move.",
            self.generation.roman()
        ));
        w.line("#[repr(u8)]");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]");
        w.block("pub enum Move {", "}", |w| {
            w.line("None,");
            for record in &self.records {
                w.line(format!("{},", record.name));
            }
            if registry.skip_turn_sentinel {
                w.blank();
                w.doc("Sentinel used when a Pokémon's turn should be skipped (e.g. bound).");
                w.line("SkipTurn = 0xFF,");
            }
        });
        w.blank();

        w.block("impl Move {", "}", |w| {
            w.line(format!("pub const SIZE: usize = {n};"));
            w.line(format!("pub const DATA_SIZE: usize = {};", self.data_size));
            w.doc("How many moves Metronome can call.");
            w.line(format!("pub const METRONOME_SIZE: usize = {};", self.metronome));
            w.blank();
            w.block("pub fn get(self) -> &'static Data {", "}", |w| {
                if registry.skip_turn_sentinel {
                    w.line("debug_assert!(self != Move::None && self != Move::SkipTurn);");
                } else {
                    w.line("debug_assert!(self != Move::None);");
                }
                w.line("&DATA[self as usize - 1]");
            });
            w.blank();
            w.doc("The move's base PP.");
            w.block("pub fn pp(self) -> u8 {", "}", |w| {
                w.line("PP[self as usize - 1]");
            });
        });
        w.blank();

        render_data_struct(&mut w, gen2);
        w.block(&format!("static DATA: [Data; {n}] = ["), "];", |w| {
            for record in &self.records {
                render_record(w, record);
            }
        });
        w.blank();
        w.block(&format!("static PP: [u8; {n}] = ["), "];", |w| {
            for record in &self.records {
                w.line(format!("{}, // {}", record.pp, record.name));
            }
        });
        w.blank();

        self.render_effect(&mut w, registry);

        let entries: Vec<(String, String)> = self
            .records
            .iter()
            .map(|r| (r.id.clone(), format!("Move::{}", r.name)))
            .collect();
        w.blank();
        let mut out = w.finish();
        out.push_str(&lookup_map(Domain::Moves, "MOVES", "Move", &entries)?);
        Ok(out)
    }

    fn render_effect(&self, w: &mut CodeWriter, registry: &Registry) {
        let coding = &self.coding;
        let headed = coding.categories.len() > 1;

        w.doc("Representation of a move's effect.");
        w.line("#[repr(u8)]");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]");
        w.block("pub enum Effect {", "}", |w| {
            w.line("None,");
            for category in &coding.categories {
                if headed {
                    w.line(format!("// {}", category.name));
                }
                for effect in &category.members {
                    w.line(format!("{effect},"));
                }
            }
        });
        w.blank();

        w.block("impl Effect {", "}", |w| {
            w.line(format!("pub const SIZE: usize = {};", coding.len() + 1));
            if headed {
                for category in &coding.categories {
                    let range = category.range;
                    w.line(format!(
                        "pub const {}: std::ops::RangeInclusive<u8> = {}..={};",
                        category.name.to_uppercase(),
                        range.start,
                        range.end
                    ));
                }
            }
            for predicate in &coding.predicates {
                w.blank();
                w.doc(predicate.doc);
                w.block(&format!("pub fn {}(self) -> bool {{", predicate.name), "}", |w| {
                    w.line(format!(
                        "({}..={}).contains(&(self as u8))",
                        predicate.range.start, predicate.range.end
                    ));
                });
            }
            if !registry.high_critical_effects.is_empty() {
                w.blank();
                w.doc("Whether this effect has a high critical hit ratio.");
                w.block("pub fn is_high_critical(self) -> bool {", "}", |w| {
                    let arms: Vec<String> = registry
                        .high_critical_effects
                        .iter()
                        .map(|e| format!("Effect::{e}"))
                        .collect();
                    w.line(format!("matches!(self, {})", arms.join(" | ")));
                });
            }
        });
    }
}

fn render_data_struct(w: &mut CodeWriter, gen2: bool) {
    w.doc("Data associated with a Pokémon move.");
    w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
    w.block("pub struct Data {", "}", |w| {
        w.line("pub effect: Effect,");
        w.doc("The move's base power.");
        w.line("pub bp: u8,");
        w.doc("The move's type.");
        w.line("pub r#type: Type,");
        w.doc("The move's accuracy percentage.");
        w.line("pub accuracy: u8,");
        w.doc("The move's targeting behavior.");
        w.line("pub target: Target,");
        if gen2 {
            w.doc("The chance of the move's secondary effect occurring.");
            w.line("pub chance: u8,");
            w.doc("The priority of the move.");
            w.line("pub priority: i8,");
            w.doc("Miscellaneous extra data/flags.");
            w.line("pub extra: Extra,");
        }
    });
    w.blank();
    if gen2 {
        w.doc(
            "Extra move flags: Metronome (bit 0), Sleep Talk (bit 1), continuous (bit 2),\n\
             hits flying (bit 3), hits underground (bit 4), binding protocol (bits 5-7).",
        );
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
        w.line("pub struct Extra(pub u8);");
        w.blank();
        w.block("impl Extra {", "}", |w| {
            w.line(format!(
                "pub const DEFAULT: Extra = Extra({:#04x});",
                MoveFlags::default().to_byte()
            ));
            for (name, bit) in [
                ("metronome", 0),
                ("sleep_talk", 1),
                ("continuous", 2),
                ("flying", 3),
                ("underground", 4),
            ] {
                w.blank();
                w.block(&format!("pub fn {name}(self) -> bool {{"), "}", |w| {
                    w.line(format!("self.0 & (1 << {bit}) != 0"));
                });
            }
            w.blank();
            w.block("pub fn protocol(self) -> u8 {", "}", |w| {
                w.line("self.0 >> 5");
            });
        });
        w.blank();
    }
}

fn render_record(w: &mut CodeWriter, record: &MoveRecord) {
    w.line(format!("// {}", record.name));
    w.block("Data {", "},", |w| {
        w.line(format!("effect: Effect::{},", record.effect));
        w.line(format!("bp: {},", record.base_power));
        w.line(format!("r#type: Type::{},", record.move_type.ident()));
        w.line(format!("accuracy: percent({}),", record.accuracy));
        w.line(format!("target: Target::{},", record.target.engine_name()));
        if let Some(flags) = record.flags {
            match record.chance {
                Some(chance) => w.line(format!("chance: percent({chance}),")),
                None => w.line("chance: 0,"),
            };
            w.line(format!("priority: {},", record.priority));
            if flags == MoveFlags::default() {
                w.line("extra: Extra::DEFAULT,");
            } else {
                w.line(format!("extra: Extra({:#04x}),", flags.to_byte()));
            }
        }
    });
}
