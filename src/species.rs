//! The species listing and the species data table.

use crate::canonical::name_to_enum;
use crate::emit::{generated_file, lookup_map};
use crate::errors::{check_position, DatagenError, DatagenResult};
use crate::registry::{Registry, SpeciesGrammar};
use crate::source::{CacheLine, Domain};
use regex::Regex;
use schema::{to_id, BaseStats, Dex, DexSpecies, Gender, Generation, TypeName};
use std::sync::LazyLock;
use tracing::info;

static DEX_CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const DEX_(\w+)").expect("dex constant pattern is valid"));

static POKEMON_CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const (\w+)").expect("pokemon constant pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesEntry {
    pub name: String,
}

impl CacheLine for SpeciesEntry {
    fn to_line(&self) -> String {
        self.name.clone()
    }

    fn from_line(line: &str) -> DatagenResult<Self> {
        let name = line.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(DatagenError::MalformedLine {
                domain: Domain::Species,
                line: line.to_string(),
            });
        }
        Ok(SpeciesEntry {
            name: name.to_string(),
        })
    }
}

fn lookup<'d>(dex: &'d Dex, generation: Generation, name: &str) -> DatagenResult<&'d DexSpecies> {
    dex.get_species(name).ok_or_else(|| DatagenError::UnknownName {
        generation,
        domain: Domain::Species,
        name: name.to_string(),
    })
}

/// Matcher for the species listing.
pub fn match_species_line(
    registry: &Registry,
    dex: &Dex,
    line: &str,
    accepted: usize,
) -> DatagenResult<Option<SpeciesEntry>> {
    let constant = match registry.species {
        SpeciesGrammar::DexConstants => match DEX_CONSTANT.captures(line) {
            Some(caps) => caps.get(1).map(|m| m.as_str()),
            None => None,
        },
        SpeciesGrammar::PokemonConstants => match POKEMON_CONSTANT.captures(line) {
            Some(caps) => caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|c| *c != "EGG" && !c.starts_with("UNOWN_")),
            None => None,
        },
    };
    let Some(constant) = constant else {
        return Ok(None);
    };

    let species = lookup(dex, registry.generation, constant)?;
    check_position(&species.name, species.num, accepted + 1)?;
    Ok(Some(SpeciesEntry {
        name: name_to_enum(&species.name),
    }))
}

/// Encode a gender ratio as the engine's threshold byte, with a comment.
pub fn gender_byte(species: &DexSpecies) -> DatagenResult<(u8, &'static str)> {
    let female = match species.gender {
        Gender::Genderless => return Ok((0xFF, "N")),
        Gender::Ratio { female } => female,
    };
    if female == 0.0 {
        Ok((0x00, "0.00% F"))
    } else if female == 0.125 {
        Ok((0x1F, "12.5% F"))
    } else if female == 0.25 {
        Ok((0x3F, "25.0% F"))
    } else if female == 0.5 {
        Ok((0x7F, "50.0% F"))
    } else if female == 0.75 {
        Ok((0xBF, "75.0% F"))
    } else if female == 1.0 {
        Ok((0xFE, "100% F"))
    } else {
        Err(DatagenError::InvalidGenderRatio(species.name.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecord {
    pub name: String,
    pub id: String,
    pub num: u16,
    pub display_name: String,
    pub stats: BaseStats,
    pub types: [TypeName; 2],
    /// Both dex types; a single entry for mono-typed species.
    pub dex_types: Vec<TypeName>,
    /// Generation II only.
    pub gender: Option<(u8, &'static str)>,
}

impl SpeciesRecord {
    /// Critical hit rate out of 256 (Generation I).
    pub fn crit_chance(&self) -> u8 {
        self.stats.spe / 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesTable {
    pub generation: Generation,
    pub records: Vec<SpeciesRecord>,
}

pub fn build(registry: &Registry, dex: &Dex, entries: &[SpeciesEntry]) -> DatagenResult<SpeciesTable> {
    let generation = registry.generation;
    let mut records = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let species = lookup(dex, generation, &entry.name)?;
        check_position(&species.name, species.num, i + 1)?;
        let types = species.type_pair().ok_or_else(|| DatagenError::MalformedLine {
            domain: Domain::Species,
            line: format!("{}: {} types", species.name, species.types.len()),
        })?;
        let gender = match generation {
            Generation::Gen1 => None,
            Generation::Gen2 => Some(gender_byte(species)?),
        };
        records.push(SpeciesRecord {
            name: entry.name.clone(),
            id: to_id(&species.name),
            num: species.num,
            display_name: species.name.clone(),
            stats: species.base_stats,
            types,
            dex_types: species.types.clone(),
            gender,
        });
    }

    info!(%generation, species = records.len(), "built species table");
    Ok(SpeciesTable {
        generation,
        records,
    })
}

impl SpeciesTable {
    pub fn render(&self) -> DatagenResult<String> {
        let n = self.records.len();
        let gen1 = self.generation == Generation::Gen1;
        let mut w = generated_file(&format!(
            "Generation {} species.",
            self.generation.roman()
        ));
        w.line("use super::{Stats, Type, Types};");
        w.blank();

        w.doc(&format!(
            "Representation of a Generation {} Pokémon species.",
            self.generation.roman()
        ));
        w.line("#[repr(u8)]");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]");
        w.block("pub enum Species {", "}", |w| {
            w.line("None,");
            for record in &self.records {
                w.line(format!("{},", record.name));
            }
        });
        w.blank();

        w.doc("Data associated with a Pokémon species.");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
        w.block("pub struct Data {", "}", |w| {
            w.doc("The base stats of the Pokémon species.");
            w.line("pub stats: Stats<u8>,");
            w.doc("The typing of the Pokémon species.");
            w.line("pub types: Types,");
            if !gen1 {
                w.doc("The gender ratio of the Pokémon species.");
                w.line("pub ratio: u8,");
            }
        });
        w.blank();

        w.block(&format!("static DATA: [Data; {n}] = ["), "];", |w| {
            for r in &self.records {
                let s = r.stats;
                let stats = if gen1 {
                    format!(
                        "hp: {}, atk: {}, def: {}, spe: {}, spc: {}",
                        s.hp, s.atk, s.def, s.spe, s.spa
                    )
                } else {
                    format!(
                        "hp: {}, atk: {}, def: {}, spe: {}, spa: {}, spd: {}",
                        s.hp, s.atk, s.def, s.spe, s.spa, s.spd
                    )
                };
                w.line(format!("// {}", r.name));
                w.block("Data {", "},", |w| {
                    w.line(format!("stats: Stats {{ {stats} }},"));
                    w.line(format!(
                        "types: Types {{ type1: Type::{}, type2: Type::{} }},",
                        r.types[0].ident(),
                        r.types[1].ident()
                    ));
                    if let Some((ratio, comment)) = r.gender {
                        w.line(format!("ratio: {ratio:#04X}, // {comment}"));
                    }
                });
            }
        });
        w.blank();

        if gen1 {
            w.block(&format!("static CHANCES: [u8; {n}] = ["), "];", |w| {
                for r in &self.records {
                    w.line(format!("{}, // {}", r.crit_chance(), r.name));
                }
            });
            w.blank();
        }

        w.block("impl Species {", "}", |w| {
            w.line(format!("pub const SIZE: usize = {n};"));
            w.blank();
            w.block("pub fn get(self) -> &'static Data {", "}", |w| {
                w.line("debug_assert!(self != Species::None);");
                w.line("&DATA[self as usize - 1]");
            });
            if gen1 {
                w.blank();
                w.doc("The Pokémon's critical hit rate out of 256.");
                w.block("pub fn chance(self) -> u8 {", "}", |w| {
                    w.line("debug_assert!(self != Species::None);");
                    w.line("CHANCES[self as usize - 1]");
                });
            }
        });

        let entries: Vec<(String, String)> = self
            .records
            .iter()
            .map(|r| (r.id.clone(), format!("Species::{}", r.name)))
            .collect();
        w.blank();
        let mut out = w.finish();
        out.push_str(&lookup_map(Domain::Species, "SPECIES", "Species", &entries)?);
        Ok(out)
    }
}
