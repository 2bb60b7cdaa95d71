//! Type effectiveness, precedence and the auxiliary type tables.

use crate::emit::{generated_file, lookup_map, CodeWriter};
use crate::errors::{check_size, DatagenError, DatagenResult};
use crate::registry::{Precedence, Registry, TypeExtras};
use crate::source::{CacheLine, Domain};
use regex::Regex;
use schema::{to_id, type_effectiveness, Dex, DexSpecies, Effectiveness, Generation, TypeName};
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::info;

/// Combined multiplier at which the order of applying a dual type's two
/// matchups becomes observable.
pub const DUAL_TYPE_AMBIGUITY_SUM: f32 = 2.5;

static MATCHUP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"db ([A-Z_]+),\s+([A-Z_]+),\s+[A-Z_]+").expect("matchup pattern is valid")
});

/// Resolve a type constant such as `FIRE` or `PSYCHIC_TYPE`.
pub fn parse_type_constant(generation: Generation, constant: &str) -> DatagenResult<TypeName> {
    let name = if constant == "PSYCHIC_TYPE" {
        "PSYCHIC"
    } else {
        constant
    };
    TypeName::from_str(name).map_err(|_| DatagenError::UnknownName {
        generation,
        domain: Domain::Types,
        name: constant.to_string(),
    })
}

/// An (attacker, defender) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Matchup {
    pub attacker: TypeName,
    pub defender: TypeName,
}

impl CacheLine for Matchup {
    fn to_line(&self) -> String {
        format!("{} {}", self.attacker, self.defender)
    }

    fn from_line(line: &str) -> DatagenResult<Self> {
        let malformed = || DatagenError::MalformedLine {
            domain: Domain::Types,
            line: line.to_string(),
        };
        let (attacker, defender) = line.split_once(' ').ok_or_else(malformed)?;
        Ok(Matchup {
            attacker: TypeName::from_str(attacker).map_err(|_| malformed())?,
            defender: TypeName::from_str(defender).map_err(|_| malformed())?,
        })
    }
}

/// Matcher for the type matchup listing.
pub fn match_matchup_line(
    generation: Generation,
    line: &str,
) -> DatagenResult<Option<Matchup>> {
    let Some(caps) = MATCHUP_LINE.captures(line) else {
        return Ok(None);
    };
    Ok(Some(Matchup {
        attacker: parse_type_constant(generation, &caps[1])?,
        defender: parse_type_constant(generation, &caps[2])?,
    }))
}

/// Attacker-by-defender effectiveness over one generation's type order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChart {
    pub types: Vec<TypeName>,
    pub rows: Vec<Vec<Effectiveness>>,
}

impl TypeChart {
    pub fn build(generation: Generation, types: &[TypeName]) -> DatagenResult<Self> {
        let rows = types
            .iter()
            .map(|&attacking| {
                types
                    .iter()
                    .map(|&defending| {
                        let multiplier = type_effectiveness(generation, attacking, defending);
                        Effectiveness::from_multiplier(multiplier).ok_or(
                            DatagenError::InvalidMultiplier {
                                attacking,
                                defending,
                                multiplier,
                            },
                        )
                    })
                    .collect::<DatagenResult<Vec<_>>>()
            })
            .collect::<DatagenResult<Vec<_>>>()?;
        Ok(Self {
            types: types.to_vec(),
            rows,
        })
    }

    pub fn get(&self, attacking: TypeName, defending: TypeName) -> Option<Effectiveness> {
        let row = self.types.iter().position(|t| *t == attacking)?;
        let col = self.types.iter().position(|t| *t == defending)?;
        Some(self.rows[row][col])
    }

    pub fn size(&self) -> usize {
        self.types.len() * self.types.len()
    }
}

/// Matchups that decide the outcome against some dual-typed species: those
/// where an attacking type is super effective against one of the species'
/// types and resisted by the other.
pub fn relevant_pairs<'a>(
    generation: Generation,
    types: &[TypeName],
    species: impl IntoIterator<Item = &'a DexSpecies>,
) -> BTreeSet<Matchup> {
    let mut relevant = BTreeSet::new();
    for s in species {
        let [first, second] = match s.types.as_slice() {
            [first, second] => [*first, *second],
            _ => continue,
        };
        for &attacker in types {
            let sum = type_effectiveness(generation, attacker, first)
                + type_effectiveness(generation, attacker, second);
            if sum == DUAL_TYPE_AMBIGUITY_SUM {
                relevant.insert(Matchup {
                    attacker,
                    defender: first,
                });
                relevant.insert(Matchup {
                    attacker,
                    defender: second,
                });
            }
        }
    }
    relevant
}

/// Order the relevant matchups by their first appearance in the listing.
/// Every relevant matchup must appear.
pub fn derive_precedence(
    listing: &[Matchup],
    relevant: &BTreeSet<Matchup>,
) -> DatagenResult<Vec<Matchup>> {
    let mut seen = BTreeSet::new();
    let precedence: Vec<Matchup> = listing
        .iter()
        .filter(|m| relevant.contains(*m) && seen.insert(**m))
        .copied()
        .collect();
    check_size("type precedence", relevant.len(), precedence.len())?;
    Ok(precedence)
}

/// Rank of each type, in type order, within a literal precedence order.
pub fn rank_precedence(types: &[TypeName], order: &[TypeName]) -> DatagenResult<Vec<u8>> {
    let ranks: Vec<u8> = types
        .iter()
        .filter_map(|t| order.iter().position(|o| o == t))
        .filter_map(|rank| u8::try_from(rank).ok())
        .collect();
    check_size("type precedence", types.len(), ranks.len())?;
    Ok(ranks)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecedenceTable {
    Matchups(Vec<Matchup>),
    Ranks(Vec<u8>),
}

/// The tables only Generation II needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxTables {
    /// Engine index per type, in type order.
    pub indexes: Vec<u8>,
    /// `None` marks the placeholder slot.
    pub conversion_2: Vec<Option<TypeName>>,
    pub hidden_power: Vec<TypeName>,
    pub showdown: Vec<TypeName>,
}

impl AuxTables {
    pub fn build(types: &[TypeName], extras: &TypeExtras) -> DatagenResult<Self> {
        let indexes: Vec<u8> = types
            .iter()
            .filter_map(|t| {
                extras
                    .indexes
                    .iter()
                    .find(|(indexed, _)| indexed == t)
                    .map(|(_, index)| *index)
            })
            .collect();
        check_size("type indexes", types.len(), indexes.len())?;

        let mut conversion_2 = Vec::new();
        for (t, index) in extras.indexes {
            if *index > extras.conversion_limit {
                break;
            }
            if conversion_2.len() == extras.conversion_placeholder_slot {
                conversion_2.push(None);
            }
            conversion_2.push(Some(*t));
        }
        check_size("conversion 2", extras.conversion_2_size, conversion_2.len())?;

        let hidden_power: Vec<TypeName> = extras
            .hidden_power
            .iter()
            .copied()
            .filter(|t| !matches!(t, TypeName::Normal | TypeName::Unknown))
            .collect();
        check_size("hidden power", extras.hidden_power_size, hidden_power.len())?;

        check_size("showdown types", types.len(), extras.showdown.len())?;

        Ok(Self {
            indexes,
            conversion_2,
            hidden_power,
            showdown: extras.showdown.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTables {
    pub generation: Generation,
    pub chart: TypeChart,
    pub precedence: PrecedenceTable,
    pub aux: Option<AuxTables>,
}

/// Build every type table of a generation. `listing` is the parsed matchup
/// listing, required when precedence is derived.
pub fn build(
    registry: &Registry,
    dex: &Dex,
    listing: Option<&[Matchup]>,
) -> DatagenResult<TypeTables> {
    let generation = registry.generation;
    check_size("types", generation.type_count(), registry.types.len())?;
    let chart = TypeChart::build(generation, registry.types)?;

    let precedence = match registry.precedence {
        Precedence::Derived => {
            let relevant = relevant_pairs(generation, registry.types, dex.species.values());
            let listing = listing.unwrap_or_default();
            PrecedenceTable::Matchups(derive_precedence(listing, &relevant)?)
        }
        Precedence::Ranked(order) => {
            PrecedenceTable::Ranks(rank_precedence(registry.types, order)?)
        }
    };

    let aux = registry
        .type_extras
        .as_ref()
        .map(|extras| AuxTables::build(registry.types, extras))
        .transpose()?;

    info!(%generation, types = registry.types.len(), "built type tables");
    Ok(TypeTables {
        generation,
        chart,
        precedence,
        aux,
    })
}

fn variant(t: TypeName) -> String {
    format!("Type::{}", t.ident())
}

impl TypeTables {
    pub fn render(&self) -> DatagenResult<String> {
        let types = &self.chart.types;
        let n = types.len();
        let mut w = generated_file(&format!(
            "Generation {} types.",
            self.generation.roman()
        ));
        w.line("use super::Effectiveness;");
        w.blank();

        w.doc("Representation of a Pokémon type.");
        w.line("#[repr(u8)]");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]");
        w.block("pub enum Type {", "}", |w| {
            for t in types {
                if *t == TypeName::Unknown {
                    w.line("/// The `???` type.");
                }
                w.line(format!("{},", t.ident()));
            }
        });
        w.blank();

        w.doc("Both types of a Pokémon; mono-typed species repeat their type.");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
        w.block("pub struct Types {", "}", |w| {
            w.line("pub type1: Type,");
            w.line("pub type2: Type,");
        });
        w.blank();

        self.render_chart(&mut w);
        match &self.precedence {
            PrecedenceTable::Matchups(matchups) => render_matchup_precedence(&mut w, matchups),
            PrecedenceTable::Ranks(ranks) => render_ranked_precedence(&mut w, types, ranks),
        }
        if let Some(aux) = &self.aux {
            render_aux(&mut w, types, aux);
        }

        w.block("impl Type {", "}", |w| {
            w.line(format!("pub const SIZE: usize = {n};"));
            w.line(format!("pub const CHART_SIZE: usize = {};", self.chart.size()));
            w.blank();
            w.block(&format!("pub const ALL: [Type; {n}] = ["), "];", |w| {
                for t in types {
                    w.line(format!("{},", variant(*t)));
                }
            });
            w.blank();
            w.doc("Effectiveness of `self` attacking `defending`.");
            w.block(
                "pub fn effectiveness(self, defending: Type) -> Effectiveness {",
                "}",
                |w| {
                    w.line("CHART[self as usize][defending as usize]");
                },
            );
            if self.aux.is_some() {
                render_aux_fns(w);
            }
        });

        if self.aux.is_some() {
            if let Some(steel) = types.iter().position(|t| *t == TypeName::Steel) {
                if types[..=steel].iter().all(|t| {
                    matches!(t, TypeName::Ground | TypeName::Rock | TypeName::Steel)
                }) {
                    w.blank();
                    w.block("impl Types {", "}", |w| {
                        w.doc("Whether this typing is immune to damage from Sandstorm.");
                        w.block("pub fn sandstorm_immune(self) -> bool {", "}", |w| {
                            w.line("self.type1 <= Type::Steel || self.type2 <= Type::Steel");
                        });
                    });
                }
            }
        }

        let entries: Vec<(String, String)> = types
            .iter()
            .map(|t| (to_id(t.ident()), variant(*t)))
            .collect();
        w.blank();
        let mut out = w.finish();
        out.push_str(&lookup_map(Domain::Types, "TYPES", "Type", &entries)?);
        Ok(out)
    }

    fn render_chart(&self, w: &mut CodeWriter) {
        let n = self.chart.types.len();
        w.line("use Effectiveness::{Immune as I, Neutral as N, Resisted as R, Super as S};");
        w.blank();
        w.doc("Effectiveness of the attacking type (row) against the defending type (column).");
        w.line("#[rustfmt::skip]");
        w.block(&format!("static CHART: [[Effectiveness; {n}]; {n}] = ["), "];", |w| {
            for (t, row) in self.chart.types.iter().zip(&self.chart.rows) {
                let cells: Vec<String> = row.iter().map(|e| e.symbol().to_string()).collect();
                w.line(format!("[{}], // {}", cells.join(", "), t.name()));
            }
        });
        w.blank();
    }
}

fn render_matchup_precedence(w: &mut CodeWriter, matchups: &[Matchup]) {
    w.block(
        &format!("static PRECEDENCE: [Types; {}] = [", matchups.len()),
        "];",
        |w| {
            for m in matchups {
                w.line(format!(
                    "Types {{ type1: {}, type2: {} }},",
                    variant(m.attacker),
                    variant(m.defender)
                ));
            }
        },
    );
    w.blank();
    w.doc("The precedence order of `defending` vs. `attacking`, if the matchup has one.");
    w.block(
        "pub fn precedence(attacking: Type, defending: Type) -> Option<u8> {",
        "}",
        |w| {
            w.line("PRECEDENCE");
            w.indent();
            w.line(".iter()");
            w.line(".position(|m| m.type1 == attacking && m.type2 == defending)");
            w.line(".map(|i| i as u8)");
            w.dedent();
        },
    );
    w.blank();
}

fn render_ranked_precedence(w: &mut CodeWriter, types: &[TypeName], ranks: &[u8]) {
    w.block(&format!("static PRECEDENCE: [u8; {}] = [", ranks.len()), "];", |w| {
        for (t, rank) in types.iter().zip(ranks) {
            w.line(format!("{rank}, // {}", t.name()));
        }
    });
    w.blank();
}

fn render_aux(w: &mut CodeWriter, types: &[TypeName], aux: &AuxTables) {
    w.block(&format!("static INDEXES: [u8; {}] = [", aux.indexes.len()), "];", |w| {
        for (t, index) in types.iter().zip(&aux.indexes) {
            w.line(format!("{index}, // {}", t.name()));
        }
    });
    w.blank();
    w.block(
        &format!("static CONVERSION_2: [Type; {}] = [", aux.conversion_2.len()),
        "];",
        |w| {
            for slot in &aux.conversion_2 {
                match slot {
                    Some(t) => w.line(format!("{},", variant(*t))),
                    None => w.line(format!("{}, // placeholder", variant(TypeName::Unknown))),
                };
            }
        },
    );
    w.blank();
    w.block(
        &format!("static HIDDEN_POWER: [Type; {}] = [", aux.hidden_power.len()),
        "];",
        |w| {
            for t in &aux.hidden_power {
                w.line(format!("{},", variant(*t)));
            }
        },
    );
    w.blank();
    w.doc("Order of Pokémon Showdown's types.");
    w.block(
        &format!("pub static SHOWDOWN: [Type; {}] = [", aux.showdown.len()),
        "];",
        |w| {
            for t in &aux.showdown {
                w.line(format!("{},", variant(*t)));
            }
        },
    );
    w.blank();
}

fn render_aux_fns(w: &mut CodeWriter) {
    w.blank();
    w.doc("The precedence order of this type.");
    w.block("pub fn precedence(self) -> u8 {", "}", |w| {
        w.line("PRECEDENCE[self as usize]");
    });
    w.blank();
    w.doc("The internal index of this type used by Present.");
    w.block("pub fn present(self) -> u8 {", "}", |w| {
        w.line("INDEXES[self as usize]");
    });
    w.blank();
    w.doc("The type corresponding to a random roll of `num` for Conversion 2.");
    w.block("pub fn conversion_2(num: u8) -> Type {", "}", |w| {
        w.line("debug_assert!(num != 6);");
        w.line("debug_assert!(num < 10 || (20..=27).contains(&num));");
        w.line("if num < 10 {");
        w.line("    CONVERSION_2[num as usize]");
        w.line("} else {");
        w.line("    Type::ALL[(num - 10) as usize]");
        w.line("}");
    });
    w.blank();
    w.doc("The type corresponding to a Hidden Power `index`.");
    w.block("pub fn hidden_power(index: u8) -> Type {", "}", |w| {
        w.line("HIDDEN_POWER[index as usize]");
    });
}
