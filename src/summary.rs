//! Cross-check summaries written next to the generated source.
//!
//! `ids.json` records the identifier order of the enumerations whose numeric
//! values matter to consumers; `data.json` records the subset of dex facts the
//! generated tables were built from, keyed by display name.

use crate::emit::Artifact;
use crate::errors::DatagenResult;
use crate::items::ItemTable;
use crate::moves::MoveTable;
use crate::species::SpeciesTable;
use crate::types::TypeTables;
use schema::Generation;
use serde::Serialize;
use std::collections::BTreeMap;

pub const IDS_FILE: &str = "ids.json";
pub const DATA_FILE: &str = "data.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationIds {
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub spe: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spc: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spa: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spd: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesSummary {
    pub stats: StatsSummary,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationData {
    pub types: Vec<String>,
    pub species: BTreeMap<String, SpeciesSummary>,
    /// Move name to PP.
    pub moves: BTreeMap<String, u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

/// Everything one generation contributes to the summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generation: Generation,
    pub ids: GenerationIds,
    pub data: GenerationData,
}

impl GenerationSummary {
    pub fn new(
        types: &TypeTables,
        species: &SpeciesTable,
        moves: &MoveTable,
        items: Option<&ItemTable>,
    ) -> Self {
        let gen1 = species.generation == Generation::Gen1;
        let type_names: Vec<String> = types
            .chart
            .types
            .iter()
            .map(|t| t.name().to_string())
            .collect();

        let species_data = species
            .records
            .iter()
            .map(|r| {
                let s = r.stats;
                let stats = StatsSummary {
                    hp: s.hp,
                    atk: s.atk,
                    def: s.def,
                    spe: s.spe,
                    spc: gen1.then_some(s.spa),
                    spa: (!gen1).then_some(s.spa),
                    spd: (!gen1).then_some(s.spd),
                };
                let summary = SpeciesSummary {
                    stats,
                    types: r.dex_types.iter().map(|t| t.name().to_string()).collect(),
                    gender: r.gender.map(|(ratio, _)| ratio),
                };
                (r.display_name.clone(), summary)
            })
            .collect();

        let moves_data = moves
            .records
            .iter()
            .map(|r| (r.display_name.clone(), r.pp))
            .collect();

        GenerationSummary {
            generation: species.generation,
            ids: GenerationIds {
                types: type_names.clone(),
                items: items.map(|table| table.slots.iter().map(|slot| slot.id()).collect()),
            },
            data: GenerationData {
                types: type_names,
                species: species_data,
                moves: moves_data,
                items: items
                    .map(|table| table.slots.iter().map(|slot| slot.display_name()).collect()),
            },
        }
    }
}

/// Render both summary files, generations in ascending order.
pub fn artifacts(summaries: &[GenerationSummary]) -> DatagenResult<Vec<Artifact>> {
    let mut ordered: Vec<&GenerationSummary> = summaries.iter().collect();
    ordered.sort_by_key(|s| s.generation);

    let ids: Vec<&GenerationIds> = ordered.iter().map(|s| &s.ids).collect();
    let data: Vec<&GenerationData> = ordered.iter().map(|s| &s.data).collect();

    Ok(vec![
        Artifact::new(IDS_FILE, serde_json::to_string_pretty(&ids)? + "\n"),
        Artifact::new(DATA_FILE, serde_json::to_string_pretty(&data)? + "\n"),
    ])
}
