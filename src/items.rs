//! The held-item listing and the item enumeration (Generation II).

use crate::canonical::{const_to_enum, display_name};
use crate::emit::{generated_file, lookup_map};
use crate::errors::{check_size, DatagenError, DatagenResult};
use crate::registry::{ItemConfig, Registry};
use crate::source::{CacheLine, Domain};
use regex::Regex;
use schema::{to_id, Dex, Generation, TypeName};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::info;

static ITEM_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^; ([A-Z]\w+)").expect("item comment pattern is valid"));

static HELD_EFFECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HELD_(\w+),").expect("held effect pattern is valid"));

pub const NO_HELD_EFFECT: &str = "None";

const SHOWDOWN_EXCLUDED: &str = "// Pokémon Showdown excludes the following items (minus \"Mail\")";

/// An item and its held effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub name: String,
    pub held: String,
}

impl CacheLine for ItemEntry {
    fn to_line(&self) -> String {
        format!("{} {}", self.name, self.held)
    }

    fn from_line(line: &str) -> DatagenResult<Self> {
        match line.split_once(' ') {
            Some((name, held)) if !name.is_empty() && !held.is_empty() => Ok(ItemEntry {
                name: name.to_string(),
                held: held.to_string(),
            }),
            _ => Err(DatagenError::MalformedLine {
                domain: Domain::Items,
                line: line.to_string(),
            }),
        }
    }
}

/// Matcher for the item attributes listing: the item is named by the comment
/// on the previous line and its held effect is on the current one.
pub fn match_item_line(line: &str, last: &str, _accepted: usize) -> DatagenResult<Option<ItemEntry>> {
    let Some(caps) = ITEM_COMMENT.captures(last) else {
        return Ok(None);
    };
    let constant = &caps[1];
    if constant.starts_with("HM") || constant.starts_with("ITEM_") {
        return Ok(None);
    }
    if line.contains("KEY_ITEM") || last.starts_with("; BUG:") {
        return Ok(None);
    }

    let Some(held) = HELD_EFFECT.captures(line) else {
        return Err(DatagenError::MalformedLine {
            domain: Domain::Items,
            line: line.to_string(),
        });
    };
    let name = if constant.starts_with("TM") {
        constant.to_string()
    } else {
        const_to_enum(constant)
    };
    Ok(Some(ItemEntry {
        name,
        held: const_to_enum(&held[1]),
    }))
}

/// One variant of the item enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSlot {
    pub name: String,
    pub comment: Option<String>,
}

impl ItemSlot {
    fn new(name: &str, comment: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            comment: comment.map(str::to_string),
        }
    }

    pub fn id(&self) -> String {
        to_id(&self.name)
    }

    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Boundaries of the item sections, each the number of items before it ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemOffsets {
    pub boosts: usize,
    pub effect: usize,
    pub berries: usize,
    pub present: usize,
    pub mail: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTable {
    pub generation: Generation,
    pub slots: Vec<ItemSlot>,
    pub offsets: ItemOffsets,
}

#[derive(Default)]
struct Sections<'a> {
    boosts: Vec<(&'a str, TypeName)>,
    effects: Vec<ItemSlot>,
    berries: Vec<&'a ItemEntry>,
    present: Vec<ItemSlot>,
    mail: Vec<ItemSlot>,
    missing: Vec<ItemSlot>,
}

fn partition<'a>(
    generation: Generation,
    config: &ItemConfig,
    dex: &Dex,
    entries: &'a [ItemEntry],
) -> DatagenResult<Sections<'a>> {
    let mut sections = Sections::default();
    for entry in entries {
        let name = entry.name.as_str();
        let held = entry.held.as_str();

        if held == NO_HELD_EFFECT || config.no_effect.iter().any(|n| *n == name) {
            if config.special_held.iter().any(|n| *n == name) {
                sections.effects.push(ItemSlot::new(name, None));
            } else if name.ends_with("Mail") {
                sections.mail.push(ItemSlot::new(name, None));
            } else if dex.get_item(name).is_some() {
                sections.present.push(ItemSlot::new(name, None));
            } else {
                sections.missing.push(ItemSlot::new(name, None));
            }
            continue;
        }

        if name.ends_with("Berry") || held == "Berry" {
            sections.berries.push(entry);
        } else if let Some(boosted) = held.strip_suffix("Boost") {
            let t = TypeName::from_str(boosted).map_err(|_| DatagenError::UnknownName {
                generation,
                domain: Domain::Types,
                name: boosted.to_string(),
            })?;
            sections.boosts.push((name, t));
        } else {
            sections.effects.push(ItemSlot::new(name, Some(held)));
        }
    }
    Ok(sections)
}

pub fn build(registry: &Registry, dex: &Dex, entries: &[ItemEntry]) -> DatagenResult<ItemTable> {
    let generation = registry.generation;
    let Some(config) = registry.items.as_ref() else {
        return Err(DatagenError::UnsupportedGeneration(generation.num()));
    };
    let sections = partition(generation, config, dex, entries)?;
    let mut slots = Vec::with_capacity(entries.len());

    for t in registry.types {
        if *t == TypeName::Unknown {
            slots.push(ItemSlot::new(config.unknown_type_booster, Some("??? (Normal)")));
        } else if let Some((name, _)) = sections.boosts.iter().find(|(_, boosted)| boosted == t) {
            slots.push(ItemSlot::new(name, Some(t.name())));
        }
    }
    check_size("type boosters", registry.types.len(), slots.len())?;
    let boosts = slots.len();

    slots.extend(sections.effects);
    let effect = slots.len();

    check_size("berries", config.berries.len(), sections.berries.len())?;
    for berry in config.berries {
        let entry = sections
            .berries
            .iter()
            .find(|entry| entry.name == *berry)
            .ok_or_else(|| DatagenError::UnknownName {
                generation,
                domain: Domain::Items,
                name: (*berry).to_string(),
            })?;
        slots.push(ItemSlot::new(&entry.name, Some(&entry.held)));
    }
    let berries = slots.len();
    slots.extend(sections.present);
    let present = slots.len();

    slots.extend(sections.mail);
    let mail = slots.len();
    slots.extend(sections.missing);

    info!(%generation, items = slots.len(), boosts, effect, present, mail, "built item table");
    Ok(ItemTable {
        generation,
        slots,
        offsets: ItemOffsets {
            boosts,
            effect,
            berries,
            present,
            mail,
        },
    })
}

impl ItemTable {
    pub fn render(&self) -> DatagenResult<String> {
        let offsets = self.offsets;
        let mut w = generated_file(&format!(
            "Generation {} items.",
            self.generation.roman()
        ));

        w.doc(&format!(
            "Representation of a Generation {} item.",
            self.generation.roman()
        ));
        w.line("#[repr(u8)]");
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]");
        w.block("pub enum Item {", "}", |w| {
            w.line("None,");
            for (i, slot) in self.slots.iter().enumerate() {
                if i == offsets.present {
                    w.line(SHOWDOWN_EXCLUDED);
                }
                match &slot.comment {
                    Some(comment) => w.line(format!("{}, // {comment}", slot.name)),
                    None => w.line(format!("{},", slot.name)),
                };
            }
        });
        w.blank();

        w.block("impl Item {", "}", |w| {
            w.line(format!("pub const SIZE: usize = {};", self.slots.len()));
            w.doc("Type-boosting items, one per type, in type order.");
            w.line(format!("pub const BOOSTS: usize = {};", offsets.boosts));
            w.doc("End of the items with a held effect.");
            w.line(format!("pub const EFFECT: usize = {};", offsets.effect));
            w.line(format!("pub const BERRIES: usize = {};", offsets.berries));
            w.doc("End of the items present in Pokémon Showdown.");
            w.line(format!("pub const PRESENT: usize = {};", offsets.present));
            w.line(format!("pub const MAIL: usize = {};", offsets.mail));
            w.blank();
            w.doc("Whether this item is a form of Mail.");
            w.block("pub fn is_mail(self) -> bool {", "}", |w| {
                w.line("(Self::PRESENT + 1..=Self::MAIL).contains(&(self as usize))");
            });
            w.blank();
            w.doc("Whether this item is a Berry.");
            w.block("pub fn is_berry(self) -> bool {", "}", |w| {
                w.line("(Self::EFFECT + 1..=Self::BERRIES).contains(&(self as usize))");
            });
        });

        let entries: Vec<(String, String)> = self
            .slots
            .iter()
            .map(|slot| (slot.id(), format!("Item::{}", slot.name)))
            .collect();
        w.blank();
        let mut out = w.finish();
        out.push_str(&lookup_map(Domain::Items, "ITEMS", "Item", &entries)?);
        Ok(out)
    }
}
