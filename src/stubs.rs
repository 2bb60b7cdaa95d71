//! Pending-behavior listings: one ignored test stub per distinct effect.

use crate::items::{ItemEntry, NO_HELD_EFFECT};
use crate::moves::MoveRecord;
use heck::ToSnakeCase;
use schema::Dex;
use std::collections::BTreeMap;

const NO_ADDITIONAL_EFFECT: &str = "No additional effect.";

/// Members sharing an effect, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubGroup {
    pub effect: String,
    pub members: Vec<String>,
    /// Description of the last member added.
    pub desc: String,
}

impl StubGroup {
    /// The single member, or `{A,B,...}` for several.
    pub fn key(&self) -> String {
        match self.members.as_slice() {
            [single] => single.clone(),
            members => format!("{{{}}}", members.join(",")),
        }
    }
}

#[derive(Debug, Default)]
struct Grouper {
    groups: Vec<StubGroup>,
    index: BTreeMap<String, usize>,
}

impl Grouper {
    fn add(&mut self, effect: &str, member: &str, desc: Option<&str>) {
        let i = match self.index.get(effect) {
            Some(&i) => i,
            None => {
                self.index.insert(effect.to_string(), self.groups.len());
                self.groups.push(StubGroup {
                    effect: effect.to_string(),
                    ..StubGroup::default()
                });
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[i];
        group.members.push(member.to_string());
        if let Some(desc) = desc {
            group.desc = desc.to_string();
        }
    }
}

/// Group moves by effect, skipping those the dex describes as having none.
pub fn move_groups(records: &[MoveRecord]) -> Vec<StubGroup> {
    let mut grouper = Grouper::default();
    for record in records {
        if record.short_desc == NO_ADDITIONAL_EFFECT || record.desc == NO_ADDITIONAL_EFFECT {
            continue;
        }
        grouper.add(&record.effect, &record.name, Some(&record.desc));
    }
    grouper.groups
}

/// Group items by held effect. Every Mail is grouped together; items missing
/// from the dex or without a held effect are skipped.
pub fn item_groups(dex: &Dex, entries: &[ItemEntry]) -> Vec<StubGroup> {
    let mut grouper = Grouper::default();
    for entry in entries {
        if entry.name.ends_with("Mail") {
            grouper.add("Mail", &entry.name, None);
            continue;
        }
        let Some(item) = dex.get_item(&entry.name) else {
            continue;
        };
        if entry.held == NO_HELD_EFFECT {
            continue;
        }
        grouper.add(&entry.held, &entry.name, Some(&item.desc));
    }
    grouper.groups
}

/// Render groups as ignored test functions under `// {kind}::{key}` headers.
pub fn render(kind: &str, groups: &[StubGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("// {kind}::{}\n", group.key()));
        out.push_str("#[test]\n");
        out.push_str("#[ignore = \"pending\"]\n");
        out.push_str(&format!("fn test_{}_effect() {{\n", group.effect.to_snake_case()));
        out.push_str(&format!("    // {}\n", group.desc));
        out.push_str("}\n\n");
    }
    out
}
