//! Building the per-effect move dispatcher from scraped command listings.

use crate::canonical::effect_label;
use crate::classify::{EffectCoding, NO_EFFECT};
use crate::emit::{generated_file, CodeWriter};
use crate::errors::{DatagenError, DatagenResult};
use crate::merge::{self, MergePlan};
use crate::registry::{Registry, IMPORTS, OPERATIONS, SKIP, SNIPPETS};
use crate::source::{CacheLine, Domain};
use heck::ToSnakeCase;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use tracing::{info, warn};

static EFFECT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:([A-Z][A-Za-z]+\d?):)|(?:\t([a-z\d]+)(?: ;.*)?))$")
        .expect("effect line pattern is valid")
});

static BOOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^th]Up[12]?(?:Chance)?$").expect("boost pattern is valid"));

static UNBOOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Down[12]?(?:Chance)?$").expect("unboost pattern is valid"));

/// One record of the effects listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectLine {
    Label(String),
    Command(String),
}

impl CacheLine for EffectLine {
    fn to_line(&self) -> String {
        match self {
            EffectLine::Label(label) => label.clone(),
            EffectLine::Command(command) => format!("\t{command}"),
        }
    }

    fn from_line(line: &str) -> DatagenResult<Self> {
        match line.strip_prefix('\t') {
            Some(command) => Ok(EffectLine::Command(command.trim().to_string())),
            None if !line.trim().is_empty() => Ok(EffectLine::Label(line.trim().to_string())),
            None => Err(DatagenError::MalformedLine {
                domain: Domain::Effects,
                line: line.to_string(),
            }),
        }
    }
}

/// Matcher for the effects listing, which is judged one line late.
///
/// A label that is immediately followed by another label falls through to it
/// and is dropped, so the last label before a run of commands names them.
pub fn match_effect_line(line: &str, last: &str, _accepted: usize) -> DatagenResult<Option<EffectLine>> {
    if last.is_empty() {
        return Ok(None);
    }
    let Some(caps) = EFFECT_LINE.captures(last) else {
        return Ok(None);
    };
    let falls_through = last.ends_with(':') && line.ends_with(':') && EFFECT_LINE.is_match(line);
    if falls_through {
        return Ok(None);
    }
    let record = match (caps.get(1), caps.get(2)) {
        (Some(label), _) => EffectLine::Label(label.as_str().to_string()),
        (None, Some(command)) => EffectLine::Command(command.as_str().to_string()),
        (None, None) => return Ok(None),
    };
    Ok(Some(record))
}

/// Group listing records into each effect's command sequence, dropping
/// structural no-op commands.
pub fn command_sequences(records: &[EffectLine]) -> BTreeMap<String, Vec<String>> {
    let mut sequences: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current: Option<String> = None;
    for record in records {
        match record {
            EffectLine::Label(label) => {
                let effect = effect_label(label);
                sequences.insert(effect.clone(), Vec::new());
                current = Some(effect);
            }
            EffectLine::Command(command) => {
                if SKIP.contains(command.as_str()) {
                    continue;
                }
                if let Some(commands) = current.as_ref().and_then(|e| sequences.get_mut(e)) {
                    commands.push(command.clone());
                }
            }
        }
    }
    sequences
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Spliced inline from the snippet table.
    Snippet(&'static str),
    /// A call into the engine.
    Call(String),
    /// A command with no known rendering.
    Unimplemented(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub labels: Vec<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BucketKind {
    Boosts,
    BoostChances,
    Unboosts,
    UnboostChances,
}

impl BucketKind {
    pub const ALL: [BucketKind; 4] = [
        BucketKind::Boosts,
        BucketKind::BoostChances,
        BucketKind::Unboosts,
        BucketKind::UnboostChances,
    ];

    /// Bucket for an effect not handled by its own branch, judged by name alone.
    pub fn of(effect: &str) -> Option<BucketKind> {
        let chance = effect.ends_with("Chance");
        if BOOST.is_match(effect) {
            Some(if chance {
                BucketKind::BoostChances
            } else {
                BucketKind::Boosts
            })
        } else if UNBOOST.is_match(effect) {
            Some(if chance {
                BucketKind::UnboostChances
            } else {
                BucketKind::Unboosts
            })
        } else {
            None
        }
    }

    fn is_chance(self) -> bool {
        matches!(self, BucketKind::BoostChances | BucketKind::UnboostChances)
    }

    /// How many lines the labels of the shared branch are spread over.
    pub fn chunks(self) -> usize {
        match self {
            BucketKind::BoostChances => 1,
            _ => 2,
        }
    }

    fn steps(self) -> Vec<Step> {
        let mut steps = vec![Step::Snippet("usedmovetext"), Step::Snippet("doturn")];
        if self.is_chance() {
            steps.extend([
                call("check_critical_hit"),
                Step::Unimplemented("damagestats".to_string()),
                Step::Unimplemented("damagecalc".to_string()),
                call("adjust_damage"),
                call("randomize_damage"),
            ]);
        }
        if self != BucketKind::Boosts {
            steps.push(call("check_hit"));
        }
        if self.is_chance() {
            steps.extend([
                Step::Unimplemented("effectchance".to_string()),
                Step::Unimplemented("failuretext".to_string()),
                call("apply_damage"),
                Step::Snippet("criticaltext"),
                Step::Snippet("supereffectivetext"),
                Step::Snippet("checkfaint"),
                call("build_rage"),
            ]);
        }
        if self == BucketKind::UnboostChances {
            steps.push(Step::Unimplemented(
                "effectchance for DefenseDownChance".to_string(),
            ));
        }
        steps.push(match self {
            BucketKind::Boosts | BucketKind::BoostChances => call("effects::boost"),
            BucketKind::Unboosts | BucketKind::UnboostChances => call("effects::unboost"),
        });
        steps
    }
}

fn call(operation: &str) -> Step {
    Step::Call(operation.to_string())
}

/// A shared branch for effects bucketed by naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub kind: BucketKind,
    pub labels: Vec<String>,
    pub steps: Vec<Step>,
}

impl Bucket {
    /// The labels split into near-equal lines for layout.
    pub fn label_lines(&self) -> Vec<&[String]> {
        let size = self.labels.len().div_ceil(self.kind.chunks()).max(1);
        self.labels.chunks(size).collect()
    }
}

/// Everything needed to render the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable {
    pub branches: Vec<Branch>,
    pub buckets: Vec<Bucket>,
    /// Distinct placeholders left for manual resolution.
    pub gaps: BTreeSet<String>,
    pub merges: MergePlan,
}

/// Translate one effect's commands into steps.
fn steps_for(
    effect: &str,
    commands: Option<&Vec<String>>,
    gaps: &mut BTreeSet<String>,
) -> Vec<Step> {
    let Some(commands) = commands else {
        warn!(effect, "no command listing for effect");
        let gap = format!("no command listing for {effect}");
        gaps.insert(gap.clone());
        return vec![Step::Unimplemented(gap)];
    };

    let own_command = effect.to_lowercase();
    commands
        .iter()
        .map(|command| {
            if let Some((name, _)) = SNIPPETS.get_entry(command.as_str()) {
                Step::Snippet(*name)
            } else if let Some(operation) = OPERATIONS.get(command.as_str()) {
                Step::Call((*operation).to_string())
            } else if *command == own_command {
                Step::Call(format!("effects::{}", effect.to_snake_case()))
            } else {
                warn!(effect, command = command.as_str(), "unmapped command");
                gaps.insert(command.clone());
                Step::Unimplemented(command.clone())
            }
        })
        .collect()
}

/// Build the dispatcher for a generation that has an effects listing.
pub fn build(
    registry: &Registry,
    coding: &EffectCoding,
    commands: &BTreeMap<String, Vec<String>>,
) -> DatagenResult<DispatchTable> {
    if !registry.domains.contains(&Domain::Effects) {
        return Err(DatagenError::UnsupportedGeneration(registry.generation.num()));
    }

    let names: Vec<&str> = std::iter::once(NO_EFFECT).chain(coding.order()).collect();
    let active: BTreeSet<String> = names.iter().map(|name| (*name).to_string()).collect();
    let merges = merge::plan(registry.merge_groups, commands, &active)?;

    let mut gaps = BTreeSet::new();
    let mut branches = Vec::new();
    let mut emitted_groups = BTreeSet::new();
    let mut bucketed: BTreeMap<BucketKind, Vec<String>> = BTreeMap::new();

    for name in names {
        if let Some(group) = merges.group_of(name) {
            if emitted_groups.insert(group.canonical.clone()) {
                branches.push(Branch {
                    labels: group.labels.clone(),
                    steps: steps_for(&group.canonical, commands.get(&group.canonical), &mut gaps),
                });
            }
            continue;
        }
        if let Some(kind) = BucketKind::of(name) {
            bucketed.entry(kind).or_default().push(name.to_string());
            continue;
        }
        branches.push(Branch {
            labels: vec![name.to_string()],
            steps: steps_for(name, commands.get(name), &mut gaps),
        });
    }

    let mut buckets = Vec::new();
    for kind in BucketKind::ALL {
        let Some(mut labels) = bucketed.remove(&kind) else {
            continue;
        };
        labels.sort();
        let steps = kind.steps();
        for step in &steps {
            if let Step::Unimplemented(gap) = step {
                gaps.insert(gap.clone());
            }
        }
        buckets.push(Bucket {
            kind,
            labels,
            steps,
        });
    }

    info!(
        generation = %registry.generation,
        branches = branches.len(),
        buckets = buckets.len(),
        gaps = gaps.len(),
        "built dispatcher"
    );
    Ok(DispatchTable {
        branches,
        buckets,
        gaps,
        merges,
    })
}

impl DispatchTable {
    pub fn render(&self, registry: &Registry) -> String {
        let mut w = generated_file(&format!(
            "Generation {} move dispatch.",
            registry.generation.roman()
        ));
        w.line("use super::data::{Effect, Effectiveness, Move};");
        w.line("use super::mechanics::{effects, Battle, Log, Outcome, Player, Result, State};");
        w.line(format!("use super::mechanics::{{{}}};", IMPORTS.join(", ")));
        w.blank();
        w.doc("Run the effect-specific commands of the move being executed.");
        w.line("pub fn do_move(");
        w.indent();
        w.lines(&[
            "battle: &mut Battle,",
            "player: Player,",
            "state: &mut State,",
            "log: &mut Log,",
        ]);
        w.dedent();
        w.line(") -> Result<Option<Outcome>> {");
        w.indent();
        w.lines(&[
            "let ident = battle.active(player);",
            "let foe_ident = battle.active(player.foe());",
            "let side = battle.side(player);",
            "let volatiles = &mut side.active.volatiles;",
            "",
        ]);
        w.block("match Move::get(state.mv).effect {", "}", |w| {
            for branch in &self.branches {
                w.block(&format!("{} => {{", patterns(&branch.labels)), "}", |w| {
                    render_steps(w, &branch.steps);
                });
            }
            for bucket in &self.buckets {
                let lines = bucket.label_lines();
                let last = lines.len().saturating_sub(1);
                for (i, chunk) in lines.iter().enumerate() {
                    if i == last {
                        w.line(format!("{} => {{", patterns(chunk)));
                    } else {
                        w.line(format!("{} |", patterns(chunk)));
                    }
                }
                w.indent();
                render_steps(w, &bucket.steps);
                w.dedent();
                w.line("}");
            }
        });
        w.blank();
        w.line("Ok(None)");
        w.dedent();
        w.line("}");
        w.finish()
    }
}

fn patterns(labels: &[String]) -> String {
    labels
        .iter()
        .map(|label| format!("Effect::{label}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_steps(w: &mut CodeWriter, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Snippet(name) => {
                if let Some(lines) = SNIPPETS.get(*name) {
                    w.lines(lines);
                }
            }
            Step::Call(operation) => {
                w.line(format!("{operation}(battle, player, state, log)?;"));
            }
            Step::Unimplemented(what) => {
                w.line(format!("// unimplemented: {what}"));
            }
        }
    }
}
