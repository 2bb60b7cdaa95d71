use super::{artifact_path, Context, GenerationOutput};
use crate::emit::Artifact;
use crate::errors::DatagenResult;
use crate::source::Domain;
use crate::summary::GenerationSummary;
use crate::{dispatch, items, moves, species, stubs, types};

pub(super) fn generate(ctx: &Context<'_>) -> DatagenResult<GenerationOutput> {
    let registry = ctx.registry;
    let generation = registry.generation;
    let dex = ctx.dex;

    let types = types::build(registry, dex, None)?;

    let item_entries = ctx.cache.get_or_update(
        ctx.fetch,
        generation,
        Domain::Items,
        items::match_item_line,
    )?;
    let items = items::build(registry, dex, &item_entries)?;

    let move_entries = ctx
        .cache
        .get_or_update(ctx.fetch, generation, Domain::Moves, |line, _, accepted| {
            moves::match_move_line(registry, dex, line, accepted)
        })?;
    let moves = moves::build(registry, dex, &move_entries)?;

    let effect_lines = ctx.cache.get_or_update(
        ctx.fetch,
        generation,
        Domain::Effects,
        dispatch::match_effect_line,
    )?;
    let commands = dispatch::command_sequences(&effect_lines);
    let dispatcher = dispatch::build(registry, &moves.coding, &commands)?;

    let species_entries = ctx
        .cache
        .get_or_update(ctx.fetch, generation, Domain::Species, |line, _, accepted| {
            species::match_species_line(registry, dex, line, accepted)
        })?;
    let species = species::build(registry, dex, &species_entries)?;

    let artifacts = vec![
        Artifact::new(artifact_path(generation, "items.rs"), items.render()?),
        Artifact::new(artifact_path(generation, "moves.rs"), moves.render(registry)?),
        Artifact::new(
            artifact_path(generation, "dispatch.rs"),
            dispatcher.render(registry),
        ),
        Artifact::new(artifact_path(generation, "species.rs"), species.render()?),
        Artifact::new(artifact_path(generation, "types.rs"), types.render()?),
    ];

    let stubs = ctx.stubs.then(|| {
        let mut out = stubs::render("Item", &stubs::item_groups(dex, &item_entries));
        out.push_str(&stubs::render("Move", &stubs::move_groups(&moves.records)));
        out
    });

    Ok(GenerationOutput {
        artifacts,
        summary: GenerationSummary::new(&types, &species, &moves, Some(&items)),
        stubs,
    })
}
