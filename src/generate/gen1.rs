use super::{artifact_path, Context, GenerationOutput};
use crate::emit::Artifact;
use crate::errors::DatagenResult;
use crate::source::Domain;
use crate::summary::GenerationSummary;
use crate::{moves, species, stubs, types};

pub(super) fn generate(ctx: &Context<'_>) -> DatagenResult<GenerationOutput> {
    let registry = ctx.registry;
    let generation = registry.generation;
    let dex = ctx.dex;

    let move_entries = ctx
        .cache
        .get_or_update(ctx.fetch, generation, Domain::Moves, |line, _, accepted| {
            moves::match_move_line(registry, dex, line, accepted)
        })?;
    let moves = moves::build(registry, dex, &move_entries)?;

    let species_entries = ctx
        .cache
        .get_or_update(ctx.fetch, generation, Domain::Species, |line, _, accepted| {
            species::match_species_line(registry, dex, line, accepted)
        })?;
    let species = species::build(registry, dex, &species_entries)?;

    let matchups = ctx
        .cache
        .get_or_update(ctx.fetch, generation, Domain::Types, |line, _, _| {
            types::match_matchup_line(generation, line)
        })?;
    let types = types::build(registry, dex, Some(matchups.as_slice()))?;

    let artifacts = vec![
        Artifact::new(artifact_path(generation, "moves.rs"), moves.render(registry)?),
        Artifact::new(artifact_path(generation, "species.rs"), species.render()?),
        Artifact::new(artifact_path(generation, "types.rs"), types.render()?),
    ];
    let stubs = ctx
        .stubs
        .then(|| stubs::render("Move", &stubs::move_groups(&moves.records)));

    Ok(GenerationOutput {
        artifacts,
        summary: GenerationSummary::new(&types, &species, &moves, None),
        stubs,
    })
}
