//! End-to-end generation: every supported generation is built in memory and
//! only written out once all of them have succeeded.

mod gen1;
mod gen2;

use crate::emit::{write_all, Artifact};
use crate::errors::{DatagenError, DatagenResult};
use crate::registry::{self, Registry};
use crate::source::{Cache, DirectoryFetch, Fetch};
use crate::summary::{self, GenerationSummary};
use schema::{Dex, Generation};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run configuration gathered from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the raw listings (`<raw>/gen{n}/<domain>.asm`).
    pub raw: PathBuf,
    /// Directory holding `gen{n}.ron` reference dex documents.
    pub dex: PathBuf,
    pub cache: PathBuf,
    pub out: PathBuf,
    /// Ignore cached listings.
    pub force: bool,
    /// Generation whose pending-behavior stubs to render.
    pub stubs: Option<u8>,
}

/// Inputs shared by the per-generation builders.
pub(crate) struct Context<'a> {
    pub fetch: &'a dyn Fetch,
    pub cache: &'a Cache,
    pub dex: &'a Dex,
    pub registry: &'static Registry,
    pub stubs: bool,
}

/// What one generation produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    pub artifacts: Vec<Artifact>,
    pub summary: GenerationSummary,
    pub stubs: Option<String>,
}

/// Everything a run produces, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub artifacts: Vec<Artifact>,
    pub stubs: Option<String>,
}

/// Load `<dir>/gen{n}.ron`.
pub fn load_dex(dir: &Path, generation: Generation) -> DatagenResult<Dex> {
    let path = dir.join(format!("{generation}.ron"));
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(DatagenError::MissingSource(path))
        }
        Err(err) => return Err(err.into()),
    };
    Ok(ron::from_str(&text)?)
}

/// Build a single generation from already loaded inputs.
pub fn build_generation(
    fetch: &dyn Fetch,
    cache: &Cache,
    dex: &Dex,
    generation: Generation,
    stubs: bool,
) -> DatagenResult<GenerationOutput> {
    let ctx = Context {
        fetch,
        cache,
        dex,
        registry: registry::for_generation(generation),
        stubs,
    };
    match generation {
        Generation::Gen1 => gen1::generate(&ctx),
        Generation::Gen2 => gen2::generate(&ctx),
    }
}

/// Build every generation and the summaries, in memory.
pub fn build(config: &Config, fetch: &dyn Fetch) -> DatagenResult<Output> {
    if let Some(num) = config.stubs {
        registry::registry(num)?;
    }
    let cache = Cache::open(&config.cache, config.force)?;

    let mut artifacts = Vec::new();
    let mut summaries = Vec::new();
    let mut stubs = None;
    for generation in Generation::ALL {
        let dex = load_dex(&config.dex, generation)?;
        let wants_stubs = config.stubs == Some(generation.num());
        let output = build_generation(fetch, &cache, &dex, generation, wants_stubs)?;
        info!(%generation, artifacts = output.artifacts.len(), "generation complete");
        artifacts.extend(output.artifacts);
        summaries.push(output.summary);
        if output.stubs.is_some() {
            stubs = output.stubs;
        }
    }
    artifacts.extend(summary::artifacts(&summaries)?);

    Ok(Output { artifacts, stubs })
}

/// Build everything from the configured raw directory, then write it out.
/// Returns the rendered stubs, if any were requested.
pub fn run(config: &Config) -> DatagenResult<Option<String>> {
    let fetch = DirectoryFetch::new(&config.raw);
    let output = build(config, &fetch)?;
    write_all(&config.out, &output.artifacts)?;
    info!(
        out = %config.out.display(),
        artifacts = output.artifacts.len(),
        "generation finished"
    );
    Ok(output.stubs)
}

/// Path of a generation's artifact relative to the output directory.
pub(crate) fn artifact_path(generation: Generation, file: &str) -> PathBuf {
    PathBuf::from(generation.to_string()).join(file)
}
