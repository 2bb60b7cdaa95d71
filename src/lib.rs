// In: src/lib.rs

//! Pokemon Datagen
//!
//! Compiles reverse-engineered disassembly listings into range-checked,
//! integrity-verified data tables and dispatch source for the battle engine.
//! Every listing is checked against an authoritative reference dex; any drift
//! between the two aborts the run before anything is written.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod canonical;
pub mod classify;
pub mod dispatch;
pub mod emit;
pub mod errors;
pub mod generate;
pub mod items;
pub mod merge;
pub mod moves;
pub mod registry;
pub mod source;
pub mod species;
pub mod stubs;
pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Re-export the reference model the pipeline checks listings against.
pub use schema::{
    to_id, BaseStats, Dex, DexItem, DexMove, DexSpecies, Effectiveness, Gender, Generation,
    MoveTarget, TypeName,
};

// --- From this crate's modules (`src/`) ---

// Pipeline entry points.
pub use generate::{build, build_generation, load_dex, run, Config, Output};

// Static configuration.
pub use registry::{for_generation, registry, Registry};

// Listing retrieval and caching.
pub use source::{parse_lines, Cache, CacheLine, DirectoryFetch, Domain, Fetch};

// Crate-specific error and result types.
pub use errors::{DatagenError, DatagenResult};
