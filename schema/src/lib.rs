// Pokemon Datagen Schema - Shared reference definitions
// This crate contains the authoritative reference model (generations, types,
// the dex documents and their built-in type charts) that the generator checks
// every upstream listing against.

// Re-export the main types
pub use dex::*;
pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod dex;
pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
