use crate::source::Domain;
use schema::{Generation, TypeName};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the generator.
///
/// Every variant except the wrapped I/O and decoding errors is an integrity
/// error: upstream listings or the static registry have drifted apart, and
/// the whole run must stop.
#[derive(Debug, Error)]
pub enum DatagenError {
    /// A listing entry sits at a position that disagrees with its dex id
    #[error("Expected {expected} for {name} and received {found}")]
    IndexMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A produced table does not have its independently known size
    #[error("{table}: expected {expected} entries, produced {actual}")]
    TableSize {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Two effects configured as identical have diverged upstream
    #[error(
        "Invalid grouping of effects: '{alias}' and '{canonical}' \
         (edit distance {distance} exceeds {tolerance})"
    )]
    InvalidGrouping {
        alias: String,
        canonical: String,
        distance: usize,
        tolerance: usize,
    },

    /// A merge group has observed aliases but no listing for its canonical member
    #[error("Merge group for '{canonical}' has no command listing for its canonical member")]
    MissingCanonical { canonical: String },

    /// A curated sub-range member never appears in the generation's data
    #[error("Curated effect '{effect}' of category '{category}' was not observed")]
    MissingCuratedEffect { category: String, effect: String },

    #[error("Unsupported generation {0}")]
    UnsupportedGeneration(u8),

    #[error("{generation} {domain}: unknown name '{name}'")]
    UnknownName {
        generation: Generation,
        domain: Domain,
        name: String,
    },

    #[error("{domain}: duplicate name '{name}'")]
    DuplicateName { domain: Domain, name: String },

    #[error("{domain}: malformed line '{line}'")]
    MalformedLine { domain: Domain, line: String },

    #[error("{attacking} against {defending}: multiplier {multiplier} has no effectiveness category")]
    InvalidMultiplier {
        attacking: TypeName,
        defending: TypeName,
        multiplier: f32,
    },

    #[error("Invalid gender ratio for {0}")]
    InvalidGenderRatio(String),

    #[error("Source listing not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dex error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatagenError {
    /// Whether this error signals drift between upstream data and static configuration.
    pub fn is_integrity(&self) -> bool {
        !matches!(
            self,
            DatagenError::Io(_)
                | DatagenError::Ron(_)
                | DatagenError::Json(_)
                | DatagenError::MissingSource(_)
        )
    }
}

/// Type alias for Results using DatagenError
pub type DatagenResult<T> = Result<T, DatagenError>;

/// Fail unless the record at 1-based `position` carries the dex id `id`.
pub fn check_position(name: &str, id: u16, position: usize) -> DatagenResult<()> {
    if usize::from(id) != position {
        return Err(DatagenError::IndexMismatch {
            name: name.to_string(),
            expected: position,
            found: usize::from(id),
        });
    }
    Ok(())
}

/// Fail unless `actual` matches the independently known `expected` size.
pub fn check_size(table: &str, expected: usize, actual: usize) -> DatagenResult<()> {
    if expected != actual {
        return Err(DatagenError::TableSize {
            table: table.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_position_reports_position_and_name() {
        let err = check_position("Sand Attack", 44, 42).unwrap_err();
        match err {
            DatagenError::IndexMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "Sand Attack");
                assert_eq!(expected, 42);
                assert_eq!(found, 44);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(check_position("Pound", 1, 1).is_ok());
    }

    #[test]
    fn test_io_errors_are_not_integrity_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!DatagenError::Io(io_err).is_integrity());
        assert!(DatagenError::UnsupportedGeneration(3).is_integrity());
    }
}
