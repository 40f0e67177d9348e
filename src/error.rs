use std::collections::TryReserveError;

use thiserror::Error;

use crate::grid::Window;

/// Failure to build a snapshot sequence.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error("a snapshot sequence needs at least one generation")]
    NoGenerations,

    #[error(
        "{window} over {generations} generations needs {cells} cells, more than the limit of {limit}"
    )]
    TooLarge {
        window: Window,
        generations: usize,
        cells: u128,
        limit: u128,
    },

    #[error("out of memory while storing {generations} snapshots: {source}")]
    OutOfMemory {
        generations: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Failure to read an authored pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}
