//! Error types shared across the maze-router toolkit.

use thiserror::Error;

/// Errors that abort a routing session outright.
///
/// Anything short of this (a malformed obstacle line, an unroutable
/// net) is a [`Diagnostic`](crate::Diagnostic), not an `Error`: the
/// session keeps going and the caller decides what to do with it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input header malformed: {0}")]
    InvalidHeader(String),

    #[error("input file is empty")]
    EmptyInput,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
