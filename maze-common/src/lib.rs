//! Shared types for the maze-router toolkit.

pub mod cell;
pub mod diagnostic;
pub mod error;

pub use cell::{Cell, CellStatus, Direction};
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
