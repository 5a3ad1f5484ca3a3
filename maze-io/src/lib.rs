//! Input parsing, output serialization, and PNG visualization — the
//! textual I/O boundary around the routing engine (§6). None of this
//! sits on the correctness path; the engine itself never touches a
//! filesystem.

pub mod parser;
pub mod visualize;
pub mod writer;

pub use parser::{parse, ParsedInput};
pub use writer::render;
