//! Java source parsing

pub mod parser;
pub mod recognizers;
pub mod syntax;

pub use parser::{JavaParser, ParsedUnit, parse_java};
pub use recognizers::{Recognized, Recognizer, BLOCK_RECOGNIZERS};
