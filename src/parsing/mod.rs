pub mod cursor;
pub mod error;
pub mod java;
pub mod observer;
pub mod paths;
pub mod token;

pub use cursor::{Checkpoint, Cursor};
pub use error::{ParseError, ParseResult};
pub use java::{JavaParser, ParsedUnit, parse_java};
pub use observer::{NoopObserver, ParseEvent, ParseObserver, TracingObserver};
pub use token::{Token, TokenKind};

/// First line of `text`, cut to at most `max` characters, for log lines.
pub fn summarize(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    let mut summary: String = line.chars().take(max).collect();
    if line.chars().count() > max || text.trim().lines().nth(1).is_some() {
        summary.push_str("...");
    }
    summary
}
