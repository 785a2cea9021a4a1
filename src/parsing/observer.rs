//! Structured parse events delivered to a caller-supplied observer.
//!
//! The parser holds no logging state of its own. Callers that want to trace
//! a parse pass an observer; [`TracingObserver`] forwards events to `tracing`.

use super::error::ParseError;
use super::token::Token;
use crate::model::ConstructKind;
use crate::types::ConstructId;

#[derive(Debug)]
pub enum ParseEvent<'a> {
    Token(&'a Token),
    Attached {
        id: ConstructId,
        parent: Option<ConstructId>,
        kind: ConstructKind,
    },
    /// Input ended with these constructs still open, innermost last.
    /// They keep an open line range.
    Unclosed { open: &'a [ConstructId], line: u32 },
    Error(&'a ParseError),
}

pub trait ParseObserver {
    fn observe(&mut self, event: &ParseEvent<'_>);
}

impl<F> ParseObserver for F
where
    F: FnMut(&ParseEvent<'_>),
{
    fn observe(&mut self, event: &ParseEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {
    fn observe(&mut self, _event: &ParseEvent<'_>) {}
}

/// Forwards events to `tracing` under the `parser` target.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    file: String,
}

impl TracingObserver {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }
}

impl ParseObserver for TracingObserver {
    fn observe(&mut self, event: &ParseEvent<'_>) {
        match event {
            ParseEvent::Token(token) => {
                tracing::trace!(
                    target: "parser",
                    "[{}] token {:?} at line {}: {}",
                    self.file,
                    token.kind,
                    token.line,
                    crate::parsing::summarize(&token.text, 60)
                );
            }
            ParseEvent::Attached { id, parent, kind } => match parent {
                Some(parent) => {
                    tracing::debug!(target: "parser", "[{}] attached {kind} {id} to {parent}", self.file)
                }
                None => tracing::debug!(target: "parser", "[{}] attached {kind} {id} to file", self.file),
            },
            ParseEvent::Unclosed { open, line } => {
                tracing::warn!(
                    target: "parser",
                    "[{}] input ends at line {line} with {} block(s) still open",
                    self.file,
                    open.len()
                );
            }
            ParseEvent::Error(error) => {
                tracing::warn!(target: "parser", "[{}] parse failed: {error}", self.file);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer_receives_events() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: &ParseEvent<'_>| {
                if let ParseEvent::Error(error) = event {
                    seen.push(error.line());
                }
            };
            let error = ParseError::UnmatchedClosingBrace { line: 4 };
            observer.observe(&ParseEvent::Error(&error));
        }
        assert_eq!(seen, vec![4]);
    }
}
