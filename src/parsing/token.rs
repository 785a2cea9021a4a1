use crate::types::ConstructId;
use serde::{Deserialize, Serialize};

/// How a parse step was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Comment,
    /// Head text closed by `{`
    Control,
    /// `}`
    EndControl,
    /// Head text closed by `;`
    Statement,
}

/// One parse step: the raw head text, its classification and the construct
/// it produced, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub construct: Option<ConstructId>,
    /// Line the head text started on
    pub line: u32,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, line: u32) -> Self {
        Self {
            text: text.into(),
            kind,
            construct: None,
            line,
        }
    }

    pub fn with_construct(mut self, id: ConstructId) -> Self {
        self.construct = Some(id);
        self
    }
}
