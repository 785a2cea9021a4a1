use thiserror::Error;

/// Fatal, file-level parse failure. The whole file's parse is abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: closing brace without an open block")]
    UnmatchedClosingBrace { line: u32 },

    #[error("line {line}: unexpected text before closing brace: {text}")]
    UnexpectedCloseText { text: String, line: u32 },

    #[error("line {line}: '{keyword}' does not follow a compatible block")]
    UnmatchedContinuation { keyword: String, line: u32 },

    #[error("line {line}: unrecognized construct: {text}")]
    Unrecognized { text: String, line: u32 },

    #[error("line {line}: class {class} declares more than one superclass")]
    MultipleSuperclasses { class: String, line: u32 },

    #[error("line {line}: method {name} declared outside of a class")]
    MethodOutsideClass { name: String, line: u32 },

    #[error("line {line}: unexpected end of input inside unterminated text: {text}")]
    UnexpectedEof { text: String, line: u32 },
}

impl ParseError {
    /// Line the failure was detected on
    pub fn line(&self) -> u32 {
        match self {
            Self::UnmatchedClosingBrace { line }
            | Self::UnexpectedCloseText { line, .. }
            | Self::UnmatchedContinuation { line, .. }
            | Self::Unrecognized { line, .. }
            | Self::MultipleSuperclasses { line, .. }
            | Self::MethodOutsideClass { line, .. }
            | Self::UnexpectedEof { line, .. } => *line,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
