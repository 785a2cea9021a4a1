//! Incremental Java source parser and code model.
//!
//! [`parsing::JavaParser`] turns Java text into a [`model::CodeModel`] one
//! token at a time; [`model::SourceFile`] wraps the result with file-level
//! queries and a line coverage overlay; [`loader`] reads files from disk.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod model;
pub mod parsing;
pub mod types;

pub use config::{LoggingConfig, ParserConfig, Settings};
pub use error::{InspectorError, InspectorResult};
pub use loader::{load_source_file, load_sources};
pub use model::{Class, CodeModel, Construct, CoverageOverlay, Method, SourceFile};
pub use parsing::{
    JavaParser, NoopObserver, ParseError, ParseEvent, ParseObserver, ParseResult, TracingObserver,
    parse_java,
};
pub use types::{ConstructId, LineRange};
