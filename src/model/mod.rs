//! In-memory code model built by the parser.

pub mod blocks;
pub mod construct;
pub mod coverage;
pub mod declarations;
pub mod source_file;

pub use blocks::{
    BlockKind, CodeBlock, ElifArm, ExceptionBlock, IfArm, IfBlock, LoopBlock, PlainBlock,
    SwitchBlock, SwitchLabel, SynchronizedBlock, TrySection,
};
pub use construct::{CodeModel, Construct, ConstructKind, Node};
pub use coverage::CoverageOverlay;
pub use declarations::{
    Access, Argument, Binding, Class, ClassKind, Comment, Field, Import, Method, Modifiers,
    Statement,
};
pub use source_file::{FileScope, SourceFile};
