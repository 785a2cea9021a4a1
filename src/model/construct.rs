//! The closed construct union and the per-file arena that owns every node.
//!
//! Cross-references between constructs (method to owner, block to parent,
//! class to nested classes) are [`ConstructId`] indices into the arena, never
//! owning pointers. Dropping the arena drops the whole file model.

use super::blocks::{
    CodeBlock, ExceptionBlock, IfBlock, LoopBlock, PlainBlock, SwitchBlock, SynchronizedBlock,
};
use super::declarations::{Class, Comment, Field, Import, Method, Statement};
use crate::types::{ConstructId, LineRange};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Construct {
    Comment(Comment),
    Import(Import),
    Class(Class),
    Interface(Class),
    AnonymousClass(Class),
    Method(Method),
    Field(Field),
    Statement(Statement),
    If(IfBlock),
    Switch(SwitchBlock),
    Try(ExceptionBlock),
    For(LoopBlock),
    While(LoopBlock),
    Synchronized(SynchronizedBlock),
    Block(PlainBlock),
}

/// Fieldless mirror of [`Construct`] for events and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructKind {
    Comment,
    Import,
    Class,
    Interface,
    AnonymousClass,
    Method,
    Field,
    Statement,
    If,
    Switch,
    Try,
    For,
    While,
    Synchronized,
    Block,
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Comment => "comment",
            Self::Import => "import",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::AnonymousClass => "anonymous class",
            Self::Method => "method",
            Self::Field => "field",
            Self::Statement => "statement",
            Self::If => "if",
            Self::Switch => "switch",
            Self::Try => "try",
            Self::For => "for",
            Self::While => "while",
            Self::Synchronized => "synchronized",
            Self::Block => "block",
        };
        f.write_str(name)
    }
}

impl Construct {
    pub fn kind(&self) -> ConstructKind {
        match self {
            Self::Comment(_) => ConstructKind::Comment,
            Self::Import(_) => ConstructKind::Import,
            Self::Class(_) => ConstructKind::Class,
            Self::Interface(_) => ConstructKind::Interface,
            Self::AnonymousClass(_) => ConstructKind::AnonymousClass,
            Self::Method(_) => ConstructKind::Method,
            Self::Field(_) => ConstructKind::Field,
            Self::Statement(_) => ConstructKind::Statement,
            Self::If(_) => ConstructKind::If,
            Self::Switch(_) => ConstructKind::Switch,
            Self::Try(_) => ConstructKind::Try,
            Self::For(_) => ConstructKind::For,
            Self::While(_) => ConstructKind::While,
            Self::Synchronized(_) => ConstructKind::Synchronized,
            Self::Block(_) => ConstructKind::Block,
        }
    }

    /// Class, interface or anonymous class payload.
    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Self::Class(class) | Self::Interface(class) | Self::AnonymousClass(class) => {
                Some(class)
            }
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut Class> {
        match self {
            Self::Class(class) | Self::Interface(class) | Self::AnonymousClass(class) => {
                Some(class)
            }
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Self::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_method_mut(&mut self) -> Option<&mut Method> {
        match self {
            Self::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_import(&self) -> Option<&Import> {
        match self {
            Self::Import(import) => Some(import),
            _ => None,
        }
    }

    pub fn as_statement(&self) -> Option<&Statement> {
        match self {
            Self::Statement(statement) => Some(statement),
            _ => None,
        }
    }

    pub fn is_class_like(&self) -> bool {
        self.as_class().is_some()
    }

    /// Constructs that open with `{` and wait on the context stack for `}`.
    pub fn is_block(&self) -> bool {
        !matches!(
            self,
            Self::Comment(_) | Self::Import(_) | Self::Field(_) | Self::Statement(_)
        )
    }

    /// The block holding the construct's primary statement list.
    pub fn block(&self) -> Option<&CodeBlock> {
        match self {
            Self::Class(class) | Self::Interface(class) | Self::AnonymousClass(class) => {
                Some(&class.body)
            }
            Self::Method(method) => Some(&method.body),
            Self::If(block) => Some(&block.block),
            Self::Switch(block) => Some(&block.block),
            Self::Try(block) => Some(&block.block),
            Self::For(block) | Self::While(block) => Some(&block.block),
            Self::Synchronized(block) => Some(&block.block),
            Self::Block(block) => Some(&block.block),
            Self::Comment(_) | Self::Import(_) | Self::Field(_) | Self::Statement(_) => None,
        }
    }

    /// Full line range of the construct, including every continuation arm.
    pub fn lines(&self) -> LineRange {
        match self {
            Self::Comment(comment) => comment.lines,
            Self::Import(import) => import.lines,
            Self::Field(field) => field.lines,
            Self::Statement(statement) => statement.lines,
            Self::If(block) => block.lines,
            Self::Try(block) => block.lines,
            _ => self.block().map(|block| block.lines).unwrap_or_default(),
        }
    }

    pub fn starting_line(&self) -> Option<u32> {
        self.lines().start
    }

    pub fn ending_line(&self) -> Option<u32> {
        self.lines().end
    }

    pub fn line_count(&self) -> Option<u32> {
        self.lines().line_count()
    }

    /// Append a statement-level child, routed to the active arm or label run.
    pub fn add_statement(&mut self, id: ConstructId, line: u32, is_break: bool) {
        match self {
            Self::Class(class) | Self::Interface(class) | Self::AnonymousClass(class) => {
                class.body.add_statement(id)
            }
            Self::Method(method) => method.body.add_statement(id),
            Self::If(block) => block.add_statement(id),
            Self::Switch(block) => block.add_statement(id, line, is_break),
            Self::Try(block) => block.add_statement(id),
            Self::For(block) | Self::While(block) => block.block.add_statement(id),
            Self::Synchronized(block) => block.block.add_statement(id),
            Self::Block(block) => block.block.add_statement(id),
            Self::Comment(_) | Self::Import(_) | Self::Field(_) | Self::Statement(_) => {}
        }
    }

    /// Record the closing brace line on the active block.
    pub fn close(&mut self, line: u32) {
        match self {
            Self::Class(class) | Self::Interface(class) | Self::AnonymousClass(class) => {
                class.body.close(line)
            }
            Self::Method(method) => method.body.close(line),
            Self::If(block) => block.close(line),
            Self::Switch(block) => block.close(line),
            Self::Try(block) => block.close(line),
            Self::For(block) | Self::While(block) => block.block.close(line),
            Self::Synchronized(block) => block.block.close(line),
            Self::Block(block) => block.block.close(line),
            Self::Comment(_) | Self::Import(_) | Self::Field(_) | Self::Statement(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Construct that was open on the context stack when this one was created
    pub parent: Option<ConstructId>,
    pub construct: Construct,
}

/// Arena owning every construct of one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeModel {
    nodes: Vec<Node>,
}

impl CodeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent: Option<ConstructId>, construct: Construct) -> ConstructId {
        let id = ConstructId::from_index(self.nodes.len());
        self.nodes.push(Node { parent, construct });
        id
    }

    pub fn get(&self, id: ConstructId) -> Option<&Construct> {
        self.nodes.get(id.index()).map(|node| &node.construct)
    }

    pub fn get_mut(&mut self, id: ConstructId) -> Option<&mut Construct> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.construct)
    }

    pub fn parent(&self, id: ConstructId) -> Option<ConstructId> {
        self.nodes.get(id.index()).and_then(|node| node.parent)
    }

    /// Ancestors from the direct parent outwards.
    pub fn ancestors(&self, id: ConstructId) -> impl Iterator<Item = ConstructId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn class(&self, id: ConstructId) -> Option<&Class> {
        self.get(id).and_then(Construct::as_class)
    }

    pub fn method(&self, id: ConstructId) -> Option<&Method> {
        self.get(id).and_then(Construct::as_method)
    }

    pub fn field(&self, id: ConstructId) -> Option<&Field> {
        self.get(id).and_then(Construct::as_field)
    }

    pub fn import(&self, id: ConstructId) -> Option<&Import> {
        self.get(id).and_then(Construct::as_import)
    }

    pub fn statement(&self, id: ConstructId) -> Option<&Statement> {
        self.get(id).and_then(Construct::as_statement)
    }

    /// Nearest enclosing class-like construct, excluding `id` itself.
    pub fn enclosing_class(&self, id: ConstructId) -> Option<ConstructId> {
        self.ancestors(id)
            .find(|ancestor| self.get(*ancestor).is_some_and(Construct::is_class_like))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstructId, &Construct)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (ConstructId::from_index(index), &node.construct))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
