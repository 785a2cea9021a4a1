//! Declarations: types, methods, fields, imports, comments and plain statements.

use super::blocks::CodeBlock;
use crate::types::{ConstructId, LineRange};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    #[default]
    Unknown,
    Private,
    Protected,
    Package,
    Public,
    Published,
}

impl Access {
    /// Parse an access keyword.
    ///
    /// Missing or blank text means package access. Anything that is not a
    /// Java access keyword is `Unknown`.
    pub fn parse(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            None | Some("") | Some("package") => Self::Package,
            Some("private") => Self::Private,
            Some("protected") => Self::Protected,
            Some("public") => Self::Public,
            Some(_) => Self::Unknown,
        }
    }

    pub fn is_keyword(word: &str) -> bool {
        matches!(word, "private" | "protected" | "public")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Package => "package",
            Self::Public => "public",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    #[default]
    Unbound,
    Static,
    Class,
    Instance,
}

impl Binding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unbound => "unbound",
            Self::Static => "static",
            Self::Class => "class",
            Self::Instance => "instance",
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-access modifiers collected from a declaration head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_synchronized: bool,
    pub is_native: bool,
    pub is_default: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
}

impl Modifiers {
    /// Record `word` if it is a modifier keyword. Returns false otherwise.
    pub fn apply(&mut self, word: &str) -> bool {
        match word {
            "static" => self.is_static = true,
            "final" => self.is_final = true,
            "abstract" => self.is_abstract = true,
            "synchronized" => self.is_synchronized = true,
            "native" => self.is_native = true,
            "default" => self.is_default = true,
            "transient" => self.is_transient = true,
            "volatile" => self.is_volatile = true,
            "strictfp" | "sealed" | "non-sealed" => {}
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Raw comment including delimiters
    pub text: String,
    /// Comment body without delimiters or leading `*` decoration
    pub content: String,
    pub doc: bool,
    pub multiline: bool,
    pub lines: LineRange,
}

impl Comment {
    /// Build a comment from raw `//` or `/* */` text. Returns `None` for
    /// anything that is not a comment.
    pub fn new(text: &str, lines: LineRange) -> Option<Self> {
        let trimmed = text.trim();
        let (content, doc, multiline) = if let Some(body) = trimmed.strip_prefix("//") {
            (body.trim().to_string(), false, false)
        } else if trimmed.starts_with("/*") {
            let doc = trimmed.starts_with("/**") && !trimmed.starts_with("/**/");
            let inner = trimmed.trim_start_matches('/').trim_start_matches('*');
            let inner = inner.strip_suffix('/').unwrap_or(inner).trim_end_matches('*');
            let body: Vec<&str> = inner
                .lines()
                .map(|line| line.trim().trim_start_matches('*').trim())
                .filter(|line| !line.is_empty())
                .collect();
            (body.join("\n"), doc, trimmed.contains('\n'))
        } else {
            return None;
        };

        Some(Self {
            text: text.to_string(),
            content,
            doc,
            multiline,
            lines,
        })
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comment: {}", self.content)?;
        if self.doc {
            f.write_str(" (docstring)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    /// Imported path without the `import`/`static` keywords, e.g. `java.util.List`
    pub path: String,
    pub is_static: bool,
    pub lines: LineRange,
}

impl Import {
    /// Identifier the import brings into scope: the last dotted segment.
    /// Wildcard imports yield `*`.
    pub fn imported_identifier(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    pub fn is_wildcard(&self) -> bool {
        self.path.ends_with(".*")
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            write!(f, "Import static {}", self.path)
        } else {
            write!(f, "Import {}", self.path)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Anonymous,
}

/// A class, interface, enum or anonymous class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Declared name. Anonymous classes carry their 1-based ordinal instead.
    pub name: String,
    pub kind: ClassKind,
    pub access: Access,
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    pub type_parameters: Option<String>,
    /// Superclass for classes (at most one), super-interfaces for interfaces,
    /// instantiated type for anonymous classes. Names are unresolved.
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub methods: Vec<ConstructId>,
    pub fields: Vec<ConstructId>,
    /// Member and local types declared inside this body
    pub classes: Vec<ConstructId>,
    pub enum_constants: Vec<String>,
    pub body: CodeBlock,
}

impl Class {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            access: Access::Package,
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            type_parameters: None,
            extends: Vec::new(),
            implements: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            classes: Vec::new(),
            enum_constants: Vec::new(),
            body: CodeBlock::default(),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_anonymous(&self) -> bool {
        self.kind == ClassKind::Anonymous
    }

    /// Bare-name subclass check against the unresolved `extends` list.
    pub fn is_subclass_of(&self, name: &str) -> bool {
        self.extends.iter().any(|parent| parent == name)
    }

    pub fn implements_interface(&self, name: &str) -> bool {
        self.implements.iter().any(|iface| iface == name)
    }

    pub fn starting_line(&self) -> Option<u32> {
        self.body.starting_line()
    }

    pub fn ending_line(&self) -> Option<u32> {
        self.body.ending_line()
    }

    pub fn line_count(&self) -> Option<u32> {
        self.body.line_count()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ClassKind::Class => write!(f, "Class {}", self.name),
            ClassKind::Interface => write!(f, "Interface {}", self.name),
            ClassKind::Enum => write!(f, "Enum {}", self.name),
            ClassKind::Anonymous => {
                write!(f, "Anonymous Class ${}", self.name)?;
                if let Some(parent) = self.extends.first() {
                    write!(f, " extends {parent}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub type_name: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    /// Owning class, fixed when the method is attached
    pub owner: ConstructId,
    pub arguments: Vec<Argument>,
    /// `None` for constructors
    pub return_type: Option<String>,
    pub access: Access,
    pub binding: Binding,
    pub is_abstract: bool,
    pub modifiers: Modifiers,
    pub throws: Vec<String>,
    pub annotations: Vec<String>,
    pub type_parameters: Option<String>,
    /// Whether the declaration has a `{ }` body
    pub has_body: bool,
    /// Local and anonymous classes discovered in the body
    pub nested_classes: Vec<ConstructId>,
    pub body: CodeBlock,
}

impl Method {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn is_private(&self) -> bool {
        self.access == Access::Private
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn starting_line(&self) -> Option<u32> {
        self.body.starting_line()
    }

    pub fn ending_line(&self) -> Option<u32> {
        self.body.ending_line()
    }

    pub fn line_count(&self) -> Option<u32> {
        self.body.line_count()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .arguments
            .iter()
            .map(|arg| format!("{} {}", arg.type_name, arg.name))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", self.access)?;
        if self.is_abstract {
            f.write_str(" abstract")?;
        }
        if self.binding != Binding::Instance {
            write!(f, " {}", self.binding)?;
        }
        let ret = self.return_type.as_deref().unwrap_or("");
        write!(f, " Method {}({args}): {ret}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    /// Owning class, fixed when the field is attached
    pub owner: ConstructId,
    pub access: Access,
    pub modifiers: Modifiers,
    pub initializer: Option<String>,
    /// Annotation text preceding the declaration, space separated
    pub annotations: String,
    pub lines: LineRange,
}

impl Field {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }
}

/// Any `;`-terminated statement that is not a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    pub lines: LineRange,
}

impl Statement {
    pub fn new(text: impl Into<String>, lines: LineRange) -> Self {
        Self {
            text: text.into(),
            lines,
        }
    }

    pub fn is_break(&self) -> bool {
        let text = self.text.trim();
        text == "break"
            || text
                .strip_prefix("break")
                .is_some_and(|rest| rest.starts_with(char::is_whitespace))
    }
}
