//! A parsed Java file: the construct arena, its file-level lists and the
//! optional coverage overlay.

use super::construct::{CodeModel, Construct};
use super::coverage::CoverageOverlay;
use super::declarations::{Class, Comment, Import, Method};
use crate::config::ParserConfig;
use crate::parsing::paths::module_path_from_file;
use crate::parsing::{JavaParser, ParseObserver, ParseResult, TracingObserver};
use crate::types::{ConstructId, LineRange};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Constructs that were created while no block was open.
///
/// There is no list of free functions: Java methods always belong to a
/// class or interface and are reached through [`Class::methods`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileScope {
    pub package: Option<String>,
    pub imports: Vec<ConstructId>,
    /// Top-level classes and enums
    pub classes: Vec<ConstructId>,
    pub interfaces: Vec<ConstructId>,
    /// Anything else found outside a class
    pub globals: Vec<ConstructId>,
    /// Every comment in the file, wherever it appeared
    pub comments: Vec<ConstructId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    /// Project-relative path
    pub path: PathBuf,
    /// Dotted path derived from `path`, used for qualified names
    pub module_path: String,
    #[serde(flatten)]
    pub scope: FileScope,
    pub model: CodeModel,
    #[serde(skip)]
    text: String,
    coverage: CoverageOverlay,
}

impl SourceFile {
    /// Parse `text` as the contents of `path` (project-relative).
    pub fn parse(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        config: &ParserConfig,
    ) -> ParseResult<Self> {
        let path = path.into();
        if config.trace_events {
            let observer = TracingObserver::new(path.display().to_string());
            Self::parse_with_observer(path, text, config, observer)
        } else {
            Self::parse_with_observer(path, text, config, crate::parsing::NoopObserver)
        }
    }

    pub fn parse_with_observer<O: ParseObserver>(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        config: &ParserConfig,
        observer: O,
    ) -> ParseResult<Self> {
        let path = path.into();
        let text = text.into();
        let unit = JavaParser::with_observer(&text, observer).parse()?;
        let module_path = module_path_from_file(&path, &config.source_roots, &config.extensions);
        Ok(Self {
            path,
            module_path,
            scope: unit.scope,
            model: unit.model,
            text,
            coverage: CoverageOverlay::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn package(&self) -> Option<&str> {
        self.scope.package.as_deref()
    }

    pub fn line_count(&self) -> u32 {
        u32::try_from(self.text.lines().count()).unwrap_or(u32::MAX)
    }

    pub fn imports(&self) -> impl Iterator<Item = (ConstructId, &Import)> + '_ {
        self.scope
            .imports
            .iter()
            .filter_map(|id| self.model.import(*id).map(|import| (*id, import)))
    }

    /// Top-level classes and enums.
    pub fn classes(&self) -> impl Iterator<Item = (ConstructId, &Class)> + '_ {
        self.classes_in(&self.scope.classes)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = (ConstructId, &Class)> + '_ {
        self.classes_in(&self.scope.interfaces)
    }

    fn classes_in<'s>(
        &'s self,
        ids: &'s [ConstructId],
    ) -> impl Iterator<Item = (ConstructId, &'s Class)> + 's {
        ids.iter()
            .filter_map(|id| self.model.class(*id).map(|class| (*id, class)))
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> + '_ {
        self.scope
            .comments
            .iter()
            .filter_map(|id| match self.model.get(*id) {
                Some(Construct::Comment(comment)) => Some(comment),
                _ => None,
            })
    }

    /// First class or enum with this name, at any nesting depth.
    pub fn get_class(&self, name: &str) -> Option<ConstructId> {
        self.model.iter().find_map(|(id, construct)| match construct {
            Construct::Class(class) if class.name == name => Some(id),
            _ => None,
        })
    }

    /// First interface with this name, at any nesting depth.
    pub fn get_interface(&self, name: &str) -> Option<ConstructId> {
        self.model.iter().find_map(|(id, construct)| match construct {
            Construct::Interface(class) if class.name == name => Some(id),
            _ => None,
        })
    }

    /// Methods declared directly in a class-like construct, in order.
    pub fn methods_of(&self, class: ConstructId) -> impl Iterator<Item = (ConstructId, &Method)> + '_ {
        self.model
            .class(class)
            .map(|class| class.methods.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.model.method(*id).map(|method| (*id, method)))
    }

    pub fn get_method(&self, class: ConstructId, name: &str) -> Option<ConstructId> {
        self.methods_of(class)
            .find(|(_, method)| method.name == name)
            .map(|(id, _)| id)
    }

    /// Dotted name for classes, methods and fields.
    ///
    /// Top-level types are prefixed with the module path unless it already
    /// ends in the type name; nested types append to their outer type, and
    /// anonymous classes use `Outer$N`.
    pub fn qualified_name(&self, id: ConstructId) -> Option<String> {
        match self.model.get(id)? {
            Construct::Class(class) | Construct::Interface(class) => {
                match self.model.enclosing_class(id) {
                    Some(outer) => Some(format!("{}.{}", self.qualified_name(outer)?, class.name)),
                    None => Some(self.top_level_name(&class.name)),
                }
            }
            Construct::AnonymousClass(class) => match self.model.enclosing_class(id) {
                Some(outer) => Some(format!("{}${}", self.qualified_name(outer)?, class.name)),
                None => Some(format!("${}", class.name)),
            },
            Construct::Method(method) => {
                Some(format!("{}.{}", self.qualified_name(method.owner)?, method.name))
            }
            Construct::Field(field) => {
                Some(format!("{}.{}", self.qualified_name(field.owner)?, field.name))
            }
            _ => None,
        }
    }

    fn top_level_name(&self, name: &str) -> String {
        let module = self.module_path.as_str();
        if module.is_empty() {
            name.to_string()
        } else if module == name || module.ends_with(&format!(".{name}")) {
            module.to_string()
        } else {
            format!("{module}.{name}")
        }
    }

    /// 1-based lines where the imported identifier occurs as a whole word,
    /// outside import and package declarations. Wildcard imports have no
    /// single identifier and report nothing.
    pub fn find_usages(&self, import_id: ConstructId) -> Vec<u32> {
        let Some(import) = self.model.import(import_id) else {
            return Vec::new();
        };
        if import.is_wildcard() {
            return Vec::new();
        }
        let pattern = format!(r"\b{}\b", regex::escape(import.imported_identifier()));
        let Ok(word) = Regex::new(&pattern) else {
            return Vec::new();
        };

        self.text
            .lines()
            .zip(1u32..)
            .filter(|(line, number)| {
                let declaration = line.trim_start();
                !import.lines.contains(*number)
                    && !declaration.starts_with("import ")
                    && !declaration.starts_with("package ")
                    && word.is_match(line)
            })
            .map(|(_, number)| number)
            .collect()
    }

    pub fn coverage(&self) -> &CoverageOverlay {
        &self.coverage
    }

    /// Union `lines` into the coverage overlay.
    pub fn attach_coverage<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = u32>,
    {
        self.coverage.cover_lines(lines);
    }

    /// Covered fraction of the whole file. `None` for an empty file.
    pub fn covered_ratio(&self) -> Option<f64> {
        match self.line_count() {
            0 => None,
            count => self.coverage.ratio(LineRange::new(1, count)),
        }
    }

    /// Covered fraction of one construct's line range.
    pub fn construct_covered_ratio(&self, id: ConstructId) -> Option<f64> {
        self.coverage.ratio(self.model.get(id)?.lines())
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Java SourceFile")?;
        let counts = [
            (self.scope.imports.len(), "imports"),
            (self.scope.classes.len(), "classes"),
            (self.scope.interfaces.len(), "interfaces"),
        ];
        let parts: Vec<String> = counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| format!("{count} {label}"))
            .collect();
        if !parts.is_empty() {
            write!(f, ": {}", parts.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: &str = "package com.acme;\n\
        import java.util.List;\n\
        import java.util.*;\n\
        public class Widget {\n\
        \x20   private List<String> names;\n\
        \x20   void add(String n) { names.add(n); }\n\
        \x20   static class Part { void fit() { } }\n\
        }\n\
        interface Listing { List<String> all(); }\n";

    fn widget() -> SourceFile {
        SourceFile::parse("src/com/acme/Widget.java", WIDGET, &ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_summary_and_lookup() {
        let file = widget();
        assert_eq!(file.to_string(), "Java SourceFile: 2 imports, 1 classes, 1 interfaces");
        assert_eq!(file.module_path, "com.acme.Widget");
        assert_eq!(file.package(), Some("com.acme"));
        assert_eq!(file.line_count(), 9);

        let widget = file.get_class("Widget").unwrap();
        let part = file.get_class("Part").unwrap();
        assert!(file.get_interface("Listing").is_some());
        assert!(file.get_class("Listing").is_none());
        assert_eq!(file.methods_of(widget).count(), 1);
        assert!(file.get_method(part, "fit").is_some());
        assert!(file.get_method(widget, "fit").is_none());
    }

    #[test]
    fn test_qualified_names() {
        let file = widget();
        let widget = file.get_class("Widget").unwrap();
        let part = file.get_class("Part").unwrap();
        let listing = file.get_interface("Listing").unwrap();
        let add = file.get_method(widget, "add").unwrap();
        assert_eq!(file.qualified_name(widget).unwrap(), "com.acme.Widget");
        assert_eq!(file.qualified_name(part).unwrap(), "com.acme.Widget.Part");
        assert_eq!(file.qualified_name(listing).unwrap(), "com.acme.Widget.Listing");
        assert_eq!(file.qualified_name(add).unwrap(), "com.acme.Widget.add");
    }

    #[test]
    fn test_anonymous_names_count_per_enclosing_class() {
        let source = "class Outer {\n\
            \x20   void f() {\n\
            \x20       Runnable r = new Runnable() {\n\
            \x20           public void run() { Object o = new Object() { }; }\n\
            \x20       };\n\
            \x20   }\n\
            \x20   Runnable s = new Runnable() { public void run() { } };\n\
            }\n";
        let file = SourceFile::parse("Outer.java", source, &ParserConfig::default()).unwrap();
        let outer = file.get_class("Outer").unwrap();
        let f = file.model.method(file.get_method(outer, "f").unwrap()).unwrap();
        let first = f.nested_classes[0];
        let run = file.model.method(file.get_method(first, "run").unwrap()).unwrap();
        let inner = run.nested_classes[0];
        let second = file.model.class(outer).unwrap().classes[0];

        assert_eq!(file.qualified_name(first).unwrap(), "Outer$1");
        assert_eq!(file.qualified_name(inner).unwrap(), "Outer$1$1");
        assert_eq!(file.qualified_name(second).unwrap(), "Outer$2");
    }

    #[test]
    fn test_find_usages_skips_import_lines() {
        let file = widget();
        let (list_import, _) = file.imports().next().unwrap();
        assert_eq!(file.find_usages(list_import), vec![5, 9]);
        let (wildcard, _) = file.imports().nth(1).unwrap();
        assert!(file.find_usages(wildcard).is_empty());
    }

    #[test]
    fn test_empty_file() {
        let file = SourceFile::parse("Empty.java", "", &ParserConfig::default()).unwrap();
        assert_eq!(file.to_string(), "Java SourceFile");
        assert_eq!(file.covered_ratio(), None);
        assert_eq!(file.module_path, "Empty");
    }
}
