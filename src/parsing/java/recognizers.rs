//! Pure recognizers that classify one head of text.
//!
//! Each recognizer inspects the text read before a `{` or `;` and returns a
//! typed declaration when it matches. None of them touch parser state; the
//! parser decides where the result is attached and which errors apply.

use super::syntax::{
    find_label_colon, find_top_level, is_identifier, is_reserved, matching_close, parenthesized_after,
    split_top_level, split_words, strip_annotations, strip_generics, strip_keyword,
};
use crate::model::{Access, Argument, ClassKind, Modifiers};

/// Class, enum or interface header.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub kind: ClassKind,
    pub access: Access,
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    pub type_parameters: Option<String>,
    /// Bare names, generics stripped. More than one is an error for classes.
    pub extends: Vec<String>,
    pub implements: Vec<String>,
}

/// `new Type(args) {` instantiation head.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousDecl {
    /// Instantiated type with generics stripped
    pub base: String,
    pub arguments: String,
}

/// Method or constructor signature, not yet attached to an owner.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: Option<String>,
    /// `None` when no access keyword was written
    pub access: Option<Access>,
    pub modifiers: Modifiers,
    pub throws: Vec<String>,
    pub annotations: Vec<String>,
    pub type_parameters: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
    pub access: Option<Access>,
    pub modifiers: Modifiers,
    pub initializer: Option<String>,
    pub annotations: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub path: String,
    pub is_static: bool,
}

/// Result of the block recognizers, tried in a fixed order.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognized {
    Class(ClassDecl),
    Interface(ClassDecl),
    AnonymousClass(AnonymousDecl),
    Synchronized(Option<String>),
    Method(MethodSignature),
}

pub type Recognizer = fn(&str) -> Option<Recognized>;

/// Recognizers for heads closed by `{`, in priority order.
pub const BLOCK_RECOGNIZERS: &[Recognizer] = &[
    class_block,
    anonymous_block,
    synchronized_block,
    interface_block,
    method_block,
];

fn class_block(head: &str) -> Option<Recognized> {
    recognize_class(head).map(Recognized::Class)
}

fn anonymous_block(head: &str) -> Option<Recognized> {
    recognize_anonymous_class(head).map(Recognized::AnonymousClass)
}

fn synchronized_block(head: &str) -> Option<Recognized> {
    recognize_synchronized(head).map(Recognized::Synchronized)
}

fn interface_block(head: &str) -> Option<Recognized> {
    recognize_interface(head).map(Recognized::Interface)
}

fn method_block(head: &str) -> Option<Recognized> {
    recognize_method(head).map(Recognized::Method)
}

/// First matching block recognizer.
pub fn recognize_block(head: &str) -> Option<Recognized> {
    BLOCK_RECOGNIZERS.iter().find_map(|recognize| recognize(head))
}

/// Control-flow keywords that open a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Try(Option<String>),
    Catch(String),
    Finally,
    If(String),
    ElseIf(String),
    Else,
    Switch(String),
    For(String),
    While(String),
    Do,
    Static,
    Empty,
}

impl Control {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Try(_) => "try",
            Self::Catch(_) => "catch",
            Self::Finally => "finally",
            Self::If(_) => "if",
            Self::ElseIf(_) => "else if",
            Self::Else => "else",
            Self::Switch(_) => "switch",
            Self::For(_) => "for",
            Self::While(_) => "while",
            Self::Do => "do",
            Self::Static => "static",
            Self::Empty => "{",
        }
    }
}

pub fn classify_control(head: &str) -> Option<Control> {
    let head = head.trim();
    if head.is_empty() {
        return Some(Control::Empty);
    }
    match head {
        "try" => return Some(Control::Try(None)),
        "finally" => return Some(Control::Finally),
        "else" => return Some(Control::Else),
        "do" => return Some(Control::Do),
        "static" => return Some(Control::Static),
        _ => {}
    }
    if let Some(resources) = parenthesized_after(head, "try") {
        return Some(Control::Try(Some(resources.to_string())));
    }
    if let Some(rest) = strip_keyword(head, "else") {
        return parenthesized_after(rest.trim_start(), "if")
            .map(|condition| Control::ElseIf(condition.to_string()));
    }
    let keyed: [(&str, fn(String) -> Control); 5] = [
        ("catch", Control::Catch),
        ("if", Control::If),
        ("switch", Control::Switch),
        ("for", Control::For),
        ("while", Control::While),
    ];
    keyed.iter().find_map(|(keyword, build)| {
        parenthesized_after(head, keyword).map(|inner| build(inner.to_string()))
    })
}

/// Leading access and modifier keywords. Returns the remaining text, or
/// `None` if an access keyword repeats.
fn take_modifiers(text: &str) -> Option<(Option<Access>, Modifiers, &str)> {
    let mut access = None;
    let mut modifiers = Modifiers::default();
    let mut rest = text.trim_start();
    loop {
        let word_len = rest
            .find(|ch: char| ch.is_whitespace() || ch == '<' || ch == '@')
            .unwrap_or(rest.len());
        let word = &rest[..word_len];
        if word.is_empty() {
            break;
        }
        if Access::is_keyword(word) {
            if access.is_some() {
                return None;
            }
            access = Some(Access::parse(Some(word)));
        } else if !modifiers.apply(word) {
            break;
        }
        rest = rest[word_len..].trim_start();
    }
    Some((access, modifiers, rest))
}

fn type_list(text: &str) -> Vec<String> {
    split_top_level(text, ',', true)
        .into_iter()
        .map(strip_generics)
        .filter(|name| !name.is_empty())
        .collect()
}

#[derive(Clone, Copy)]
enum Clause {
    Header,
    Extends,
    Implements,
    Permits,
}

fn recognize_type_declaration(head: &str, keywords: &[(&str, ClassKind)]) -> Option<ClassDecl> {
    let (annotations, rest) = strip_annotations(head);
    let (access, modifiers, rest) = take_modifiers(rest)?;
    let (kind, rest) = keywords
        .iter()
        .find_map(|(keyword, kind)| strip_keyword(rest, keyword).map(|rest| (*kind, rest)))?;
    let rest = rest.trim_start();

    let name_len = rest
        .find(|ch: char| !super::syntax::is_identifier_char(ch))
        .unwrap_or(rest.len());
    let name = &rest[..name_len];
    if !is_identifier(name) || is_reserved(name) {
        return None;
    }
    let mut rest = rest[name_len..].trim_start();

    let mut type_parameters = None;
    if rest.starts_with('<') {
        let close = matching_close(rest, 0)?;
        type_parameters = Some(rest[..=close].to_string());
        rest = rest[close + 1..].trim_start();
    }

    let mut clause = Clause::Header;
    let mut extends_text = String::new();
    let mut implements_text = String::new();
    for word in split_words(rest) {
        clause = match word.as_str() {
            "extends" => Clause::Extends,
            "implements" => Clause::Implements,
            "permits" => Clause::Permits,
            _ => {
                let target = match clause {
                    Clause::Header => return None,
                    Clause::Extends => &mut extends_text,
                    Clause::Implements => &mut implements_text,
                    Clause::Permits => continue,
                };
                target.push_str(&word);
                target.push(' ');
                continue;
            }
        };
    }
    let extends = type_list(&extends_text);
    let implements = type_list(&implements_text);

    Some(ClassDecl {
        name: name.to_string(),
        kind,
        access: access.unwrap_or(Access::Package),
        modifiers,
        annotations,
        type_parameters,
        extends,
        implements,
    })
}

/// `class Name ...` or `enum Name ...`
pub fn recognize_class(head: &str) -> Option<ClassDecl> {
    recognize_type_declaration(head, &[("class", ClassKind::Class), ("enum", ClassKind::Enum)])
}

/// `interface Name ...` or `@interface Name`
pub fn recognize_interface(head: &str) -> Option<ClassDecl> {
    recognize_type_declaration(
        head,
        &[("interface", ClassKind::Interface), ("@interface", ClassKind::Interface)],
    )
}

/// Head ending in `new Type(args)`.
pub fn recognize_anonymous_class(head: &str) -> Option<AnonymousDecl> {
    let head = head.trim_end();
    if !head.ends_with(')') {
        return None;
    }
    let close = head.len() - 1;
    let open = matching_open_paren(head, close)?;
    let before = head[..open].trim_end();

    let type_start = type_suffix_start(before)?;
    let base = strip_generics(&before[type_start..]);
    if base.is_empty() || !base.split('.').all(is_identifier) {
        return None;
    }
    let prefix = before[..type_start].trim_end();
    let keyword_start = prefix.strip_suffix("new")?.len();
    let boundary_ok = prefix[..keyword_start]
        .chars()
        .next_back()
        .is_none_or(|ch| !super::syntax::is_identifier_char(ch));
    if !boundary_ok {
        return None;
    }

    Some(AnonymousDecl {
        base,
        arguments: head[open + 1..close].trim().to_string(),
    })
}

/// Offset of the `(` that the `)` at `close` terminates.
fn matching_open_paren(text: &str, close: usize) -> Option<usize> {
    let mut opens = Vec::new();
    let mut offset = 0;
    let bytes = text.as_bytes();
    while offset < text.len() {
        match bytes[offset] {
            quote @ (b'"' | b'\'') => {
                offset += 1;
                while offset < text.len() && bytes[offset] != quote {
                    if bytes[offset] == b'\\' {
                        offset += 1;
                    }
                    offset += 1;
                }
            }
            b'(' => opens.push(offset),
            b')' => {
                let open = opens.pop();
                if offset == close {
                    return open;
                }
            }
            _ => {}
        }
        offset += 1;
    }
    None
}

/// Start of a trailing `pkg.Type<Args>` at the end of `text`.
fn type_suffix_start(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut end = text.len();
    if text.ends_with('>') {
        let mut depth = 0usize;
        let mut index = end;
        while index > 0 {
            index -= 1;
            match bytes[index] {
                b'>' => depth += 1,
                b'<' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        if depth != 0 {
            return None;
        }
        end = text[..index].trim_end().len();
    }
    let start = text[..end]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| super::syntax::is_identifier_char(*ch) || *ch == '.')
        .last()
        .map(|(idx, _)| idx)?;
    Some(start)
}

/// `synchronized` or `synchronized (lock)`
pub fn recognize_synchronized(head: &str) -> Option<Option<String>> {
    let head = head.trim();
    if head == "synchronized" {
        return Some(None);
    }
    parenthesized_after(head, "synchronized").map(|lock| Some(lock.to_string()))
}

/// Method, constructor or annotation member signature.
pub fn recognize_method(head: &str) -> Option<MethodSignature> {
    let (annotations, rest) = strip_annotations(head);
    let open = find_top_level(rest, '(', true)?;
    let close = matching_close(rest, open)?;
    let after = rest[close + 1..].trim();
    let throws = if after.is_empty() || strip_keyword(after, "default").is_some() {
        Vec::new()
    } else {
        let list = strip_keyword(after, "throws")?;
        let throws: Vec<String> = split_top_level(list, ',', true)
            .into_iter()
            .map(str::to_string)
            .collect();
        if throws.is_empty() {
            return None;
        }
        throws
    };

    let words = split_words(&rest[..open]);
    let (name, qualifiers) = words.split_last()?;
    if !is_identifier(name) || is_reserved(name) {
        return None;
    }

    let mut access = None;
    let mut modifiers = Modifiers::default();
    let mut return_type: Option<String> = None;
    let mut type_parameters = None;
    for word in qualifiers {
        if Access::is_keyword(word) {
            if access.is_some() {
                return None;
            }
            access = Some(Access::parse(Some(word)));
        } else if modifiers.apply(word) {
            continue;
        } else if word.starts_with('<') && return_type.is_none() {
            type_parameters = Some(word.clone());
        } else if return_type.is_none() && !is_reserved(word) && looks_like_type(word) {
            return_type = Some(word.clone());
        } else {
            return None;
        }
    }

    let mut arguments = Vec::new();
    for argument in split_top_level(&rest[open + 1..close], ',', true) {
        arguments.push(parse_argument(argument)?);
    }

    Some(MethodSignature {
        name: name.clone(),
        arguments,
        return_type,
        access,
        modifiers,
        throws,
        annotations,
        type_parameters,
    })
}

fn looks_like_type(word: &str) -> bool {
    let base = strip_generics(word);
    let base = base.trim_end_matches("[]").trim_end_matches("...");
    !base.is_empty() && base.split('.').all(is_identifier)
}

fn parse_argument(text: &str) -> Option<Argument> {
    let (_, text) = strip_annotations(text);
    let mut words = split_words(text);
    words.retain(|word| word != "final");
    let name = words.pop()?;
    if words.is_empty() {
        return None;
    }
    let (name, dims) = match name.find('[') {
        Some(idx) => (name[..idx].to_string(), name[idx..].to_string()),
        None => (name, String::new()),
    };
    let type_name = format!("{}{dims}", words.join(" "));
    if !is_identifier(&name) || !looks_like_type(&type_name) {
        return None;
    }
    Some(Argument { type_name, name })
}

/// Field declarations, one entry per declared name.
pub fn recognize_fields(head: &str) -> Option<Vec<FieldDecl>> {
    let (annotations, rest) = strip_annotations(head);
    let (access, modifiers, rest) = take_modifiers(rest)?;
    let (type_name, declarators) = split_type_prefix(rest)?;
    if is_reserved(type_name) || !looks_like_type(type_name) {
        return None;
    }

    let annotations = annotations.join(" ");
    let mut fields = Vec::new();
    for declarator in split_top_level(declarators, ',', false) {
        let (name, initializer) = match find_top_level(declarator, '=', false) {
            Some(eq) => (
                declarator[..eq].trim(),
                Some(declarator[eq + 1..].trim().to_string()),
            ),
            None => (declarator.trim(), None),
        };
        let (name, dims) = match name.find('[') {
            Some(idx) => (name[..idx].trim_end(), name[idx..].replace(' ', "")),
            None => (name, String::new()),
        };
        if !is_identifier(name) || is_reserved(name) {
            return None;
        }
        fields.push(FieldDecl {
            name: name.to_string(),
            type_name: format!("{type_name}{dims}"),
            access,
            modifiers,
            initializer,
            annotations: annotations.clone(),
        });
    }
    if fields.is_empty() { None } else { Some(fields) }
}

/// Split `Map<K, V>[] rest` into the leading type and the remainder.
fn split_type_prefix(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        let ch = bytes[index];
        if ch.is_ascii_alphanumeric() || matches!(ch, b'_' | b'$' | b'.') || ch >= 0x80 {
            index += 1;
            continue;
        }
        let next = text[index..].trim_start();
        let skipped = text.len() - index - next.len();
        if next.starts_with('<') {
            let close = matching_close(text, index + skipped)?;
            index = close + 1;
        } else if next.starts_with("[]") {
            index += skipped + 2;
        } else if next.starts_with("...") {
            index += skipped + 3;
        } else {
            break;
        }
    }
    let type_name = text[..index].trim();
    let rest = &text[index..];
    if type_name.is_empty() || !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((type_name, rest.trim()))
}

/// `import [static] path`
pub fn recognize_import(head: &str) -> Option<ImportDecl> {
    let rest = strip_keyword(head.trim(), "import")?.trim_start();
    let (is_static, rest) = match strip_keyword(rest, "static") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, rest),
    };
    let path: String = rest.chars().filter(|ch| !ch.is_whitespace()).collect();
    if path.is_empty() {
        return None;
    }
    Some(ImportDecl { path, is_static })
}

/// `package a.b.c`
pub fn recognize_package(head: &str) -> Option<String> {
    let (_, rest) = strip_annotations(head);
    let rest = strip_keyword(rest.trim(), "package")?;
    let name: String = rest.chars().filter(|ch| !ch.is_whitespace()).collect();
    (!name.is_empty()).then_some(name)
}

/// Split leading statement labels (`outer: for (...)`) off a head. Returns
/// the labels in order and the labelled statement.
pub fn strip_statement_labels(head: &str) -> (Vec<&str>, &str) {
    let mut labels = Vec::new();
    let mut rest = head.trim_start();
    while let Some(colon) = find_label_colon(rest) {
        let label = rest[..colon].trim();
        if !is_identifier(label) || is_reserved(label) {
            break;
        }
        labels.push(label);
        rest = rest[colon + 1..].trim_start();
    }
    (labels, rest)
}

/// Whether the head opens a `case` or `default` label.
pub fn is_case_label(head: &str) -> bool {
    let head = head.trim_start();
    strip_keyword(head, "case").is_some()
        || strip_keyword(head, "default").is_some_and(|rest| rest.trim_start().starts_with(':'))
}

/// Enum constant names from `A, B(1), C`.
pub fn enum_constants(head: &str) -> Vec<String> {
    split_top_level(head, ',', false)
        .into_iter()
        .filter_map(|constant| {
            let (_, constant) = strip_annotations(constant);
            let name = constant.split('(').next().unwrap_or_default().trim();
            is_identifier(name).then(|| name.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_header() {
        let decl = recognize_class(
            "@Deprecated public abstract class Pager<T extends Item> extends Base<T> implements Iterable<T>, Closeable",
        )
        .unwrap();
        assert_eq!(decl.name, "Pager");
        assert_eq!(decl.kind, ClassKind::Class);
        assert_eq!(decl.access, Access::Public);
        assert!(decl.modifiers.is_abstract);
        assert_eq!(decl.annotations, vec!["@Deprecated"]);
        assert_eq!(decl.type_parameters.as_deref(), Some("<T extends Item>"));
        assert_eq!(decl.extends, vec!["Base"]);
        assert_eq!(decl.implements, vec!["Iterable", "Closeable"]);
    }

    #[test]
    fn test_multiple_extends_are_collected() {
        let decl = recognize_class("class A extends B, C").unwrap();
        assert_eq!(decl.extends, vec!["B", "C"]);
    }

    #[test]
    fn test_enum_and_interface() {
        let decl = recognize_class("enum Color").unwrap();
        assert_eq!(decl.kind, ClassKind::Enum);
        assert_eq!(decl.access, Access::Package);

        let decl = recognize_interface("public interface Shape extends A, B<C>").unwrap();
        assert_eq!(decl.kind, ClassKind::Interface);
        assert_eq!(decl.extends, vec!["A", "B"]);

        assert!(recognize_interface("public @interface Marker").is_some());
        assert!(recognize_class("interface Shape").is_none());
        assert!(recognize_interface("class Shape").is_none());
    }

    #[test]
    fn test_class_rejects_non_declarations() {
        assert!(recognize_class("Runnable r = new Runnable()").is_none());
        assert!(recognize_class("classify(x)").is_none());
        assert!(recognize_class("class").is_none());
    }

    #[test]
    fn test_anonymous_class() {
        let decl = recognize_anonymous_class("Runnable r = new Runnable()").unwrap();
        assert_eq!(decl.base, "Runnable");
        assert_eq!(decl.arguments, "");

        let decl = recognize_anonymous_class(
            "return new ResourcePager<Issue>(client, request)",
        )
        .unwrap();
        assert_eq!(decl.base, "ResourcePager");
        assert_eq!(decl.arguments, "client, request");

        let decl = recognize_anonymous_class("run(new java.util.TimerTask ()").unwrap();
        assert_eq!(decl.base, "java.util.TimerTask");

        let decl = recognize_anonymous_class(", new Comparator<>()").unwrap();
        assert_eq!(decl.base, "Comparator");

        assert!(recognize_anonymous_class("public Foo newInstance()").is_none());
        assert!(recognize_anonymous_class("void renew()").is_none());
        assert!(recognize_anonymous_class("if (x)").is_none());
    }

    #[test]
    fn test_synchronized() {
        assert_eq!(recognize_synchronized("synchronized (lock)"), Some(Some("lock".into())));
        assert_eq!(recognize_synchronized("synchronized"), Some(None));
        assert_eq!(recognize_synchronized("synchronized void run()"), None);
    }

    #[test]
    fn test_method_signature() {
        let sig = recognize_method(
            "@Override\n public static <T> List<T> wrap(final T item, int[] sizes, String... rest) throws IOException, X",
        )
        .unwrap();
        assert_eq!(sig.name, "wrap");
        assert_eq!(sig.access, Some(Access::Public));
        assert!(sig.modifiers.is_static);
        assert_eq!(sig.type_parameters.as_deref(), Some("<T>"));
        assert_eq!(sig.return_type.as_deref(), Some("List<T>"));
        assert_eq!(sig.annotations, vec!["@Override"]);
        assert_eq!(sig.throws, vec!["IOException", "X"]);
        let args: Vec<(&str, &str)> = sig
            .arguments
            .iter()
            .map(|arg| (arg.type_name.as_str(), arg.name.as_str()))
            .collect();
        assert_eq!(args, vec![("T", "item"), ("int[]", "sizes"), ("String...", "rest")]);
    }

    #[test]
    fn test_constructor_and_modifier_order() {
        let sig = recognize_method("protected Widget(Map<String, Integer> sizes)").unwrap();
        assert_eq!(sig.return_type, None);
        assert_eq!(sig.arguments[0].type_name, "Map<String, Integer>");

        let sig = recognize_method("static public void main(String[] args)").unwrap();
        assert_eq!(sig.access, Some(Access::Public));
        assert_eq!(sig.return_type.as_deref(), Some("void"));
        assert!(sig.modifiers.is_static);
    }

    #[test]
    fn test_method_rejects_calls_and_control() {
        assert!(recognize_method("foo(x, y)").is_none());
        assert!(recognize_method("if (x)").is_none());
        assert!(recognize_method("x = compute(a)").is_none());
        assert!(recognize_method("return build(a)").is_none());
    }

    #[test]
    fn test_annotation_member_with_default() {
        let sig = recognize_method("String value() default \"\"").unwrap();
        assert_eq!(sig.name, "value");
    }

    #[test]
    fn test_fields() {
        let fields =
            recognize_fields("private static final Map<String, List<Integer>> CACHE = new HashMap<>()")
                .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "CACHE");
        assert_eq!(fields[0].type_name, "Map<String, List<Integer>>");
        assert_eq!(fields[0].access, Some(Access::Private));
        assert!(fields[0].modifiers.is_static && fields[0].modifiers.is_final);
        assert_eq!(fields[0].initializer.as_deref(), Some("new HashMap<>()"));

        let fields = recognize_fields("int a, b = f(1, 2), c[]").unwrap();
        let names: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(fields[2].type_name, "int[]");
        assert_eq!(fields[1].initializer.as_deref(), Some("f(1, 2)"));

        let fields = recognize_fields("@Inject Service service").unwrap();
        assert_eq!(fields[0].annotations, "@Inject");
    }

    #[test]
    fn test_fields_reject_statements() {
        assert!(recognize_fields("x = 5").is_none());
        assert!(recognize_fields("foo.bar()").is_none());
        assert!(recognize_fields("return x").is_none());
        assert!(recognize_fields("abstract void f()").is_none());
    }

    #[test]
    fn test_control_keywords() {
        assert_eq!(classify_control("if (a > b)"), Some(Control::If("a > b".into())));
        assert_eq!(classify_control("else  if(c)"), Some(Control::ElseIf("c".into())));
        assert_eq!(classify_control("else"), Some(Control::Else));
        assert_eq!(classify_control("try"), Some(Control::Try(None)));
        assert_eq!(
            classify_control("try (InputStream in = open())"),
            Some(Control::Try(Some("InputStream in = open()".into())))
        );
        assert_eq!(
            classify_control("catch (IOException | RuntimeException e)"),
            Some(Control::Catch("IOException | RuntimeException e".into()))
        );
        assert_eq!(
            classify_control("for (int i = 0; i < n; i++)"),
            Some(Control::For("int i = 0; i < n; i++".into()))
        );
        assert_eq!(classify_control(""), Some(Control::Empty));
        assert_eq!(classify_control("static"), Some(Control::Static));
        assert_eq!(classify_control("public void f()"), None);
        assert_eq!(classify_control("iffy(x)"), None);
    }

    #[test]
    fn test_statement_labels() {
        assert_eq!(
            strip_statement_labels("outer: for (String s : items)"),
            (vec!["outer"], "for (String s : items)")
        );
        assert_eq!(strip_statement_labels("a: b: {"), (vec!["a", "b"], "{"));
        assert_eq!(strip_statement_labels("block:"), (vec!["block"], ""));
        assert_eq!(
            strip_statement_labels("x = ready ? a : b"),
            (vec![], "x = ready ? a : b")
        );
        assert_eq!(
            strip_statement_labels("default: run()"),
            (vec![], "default: run()")
        );
        assert_eq!(
            strip_statement_labels("Runnable r = Foo::bar"),
            (vec![], "Runnable r = Foo::bar")
        );
    }

    #[test]
    fn test_import_and_package() {
        assert_eq!(
            recognize_import("import java.util.List"),
            Some(ImportDecl { path: "java.util.List".into(), is_static: false })
        );
        assert_eq!(
            recognize_import("import static org.junit.Assert.*"),
            Some(ImportDecl { path: "org.junit.Assert.*".into(), is_static: true })
        );
        assert_eq!(recognize_import("important()"), None);
        assert_eq!(recognize_package("package com.example.app"), Some("com.example.app".into()));
    }

    #[test]
    fn test_case_labels_and_enum_constants() {
        assert!(is_case_label("case 1:"));
        assert!(is_case_label("default:"));
        assert!(!is_case_label("default void f()"));
        assert_eq!(enum_constants("RED, GREEN(0x00ff00), BLUE"), vec!["RED", "GREEN", "BLUE"]);
    }
}
