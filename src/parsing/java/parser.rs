//! Context-stack parser for Java source.
//!
//! The parser reads one head of text at a time, up to the next structural
//! signal: `{` opens a construct and pushes it, `}` closes the innermost one,
//! `;` ends a statement or declaration. Everything else (expressions, types,
//! argument lists) is kept as text and handed to the recognizers.
//!
//! The first malformed construct aborts the whole file with a [`ParseError`].

use super::recognizers::{
    AnonymousDecl, ClassDecl, Control, MethodSignature, Recognized, classify_control,
    enum_constants, is_case_label, recognize_block, recognize_fields, recognize_import,
    recognize_method, recognize_package, strip_statement_labels,
};
use super::syntax::{find_label_colon, parenthesized_after, strip_keyword};
use crate::model::{
    Access, Binding, BlockKind, Class, ClassKind, CodeBlock, CodeModel, Comment, Construct,
    ConstructKind, ExceptionBlock, Field, FileScope, IfBlock, Import, LoopBlock, Method,
    PlainBlock, Statement, SwitchBlock, SynchronizedBlock,
};
use crate::parsing::cursor::{Checkpoint, Cursor};
use crate::parsing::error::{ParseError, ParseResult};
use crate::parsing::observer::{NoopObserver, ParseEvent, ParseObserver};
use crate::parsing::token::{Token, TokenKind};
use crate::types::{ConstructId, LineRange};
use std::collections::HashMap;

/// Output of a successful parse: the arena and the file-level lists.
#[derive(Debug, Clone, Default)]
pub struct ParsedUnit {
    pub model: CodeModel,
    pub scope: FileScope,
}

/// Where the head holding an anonymous class body ends.
#[derive(Debug, Clone, Copy)]
enum HeadEnd {
    /// Offset of the `;` ending a statement or declaration
    Statement(usize),
    /// Offset of the `{` opening a control block
    Header(usize),
}

/// Text read up to a structural terminator.
#[derive(Debug)]
struct Head {
    /// Trimmed head with comments blanked out
    text: String,
    start: Checkpoint,
    /// `{`, `}` or `;`. `None` at end of input.
    terminator: Option<char>,
    /// Offset of the terminator, which is not consumed yet
    end_offset: usize,
    end_line: u32,
    /// Parentheses still open at the terminator
    depth: usize,
}

pub struct JavaParser<'a, O: ParseObserver = NoopObserver> {
    cursor: Cursor<'a>,
    model: CodeModel,
    scope: FileScope,
    stack: Vec<ConstructId>,
    /// Construct closed by the most recent `}`, for `else`, `catch`,
    /// `finally` and the trailing `while` of a `do` loop.
    last_popped: Option<ConstructId>,
    /// Statements already emitted whole because they contain an anonymous
    /// class body: end offset and the stack depth they sit at.
    pre_read: Vec<(usize, usize)>,
    /// `{` offsets of control blocks already pushed because their header
    /// holds an anonymous class, with the stack depth of the header.
    header_brace: Vec<(usize, usize)>,
    /// Anonymous class ordinals per enclosing class
    anonymous_counts: HashMap<Option<ConstructId>, u32>,
    observer: O,
    finished: bool,
}

impl<'a> JavaParser<'a, NoopObserver> {
    pub fn new(text: &'a str) -> Self {
        Self::with_observer(text, NoopObserver)
    }
}

impl<'a, O: ParseObserver> JavaParser<'a, O> {
    pub fn with_observer(text: &'a str, observer: O) -> Self {
        Self {
            cursor: Cursor::new(text),
            model: CodeModel::new(),
            scope: FileScope::default(),
            stack: Vec::new(),
            last_popped: None,
            pre_read: Vec::new(),
            header_brace: Vec::new(),
            anonymous_counts: HashMap::new(),
            observer,
            finished: false,
        }
    }

    /// Run to the end of input.
    pub fn parse(mut self) -> ParseResult<ParsedUnit> {
        while self.next_token()?.is_some() {}
        Ok(self.finish())
    }

    pub fn finish(self) -> ParsedUnit {
        ParsedUnit {
            model: self.model,
            scope: self.scope,
        }
    }

    /// Currently open constructs, innermost last.
    pub fn open_constructs(&self) -> &[ConstructId] {
        &self.stack
    }

    pub fn model(&self) -> &CodeModel {
        &self.model
    }

    /// Advance one step. Returns `Ok(None)` once the input is exhausted; after
    /// an error or the end, keeps returning `Ok(None)`. Blocks that were never
    /// closed stay in [`Self::open_constructs`].
    pub fn next_token(&mut self) -> ParseResult<Option<Token>> {
        if self.finished {
            return Ok(None);
        }
        match self.step() {
            Ok(Some(token)) => {
                if !matches!(token.kind, TokenKind::Comment | TokenKind::EndControl) {
                    self.last_popped = None;
                }
                self.observer.observe(&ParseEvent::Token(&token));
                Ok(Some(token))
            }
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(error) => {
                self.finished = true;
                self.observer.observe(&ParseEvent::Error(&error));
                Err(error)
            }
        }
    }

    fn step(&mut self) -> ParseResult<Option<Token>> {
        loop {
            self.cursor.skip_spaces();
            if self.cursor.at_comment() {
                return Ok(Some(self.comment_token()));
            }
            let head = self.read_head();
            if self.header_brace.last().is_some_and(|(brace, _)| head.end_offset == *brace) {
                // Tail of a control header after its anonymous class body
                self.header_brace.pop();
                self.cursor.next_char(0);
                continue;
            }
            if self.switch_label(&head) {
                continue;
            }
            return match head.terminator {
                None => self.end_of_input(&head).map(|()| None),
                Some('}') => self.close_block(head).map(Some),
                Some('{') => self.open_block(head).map(Some),
                Some(_) => self.end_statement(head).map(Some),
            };
        }
    }

    fn top(&self) -> Option<ConstructId> {
        self.stack.last().copied()
    }

    fn top_class(&self) -> Option<ConstructId> {
        self.top()
            .filter(|id| self.model.get(*id).is_some_and(Construct::is_class_like))
    }

    fn enclosing_class(&self) -> Option<ConstructId> {
        self.stack
            .iter()
            .rev()
            .copied()
            .find(|id| self.model.get(*id).is_some_and(Construct::is_class_like))
    }

    // ---- reading ----

    fn read_head(&mut self) -> Head {
        let start = self.cursor.checkpoint();
        let mut text = String::new();
        let mut depth = 0usize;
        let mut last: Option<char> = None;
        let mut before_last: Option<char> = None;

        let terminator = loop {
            let Some(ch) = self.cursor.read_ahead_char() else {
                break None;
            };
            match ch {
                '"' | '\'' => {
                    if let Some(literal) = self.cursor.read_literal() {
                        text.push_str(literal);
                    }
                    before_last = last;
                    last = Some(ch);
                    continue;
                }
                '/' if self.cursor.at_comment() => {
                    self.cursor.read_comment();
                    text.push(' ');
                    continue;
                }
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ';' if depth == 0 => break Some(';'),
                '}' => break Some('}'),
                '{' => {
                    let lambda = before_last == Some('-') && last == Some('>');
                    let initializer = if depth == 0 {
                        matches!(last, Some('=' | ']')) || lambda
                    } else {
                        last != Some(')')
                    };
                    if !initializer {
                        break Some('{');
                    }
                    text.push_str(self.read_braced());
                    before_last = last;
                    last = Some('}');
                    continue;
                }
                _ => {}
            }
            self.cursor.next_char(0);
            text.push(ch);
            if !ch.is_whitespace() {
                before_last = last;
                last = Some(ch);
            }
        };

        Head {
            text: text.trim().to_string(),
            start,
            terminator,
            end_offset: self.cursor.offset(),
            end_line: self.cursor.line(),
            depth,
        }
    }

    /// Consume a brace-balanced `{ ... }` starting at the cursor.
    fn read_braced(&mut self) -> &'a str {
        let start = self.cursor.offset();
        let mut depth = 0usize;
        while let Some(ch) = self.cursor.read_ahead_char() {
            match ch {
                '"' | '\'' => {
                    self.cursor.read_literal();
                    continue;
                }
                '/' if self.cursor.at_comment() => {
                    self.cursor.read_comment();
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.cursor.next_char(0);
                        break;
                    }
                }
                _ => {}
            }
            self.cursor.next_char(0);
        }
        self.cursor.slice(start, self.cursor.offset())
    }

    /// From just inside an anonymous class body, find where the enclosing
    /// head ends: the `;` of a statement or the `{` of a control header.
    /// `None` if a block closes first or input ends.
    fn scan_anonymous_end(&mut self, open_parens: usize) -> Option<HeadEnd> {
        let mut braces = 1usize;
        let mut parens = open_parens;
        let mut last: Option<char> = None;
        let mut before_last: Option<char> = None;
        while let Some(ch) = self.cursor.read_ahead_char() {
            match ch {
                '"' | '\'' => {
                    self.cursor.read_literal();
                    before_last = last;
                    last = Some(ch);
                    continue;
                }
                '/' if self.cursor.at_comment() => {
                    self.cursor.read_comment();
                    continue;
                }
                '{' if braces == 0 && parens == 0 => {
                    let lambda = before_last == Some('-') && last == Some('>');
                    if !lambda && !matches!(last, Some('=' | ']')) {
                        return Some(HeadEnd::Header(self.cursor.offset()));
                    }
                    braces += 1;
                }
                '{' => braces += 1,
                '}' => braces = braces.checked_sub(1)?,
                '(' if braces == 0 => parens += 1,
                ')' if braces == 0 => parens = parens.saturating_sub(1),
                ';' if braces == 0 && parens == 0 => {
                    return Some(HeadEnd::Statement(self.cursor.offset()));
                }
                _ => {}
            }
            self.cursor.next_char(0);
            if !ch.is_whitespace() {
                before_last = last;
                last = Some(ch);
            }
        }
        None
    }

    fn comment_token(&mut self) -> Token {
        let line = self.cursor.line();
        let raw = self.cursor.read_comment().unwrap_or_default();
        let token = Token::new(raw, TokenKind::Comment, line);
        match Comment::new(raw, LineRange::new(line, self.cursor.line())) {
            Some(comment) => {
                let id = self.attach(Construct::Comment(comment), line);
                token.with_construct(id)
            }
            None => token,
        }
    }

    /// `case x:` and `default:` directly inside a switch. Consumes the label
    /// and reports whether one was found.
    fn switch_label(&mut self, head: &Head) -> bool {
        let Some(switch_id) = self
            .top()
            .filter(|id| matches!(self.model.get(*id), Some(Construct::Switch(_))))
        else {
            return false;
        };
        if !is_case_label(&head.text) {
            return false;
        }
        let Some(colon) = find_label_colon(&head.text) else {
            return false;
        };
        let label = head.text[..colon].trim();
        let line = head.start.line();
        if let Some(Construct::Switch(switch)) = self.model.get_mut(switch_id) {
            match strip_keyword(label, "case") {
                Some(expr) => switch.add_case(expr.trim(), line),
                None => switch.add_default(line),
            }
        }
        self.cursor.restore(head.start);
        self.consume_label();
        true
    }

    fn consume_label(&mut self) {
        let mut depth = 0usize;
        let mut previous = None;
        while let Some(ch) = self.cursor.read_ahead_char() {
            match ch {
                '"' | '\'' => {
                    self.cursor.read_literal();
                    previous = Some(ch);
                    continue;
                }
                '/' if self.cursor.at_comment() => {
                    self.cursor.read_comment();
                    continue;
                }
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                ':' if depth == 0 && previous != Some(':') && self.cursor.read_ahead(2) != "::" => {
                    self.cursor.next_char(0);
                    return;
                }
                _ => {}
            }
            self.cursor.next_char(0);
            previous = Some(ch);
        }
    }

    /// Leftover head text is fatal. Blocks still open are left with an open
    /// line range and reported to the observer.
    fn end_of_input(&mut self, head: &Head) -> ParseResult<()> {
        if !head.text.is_empty() {
            return Err(ParseError::UnexpectedEof {
                text: head.text.clone(),
                line: self.cursor.line(),
            });
        }
        if !self.stack.is_empty() {
            self.observer.observe(&ParseEvent::Unclosed {
                open: &self.stack,
                line: self.cursor.line(),
            });
        }
        Ok(())
    }

    // ---- attachment ----

    /// Insert a construct under the current top of stack and register it
    /// with its parent. `line` is where a routed statement ends.
    fn attach(&mut self, construct: Construct, line: u32) -> ConstructId {
        let parent = self.top();
        let kind = construct.kind();
        let is_break = construct.as_statement().is_some_and(Statement::is_break);
        let id = self.model.insert(parent, construct);

        match (parent, kind) {
            (_, ConstructKind::Comment) => self.scope.comments.push(id),
            (None, ConstructKind::Import) => self.scope.imports.push(id),
            (None, ConstructKind::Class) => self.scope.classes.push(id),
            (None, ConstructKind::Interface) => self.scope.interfaces.push(id),
            (None, _) => self.scope.globals.push(id),
            (
                Some(_),
                ConstructKind::Class | ConstructKind::Interface | ConstructKind::AnonymousClass,
            ) => self.register_nested_class(id),
            (Some(owner), ConstructKind::Method) => {
                if let Some(class) = self.model.get_mut(owner).and_then(Construct::as_class_mut) {
                    class.methods.push(id);
                }
            }
            (Some(owner), ConstructKind::Field) => {
                if let Some(class) = self.model.get_mut(owner).and_then(Construct::as_class_mut) {
                    class.fields.push(id);
                }
            }
            (Some(owner), _) => {
                if let Some(parent) = self.model.get_mut(owner) {
                    parent.add_statement(id, line, is_break);
                }
            }
        }

        self.observer.observe(&ParseEvent::Attached { id, parent, kind });
        id
    }

    /// Record a nested type on the nearest method, or else the nearest class.
    fn register_nested_class(&mut self, id: ConstructId) {
        let holder = self.stack.iter().rev().copied().find(|candidate| {
            self.model
                .get(*candidate)
                .is_some_and(|construct| construct.is_class_like() || construct.as_method().is_some())
        });
        let Some(holder) = holder else {
            return;
        };
        match self.model.get_mut(holder) {
            Some(Construct::Method(method)) => method.nested_classes.push(id),
            Some(construct) => {
                if let Some(class) = construct.as_class_mut() {
                    class.classes.push(id);
                }
            }
            None => {}
        }
    }

    fn push(&mut self, id: ConstructId, head: &Head) -> Token {
        self.stack.push(id);
        Token::new(head.text.as_str(), TokenKind::Control, head.start.line()).with_construct(id)
    }

    // ---- `}` ----

    fn close_block(&mut self, head: Head) -> ParseResult<Token> {
        let line = self.cursor.line();
        if !head.text.is_empty() && !self.record_enum_constants(&head.text) {
            return Err(ParseError::UnexpectedCloseText {
                text: head.text,
                line,
            });
        }
        self.cursor.next_char(0);
        let id = self
            .stack
            .pop()
            .ok_or(ParseError::UnmatchedClosingBrace { line })?;
        if let Some(construct) = self.model.get_mut(id) {
            construct.close(line);
        }
        self.last_popped = Some(id);
        Ok(Token::new("}", TokenKind::EndControl, line).with_construct(id))
    }

    /// Constant list at the start of an enum body.
    fn record_enum_constants(&mut self, text: &str) -> bool {
        let Some(id) = self.top() else {
            return false;
        };
        let Some(Construct::Class(class)) = self.model.get_mut(id) else {
            return false;
        };
        let fresh = class.kind == ClassKind::Enum
            && class.enum_constants.is_empty()
            && class.body.is_empty()
            && class.methods.is_empty()
            && class.fields.is_empty()
            && class.classes.is_empty();
        if !fresh {
            return false;
        }
        let constants = enum_constants(text);
        if constants.is_empty() {
            return false;
        }
        class.enum_constants = constants;
        true
    }

    // ---- `{` ----

    fn open_block(&mut self, head: Head) -> ParseResult<Token> {
        self.cursor.next_char(0);
        let (_, unlabeled) = strip_statement_labels(&head.text);
        if let Some(control) = classify_control(unlabeled) {
            return self.open_control(control, &head);
        }
        match recognize_block(unlabeled) {
            Some(Recognized::Class(decl) | Recognized::Interface(decl)) => {
                self.open_type(decl, &head)
            }
            Some(Recognized::AnonymousClass(decl)) => self.open_anonymous(decl, &head),
            Some(Recognized::Synchronized(lock)) => {
                let line = head.start.line();
                let block = SynchronizedBlock {
                    lock,
                    block: CodeBlock::opened_at(line),
                };
                self.open_statement_block(Construct::Synchronized(block), &head)
            }
            Some(Recognized::Method(signature)) => self.open_method(signature, &head),
            None => Err(ParseError::Unrecognized {
                text: head.text,
                line: head.start.line(),
            }),
        }
    }

    fn open_control(&mut self, control: Control, head: &Head) -> ParseResult<Token> {
        let line = head.start.line();
        let construct = match control {
            Control::Try(resources) => Construct::Try(ExceptionBlock::new(resources, line)),
            Control::If(condition) => Construct::If(IfBlock::new(condition, line)),
            Control::Switch(selector) => Construct::Switch(SwitchBlock::new(selector, line)),
            Control::For(header) => Construct::For(LoopBlock::new(header, line)),
            Control::While(header) => Construct::While(LoopBlock::new(header, line)),
            Control::Do => Construct::While(LoopBlock::do_while(line)),
            Control::Catch(label) => {
                return self.continue_block(head, "catch", |construct| match construct {
                    Construct::Try(block) => block.add_catch(label, line),
                    _ => false,
                });
            }
            Control::Finally => {
                return self.continue_block(head, "finally", |construct| match construct {
                    Construct::Try(block) => block.activate_finally(line),
                    _ => false,
                });
            }
            Control::ElseIf(condition) => {
                return self.continue_block(head, "else if", |construct| match construct {
                    Construct::If(block) => block.add_elif(condition, line),
                    _ => false,
                });
            }
            Control::Else => {
                return self.continue_block(head, "else", |construct| match construct {
                    Construct::If(block) => block.activate_else(line),
                    _ => false,
                });
            }
            Control::Static => {
                if self.top_class().is_none() {
                    return Err(ParseError::Unrecognized {
                        text: head.text.clone(),
                        line,
                    });
                }
                return self.open_plain_block(BlockKind::StaticInitializer, head);
            }
            Control::Empty => {
                let kind = if self.top_class().is_some() {
                    BlockKind::InstanceInitializer
                } else {
                    BlockKind::Plain
                };
                return self.open_plain_block(kind, head);
            }
        };
        self.open_statement_block(construct, head)
    }

    fn open_plain_block(&mut self, kind: BlockKind, head: &Head) -> ParseResult<Token> {
        let block = PlainBlock {
            kind,
            block: CodeBlock::opened_at(head.start.line()),
        };
        self.open_statement_block(Construct::Block(block), head)
    }

    /// Push a control block that sits in its parent's statement list.
    fn open_statement_block(&mut self, construct: Construct, head: &Head) -> ParseResult<Token> {
        if self.top().is_none() {
            return Err(ParseError::Unrecognized {
                text: head.text.clone(),
                line: head.start.line(),
            });
        }
        let id = self.attach(construct, head.start.line());
        Ok(self.push(id, head))
    }

    /// Re-open the block closed just before for its next arm.
    fn continue_block<F>(&mut self, head: &Head, keyword: &str, activate: F) -> ParseResult<Token>
    where
        F: FnOnce(&mut Construct) -> bool,
    {
        let unmatched = || ParseError::UnmatchedContinuation {
            keyword: keyword.to_string(),
            line: head.start.line(),
        };
        let id = self.last_popped.ok_or_else(unmatched)?;
        let construct = self.model.get_mut(id).ok_or_else(unmatched)?;
        if !activate(construct) {
            return Err(unmatched());
        }
        Ok(self.push(id, head))
    }

    fn open_type(&mut self, decl: ClassDecl, head: &Head) -> ParseResult<Token> {
        let line = head.start.line();
        if decl.kind != ClassKind::Interface && decl.extends.len() > 1 {
            return Err(ParseError::MultipleSuperclasses {
                class: decl.name,
                line,
            });
        }
        let mut class = Class::new(decl.name, decl.kind);
        class.access = decl.access;
        class.modifiers = decl.modifiers;
        class.annotations = decl.annotations;
        class.type_parameters = decl.type_parameters;
        class.extends = decl.extends;
        class.implements = decl.implements;
        class.body = CodeBlock::opened_at(line);
        let construct = if class.is_interface() {
            Construct::Interface(class)
        } else {
            Construct::Class(class)
        };
        let id = self.attach(construct, line);
        Ok(self.push(id, head))
    }

    fn open_anonymous(&mut self, decl: AnonymousDecl, head: &Head) -> ParseResult<Token> {
        let line = head.start.line();
        let level = self.stack.len();
        let pending = |entry: Option<&(usize, usize)>| {
            entry.is_some_and(|(end, depth)| head.end_offset < *end && *depth == level)
        };
        let inside_emitted = pending(self.pre_read.last()) || pending(self.header_brace.last());
        let mut token = None;
        if !inside_emitted {
            let body_start = self.cursor.checkpoint();
            let end = self
                .scan_anonymous_end(head.depth)
                .ok_or_else(|| ParseError::Unrecognized {
                    text: head.text.clone(),
                    line,
                })?;
            let end_line = self.cursor.line();
            self.cursor.restore(body_start);
            match end {
                HeadEnd::Statement(end) => {
                    let raw = self.cursor.slice(head.start.offset(), end).trim();
                    self.declare(raw, LineRange::new(line, end_line))?;
                    self.pre_read.push((end, level));
                }
                HeadEnd::Header(brace) => {
                    token = Some(self.open_header(head, brace, end_line)?);
                    self.header_brace.push((brace, self.stack.len()));
                }
            }
        }

        let enclosing = self.enclosing_class();
        let counter = self.anonymous_counts.entry(enclosing).or_insert(0);
        *counter += 1;
        let mut class = Class::new(counter.to_string(), ClassKind::Anonymous);
        class.extends = vec![decl.base];
        class.body = CodeBlock::opened_at(line);
        let id = self.attach(Construct::AnonymousClass(class), line);
        let pushed = self.push(id, head);
        Ok(token.unwrap_or(pushed))
    }

    /// Open the control whose header runs from `head` to the `{` at `brace`,
    /// with an anonymous class somewhere inside its parentheses.
    fn open_header(&mut self, head: &Head, brace: usize, end_line: u32) -> ParseResult<Token> {
        let text = self.cursor.slice(head.start.offset(), brace).trim();
        let header = Head {
            text: text.to_string(),
            start: head.start,
            terminator: Some('{'),
            end_offset: brace,
            end_line,
            depth: 0,
        };
        let (_, unlabeled) = strip_statement_labels(text);
        match classify_control(unlabeled) {
            Some(control) => self.open_control(control, &header),
            None => Err(ParseError::Unrecognized {
                text: header.text,
                line: head.start.line(),
            }),
        }
    }

    fn method_owner(&self, name: &str, head: &Head) -> ParseResult<ConstructId> {
        if let Some(owner) = self.top_class() {
            return Ok(owner);
        }
        if self.enclosing_class().is_some() {
            return Err(ParseError::Unrecognized {
                text: head.text.clone(),
                line: head.start.line(),
            });
        }
        Err(ParseError::MethodOutsideClass {
            name: name.to_string(),
            line: head.start.line(),
        })
    }

    fn build_method(
        &self,
        signature: MethodSignature,
        owner: ConstructId,
        has_body: bool,
        body: CodeBlock,
    ) -> Method {
        let in_interface = self.model.class(owner).is_some_and(Class::is_interface);
        let default_access = if in_interface {
            Access::Public
        } else {
            Access::Package
        };
        let access = signature.access.unwrap_or(default_access);
        let modifiers = signature.modifiers;
        let binding = if modifiers.is_static {
            Binding::Static
        } else {
            Binding::Instance
        };
        let implicitly_abstract = in_interface
            && !has_body
            && !modifiers.is_static
            && !modifiers.is_default
            && access != Access::Private;
        Method {
            name: signature.name,
            owner,
            arguments: signature.arguments,
            return_type: signature.return_type,
            access,
            binding,
            is_abstract: modifiers.is_abstract || implicitly_abstract,
            modifiers,
            throws: signature.throws,
            annotations: signature.annotations,
            type_parameters: signature.type_parameters,
            has_body,
            nested_classes: Vec::new(),
            body,
        }
    }

    fn open_method(&mut self, signature: MethodSignature, head: &Head) -> ParseResult<Token> {
        let line = head.start.line();
        let owner = self.method_owner(&signature.name, head)?;
        let method = self.build_method(signature, owner, true, CodeBlock::opened_at(line));
        let id = self.attach(Construct::Method(method), line);
        Ok(self.push(id, head))
    }

    // ---- `;` ----

    fn end_statement(&mut self, head: Head) -> ParseResult<Token> {
        let line = head.start.line();
        let lines = LineRange::new(line, head.end_line);
        self.cursor.next_char(0);
        let token = Token::new(head.text.as_str(), TokenKind::Statement, line);

        if let Some((end, _)) = self.pre_read.last() {
            if head.end_offset >= *end {
                self.pre_read.pop();
                return Ok(token);
            }
        }
        if head.text.is_empty() {
            return Ok(token);
        }

        if self.stack.is_empty() {
            if let Some(import) = recognize_import(&head.text) {
                let import = Import {
                    path: import.path,
                    is_static: import.is_static,
                    lines,
                };
                let id = self.attach(Construct::Import(import), head.end_line);
                return Ok(token.with_construct(id));
            }
            if let Some(package) = recognize_package(&head.text) {
                self.scope.package = Some(package);
                return Ok(token);
            }
        }

        if let Some(do_loop) = self.pending_do_loop() {
            if let Some(condition) = parenthesized_after(&head.text, "while") {
                if let Some(Construct::While(block)) = self.model.get_mut(do_loop) {
                    block.header = condition.to_string();
                }
                return Ok(token.with_construct(do_loop));
            }
        }

        Ok(match self.declare(&head.text, lines)? {
            Some(id) => token.with_construct(id),
            None => token,
        })
    }

    /// A `do` loop just closed and still waiting for its condition.
    fn pending_do_loop(&self) -> Option<ConstructId> {
        let id = self.last_popped?;
        match self.model.get(id)? {
            Construct::While(block) if block.post_condition && block.header.is_empty() => Some(id),
            _ => None,
        }
    }

    /// Attach a `;`-terminated head. In a class body it must be a bodiless
    /// method, a field list or enum constants; elsewhere it is a statement.
    fn declare(&mut self, text: &str, lines: LineRange) -> ParseResult<Option<ConstructId>> {
        let end_line = lines.end.unwrap_or_default();
        let Some(owner) = self.top_class() else {
            let id = self.attach(Construct::Statement(Statement::new(text, lines)), end_line);
            return Ok(Some(id));
        };

        if self.record_enum_constants(text) {
            return Ok(None);
        }
        if let Some(signature) = recognize_method(text) {
            let body = CodeBlock {
                statements: Vec::new(),
                lines,
            };
            let method = self.build_method(signature, owner, false, body);
            return Ok(Some(self.attach(Construct::Method(method), end_line)));
        }
        if let Some(fields) = recognize_fields(text) {
            let in_interface = self.model.class(owner).is_some_and(Class::is_interface);
            let mut first = None;
            for decl in fields {
                let access = decl.access.unwrap_or(if in_interface {
                    Access::Public
                } else {
                    Access::Package
                });
                let field = Field {
                    name: decl.name,
                    type_name: decl.type_name,
                    owner,
                    access,
                    modifiers: decl.modifiers,
                    initializer: decl.initializer,
                    annotations: decl.annotations,
                    lines,
                };
                let id = self.attach(Construct::Field(field), end_line);
                first.get_or_insert(id);
            }
            return Ok(first);
        }
        Err(ParseError::Unrecognized {
            text: text.to_string(),
            line: lines.start.unwrap_or_default(),
        })
    }
}

/// Parse a whole Java source text.
pub fn parse_java(text: &str) -> ParseResult<ParsedUnit> {
    JavaParser::new(text).parse()
}
