//! Statement-holding blocks and the control-flow constructs built from them.
//!
//! Every control construct routes incoming statements to exactly one of its
//! sub-blocks (or, for switch fallthrough, to every label in the pending run).

use crate::types::{ConstructId, LineRange};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered statement list with a line range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub statements: Vec<ConstructId>,
    pub lines: LineRange,
}

impl CodeBlock {
    pub fn opened_at(line: u32) -> Self {
        Self {
            statements: Vec::new(),
            lines: LineRange::opened_at(line),
        }
    }

    pub fn add_statement(&mut self, id: ConstructId) {
        self.statements.push(id);
    }

    pub fn close(&mut self, line: u32) {
        self.lines.end = Some(line);
    }

    pub fn starting_line(&self) -> Option<u32> {
        self.lines.start
    }

    pub fn ending_line(&self) -> Option<u32> {
        self.lines.end
    }

    pub fn line_count(&self) -> Option<u32> {
        self.lines.line_count()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElifArm {
    pub condition: String,
    pub block: CodeBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IfArm {
    Primary,
    Elif(usize),
    Else,
}

/// `if` with its `else if` arms and `else` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfBlock {
    pub condition: String,
    pub block: CodeBlock,
    pub elifs: Vec<ElifArm>,
    pub else_block: Option<CodeBlock>,
    pub lines: LineRange,
    active: IfArm,
}

impl IfBlock {
    pub fn new(condition: impl Into<String>, line: u32) -> Self {
        Self {
            condition: condition.into(),
            block: CodeBlock::opened_at(line),
            elifs: Vec::new(),
            else_block: None,
            lines: LineRange::opened_at(line),
            active: IfArm::Primary,
        }
    }

    pub fn active_arm(&self) -> IfArm {
        self.active
    }

    /// Open an `else if` arm. Fails once the `else` block exists.
    pub fn add_elif(&mut self, condition: impl Into<String>, line: u32) -> bool {
        if self.else_block.is_some() {
            return false;
        }
        self.elifs.push(ElifArm {
            condition: condition.into(),
            block: CodeBlock::opened_at(line),
        });
        self.active = IfArm::Elif(self.elifs.len() - 1);
        true
    }

    /// Open the `else` block. Fails if it already exists.
    pub fn activate_else(&mut self, line: u32) -> bool {
        if self.else_block.is_some() {
            return false;
        }
        self.else_block = Some(CodeBlock::opened_at(line));
        self.active = IfArm::Else;
        true
    }

    fn active_block_mut(&mut self) -> &mut CodeBlock {
        match self.active {
            IfArm::Primary => &mut self.block,
            IfArm::Elif(index) => &mut self.elifs[index].block,
            IfArm::Else => self.else_block.get_or_insert_with(CodeBlock::default),
        }
    }

    pub fn add_statement(&mut self, id: ConstructId) {
        self.active_block_mut().add_statement(id);
    }

    pub fn close(&mut self, line: u32) {
        self.active_block_mut().close(line);
        self.lines.end = Some(line);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrySection {
    Body,
    Catch(usize),
    Finally,
}

/// `try` with its `catch` clauses and `finally` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionBlock {
    /// try-with-resources specification, without parentheses
    pub resources: Option<String>,
    pub block: CodeBlock,
    /// Catch clause text (`IOException e`) to handler block, in source order
    pub catches: IndexMap<String, CodeBlock>,
    pub finally: Option<CodeBlock>,
    pub lines: LineRange,
    active: TrySection,
}

impl ExceptionBlock {
    pub fn new(resources: Option<String>, line: u32) -> Self {
        Self {
            resources,
            block: CodeBlock::opened_at(line),
            catches: IndexMap::new(),
            finally: None,
            lines: LineRange::opened_at(line),
            active: TrySection::Body,
        }
    }

    pub fn active_section(&self) -> TrySection {
        self.active
    }

    /// Open a catch handler. Fails after `finally`.
    pub fn add_catch(&mut self, label: impl Into<String>, line: u32) -> bool {
        if self.finally.is_some() {
            return false;
        }
        let entry = self.catches.entry(label.into());
        let index = entry.index();
        entry.or_insert_with(|| CodeBlock::opened_at(line));
        self.active = TrySection::Catch(index);
        true
    }

    /// Open the finally block. Fails if it already exists.
    pub fn activate_finally(&mut self, line: u32) -> bool {
        if self.finally.is_some() {
            return false;
        }
        self.finally = Some(CodeBlock::opened_at(line));
        self.active = TrySection::Finally;
        true
    }

    fn active_block_mut(&mut self) -> &mut CodeBlock {
        match self.active {
            TrySection::Body => &mut self.block,
            TrySection::Catch(index) => match self.catches.get_index_mut(index) {
                Some((_, block)) => block,
                None => &mut self.block,
            },
            TrySection::Finally => self.finally.get_or_insert_with(CodeBlock::default),
        }
    }

    pub fn add_statement(&mut self, id: ConstructId) {
        self.active_block_mut().add_statement(id);
    }

    pub fn close(&mut self, line: u32) {
        self.active_block_mut().close(line);
        self.lines.end = Some(line);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchLabel {
    Case(String),
    Default,
}

/// `switch` with case-label grouping.
///
/// Labels that follow each other without an intervening statement form one
/// pending run; statements go to every block in the run until a `break` or
/// the next label after a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchBlock {
    pub selector: String,
    /// Whole switch range. Holds statements reached with no pending label.
    pub block: CodeBlock,
    pub cases: IndexMap<String, CodeBlock>,
    /// Labels in the order they were encountered
    pub labels: Vec<SwitchLabel>,
    pub default: Option<CodeBlock>,
    pending: Vec<SwitchLabel>,
    collecting_labels: bool,
}

impl SwitchBlock {
    pub fn new(selector: impl Into<String>, line: u32) -> Self {
        Self {
            selector: selector.into(),
            block: CodeBlock::opened_at(line),
            cases: IndexMap::new(),
            labels: Vec::new(),
            default: None,
            pending: Vec::new(),
            collecting_labels: false,
        }
    }

    pub fn pending_labels(&self) -> &[SwitchLabel] {
        &self.pending
    }

    fn open_label(&mut self, label: SwitchLabel) {
        if !self.collecting_labels {
            self.pending.clear();
        }
        self.collecting_labels = true;
        self.labels.push(label.clone());
        self.pending.push(label);
    }

    pub fn add_case(&mut self, expr: impl Into<String>, line: u32) {
        let expr = expr.into();
        self.cases
            .entry(expr.clone())
            .or_insert_with(|| CodeBlock::opened_at(line));
        self.open_label(SwitchLabel::Case(expr));
    }

    pub fn add_default(&mut self, line: u32) {
        self.default.get_or_insert_with(|| CodeBlock::opened_at(line));
        self.open_label(SwitchLabel::Default);
    }

    /// Route a statement to the pending run. `line` extends the range of
    /// every receiving label block; `is_break` closes the run afterwards.
    pub fn add_statement(&mut self, id: ConstructId, line: u32, is_break: bool) {
        self.collecting_labels = false;
        if self.pending.is_empty() {
            self.block.add_statement(id);
            return;
        }
        for label in &self.pending {
            let block = match label {
                SwitchLabel::Case(expr) => self.cases.get_mut(expr),
                SwitchLabel::Default => self.default.as_mut(),
            };
            if let Some(block) = block {
                block.add_statement(id);
                block.close(line);
            }
        }
        if is_break {
            self.pending.clear();
        }
    }

    pub fn case_block(&self, expr: &str) -> Option<&CodeBlock> {
        self.cases.get(expr)
    }

    pub fn close(&mut self, line: u32) {
        self.pending.clear();
        self.collecting_labels = false;
        self.block.close(line);
    }
}

/// `for`, `while` and `do ... while` loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopBlock {
    /// Text inside the loop parentheses. Empty for a `do` loop until its
    /// trailing `while (...)` is read.
    pub header: String,
    pub post_condition: bool,
    pub block: CodeBlock,
}

impl LoopBlock {
    pub fn new(header: impl Into<String>, line: u32) -> Self {
        Self {
            header: header.into(),
            post_condition: false,
            block: CodeBlock::opened_at(line),
        }
    }

    pub fn do_while(line: u32) -> Self {
        Self {
            header: String::new(),
            post_condition: true,
            block: CodeBlock::opened_at(line),
        }
    }
}

/// `synchronized (lock) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynchronizedBlock {
    pub lock: Option<String>,
    pub block: CodeBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Plain,
    StaticInitializer,
    InstanceInitializer,
}

/// Bare `{ }` block, or a static/instance initializer in a class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainBlock {
    pub kind: BlockKind,
    pub block: CodeBlock,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ConstructId {
        ConstructId::new(n).unwrap()
    }

    #[test]
    fn test_code_block_lines() {
        let mut block = CodeBlock::opened_at(4);
        assert_eq!(block.line_count(), None);
        block.close(9);
        assert_eq!(block.starting_line(), Some(4));
        assert_eq!(block.ending_line(), Some(9));
        assert_eq!(block.line_count(), Some(6));
    }

    #[test]
    fn test_if_routing_is_exclusive() {
        let mut block = IfBlock::new("x", 1);
        block.add_statement(id(1));
        block.close(3);
        assert!(block.add_elif("y", 3));
        block.add_statement(id(2));
        block.close(5);
        assert!(block.activate_else(5));
        block.add_statement(id(3));
        block.close(7);

        assert_eq!(block.block.statements, vec![id(1)]);
        assert_eq!(block.elifs.len(), 1);
        assert_eq!(block.elifs[0].condition, "y");
        assert_eq!(block.elifs[0].block.statements, vec![id(2)]);
        assert_eq!(block.else_block.as_ref().unwrap().statements, vec![id(3)]);
        assert_eq!(block.lines, LineRange::new(1, 7));
        assert_eq!(block.block.lines, LineRange::new(1, 3));
        assert_eq!(block.elifs[0].block.lines, LineRange::new(3, 5));
    }

    #[test]
    fn test_if_rejects_arms_after_else() {
        let mut block = IfBlock::new("x", 1);
        assert!(block.activate_else(2));
        assert!(!block.activate_else(3));
        assert!(!block.add_elif("z", 3));
        assert_eq!(block.active_arm(), IfArm::Else);
    }

    #[test]
    fn test_try_sections() {
        let mut block = ExceptionBlock::new(None, 1);
        block.add_statement(id(1));
        block.close(3);
        assert!(block.add_catch("IOException e", 3));
        block.add_statement(id(2));
        block.close(5);
        assert!(block.add_catch("RuntimeException e", 5));
        block.close(6);
        assert!(block.activate_finally(6));
        block.add_statement(id(3));
        block.close(8);
        assert!(!block.add_catch("Error e", 8));

        assert_eq!(block.block.statements, vec![id(1)]);
        let labels: Vec<_> = block.catches.keys().cloned().collect();
        assert_eq!(labels, vec!["IOException e", "RuntimeException e"]);
        assert_eq!(block.catches["IOException e"].statements, vec![id(2)]);
        assert!(block.catches["RuntimeException e"].is_empty());
        assert_eq!(block.finally.as_ref().unwrap().statements, vec![id(3)]);
        assert_eq!(block.lines, LineRange::new(1, 8));
    }

    #[test]
    fn test_switch_fallthrough_shares_statements() {
        let mut switch = SwitchBlock::new("v", 1);
        switch.add_case("A", 2);
        switch.add_case("B", 3);
        switch.add_statement(id(1), 4, false);
        switch.add_statement(id(2), 5, true);
        switch.add_case("C", 6);
        switch.add_statement(id(3), 7, false);

        assert_eq!(switch.case_block("A").unwrap().statements, vec![id(1), id(2)]);
        assert_eq!(switch.case_block("B").unwrap().statements, vec![id(1), id(2)]);
        assert_eq!(switch.case_block("C").unwrap().statements, vec![id(3)]);
        assert_eq!(
            switch.labels,
            vec![
                SwitchLabel::Case("A".into()),
                SwitchLabel::Case("B".into()),
                SwitchLabel::Case("C".into())
            ]
        );
        assert_eq!(switch.case_block("A").unwrap().lines, LineRange::new(2, 5));
    }

    #[test]
    fn test_switch_new_label_after_statement_starts_new_run() {
        let mut switch = SwitchBlock::new("v", 1);
        switch.add_case("A", 2);
        switch.add_statement(id(1), 2, false);
        switch.add_default(3);
        switch.add_statement(id(2), 3, false);

        assert_eq!(switch.case_block("A").unwrap().statements, vec![id(1)]);
        assert_eq!(switch.default.as_ref().unwrap().statements, vec![id(2)]);
        assert_eq!(switch.pending_labels(), &[SwitchLabel::Default]);
    }

    #[test]
    fn test_switch_statement_after_break_stays_in_body() {
        let mut switch = SwitchBlock::new("v", 1);
        switch.add_case("A", 2);
        switch.add_statement(id(1), 2, true);
        switch.add_statement(id(2), 3, false);

        assert_eq!(switch.case_block("A").unwrap().statements, vec![id(1)]);
        assert_eq!(switch.block.statements, vec![id(2)]);
    }
}
