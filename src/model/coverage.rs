//! Covered-line overlay attached to a parsed file.

use crate::types::LineRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageOverlay {
    covered: BTreeSet<u32>,
}

impl CoverageOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cover_line(&mut self, line: u32) {
        self.covered.insert(line);
    }

    pub fn cover_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = u32>,
    {
        self.covered.extend(lines);
    }

    /// Cover an inclusive `start-end` range, or a single line number.
    ///
    /// Returns false when the text is not a valid range.
    pub fn cover_range(&mut self, range: &str) -> bool {
        let range = range.trim();
        let (start, end) = match range.split_once('-') {
            Some((start, end)) => (start.trim().parse::<u32>(), end.trim().parse::<u32>()),
            None => (range.parse::<u32>(), range.parse::<u32>()),
        };
        match (start, end) {
            (Ok(start), Ok(end)) if start <= end => {
                self.covered.extend(start..=end);
                true
            }
            _ => false,
        }
    }

    pub fn is_covered(&self, line: u32) -> bool {
        self.covered.contains(&line)
    }

    pub fn covered_lines_count(&self) -> usize {
        self.covered.len()
    }

    pub fn covered_lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.covered.iter().copied()
    }

    /// Covered lines inside a closed range.
    pub fn covered_in(&self, range: LineRange) -> usize {
        match (range.start, range.end) {
            (Some(start), Some(end)) if start <= end => self.covered.range(start..=end).count(),
            _ => 0,
        }
    }

    /// Covered fraction of a closed range, `None` while the range is open.
    pub fn ratio(&self, range: LineRange) -> Option<f64> {
        let total = range.line_count()?;
        Some(self.covered_in(range) as f64 / f64::from(total))
    }

    /// Maximal runs of consecutive covered lines.
    pub fn blocks(&self) -> Vec<(u32, u32)> {
        let mut blocks: Vec<(u32, u32)> = Vec::new();
        for &line in &self.covered {
            match blocks.last_mut() {
                Some((_, end)) if *end + 1 == line => *end = line,
                _ => blocks.push((line, line)),
            }
        }
        blocks
    }
}

impl fmt::Display for CoverageOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks = self.blocks();
        if blocks.is_empty() {
            return f.write_str("-");
        }
        let rendered: Vec<String> = blocks
            .into_iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{start}-{end}")
                }
            })
            .collect();
        f.write_str(&rendered.join(", "))
    }
}
