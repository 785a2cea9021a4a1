use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Index of a construct inside one file's [`CodeModel`](crate::model::CodeModel) arena.
///
/// Ids start at 1 so that `Option<ConstructId>` stays the size of a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstructId(NonZeroU32);

impl ConstructId {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }

    /// Position of the construct in the arena's backing vector
    pub(crate) fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        // The arena never holds more than u32::MAX - 1 entries per file.
        Self(NonZeroU32::MIN.saturating_add(index as u32))
    }
}

impl std::fmt::Display for ConstructId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inclusive 1-based line range of a construct.
///
/// `start` is recorded when the construct opens, `end` when it closes, so a
/// range under construction has only one bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn opened_at(start: u32) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Number of lines covered; defined only once both bounds exist.
    pub fn line_count(&self) -> Option<u32> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => Some(end - start + 1),
            _ => None,
        }
    }

    pub fn contains(&self, line: u32) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => line >= start && line <= end,
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
