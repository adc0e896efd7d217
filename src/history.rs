use crate::game::Street;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryVerb {
    /// Blind post.
    Post,
    Fold,
    Check,
    Call,
    Raise,
    #[serde(rename = "all-in")]
    AllIn,
    Win,
    /// Uncalled chips handed back.
    Return,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::Post => "post",
            HistoryVerb::Fold => "FOLD",
            HistoryVerb::Check => "CHECK",
            HistoryVerb::Call => "CALL",
            HistoryVerb::Raise => "RAISE",
            HistoryVerb::AllIn => "ALL-IN",
            HistoryVerb::Win => "win",
            HistoryVerb::Return => "return",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub seat: usize,
    pub player: String,
    pub verb: HistoryVerb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    pub street: Street,
}

/// Append-only record of the current hand. Cleared when the next hand starts.
#[derive(Debug, Clone, Default)]
pub struct HandHistory {
    entries: Vec<HistoryEntry>,
}

impl HandHistory {
    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// A window of `n` entries ending `offset` entries before the newest.
    /// The offset is clamped so the window never runs past the oldest entry.
    pub fn recent_offset(&self, n: usize, offset: usize) -> &[HistoryEntry] {
        let len = self.entries.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        &self.entries[start..end]
    }
}
