use serde::Serialize;

/// Result of one match attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The run was rewritten in place.
    Replaced {
        /// Full run content before the rewrite.
        original: String,
        /// Full run content after the rewrite.
        patched: String,
    },
    /// Not enough trailing null slack to grow the run; nothing was written.
    Skipped {
        /// Extra bytes the replacement needed.
        needed: usize,
        /// Slack bytes actually available after reserving the terminator.
        available: usize,
    },
}

/// One report entry per match, feasible or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchRecord {
    pub offset: usize,
    pub search: String,
    pub replacement: String,
    pub outcome: Outcome,
}

impl PatchRecord {
    pub fn is_replaced(&self) -> bool {
        matches!(self.outcome, Outcome::Replaced { .. })
    }
}

/// Format a record the way the classic patch tool printed it.
pub fn format_record(record: &PatchRecord) -> String {
    match &record.outcome {
        Outcome::Replaced { original, patched } => format!(
            "Replaced '{}' with '{}' at 0x{:08x}.",
            original, patched, record.offset
        ),
        Outcome::Skipped { .. } => format!(
            "Not enough free space to replace '{}' with '{}' at 0x{:08x}.",
            record.search, record.replacement, record.offset
        ),
    }
}
