//! In-place string substitution over a loaded image.
//!
//! Each configured term pair is scanned for left to right; every match is
//! planned against the trailing null slack of its run and rewritten in place
//! when it fits. The buffer never changes length and no write ever lands
//! outside the span of the original run plus its terminator.

use tracing::{debug, info, warn};

use crate::buffer::ImageBuffer;
use crate::error::Result;

use super::report::{Outcome, PatchRecord};
use super::term::{TermPair, TermTable};

/// The null-terminated run at a match site, recomputed from the live buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunInfo {
    /// Offset of the match (and of the run start).
    pub offset: usize,
    /// Content bytes up to the first null, or to the buffer end when the run
    /// has no terminator.
    pub len: usize,
    /// Nulls after the terminator that are usable as growth room, with one
    /// byte already reserved for the new terminator.
    pub slack: usize,
}

/// Outcome of the capacity check for one match. Carries the run so apply and
/// reporting do not have to rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Feasible(RunInfo),
    Infeasible(RunInfo),
}

impl Decision {
    pub fn run_info(&self) -> RunInfo {
        match self {
            Decision::Feasible(info) | Decision::Infeasible(info) => *info,
        }
    }
}

/// Single-pass, single-threaded patcher owning the image for the duration of
/// the pass.
pub struct Patcher {
    buffer: ImageBuffer,
}

impl Patcher {
    pub fn new(buffer: ImageBuffer) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> ImageBuffer {
        self.buffer
    }

    /// Run the whole pass: every term pair in table order, one sweep each.
    ///
    /// The table is validated up front; a bad table aborts before any byte of
    /// the buffer is read. Capacity shortfalls are not errors, they come back
    /// as `Skipped` records.
    pub fn run(&mut self, table: &TermTable) -> Result<Vec<PatchRecord>> {
        table.validate()?;

        let size_before = self.buffer.len();
        let mut records = Vec::new();
        for pair in table.iter() {
            self.run_term(pair, &mut records)?;
        }
        debug_assert_eq!(self.buffer.len(), size_before);

        Ok(records)
    }

    fn run_term(&mut self, pair: &TermPair, records: &mut Vec<PatchRecord>) -> Result<()> {
        let search = pair.search_bytes();
        debug!("Scanning for '{}' ({} bytes)", pair.search, search.len());

        let mut cursor = 0;
        while let Some(offset) = self.buffer.find(search, cursor) {
            let decision = self.plan(offset, pair);
            let record = self.apply(pair, decision)?;
            records.push(record);

            // Skip the consumed search bytes whether or not the replacement
            // went through; an adjacent match right after them is still seen.
            cursor = offset + search.len();
        }
        Ok(())
    }

    /// Capacity check for a match at `offset`. Read-only.
    ///
    /// A run that reaches the buffer end without a terminator is treated as
    /// content-to-end with zero usable slack, so it can shrink but never
    /// grow.
    pub fn plan(&self, offset: usize, pair: &TermPair) -> Decision {
        let len = self.buffer.run_len(offset);
        let slack = self.buffer.null_run(offset + len).saturating_sub(1);
        let info = RunInfo { offset, len, slack };

        let delta = pair.delta();
        if delta > 0 && delta as usize > slack {
            Decision::Infeasible(info)
        } else {
            Decision::Feasible(info)
        }
    }

    /// Carry out (or record the refusal of) one planned replacement.
    ///
    /// Feasible: writes replacement bytes plus the preserved run suffix at
    /// the match offset, then zeroes the freed gap when the run shrank.
    /// Infeasible: touches nothing. Both produce a report record.
    pub fn apply(&mut self, pair: &TermPair, decision: Decision) -> Result<PatchRecord> {
        let info = decision.run_info();

        if let Decision::Infeasible(_) = decision {
            let needed = pair.delta() as usize;
            warn!(
                "Not enough free space to replace '{}' with '{}' at {:#x} (need {}, have {})",
                pair.search, pair.replacement, info.offset, needed, info.slack
            );
            return Ok(PatchRecord {
                offset: info.offset,
                search: pair.search.clone(),
                replacement: pair.replacement.clone(),
                outcome: Outcome::Skipped {
                    needed,
                    available: info.slack,
                },
            });
        }

        let search_len = pair.search_bytes().len();
        let original = self.buffer.read(info.offset, info.len)?.to_vec();

        // New run: replacement bytes, then whatever followed the matched
        // term inside the same run.
        let mut content = Vec::with_capacity(pair.replacement_bytes().len() + info.len - search_len);
        content.extend_from_slice(pair.replacement_bytes());
        content.extend_from_slice(&original[search_len..]);

        self.buffer.write(info.offset, &content)?;
        if content.len() < info.len {
            // Shrank: the bytes between the new terminator and the old one
            // still hold stale run content and must read as nulls.
            self.buffer.zero(info.offset + content.len(), info.len - content.len())?;
        }

        let original = String::from_utf8_lossy(&original).into_owned();
        let patched = String::from_utf8_lossy(&content).into_owned();
        info!("Replaced '{}' with '{}' at {:#x}", original, patched, info.offset);

        Ok(PatchRecord {
            offset: info.offset,
            search: pair.search.clone(),
            replacement: pair.replacement.clone(),
            outcome: Outcome::Replaced { original, patched },
        })
    }
}
