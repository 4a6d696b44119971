//! Session journal
//!
//! Append-only record of completed steps. Each entry hashes its own content
//! together with the previous entry's hash, so editing or relinking any entry
//! is caught by [`Journal::verify_integrity`].

use crate::error::JournalError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Completed user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Treaty summary generated
    Summarize,
    /// Structure table sampled
    Optimize,
    /// Attachment changed and evaluated
    WhatIf,
    /// Question answered
    Chat,
    /// Final structure recommended
    Recommend,
}

impl Action {
    /// Stable snake_case name, also fed into the entry hash
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Summarize => "summarize",
            Action::Optimize => "optimize",
            Action::WhatIf => "what_if",
            Action::Chat => "chat",
            Action::Recommend => "recommend",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the journal, starting at 0
    pub seq: u64,
    /// Step that completed
    pub action: Action,
    /// Free-form description of the step's input or result
    pub detail: String,
    /// Hash of the previous entry; all zeros for the first
    pub prev_hash: [u8; 32],
    /// SHA-256 over `seq`, `action`, `detail` and `prev_hash`
    pub hash: [u8; 32],
}

impl JournalEntry {
    /// Entry hash as lowercase hex
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

/// Append-only, hash-chained record of the session's completed steps
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Empty journal
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain a new entry onto the journal and return its sequence number
    pub fn append(&mut self, action: Action, detail: impl Into<String>) -> u64 {
        let seq = self.entries.len() as u64;
        let prev_hash = self.entries.last().map(|e| e.hash).unwrap_or([0u8; 32]);
        let mut entry = JournalEntry {
            seq,
            action,
            detail: detail.into(),
            prev_hash,
            hash: [0u8; 32],
        };
        entry.hash = compute_hash(&entry);
        self.entries.push(entry);
        seq
    }

    /// All entries, oldest first
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recompute every hash and check each link to its predecessor
    pub fn verify_integrity(&self) -> Result<(), JournalError> {
        let mut prev = [0u8; 32];
        for e in &self.entries {
            if e.prev_hash != prev || e.hash != compute_hash(e) {
                return Err(JournalError::IntegrityViolation { seq: e.seq });
            }
            prev = e.hash;
        }
        Ok(())
    }
}

fn compute_hash(entry: &JournalEntry) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(entry.seq.to_le_bytes());
    hasher.update(entry.action.as_str().as_bytes());
    hasher.update([0]);
    hasher.update(entry.detail.as_bytes());
    hasher.update([0]);
    hasher.update(entry.prev_hash);
    hasher.finalize().into()
}
