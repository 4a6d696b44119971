//! Scenario store
//!
//! Session-owned state plus the session's random source. One store per
//! session; nothing outlives the process.

use crate::config::CoPilotConfig;
use crate::error::ScenarioError;
use crate::stage::Stage;
use crate::types::{AttachmentPoint, ChatMessage, StructureCandidate};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Everything a session accumulates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioState {
    /// Current attachment, 50M until changed
    pub attachment_point: AttachmentPoint,
    /// Set by the summary step
    pub treaty_summary: Option<String>,
    /// Latest table from optimization or what-if, in sampled order
    pub structures: Option<Vec<StructureCandidate>>,
    /// Transcript, oldest first
    pub chat_history: Vec<ChatMessage>,
    /// Furthest step completed
    pub stage: Stage,
}

/// Owner of a session's [`ScenarioState`]
#[derive(Debug)]
pub struct ScenarioStore {
    state: ScenarioState,
    rng: StdRng,
}

impl ScenarioStore {
    /// Store with default state and an entropy-seeded source
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Store with default state and a reproducible source
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Store seeded and positioned per `config`
    #[must_use]
    pub fn from_config(config: &CoPilotConfig) -> Self {
        let mut store = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        store.state.attachment_point = config.default_attachment;
        store
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: ScenarioState::default(),
            rng,
        }
    }

    /// Snapshot of everything stored
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ScenarioState {
        &self.state
    }

    /// Current attachment
    #[inline]
    #[must_use]
    pub fn attachment_point(&self) -> AttachmentPoint {
        self.state.attachment_point
    }

    /// Validate and store a new attachment
    pub fn set_attachment_point(&mut self, value_m: u32) -> Result<AttachmentPoint, ScenarioError> {
        let attachment = AttachmentPoint::new(value_m)?;
        self.state.attachment_point = attachment;
        Ok(attachment)
    }

    /// Stored summary, if the summary step has run
    #[inline]
    #[must_use]
    pub fn treaty_summary(&self) -> Option<&str> {
        self.state.treaty_summary.as_deref()
    }

    /// Store the treaty summary
    pub fn set_treaty_summary(&mut self, summary: String) {
        self.state.treaty_summary = Some(summary);
    }

    /// Latest structure table
    #[inline]
    #[must_use]
    pub fn structures(&self) -> Option<&[StructureCandidate]> {
        self.state.structures.as_deref()
    }

    /// Replace the structure table, keeping the given order
    pub fn set_structures(&mut self, structures: Vec<StructureCandidate>) {
        self.state.structures = Some(structures);
    }

    /// Transcript so far
    #[inline]
    #[must_use]
    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.state.chat_history
    }

    /// Append to the transcript; earlier messages are never touched
    pub fn push_chat(&mut self, message: ChatMessage) {
        self.state.chat_history.push(message);
    }

    /// Furthest step completed
    #[inline]
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    /// Record the step just completed
    pub fn set_stage(&mut self, stage: Stage) {
        self.state.stage = stage;
    }

    /// Session random source
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for ScenarioStore {
    fn default() -> Self {
        Self::new()
    }
}
