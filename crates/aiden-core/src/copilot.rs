//! Co-pilot session
//!
//! Drives one underwriter session through the pipeline:
//! - Checks step ordering against the stage machine (or artifact presence
//!   in lenient mode)
//! - Invokes the pure step functions with the session random source
//! - Stores results back into the scenario store
//! - Records each completed step in the journal

use crate::chat::{respond, DEFAULT_CONTEXT};
use crate::config::{CoPilotConfig, Gating};
use crate::error::{Artifact, ConfigError, ScenarioError};
use crate::journal::{Action, Journal};
use crate::sampler::{sample_heatmap, sample_structures};
use crate::selector::{recommend, select_best};
use crate::stage::{validate_transition, Stage};
use crate::store::{ScenarioState, ScenarioStore};
use crate::summary::generate_summary;
use crate::types::{
    AttachmentPoint, BenchmarkStatus, ChatMessage, ContextPanel, Recommendation, RiskHeatmap,
    StructureCandidate, WhatIfResult,
};
use crate::what_if::evaluate_what_if;
use serde::{Deserialize, Serialize};

/// Top structure shown before any table exists
const PLACEHOLDER_STRUCTURE: &str = "50 x 50M (default)";
const PLACEHOLDER_ROI_PCT: f64 = 14.5;

/// Everything a what-if run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfOutcome {
    /// Attachment evaluated, now stored
    pub attachment: AttachmentPoint,
    /// Loss and ROI deltas
    pub result: WhatIfResult,
    /// Table resampled at `attachment`
    pub structures: Vec<StructureCandidate>,
    /// Best candidate of `structures`
    pub top: StructureCandidate,
}

/// One underwriter session
#[derive(Debug)]
pub struct CoPilot {
    config: CoPilotConfig,
    store: ScenarioStore,
    journal: Journal,
}

impl CoPilot {
    /// Create a session, rejecting configuration the pipeline cannot run with
    pub fn new(config: CoPilotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CoPilotConfig) -> Self {
        let store = ScenarioStore::from_config(&config);
        Self {
            config,
            store,
            journal: Journal::new(),
        }
    }

    /// Configuration the session was created with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CoPilotConfig {
        &self.config
    }

    /// Underlying scenario store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ScenarioStore {
        &self.store
    }

    /// Current scenario state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ScenarioState {
        self.store.state()
    }

    /// Furthest step completed
    #[inline]
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.store.stage()
    }

    /// Record of completed steps
    #[inline]
    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Step 1: summarize the sample treaty.
    ///
    /// Once a summary exists it is returned unchanged without moving the stage.
    pub fn summarize(&mut self) -> Result<String, ScenarioError> {
        if let Some(existing) = self.store.treaty_summary() {
            return Ok(existing.to_owned());
        }
        self.check(Stage::SummaryGenerated)?;

        let summary = generate_summary();
        self.store.set_treaty_summary(summary.clone());
        self.store.set_stage(Stage::SummaryGenerated);
        self.journal.append(Action::Summarize, "sample treaty");
        tracing::info!("Generated treaty summary ({} chars)", summary.len());
        Ok(summary)
    }

    /// Step 2: sample candidate structures at the stored attachment
    pub fn optimize(&mut self) -> Result<Vec<StructureCandidate>, ScenarioError> {
        self.check(Stage::StructuresGenerated)?;

        let attachment = self.store.attachment_point();
        let count = self.config.structure_count;
        let structures = sample_structures(self.store.rng_mut(), attachment, count);
        self.store.set_structures(structures.clone());
        self.store.set_stage(Stage::StructuresGenerated);
        self.journal
            .append(Action::Optimize, format!("{count} structures at {attachment}"));
        tracing::info!("Sampled {} structures at {}", count, attachment);
        Ok(structures)
    }

    /// Step 3: move the attachment, evaluate the impact, and resample.
    ///
    /// The store is only written once every part of the step has succeeded.
    pub fn what_if(&mut self, attachment_m: u32) -> Result<WhatIfOutcome, ScenarioError> {
        self.check(Stage::WhatIfEvaluated)?;
        let attachment = AttachmentPoint::new(attachment_m)?;

        let result = evaluate_what_if(self.store.rng_mut(), attachment);
        let structures =
            sample_structures(self.store.rng_mut(), attachment, self.config.structure_count);
        let top = select_best(&structures)?.clone();

        self.store.set_attachment_point(attachment.millions())?;
        self.store.set_structures(structures.clone());
        self.store.set_stage(Stage::WhatIfEvaluated);
        self.journal.append(
            Action::WhatIf,
            format!(
                "{attachment}: loss {:+.2}%, roi {:+.2}%",
                result.loss_change_pct, result.roi_change_pct
            ),
        );
        tracing::info!(
            "What-if at {}: loss {}%, roi {}%, top {}",
            attachment,
            result.loss_change_pct,
            result.roi_change_pct,
            top.label
        );
        Ok(WhatIfOutcome {
            attachment,
            result,
            structures,
            top,
        })
    }

    /// Step 4: answer a question against the stored summary.
    ///
    /// Allowed at any stage; does not move the session.
    pub fn chat(&mut self, user_text: &str) -> Result<String, ScenarioError> {
        if user_text.trim().is_empty() {
            return Err(ScenarioError::EmptyMessage);
        }
        let context = self.store.treaty_summary().unwrap_or(DEFAULT_CONTEXT);
        let reply = respond(user_text, context);
        tracing::debug!("Chat context from summary: {}", self.store.treaty_summary().is_some());

        self.store.push_chat(ChatMessage::user(user_text));
        self.store.push_chat(ChatMessage::assistant(reply.clone()));
        self.journal.append(Action::Chat, user_text);
        Ok(reply)
    }

    /// Step 5: recommend the best stored structure
    pub fn recommend(&mut self) -> Result<Recommendation, ScenarioError> {
        self.check(Stage::Recommended)?;

        let structures = self
            .store
            .structures()
            .ok_or(ScenarioError::MissingArtifact(Artifact::Structures))?;
        let recommendation = recommend(
            structures,
            self.store.chat_history(),
            self.config.roi_benchmark_pct,
            self.config.default_cvar_pct,
        )?;
        self.store.set_stage(Stage::Recommended);
        self.journal
            .append(Action::Recommend, recommendation.structure.label.clone());
        tracing::info!(
            "Recommended {} at {}% ROI ({})",
            recommendation.structure.label,
            recommendation.structure.projected_roi_pct,
            recommendation.benchmark
        );
        Ok(recommendation)
    }

    /// Current attachment and top candidate against the benchmark
    #[must_use]
    pub fn context_panel(&self) -> ContextPanel {
        let benchmark_pct = self.config.roi_benchmark_pct;
        let (top_structure, top_roi_pct) = match self.store.structures().map(select_best) {
            Some(Ok(top)) => (top.label.clone(), top.projected_roi_pct),
            _ => (PLACEHOLDER_STRUCTURE.to_string(), PLACEHOLDER_ROI_PCT),
        };
        ContextPanel {
            attachment: self.store.attachment_point(),
            top_structure,
            top_roi_pct,
            benchmark_pct,
            status: BenchmarkStatus::classify(top_roi_pct, benchmark_pct),
        }
    }

    /// Draw a risk heatmap from the session random source
    pub fn risk_heatmap(&mut self) -> RiskHeatmap {
        sample_heatmap(self.store.rng_mut())
    }

    /// Check the journal hash chain
    pub fn verify_journal(&self) -> Result<(), ScenarioError> {
        self.journal.verify_integrity()?;
        Ok(())
    }

    fn check(&self, to: Stage) -> Result<(), ScenarioError> {
        match self.config.gating {
            Gating::Strict => {
                validate_transition(self.store.stage(), to)?;
                Ok(())
            }
            Gating::Lenient => {
                let missing = match to {
                    Stage::StructuresGenerated if self.store.treaty_summary().is_none() => {
                        Some(Artifact::Summary)
                    }
                    Stage::Recommended if self.store.structures().map_or(true, <[_]>::is_empty) => {
                        Some(Artifact::Structures)
                    }
                    _ => None,
                };
                match missing {
                    Some(artifact) => {
                        tracing::warn!("Cannot reach {}: missing {}", to, artifact);
                        Err(ScenarioError::MissingArtifact(artifact))
                    }
                    None => Ok(()),
                }
            }
        }
    }
}

impl Default for CoPilot {
    fn default() -> Self {
        Self::with_valid_config(CoPilotConfig::default())
    }
}
