//! Core types for the scenario pipeline
//!
//! Defines the artifacts passed between pipeline steps:
//! - Attachment points and candidate structures
//! - Chat transcript messages
//! - What-if deltas, recommendations, and the context panel

use crate::error::ScenarioError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tail-risk figure used when a candidate carries no CVaR of its own
pub const DEFAULT_CVAR_PCT: f64 = 12.0;

/// ROI a structure must reach to count as strong performance
pub const DEFAULT_ROI_BENCHMARK_PCT: f64 = 15.0;

/// Loss threshold (in millions) above which reinsurance coverage begins
///
/// Always within `MIN..=MAX`; construction through [`AttachmentPoint::new`]
/// is the only way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AttachmentPoint(u32);

impl AttachmentPoint {
    /// Lowest selectable attachment
    pub const MIN: u32 = 10;
    /// Highest selectable attachment
    pub const MAX: u32 = 100;
    /// Slider granularity
    pub const STEP: u32 = 5;
    /// Attachment every session starts with
    pub const DEFAULT: AttachmentPoint = AttachmentPoint(50);

    /// Validate and wrap an attachment in millions
    pub fn new(value_m: u32) -> Result<Self, ScenarioError> {
        if (Self::MIN..=Self::MAX).contains(&value_m) {
            Ok(Self(value_m))
        } else {
            Err(ScenarioError::InvalidAttachment { value: value_m })
        }
    }

    /// Attachment in millions
    #[inline]
    #[must_use]
    pub fn millions(self) -> u32 {
        self.0
    }
}

impl Default for AttachmentPoint {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for AttachmentPoint {
    type Error = ScenarioError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AttachmentPoint> for u32 {
    fn from(value: AttachmentPoint) -> Self {
        value.0
    }
}

impl fmt::Display for AttachmentPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M", self.0)
    }
}

/// A candidate treaty structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureCandidate {
    /// `"{layers} x {limit}M XS {attachment}M"`
    pub label: String,
    /// Number of layers
    pub layers: u8,
    /// Limit per layer in millions
    pub limit_m: u32,
    /// Attachment the structure was sampled at, in millions
    pub attachment_m: u32,
    /// Expected loss in millions
    pub expected_loss_m: f64,
    /// Projected ROI in percent
    pub projected_roi_pct: f64,
    /// Conditional value at risk, when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvar_pct: Option<f64>,
}

impl StructureCandidate {
    /// Build a candidate, deriving its label from the layering
    #[must_use]
    pub fn new(
        layers: u8,
        limit_m: u32,
        attachment: AttachmentPoint,
        expected_loss_m: f64,
        projected_roi_pct: f64,
    ) -> Self {
        Self {
            label: format!("{layers} x {limit_m}M XS {}M", attachment.millions()),
            layers,
            limit_m,
            attachment_m: attachment.millions(),
            expected_loss_m,
            projected_roi_pct,
            cvar_pct: None,
        }
    }

    /// With an explicit CVaR
    #[inline]
    #[must_use]
    pub fn with_cvar(mut self, cvar_pct: f64) -> Self {
        self.cvar_pct = Some(cvar_pct);
        self
    }

    /// CVaR, falling back to `default_pct`
    #[inline]
    #[must_use]
    pub fn cvar_or(&self, default_pct: f64) -> f64 {
        self.cvar_pct.unwrap_or(default_pct)
    }
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The underwriter
    User,
    /// Aiden
    Assistant,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message
    pub role: Role,
    /// Message text as entered or generated
    pub content: String,
}

impl ChatMessage {
    /// Message typed by the underwriter
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Reply from Aiden
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Relative impact of an attachment change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    /// Expected loss change in percent, within [-20, 20]
    pub loss_change_pct: f64,
    /// Projected ROI change in percent, within [-5, 5]
    pub roi_change_pct: f64,
}

/// Where a projected ROI sits against the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkStatus {
    /// ROI meets or beats the benchmark
    AboveBenchmark,
    /// ROI falls short of the benchmark
    BelowBenchmark,
}

impl BenchmarkStatus {
    /// Classify `roi_pct`; meeting the benchmark exactly counts as above
    #[must_use]
    pub fn classify(roi_pct: f64, benchmark_pct: f64) -> Self {
        if roi_pct >= benchmark_pct {
            Self::AboveBenchmark
        } else {
            Self::BelowBenchmark
        }
    }
}

impl fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AboveBenchmark => write!(f, "Above Benchmark"),
            Self::BelowBenchmark => write!(f, "Below Benchmark"),
        }
    }
}

/// Final recommendation card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Winning candidate
    pub structure: StructureCandidate,
    /// Candidate CVaR, or the configured default
    pub cvar_pct: f64,
    /// Explanation citing recent chat questions
    pub rationale: String,
    /// ROI benchmark the structure was judged against
    pub benchmark_pct: f64,
    /// Structure ROI against `benchmark_pct`
    pub benchmark: BenchmarkStatus,
}

/// Snapshot of the current scenario shown beside the chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPanel {
    /// Attachment currently stored
    pub attachment: AttachmentPoint,
    /// Label of the best stored candidate, or a placeholder
    pub top_structure: String,
    /// ROI of `top_structure`
    pub top_roi_pct: f64,
    /// Benchmark in effect
    pub benchmark_pct: f64,
    /// `top_roi_pct` against `benchmark_pct`
    pub status: BenchmarkStatus,
}

/// Rows and columns of the risk heatmap
pub const HEATMAP_QUINTILES: usize = 5;

/// Loss severity quintile (rows) by ROI quintile (columns), cells in [0, 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskHeatmap {
    /// `cells[loss][roi]`
    pub cells: [[f64; HEATMAP_QUINTILES]; HEATMAP_QUINTILES],
}
