//! Error types for the scenario pipeline
//!
//! Core functions return typed errors; turning them into user-facing
//! prompts is left to the caller via [`ScenarioError::user_message`].

use crate::stage::Stage;
use std::fmt;
use std::path::PathBuf;

/// Main pipeline error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    /// Selector invoked on an empty candidate sequence
    #[error("no structure candidates to choose from")]
    EmptyInput,

    /// Attachment point outside the selectable range
    #[error("attachment point {value}M is outside 10M..=100M")]
    InvalidAttachment {
        /// Rejected value in millions
        value: u32,
    },

    /// Blank chat input
    #[error("chat message is empty")]
    EmptyMessage,

    /// Step attempted out of order
    #[error(transparent)]
    Stage(#[from] StageError),

    /// An earlier step has not produced its artifact yet
    #[error("missing {0}: complete the earlier step first")]
    MissingArtifact(Artifact),

    /// Session journal failed verification
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
}

impl ScenarioError {
    /// Check if the error means an earlier step is still pending
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Stage(_) | Self::MissingArtifact(_))
    }

    /// Short prompt suitable for showing to the underwriter
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput | Self::MissingArtifact(Artifact::Structures) => {
                "Please run the optimization or what-if step to generate structures first."
            }
            Self::MissingArtifact(Artifact::Summary) => {
                "Please complete Step 1 first to generate a treaty summary."
            }
            Self::Stage(_) => "Please complete the previous step first.",
            Self::InvalidAttachment { .. } => "Attachment point must be between 10M and 100M.",
            Self::EmptyMessage => "Type a question before sending.",
            Self::Journal(_) => "The session journal failed verification.",
        }
    }
}

/// Stage machine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    /// `to` is not reachable from `from`
    #[error("illegal stage transition: {from} -> {to}")]
    IllegalTransition {
        /// Stage the session was in
        from: Stage,
        /// Stage the step would have moved to
        to: Stage,
    },
}

/// Journal errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    /// Entry content or link does not match its hash
    #[error("hash chain broken at entry {seq}")]
    IntegrityViolation {
        /// First entry that failed
        seq: u64,
    },
}

/// Artifacts produced by earlier steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Output of the summary step
    Summary,
    /// Output of the optimization or what-if step
    Structures,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Summary => write!(f, "treaty summary"),
            Artifact::Structures => write!(f, "structure table"),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are unusable
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
