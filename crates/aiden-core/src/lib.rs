//! Aiden Core - treaty co-pilot scenario pipeline
//!
//! The session-scoped pipeline behind the Aiden demo:
//! 1. **Summary**: fixed summary of the sample treaty wording
//! 2. **Optimization**: sampled candidate structures at an attachment point
//! 3. **What-if**: attachment changes with loss/ROI deltas and a resampled table
//! 4. **Chat**: templated replies grounded in the stored summary
//! 5. **Recommendation**: best structure by projected ROI with a rationale
//!
//! # Quick Start
//!
//! ```rust
//! use aiden_core::prelude::*;
//!
//! let mut copilot = CoPilot::new(CoPilotConfig::new().with_seed(7))?;
//! copilot.summarize()?;
//! copilot.optimize()?;
//! copilot.what_if(75)?;
//! copilot.chat("Lower attachment?")?;
//! let recommendation = copilot.recommend()?;
//! assert!(recommendation.structure.label.ends_with("XS 75M"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chat;
pub mod config;
pub mod copilot;
pub mod error;
pub mod journal;
pub mod report;
pub mod sampler;
pub mod selector;
pub mod stage;
pub mod store;
pub mod summary;
pub mod types;
pub mod what_if;

pub use config::{CoPilotConfig, Gating};
pub use copilot::{CoPilot, WhatIfOutcome};
pub use error::{Artifact, ConfigError, JournalError, ScenarioError, StageError};
pub use stage::Stage;
pub use store::{ScenarioState, ScenarioStore};
pub use types::*;

/// Common imports for driving a co-pilot session
pub mod prelude {
    pub use crate::chat::respond;
    pub use crate::config::{CoPilotConfig, Gating};
    pub use crate::copilot::{CoPilot, WhatIfOutcome};
    pub use crate::error::{ConfigError, ScenarioError};
    pub use crate::sampler::sample_structures;
    pub use crate::selector::select_best;
    pub use crate::stage::Stage;
    pub use crate::summary::generate_summary;
    pub use crate::types::{
        AttachmentPoint, ChatMessage, Recommendation, Role, StructureCandidate, WhatIfResult,
    };
    pub use crate::what_if::evaluate_what_if;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
