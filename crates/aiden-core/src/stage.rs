//! Session stage machine
//!
//! `Start -> SummaryGenerated -> StructuresGenerated -> (WhatIfEvaluated)* -> Recommended`
//!
//! A step may be repeated once it has been reached. Chat is not a stage and
//! never moves the session.

use crate::error::StageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Furthest step the session has completed
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing done yet
    #[default]
    Start,
    /// Treaty summary stored
    SummaryGenerated,
    /// Structure table stored by optimization
    StructuresGenerated,
    /// At least one what-if run
    WhatIfEvaluated,
    /// Recommendation produced
    Recommended,
}

impl Stage {
    /// Every stage, in pipeline order
    pub const ALL: [Stage; 5] = [
        Stage::Start,
        Stage::SummaryGenerated,
        Stage::StructuresGenerated,
        Stage::WhatIfEvaluated,
        Stage::Recommended,
    ];

    /// Stable snake_case name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::SummaryGenerated => "summary_generated",
            Stage::StructuresGenerated => "structures_generated",
            Stage::WhatIfEvaluated => "what_if_evaluated",
            Stage::Recommended => "recommended",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a stage transition.
pub fn validate_transition(from: Stage, to: Stage) -> Result<(), StageError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(StageError::IllegalTransition { from, to })
    }
}

/// Stages reachable from `from` in one step
pub fn allowed_transitions(from: Stage) -> Vec<Stage> {
    use Stage::*;
    match from {
        Start => vec![SummaryGenerated],
        SummaryGenerated => vec![SummaryGenerated, StructuresGenerated],
        StructuresGenerated => vec![StructuresGenerated, WhatIfEvaluated, Recommended],
        WhatIfEvaluated => vec![StructuresGenerated, WhatIfEvaluated, Recommended],
        Recommended => vec![StructuresGenerated, WhatIfEvaluated, Recommended],
    }
}

fn allowed(from: Stage, to: Stage) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_only_reaches_summary() {
        assert!(validate_transition(Stage::Start, Stage::SummaryGenerated).is_ok());
        assert_eq!(
            validate_transition(Stage::Start, Stage::Recommended),
            Err(StageError::IllegalTransition {
                from: Stage::Start,
                to: Stage::Recommended,
            })
        );
    }

    #[test]
    fn nothing_returns_to_start() {
        for from in Stage::ALL {
            assert!(!allowed_transitions(from).contains(&Stage::Start));
        }
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(Stage::WhatIfEvaluated.to_string(), "what_if_evaluated");
    }
}
