use aiden_core::stage::{allowed_transitions, validate_transition};
use aiden_core::Stage;
use aiden_core::StageError;
use proptest::prelude::*;

#[test]
fn test_start_transitions() {
    assert!(validate_transition(Stage::Start, Stage::SummaryGenerated).is_ok());

    // Invalid
    assert!(validate_transition(Stage::Start, Stage::StructuresGenerated).is_err());
    assert!(validate_transition(Stage::Start, Stage::WhatIfEvaluated).is_err());
    assert!(validate_transition(Stage::Start, Stage::Recommended).is_err());
}

#[test]
fn test_summary_transitions() {
    assert!(validate_transition(Stage::SummaryGenerated, Stage::StructuresGenerated).is_ok());
    assert!(validate_transition(Stage::SummaryGenerated, Stage::SummaryGenerated).is_ok());

    // Recommendation needs a structure table first
    assert_eq!(
        validate_transition(Stage::SummaryGenerated, Stage::Recommended),
        Err(StageError::IllegalTransition {
            from: Stage::SummaryGenerated,
            to: Stage::Recommended,
        })
    );
}

#[test]
fn test_what_if_loops() {
    assert!(validate_transition(Stage::WhatIfEvaluated, Stage::WhatIfEvaluated).is_ok());
    assert!(validate_transition(Stage::Recommended, Stage::WhatIfEvaluated).is_ok());
    assert!(validate_transition(Stage::WhatIfEvaluated, Stage::SummaryGenerated).is_err());
}

fn any_stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        Just(Stage::Start),
        Just(Stage::SummaryGenerated),
        Just(Stage::StructuresGenerated),
        Just(Stage::WhatIfEvaluated),
        Just(Stage::Recommended),
    ]
}

proptest! {
    #[test]
    fn prop_all_transitions_are_subset_of_allowed(from in any_stage(), to in any_stage()) {
        let res = validate_transition(from, to);
        let allowed = allowed_transitions(from);

        if res.is_ok() {
            prop_assert!(allowed.contains(&to));
        } else {
            prop_assert!(!allowed.contains(&to));
        }
    }

    #[test]
    fn prop_recommended_needs_structures(from in any_stage()) {
        if validate_transition(from, Stage::Recommended).is_ok() {
            prop_assert!(from >= Stage::StructuresGenerated);
        }
    }
}
