//! End-to-end session tests.

use aiden_core::prelude::*;
use aiden_core::{Artifact, BenchmarkStatus, ScenarioStore};
use aiden_test_utils::{
    attachment, candidate_with, optimized_copilot, setup_lenient_copilot, setup_seeded_copilot,
    setup_test_copilot,
};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn scenario_best_equals_max_by_roi() {
    let mut rng = StdRng::seed_from_u64(2025);
    let rows = sample_structures(&mut rng, attachment(50), 5);
    assert_eq!(rows.len(), 5);

    let best = select_best(&rows).unwrap();
    let expected = rows
        .iter()
        .reduce(|a, b| if b.projected_roi_pct > a.projected_roi_pct { b } else { a })
        .unwrap();
    assert_eq!(best, expected);
}

#[test]
fn store_round_trip_keeps_order() {
    let mut store = ScenarioStore::with_seed(1);
    let table = vec![
        candidate_with(1, 50, 50, 12.0, 7.5),
        candidate_with(3, 100, 50, 77.0, 24.1),
        candidate_with(2, 75, 50, 30.0, 7.5),
    ];
    store.set_structures(table.clone());
    assert_eq!(store.structures().unwrap(), table.as_slice());
}

#[test]
fn full_walkthrough() {
    let mut copilot = setup_test_copilot();

    let summary = copilot.summarize().unwrap();
    assert_eq!(summary, generate_summary());
    assert_eq!(copilot.stage(), Stage::SummaryGenerated);

    let structures = copilot.optimize().unwrap();
    assert_eq!(structures.len(), 5);
    assert!(structures.iter().all(|s| s.attachment_m == 50));

    let outcome = copilot.what_if(75).unwrap();
    assert_eq!(outcome.attachment, attachment(75));
    assert_eq!(&outcome.top, select_best(&outcome.structures).unwrap());
    assert_eq!(copilot.store().structures().unwrap(), outcome.structures.as_slice());

    let reply = copilot.chat("Lower Attachment").unwrap();
    assert!(reply.contains("lower attachment"));
    assert!(reply.starts_with("Considering Summary of Uploaded Treaty"));

    let rec = copilot.recommend().unwrap();
    assert_eq!(rec.structure, outcome.top);
    assert_eq!(rec.cvar_pct, 12.0);
    assert!(rec.rationale.contains("Lower Attachment"));
    assert_eq!(
        rec.benchmark,
        BenchmarkStatus::classify(rec.structure.projected_roi_pct, 15.0)
    );
    assert_eq!(copilot.stage(), Stage::Recommended);
    assert!(copilot.verify_journal().is_ok());
}

#[test]
fn same_seed_same_session() {
    let run = |seed| {
        let mut copilot = setup_seeded_copilot(seed);
        copilot.summarize().unwrap();
        let first = copilot.optimize().unwrap();
        let outcome = copilot.what_if(40).unwrap();
        (first, outcome)
    };
    assert_eq!(run(17), run(17));
}

#[test]
fn strict_recommend_before_structures_fails() {
    let mut copilot = setup_test_copilot();
    copilot.summarize().unwrap();
    let err = copilot.recommend().unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.user_message(), "Please complete the previous step first.");
}

#[test]
fn strict_what_if_needs_structures() {
    let mut copilot = setup_test_copilot();
    assert!(matches!(copilot.what_if(60), Err(ScenarioError::Stage(_))));
    assert_eq!(copilot.state().attachment_point, attachment(50));
}

#[test]
fn re_optimize_after_recommendation() {
    let mut copilot = optimized_copilot(9);
    copilot.recommend().unwrap();
    copilot.optimize().unwrap();
    assert_eq!(copilot.stage(), Stage::StructuresGenerated);
    copilot.recommend().unwrap();
}

#[test]
fn lenient_soft_gating_matches_demo() {
    let mut copilot = setup_lenient_copilot(5);
    let err = copilot.optimize().unwrap_err();
    assert_eq!(err, ScenarioError::MissingArtifact(Artifact::Summary));
    assert!(err.user_message().contains("Step 1"));

    copilot.summarize().unwrap();
    copilot.optimize().unwrap();
    assert!(copilot.recommend().is_ok());
}

#[test]
fn chat_history_is_conversation_order() {
    let mut copilot = optimized_copilot(3);
    copilot.chat("first question").unwrap();
    copilot.chat("second question").unwrap();

    let roles: Vec<Role> = copilot.state().chat_history.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(copilot.state().chat_history[2].content, "second question");
}

#[test]
fn recommendation_rationale_without_chat() {
    let mut copilot = optimized_copilot(12);
    let rec = copilot.recommend().unwrap();
    assert!(rec
        .rationale
        .starts_with("Aiden reviewed your previous what-if explorations"));
}
