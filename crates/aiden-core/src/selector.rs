//! Recommendation selection
//!
//! Ranks candidate structures by projected ROI and turns the winner into a
//! recommendation card. Ties always resolve to the earliest candidate.

use crate::error::ScenarioError;
use crate::types::{BenchmarkStatus, ChatMessage, Recommendation, Role, StructureCandidate};
use std::cmp::Ordering;

/// User questions cited in the rationale
const RATIONALE_QUESTIONS: usize = 2;

/// ROI ordering shared by [`select_best`] and [`rank`].
///
/// `-0.0` and `0.0` compare equal; NaN sorts below every number.
fn compare_roi(a: &StructureCandidate, b: &StructureCandidate) -> Ordering {
    roi_key(a).total_cmp(&roi_key(b))
}

fn roi_key(candidate: &StructureCandidate) -> f64 {
    let roi = candidate.projected_roi_pct;
    if roi.is_nan() {
        f64::NEG_INFINITY
    } else {
        // adding +0.0 turns -0.0 into 0.0
        roi + 0.0
    }
}

/// Candidate with the highest projected ROI.
///
/// Among equal maxima the first in insertion order wins.
pub fn select_best(structures: &[StructureCandidate]) -> Result<&StructureCandidate, ScenarioError> {
    let mut best: Option<&StructureCandidate> = None;
    for candidate in structures {
        if best.map_or(true, |b| compare_roi(candidate, b).is_gt()) {
            best = Some(candidate);
        }
    }
    best.ok_or(ScenarioError::EmptyInput)
}

/// Candidates by projected ROI, highest first; ties keep insertion order.
///
/// The head is always the candidate [`select_best`] returns.
#[must_use]
pub fn rank(structures: &[StructureCandidate]) -> Vec<&StructureCandidate> {
    let mut ranked: Vec<&StructureCandidate> = structures.iter().collect();
    ranked.sort_by(|a, b| compare_roi(b, a));
    ranked
}

/// Explain the recommendation from the most recent user questions
#[must_use]
pub fn rationale(history: &[ChatMessage]) -> String {
    let questions: Vec<&str> = history
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .collect();
    let recent = &questions[questions.len().saturating_sub(RATIONALE_QUESTIONS)..];

    let opening = if recent.is_empty() {
        "Aiden reviewed your previous what-if explorations ".to_string()
    } else {
        format!("Aiden considered your {} queries ", recent.join(" and "))
    };
    format!(
        "{opening}and optimized for a balance of expected loss, ROI, and tail risk. \
         This recommendation aligns with the scenarios analyzed in the what-if step \
         and your guidance in chat."
    )
}

/// Build the final recommendation card
pub fn recommend(
    structures: &[StructureCandidate],
    history: &[ChatMessage],
    benchmark_pct: f64,
    default_cvar_pct: f64,
) -> Result<Recommendation, ScenarioError> {
    let best = select_best(structures)?;
    Ok(Recommendation {
        structure: best.clone(),
        cvar_pct: best.cvar_or(default_cvar_pct),
        rationale: rationale(history),
        benchmark_pct,
        benchmark: BenchmarkStatus::classify(best.projected_roi_pct, benchmark_pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttachmentPoint, DEFAULT_CVAR_PCT};

    fn candidate(layers: u8, roi: f64) -> StructureCandidate {
        StructureCandidate::new(layers, 50, AttachmentPoint::DEFAULT, 20.0, roi)
    }

    #[test]
    fn picks_highest_roi() {
        let structures = vec![candidate(1, 9.5), candidate(2, 21.3), candidate(3, 14.0)];
        assert_eq!(select_best(&structures).unwrap().layers, 2);
    }

    #[test]
    fn ties_resolve_to_first() {
        let structures = vec![candidate(1, 7.0), candidate(2, 18.0), candidate(3, 18.0)];
        assert_eq!(select_best(&structures).unwrap().layers, 2);
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(select_best(&[]), Err(ScenarioError::EmptyInput));
    }

    #[test]
    fn rank_is_stable_descending() {
        let structures = vec![candidate(1, 10.0), candidate(2, 20.0), candidate(3, 10.0)];
        let layers: Vec<u8> = rank(&structures).iter().map(|c| c.layers).collect();
        assert_eq!(layers, vec![2, 1, 3]);
    }

    #[test]
    fn signed_zero_ties_agree_with_rank() {
        let structures = vec![candidate(1, -0.0), candidate(2, 0.0)];
        assert_eq!(select_best(&structures).unwrap().layers, 1);
        assert_eq!(rank(&structures)[0].layers, 1);
    }

    #[test]
    fn nan_roi_never_wins() {
        let structures = vec![candidate(1, f64::NAN), candidate(2, 3.0), candidate(3, f64::NAN)];
        assert_eq!(select_best(&structures).unwrap().layers, 2);
        let layers: Vec<u8> = rank(&structures).iter().map(|c| c.layers).collect();
        assert_eq!(layers, vec![2, 1, 3]);
    }

    #[test]
    fn rationale_cites_last_two_questions() {
        let history = vec![
            ChatMessage::user("split the layer"),
            ChatMessage::assistant("reply"),
            ChatMessage::user("lower attachment"),
            ChatMessage::assistant("reply"),
            ChatMessage::user("raise limit"),
        ];
        let text = rationale(&history);
        assert!(text.starts_with("Aiden considered your lower attachment and raise limit queries "));
        assert!(!text.contains("split the layer"));
    }

    #[test]
    fn rationale_without_questions() {
        assert!(rationale(&[]).starts_with("Aiden reviewed your previous what-if explorations "));
    }

    #[test]
    fn recommendation_uses_default_cvar_and_benchmark() {
        let structures = vec![candidate(1, 12.0), candidate(2, 16.5)];
        let rec = recommend(&structures, &[], 15.0, DEFAULT_CVAR_PCT).unwrap();
        assert_eq!(rec.structure.layers, 2);
        assert_eq!(rec.cvar_pct, 12.0);
        assert_eq!(rec.benchmark, BenchmarkStatus::AboveBenchmark);

        let structures = vec![candidate(1, 12.0).with_cvar(8.0)];
        let rec = recommend(&structures, &[], 15.0, DEFAULT_CVAR_PCT).unwrap();
        assert_eq!(rec.cvar_pct, 8.0);
        assert_eq!(rec.benchmark, BenchmarkStatus::BelowBenchmark);
    }
}
