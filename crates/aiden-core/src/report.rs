//! Plain-text rendering of pipeline artifacts
//!
//! Used by the `aiden` binary. JSON output goes through serde directly.

use crate::copilot::WhatIfOutcome;
use crate::journal::JournalEntry;
use crate::selector::rank;
use crate::types::{ContextPanel, Recommendation, RiskHeatmap, StructureCandidate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Everything a full walkthrough produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkthroughReport {
    /// Seed the session ran with, if fixed
    pub seed: Option<u64>,
    /// Step 1 output
    pub summary: String,
    /// Step 2 table
    pub initial_structures: Vec<StructureCandidate>,
    /// Step 3 output
    pub what_if: WhatIfOutcome,
    /// Question and reply pairs from step 4
    pub conversation: Vec<(String, String)>,
    /// Step 5 card
    pub recommendation: Recommendation,
    /// Panel as shown before the recommendation
    pub context: ContextPanel,
    /// Heatmap drawn after the recommendation
    pub heatmap: RiskHeatmap,
    /// Journal at the end of the session
    pub journal: Vec<JournalEntry>,
}

impl WalkthroughReport {
    /// Generate a text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Aiden Treaty Co-Pilot Walkthrough ===\n\n");
        if let Some(seed) = self.seed {
            let _ = writeln!(report, "Seed: {seed}\n");
        }

        report.push_str("--- Step 1: Treaty Summary ---\n");
        report.push_str(&self.summary);
        report.push('\n');

        report.push_str("--- Step 2: Proposed Structures ---\n");
        report.push_str(&render_structures(&self.initial_structures));
        report.push('\n');

        report.push_str("--- Step 3: What-If Analysis ---\n");
        report.push_str(&render_what_if(&self.what_if));
        report.push('\n');

        report.push_str("--- Step 4: Chat ---\n");
        if self.conversation.is_empty() {
            report.push_str("(no questions asked)\n");
        }
        for (question, reply) in &self.conversation {
            let _ = writeln!(report, "You:   {question}");
            let _ = writeln!(report, "Aiden: {reply}");
        }
        report.push('\n');
        report.push_str(&render_context_panel(&self.context));
        report.push('\n');

        report.push_str("--- Step 5: Final Recommendation ---\n");
        report.push_str(&render_recommendation(&self.recommendation));
        report.push('\n');
        report.push_str(&render_heatmap(&self.heatmap));
        report.push('\n');

        report.push_str("--- Session Journal ---\n");
        for entry in &self.journal {
            let _ = writeln!(
                report,
                "#{:<2} {:<10} {} [{}]",
                entry.seq,
                entry.action.as_str(),
                entry.detail,
                &entry.hash_hex()[..12]
            );
        }

        report
    }
}

/// Structure table, highest ROI first
#[must_use]
pub fn render_structures(structures: &[StructureCandidate]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<20} {:>18} {:>18}",
        "#", "Structure", "Expected Loss (M)", "Projected ROI (%)"
    );
    for (i, s) in rank(structures).into_iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:<4} {:<20} {:>18.2} {:>18.2}",
            format!("{}{}", i + 1, marker),
            s.label,
            s.expected_loss_m,
            s.projected_roi_pct
        );
    }
    out
}

/// Deltas, resampled table and top candidate of a what-if run
#[must_use]
pub fn render_what_if(outcome: &WhatIfOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scenario results for attachment = {}", outcome.attachment);
    let _ = writeln!(
        out,
        "  Expected loss changes by {}%",
        outcome.result.loss_change_pct
    );
    let _ = writeln!(
        out,
        "  Projected ROI changes by {}%",
        outcome.result.roi_change_pct
    );
    out.push_str(&render_structures(&outcome.structures));
    let _ = writeln!(
        out,
        "Top candidate at {}: {} (loss {}M, ROI {}%)",
        outcome.attachment,
        outcome.top.label,
        outcome.top.expected_loss_m,
        outcome.top.projected_roi_pct
    );
    out
}

/// Recommendation card
#[must_use]
pub fn render_recommendation(rec: &Recommendation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Optimal Structure: {}", rec.structure.label);
    let _ = writeln!(out, "Expected Loss:     {:.1} M", rec.structure.expected_loss_m);
    let _ = writeln!(out, "Projected ROI:     {:.1}%", rec.structure.projected_roi_pct);
    let _ = writeln!(out, "CVaR (Tail Risk):  {:.1}%", rec.cvar_pct);
    let _ = writeln!(
        out,
        "Benchmark:         {} ({:.1}%)",
        rec.benchmark, rec.benchmark_pct
    );
    let _ = writeln!(out, "Rationale: {}", rec.rationale);
    out
}

/// Context panel lines
#[must_use]
pub fn render_context_panel(panel: &ContextPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Attachment:      {}", panel.attachment);
    let _ = writeln!(out, "Top Candidate Structure: {}", panel.top_structure);
    let _ = writeln!(
        out,
        "Top Projected ROI:       {:.1}% (target {}%)",
        panel.top_roi_pct, panel.benchmark_pct
    );
    let _ = writeln!(out, "Status:                  {}", panel.status);
    out
}

/// Heatmap grid, one quintile per row
#[must_use]
pub fn render_heatmap(heatmap: &RiskHeatmap) -> String {
    let mut out = String::from("Risk Heatmap: loss severity (rows) vs ROI quintile (cols)\n");
    for (i, row) in heatmap.cells.iter().enumerate() {
        let _ = write!(out, "Q{} ", i + 1);
        for cell in row {
            let _ = write!(out, " {cell:.2}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoPilotConfig;
    use crate::copilot::CoPilot;
    use crate::types::{AttachmentPoint, BenchmarkStatus};

    fn table() -> Vec<StructureCandidate> {
        let attachment = AttachmentPoint::DEFAULT;
        vec![
            StructureCandidate::new(1, 50, attachment, 12.5, 9.0),
            StructureCandidate::new(3, 100, attachment, 44.0, 22.75),
        ]
    }

    #[test]
    fn structure_table_marks_top_first() {
        let text = render_structures(&table());
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("1*"));
        assert!(rows[1].contains("3 x 100M XS 50M"));
        assert!(rows[1].contains("22.75"));
    }

    #[test]
    fn recommendation_card_fields() {
        let rec = Recommendation {
            structure: table().remove(1),
            cvar_pct: 12.0,
            rationale: "because".to_string(),
            benchmark_pct: 15.0,
            benchmark: BenchmarkStatus::AboveBenchmark,
        };
        let text = render_recommendation(&rec);
        assert!(text.contains("Optimal Structure: 3 x 100M XS 50M"));
        assert!(text.contains("CVaR (Tail Risk):  12.0%"));
        assert!(text.contains("Above Benchmark"));
    }

    fn seeded_report(seed: u64) -> WalkthroughReport {
        let mut copilot = CoPilot::new(CoPilotConfig::new().with_seed(seed)).unwrap();
        let summary = copilot.summarize().unwrap();
        let initial_structures = copilot.optimize().unwrap();
        let what_if = copilot.what_if(60).unwrap();
        let reply = copilot.chat("Split the top layer?").unwrap();
        let context = copilot.context_panel();
        let recommendation = copilot.recommend().unwrap();
        WalkthroughReport {
            seed: Some(seed),
            summary,
            initial_structures,
            what_if,
            conversation: vec![("Split the top layer?".to_string(), reply)],
            recommendation,
            context,
            heatmap: copilot.risk_heatmap(),
            journal: copilot.journal().entries().to_vec(),
        }
    }

    #[test]
    fn walkthrough_text_has_every_section_in_order() {
        let report = seeded_report(11);
        let text = report.generate_text();

        let headings = [
            "Seed: 11",
            "--- Step 1: Treaty Summary ---",
            "--- Step 2: Proposed Structures ---",
            "--- Step 3: What-If Analysis ---",
            "--- Step 4: Chat ---",
            "--- Step 5: Final Recommendation ---",
            "--- Session Journal ---",
        ];
        let positions: Vec<usize> = headings.iter().map(|h| text.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(text.contains("Scenario results for attachment = 60M"));
        assert!(text.contains("You:   Split the top layer?"));
        assert!(text.contains(&format!("Top Candidate at 60M: {}", report.what_if.top.label)));
        assert!(text.contains(&format!("#0  summarize  sample treaty [{}]", &report.journal[0].hash_hex()[..12])));
        assert_eq!(seeded_report(11).generate_text(), text);
    }

    #[test]
    fn walkthrough_without_questions() {
        let mut report = seeded_report(3);
        report.conversation.clear();
        report.seed = None;
        let text = report.generate_text();
        assert!(text.contains("(no questions asked)"));
        assert!(!text.contains("Seed:"));
    }

    #[test]
    fn heatmap_has_five_rows() {
        let heatmap = RiskHeatmap {
            cells: [[0.5; 5]; 5],
        };
        assert_eq!(render_heatmap(&heatmap).lines().count(), 6);
    }
}
