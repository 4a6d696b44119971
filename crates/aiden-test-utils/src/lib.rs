//! Testing utilities for the Aiden workspace
//!
//! Shared test helpers and fixtures.

#![allow(missing_docs)]

use aiden_core::{AttachmentPoint, CoPilot, CoPilotConfig, Gating, StructureCandidate};

pub const TEST_SEED: u64 = 42;

pub fn attachment(value_m: u32) -> AttachmentPoint {
    AttachmentPoint::new(value_m).unwrap()
}

/// Candidate at the default attachment; `layers` doubles as an identity tag
pub fn candidate(layers: u8, roi_pct: f64) -> StructureCandidate {
    StructureCandidate::new(layers, 50, AttachmentPoint::DEFAULT, 25.0, roi_pct)
}

pub fn candidate_with(
    layers: u8,
    limit_m: u32,
    attachment_m: u32,
    expected_loss_m: f64,
    roi_pct: f64,
) -> StructureCandidate {
    StructureCandidate::new(layers, limit_m, attachment(attachment_m), expected_loss_m, roi_pct)
}

pub fn setup_test_copilot() -> CoPilot {
    setup_seeded_copilot(TEST_SEED)
}

pub fn setup_seeded_copilot(seed: u64) -> CoPilot {
    CoPilot::new(CoPilotConfig::new().with_seed(seed)).unwrap()
}

pub fn setup_lenient_copilot(seed: u64) -> CoPilot {
    CoPilot::new(
        CoPilotConfig::new()
            .with_seed(seed)
            .with_gating(Gating::Lenient),
    )
    .unwrap()
}

/// Session already past optimization
pub fn optimized_copilot(seed: u64) -> CoPilot {
    let mut copilot = setup_seeded_copilot(seed);
    copilot.summarize().unwrap();
    copilot.optimize().unwrap();
    copilot
}
