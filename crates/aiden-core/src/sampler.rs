//! Candidate structure sampling
//!
//! Stand-in for the optimizer: draws placeholder structures from a caller
//! supplied random source. Seeded sources give reproducible tables.

use crate::types::{AttachmentPoint, RiskHeatmap, StructureCandidate, HEATMAP_QUINTILES};
use rand::Rng;

/// Candidates drawn per run unless configured otherwise
pub const DEFAULT_STRUCTURE_COUNT: usize = 5;

/// Layer counts a structure may have
pub const LAYER_CHOICES: [u8; 3] = [1, 2, 3];

/// Per-layer limits in millions
pub const LIMIT_CHOICES_M: [u32; 3] = [50, 75, 100];

/// Expected loss bounds in millions
pub const EXPECTED_LOSS_RANGE_M: (f64, f64) = (10.0, 80.0);

/// Projected ROI bounds in percent
pub const ROI_RANGE_PCT: (f64, f64) = (5.0, 25.0);

/// Draw `count` candidate structures at `attachment`.
///
/// The result is in draw order; ranking is the selector's job.
pub fn sample_structures<R: Rng + ?Sized>(
    rng: &mut R,
    attachment: AttachmentPoint,
    count: usize,
) -> Vec<StructureCandidate> {
    let mut structures = Vec::with_capacity(count);
    for _ in 0..count {
        let layers = LAYER_CHOICES[rng.gen_range(0..LAYER_CHOICES.len())];
        let limit_m = LIMIT_CHOICES_M[rng.gen_range(0..LIMIT_CHOICES_M.len())];
        let expected_loss_m = round2(rng.gen_range(EXPECTED_LOSS_RANGE_M.0..=EXPECTED_LOSS_RANGE_M.1));
        let projected_roi_pct = round2(rng.gen_range(ROI_RANGE_PCT.0..=ROI_RANGE_PCT.1));
        structures.push(StructureCandidate::new(
            layers,
            limit_m,
            attachment,
            expected_loss_m,
            projected_roi_pct,
        ));
    }
    structures
}

/// Draw a loss-severity by ROI heatmap with cells in [0, 1)
pub fn sample_heatmap<R: Rng + ?Sized>(rng: &mut R) -> RiskHeatmap {
    let mut cells = [[0.0; HEATMAP_QUINTILES]; HEATMAP_QUINTILES];
    for row in &mut cells {
        for cell in row.iter_mut() {
            *cell = rng.gen::<f64>();
        }
    }
    RiskHeatmap { cells }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
