//! What-if evaluation
//!
//! Draws the loss and ROI deltas reported when the underwriter moves the
//! attachment point.

use crate::sampler::round2;
use crate::types::{AttachmentPoint, WhatIfResult};
use rand::Rng;

/// Expected loss change bounds in percent
pub const LOSS_CHANGE_RANGE_PCT: (f64, f64) = (-20.0, 20.0);

/// Projected ROI change bounds in percent
pub const ROI_CHANGE_RANGE_PCT: (f64, f64) = (-5.0, 5.0);

/// Relative loss/ROI impact of moving to `attachment`.
///
/// The attachment does not influence the draw yet; the deltas are
/// placeholders until a loss model exists.
pub fn evaluate_what_if<R: Rng + ?Sized>(rng: &mut R, _attachment: AttachmentPoint) -> WhatIfResult {
    WhatIfResult {
        loss_change_pct: round2(rng.gen_range(LOSS_CHANGE_RANGE_PCT.0..=LOSS_CHANGE_RANGE_PCT.1)),
        roi_change_pct: round2(rng.gen_range(ROI_CHANGE_RANGE_PCT.0..=ROI_CHANGE_RANGE_PCT.1)),
    }
}
