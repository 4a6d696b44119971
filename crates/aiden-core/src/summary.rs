//! Treaty summary generation
//!
//! The demo always reads the same sample wording, so the summary is fixed
//! text. A document-reading version would take the wording as input.

/// Sample treaty wording the demo summarizes
pub const SAMPLE_TREATY: &str = "\
Cedent: Example Insurance Co.
Program: 2025 U.S. Catastrophe Excess of Loss Treaty (Property Cat XoL)
Territory: Continental U.S., Hawaii, and Puerto Rico
Period: January 1, 2025 - December 31, 2025
Layers: 5 x 50M excess of 50M (300M aggregate limit)
Reinstatements: one at 100% additional premium, subsequent at 125%
Hours clause: 168 consecutive hours for hurricane, typhoon, and flood
Exclusions: war, terrorism, nuclear
Claims: notice within 14 days, interim updates every 30 days
Disputes: ARIAS-U.S. arbitration
";

const TREATY_SUMMARY: &str = "\
Summary of Uploaded Treaty (2025 Cat XoL Program)

This treaty provides property catastrophe excess-of-loss coverage for Example Insurance Co.
in the continental U.S., Hawaii, and Puerto Rico for January 1 - December 31, 2025.

- Program Structure: 5 x 50M layers excess 50M -> 300M limit, 50M attachment
- Reinstatements: 1 x 100% paid, subsequent at 125%
- Covered Perils: Hurricanes, typhoons, floods (168-hour clause)
- Exclusions: War, terrorism, nuclear
- Special Conditions: 14-day loss reporting, 30-day interim updates, ARIAS-U.S. arbitration

Historical Losses: 70M, 38M, 45M, 92M (Hurricanes & Hail)

Key Takeaways:
High exposure to hurricanes and hail with mid-layer protection.
Opportunities exist to adjust attachment points and layering for better ROI and risk balance.
";

/// Summary of [`SAMPLE_TREATY`]. Identical on every call.
#[must_use]
pub fn generate_summary() -> String {
    TREATY_SUMMARY.to_string()
}
