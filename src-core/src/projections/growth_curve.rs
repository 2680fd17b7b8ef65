//! Smooth growth curve between milestone anchors.

use crate::projections::milestones::MilestoneTable;

/// Cubic ease with zero slope at both ends: `p²(3 − 2p)`
pub fn smoothstep(progress: f64) -> f64 {
    progress * progress * (3.0 - 2.0 * progress)
}

/// Target fraction of baseline revenue for `month`.
///
/// Exactly equal to a milestone's fraction on that milestone's month, and
/// non-decreasing across months for any valid table.
pub fn target_fraction(table: &MilestoneTable, month: u32) -> f64 {
    let bounds = table.bounding_milestones(month);
    let (lower, upper) = (bounds.lower, bounds.upper);

    // Zero span happens on the last milestone, where both bounds coincide
    let span = upper.month.saturating_sub(lower.month);
    let progress = if span == 0 {
        0.0
    } else {
        (f64::from(month.saturating_sub(lower.month)) / f64::from(span)).clamp(0.0, 1.0)
    };

    lower.target_fraction + (upper.target_fraction - lower.target_fraction) * smoothstep(progress)
}
