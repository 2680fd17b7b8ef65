use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::projections::PROJECTION_MONTHS;

/// A fixed growth checkpoint: by `month`, revenue from partnerships should
/// reach `target_fraction` of the current baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub month: u32,
    pub target_fraction: f64,
}

impl Milestone {
    pub const fn new(month: u32, target_fraction: f64) -> Self {
        Self {
            month,
            target_fraction,
        }
    }
}

/// Implicit anchor used when no milestone lies at or below the queried month
pub const LOWER_ANCHOR: Milestone = Milestone::new(0, 0.0);

/// Implicit anchor used when no milestone lies above the queried month
pub const UPPER_ANCHOR: Milestone = Milestone::new(PROJECTION_MONTHS, 1.0);

/// 20% (3mo) → 40% (6mo) → 70% (9mo) → 100% (12mo)
pub const DEFAULT_MILESTONES: [Milestone; 4] = [
    Milestone::new(3, 0.20),
    Milestone::new(6, 0.40),
    Milestone::new(9, 0.70),
    Milestone::new(12, 1.00),
];

/// The tightest milestones enclosing a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MilestoneBounds {
    pub lower: Milestone,
    pub upper: Milestone,
}

/// Ordered milestone anchors. Months are strictly increasing and fractions
/// non-decreasing; both are checked on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Milestone>", into = "Vec<Milestone>")]
pub struct MilestoneTable {
    milestones: Vec<Milestone>,
}

impl MilestoneTable {
    pub fn new(milestones: Vec<Milestone>) -> Result<Self> {
        for milestone in &milestones {
            if milestone.month == 0 || milestone.month > PROJECTION_MONTHS {
                return Err(ValidationError::InvalidMilestones(format!(
                    "month {} is outside 1..={}",
                    milestone.month, PROJECTION_MONTHS
                ))
                .into());
            }
            if !milestone.target_fraction.is_finite()
                || !(0.0..=1.0).contains(&milestone.target_fraction)
            {
                return Err(ValidationError::InvalidMilestones(format!(
                    "target fraction {} for month {} is outside [0, 1]",
                    milestone.target_fraction, milestone.month
                ))
                .into());
            }
        }

        for pair in milestones.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.month <= prev.month {
                return Err(ValidationError::InvalidMilestones(format!(
                    "months must be strictly increasing ({} follows {})",
                    next.month, prev.month
                ))
                .into());
            }
            if next.target_fraction < prev.target_fraction {
                return Err(ValidationError::InvalidMilestones(format!(
                    "target fraction drops from {} to {} at month {}",
                    prev.target_fraction, next.target_fraction, next.month
                ))
                .into());
            }
        }

        Ok(Self { milestones })
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Lower bound is the milestone with the largest month <= `month`,
    /// upper bound the one with the smallest month > `month`. Months are
    /// compared as integers.
    pub fn bounding_milestones(&self, month: u32) -> MilestoneBounds {
        let lower = self
            .milestones
            .iter()
            .filter(|m| m.month <= month)
            .max_by_key(|m| m.month)
            .copied()
            .unwrap_or(LOWER_ANCHOR);

        let upper = self
            .milestones
            .iter()
            .filter(|m| m.month > month)
            .min_by_key(|m| m.month)
            .copied()
            .unwrap_or(UPPER_ANCHOR);

        MilestoneBounds { lower, upper }
    }
}

impl Default for MilestoneTable {
    fn default() -> Self {
        Self {
            milestones: DEFAULT_MILESTONES.to_vec(),
        }
    }
}

impl TryFrom<Vec<Milestone>> for MilestoneTable {
    type Error = crate::errors::Error;

    fn try_from(milestones: Vec<Milestone>) -> Result<Self> {
        Self::new(milestones)
    }
}

impl From<MilestoneTable> for Vec<Milestone> {
    fn from(table: MilestoneTable) -> Self {
        table.milestones
    }
}
