use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::projections::milestones::MilestoneTable;

/// Agency commission rate is the affiliate commission rate times this factor.
pub const DEFAULT_AGENCY_RATE_MULTIPLIER: f64 = 1.5;
/// Agency commission rate never exceeds this rate.
pub const DEFAULT_AGENCY_RATE_CAP: f64 = 0.05;
/// Agency cost never falls below this monthly retainer.
pub const DEFAULT_AGENCY_MIN_FEE: f64 = 3500.0;
/// Paid channels charge this management fee on top of media spend.
pub const DEFAULT_PAID_PLATFORM_FEE_RATE: f64 = 0.15;

/// Business constants applied to every projection month.
///
/// `Default` carries the standard agency and paid-media terms. A JSON file
/// may override any subset of fields; the result is validated before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionAssumptions {
    pub milestones: MilestoneTable,
    pub agency_rate_multiplier: f64,
    pub agency_rate_cap: f64,
    pub agency_min_fee: f64,
    pub paid_platform_fee_rate: f64,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            milestones: MilestoneTable::default(),
            agency_rate_multiplier: DEFAULT_AGENCY_RATE_MULTIPLIER,
            agency_rate_cap: DEFAULT_AGENCY_RATE_CAP,
            agency_min_fee: DEFAULT_AGENCY_MIN_FEE,
            paid_platform_fee_rate: DEFAULT_PAID_PLATFORM_FEE_RATE,
        }
    }
}

impl ProjectionAssumptions {
    /// Parse and validate assumptions from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let assumptions: Self = serde_json::from_str(json).map_err(|e| {
            ValidationError::InvalidInput(format!("Unreadable projection assumptions: {}", e))
        })?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// The agency floor fee must be positive: it keeps partnership spend,
    /// the divisor of the return-on-spend ratio, above zero.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("agencyRateMultiplier", self.agency_rate_multiplier)?;
        check_fraction("agencyRateCap", self.agency_rate_cap)?;
        check_fraction("paidPlatformFeeRate", self.paid_platform_fee_rate)?;

        if !self.agency_min_fee.is_finite() || self.agency_min_fee <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "agencyMinFee",
                reason: format!("must be greater than 0, got {}", self.agency_min_fee),
            }
            .into());
        }

        Ok(())
    }

    /// Agency commission rate for a given affiliate commission rate
    pub fn agency_rate(&self, commission_rate: f64) -> f64 {
        (commission_rate * self.agency_rate_multiplier).min(self.agency_rate_cap)
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must be a non-negative number, got {}", value),
        }
        .into());
    }
    Ok(())
}

fn check_fraction(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must be between 0 and 1, got {}", value),
        }
        .into());
    }
    Ok(())
}
