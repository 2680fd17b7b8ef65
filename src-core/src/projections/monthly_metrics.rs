//! Per-month financial derivation.
//!
//! All intermediate figures stay unrounded; rounding only happens when the
//! [`MonthRecord`] is assembled.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{CalculationError, Result};
use crate::projections::assumptions::ProjectionAssumptions;
use crate::projections::projections_model::{MonthRecord, ProjectionInputs};

/// A computed month and the cumulative customer count after it
#[derive(Debug, Clone, PartialEq)]
pub struct MonthOutcome {
    pub record: MonthRecord,
    pub cumulative_customers: u64,
}

pub fn compute_month(
    month: u32,
    target_fraction: f64,
    inputs: &ProjectionInputs,
    assumptions: &ProjectionAssumptions,
    cumulative_customers_before: u64,
) -> Result<MonthOutcome> {
    let aov = inputs.average_order_value();

    let new_revenue = inputs.baseline_revenue() * target_fraction;

    let new_customers = whole_customers(month, new_revenue / aov)?;
    let cumulative_customers = cumulative_customers_before
        .checked_add(new_customers)
        .ok_or(CalculationError::Overflow {
            month,
            field: "totalCustomers",
        })?;

    // Residual value of every customer acquired so far, spread over the year
    let ltv_revenue =
        cumulative_customers as f64 * ((inputs.lifetime_value() - aov) / 12.0);
    let total_revenue = new_revenue + ltv_revenue;

    let affiliate_cost = new_revenue * inputs.commission_rate();
    let agency_cost = assumptions
        .agency_min_fee
        .max(new_revenue * assumptions.agency_rate(inputs.commission_rate()));
    let total_partnership_spend = affiliate_cost + agency_cost;

    let cogs = total_revenue * inputs.cogs_rate();

    let implied_customers = total_revenue / aov;
    let paid_media_spend = implied_customers * inputs.acquisition_cost();
    let paid_platform_fee = paid_media_spend * assumptions.paid_platform_fee_rate;
    let equivalent_paid_spend = paid_media_spend + paid_platform_fee;

    let profit = total_revenue - total_partnership_spend - cogs;
    let rops = total_revenue / total_partnership_spend;
    let paid_spend_savings = equivalent_paid_spend - total_partnership_spend;

    let percent_of_baseline_revenue = if inputs.baseline_revenue() > 0.0 {
        total_revenue / inputs.baseline_revenue() * 100.0
    } else {
        0.0
    };

    let record = MonthRecord {
        month,
        target_fraction,
        target_percent: whole(month, "targetPercent", target_fraction * 100.0)?,
        new_revenue: whole(month, "newRevenue", new_revenue)?,
        ltv_revenue: whole(month, "ltvRevenue", ltv_revenue)?,
        total_revenue: whole(month, "totalRevenue", total_revenue)?,
        affiliate_cost: whole(month, "affiliateCost", affiliate_cost)?,
        agency_cost: whole(month, "agencyCost", agency_cost)?,
        total_partnership_spend: whole(month, "totalPartnershipSpend", total_partnership_spend)?,
        cogs: whole(month, "cogs", cogs)?,
        profit: whole(month, "profit", profit)?,
        rops: round_dp(month, "rops", rops, 2)?,
        paid_media_spend: whole(month, "paidMediaSpend", paid_media_spend)?,
        paid_platform_fee: whole(month, "paidPlatformFee", paid_platform_fee)?,
        equivalent_paid_spend: whole(month, "equivalentPaidSpend", equivalent_paid_spend)?,
        paid_spend_savings: whole(month, "paidSpendSavings", paid_spend_savings)?,
        percent_of_baseline_revenue: round_dp(
            month,
            "percentOfBaselineRevenue",
            percent_of_baseline_revenue,
            1,
        )?,
        new_customers,
        total_customers: cumulative_customers,
    };

    Ok(MonthOutcome {
        record,
        cumulative_customers,
    })
}

fn finite(month: u32, field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::NonFinite { month, field }.into())
    }
}

/// Rounds to a whole unit; `f64::round` already rounds half away from zero
fn whole(month: u32, field: &'static str, value: f64) -> Result<f64> {
    finite(month, field, value).map(f64::round)
}

fn whole_customers(month: u32, value: f64) -> Result<u64> {
    let rounded = finite(month, "newCustomers", value)?.round();
    rounded
        .to_u64()
        .ok_or_else(|| CalculationError::NonFinite {
            month,
            field: "newCustomers",
        }
        .into())
}

/// Rounds on the exact decimal expansion of `value`, so 2.675 (stored as
/// 2.67499...) rounds down the same way a decimal calculator would.
fn round_dp(month: u32, field: &'static str, value: f64, dp: u32) -> Result<f64> {
    let value = finite(month, field, value)?;
    match Decimal::from_f64_retain(value) {
        Some(decimal) => Ok(decimal
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value)),
        // Beyond Decimal's range fractional digits are meaningless anyway
        None => Ok(value.round()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ProjectionInputs {
        ProjectionInputs::new(100000.0, 50.0, 0.10, 85.0, 125.0, 0.40).unwrap()
    }

    #[test]
    fn full_target_month_figures() {
        let outcome =
            compute_month(12, 1.0, &inputs(), &ProjectionAssumptions::default(), 5765).unwrap();
        let record = &outcome.record;

        assert_eq!(record.new_revenue, 100000.0);
        assert_eq!(record.new_customers, 1176);
        assert_eq!(outcome.cumulative_customers, 6941);
        assert_eq!(record.total_customers, 6941);
        assert_eq!(record.ltv_revenue, 23137.0);
        assert_eq!(record.total_revenue, 123137.0);
        assert_eq!(record.affiliate_cost, 10000.0);
        assert_eq!(record.agency_cost, 5000.0);
        assert_eq!(record.total_partnership_spend, 15000.0);
        assert_eq!(record.cogs, 49255.0);
        assert_eq!(record.profit, 58882.0);
        assert_eq!(record.rops, 8.21);
        assert_eq!(record.paid_media_spend, 72433.0);
        assert_eq!(record.paid_platform_fee, 10865.0);
        assert_eq!(record.equivalent_paid_spend, 83298.0);
        assert_eq!(record.paid_spend_savings, 68298.0);
        assert_eq!(record.percent_of_baseline_revenue, 123.1);
        assert_eq!(record.target_percent, 100.0);
    }

    #[test]
    fn agency_floor_applies_to_small_months() {
        let outcome =
            compute_month(1, 0.05, &inputs(), &ProjectionAssumptions::default(), 0).unwrap();
        assert_eq!(outcome.record.new_revenue, 5000.0);
        assert_eq!(outcome.record.agency_cost, 3500.0);
        assert_eq!(outcome.record.affiliate_cost, 500.0);
    }

    #[test]
    fn zero_revenue_still_has_positive_spend() {
        let inputs = ProjectionInputs::new(0.0, 50.0, 0.10, 85.0, 125.0, 0.40).unwrap();
        let outcome =
            compute_month(1, 0.2, &inputs, &ProjectionAssumptions::default(), 0).unwrap();
        assert_eq!(outcome.record.total_partnership_spend, 3500.0);
        assert_eq!(outcome.record.rops, 0.0);
        assert_eq!(outcome.record.percent_of_baseline_revenue, 0.0);
        assert_eq!(outcome.record.profit, -3500.0);
    }

    #[test]
    fn lifetime_below_order_value_reduces_residual() {
        let inputs = ProjectionInputs::new(100000.0, 50.0, 0.10, 85.0, 61.0, 0.40).unwrap();
        let outcome =
            compute_month(3, 0.2, &inputs, &ProjectionAssumptions::default(), 0).unwrap();
        // 235 customers * (61 - 85) / 12 = -470
        assert_eq!(outcome.record.ltv_revenue, -470.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_dp(1, "x", 0.125, 2).unwrap(), 0.13);
        assert_eq!(round_dp(1, "x", -0.125, 2).unwrap(), -0.13);
        assert_eq!(round_dp(1, "x", 12.25, 1).unwrap(), 12.3);
        assert_eq!(whole(1, "x", 2.5).unwrap(), 3.0);
        assert_eq!(whole(1, "x", -2.5).unwrap(), -3.0);
    }

    #[test]
    fn customer_count_overflow_is_an_error() {
        let inputs = ProjectionInputs::new(1e19, 50.0, 0.10, 1.0, 125.0, 0.40).unwrap();
        let result =
            compute_month(12, 1.0, &inputs, &ProjectionAssumptions::default(), u64::MAX - 5);
        assert_eq!(
            result,
            Err(crate::errors::Error::Calculation(CalculationError::Overflow {
                month: 12,
                field: "totalCustomers",
            }))
        );
    }

    #[test]
    fn overflowing_inputs_surface_as_calculation_errors() {
        let inputs = ProjectionInputs::new(f64::MAX, f64::MAX, 1.0, 1e-300, f64::MAX, 1.0).unwrap();
        let result = compute_month(12, 1.0, &inputs, &ProjectionAssumptions::default(), 0);
        assert!(matches!(
            result,
            Err(crate::errors::Error::Calculation(CalculationError::NonFinite { month: 12, .. }))
        ));
    }
}
