use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Raw form values as typed by the user. Commission and COGS are percentages
/// ("10" means 10%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionForm {
    pub current_revenue: Option<String>,
    pub current_cac: Option<String>,
    pub affiliate_commission_percent: Option<String>,
    pub average_order_value: Option<String>,
    pub customer_lifetime_value: Option<String>,
    pub cogs_percent: Option<String>,
}

/// Validated projection inputs. Every value is finite and non-negative,
/// rates are fractions in [0, 1] and the average order value is positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInputs {
    baseline_revenue: f64,
    acquisition_cost: f64,
    commission_rate: f64,
    average_order_value: f64,
    lifetime_value: f64,
    cogs_rate: f64,
}

impl ProjectionInputs {
    pub fn new(
        baseline_revenue: f64,
        acquisition_cost: f64,
        commission_rate: f64,
        average_order_value: f64,
        lifetime_value: f64,
        cogs_rate: f64,
    ) -> Result<Self> {
        check_amount("currentRevenue", baseline_revenue)?;
        check_amount("currentCac", acquisition_cost)?;
        check_rate("affiliateCommission", commission_rate)?;
        check_amount("averageOrderValue", average_order_value)?;
        check_amount("customerLifetimeValue", lifetime_value)?;
        check_rate("cogs", cogs_rate)?;

        if average_order_value <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "averageOrderValue",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(Self {
            baseline_revenue,
            acquisition_cost,
            commission_rate,
            average_order_value,
            lifetime_value,
            cogs_rate,
        })
    }

    pub fn baseline_revenue(&self) -> f64 {
        self.baseline_revenue
    }

    pub fn acquisition_cost(&self) -> f64 {
        self.acquisition_cost
    }

    pub fn commission_rate(&self) -> f64 {
        self.commission_rate
    }

    pub fn average_order_value(&self) -> f64 {
        self.average_order_value
    }

    pub fn lifetime_value(&self) -> f64 {
        self.lifetime_value
    }

    pub fn cogs_rate(&self) -> f64 {
        self.cogs_rate
    }
}

impl TryFrom<&ProjectionForm> for ProjectionInputs {
    type Error = Error;

    /// Every field must be present before any of them is parsed
    fn try_from(form: &ProjectionForm) -> Result<Self> {
        let revenue = require("currentRevenue", &form.current_revenue)?;
        let cac = require("currentCac", &form.current_cac)?;
        let commission = require("affiliateCommission", &form.affiliate_commission_percent)?;
        let aov = require("averageOrderValue", &form.average_order_value)?;
        let cltv = require("customerLifetimeValue", &form.customer_lifetime_value)?;
        let cogs = require("cogs", &form.cogs_percent)?;

        Self::new(
            parse_number("currentRevenue", revenue)?,
            parse_number("currentCac", cac)?,
            parse_number("affiliateCommission", commission)? / 100.0,
            parse_number("averageOrderValue", aov)?,
            parse_number("customerLifetimeValue", cltv)?,
            parse_number("cogs", cogs)? / 100.0,
        )
    }
}

impl TryFrom<ProjectionForm> for ProjectionInputs {
    type Error = Error;

    fn try_from(form: ProjectionForm) -> Result<Self> {
        Self::try_from(&form)
    }
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field).into()),
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            ValidationError::InvalidNumber {
                field,
                value: raw.to_string(),
            }
            .into()
        })
}

fn check_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        }
        .into());
    }
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must not be negative, got {}", value),
        }
        .into());
    }
    Ok(())
}

fn check_rate(field: &'static str, value: f64) -> Result<()> {
    check_amount(field, value)?;
    if value > 1.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must not exceed 100%, got {}%", value * 100.0),
        }
        .into());
    }
    Ok(())
}

/// One projected month. Dollar amounts are rounded to whole units, `rops`
/// to two decimals and `percent_of_baseline_revenue` to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    pub month: u32,
    /// Unrounded share of baseline revenue targeted this month
    pub target_fraction: f64,
    pub target_percent: f64,
    pub new_revenue: f64,
    /// Recurring revenue from customers acquired so far
    pub ltv_revenue: f64,
    pub total_revenue: f64,
    pub affiliate_cost: f64,
    pub agency_cost: f64,
    pub total_partnership_spend: f64,
    pub cogs: f64,
    pub profit: f64,
    /// Return on partnership spend
    pub rops: f64,
    pub paid_media_spend: f64,
    pub paid_platform_fee: f64,
    pub equivalent_paid_spend: f64,
    /// Equivalent paid spend minus partnership spend
    pub paid_spend_savings: f64,
    pub percent_of_baseline_revenue: f64,
    pub new_customers: u64,
    pub total_customers: u64,
}

/// Twelve month records in ascending month order. Only the projection
/// pipeline builds one, so it is serialize-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    months: Vec<MonthRecord>,
}

impl ProjectionResult {
    pub(crate) fn new(months: Vec<MonthRecord>) -> Self {
        Self { months }
    }

    pub fn months(&self) -> &[MonthRecord] {
        &self.months
    }

    /// Record for a 1-based month
    pub fn month(&self, month: u32) -> Option<&MonthRecord> {
        let index = usize::try_from(month.checked_sub(1)?).ok()?;
        self.months.get(index)
    }

    pub fn final_month(&self) -> Option<&MonthRecord> {
        self.months.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthCurvePoint {
    pub month: u32,
    pub target_fraction: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProjectionForm {
        ProjectionForm {
            current_revenue: Some("100000".to_string()),
            current_cac: Some("50".to_string()),
            affiliate_commission_percent: Some("10".to_string()),
            average_order_value: Some("85".to_string()),
            customer_lifetime_value: Some("125".to_string()),
            cogs_percent: Some("40".to_string()),
        }
    }

    #[test]
    fn form_percentages_become_fractions() {
        let inputs = ProjectionInputs::try_from(&form()).unwrap();
        assert_eq!(inputs.baseline_revenue(), 100000.0);
        assert_eq!(inputs.acquisition_cost(), 50.0);
        assert_eq!(inputs.commission_rate(), 0.10);
        assert_eq!(inputs.average_order_value(), 85.0);
        assert_eq!(inputs.lifetime_value(), 125.0);
        assert_eq!(inputs.cogs_rate(), 0.40);
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut f = form();
        f.current_cac = Some("   ".to_string());
        assert_eq!(
            ProjectionInputs::try_from(&f),
            Err(Error::Validation(ValidationError::MissingField("currentCac")))
        );
    }

    #[test]
    fn absent_field_is_reported_by_name() {
        let mut f = form();
        f.cogs_percent = None;
        assert_eq!(
            ProjectionInputs::try_from(&f),
            Err(Error::Validation(ValidationError::MissingField("cogs")))
        );
    }

    #[test]
    fn trailing_garbage_is_not_a_number() {
        let mut f = form();
        f.average_order_value = Some("85abc".to_string());
        assert!(matches!(
            ProjectionInputs::try_from(&f),
            Err(Error::Validation(ValidationError::InvalidNumber {
                field: "averageOrderValue",
                ..
            }))
        ));
    }

    #[test]
    fn infinite_values_are_rejected() {
        let mut f = form();
        f.current_revenue = Some("inf".to_string());
        assert!(ProjectionInputs::try_from(&f).is_err());
        assert!(ProjectionInputs::new(f64::NAN, 50.0, 0.1, 85.0, 125.0, 0.4).is_err());
    }

    #[test]
    fn zero_average_order_value_is_invalid_input() {
        let result = ProjectionInputs::new(100000.0, 50.0, 0.1, 0.0, 125.0, 0.4);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::OutOfRange {
                field: "averageOrderValue",
                ..
            }))
        ));
    }

    #[test]
    fn negative_and_oversized_rates_are_rejected() {
        assert!(ProjectionInputs::new(-1.0, 50.0, 0.1, 85.0, 125.0, 0.4).is_err());
        assert!(ProjectionInputs::new(100000.0, 50.0, 1.2, 85.0, 125.0, 0.4).is_err());
        assert!(ProjectionInputs::new(100000.0, 50.0, 0.1, 85.0, 125.0, -0.1).is_err());
    }

    #[test]
    fn month_lookup_is_one_based() {
        let record = |month| MonthRecord {
            month,
            target_fraction: 0.0,
            target_percent: 0.0,
            new_revenue: 0.0,
            ltv_revenue: 0.0,
            total_revenue: 0.0,
            affiliate_cost: 0.0,
            agency_cost: 0.0,
            total_partnership_spend: 0.0,
            cogs: 0.0,
            profit: 0.0,
            rops: 0.0,
            paid_media_spend: 0.0,
            paid_platform_fee: 0.0,
            equivalent_paid_spend: 0.0,
            paid_spend_savings: 0.0,
            percent_of_baseline_revenue: 0.0,
            new_customers: 0,
            total_customers: 0,
        };
        let result = ProjectionResult::new(vec![record(1), record(2)]);
        assert_eq!(result.month(0), None);
        assert_eq!(result.month(2).map(|r| r.month), Some(2));
        assert_eq!(result.final_month().map(|r| r.month), Some(2));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["months"].as_array().map(Vec::len), Some(2));
    }
}
