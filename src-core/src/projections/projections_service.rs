use log::{debug, warn};

use crate::errors::Result;
use crate::projections::assumptions::ProjectionAssumptions;
use crate::projections::growth_curve::target_fraction;
use crate::projections::milestones::Milestone;
use crate::projections::monthly_metrics::compute_month;
use crate::projections::projections_model::{
    GrowthCurvePoint, ProjectionForm, ProjectionInputs, ProjectionResult,
};
use crate::projections::projections_traits::ProjectionServiceTrait;
use crate::projections::PROJECTION_MONTHS;

/// Runs the 12-month projection. Holds only immutable assumptions, so one
/// instance can be shared across threads and every run starts from zero.
pub struct ProjectionService {
    assumptions: ProjectionAssumptions,
}

impl ProjectionService {
    pub fn new(assumptions: ProjectionAssumptions) -> Result<Self> {
        assumptions.validate()?;
        Ok(ProjectionService { assumptions })
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        ProjectionService {
            assumptions: ProjectionAssumptions::default(),
        }
    }
}

impl ProjectionServiceTrait for ProjectionService {
    /// Month n's residual revenue depends on every customer gained in months
    /// 1..=n, so months are computed strictly in order.
    fn project(&self, inputs: &ProjectionInputs) -> Result<ProjectionResult> {
        let mut cumulative_customers = 0u64;
        let mut months = Vec::with_capacity(PROJECTION_MONTHS as usize);

        for month in 1..=PROJECTION_MONTHS {
            let fraction = target_fraction(&self.assumptions.milestones, month);
            let outcome = compute_month(
                month,
                fraction,
                inputs,
                &self.assumptions,
                cumulative_customers,
            )?;
            cumulative_customers = outcome.cumulative_customers;
            months.push(outcome.record);
        }

        debug!(
            "Projected {} months: {} customers acquired",
            months.len(),
            cumulative_customers
        );

        Ok(ProjectionResult::new(months))
    }

    fn project_form(&self, form: &ProjectionForm) -> Result<ProjectionResult> {
        let inputs = ProjectionInputs::try_from(form).map_err(|e| {
            warn!("Rejected projection form: {}", e);
            e
        })?;
        self.project(&inputs)
    }

    fn growth_curve(&self) -> Vec<GrowthCurvePoint> {
        (1..=PROJECTION_MONTHS)
            .map(|month| GrowthCurvePoint {
                month,
                target_fraction: target_fraction(&self.assumptions.milestones, month),
            })
            .collect()
    }

    fn milestones(&self) -> Vec<Milestone> {
        self.assumptions.milestones.milestones().to_vec()
    }
}
