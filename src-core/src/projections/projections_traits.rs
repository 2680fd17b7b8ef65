use crate::errors::Result;
use crate::projections::milestones::Milestone;
use crate::projections::projections_model::{
    GrowthCurvePoint, ProjectionForm, ProjectionInputs, ProjectionResult,
};

pub trait ProjectionServiceTrait: Send + Sync {
    fn project(&self, inputs: &ProjectionInputs) -> Result<ProjectionResult>;
    fn project_form(&self, form: &ProjectionForm) -> Result<ProjectionResult>;
    fn growth_curve(&self) -> Vec<GrowthCurvePoint>;
    fn milestones(&self) -> Vec<Milestone>;
}
