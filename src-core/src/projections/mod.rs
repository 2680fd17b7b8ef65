pub mod assumptions;
pub mod growth_curve;
pub mod milestones;
pub mod monthly_metrics;
pub mod projections_model;
pub mod projections_service;
pub mod projections_traits;

pub use assumptions::ProjectionAssumptions;
pub use milestones::{Milestone, MilestoneBounds, MilestoneTable};
pub use projections_model::{
    GrowthCurvePoint, MonthRecord, ProjectionForm, ProjectionInputs, ProjectionResult,
};
pub use projections_service::ProjectionService;
pub use projections_traits::ProjectionServiceTrait;

/// Number of months in every projection run
pub const PROJECTION_MONTHS: u32 = 12;
