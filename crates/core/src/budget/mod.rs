//! Budget module - per-trip allocations and the budget summary calculator.

mod budget_model;
mod budget_service;
mod budget_traits;
pub mod summary;

pub use budget_model::{
    AllocationInput, AllocationPatch, BudgetAllocation, BudgetCategory, BudgetSummary,
    CategoryBreakdown, NewBudgetAllocation, ScheduledActivityCost,
};
pub use budget_service::BudgetService;
pub use budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
pub use summary::compute_budget_summary;
