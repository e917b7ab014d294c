use crate::budget::budget_model::{
    AllocationInput, AllocationPatch, BudgetAllocation, BudgetCategory, BudgetSummary,
    NewBudgetAllocation, ScheduledActivityCost,
};
use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Allocations in insertion order.
    fn get_allocations_for_trip(&self, trip_id: &str) -> Result<Vec<BudgetAllocation>>;
    fn get_allocation(
        &self,
        trip_id: &str,
        category: BudgetCategory,
    ) -> Result<Option<BudgetAllocation>>;
    /// Cost view of every scheduled activity across the trip's days.
    fn get_scheduled_costs_for_trip(&self, trip_id: &str) -> Result<Vec<ScheduledActivityCost>>;
    /// Replaces the trip's allocation set in a single transaction.
    async fn replace_allocations(
        &self,
        trip_id: &str,
        allocations: Vec<NewBudgetAllocation>,
    ) -> Result<Vec<BudgetAllocation>>;
    /// Inserts or updates the row keyed by (trip, category).
    async fn upsert_allocation(
        &self,
        allocation: NewBudgetAllocation,
    ) -> Result<BudgetAllocation>;
    async fn delete_allocation(&self, trip_id: &str, category: BudgetCategory) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budget_summary(&self, trip_id: &str) -> Result<BudgetSummary>;
    fn get_allocations(&self, trip_id: &str) -> Result<Vec<BudgetAllocation>>;
    async fn set_allocations(
        &self,
        trip_id: &str,
        allocations: Vec<AllocationInput>,
    ) -> Result<Vec<BudgetAllocation>>;
    async fn patch_allocation(
        &self,
        trip_id: &str,
        category: BudgetCategory,
        patch: AllocationPatch,
    ) -> Result<BudgetAllocation>;
    async fn delete_allocation(&self, trip_id: &str, category: BudgetCategory) -> Result<usize>;
    /// Accumulates `amount` onto the category's spent total, creating the
    /// allocation with zero budget if it does not exist yet.
    async fn record_spend(
        &self,
        trip_id: &str,
        category: BudgetCategory,
        amount: Decimal,
    ) -> Result<BudgetAllocation>;
}
