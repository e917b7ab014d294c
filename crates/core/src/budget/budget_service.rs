use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use super::budget_model::{
    AllocationInput, AllocationPatch, BudgetAllocation, BudgetCategory, BudgetSummary,
    NewBudgetAllocation,
};
use super::budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use super::summary::compute_budget_summary;
use crate::errors::{Error, Result, ValidationError};
use crate::trips::TripRepositoryTrait;
use async_trait::async_trait;
use rust_decimal::Decimal;

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    trip_repository: Arc<dyn TripRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        trip_repository: Arc<dyn TripRepositoryTrait>,
    ) -> Self {
        BudgetService {
            repository,
            trip_repository,
        }
    }

    /// Monetary inputs are validated here, at the data-entry boundary;
    /// the summary calculator assumes non-negative amounts.
    fn ensure_non_negative(label: &str, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "{} cannot be negative",
                label
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget_summary(&self, trip_id: &str) -> Result<BudgetSummary> {
        let trip = self.trip_repository.get_trip(trip_id)?;
        let allocations = self.repository.get_allocations_for_trip(trip_id)?;
        let scheduled_costs = self.repository.get_scheduled_costs_for_trip(trip_id)?;

        Ok(compute_budget_summary(
            trip.total_budget,
            &allocations,
            &scheduled_costs,
        ))
    }

    fn get_allocations(&self, trip_id: &str) -> Result<Vec<BudgetAllocation>> {
        self.repository.get_allocations_for_trip(trip_id)
    }

    async fn set_allocations(
        &self,
        trip_id: &str,
        allocations: Vec<AllocationInput>,
    ) -> Result<Vec<BudgetAllocation>> {
        let mut seen: HashSet<BudgetCategory> = HashSet::new();
        for input in &allocations {
            if !seen.insert(input.category) {
                return Err(Error::ConstraintViolation(format!(
                    "Duplicate allocation for category {}",
                    input.category.as_str()
                )));
            }
            Self::ensure_non_negative("Allocated amount", input.allocated)?;
            if let Some(spent) = input.spent {
                Self::ensure_non_negative("Spent amount", spent)?;
            }
        }

        debug!(
            "Replacing {} budget allocations for trip {}",
            allocations.len(),
            trip_id
        );
        let rows = allocations
            .into_iter()
            .map(|input| NewBudgetAllocation {
                trip_id: trip_id.to_string(),
                category: input.category,
                allocated: input.allocated,
                spent: input.spent.unwrap_or(Decimal::ZERO),
            })
            .collect();
        self.repository.replace_allocations(trip_id, rows).await
    }

    async fn patch_allocation(
        &self,
        trip_id: &str,
        category: BudgetCategory,
        patch: AllocationPatch,
    ) -> Result<BudgetAllocation> {
        if let Some(allocated) = patch.allocated {
            Self::ensure_non_negative("Allocated amount", allocated)?;
        }
        if let Some(spent) = patch.spent {
            Self::ensure_non_negative("Spent amount", spent)?;
        }

        let existing = self.repository.get_allocation(trip_id, category)?;
        let (current_allocated, current_spent) = existing
            .map(|a| (a.allocated, a.spent))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        self.repository
            .upsert_allocation(NewBudgetAllocation {
                trip_id: trip_id.to_string(),
                category,
                allocated: patch.allocated.unwrap_or(current_allocated),
                spent: patch.spent.unwrap_or(current_spent),
            })
            .await
    }

    async fn delete_allocation(&self, trip_id: &str, category: BudgetCategory) -> Result<usize> {
        self.repository.delete_allocation(trip_id, category).await
    }

    async fn record_spend(
        &self,
        trip_id: &str,
        category: BudgetCategory,
        amount: Decimal,
    ) -> Result<BudgetAllocation> {
        Self::ensure_non_negative("Spend amount", amount)?;

        let existing = self.repository.get_allocation(trip_id, category)?;
        let (allocated, spent) = existing
            .map(|a| (a.allocated, a.spent))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        debug!(
            "Recording {} spend of {} on trip {}",
            category.as_str(),
            amount,
            trip_id
        );
        self.repository
            .upsert_allocation(NewBudgetAllocation {
                trip_id: trip_id.to_string(),
                category,
                allocated,
                spent: spent + amount,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::budget_model::ScheduledActivityCost;
    use crate::errors::DatabaseError;
    use crate::trips::{NewTrip, Trip, TripAggregate, TripStatus, TripUpdate};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    // ============== Mock Repositories ==============

    struct MockBudgetRepository {
        allocations: RwLock<Vec<BudgetAllocation>>,
        scheduled_costs: Vec<ScheduledActivityCost>,
    }

    impl MockBudgetRepository {
        fn new(
            allocations: Vec<BudgetAllocation>,
            scheduled_costs: Vec<ScheduledActivityCost>,
        ) -> Self {
            Self {
                allocations: RwLock::new(allocations),
                scheduled_costs,
            }
        }
    }

    #[async_trait]
    impl BudgetRepositoryTrait for MockBudgetRepository {
        fn get_allocations_for_trip(&self, trip_id: &str) -> Result<Vec<BudgetAllocation>> {
            Ok(self
                .allocations
                .read()
                .unwrap()
                .iter()
                .filter(|a| a.trip_id == trip_id)
                .cloned()
                .collect())
        }

        fn get_allocation(
            &self,
            trip_id: &str,
            category: BudgetCategory,
        ) -> Result<Option<BudgetAllocation>> {
            Ok(self
                .allocations
                .read()
                .unwrap()
                .iter()
                .find(|a| a.trip_id == trip_id && a.category == category)
                .cloned())
        }

        fn get_scheduled_costs_for_trip(
            &self,
            _trip_id: &str,
        ) -> Result<Vec<ScheduledActivityCost>> {
            Ok(self.scheduled_costs.clone())
        }

        async fn replace_allocations(
            &self,
            trip_id: &str,
            new_rows: Vec<NewBudgetAllocation>,
        ) -> Result<Vec<BudgetAllocation>> {
            let mut allocations = self.allocations.write().unwrap();
            allocations.retain(|a| a.trip_id != trip_id);
            let mut created = Vec::new();
            for row in new_rows {
                let allocation = BudgetAllocation {
                    id: uuid::Uuid::new_v4().to_string(),
                    trip_id: row.trip_id,
                    category: row.category,
                    allocated: row.allocated,
                    spent: row.spent,
                };
                allocations.push(allocation.clone());
                created.push(allocation);
            }
            Ok(created)
        }

        async fn upsert_allocation(
            &self,
            row: NewBudgetAllocation,
        ) -> Result<BudgetAllocation> {
            let mut allocations = self.allocations.write().unwrap();
            if let Some(existing) = allocations
                .iter_mut()
                .find(|a| a.trip_id == row.trip_id && a.category == row.category)
            {
                existing.allocated = row.allocated;
                existing.spent = row.spent;
                return Ok(existing.clone());
            }
            let allocation = BudgetAllocation {
                id: uuid::Uuid::new_v4().to_string(),
                trip_id: row.trip_id,
                category: row.category,
                allocated: row.allocated,
                spent: row.spent,
            };
            allocations.push(allocation.clone());
            Ok(allocation)
        }

        async fn delete_allocation(
            &self,
            trip_id: &str,
            category: BudgetCategory,
        ) -> Result<usize> {
            let mut allocations = self.allocations.write().unwrap();
            let before = allocations.len();
            allocations.retain(|a| !(a.trip_id == trip_id && a.category == category));
            Ok(before - allocations.len())
        }
    }

    struct MockTripRepository {
        total_budget: Option<Decimal>,
    }

    #[async_trait]
    impl TripRepositoryTrait for MockTripRepository {
        fn get_trip(&self, trip_id: &str) -> Result<Trip> {
            if trip_id == "missing" {
                return Err(DatabaseError::NotFound(trip_id.to_string()).into());
            }
            let now = NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            Ok(Trip {
                id: trip_id.to_string(),
                owner_id: "user-1".to_string(),
                name: "Portugal".to_string(),
                description: None,
                start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
                total_budget: self.total_budget,
                status: TripStatus::Planning,
                cover_photo_url: None,
                created_at: now,
                updated_at: now,
            })
        }

        // Stub implementations for other trait methods
        fn list_for_owner(&self, _: &str, _: Option<TripStatus>) -> Result<Vec<Trip>> {
            unimplemented!()
        }
        fn get_aggregate(&self, _: &str) -> Result<TripAggregate> {
            unimplemented!()
        }
        async fn insert_trip(&self, _: &str, _: NewTrip) -> Result<Trip> {
            unimplemented!()
        }
        async fn update_trip(&self, _: &str, _: TripUpdate) -> Result<Trip> {
            unimplemented!()
        }
        async fn update_status(&self, _: &str, _: TripStatus) -> Result<Trip> {
            unimplemented!()
        }
        async fn delete_trip(&self, _: &str) -> Result<usize> {
            unimplemented!()
        }
        async fn insert_aggregate(&self, _: TripAggregate) -> Result<TripAggregate> {
            unimplemented!()
        }
    }

    // ============== Helper Functions ==============

    fn allocation(category: BudgetCategory, allocated: Decimal, spent: Decimal) -> BudgetAllocation {
        BudgetAllocation {
            id: format!("alloc-{}", category.as_str()),
            trip_id: "trip-1".to_string(),
            category,
            allocated,
            spent,
        }
    }

    fn make_service(
        allocations: Vec<BudgetAllocation>,
        costs: Vec<ScheduledActivityCost>,
        total_budget: Option<Decimal>,
    ) -> BudgetService {
        BudgetService::new(
            Arc::new(MockBudgetRepository::new(allocations, costs)),
            Arc::new(MockTripRepository { total_budget }),
        )
    }

    // ============== Tests ==============

    #[test]
    fn test_summary_assembles_trip_budget_and_costs() {
        let service = make_service(
            vec![allocation(BudgetCategory::Food, dec!(400), dec!(500))],
            vec![ScheduledActivityCost {
                custom_cost: Some(dec!(20)),
                estimated_cost: dec!(35),
            }],
            Some(dec!(1500)),
        );

        let summary = service.get_budget_summary("trip-1").unwrap();
        assert_eq!(summary.total_budget, Some(dec!(1500)));
        assert_eq!(summary.estimated_activity_costs, dec!(20));
        assert_eq!(summary.over_budget_warnings.len(), 1);
    }

    #[test]
    fn test_summary_for_missing_trip_propagates_not_found() {
        let service = make_service(vec![], vec![], None);
        let result = service.get_budget_summary("missing");
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_set_allocations_rejects_duplicate_category() {
        let service = make_service(vec![], vec![], None);
        let result = service
            .set_allocations(
                "trip-1",
                vec![
                    AllocationInput {
                        category: BudgetCategory::Food,
                        allocated: dec!(100),
                        spent: None,
                    },
                    AllocationInput {
                        category: BudgetCategory::Food,
                        allocated: dec!(200),
                        spent: None,
                    },
                ],
            )
            .await;
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_set_allocations_rejects_negative_amounts() {
        let service = make_service(vec![], vec![], None);
        let result = service
            .set_allocations(
                "trip-1",
                vec![AllocationInput {
                    category: BudgetCategory::Food,
                    allocated: dec!(-1),
                    spent: None,
                }],
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_set_allocations_replaces_existing_set() {
        let service = make_service(
            vec![allocation(BudgetCategory::Shopping, dec!(50), dec!(10))],
            vec![],
            None,
        );
        let created = service
            .set_allocations(
                "trip-1",
                vec![AllocationInput {
                    category: BudgetCategory::Food,
                    allocated: dec!(300),
                    spent: None,
                }],
            )
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].category, BudgetCategory::Food);
        assert_eq!(created[0].spent, Decimal::ZERO);

        let remaining = service.get_allocations("trip-1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].category, BudgetCategory::Food);
    }

    #[tokio::test]
    async fn test_patch_allocation_merges_with_existing() {
        let service = make_service(
            vec![allocation(BudgetCategory::Food, dec!(400), dec!(150))],
            vec![],
            None,
        );
        let patched = service
            .patch_allocation(
                "trip-1",
                BudgetCategory::Food,
                AllocationPatch {
                    allocated: Some(dec!(450)),
                    spent: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.allocated, dec!(450));
        assert_eq!(patched.spent, dec!(150));
    }

    #[tokio::test]
    async fn test_patch_allocation_upserts_missing_category() {
        let service = make_service(vec![], vec![], None);
        let patched = service
            .patch_allocation(
                "trip-1",
                BudgetCategory::Transport,
                AllocationPatch {
                    allocated: Some(dec!(120)),
                    spent: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.allocated, dec!(120));
        assert_eq!(patched.spent, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_record_spend_accumulates() {
        let service = make_service(
            vec![allocation(BudgetCategory::Food, dec!(400), dec!(150))],
            vec![],
            None,
        );
        let updated = service
            .record_spend("trip-1", BudgetCategory::Food, dec!(25.50))
            .await
            .unwrap();
        assert_eq!(updated.spent, dec!(175.50));
        assert_eq!(updated.allocated, dec!(400));

        let updated = service
            .record_spend("trip-1", BudgetCategory::Food, dec!(0.50))
            .await
            .unwrap();
        assert_eq!(updated.spent, dec!(176.00));
    }

    #[tokio::test]
    async fn test_record_spend_rejects_negative_amount() {
        let service = make_service(vec![], vec![], None);
        let result = service
            .record_spend("trip-1", BudgetCategory::Food, dec!(-10))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
