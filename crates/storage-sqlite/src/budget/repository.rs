use tripfolio_core::budget::{
    BudgetAllocation, BudgetCategory, BudgetRepositoryTrait, NewBudgetAllocation,
    ScheduledActivityCost,
};
use tripfolio_core::Result;

use super::model::BudgetAllocationDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{activities, budget_allocations, itinerary_days, scheduled_activities};
use crate::utils::{parse_decimal, parse_opt_decimal};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }

    fn next_position(conn: &mut SqliteConnection, for_trip_id: &str) -> Result<i32> {
        let max: Option<i32> = budget_allocations::table
            .filter(budget_allocations::trip_id.eq(for_trip_id))
            .select(diesel::dsl::max(budget_allocations::position))
            .first(conn)
            .map_err(StorageError::from)?;
        Ok(max.map_or(0, |m| m + 1))
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_allocations_for_trip(&self, trip_id: &str) -> Result<Vec<BudgetAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budget_allocations::table
            .filter(budget_allocations::trip_id.eq(trip_id))
            .order(budget_allocations::position.asc())
            .load::<BudgetAllocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(TryFrom::try_from).collect()
    }

    fn get_allocation(
        &self,
        trip_id: &str,
        category: BudgetCategory,
    ) -> Result<Option<BudgetAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budget_allocations::table
            .filter(budget_allocations::trip_id.eq(trip_id))
            .filter(budget_allocations::category.eq(category.as_str()))
            .first::<BudgetAllocationDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(TryFrom::try_from).transpose()
    }

    fn get_scheduled_costs_for_trip(&self, trip_id: &str) -> Result<Vec<ScheduledActivityCost>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<(Option<String>, String)> = scheduled_activities::table
            .inner_join(
                itinerary_days::table
                    .on(itinerary_days::id.eq(scheduled_activities::itinerary_day_id)),
            )
            .inner_join(
                activities::table.on(activities::id.eq(scheduled_activities::activity_id)),
            )
            .filter(itinerary_days::trip_id.eq(trip_id))
            .select((
                scheduled_activities::custom_cost,
                activities::estimated_cost,
            ))
            .load(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(custom, estimated)| {
                Ok(ScheduledActivityCost {
                    custom_cost: parse_opt_decimal(custom.as_deref())?,
                    estimated_cost: parse_decimal(&estimated)?,
                })
            })
            .collect()
    }

    async fn replace_allocations(
        &self,
        trip_id: &str,
        new_rows: Vec<NewBudgetAllocation>,
    ) -> Result<Vec<BudgetAllocation>> {
        let trip_id = trip_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Vec<BudgetAllocation>> {
                    diesel::delete(
                        budget_allocations::table
                            .filter(budget_allocations::trip_id.eq(&trip_id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;

                    let mut created = Vec::with_capacity(new_rows.len());
                    for (position, row) in new_rows.into_iter().enumerate() {
                        let allocation_db = BudgetAllocationDB {
                            id: Uuid::new_v4().to_string(),
                            trip_id: row.trip_id,
                            category: row.category.as_str().to_string(),
                            allocated: row.allocated.to_string(),
                            spent: row.spent.to_string(),
                            position: position as i32,
                        };
                        let result_db = diesel::insert_into(budget_allocations::table)
                            .values(&allocation_db)
                            .returning(BudgetAllocationDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        created.push(BudgetAllocation::try_from(result_db)?);
                    }
                    Ok(created)
                },
            )
            .await
    }

    async fn upsert_allocation(&self, row: NewBudgetAllocation) -> Result<BudgetAllocation> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<BudgetAllocation> {
                    let existing = budget_allocations::table
                        .filter(budget_allocations::trip_id.eq(&row.trip_id))
                        .filter(budget_allocations::category.eq(row.category.as_str()))
                        .first::<BudgetAllocationDB>(conn)
                        .optional()
                        .map_err(StorageError::from)?;

                    let result_db = match existing {
                        Some(current) => diesel::update(
                            budget_allocations::table.find(&current.id),
                        )
                        .set((
                            budget_allocations::allocated.eq(row.allocated.to_string()),
                            budget_allocations::spent.eq(row.spent.to_string()),
                        ))
                        .returning(BudgetAllocationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?,
                        None => {
                            let position = Self::next_position(conn, &row.trip_id)?;
                            let allocation_db = BudgetAllocationDB {
                                id: Uuid::new_v4().to_string(),
                                trip_id: row.trip_id,
                                category: row.category.as_str().to_string(),
                                allocated: row.allocated.to_string(),
                                spent: row.spent.to_string(),
                                position,
                            };
                            diesel::insert_into(budget_allocations::table)
                                .values(&allocation_db)
                                .returning(BudgetAllocationDB::as_returning())
                                .get_result(conn)
                                .map_err(StorageError::from)?
                        }
                    };
                    BudgetAllocation::try_from(result_db)
                },
            )
            .await
    }

    async fn delete_allocation(&self, trip_id: &str, category: BudgetCategory) -> Result<usize> {
        let trip_id = trip_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budget_allocations::table
                        .filter(budget_allocations::trip_id.eq(&trip_id))
                        .filter(budget_allocations::category.eq(category.as_str())),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
