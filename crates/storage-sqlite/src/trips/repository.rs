use tripfolio_core::itinerary::{ItineraryDayWithActivities, ScheduledActivity};
use tripfolio_core::trips::{NewTrip, Trip, TripAggregate, TripRepositoryTrait, TripStatus, TripUpdate};
use tripfolio_core::Result;

use super::model::{TripChangeset, TripDB};
use crate::budget::BudgetAllocationDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::itinerary::{ItineraryDayDB, ScheduledActivityDB};
use crate::schema::{budget_allocations, itinerary_days, scheduled_activities, trips};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct TripRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TripRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TripRepository { pool, writer }
    }

    /// Loads the trip's days, each with its scheduled activities, using one
    /// query per level rather than one per day.
    fn load_days(
        conn: &mut SqliteConnection,
        for_trip_id: &str,
    ) -> Result<Vec<ItineraryDayWithActivities>> {
        let day_rows = itinerary_days::table
            .filter(itinerary_days::trip_id.eq(for_trip_id))
            .order((
                itinerary_days::order_index.asc(),
                itinerary_days::day_number.asc(),
            ))
            .load::<ItineraryDayDB>(conn)
            .map_err(StorageError::from)?;

        let day_ids: Vec<String> = day_rows.iter().map(|d| d.id.clone()).collect();
        let activity_rows = scheduled_activities::table
            .filter(scheduled_activities::itinerary_day_id.eq_any(&day_ids))
            .order(scheduled_activities::order_index.asc())
            .load::<ScheduledActivityDB>(conn)
            .map_err(StorageError::from)?;

        let mut activities_by_day: std::collections::HashMap<String, Vec<ScheduledActivity>> =
            std::collections::HashMap::new();
        for row in activity_rows {
            let day_id = row.itinerary_day_id.clone();
            activities_by_day
                .entry(day_id)
                .or_default()
                .push(ScheduledActivity::try_from(row)?);
        }

        Ok(day_rows
            .into_iter()
            .map(|row| {
                let activities = activities_by_day.remove(&row.id).unwrap_or_default();
                ItineraryDayWithActivities {
                    day: row.into(),
                    activities,
                }
            })
            .collect())
    }
}

#[async_trait]
impl TripRepositoryTrait for TripRepository {
    fn get_trip(&self, trip_id: &str) -> Result<Trip> {
        let mut conn = get_connection(&self.pool)?;
        let trip_db = trips::table
            .find(trip_id)
            .first::<TripDB>(&mut conn)
            .map_err(StorageError::from)?;
        Trip::try_from(trip_db)
    }

    fn list_for_owner(&self, owner_id: &str, status: Option<TripStatus>) -> Result<Vec<Trip>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = trips::table
            .filter(trips::owner_id.eq(owner_id))
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(trips::status.eq(status.as_str()));
        }
        let rows = query
            .order(trips::created_at.desc())
            .load::<TripDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Trip::try_from).collect()
    }

    fn get_aggregate(&self, trip_id: &str) -> Result<TripAggregate> {
        let mut conn = get_connection(&self.pool)?;
        let trip_db = trips::table
            .find(trip_id)
            .first::<TripDB>(&mut conn)
            .map_err(StorageError::from)?;
        let trip = Trip::try_from(trip_db)?;

        let days = Self::load_days(&mut conn, trip_id)?;

        let allocation_rows = budget_allocations::table
            .filter(budget_allocations::trip_id.eq(trip_id))
            .order(budget_allocations::position.asc())
            .load::<BudgetAllocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        let allocations = allocation_rows
            .into_iter()
            .map(TryFrom::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(TripAggregate {
            trip,
            days,
            allocations,
        })
    }

    async fn insert_trip(&self, owner_id: &str, new_trip: NewTrip) -> Result<Trip> {
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trip> {
                let now = Utc::now().naive_utc();
                let trip_db = TripDB {
                    id: Uuid::new_v4().to_string(),
                    owner_id,
                    name: new_trip.name,
                    description: new_trip.description,
                    start_date: new_trip.start_date,
                    end_date: new_trip.end_date,
                    total_budget: new_trip.total_budget.map(|b| b.to_string()),
                    status: TripStatus::Draft.as_str().to_string(),
                    cover_photo_url: new_trip.cover_photo_url,
                    created_at: now,
                    updated_at: now,
                };

                let result_db = diesel::insert_into(trips::table)
                    .values(&trip_db)
                    .returning(TripDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Trip::try_from(result_db)
            })
            .await
    }

    async fn update_trip(&self, trip_id: &str, update: TripUpdate) -> Result<Trip> {
        let trip_id = trip_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trip> {
                let changeset = TripChangeset {
                    name: update.name,
                    description: update.description,
                    start_date: update.start_date,
                    end_date: update.end_date,
                    total_budget: update.total_budget.map(|b| b.to_string()),
                    cover_photo_url: update.cover_photo_url,
                    updated_at: Utc::now().naive_utc(),
                };
                let result_db = diesel::update(trips::table.find(&trip_id))
                    .set(&changeset)
                    .returning(TripDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Trip::try_from(result_db)
            })
            .await
    }

    async fn update_status(&self, trip_id: &str, status: TripStatus) -> Result<Trip> {
        let trip_id = trip_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trip> {
                let result_db = diesel::update(trips::table.find(&trip_id))
                    .set((
                        trips::status.eq(status.as_str()),
                        trips::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(TripDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Trip::try_from(result_db)
            })
            .await
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<usize> {
        let trip_id = trip_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Children cascade via foreign keys.
                Ok(diesel::delete(trips::table.find(&trip_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_aggregate(&self, aggregate: TripAggregate) -> Result<TripAggregate> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TripAggregate> {
                // The writer actor wraps this job in one immediate
                // transaction, so a partial copy is never visible.
                let trip_db = TripDB::from(&aggregate.trip);
                diesel::insert_into(trips::table)
                    .values(&trip_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                for day in &aggregate.days {
                    let day_db = ItineraryDayDB::from(&day.day);
                    diesel::insert_into(itinerary_days::table)
                        .values(&day_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    for entry in &day.activities {
                        let entry_db = ScheduledActivityDB::from(entry);
                        diesel::insert_into(scheduled_activities::table)
                            .values(&entry_db)
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }
                }

                for (position, allocation) in aggregate.allocations.iter().enumerate() {
                    let allocation_db =
                        BudgetAllocationDB::from_domain(allocation, position as i32);
                    diesel::insert_into(budget_allocations::table)
                        .values(&allocation_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                Ok(aggregate)
            })
            .await
    }
}
