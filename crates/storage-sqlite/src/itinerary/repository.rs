use tripfolio_core::itinerary::{
    ItineraryDay, ItineraryDayUpdate, ItineraryDayWithActivities, ItineraryRepositoryTrait,
    NewItineraryDay, NewScheduledActivity, ScheduledActivity, ScheduledActivityUpdate,
};
use tripfolio_core::Result;

use super::model::{
    ItineraryDayChangeset, ItineraryDayDB, ScheduledActivityChangeset, ScheduledActivityDB,
};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{itinerary_days, scheduled_activities};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ItineraryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ItineraryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ItineraryRepository { pool, writer }
    }
}

#[async_trait]
impl ItineraryRepositoryTrait for ItineraryRepository {
    fn get_day(&self, day_id: &str) -> Result<ItineraryDay> {
        let mut conn = get_connection(&self.pool)?;
        let day_db = itinerary_days::table
            .find(day_id)
            .first::<ItineraryDayDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(day_db.into())
    }

    fn get_days_for_trip(&self, trip_id: &str) -> Result<Vec<ItineraryDay>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = itinerary_days::table
            .filter(itinerary_days::trip_id.eq(trip_id))
            .order((
                itinerary_days::order_index.asc(),
                itinerary_days::day_number.asc(),
            ))
            .load::<ItineraryDayDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ItineraryDay::from).collect())
    }

    fn get_days_with_activities(&self, trip_id: &str) -> Result<Vec<ItineraryDayWithActivities>> {
        let mut conn = get_connection(&self.pool)?;
        let day_rows = itinerary_days::table
            .filter(itinerary_days::trip_id.eq(trip_id))
            .order((
                itinerary_days::order_index.asc(),
                itinerary_days::day_number.asc(),
            ))
            .load::<ItineraryDayDB>(&mut conn)
            .map_err(StorageError::from)?;

        let day_ids: Vec<String> = day_rows.iter().map(|d| d.id.clone()).collect();
        let activity_rows = scheduled_activities::table
            .filter(scheduled_activities::itinerary_day_id.eq_any(&day_ids))
            .order(scheduled_activities::order_index.asc())
            .load::<ScheduledActivityDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut by_day: std::collections::HashMap<String, Vec<ScheduledActivity>> =
            std::collections::HashMap::new();
        for row in activity_rows {
            let key = row.itinerary_day_id.clone();
            by_day.entry(key).or_default().push(row.try_into()?);
        }

        Ok(day_rows
            .into_iter()
            .map(|row| {
                let activities = by_day.remove(&row.id).unwrap_or_default();
                ItineraryDayWithActivities {
                    day: row.into(),
                    activities,
                }
            })
            .collect())
    }

    fn day_number_exists(&self, trip_id: &str, day_number: i32) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = itinerary_days::table
            .filter(itinerary_days::trip_id.eq(trip_id))
            .filter(itinerary_days::day_number.eq(day_number))
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        Ok(count > 0)
    }

    async fn insert_day(&self, new_day: NewItineraryDay) -> Result<ItineraryDay> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ItineraryDay> {
                let day_db = ItineraryDayDB {
                    id: Uuid::new_v4().to_string(),
                    trip_id: new_day.trip_id,
                    city_id: new_day.city_id,
                    day_number: new_day.day_number,
                    date: new_day.date,
                    notes: new_day.notes,
                    order_index: new_day.order_index.unwrap_or(0),
                };
                let result_db = diesel::insert_into(itinerary_days::table)
                    .values(&day_db)
                    .returning(ItineraryDayDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }

    async fn update_day(&self, day_id: &str, update: ItineraryDayUpdate) -> Result<ItineraryDay> {
        let day_id = day_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ItineraryDay> {
                let changeset = ItineraryDayChangeset {
                    city_id: update.city_id,
                    date: update.date,
                    notes: update.notes,
                    order_index: update.order_index,
                };
                let result_db = diesel::update(itinerary_days::table.find(&day_id))
                    .set(&changeset)
                    .returning(ItineraryDayDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }

    async fn delete_day(&self, day_id: &str) -> Result<usize> {
        let day_id = day_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(itinerary_days::table.find(&day_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn reorder_days(&self, trip_id: &str, ordered_ids: Vec<String>) -> Result<usize> {
        let trip_id = trip_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut updated = 0;
                for (position, day_id) in ordered_ids.iter().enumerate() {
                    updated += diesel::update(
                        itinerary_days::table
                            .find(day_id)
                            .filter(itinerary_days::trip_id.eq(&trip_id)),
                    )
                    .set(itinerary_days::order_index.eq(position as i32))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                Ok(updated)
            })
            .await
    }

    fn get_scheduled_activity(&self, scheduled_id: &str) -> Result<ScheduledActivity> {
        let mut conn = get_connection(&self.pool)?;
        let row = scheduled_activities::table
            .find(scheduled_id)
            .first::<ScheduledActivityDB>(&mut conn)
            .map_err(StorageError::from)?;
        row.try_into()
    }

    fn get_activities_for_day(&self, day_id: &str) -> Result<Vec<ScheduledActivity>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = scheduled_activities::table
            .filter(scheduled_activities::itinerary_day_id.eq(day_id))
            .order(scheduled_activities::order_index.asc())
            .load::<ScheduledActivityDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(TryFrom::try_from).collect()
    }

    async fn insert_scheduled_activity(
        &self,
        new_entry: NewScheduledActivity,
    ) -> Result<ScheduledActivity> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<ScheduledActivity> {
                    let entry_db = ScheduledActivityDB {
                        id: Uuid::new_v4().to_string(),
                        itinerary_day_id: new_entry.itinerary_day_id,
                        activity_id: new_entry.activity_id,
                        start_time: new_entry.start_time,
                        end_time: new_entry.end_time,
                        custom_notes: new_entry.custom_notes,
                        custom_cost: new_entry.custom_cost.map(|c| c.to_string()),
                        order_index: new_entry.order_index.unwrap_or(0),
                    };
                    let result_db = diesel::insert_into(scheduled_activities::table)
                        .values(&entry_db)
                        .returning(ScheduledActivityDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    result_db.try_into()
                },
            )
            .await
    }

    async fn update_scheduled_activity(
        &self,
        scheduled_id: &str,
        update: ScheduledActivityUpdate,
    ) -> Result<ScheduledActivity> {
        let scheduled_id = scheduled_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<ScheduledActivity> {
                    let changeset = ScheduledActivityChangeset {
                        start_time: update.start_time,
                        end_time: update.end_time,
                        custom_notes: update.custom_notes,
                        custom_cost: update.custom_cost.map(|c| c.to_string()),
                        order_index: update.order_index,
                    };
                    let result_db =
                        diesel::update(scheduled_activities::table.find(&scheduled_id))
                            .set(&changeset)
                            .returning(ScheduledActivityDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                    result_db.try_into()
                },
            )
            .await
    }

    async fn delete_scheduled_activity(&self, scheduled_id: &str) -> Result<usize> {
        let scheduled_id = scheduled_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(scheduled_activities::table.find(&scheduled_id))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }

    async fn reorder_scheduled_activities(
        &self,
        day_id: &str,
        ordered_ids: Vec<String>,
    ) -> Result<usize> {
        let day_id = day_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut updated = 0;
                for (position, scheduled_id) in ordered_ids.iter().enumerate() {
                    updated += diesel::update(
                        scheduled_activities::table
                            .find(scheduled_id)
                            .filter(scheduled_activities::itinerary_day_id.eq(&day_id)),
                    )
                    .set(scheduled_activities::order_index.eq(position as i32))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                Ok(updated)
            })
            .await
    }
}
