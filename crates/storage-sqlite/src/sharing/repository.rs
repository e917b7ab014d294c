use tripfolio_core::sharing::{NewShareRecord, ShareRepositoryTrait, TripShare};
use tripfolio_core::Result;

use super::model::TripShareDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::trip_shares;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ShareRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ShareRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ShareRepository { pool, writer }
    }
}

#[async_trait]
impl ShareRepositoryTrait for ShareRepository {
    fn get_by_slug(&self, slug: &str) -> Result<Option<TripShare>> {
        let mut conn = get_connection(&self.pool)?;
        let row = trip_shares::table
            .filter(trip_shares::slug.eq(slug))
            .first::<TripShareDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(TryFrom::try_from).transpose()
    }

    fn list_for_trip(&self, trip_id: &str) -> Result<Vec<TripShare>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = trip_shares::table
            .filter(trip_shares::trip_id.eq(trip_id))
            .order(trip_shares::created_at.desc())
            .load::<TripShareDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(TryFrom::try_from).collect()
    }

    async fn insert(&self, record: NewShareRecord) -> Result<TripShare> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TripShare> {
                let share_db = TripShareDB {
                    id: Uuid::new_v4().to_string(),
                    trip_id: record.trip_id,
                    slug: record.slug,
                    permission: record.permission.as_str().to_string(),
                    created_at: Utc::now().naive_utc(),
                    expires_at: record.expires_at,
                };
                let result_db = diesel::insert_into(trip_shares::table)
                    .values(&share_db)
                    .returning(TripShareDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                TripShare::try_from(result_db)
            })
            .await
    }

    async fn delete(&self, share_id: &str) -> Result<usize> {
        let share_id = share_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(trip_shares::table.find(&share_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_expired(&self, now: chrono::NaiveDateTime) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    trip_shares::table.filter(trip_shares::expires_at.le(now)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
