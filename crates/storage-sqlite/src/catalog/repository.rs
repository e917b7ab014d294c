use tripfolio_core::catalog::{
    Activity, ActivitySearchQuery, ActivitySearchResponse, CatalogRepositoryTrait, City,
    CitySearchQuery, CitySearchResponse,
};
use tripfolio_core::constants::DEFAULT_PAGE_SIZE;
use tripfolio_core::Result;

use super::model::{ActivityDB, CityDB};
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::{activities, cities};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;

/// Read-only repository over the seeded catalog tables.
pub struct CatalogRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl CatalogRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        CatalogRepository { pool }
    }
}

#[async_trait]
impl CatalogRepositoryTrait for CatalogRepository {
    fn get_city(&self, city_id: &str) -> Result<City> {
        let mut conn = get_connection(&self.pool)?;
        let city_db = cities::table
            .find(city_id)
            .first::<CityDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(City::from(city_db))
    }

    fn search_cities(&self, query: &CitySearchQuery) -> Result<CitySearchResponse> {
        let mut conn = get_connection(&self.pool)?;
        let page = query.page.unwrap_or(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut filtered = cities::table.into_boxed();
        let mut count_query = cities::table.into_boxed();
        if let Some(search) = query.search.as_ref().filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            filtered = filtered.filter(
                cities::name
                    .like(pattern.clone())
                    .or(cities::country.like(pattern.clone())),
            );
            count_query = count_query.filter(
                cities::name
                    .like(pattern.clone())
                    .or(cities::country.like(pattern)),
            );
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;

        let rows = filtered
            .order(cities::name.asc())
            .limit(page_size)
            .offset((page - 1) * page_size)
            .load::<CityDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(CitySearchResponse {
            cities: rows.into_iter().map(City::from).collect(),
            total,
            page,
            page_size,
        })
    }

    fn get_activity(&self, activity_id: &str) -> Result<Activity> {
        let mut conn = get_connection(&self.pool)?;
        let activity_db = activities::table
            .find(activity_id)
            .first::<ActivityDB>(&mut conn)
            .map_err(StorageError::from)?;
        Activity::try_from(activity_db)
    }

    fn get_activities_by_ids(&self, activity_ids: &[String]) -> Result<Vec<Activity>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = activities::table
            .filter(activities::id.eq_any(activity_ids))
            .load::<ActivityDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Activity::try_from).collect()
    }

    fn search_activities(&self, query: &ActivitySearchQuery) -> Result<ActivitySearchResponse> {
        let mut conn = get_connection(&self.pool)?;
        let page = query.page.unwrap_or(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut filtered = activities::table.into_boxed();
        if let Some(city_id) = &query.city_id {
            filtered = filtered.filter(activities::city_id.eq(city_id.clone()));
        }
        if let Some(category) = query.category {
            filtered = filtered.filter(activities::category.eq(category.as_str()));
        }
        if let Some(search) = query.search.as_ref().filter(|s| !s.trim().is_empty()) {
            filtered = filtered.filter(activities::name.like(format!("%{}%", search.trim())));
        }

        let rows = filtered
            .order(activities::name.asc())
            .load::<ActivityDB>(&mut conn)
            .map_err(StorageError::from)?;

        // Cost and rating are TEXT-encoded decimals, so those filters are
        // applied after decoding rather than pushed into SQL.
        let mut matches = Vec::with_capacity(rows.len());
        for row in rows {
            let activity = Activity::try_from(row)?;
            if let Some(max_cost) = query.max_cost {
                if activity.estimated_cost > max_cost {
                    continue;
                }
            }
            if let Some(min_rating) = query.min_rating {
                if activity.rating < min_rating {
                    continue;
                }
            }
            matches.push(activity);
        }

        let total = matches.len() as i64;
        let offset = ((page - 1) * page_size) as usize;
        let paged: Vec<Activity> = matches
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Ok(ActivitySearchResponse {
            activities: paged,
            total,
            page,
            page_size,
        })
    }
}
