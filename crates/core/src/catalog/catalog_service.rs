use std::sync::Arc;

use super::catalog_model::{
    Activity, ActivitySearchQuery, ActivitySearchResponse, City, CitySearchQuery,
    CitySearchResponse,
};
use super::catalog_traits::{CatalogRepositoryTrait, CatalogServiceTrait};
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::Result;
use async_trait::async_trait;

pub struct CatalogService {
    repository: Arc<dyn CatalogRepositoryTrait>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepositoryTrait>) -> Self {
        CatalogService { repository }
    }

    /// Clamps page to >= 1 and page size to 1..=MAX_PAGE_SIZE.
    fn clamp_paging(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    fn get_city(&self, city_id: &str) -> Result<City> {
        self.repository.get_city(city_id)
    }

    fn search_cities(&self, mut query: CitySearchQuery) -> Result<CitySearchResponse> {
        let (page, page_size) = Self::clamp_paging(query.page, query.page_size);
        query.page = Some(page);
        query.page_size = Some(page_size);
        self.repository.search_cities(&query)
    }

    fn get_activity(&self, activity_id: &str) -> Result<Activity> {
        self.repository.get_activity(activity_id)
    }

    fn search_activities(&self, mut query: ActivitySearchQuery) -> Result<ActivitySearchResponse> {
        let (page, page_size) = Self::clamp_paging(query.page, query.page_size);
        query.page = Some(page);
        query.page_size = Some(page_size);
        self.repository.search_activities(&query)
    }
}
