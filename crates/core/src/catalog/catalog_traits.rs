use crate::catalog::catalog_model::{
    Activity, ActivitySearchQuery, ActivitySearchResponse, City, CitySearchQuery,
    CitySearchResponse,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for catalog repository operations. The catalog is read-only;
/// rows are seeded by migrations.
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    fn get_city(&self, city_id: &str) -> Result<City>;
    fn search_cities(&self, query: &CitySearchQuery) -> Result<CitySearchResponse>;
    fn get_activity(&self, activity_id: &str) -> Result<Activity>;
    fn get_activities_by_ids(&self, activity_ids: &[String]) -> Result<Vec<Activity>>;
    fn search_activities(&self, query: &ActivitySearchQuery) -> Result<ActivitySearchResponse>;
}

/// Trait for catalog service operations
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    fn get_city(&self, city_id: &str) -> Result<City>;
    fn search_cities(&self, query: CitySearchQuery) -> Result<CitySearchResponse>;
    fn get_activity(&self, activity_id: &str) -> Result<Activity>;
    fn search_activities(&self, query: ActivitySearchQuery) -> Result<ActivitySearchResponse>;
}
