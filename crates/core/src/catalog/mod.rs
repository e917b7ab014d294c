//! Catalog module - read-only cities and activities.

mod catalog_model;
mod catalog_service;
mod catalog_traits;

pub use catalog_model::{
    Activity, ActivityCategory, ActivitySearchQuery, ActivitySearchResponse, City,
    CitySearchQuery, CitySearchResponse,
};
pub use catalog_service::CatalogService;
pub use catalog_traits::{CatalogRepositoryTrait, CatalogServiceTrait};
