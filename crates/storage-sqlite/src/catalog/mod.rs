mod model;
mod repository;

pub use model::{ActivityDB, CityDB};
pub use repository::CatalogRepository;
