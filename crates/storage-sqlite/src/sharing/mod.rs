mod model;
mod repository;

pub use model::TripShareDB;
pub use repository::ShareRepository;
