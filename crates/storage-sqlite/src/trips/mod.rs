mod model;
mod repository;

pub use model::{TripChangeset, TripDB};
pub use repository::TripRepository;
