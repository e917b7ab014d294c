mod model;
mod repository;

pub use model::{ItineraryDayChangeset, ItineraryDayDB, ScheduledActivityChangeset, ScheduledActivityDB};
pub use repository::ItineraryRepository;
