//! Itinerary module - days and the activities scheduled into them.

mod itinerary_model;
mod itinerary_service;
mod itinerary_traits;

pub use itinerary_model::{
    ItineraryDay, ItineraryDayUpdate, ItineraryDayWithActivities, NewItineraryDay,
    NewScheduledActivity, ScheduledActivity, ScheduledActivityUpdate,
};
pub use itinerary_service::ItineraryService;
pub use itinerary_traits::{ItineraryRepositoryTrait, ItineraryServiceTrait};
