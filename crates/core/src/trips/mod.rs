//! Trips module - trip lifecycle, the fully-loaded aggregate, and duplication.

pub mod duplicate;
mod trips_model;
mod trips_service;
mod trips_traits;

pub use duplicate::duplicate_trip;
pub use trips_model::{NewTrip, Trip, TripAggregate, TripStatus, TripUpdate};
pub use trips_service::TripService;
pub use trips_traits::{TripRepositoryTrait, TripServiceTrait};

#[cfg(test)]
mod duplicate_tests;
