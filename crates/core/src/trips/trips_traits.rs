use crate::errors::Result;
use crate::trips::trips_model::{NewTrip, Trip, TripAggregate, TripStatus, TripUpdate};
use async_trait::async_trait;

/// Trait for trip repository operations
#[async_trait]
pub trait TripRepositoryTrait: Send + Sync {
    fn get_trip(&self, trip_id: &str) -> Result<Trip>;
    fn list_for_owner(&self, owner_id: &str, status: Option<TripStatus>) -> Result<Vec<Trip>>;
    /// Loads the trip with all children: days ordered by
    /// `order_index`/`day_number`, scheduled activities ordered by
    /// `order_index`, allocations in insertion order.
    fn get_aggregate(&self, trip_id: &str) -> Result<TripAggregate>;
    async fn insert_trip(&self, owner_id: &str, new_trip: NewTrip) -> Result<Trip>;
    async fn update_trip(&self, trip_id: &str, update: TripUpdate) -> Result<Trip>;
    async fn update_status(&self, trip_id: &str, status: TripStatus) -> Result<Trip>;
    async fn delete_trip(&self, trip_id: &str) -> Result<usize>;
    /// Persists a duplicated aggregate in a single transaction so a partial
    /// copy is never visible.
    async fn insert_aggregate(&self, aggregate: TripAggregate) -> Result<TripAggregate>;
}

/// Trait for trip service operations
#[async_trait]
pub trait TripServiceTrait: Send + Sync {
    fn get_trip(&self, trip_id: &str) -> Result<Trip>;
    fn list_trips(&self, owner_id: &str, status: Option<TripStatus>) -> Result<Vec<Trip>>;
    fn get_aggregate(&self, trip_id: &str) -> Result<TripAggregate>;
    async fn create_trip(&self, owner_id: &str, new_trip: NewTrip) -> Result<Trip>;
    async fn update_trip(&self, trip_id: &str, update: TripUpdate) -> Result<Trip>;
    async fn update_status(&self, trip_id: &str, status: TripStatus) -> Result<Trip>;
    async fn delete_trip(&self, trip_id: &str) -> Result<usize>;
    /// Loads the source aggregate, deep-copies it for `new_owner_id`, and
    /// persists the copy. Ownership checks belong to the caller.
    async fn duplicate_trip(&self, trip_id: &str, new_owner_id: &str) -> Result<TripAggregate>;
}
