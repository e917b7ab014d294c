use crate::errors::Result;
use crate::itinerary::itinerary_model::{
    ItineraryDay, ItineraryDayUpdate, ItineraryDayWithActivities, NewItineraryDay,
    NewScheduledActivity, ScheduledActivity, ScheduledActivityUpdate,
};
use async_trait::async_trait;

/// Trait for itinerary repository operations
#[async_trait]
pub trait ItineraryRepositoryTrait: Send + Sync {
    fn get_day(&self, day_id: &str) -> Result<ItineraryDay>;
    /// Days ordered by `order_index`, then `day_number`.
    fn get_days_for_trip(&self, trip_id: &str) -> Result<Vec<ItineraryDay>>;
    fn get_days_with_activities(&self, trip_id: &str) -> Result<Vec<ItineraryDayWithActivities>>;
    fn day_number_exists(&self, trip_id: &str, day_number: i32) -> Result<bool>;
    async fn insert_day(&self, new_day: NewItineraryDay) -> Result<ItineraryDay>;
    async fn update_day(&self, day_id: &str, update: ItineraryDayUpdate) -> Result<ItineraryDay>;
    async fn delete_day(&self, day_id: &str) -> Result<usize>;
    /// Rewrites `order_index` to the position of each id in `ordered_ids`.
    async fn reorder_days(&self, trip_id: &str, ordered_ids: Vec<String>) -> Result<usize>;

    fn get_scheduled_activity(&self, scheduled_id: &str) -> Result<ScheduledActivity>;
    /// Entries ordered by `order_index`.
    fn get_activities_for_day(&self, day_id: &str) -> Result<Vec<ScheduledActivity>>;
    async fn insert_scheduled_activity(
        &self,
        new_entry: NewScheduledActivity,
    ) -> Result<ScheduledActivity>;
    async fn update_scheduled_activity(
        &self,
        scheduled_id: &str,
        update: ScheduledActivityUpdate,
    ) -> Result<ScheduledActivity>;
    async fn delete_scheduled_activity(&self, scheduled_id: &str) -> Result<usize>;
    async fn reorder_scheduled_activities(
        &self,
        day_id: &str,
        ordered_ids: Vec<String>,
    ) -> Result<usize>;
}

/// Trait for itinerary service operations
#[async_trait]
pub trait ItineraryServiceTrait: Send + Sync {
    fn get_day(&self, day_id: &str) -> Result<ItineraryDay>;
    fn get_days_for_trip(&self, trip_id: &str) -> Result<Vec<ItineraryDayWithActivities>>;
    async fn add_day(&self, new_day: NewItineraryDay) -> Result<ItineraryDay>;
    async fn update_day(&self, day_id: &str, update: ItineraryDayUpdate) -> Result<ItineraryDay>;
    async fn remove_day(&self, day_id: &str) -> Result<usize>;
    async fn reorder_days(&self, trip_id: &str, ordered_ids: Vec<String>) -> Result<usize>;

    fn get_scheduled_activity(&self, scheduled_id: &str) -> Result<ScheduledActivity>;
    async fn schedule_activity(
        &self,
        new_entry: NewScheduledActivity,
    ) -> Result<ScheduledActivity>;
    async fn update_scheduled_activity(
        &self,
        scheduled_id: &str,
        update: ScheduledActivityUpdate,
    ) -> Result<ScheduledActivity>;
    async fn remove_scheduled_activity(&self, scheduled_id: &str) -> Result<usize>;
    async fn reorder_scheduled_activities(
        &self,
        day_id: &str,
        ordered_ids: Vec<String>,
    ) -> Result<usize>;
}
