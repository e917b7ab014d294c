use log::debug;
use std::sync::Arc;

use super::itinerary_model::{
    ItineraryDay, ItineraryDayUpdate, ItineraryDayWithActivities, NewItineraryDay,
    NewScheduledActivity, ScheduledActivity, ScheduledActivityUpdate,
};
use super::itinerary_traits::{ItineraryRepositoryTrait, ItineraryServiceTrait};
use crate::catalog::CatalogRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use async_trait::async_trait;

pub struct ItineraryService {
    repository: Arc<dyn ItineraryRepositoryTrait>,
    catalog_repository: Arc<dyn CatalogRepositoryTrait>,
}

impl ItineraryService {
    pub fn new(
        repository: Arc<dyn ItineraryRepositoryTrait>,
        catalog_repository: Arc<dyn CatalogRepositoryTrait>,
    ) -> Self {
        ItineraryService {
            repository,
            catalog_repository,
        }
    }

    fn validate_time_window(
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    ) -> Result<()> {
        if end < start {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "End time {} is before start time {}",
                end, start
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl ItineraryServiceTrait for ItineraryService {
    fn get_day(&self, day_id: &str) -> Result<ItineraryDay> {
        self.repository.get_day(day_id)
    }

    fn get_days_for_trip(&self, trip_id: &str) -> Result<Vec<ItineraryDayWithActivities>> {
        self.repository.get_days_with_activities(trip_id)
    }

    async fn add_day(&self, mut new_day: NewItineraryDay) -> Result<ItineraryDay> {
        // One day per (trip, day_number)
        if self
            .repository
            .day_number_exists(&new_day.trip_id, new_day.day_number)?
        {
            return Err(Error::ConstraintViolation(format!(
                "Trip {} already has a day {}",
                new_day.trip_id, new_day.day_number
            )));
        }
        if new_day.day_number < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Day number must be positive".to_string(),
            )));
        }
        // Existence check keeps dangling city references out of itineraries.
        self.catalog_repository.get_city(&new_day.city_id)?;

        if new_day.order_index.is_none() {
            let next = self
                .repository
                .get_days_for_trip(&new_day.trip_id)?
                .iter()
                .map(|d| d.order_index)
                .max()
                .map_or(0, |max| max + 1);
            new_day.order_index = Some(next);
        }

        debug!(
            "Adding day {} to trip {}",
            new_day.day_number, new_day.trip_id
        );
        self.repository.insert_day(new_day).await
    }

    async fn update_day(&self, day_id: &str, update: ItineraryDayUpdate) -> Result<ItineraryDay> {
        if let Some(city_id) = &update.city_id {
            self.catalog_repository.get_city(city_id)?;
        }
        self.repository.update_day(day_id, update).await
    }

    async fn remove_day(&self, day_id: &str) -> Result<usize> {
        self.repository.delete_day(day_id).await
    }

    async fn reorder_days(&self, trip_id: &str, ordered_ids: Vec<String>) -> Result<usize> {
        let existing = self.repository.get_days_for_trip(trip_id)?;
        if existing.len() != ordered_ids.len()
            || !existing.iter().all(|d| ordered_ids.contains(&d.id))
        {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Reorder list must contain each day of the trip exactly once".to_string(),
            )));
        }
        self.repository.reorder_days(trip_id, ordered_ids).await
    }

    fn get_scheduled_activity(&self, scheduled_id: &str) -> Result<ScheduledActivity> {
        self.repository.get_scheduled_activity(scheduled_id)
    }

    async fn schedule_activity(
        &self,
        mut new_entry: NewScheduledActivity,
    ) -> Result<ScheduledActivity> {
        Self::validate_time_window(new_entry.start_time, new_entry.end_time)?;
        if let Some(cost) = new_entry.custom_cost {
            if cost.is_sign_negative() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Custom cost cannot be negative".to_string(),
                )));
            }
        }
        // Day and catalog activity must both exist before the FK write.
        self.repository.get_day(&new_entry.itinerary_day_id)?;
        self.catalog_repository.get_activity(&new_entry.activity_id)?;

        if new_entry.order_index.is_none() {
            let next = self
                .repository
                .get_activities_for_day(&new_entry.itinerary_day_id)?
                .iter()
                .map(|a| a.order_index)
                .max()
                .map_or(0, |max| max + 1);
            new_entry.order_index = Some(next);
        }

        self.repository.insert_scheduled_activity(new_entry).await
    }

    async fn update_scheduled_activity(
        &self,
        scheduled_id: &str,
        update: ScheduledActivityUpdate,
    ) -> Result<ScheduledActivity> {
        if let (Some(start), Some(end)) = (update.start_time, update.end_time) {
            Self::validate_time_window(start, end)?;
        }
        if let Some(cost) = update.custom_cost {
            if cost.is_sign_negative() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Custom cost cannot be negative".to_string(),
                )));
            }
        }
        self.repository
            .update_scheduled_activity(scheduled_id, update)
            .await
    }

    async fn remove_scheduled_activity(&self, scheduled_id: &str) -> Result<usize> {
        self.repository.delete_scheduled_activity(scheduled_id).await
    }

    async fn reorder_scheduled_activities(
        &self,
        day_id: &str,
        ordered_ids: Vec<String>,
    ) -> Result<usize> {
        let existing = self.repository.get_activities_for_day(day_id)?;
        if existing.len() != ordered_ids.len()
            || !existing.iter().all(|a| ordered_ids.contains(&a.id))
        {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Reorder list must contain each scheduled activity exactly once".to_string(),
            )));
        }
        self.repository
            .reorder_scheduled_activities(day_id, ordered_ids)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        Activity, ActivityCategory, ActivitySearchQuery, ActivitySearchResponse, City,
        CitySearchQuery, CitySearchResponse,
    };
    use crate::errors::DatabaseError;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    struct MockItineraryRepository {
        days: RwLock<Vec<ItineraryDay>>,
        scheduled: RwLock<Vec<ScheduledActivity>>,
    }

    impl MockItineraryRepository {
        fn new(days: Vec<ItineraryDay>) -> Self {
            Self {
                days: RwLock::new(days),
                scheduled: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ItineraryRepositoryTrait for MockItineraryRepository {
        fn get_day(&self, day_id: &str) -> Result<ItineraryDay> {
            self.days
                .read()
                .unwrap()
                .iter()
                .find(|d| d.id == day_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(day_id.to_string()).into())
        }

        fn get_days_for_trip(&self, trip_id: &str) -> Result<Vec<ItineraryDay>> {
            Ok(self
                .days
                .read()
                .unwrap()
                .iter()
                .filter(|d| d.trip_id == trip_id)
                .cloned()
                .collect())
        }

        fn get_days_with_activities(
            &self,
            trip_id: &str,
        ) -> Result<Vec<ItineraryDayWithActivities>> {
            Ok(self
                .get_days_for_trip(trip_id)?
                .into_iter()
                .map(|day| {
                    let activities = self
                        .scheduled
                        .read()
                        .unwrap()
                        .iter()
                        .filter(|a| a.itinerary_day_id == day.id)
                        .cloned()
                        .collect();
                    ItineraryDayWithActivities { day, activities }
                })
                .collect())
        }

        fn day_number_exists(&self, trip_id: &str, day_number: i32) -> Result<bool> {
            Ok(self
                .days
                .read()
                .unwrap()
                .iter()
                .any(|d| d.trip_id == trip_id && d.day_number == day_number))
        }

        async fn insert_day(&self, new_day: NewItineraryDay) -> Result<ItineraryDay> {
            let day = ItineraryDay {
                id: uuid::Uuid::new_v4().to_string(),
                trip_id: new_day.trip_id,
                city_id: new_day.city_id,
                day_number: new_day.day_number,
                date: new_day.date,
                notes: new_day.notes,
                order_index: new_day.order_index.unwrap_or(0),
            };
            self.days.write().unwrap().push(day.clone());
            Ok(day)
        }

        async fn update_day(
            &self,
            day_id: &str,
            update: ItineraryDayUpdate,
        ) -> Result<ItineraryDay> {
            let mut days = self.days.write().unwrap();
            let day = days
                .iter_mut()
                .find(|d| d.id == day_id)
                .ok_or_else(|| Error::from(DatabaseError::NotFound(day_id.to_string())))?;
            if let Some(city_id) = update.city_id {
                day.city_id = city_id;
            }
            if let Some(date) = update.date {
                day.date = date;
            }
            if let Some(notes) = update.notes {
                day.notes = Some(notes);
            }
            if let Some(order_index) = update.order_index {
                day.order_index = order_index;
            }
            Ok(day.clone())
        }

        async fn delete_day(&self, day_id: &str) -> Result<usize> {
            let mut days = self.days.write().unwrap();
            let before = days.len();
            days.retain(|d| d.id != day_id);
            Ok(before - days.len())
        }

        async fn reorder_days(&self, trip_id: &str, ordered_ids: Vec<String>) -> Result<usize> {
            let mut days = self.days.write().unwrap();
            for day in days.iter_mut().filter(|d| d.trip_id == trip_id) {
                if let Some(pos) = ordered_ids.iter().position(|id| *id == day.id) {
                    day.order_index = pos as i32;
                }
            }
            Ok(ordered_ids.len())
        }

        fn get_scheduled_activity(&self, scheduled_id: &str) -> Result<ScheduledActivity> {
            self.scheduled
                .read()
                .unwrap()
                .iter()
                .find(|a| a.id == scheduled_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(scheduled_id.to_string()).into())
        }

        fn get_activities_for_day(&self, day_id: &str) -> Result<Vec<ScheduledActivity>> {
            Ok(self
                .scheduled
                .read()
                .unwrap()
                .iter()
                .filter(|a| a.itinerary_day_id == day_id)
                .cloned()
                .collect())
        }

        async fn insert_scheduled_activity(
            &self,
            new_entry: NewScheduledActivity,
        ) -> Result<ScheduledActivity> {
            let entry = ScheduledActivity {
                id: uuid::Uuid::new_v4().to_string(),
                itinerary_day_id: new_entry.itinerary_day_id,
                activity_id: new_entry.activity_id,
                start_time: new_entry.start_time,
                end_time: new_entry.end_time,
                custom_notes: new_entry.custom_notes,
                custom_cost: new_entry.custom_cost,
                order_index: new_entry.order_index.unwrap_or(0),
            };
            self.scheduled.write().unwrap().push(entry.clone());
            Ok(entry)
        }

        async fn update_scheduled_activity(
            &self,
            scheduled_id: &str,
            update: ScheduledActivityUpdate,
        ) -> Result<ScheduledActivity> {
            let mut scheduled = self.scheduled.write().unwrap();
            let entry = scheduled
                .iter_mut()
                .find(|a| a.id == scheduled_id)
                .ok_or_else(|| Error::from(DatabaseError::NotFound(scheduled_id.to_string())))?;
            if let Some(start) = update.start_time {
                entry.start_time = start;
            }
            if let Some(end) = update.end_time {
                entry.end_time = end;
            }
            if let Some(notes) = update.custom_notes {
                entry.custom_notes = Some(notes);
            }
            if let Some(cost) = update.custom_cost {
                entry.custom_cost = Some(cost);
            }
            if let Some(order_index) = update.order_index {
                entry.order_index = order_index;
            }
            Ok(entry.clone())
        }

        async fn delete_scheduled_activity(&self, scheduled_id: &str) -> Result<usize> {
            let mut scheduled = self.scheduled.write().unwrap();
            let before = scheduled.len();
            scheduled.retain(|a| a.id != scheduled_id);
            Ok(before - scheduled.len())
        }

        async fn reorder_scheduled_activities(
            &self,
            day_id: &str,
            ordered_ids: Vec<String>,
        ) -> Result<usize> {
            let mut scheduled = self.scheduled.write().unwrap();
            for entry in scheduled.iter_mut().filter(|a| a.itinerary_day_id == day_id) {
                if let Some(pos) = ordered_ids.iter().position(|id| *id == entry.id) {
                    entry.order_index = pos as i32;
                }
            }
            Ok(ordered_ids.len())
        }
    }

    struct MockCatalogRepository;

    #[async_trait]
    impl CatalogRepositoryTrait for MockCatalogRepository {
        fn get_city(&self, city_id: &str) -> Result<City> {
            if city_id == "missing" {
                return Err(DatabaseError::NotFound(city_id.to_string()).into());
            }
            Ok(City {
                id: city_id.to_string(),
                name: "Lisbon".to_string(),
                country: "Portugal".to_string(),
                country_code: "PT".to_string(),
                latitude: None,
                longitude: None,
                description: None,
                image_url: None,
            })
        }

        fn search_cities(&self, _query: &CitySearchQuery) -> Result<CitySearchResponse> {
            unimplemented!()
        }

        fn get_activity(&self, activity_id: &str) -> Result<Activity> {
            if activity_id == "missing" {
                return Err(DatabaseError::NotFound(activity_id.to_string()).into());
            }
            Ok(Activity {
                id: activity_id.to_string(),
                city_id: "city-1".to_string(),
                name: "Tram 28".to_string(),
                category: ActivityCategory::Sightseeing,
                estimated_cost: dec!(3.30),
                duration_minutes: 60,
                rating: dec!(4.4),
                description: None,
                image_url: None,
            })
        }

        fn get_activities_by_ids(&self, _activity_ids: &[String]) -> Result<Vec<Activity>> {
            unimplemented!()
        }

        fn search_activities(
            &self,
            _query: &ActivitySearchQuery,
        ) -> Result<ActivitySearchResponse> {
            unimplemented!()
        }
    }

    fn day(id: &str, trip_id: &str, day_number: i32, order_index: i32) -> ItineraryDay {
        ItineraryDay {
            id: id.to_string(),
            trip_id: trip_id.to_string(),
            city_id: "city-1".to_string(),
            day_number,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            notes: None,
            order_index,
        }
    }

    fn make_service(days: Vec<ItineraryDay>) -> ItineraryService {
        ItineraryService::new(
            Arc::new(MockItineraryRepository::new(days)),
            Arc::new(MockCatalogRepository),
        )
    }

    fn new_day(trip_id: &str, day_number: i32) -> NewItineraryDay {
        NewItineraryDay {
            trip_id: trip_id.to_string(),
            city_id: "city-1".to_string(),
            day_number,
            date: NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
            notes: None,
            order_index: None,
        }
    }

    #[tokio::test]
    async fn test_add_day_rejects_duplicate_day_number() {
        let service = make_service(vec![day("d1", "trip-1", 1, 0)]);
        let result = service.add_day(new_day("trip-1", 1)).await;
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_add_day_appends_order_index() {
        let service = make_service(vec![day("d1", "trip-1", 1, 0), day("d2", "trip-1", 2, 1)]);
        let created = service.add_day(new_day("trip-1", 3)).await.unwrap();
        assert_eq!(created.order_index, 2);
    }

    #[tokio::test]
    async fn test_add_day_rejects_unknown_city() {
        let service = make_service(vec![]);
        let mut input = new_day("trip-1", 1);
        input.city_id = "missing".to_string();
        let result = service.add_day(input).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_schedule_activity_rejects_inverted_times() {
        let service = make_service(vec![day("d1", "trip-1", 1, 0)]);
        let result = service
            .schedule_activity(NewScheduledActivity {
                itinerary_day_id: "d1".to_string(),
                activity_id: "a1".to_string(),
                start_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                custom_notes: None,
                custom_cost: None,
                order_index: None,
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_schedule_activity_rejects_negative_cost() {
        let service = make_service(vec![day("d1", "trip-1", 1, 0)]);
        let result = service
            .schedule_activity(NewScheduledActivity {
                itinerary_day_id: "d1".to_string(),
                activity_id: "a1".to_string(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                custom_notes: None,
                custom_cost: Some(dec!(-5)),
                order_index: None,
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_reorder_days_requires_complete_permutation() {
        let service = make_service(vec![day("d1", "trip-1", 1, 0), day("d2", "trip-1", 2, 1)]);

        let incomplete = service
            .reorder_days("trip-1", vec!["d1".to_string()])
            .await;
        assert!(matches!(incomplete, Err(Error::Validation(_))));

        let reordered = service
            .reorder_days("trip-1", vec!["d2".to_string(), "d1".to_string()])
            .await
            .unwrap();
        assert_eq!(reordered, 2);
        assert_eq!(service.get_day("d2").unwrap().order_index, 0);
        assert_eq!(service.get_day("d1").unwrap().order_index, 1);
    }
}
