use chrono::Utc;
use log::debug;
use std::sync::Arc;

use super::duplicate::duplicate_trip;
use super::trips_model::{NewTrip, Trip, TripAggregate, TripStatus, TripUpdate};
use super::trips_traits::{TripRepositoryTrait, TripServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use async_trait::async_trait;

pub struct TripService {
    repository: Arc<dyn TripRepositoryTrait>,
}

impl TripService {
    pub fn new(repository: Arc<dyn TripRepositoryTrait>) -> Self {
        TripService { repository }
    }

    fn validate_new_trip(new_trip: &NewTrip) -> Result<()> {
        if new_trip.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if new_trip.end_date < new_trip.start_date {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Trip ends ({}) before it starts ({})",
                new_trip.end_date, new_trip.start_date
            ))));
        }
        if let Some(budget) = new_trip.total_budget {
            if budget.is_sign_negative() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Total budget cannot be negative".to_string(),
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TripServiceTrait for TripService {
    fn get_trip(&self, trip_id: &str) -> Result<Trip> {
        self.repository.get_trip(trip_id)
    }

    fn list_trips(&self, owner_id: &str, status: Option<TripStatus>) -> Result<Vec<Trip>> {
        self.repository.list_for_owner(owner_id, status)
    }

    fn get_aggregate(&self, trip_id: &str) -> Result<TripAggregate> {
        self.repository.get_aggregate(trip_id)
    }

    async fn create_trip(&self, owner_id: &str, new_trip: NewTrip) -> Result<Trip> {
        Self::validate_new_trip(&new_trip)?;
        debug!("Creating trip '{}' for {}", new_trip.name, owner_id);
        self.repository.insert_trip(owner_id, new_trip).await
    }

    async fn update_trip(&self, trip_id: &str, update: TripUpdate) -> Result<Trip> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    "name".to_string(),
                )));
            }
        }
        if let (Some(start), Some(end)) = (update.start_date, update.end_date) {
            if end < start {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Trip ends ({}) before it starts ({})",
                    end, start
                ))));
            }
        }
        self.repository.update_trip(trip_id, update).await
    }

    async fn update_status(&self, trip_id: &str, status: TripStatus) -> Result<Trip> {
        self.repository.update_status(trip_id, status).await
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<usize> {
        self.repository.delete_trip(trip_id).await
    }

    async fn duplicate_trip(&self, trip_id: &str, new_owner_id: &str) -> Result<TripAggregate> {
        let source = self.repository.get_aggregate(trip_id)?;
        let copy = duplicate_trip(&source, new_owner_id, Utc::now().naive_utc());
        debug!(
            "Duplicating trip {} as {} for {}",
            trip_id, copy.trip.id, new_owner_id
        );
        self.repository.insert_aggregate(copy).await
    }
}
