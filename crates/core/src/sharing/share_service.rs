use chrono::Utc;
use log::debug;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;

use super::share_model::{NewTripShare, ResolvedShare, TripShare};
use super::share_traits::{NewShareRecord, ShareRepositoryTrait, ShareServiceTrait};
use crate::constants::SHARE_SLUG_LENGTH;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::trips::TripRepositoryTrait;
use async_trait::async_trait;

pub struct ShareService {
    repository: Arc<dyn ShareRepositoryTrait>,
    trip_repository: Arc<dyn TripRepositoryTrait>,
}

impl ShareService {
    pub fn new(
        repository: Arc<dyn ShareRepositoryTrait>,
        trip_repository: Arc<dyn TripRepositoryTrait>,
    ) -> Self {
        ShareService {
            repository,
            trip_repository,
        }
    }

    fn generate_slug() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SHARE_SLUG_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl ShareServiceTrait for ShareService {
    async fn create_share(&self, new_share: NewTripShare) -> Result<TripShare> {
        // The trip must exist before a link to it goes out.
        self.trip_repository.get_trip(&new_share.trip_id)?;

        if let Some(expires_at) = new_share.expires_at {
            if expires_at <= Utc::now().naive_utc() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Share expiry must be in the future".to_string(),
                )));
            }
        }

        let slug = Self::generate_slug();
        debug!("Creating share {} for trip {}", slug, new_share.trip_id);
        self.repository
            .insert(NewShareRecord {
                trip_id: new_share.trip_id,
                slug,
                permission: new_share.permission,
                expires_at: new_share.expires_at,
            })
            .await
    }

    fn list_shares(&self, trip_id: &str) -> Result<Vec<TripShare>> {
        self.repository.list_for_trip(trip_id)
    }

    async fn revoke_share(&self, share_id: &str) -> Result<usize> {
        self.repository.delete(share_id).await
    }

    fn resolve(&self, slug: &str) -> Result<ResolvedShare> {
        let share = self
            .repository
            .get_by_slug(slug)?
            .ok_or_else(|| Error::from(DatabaseError::NotFound(format!("share '{}'", slug))))?;

        if let Some(expires_at) = share.expires_at {
            if expires_at <= Utc::now().naive_utc() {
                return Err(DatabaseError::NotFound(format!("share '{}'", slug)).into());
            }
        }

        let aggregate = self.trip_repository.get_aggregate(&share.trip_id)?;
        Ok(ResolvedShare { share, aggregate })
    }

    async fn purge_expired(&self) -> Result<usize> {
        let purged = self
            .repository
            .delete_expired(Utc::now().naive_utc())
            .await?;
        if purged > 0 {
            debug!("Purged {} expired trip shares", purged);
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sharing::SharePermission;
    use crate::trips::{NewTrip, Trip, TripAggregate, TripStatus, TripUpdate};
    use chrono::{Duration, NaiveDate};
    use std::sync::RwLock;

    struct MockShareRepository {
        shares: RwLock<Vec<TripShare>>,
    }

    impl MockShareRepository {
        fn new() -> Self {
            Self {
                shares: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ShareRepositoryTrait for MockShareRepository {
        fn get_by_slug(&self, slug: &str) -> Result<Option<TripShare>> {
            Ok(self
                .shares
                .read()
                .unwrap()
                .iter()
                .find(|s| s.slug == slug)
                .cloned())
        }

        fn list_for_trip(&self, trip_id: &str) -> Result<Vec<TripShare>> {
            Ok(self
                .shares
                .read()
                .unwrap()
                .iter()
                .filter(|s| s.trip_id == trip_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, record: NewShareRecord) -> Result<TripShare> {
            let share = TripShare {
                id: uuid::Uuid::new_v4().to_string(),
                trip_id: record.trip_id,
                slug: record.slug,
                permission: record.permission,
                created_at: Utc::now().naive_utc(),
                expires_at: record.expires_at,
            };
            self.shares.write().unwrap().push(share.clone());
            Ok(share)
        }

        async fn delete(&self, share_id: &str) -> Result<usize> {
            let mut shares = self.shares.write().unwrap();
            let before = shares.len();
            shares.retain(|s| s.id != share_id);
            Ok(before - shares.len())
        }

        async fn delete_expired(&self, now: chrono::NaiveDateTime) -> Result<usize> {
            let mut shares = self.shares.write().unwrap();
            let before = shares.len();
            shares.retain(|s| s.expires_at.map_or(true, |e| e > now));
            Ok(before - shares.len())
        }
    }

    struct MockTripRepository;

    #[async_trait]
    impl TripRepositoryTrait for MockTripRepository {
        fn get_trip(&self, trip_id: &str) -> Result<Trip> {
            if trip_id == "missing" {
                return Err(DatabaseError::NotFound(trip_id.to_string()).into());
            }
            let now = NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            Ok(Trip {
                id: trip_id.to_string(),
                owner_id: "owner-1".to_string(),
                name: "Iceland".to_string(),
                description: None,
                start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 7, 8).unwrap(),
                total_budget: None,
                status: TripStatus::Planning,
                cover_photo_url: None,
                created_at: now,
                updated_at: now,
            })
        }

        fn list_for_owner(&self, _: &str, _: Option<TripStatus>) -> Result<Vec<Trip>> {
            unimplemented!()
        }

        fn get_aggregate(&self, trip_id: &str) -> Result<TripAggregate> {
            Ok(TripAggregate {
                trip: self.get_trip(trip_id)?,
                days: vec![],
                allocations: vec![],
            })
        }

        async fn insert_trip(&self, _: &str, _: NewTrip) -> Result<Trip> {
            unimplemented!()
        }
        async fn update_trip(&self, _: &str, _: TripUpdate) -> Result<Trip> {
            unimplemented!()
        }
        async fn update_status(&self, _: &str, _: TripStatus) -> Result<Trip> {
            unimplemented!()
        }
        async fn delete_trip(&self, _: &str) -> Result<usize> {
            unimplemented!()
        }
        async fn insert_aggregate(&self, _: TripAggregate) -> Result<TripAggregate> {
            unimplemented!()
        }
    }

    fn make_service() -> ShareService {
        ShareService::new(Arc::new(MockShareRepository::new()), Arc::new(MockTripRepository))
    }

    #[tokio::test]
    async fn test_create_share_generates_slug() {
        let service = make_service();
        let share = service
            .create_share(NewTripShare {
                trip_id: "trip-1".to_string(),
                permission: SharePermission::View,
                expires_at: None,
            })
            .await
            .unwrap();

        assert_eq!(share.slug.len(), SHARE_SLUG_LENGTH);
        assert!(share.slug.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_create_share_for_missing_trip_fails() {
        let service = make_service();
        let result = service
            .create_share(NewTripShare {
                trip_id: "missing".to_string(),
                permission: SharePermission::View,
                expires_at: None,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_share_rejects_past_expiry() {
        let service = make_service();
        let result = service
            .create_share(NewTripShare {
                trip_id: "trip-1".to_string(),
                permission: SharePermission::View,
                expires_at: Some(Utc::now().naive_utc() - Duration::hours(1)),
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_resolve_round_trip() {
        let service = make_service();
        let share = service
            .create_share(NewTripShare {
                trip_id: "trip-1".to_string(),
                permission: SharePermission::Edit,
                expires_at: Some(Utc::now().naive_utc() + Duration::days(7)),
            })
            .await
            .unwrap();

        let resolved = service.resolve(&share.slug).unwrap();
        assert_eq!(resolved.share.permission, SharePermission::Edit);
        assert_eq!(resolved.aggregate.trip.id, "trip-1");
    }

    #[tokio::test]
    async fn test_resolve_unknown_slug_is_not_found() {
        let service = make_service();
        let result = service.resolve("nope");
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_purge_expired_removes_only_stale_links() {
        // An already-expired row can't be made through create_share (it
        // validates expiry), so seed it at the repository level.
        let repo = Arc::new(MockShareRepository::new());
        let service = ShareService::new(repo.clone(), Arc::new(MockTripRepository));

        let stale = repo
            .insert(NewShareRecord {
                trip_id: "trip-1".to_string(),
                slug: "stale-slug-0001".to_string(),
                permission: SharePermission::View,
                expires_at: Some(Utc::now().naive_utc() - Duration::hours(1)),
            })
            .await
            .unwrap();
        let fresh = service
            .create_share(NewTripShare {
                trip_id: "trip-1".to_string(),
                permission: SharePermission::View,
                expires_at: None,
            })
            .await
            .unwrap();

        // Expired links already refuse to resolve before the purge runs.
        assert!(service.resolve(&stale.slug).is_err());

        let purged = service.purge_expired().await.unwrap();

        assert_eq!(purged, 1);
        let remaining = service.list_shares("trip-1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, fresh.id);
        assert_ne!(remaining[0].id, stale.id);
    }

    #[tokio::test]
    async fn test_revoked_share_no_longer_resolves() {
        let service = make_service();
        let share = service
            .create_share(NewTripShare {
                trip_id: "trip-1".to_string(),
                permission: SharePermission::View,
                expires_at: None,
            })
            .await
            .unwrap();

        service.revoke_share(&share.id).await.unwrap();
        assert!(service.resolve(&share.slug).is_err());
    }
}
