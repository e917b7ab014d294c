use crate::errors::Result;
use crate::sharing::share_model::{NewTripShare, ResolvedShare, TripShare};
use async_trait::async_trait;

/// Repository-level input: the slug has already been generated.
#[derive(Debug, Clone)]
pub struct NewShareRecord {
    pub trip_id: String,
    pub slug: String,
    pub permission: super::SharePermission,
    pub expires_at: Option<chrono::NaiveDateTime>,
}

/// Trait for share repository operations
#[async_trait]
pub trait ShareRepositoryTrait: Send + Sync {
    fn get_by_slug(&self, slug: &str) -> Result<Option<TripShare>>;
    fn list_for_trip(&self, trip_id: &str) -> Result<Vec<TripShare>>;
    async fn insert(&self, record: NewShareRecord) -> Result<TripShare>;
    async fn delete(&self, share_id: &str) -> Result<usize>;
    /// Removes every share whose expiry is at or before `now`.
    async fn delete_expired(&self, now: chrono::NaiveDateTime) -> Result<usize>;
}

/// Trait for share service operations
#[async_trait]
pub trait ShareServiceTrait: Send + Sync {
    async fn create_share(&self, new_share: NewTripShare) -> Result<TripShare>;
    fn list_shares(&self, trip_id: &str) -> Result<Vec<TripShare>>;
    async fn revoke_share(&self, share_id: &str) -> Result<usize>;
    /// Resolves a slug to the shared trip. Expired or unknown slugs surface
    /// as `DatabaseError::NotFound` so the HTTP layer can 404 uniformly.
    fn resolve(&self, slug: &str) -> Result<ResolvedShare>;
    /// Drops expired links. Invoked periodically by the server scheduler;
    /// `resolve` already refuses expired links, this just reclaims rows.
    async fn purge_expired(&self) -> Result<usize>;
}
