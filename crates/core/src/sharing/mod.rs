//! Sharing module - shareable trip links.

mod share_model;
mod share_service;
mod share_traits;

pub use share_model::{NewTripShare, ResolvedShare, SharePermission, TripShare};
pub use share_service::ShareService;
pub use share_traits::{NewShareRecord, ShareRepositoryTrait, ShareServiceTrait};
