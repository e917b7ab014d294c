//! Ownership checks shared by the protected routers.
//!
//! Services are deliberately authorization-free; handlers resolve the
//! authenticated user here before mutating anything.

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use tripfolio_core::itinerary::{ItineraryDay, ScheduledActivity};
use tripfolio_core::trips::Trip;

/// Loads the trip and verifies the caller owns it. A missing trip surfaces
/// as 404 (from the core NotFound), foreign ownership as 403.
pub fn ensure_trip_owner(
    state: &AppState,
    user: &AuthenticatedUser,
    trip_id: &str,
) -> ApiResult<Trip> {
    let trip = state.trip_service.get_trip(trip_id)?;
    if trip.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "You do not have access to this trip".to_string(),
        ));
    }
    Ok(trip)
}

/// Resolves a day and verifies the caller owns its trip.
pub fn ensure_day_owner(
    state: &AppState,
    user: &AuthenticatedUser,
    day_id: &str,
) -> ApiResult<ItineraryDay> {
    let day = state.itinerary_service.get_day(day_id)?;
    ensure_trip_owner(state, user, &day.trip_id)?;
    Ok(day)
}

/// Resolves a scheduled activity and verifies the caller owns its trip.
pub fn ensure_scheduled_owner(
    state: &AppState,
    user: &AuthenticatedUser,
    scheduled_id: &str,
) -> ApiResult<ScheduledActivity> {
    let scheduled = state.itinerary_service.get_scheduled_activity(scheduled_id)?;
    ensure_day_owner(state, user, &scheduled.itinerary_day_id)?;
    Ok(scheduled)
}
