//! Share-link domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::trips::TripAggregate;

/// What the holder of a share link may do with the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SharePermission {
    #[default]
    View,
    Edit,
}

impl SharePermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePermission::View => "VIEW",
            SharePermission::Edit => "EDIT",
        }
    }

    pub fn parse_str(value: &str) -> Result<Self> {
        match value {
            "VIEW" => Ok(SharePermission::View),
            "EDIT" => Ok(SharePermission::Edit),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown share permission '{}'",
                other
            )))),
        }
    }
}

/// A shareable link to a trip, addressed by its random slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripShare {
    pub id: String,
    pub trip_id: String,
    pub slug: String,
    pub permission: SharePermission,
    pub created_at: NaiveDateTime,
    pub expires_at: Option<NaiveDateTime>,
}

/// Input model for creating a share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTripShare {
    pub trip_id: String,
    pub permission: SharePermission,
    pub expires_at: Option<NaiveDateTime>,
}

/// A resolved share link: the link itself plus the trip it grants access to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedShare {
    pub share: TripShare,
    pub aggregate: TripAggregate,
}
