//! Database models for budget allocations.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tripfolio_core::budget::{BudgetAllocation, BudgetCategory};
use tripfolio_core::errors::Error;

use crate::trips::TripDB;
use crate::utils::parse_decimal;

/// Database model for budget allocations.
///
/// `position` preserves entry order for the summary breakdown and is not
/// part of the domain model.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(TripDB, foreign_key = trip_id))]
#[diesel(table_name = crate::schema::budget_allocations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocationDB {
    pub id: String,
    pub trip_id: String,
    pub category: String,
    pub allocated: String,
    pub spent: String,
    pub position: i32,
}

impl BudgetAllocationDB {
    pub fn from_domain(allocation: &BudgetAllocation, position: i32) -> Self {
        Self {
            id: allocation.id.clone(),
            trip_id: allocation.trip_id.clone(),
            category: allocation.category.as_str().to_string(),
            allocated: allocation.allocated.to_string(),
            spent: allocation.spent.to_string(),
            position,
        }
    }
}

impl TryFrom<BudgetAllocationDB> for BudgetAllocation {
    type Error = Error;

    fn try_from(db: BudgetAllocationDB) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            trip_id: db.trip_id,
            category: BudgetCategory::parse_str(&db.category)?,
            allocated: parse_decimal(&db.allocated)?,
            spent: parse_decimal(&db.spent)?,
        })
    }
}
