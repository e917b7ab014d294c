//! Budget domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Fixed set of budgeting categories. Each trip carries at most one
/// allocation per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetCategory {
    Transport,
    Accommodation,
    Food,
    Activities,
    Shopping,
    Miscellaneous,
}

impl BudgetCategory {
    /// All categories, in display order.
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Transport,
        BudgetCategory::Accommodation,
        BudgetCategory::Food,
        BudgetCategory::Activities,
        BudgetCategory::Shopping,
        BudgetCategory::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Transport => "TRANSPORT",
            BudgetCategory::Accommodation => "ACCOMMODATION",
            BudgetCategory::Food => "FOOD",
            BudgetCategory::Activities => "ACTIVITIES",
            BudgetCategory::Shopping => "SHOPPING",
            BudgetCategory::Miscellaneous => "MISCELLANEOUS",
        }
    }

    pub fn parse_str(value: &str) -> Result<Self> {
        match value {
            "TRANSPORT" => Ok(BudgetCategory::Transport),
            "ACCOMMODATION" => Ok(BudgetCategory::Accommodation),
            "FOOD" => Ok(BudgetCategory::Food),
            "ACTIVITIES" => Ok(BudgetCategory::Activities),
            "SHOPPING" => Ok(BudgetCategory::Shopping),
            "MISCELLANEOUS" => Ok(BudgetCategory::Miscellaneous),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown budget category '{}'",
                other
            )))),
        }
    }
}

/// A trip's budget envelope for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    pub id: String,
    pub trip_id: String,
    pub category: BudgetCategory,
    pub allocated: Decimal,
    /// Accumulated externally (expense recording); the summary calculator
    /// only reads it.
    pub spent: Decimal,
}

/// Repository-level input for creating an allocation row.
#[derive(Debug, Clone)]
pub struct NewBudgetAllocation {
    pub trip_id: String,
    pub category: BudgetCategory,
    pub allocated: Decimal,
    pub spent: Decimal,
}

/// API-level input for replacing a trip's allocation set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    pub category: BudgetCategory,
    pub allocated: Decimal,
    /// Defaults to zero when omitted.
    pub spent: Option<Decimal>,
}

/// Partial update for a single category's allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPatch {
    pub allocated: Option<Decimal>,
    pub spent: Option<Decimal>,
}

/// Cost view of one scheduled activity, as consumed by the summary
/// calculator: the custom override when set, otherwise the catalog
/// activity's estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivityCost {
    pub custom_cost: Option<Decimal>,
    pub estimated_cost: Decimal,
}

impl ScheduledActivityCost {
    /// The cost that counts toward the trip's estimated activity spend.
    pub fn effective_cost(&self) -> Decimal {
        self.custom_cost.unwrap_or(self.estimated_cost)
    }
}

/// Per-category slice of the budget summary. Preserves the order of the
/// underlying allocations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: BudgetCategory,
    pub allocated: Decimal,
    pub spent: Decimal,
    /// Share of the total allocation, rounded half-up to a whole percent.
    /// Zero when nothing is allocated.
    pub percentage: i32,
    pub is_over_budget: bool,
}

/// Computed overview of a trip's budget. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budget: Option<Decimal>,
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
    /// May be negative; deliberately not clamped.
    pub remaining: Decimal,
    pub estimated_activity_costs: Decimal,
    pub breakdown: Vec<CategoryBreakdown>,
    pub over_budget_warnings: Vec<String>,
}
