//! Budget summary calculator.
//!
//! Pure computation over already-loaded allocations and scheduled activity
//! costs; no storage access and no side effects, so it is safe to call from
//! any number of request handlers concurrently.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::budget_model::{
    BudgetAllocation, BudgetSummary, CategoryBreakdown, ScheduledActivityCost,
};
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Computes a trip's budget overview.
///
/// Totals are exact decimal sums over the allocation rows. The breakdown
/// preserves the input order. A category's percentage is its share of
/// `total_allocated`, rounded half-up to a whole percent; when nothing is
/// allocated every percentage is zero (no division). `is_over_budget` is
/// strict: spending exactly the allocated amount is not over.
pub fn compute_budget_summary(
    total_budget: Option<Decimal>,
    allocations: &[BudgetAllocation],
    scheduled_costs: &[ScheduledActivityCost],
) -> BudgetSummary {
    let total_allocated: Decimal = allocations.iter().map(|a| a.allocated).sum();
    let total_spent: Decimal = allocations.iter().map(|a| a.spent).sum();
    let estimated_activity_costs: Decimal =
        scheduled_costs.iter().map(|c| c.effective_cost()).sum();

    let mut breakdown = Vec::with_capacity(allocations.len());
    let mut over_budget_warnings = Vec::new();

    for allocation in allocations {
        let percentage = if total_allocated > Decimal::ZERO {
            (allocation.allocated * Decimal::ONE_HUNDRED / total_allocated)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i32()
                .unwrap_or(0)
        } else {
            0
        };

        let is_over_budget = allocation.spent > allocation.allocated;
        if is_over_budget {
            let overrun = (allocation.spent - allocation.allocated).round_dp_with_strategy(
                DISPLAY_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            );
            over_budget_warnings.push(format!(
                "{} is over budget by ${:.2}",
                allocation.category.as_str(),
                overrun
            ));
        }

        breakdown.push(CategoryBreakdown {
            category: allocation.category,
            allocated: allocation.allocated,
            spent: allocation.spent,
            percentage,
            is_over_budget,
        });
    }

    BudgetSummary {
        total_budget,
        total_allocated,
        total_spent,
        remaining: total_allocated - total_spent,
        estimated_activity_costs,
        breakdown,
        over_budget_warnings,
    }
}
