//! Versioned prompt templates for itinerary generation.
//!
//! Bump `PROMPT_VERSION` whenever the wording changes materially, so logged
//! generations can be attributed to the template that produced them.

use std::fmt::Write;

use crate::types::TripContext;

pub const PROMPT_VERSION: &str = "v2";

pub fn system_prompt() -> &'static str {
    "You are a travel-planning assistant. Produce a realistic day-by-day \
     itinerary for the trip described by the user. Ground every suggestion \
     in the candidate activities when one fits, respect the stated budget, \
     and keep each day to a plausible pace (2-4 activities). Answer in \
     Markdown with one '## Day N' heading per day."
}

pub fn build_user_prompt(context: &TripContext) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Plan \"{}\": {} days, {} to {}.",
        context.trip_name,
        context.day_count(),
        context.start_date,
        context.end_date
    );
    let _ = writeln!(prompt, "Cities: {}.", context.cities.join(", "));

    if let Some(budget) = context.total_budget {
        let _ = writeln!(prompt, "Total budget: ${}.", budget);
    }
    if let Some(preferences) = context
        .preferences
        .as_ref()
        .filter(|p| !p.trim().is_empty())
    {
        let _ = writeln!(prompt, "Preferences: {}.", preferences.trim());
    }

    if !context.candidate_activities.is_empty() {
        let _ = writeln!(prompt, "\nCandidate activities:");
        for activity in &context.candidate_activities {
            let _ = writeln!(
                prompt,
                "- {} ({}, {}): ~${}, {} min, rated {}/5",
                activity.name,
                activity.city,
                activity.category,
                activity.estimated_cost,
                activity.duration_minutes,
                activity.rating
            );
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityContext;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn context() -> TripContext {
        TripContext {
            trip_name: "Iberia".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 4).unwrap(),
            cities: vec!["Lisbon".to_string(), "Seville".to_string()],
            total_budget: Some(dec!(1800)),
            preferences: Some("no museums".to_string()),
            candidate_activities: vec![ActivityContext {
                name: "Tram 28 ride".to_string(),
                category: "SIGHTSEEING".to_string(),
                city: "Lisbon".to_string(),
                estimated_cost: dec!(3.30),
                duration_minutes: 60,
                rating: dec!(4.4),
            }],
        }
    }

    #[test]
    fn test_user_prompt_mentions_trip_shape() {
        let prompt = build_user_prompt(&context());
        assert!(prompt.contains("Iberia"));
        assert!(prompt.contains("4 days"));
        assert!(prompt.contains("Lisbon, Seville"));
        assert!(prompt.contains("$1800"));
        assert!(prompt.contains("no museums"));
        assert!(prompt.contains("Tram 28 ride"));
    }

    #[test]
    fn test_user_prompt_omits_empty_sections() {
        let mut ctx = context();
        ctx.total_budget = None;
        ctx.preferences = Some("   ".to_string());
        ctx.candidate_activities.clear();

        let prompt = build_user_prompt(&ctx);
        assert!(!prompt.contains("Total budget"));
        assert!(!prompt.contains("Preferences"));
        assert!(!prompt.contains("Candidate activities"));
    }

    #[test]
    fn test_day_count_is_inclusive() {
        assert_eq!(context().day_count(), 4);
    }
}
