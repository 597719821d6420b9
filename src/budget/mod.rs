//! Budget feasibility analysis and the four-way budget breakdown.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::regions;

/// Fixed allocation shares. Flights absorb any rounding remainder so the
/// four amounts always sum to the rounded total exactly.
const ACCOMMODATION_SHARE: f64 = 0.35;
const ACTIVITIES_SHARE: f64 = 0.15;
const FOOD_SHARE: f64 = 0.10;

/// Per-category allocation of the total budget, in USD rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub flights: f64,
    pub accommodation: f64,
    pub activities: f64,
    pub food: f64,
}

impl BudgetBreakdown {
    pub fn total(&self) -> f64 {
        self.flights + self.accommodation + self.activities + self.food
    }
}

/// Output of the budget analysis stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    pub region_tag: String,
    pub per_day_minimum: f64,
    /// `per_day_minimum` times trip duration.
    pub minimum_requirement: f64,
    /// True when the total budget covers the minimum requirement. Equality
    /// counts as feasible.
    pub feasible: bool,
    pub breakdown: BudgetBreakdown,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split the budget into the four fixed categories. The three smaller
/// categories are rounded independently and flights take whatever remains,
/// which keeps the sum identical to the rounded total.
pub fn split_budget(total_budget: f64) -> BudgetBreakdown {
    let total = round_cents(total_budget);
    let accommodation = round_cents(total_budget * ACCOMMODATION_SHARE);
    let activities = round_cents(total_budget * ACTIVITIES_SHARE);
    let food = round_cents(total_budget * FOOD_SHARE);
    let flights = round_cents(total - accommodation - activities - food);

    BudgetBreakdown {
        flights,
        accommodation,
        activities,
        food,
    }
}

/// Analyze destination, budget, and duration into the feasibility verdict
/// and budget breakdown.
///
/// Rejects negative budgets and non-positive durations before any stage
/// work happens. An unrecognized destination is not an error; it classifies
/// into the default region.
pub fn analyze(destination: &str, total_budget: f64, duration_days: u32) -> Result<BudgetAnalysis> {
    if total_budget < 0.0 {
        return Err(Error::InvalidInput(format!(
            "budget must be non-negative, got {total_budget}"
        )));
    }
    if duration_days == 0 {
        return Err(Error::InvalidInput(
            "trip duration must be at least one day".to_string(),
        ));
    }

    let rule = regions::classify(destination);
    let minimum_requirement = rule.per_day_minimum * duration_days as f64;
    let feasible = total_budget >= minimum_requirement;

    debug!(
        region = rule.tag,
        minimum_requirement, feasible, "budget analysis complete"
    );

    Ok(BudgetAnalysis {
        region_tag: rule.tag.to_string(),
        per_day_minimum: rule.per_day_minimum,
        minimum_requirement,
        feasible,
        breakdown: split_budget(total_budget),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paris_scenario_matches_published_numbers() {
        let analysis = analyze("Paris, France", 3000.0, 10).unwrap();

        assert_eq!(analysis.region_tag, "europe");
        assert_eq!(analysis.minimum_requirement, 1500.0);
        assert!(analysis.feasible);
        assert_eq!(analysis.breakdown.flights, 1200.00);
        assert_eq!(analysis.breakdown.accommodation, 1050.00);
        assert_eq!(analysis.breakdown.activities, 450.00);
        assert_eq!(analysis.breakdown.food, 300.00);
    }

    #[test]
    fn feasibility_is_independent_of_breakdown() {
        // 800 covers the 700 minimum even though the flights share alone
        // would not buy a realistic ticket. The two computations must not
        // be conflated.
        let analysis = analyze("Tokyo, Japan", 800.0, 7).unwrap();

        assert_eq!(analysis.region_tag, "asia");
        assert_eq!(analysis.minimum_requirement, 700.0);
        assert!(analysis.feasible);
        assert_eq!(analysis.breakdown.flights, 320.00);
    }

    #[test]
    fn budget_equal_to_minimum_is_feasible() {
        let analysis = analyze("Paris, France", 1500.0, 10).unwrap();
        assert!(analysis.feasible);

        let analysis = analyze("Paris, France", 1499.99, 10).unwrap();
        assert!(!analysis.feasible);
    }

    #[test]
    fn negative_budget_is_rejected() {
        let err = analyze("Paris, France", -100.0, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = analyze("Paris, France", 1000.0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn breakdown_sums_to_rounded_total_across_awkward_budgets() {
        for budget in [0.0, 0.01, 0.07, 1.0, 99.99, 333.33, 1234.56, 100000.01] {
            let breakdown = split_budget(budget);
            let rounded_total = (budget * 100.0_f64).round() / 100.0;

            assert!(
                (breakdown.total() - rounded_total).abs() < 1e-9,
                "sum {} != total {} for budget {}",
                breakdown.total(),
                rounded_total,
                budget
            );
            assert!(breakdown.flights >= 0.0);
            assert!(breakdown.accommodation >= 0.0);
            assert!(breakdown.activities >= 0.0);
            assert!(breakdown.food >= 0.0);
        }
    }

    #[test]
    fn unknown_destination_does_not_fail() {
        let analysis = analyze("Atlantis", 1000.0, 5).unwrap();
        assert_eq!(analysis.region_tag, "other");
        assert_eq!(analysis.minimum_requirement, 375.0);
    }
}
