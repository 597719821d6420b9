//! Deterministic candidate selection under a category budget ceiling.
//!
//! The same algorithm serves flights, hotels, and activities: filter to
//! candidates whose total trip cost fits the ceiling, then take the
//! lowest-scoring survivor. Running out of affordable candidates is a normal
//! outcome, not an error; the caller keeps the full list either way.

use serde::Serialize;
use tracing::debug;

use crate::record::{Activity, Flight, Hotel};

/// A candidate the selector can rank. `total_cost` is the cost of carrying
/// this candidate for the whole trip; `score` is lower-is-better.
pub trait RankedCandidate: Clone {
    fn id(&self) -> &str;
    fn total_cost(&self, nights: u32) -> f64;
    fn score(&self) -> f64;
}

impl RankedCandidate for Flight {
    fn id(&self) -> &str {
        &self.id
    }

    // Flight prices are already trip totals.
    fn total_cost(&self, _nights: u32) -> f64 {
        self.price
    }

    /// Lower price and fewer stops both reduce the score.
    fn score(&self) -> f64 {
        self.price * 0.7 + self.stops as f64 * 100.0
    }
}

impl RankedCandidate for Hotel {
    fn id(&self) -> &str {
        &self.id
    }

    fn total_cost(&self, nights: u32) -> f64 {
        self.nightly_rate * nights as f64
    }

    /// Higher rating dominates; nightly price breaks ranks between
    /// similarly rated hotels.
    fn score(&self) -> f64 {
        self.rating * -100.0 + self.nightly_rate
    }
}

impl RankedCandidate for Activity {
    fn id(&self) -> &str {
        &self.id
    }

    fn total_cost(&self, _nights: u32) -> f64 {
        self.price
    }

    fn score(&self) -> f64 {
        self.price - self.rating * 50.0
    }
}

/// Result of one selection pass.
#[derive(Debug, Clone, Serialize)]
pub enum SelectionOutcome<C> {
    Selected { choice: C, score: f64 },
    /// Nothing fit under the ceiling. Carries the price of the cheapest
    /// candidate so the message can name the gap.
    NoneAffordable { cheapest: f64, message: String },
    /// The provider returned no candidates at all.
    NoCandidates,
}

impl<C> SelectionOutcome<C> {
    pub fn selected(&self) -> Option<&C> {
        match self {
            SelectionOutcome::Selected { choice, .. } => Some(choice),
            _ => None,
        }
    }

    pub fn note(&self) -> Option<String> {
        match self {
            SelectionOutcome::Selected { .. } => None,
            SelectionOutcome::NoneAffordable { message, .. } => Some(message.clone()),
            SelectionOutcome::NoCandidates => Some("no candidates returned".to_string()),
        }
    }
}

/// Pick the best affordable candidate for one budget category.
///
/// Deterministic: score ties break on the lexicographically smallest id, so
/// repeated runs over the same list always agree regardless of input order.
pub fn select<C: RankedCandidate>(
    category: &str,
    candidates: &[C],
    ceiling: f64,
    nights: u32,
) -> SelectionOutcome<C> {
    if candidates.is_empty() {
        debug!(category, "selector received no candidates");
        return SelectionOutcome::NoCandidates;
    }

    let affordable: Vec<&C> = candidates
        .iter()
        .filter(|c| c.total_cost(nights) <= ceiling)
        .collect();

    if affordable.is_empty() {
        let cheapest = candidates
            .iter()
            .map(|c| c.total_cost(nights))
            .fold(f64::INFINITY, f64::min);
        let message = format!(
            "no affordable {category}: cheapest option costs {cheapest:.2} against a {ceiling:.2} ceiling"
        );
        debug!(category, cheapest, ceiling, "no affordable candidate");
        return SelectionOutcome::NoneAffordable { cheapest, message };
    }

    let best = affordable
        .into_iter()
        .min_by(|a, b| {
            a.score()
                .total_cmp(&b.score())
                .then_with(|| a.id().cmp(b.id()))
        })
        .expect("affordable list is non-empty");

    debug!(category, id = best.id(), score = best.score(), "candidate selected");
    SelectionOutcome::Selected {
        choice: best.clone(),
        score: best.score(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(id: &str, price: f64, stops: u32) -> Flight {
        Flight {
            id: id.to_string(),
            price,
            stops,
        }
    }

    fn hotel(id: &str, nightly_rate: f64, rating: f64) -> Hotel {
        Hotel {
            id: id.to_string(),
            nightly_rate,
            rating,
        }
    }

    #[test]
    fn direct_flight_beats_cheaper_one_stop() {
        // 500 * 0.7 = 350 vs 450 * 0.7 + 100 = 415.
        let candidates = vec![flight("FL-1", 500.0, 0), flight("FL-2", 450.0, 1)];
        let outcome = select("flight", &candidates, 600.0, 7);

        let choice = outcome.selected().unwrap();
        assert_eq!(choice.id, "FL-1");
        assert_eq!(choice.price, 500.0);
    }

    #[test]
    fn selection_never_exceeds_ceiling() {
        let candidates = vec![
            flight("FL-1", 900.0, 0),
            flight("FL-2", 450.0, 1),
            flight("FL-3", 500.0, 2),
        ];
        let outcome = select("flight", &candidates, 600.0, 7);

        let choice = outcome.selected().unwrap();
        assert!(choice.price <= 600.0);
        assert_eq!(choice.id, "FL-2");
    }

    #[test]
    fn no_affordable_candidate_names_the_gap() {
        let candidates = vec![flight("FL-1", 900.0, 0), flight("FL-2", 750.0, 1)];
        let outcome = select("flight", &candidates, 600.0, 7);

        assert!(outcome.selected().is_none());
        match outcome {
            SelectionOutcome::NoneAffordable { cheapest, message } => {
                assert_eq!(cheapest, 750.0);
                assert!(message.contains("750.00"));
                assert!(message.contains("600.00"));
            }
            other => panic!("expected NoneAffordable, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidate_list_is_its_own_outcome() {
        let outcome = select::<Flight>("flight", &[], 600.0, 7);
        assert!(matches!(outcome, SelectionOutcome::NoCandidates));
    }

    #[test]
    fn hotel_rating_dominates_price() {
        // 4.5-star at 180: score -270. 3.0-star at 90: score -210.
        let candidates = vec![hotel("HT-1", 90.0, 3.0), hotel("HT-2", 180.0, 4.5)];
        let outcome = select("hotel", &candidates, 2000.0, 7);

        assert_eq!(outcome.selected().unwrap().id, "HT-2");
    }

    #[test]
    fn hotel_cost_is_nightly_rate_times_nights() {
        // 200/night for 7 nights is 1400, over a 1000 ceiling.
        let candidates = vec![hotel("HT-1", 200.0, 5.0), hotel("HT-2", 120.0, 3.5)];
        let outcome = select("hotel", &candidates, 1000.0, 7);

        assert_eq!(outcome.selected().unwrap().id, "HT-2");
    }

    #[test]
    fn score_ties_break_on_lowest_id() {
        // Identical price and stops, so identical scores.
        let candidates = vec![flight("FL-B", 400.0, 1), flight("FL-A", 400.0, 1)];
        let outcome = select("flight", &candidates, 600.0, 7);
        assert_eq!(outcome.selected().unwrap().id, "FL-A");

        // Same list, reversed order: same winner.
        let reversed = vec![flight("FL-A", 400.0, 1), flight("FL-B", 400.0, 1)];
        let outcome = select("flight", &reversed, 600.0, 7);
        assert_eq!(outcome.selected().unwrap().id, "FL-A");
    }

    #[test]
    fn selection_is_deterministic_across_runs() {
        let candidates = vec![
            flight("FL-1", 520.0, 1),
            flight("FL-2", 480.0, 2),
            flight("FL-3", 610.0, 0),
        ];
        let first = select("flight", &candidates, 700.0, 7);
        for _ in 0..10 {
            let again = select("flight", &candidates, 700.0, 7);
            assert_eq!(
                first.selected().map(|f| f.id.clone()),
                again.selected().map(|f| f.id.clone())
            );
        }
    }
}
