//! The planning record threaded through every stage of a run.
//!
//! Each stage consumes the current record and returns a new one with more
//! fields populated. Input fields are never revised once set, and a record is
//! owned by exactly one run, so stages can be tested in isolation and runs
//! never observe each other.

use serde::{Deserialize, Serialize};

use crate::budget::BudgetAnalysis;

/// A priced flight option returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    /// Total round-trip price.
    pub price: f64,
    pub stops: u32,
}

/// A priced hotel option returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    /// Price per night; total cost is nightly rate times trip nights.
    pub nightly_rate: f64,
    /// Guest rating on a 0.0-5.0 scale.
    pub rating: f64,
}

/// A priced activity option returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub price: f64,
    pub rating: f64,
}

/// Which of the three mutually exclusive terminal stages produced output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOutcome {
    Itinerary,
    Alternatives,
    Error,
    /// No terminal stage has run yet.
    Pending,
}

/// The single evolving state of one trip-planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningRecord {
    pub destination: String,
    pub duration_days: u32,
    pub total_budget: f64,

    /// Populated by the budget analysis stage.
    pub analysis: Option<BudgetAnalysis>,

    /// Full flight candidate list, retained even when nothing is affordable.
    pub flight_options: Vec<Flight>,
    pub selected_flight: Option<Flight>,
    /// Explanation when no flight fit the ceiling.
    pub flight_note: Option<String>,

    pub hotel_options: Vec<Hotel>,
    pub selected_hotel: Option<Hotel>,
    pub hotel_note: Option<String>,

    pub activity_options: Vec<Activity>,
    pub selected_activity: Option<Activity>,
    pub activity_note: Option<String>,

    pub itinerary: Option<String>,
    pub alternatives: Option<String>,
    pub error: Option<String>,
}

impl PlanningRecord {
    /// Create a fresh record holding only the caller's three inputs.
    pub fn new(destination: impl Into<String>, total_budget: f64, duration_days: u32) -> Self {
        Self {
            destination: destination.into(),
            duration_days,
            total_budget,
            ..Default::default()
        }
    }

    pub fn with_analysis(mut self, analysis: BudgetAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_flights(
        mut self,
        options: Vec<Flight>,
        selected: Option<Flight>,
        note: Option<String>,
    ) -> Self {
        self.flight_options = options;
        self.selected_flight = selected;
        self.flight_note = note;
        self
    }

    pub fn with_hotels(
        mut self,
        options: Vec<Hotel>,
        selected: Option<Hotel>,
        note: Option<String>,
    ) -> Self {
        self.hotel_options = options;
        self.selected_hotel = selected;
        self.hotel_note = note;
        self
    }

    pub fn with_activities(
        mut self,
        options: Vec<Activity>,
        selected: Option<Activity>,
        note: Option<String>,
    ) -> Self {
        self.activity_options = options;
        self.selected_activity = selected;
        self.activity_note = note;
        self
    }

    pub fn with_itinerary(mut self, text: String) -> Self {
        self.itinerary = Some(text);
        self
    }

    pub fn with_alternatives(mut self, text: String) -> Self {
        self.alternatives = Some(text);
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Which terminal output this record carries. At most one of the three
    /// fields is ever populated; itinerary and alternatives take precedence
    /// over error only in the sense that they cannot coexist with it.
    pub fn terminal_outcome(&self) -> TerminalOutcome {
        match (&self.itinerary, &self.alternatives, &self.error) {
            (Some(_), None, None) => TerminalOutcome::Itinerary,
            (None, Some(_), None) => TerminalOutcome::Alternatives,
            (None, None, Some(_)) => TerminalOutcome::Error,
            _ => TerminalOutcome::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_holds_only_inputs() {
        let record = PlanningRecord::new("Lisbon, Portugal", 2000.0, 5);

        assert_eq!(record.destination, "Lisbon, Portugal");
        assert_eq!(record.total_budget, 2000.0);
        assert_eq!(record.duration_days, 5);
        assert!(record.analysis.is_none());
        assert!(record.flight_options.is_empty());
        assert_eq!(record.terminal_outcome(), TerminalOutcome::Pending);
    }

    #[test]
    fn terminal_outcomes_are_exclusive() {
        let base = PlanningRecord::new("Lisbon, Portugal", 2000.0, 5);

        let done = base.clone().with_itinerary("Day 1: arrive".to_string());
        assert_eq!(done.terminal_outcome(), TerminalOutcome::Itinerary);

        let advised = base.clone().with_alternatives("Consider Porto".to_string());
        assert_eq!(advised.terminal_outcome(), TerminalOutcome::Alternatives);

        let failed = base.with_error("search provider unreachable");
        assert_eq!(failed.terminal_outcome(), TerminalOutcome::Error);
    }
}
