//! The stage graph, routing rules, and sequential driver for one planning
//! run.
//!
//! All routing lives in [`next_stage`], a pure function of the current stage
//! and the record, so the decision table is testable without executing any
//! stage body. The driver walks stages strictly sequentially and never
//! revisits one; every run ends in exactly one of the three terminal
//! outcomes.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::budget;
use crate::error::{Error, Result};
use crate::generation::{GenerationService, TokenUsage};
use crate::record::PlanningRecord;
use crate::search::SearchProvider;
use crate::selector::{self, SelectionOutcome};
use crate::stages;

/// The finite set of stages a run can pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageId {
    BudgetAnalysis,
    FlightSearch,
    HotelSearch,
    ActivitySearch,
    ItineraryAssembly,
    AlternativeAdvice,
    ErrorHandling,
    Done,
}

/// Central transition table. Rules are evaluated in priority order: a
/// recorded error preempts every forward transition, then the
/// data-dependent branches apply.
pub fn next_stage(current: StageId, record: &PlanningRecord) -> StageId {
    use StageId::*;

    // Rule 1: an error raised inside any non-terminal stage overrides the
    // normal forward transition.
    if record.error.is_some() && !matches!(current, ErrorHandling | Done) {
        return ErrorHandling;
    }

    match current {
        BudgetAnalysis => match record.analysis.as_ref().map(|a| a.feasible) {
            Some(true) => FlightSearch,
            Some(false) => AlternativeAdvice,
            // A completed analysis stage without analysis data is an
            // internal inconsistency; surface it rather than guessing.
            None => ErrorHandling,
        },
        // A missing flight is recorded but never halts the pipeline.
        FlightSearch => HotelSearch,
        HotelSearch => {
            if record.selected_hotel.is_some() {
                ActivitySearch
            } else {
                ItineraryAssembly
            }
        }
        ActivitySearch => ItineraryAssembly,
        ItineraryAssembly | AlternativeAdvice | ErrorHandling | Done => Done,
    }
}

/// Caller-facing input for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub destination: String,
    pub total_budget: f64,
    pub duration_days: u32,
}

/// A completed run: the final record plus observability data.
#[derive(Debug)]
pub struct PlanOutcome {
    pub run_id: Uuid,
    pub record: PlanningRecord,
    /// Stages in execution order, for tracing and tests.
    pub stages_run: Vec<StageId>,
    pub usage: TokenUsage,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Sequential stage driver. Owns the external collaborators; each call to
/// [`Planner::plan`] threads a fresh record through the stage graph.
pub struct Planner {
    search: Box<dyn SearchProvider>,
    generation: Option<Box<dyn GenerationService>>,
    max_tokens: usize,
}

impl Planner {
    pub fn new(
        search: Box<dyn SearchProvider>,
        generation: Option<Box<dyn GenerationService>>,
        max_tokens: usize,
    ) -> Self {
        Self {
            search,
            generation,
            max_tokens,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Invalid input fails here, before any stage executes. Everything else
    /// is converted into one of the three terminal outcomes on the returned
    /// record; this method does not error past that point.
    pub async fn plan(&self, request: PlanRequest) -> Result<PlanOutcome> {
        validate_request(&request)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            %run_id,
            destination = %request.destination,
            budget = request.total_budget,
            days = request.duration_days,
            "planning run started"
        );

        let mut record = PlanningRecord::new(
            request.destination,
            request.total_budget,
            request.duration_days,
        );
        let mut usage = TokenUsage::default();
        let mut stages_run = Vec::new();
        let mut stage = StageId::BudgetAnalysis;

        while stage != StageId::Done {
            record = self.execute_stage(stage, record, &mut usage).await;
            stages_run.push(stage);
            stage = next_stage(stage, &record);
        }

        let completed_at = Utc::now();
        info!(
            %run_id,
            stages = stages_run.len(),
            tokens = usage.total(),
            "planning run finished"
        );

        Ok(PlanOutcome {
            run_id,
            record,
            stages_run,
            usage,
            started_at,
            completed_at,
        })
    }

    /// Execute one stage body. Failures inside a stage land in the record's
    /// error field for the router; they are never propagated as panics or
    /// early returns.
    async fn execute_stage(
        &self,
        stage: StageId,
        record: PlanningRecord,
        usage: &mut TokenUsage,
    ) -> PlanningRecord {
        match stage {
            StageId::BudgetAnalysis => self.analyze_budget(record),
            StageId::FlightSearch => self.search_flights(record).await,
            StageId::HotelSearch => self.search_hotels(record).await,
            StageId::ActivitySearch => self.search_activities(record).await,
            StageId::ItineraryAssembly => {
                let (record, stage_usage) =
                    stages::assemble_itinerary(record, self.generation.as_deref(), self.max_tokens)
                        .await;
                usage.add(stage_usage);
                record
            }
            StageId::AlternativeAdvice => {
                let (record, stage_usage) =
                    stages::advise_alternatives(record, self.generation.as_deref(), self.max_tokens)
                        .await;
                usage.add(stage_usage);
                record
            }
            StageId::ErrorHandling => stages::handle_error(record),
            StageId::Done => record,
        }
    }

    fn analyze_budget(&self, record: PlanningRecord) -> PlanningRecord {
        match budget::analyze(&record.destination, record.total_budget, record.duration_days) {
            Ok(analysis) => record.with_analysis(analysis),
            Err(e) => record.with_error(e.to_string()),
        }
    }

    async fn search_flights(&self, record: PlanningRecord) -> PlanningRecord {
        let Some(ceiling) = record.analysis.as_ref().map(|a| a.breakdown.flights) else {
            return record.with_error("flight search reached without budget analysis");
        };

        let candidates = match self
            .search
            .search_flights(&record.destination, record.duration_days)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "flight search failed, continuing with no candidates");
                Vec::new()
            }
        };

        let outcome = selector::select("flight", &candidates, ceiling, nights(&record));
        let note = outcome.note();
        let selected = outcome.selected().cloned();
        record.with_flights(candidates, selected, note)
    }

    async fn search_hotels(&self, record: PlanningRecord) -> PlanningRecord {
        let Some(ceiling) = record.analysis.as_ref().map(|a| a.breakdown.accommodation) else {
            return record.with_error("hotel search reached without budget analysis");
        };

        let candidates = match self
            .search
            .search_hotels(&record.destination, record.duration_days)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "hotel search failed, continuing with no candidates");
                Vec::new()
            }
        };

        let outcome = selector::select("hotel", &candidates, ceiling, nights(&record));
        let note = outcome.note();
        let selected = outcome.selected().cloned();
        record.with_hotels(candidates, selected, note)
    }

    async fn search_activities(&self, record: PlanningRecord) -> PlanningRecord {
        let Some(ceiling) = record.analysis.as_ref().map(|a| a.breakdown.activities) else {
            return record.with_error("activity search reached without budget analysis");
        };

        let candidates = match self
            .search
            .search_activities(&record.destination, record.duration_days)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "activity search failed, continuing with no candidates");
                Vec::new()
            }
        };

        let outcome = selector::select("activity", &candidates, ceiling, nights(&record));
        let note = match &outcome {
            // An unaffordable activity is pure enrichment; no note needed.
            SelectionOutcome::Selected { .. } => None,
            other => other.note(),
        };
        let selected = outcome.selected().cloned();
        record.with_activities(candidates, selected, note)
    }
}

fn nights(record: &PlanningRecord) -> u32 {
    record.duration_days
}

fn validate_request(request: &PlanRequest) -> Result<()> {
    if request.destination.trim().is_empty() {
        return Err(Error::InvalidInput("destination must not be empty".to_string()));
    }
    if request.total_budget < 0.0 {
        return Err(Error::InvalidInput(format!(
            "budget must be non-negative, got {}",
            request.total_budget
        )));
    }
    if request.duration_days == 0 {
        return Err(Error::InvalidInput(
            "trip duration must be at least one day".to_string(),
        ));
    }
    Ok(())
}

/// Convenience constructor wiring the built-in catalog provider and, when
/// configured, the HTTP generation client.
pub fn planner_from_config(config: &crate::config::Config) -> Result<Planner> {
    let generation: Option<Box<dyn GenerationService>> = if config.generation.api_key.is_some() {
        let client = crate::generation::HttpGenerationClient::from_config(&config.generation)
            .context("failed to build generation client")?;
        Some(Box::new(client))
    } else {
        None
    };

    Ok(Planner::new(
        Box::new(crate::search::CatalogProvider),
        generation,
        config.generation.max_tokens,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Flight, Hotel};

    fn feasible_record() -> PlanningRecord {
        let analysis = budget::analyze("Paris, France", 3000.0, 10).unwrap();
        PlanningRecord::new("Paris, France", 3000.0, 10).with_analysis(analysis)
    }

    fn infeasible_record() -> PlanningRecord {
        let analysis = budget::analyze("Paris, France", 600.0, 10).unwrap();
        PlanningRecord::new("Paris, France", 600.0, 10).with_analysis(analysis)
    }

    #[test]
    fn feasible_budget_routes_to_flight_search() {
        assert_eq!(
            next_stage(StageId::BudgetAnalysis, &feasible_record()),
            StageId::FlightSearch
        );
    }

    #[test]
    fn infeasible_budget_routes_to_alternatives() {
        assert_eq!(
            next_stage(StageId::BudgetAnalysis, &infeasible_record()),
            StageId::AlternativeAdvice
        );
    }

    #[test]
    fn error_preempts_forward_transitions() {
        let record = feasible_record().with_error("boom");

        assert_eq!(
            next_stage(StageId::BudgetAnalysis, &record),
            StageId::ErrorHandling
        );
        assert_eq!(
            next_stage(StageId::FlightSearch, &record),
            StageId::ErrorHandling
        );
        assert_eq!(
            next_stage(StageId::HotelSearch, &record),
            StageId::ErrorHandling
        );
    }

    #[test]
    fn flight_search_always_advances_to_hotels() {
        // No flight selected: the pipeline continues regardless.
        let record = feasible_record().with_flights(vec![], None, Some("none affordable".into()));
        assert_eq!(next_stage(StageId::FlightSearch, &record), StageId::HotelSearch);

        let record = feasible_record().with_flights(
            vec![],
            Some(Flight {
                id: "FL-1".to_string(),
                price: 500.0,
                stops: 0,
            }),
            None,
        );
        assert_eq!(next_stage(StageId::FlightSearch, &record), StageId::HotelSearch);
    }

    #[test]
    fn hotel_selection_gates_activity_search() {
        let with_hotel = feasible_record().with_hotels(
            vec![],
            Some(Hotel {
                id: "HT-1".to_string(),
                nightly_rate: 100.0,
                rating: 4.0,
            }),
            None,
        );
        assert_eq!(
            next_stage(StageId::HotelSearch, &with_hotel),
            StageId::ActivitySearch
        );

        let without_hotel = feasible_record().with_hotels(vec![], None, Some("too pricey".into()));
        assert_eq!(
            next_stage(StageId::HotelSearch, &without_hotel),
            StageId::ItineraryAssembly
        );
    }

    #[test]
    fn terminal_stages_transition_to_done() {
        let record = feasible_record();
        assert_eq!(next_stage(StageId::ItineraryAssembly, &record), StageId::Done);
        assert_eq!(next_stage(StageId::AlternativeAdvice, &record), StageId::Done);

        // ErrorHandling completes even though the error field is set.
        let failed = record.with_error("boom");
        assert_eq!(next_stage(StageId::ErrorHandling, &failed), StageId::Done);
    }

    #[test]
    fn missing_analysis_after_budget_stage_is_an_internal_failure() {
        let record = PlanningRecord::new("Paris, France", 3000.0, 10);
        assert_eq!(
            next_stage(StageId::BudgetAnalysis, &record),
            StageId::ErrorHandling
        );
    }

    #[test]
    fn activity_search_advances_to_itinerary() {
        assert_eq!(
            next_stage(StageId::ActivitySearch, &feasible_record()),
            StageId::ItineraryAssembly
        );
    }
}
