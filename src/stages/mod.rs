//! Terminal stage bodies: itinerary assembly, alternative advice, and error
//! handling.
//!
//! The two generation-backed stages follow the same two-path contract: one
//! attempt against the external service, then a pure templated fallback that
//! needs nothing outside the record. A generation failure can therefore
//! never fail a run.

use tracing::{info, warn};

use crate::generation::{
    alternatives_prompt, itinerary_prompt, GenerationRequest, GenerationService, TokenUsage,
};
use crate::record::PlanningRecord;

/// Assemble the itinerary, preferring the generation service and degrading
/// to the deterministic template. Returns the extended record plus whatever
/// token usage the service reported.
pub async fn assemble_itinerary(
    record: PlanningRecord,
    service: Option<&dyn GenerationService>,
    max_tokens: usize,
) -> (PlanningRecord, TokenUsage) {
    if let Some(service) = service {
        let request = GenerationRequest {
            prompt: itinerary_prompt(&record),
            max_tokens,
        };
        match service.generate(request).await {
            Ok(generated) => {
                info!(
                    tokens = generated.usage.total(),
                    model = %generated.model,
                    "itinerary generated"
                );
                let usage = generated.usage;
                return (record.with_itinerary(generated.text), usage);
            }
            Err(e) => {
                warn!(error = %e, "generation failed, using templated itinerary");
            }
        }
    }

    let text = fallback_itinerary(&record);
    (record.with_itinerary(text), TokenUsage::default())
}

/// Advise on alternatives for an infeasible budget, preferring the
/// generation service and degrading to the deterministic template.
pub async fn advise_alternatives(
    record: PlanningRecord,
    service: Option<&dyn GenerationService>,
    max_tokens: usize,
) -> (PlanningRecord, TokenUsage) {
    if let Some(service) = service {
        let request = GenerationRequest {
            prompt: alternatives_prompt(&record),
            max_tokens,
        };
        match service.generate(request).await {
            Ok(generated) => {
                info!(
                    tokens = generated.usage.total(),
                    model = %generated.model,
                    "alternatives generated"
                );
                let usage = generated.usage;
                return (record.with_alternatives(generated.text), usage);
            }
            Err(e) => {
                warn!(error = %e, "generation failed, using templated alternatives");
            }
        }
    }

    let text = fallback_alternatives(&record);
    (record.with_alternatives(text), TokenUsage::default())
}

/// Convert whatever error an upstream stage recorded into the single
/// user-facing terminal message.
pub fn handle_error(record: PlanningRecord) -> PlanningRecord {
    let cause = record
        .error
        .clone()
        .unwrap_or_else(|| "unknown failure".to_string());
    let message = format!(
        "Trip planning for {} could not be completed: {cause}",
        record.destination
    );
    record.with_error(message)
}

/// Deterministic itinerary used when the generation service is unavailable.
pub fn fallback_itinerary(record: &PlanningRecord) -> String {
    let mut text = format!(
        "Itinerary for {} ({} days)\n",
        record.destination, record.duration_days
    );

    match &record.selected_flight {
        Some(flight) => {
            text.push_str(&format!(
                "Travel: flight {} (${:.2}, {} stop(s))\n",
                flight.id, flight.price, flight.stops
            ));
        }
        None => text.push_str("Travel: no flight selected within budget\n"),
    }

    match &record.selected_hotel {
        Some(hotel) => {
            text.push_str(&format!(
                "Stay: hotel {} (${:.2}/night, rated {:.1})\n",
                hotel.id, hotel.nightly_rate, hotel.rating
            ));
        }
        None => text.push_str("Stay: no hotel selected within budget\n"),
    }

    for day in 1..=record.duration_days {
        let line = match day {
            1 => format!("Day 1: arrive in {} and settle in\n", record.destination),
            d if d == record.duration_days => format!("Day {d}: depart {}\n", record.destination),
            2 => {
                if let Some(activity) = &record.selected_activity {
                    format!("Day 2: {} (${:.2})\n", activity.id, activity.price)
                } else {
                    "Day 2: explore the main sights\n".to_string()
                }
            }
            d => format!("Day {d}: free day for local exploration\n"),
        };
        text.push_str(&line);
    }

    text
}

/// Deterministic alternatives list covering cheaper destinations, shorter
/// durations, and cost tactics, built only from record fields.
pub fn fallback_alternatives(record: &PlanningRecord) -> String {
    let (minimum, per_day) = record
        .analysis
        .as_ref()
        .map(|a| (a.minimum_requirement, a.per_day_minimum))
        .unwrap_or_default();
    let deficit = minimum - record.total_budget;

    let affordable_days = if per_day > 0.0 {
        (record.total_budget / per_day).floor() as u32
    } else {
        0
    };

    let mut text = format!(
        "Your ${:.2} budget is ${:.2} short of the estimated ${:.2} minimum \
         for {} days in {}.\n\nOptions:\n",
        record.total_budget, deficit, minimum, record.duration_days, record.destination
    );
    text.push_str(
        "1. Cheaper destinations: consider regions with lower daily costs, \
         such as Southeast Asia, South America, or Eastern Europe.\n",
    );
    if affordable_days >= 1 {
        text.push_str(&format!(
            "2. Shorter trip: about {} day(s) in {} fits your current budget.\n",
            affordable_days, record.destination
        ));
    } else {
        text.push_str(
            "2. Shorter trip: even one day exceeds this budget here; pair a \
             cheaper destination with a shorter stay.\n",
        );
    }
    text.push_str(
        "3. Cut costs: travel off-season, book flights with stops, choose \
         hostels or apartments, and plan meals outside tourist areas.\n",
    );

    text
}
