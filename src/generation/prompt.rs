//! Prompt construction for the two generation call sites.
//!
//! Prompts carry only fields already present in the record, rendered into a
//! structured description the service can expand into prose.

use std::fmt::Write;

use crate::record::PlanningRecord;

/// Prompt for the itinerary assembler. Tolerates missing flight and hotel
/// selections; the service is told what could not be booked.
pub fn itinerary_prompt(record: &PlanningRecord) -> String {
    let mut prompt = format!(
        "Create a day-by-day itinerary for a {} day trip to {}.\n",
        record.duration_days, record.destination
    );

    match &record.selected_flight {
        Some(flight) => {
            let _ = writeln!(
                prompt,
                "Flight: {} at ${:.2} with {} stop(s).",
                flight.id, flight.price, flight.stops
            );
        }
        None => {
            let _ = writeln!(prompt, "No flight is booked yet; note that travel is unarranged.");
        }
    }

    match &record.selected_hotel {
        Some(hotel) => {
            let _ = writeln!(
                prompt,
                "Hotel: {} at ${:.2}/night, rated {:.1}.",
                hotel.id, hotel.nightly_rate, hotel.rating
            );
        }
        None => {
            let _ = writeln!(prompt, "No hotel fit the budget; suggest lodging strategies.");
        }
    }

    if let Some(activity) = &record.selected_activity {
        let _ = writeln!(
            prompt,
            "Planned activity: {} at ${:.2}, rated {:.1}.",
            activity.id, activity.price, activity.rating
        );
    }

    if let Some(analysis) = &record.analysis {
        let b = &analysis.breakdown;
        let _ = writeln!(
            prompt,
            "Budget split: flights ${:.2}, accommodation ${:.2}, activities ${:.2}, food ${:.2}.",
            b.flights, b.accommodation, b.activities, b.food
        );
    }

    prompt.push_str("Structure the answer as one short paragraph per day.");
    prompt
}

/// Prompt for the alternative advisor, anchored on the budget deficit.
pub fn alternatives_prompt(record: &PlanningRecord) -> String {
    let minimum = record
        .analysis
        .as_ref()
        .map(|a| a.minimum_requirement)
        .unwrap_or_default();
    let deficit = minimum - record.total_budget;

    format!(
        "A traveler wants {} days in {} on a ${:.2} budget, but the estimated \
         minimum for that trip is ${:.2}, leaving a ${:.2} shortfall.\n\
         Suggest: cheaper alternative destinations, shorter trip durations \
         that fit the budget, and practical ways to cut costs.",
        record.duration_days, record.destination, record.total_budget, minimum, deficit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget;
    use crate::record::{Flight, Hotel};

    #[test]
    fn itinerary_prompt_includes_selections_and_breakdown() {
        let analysis = budget::analyze("Paris, France", 3000.0, 10).unwrap();
        let record = PlanningRecord::new("Paris, France", 3000.0, 10)
            .with_analysis(analysis)
            .with_flights(
                vec![],
                Some(Flight {
                    id: "FL-100".to_string(),
                    price: 900.0,
                    stops: 0,
                }),
                None,
            )
            .with_hotels(
                vec![],
                Some(Hotel {
                    id: "HT-200".to_string(),
                    nightly_rate: 120.0,
                    rating: 4.1,
                }),
                None,
            );

        let prompt = itinerary_prompt(&record);
        assert!(prompt.contains("10 day trip to Paris, France"));
        assert!(prompt.contains("FL-100"));
        assert!(prompt.contains("HT-200"));
        assert!(prompt.contains("flights $1200.00"));
    }

    #[test]
    fn itinerary_prompt_mentions_missing_hotel() {
        let record = PlanningRecord::new("Paris, France", 3000.0, 10);
        let prompt = itinerary_prompt(&record);
        assert!(prompt.contains("No hotel fit the budget"));
    }

    #[test]
    fn alternatives_prompt_names_the_deficit() {
        let analysis = budget::analyze("Paris, France", 1000.0, 10).unwrap();
        let record = PlanningRecord::new("Paris, France", 1000.0, 10).with_analysis(analysis);

        let prompt = alternatives_prompt(&record);
        assert!(prompt.contains("$1500.00"));
        assert!(prompt.contains("$500.00 shortfall"));
    }
}
