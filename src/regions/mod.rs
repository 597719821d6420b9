//! Destination classification against a fixed, ordered region table.
//!
//! Rules are evaluated top to bottom and the first keyword hit wins, so
//! precedence is the table order and nothing else. Matching is
//! case-insensitive substring matching against the raw destination text.
//! Lookup never fails: the final rule is an explicit catch-all.

use serde::Serialize;

/// One row of the region table.
#[derive(Debug, Clone, Serialize)]
pub struct RegionRule {
    pub tag: &'static str,
    /// Baseline daily cost used for the feasibility check, in USD.
    pub per_day_minimum: f64,
    keywords: &'static [&'static str],
}

/// Ordered region rules. More specific regions come before cheaper,
/// broader ones; the trailing default matches everything.
static REGION_RULES: &[RegionRule] = &[
    RegionRule {
        tag: "europe",
        per_day_minimum: 150.0,
        keywords: &[
            "paris", "france", "london", "united kingdom", "rome", "italy", "barcelona",
            "madrid", "spain", "amsterdam", "netherlands", "berlin", "germany", "vienna",
            "austria", "lisbon", "portugal", "prague", "athens", "greece", "switzerland",
        ],
    },
    RegionRule {
        tag: "north_america",
        per_day_minimum: 140.0,
        keywords: &[
            "new york", "los angeles", "san francisco", "chicago", "miami", "usa",
            "united states", "toronto", "vancouver", "canada", "mexico city", "cancun",
            "mexico",
        ],
    },
    RegionRule {
        tag: "oceania",
        per_day_minimum: 130.0,
        keywords: &[
            "sydney", "melbourne", "australia", "auckland", "queenstown", "new zealand",
            "fiji",
        ],
    },
    RegionRule {
        tag: "middle_east",
        per_day_minimum: 110.0,
        keywords: &["dubai", "abu dhabi", "uae", "doha", "qatar", "israel", "jordan"],
    },
    RegionRule {
        tag: "asia",
        per_day_minimum: 100.0,
        keywords: &[
            "tokyo", "kyoto", "osaka", "japan", "seoul", "korea", "beijing", "shanghai",
            "china", "taipei", "taiwan", "bangkok", "thailand", "hanoi", "vietnam",
            "singapore", "kuala lumpur", "malaysia", "bali", "indonesia", "manila",
            "philippines", "delhi", "mumbai", "india",
        ],
    },
    RegionRule {
        tag: "south_america",
        per_day_minimum: 90.0,
        keywords: &[
            "rio", "sao paulo", "brazil", "buenos aires", "argentina", "lima", "peru",
            "bogota", "colombia", "santiago", "chile", "quito", "ecuador",
        ],
    },
    RegionRule {
        tag: "africa",
        per_day_minimum: 80.0,
        keywords: &[
            "cairo", "egypt", "marrakech", "morocco", "cape town", "johannesburg",
            "south africa", "nairobi", "kenya", "zanzibar", "tanzania",
        ],
    },
    // Catch-all: the least restrictive daily minimum, so an unrecognized
    // destination is never rejected by classification alone.
    RegionRule {
        tag: "other",
        per_day_minimum: 75.0,
        keywords: &[""],
    },
];

/// Classify a destination. Always returns a rule; unrecognized text lands on
/// the trailing default.
pub fn classify(destination: &str) -> &'static RegionRule {
    let normalized = destination.to_lowercase();
    REGION_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| normalized.contains(kw)))
        .expect("region table ends with a catch-all rule")
}
