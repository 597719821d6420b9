//! Search provider abstraction for flights, hotels, and activities.
//!
//! The planner trusts whatever prices and ratings the provider returns and
//! treats an empty result set as a valid answer. Provider errors are caught
//! at the calling stage and downgraded to empty lists there, so a flaky
//! provider degrades a run instead of failing it.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{Activity, Flight, Hotel};

/// External search collaborator for priced trip candidates.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_flights(&self, destination: &str, duration_days: u32) -> Result<Vec<Flight>>;

    async fn search_hotels(&self, destination: &str, duration_days: u32) -> Result<Vec<Hotel>>;

    async fn search_activities(
        &self,
        destination: &str,
        duration_days: u32,
    ) -> Result<Vec<Activity>>;
}

/// Built-in deterministic provider.
///
/// Prices scale off the destination's per-day minimum so sample data stays
/// plausible across regions, and ids are stable so selections are
/// reproducible run to run.
pub struct CatalogProvider;

#[async_trait]
impl SearchProvider for CatalogProvider {
    async fn search_flights(&self, destination: &str, _duration_days: u32) -> Result<Vec<Flight>> {
        let base = crate::regions::classify(destination).per_day_minimum;
        Ok(vec![
            Flight {
                id: "FL-100".to_string(),
                price: base * 6.0,
                stops: 0,
            },
            Flight {
                id: "FL-200".to_string(),
                price: base * 4.5,
                stops: 1,
            },
            Flight {
                id: "FL-300".to_string(),
                price: base * 3.5,
                stops: 2,
            },
        ])
    }

    async fn search_hotels(&self, destination: &str, _duration_days: u32) -> Result<Vec<Hotel>> {
        let base = crate::regions::classify(destination).per_day_minimum;
        Ok(vec![
            Hotel {
                id: "HT-100".to_string(),
                nightly_rate: base * 1.2,
                rating: 4.6,
            },
            Hotel {
                id: "HT-200".to_string(),
                nightly_rate: base * 0.8,
                rating: 4.1,
            },
            Hotel {
                id: "HT-300".to_string(),
                nightly_rate: base * 0.5,
                rating: 3.4,
            },
        ])
    }

    async fn search_activities(
        &self,
        destination: &str,
        _duration_days: u32,
    ) -> Result<Vec<Activity>> {
        let base = crate::regions::classify(destination).per_day_minimum;
        Ok(vec![
            Activity {
                id: "AC-100".to_string(),
                price: base * 0.9,
                rating: 4.8,
            },
            Activity {
                id: "AC-200".to_string(),
                price: base * 0.4,
                rating: 4.2,
            },
            Activity {
                id: "AC-300".to_string(),
                price: base * 0.2,
                rating: 3.9,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn catalog_prices_scale_with_region() {
        let provider = CatalogProvider;

        let paris = provider.search_flights("Paris, France", 10).await.unwrap();
        let tokyo = provider.search_flights("Tokyo, Japan", 10).await.unwrap();

        // Europe's per-day minimum (150) is above Asia's (100), so every
        // price tier should be proportionally higher.
        assert_eq!(paris[0].price, 900.0);
        assert_eq!(tokyo[0].price, 600.0);
    }

    #[tokio::test]
    async fn catalog_is_deterministic() {
        let provider = CatalogProvider;

        let first = provider.search_hotels("Rome, Italy", 7).await.unwrap();
        let second = provider.search_hotels("Rome, Italy", 7).await.unwrap();

        assert_eq!(first, second);
    }
}
