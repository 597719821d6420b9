//! Mock search provider and generation service for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::generation::{Generated, GenerationError, GenerationRequest, GenerationService, TokenUsage};
use crate::record::{Activity, Flight, Hotel};
use crate::search::SearchProvider;

/// Search provider returning fixed candidate lists.
#[derive(Default)]
pub struct MockSearchProvider {
    pub flights: Vec<Flight>,
    pub hotels: Vec<Hotel>,
    pub activities: Vec<Activity>,
    /// When set, every search call errors to exercise the degradation path.
    pub fail: bool,
}

impl MockSearchProvider {
    pub fn new(flights: Vec<Flight>, hotels: Vec<Hotel>, activities: Vec<Activity>) -> Self {
        Self {
            flights,
            hotels,
            activities,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search_flights(&self, _destination: &str, _duration_days: u32) -> Result<Vec<Flight>> {
        if self.fail {
            return Err(Error::Search("mock flight search failure".to_string()));
        }
        Ok(self.flights.clone())
    }

    async fn search_hotels(&self, _destination: &str, _duration_days: u32) -> Result<Vec<Hotel>> {
        if self.fail {
            return Err(Error::Search("mock hotel search failure".to_string()));
        }
        Ok(self.hotels.clone())
    }

    async fn search_activities(
        &self,
        _destination: &str,
        _duration_days: u32,
    ) -> Result<Vec<Activity>> {
        if self.fail {
            return Err(Error::Search("mock activity search failure".to_string()));
        }
        Ok(self.activities.clone())
    }
}

/// Generation service with a canned response or a permanent failure mode.
/// Counts calls so tests can assert the one-call-per-invocation-point rule.
pub struct MockGenerationService {
    response: Option<String>,
    calls: AtomicUsize,
}

impl MockGenerationService {
    pub fn with_response(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<Generated, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.response {
            Some(text) => Ok(Generated {
                text: text.clone(),
                usage: TokenUsage {
                    input_tokens: request.prompt.len() / 4,
                    output_tokens: text.len() / 4,
                },
                model: "mock-model".to_string(),
            }),
            None => Err(GenerationError::Unavailable(
                "mock generation failure".to_string(),
            )),
        }
    }
}
