//! Plan requests: prompt in, candidate places out.

use std::ops::RangeInclusive;

use thiserror::Error;
use tracing::{debug, info};

use crate::builder::build_itinerary;
use crate::place::{parse_locations, Destination, Itinerary, Place};
use crate::prompt::build_prompt;
use crate::traits::{GenerationError, GenerationService, ReferenceSource};

/// Allowed range for both place counts.
pub const COUNT_RANGE: RangeInclusive<u8> = 1..=10;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid trip request: {0}")]
    InvalidRequest(String),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("could not parse generated plan: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("generated plan contains no places")]
    EmptyItinerary,
}

/// Everything the user chose for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub destination: Destination,
    pub reference_urls: Vec<String>,
    pub must_visit_count: u8,
    pub optional_count: u8,
    pub refinement: Option<String>,
}

impl TripRequest {
    /// Request for `destination` with five places of each category.
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            reference_urls: Vec::new(),
            must_visit_count: 5,
            optional_count: 5,
            refinement: None,
        }
    }

    /// Sets the sites the model is pointed at.
    pub fn with_reference_urls(mut self, urls: Vec<String>) -> Self {
        self.reference_urls = urls;
        self
    }

    /// Sets how many must-visit and optional places to ask for.
    pub fn with_counts(mut self, must_visit: u8, optional: u8) -> Self {
        self.must_visit_count = must_visit;
        self.optional_count = optional;
        self
    }

    /// Adds a follow-up instruction, e.g. "skip museums".
    pub fn with_refinement(mut self, refinement: impl Into<String>) -> Self {
        self.refinement = Some(refinement.into());
        self
    }

    /// Checks both counts are within [`COUNT_RANGE`] and the city is not blank.
    ///
    /// Runs before any service call.
    pub fn validate(&self) -> Result<(), PlanError> {
        for (label, count) in [
            ("must-visit", self.must_visit_count),
            ("optional", self.optional_count),
        ] {
            if !COUNT_RANGE.contains(&count) {
                return Err(PlanError::InvalidRequest(format!(
                    "{label} count {count} is outside {}..={}",
                    COUNT_RANGE.start(),
                    COUNT_RANGE.end()
                )));
            }
        }
        if self.destination.city.is_empty() {
            return Err(PlanError::InvalidRequest("city is empty".to_string()));
        }
        Ok(())
    }
}

/// Splits a comma-separated list of URLs, dropping blanks.
pub fn parse_reference_urls(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drives one generation: reference lookup, prompt, service call, parse.
#[derive(Debug, Clone)]
pub struct PlanOrchestrator<G, R> {
    generator: G,
    references: R,
}

impl<G, R> PlanOrchestrator<G, R>
where
    G: GenerationService,
    R: ReferenceSource,
{
    /// Wires a generation service to a reference source.
    pub fn new(generator: G, references: R) -> Self {
        Self {
            generator,
            references,
        }
    }

    /// Returns the unordered candidates exactly as the service listed them.
    pub fn request_candidates(&self, request: &TripRequest) -> Result<Vec<Place>, PlanError> {
        request.validate()?;

        let reference = self.references.reference_text(&request.destination);
        let prompt = build_prompt(request, &reference);
        debug!(
            destination = %request.destination,
            prompt_chars = prompt.chars().count(),
            refined = request.refinement.is_some(),
            "built prompt"
        );

        let response = self.generator.generate_json(&prompt)?;
        let places = parse_locations(&response).map_err(PlanError::Parse)?;
        debug!(candidates = places.len(), "parsed candidates");
        Ok(places)
    }

    /// Requests candidates and orders them into an itinerary.
    pub fn plan(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        let candidates = self.request_candidates(request)?;
        if candidates.is_empty() {
            return Err(PlanError::EmptyItinerary);
        }
        let itinerary = build_itinerary(candidates);
        info!(destination = %request.destination, places = itinerary.len(), "generated plan");
        Ok(itinerary)
    }
}
