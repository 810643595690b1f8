//! Core seams for the tour planner.
//!
//! The external collaborators (the generation service and the local
//! reference material) sit behind these traits so the pipeline can be
//! driven by stubs in tests.

use thiserror::Error;

use crate::place::Destination;

/// Anything with a (lat, lng) position.
pub trait Located {
    /// Location coordinates (lat, lng).
    fn location(&self) -> (f64, f64);
}

/// Distance between two (lat, lng) points.
///
/// Only relative ordering matters to the itinerary builder, so a metric
/// is free to skip the square root.
pub trait DistanceMetric {
    fn distance(&self, from: (f64, f64), to: (f64, f64)) -> f64;
}

/// Errors raised while talking to a generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode generation response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("generation service returned no text ({0})")]
    EmptyResponse(String),
}

/// A service that turns a prompt into a JSON document.
pub trait GenerationService {
    /// Sends `prompt` and returns the raw JSON text of the reply.
    fn generate_json(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Best-effort local reference text for a destination.
///
/// Never fails: when nothing is available the returned string explains why.
pub trait ReferenceSource {
    fn reference_text(&self, destination: &Destination) -> String;
}

impl<T: GenerationService + ?Sized> GenerationService for &T {
    fn generate_json(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate_json(prompt)
    }
}

impl<T: ReferenceSource + ?Sized> ReferenceSource for &T {
    fn reference_text(&self, destination: &Destination) -> String {
        (**self).reference_text(destination)
    }
}
