//! Prompt assembly for itinerary generation.

use crate::orchestrator::TripRequest;
use crate::reference::{truncate_chars, MAX_REFERENCE_CHARS};

/// Builds the single instruction sent to the generation service.
///
/// `local_reference` is cut to [`MAX_REFERENCE_CHARS`] characters.
pub fn build_prompt(request: &TripRequest, local_reference: &str) -> String {
    let destination = &request.destination;
    let reference = truncate_chars(local_reference, MAX_REFERENCE_CHARS);
    let sources = if request.reference_urls.is_empty() {
        "none".to_string()
    } else {
        request.reference_urls.join(", ")
    };
    let refinement = match request.refinement.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!("\nAdditional request: {text}"),
        _ => String::new(),
    };

    format!(
        r#"You are a professional travel guide. Plan a trip to {city}, {country}.
Reference sources: {sources}
Local material: {reference}{refinement}

Requirements:
1. Select {must} "must-visit" places and {optional} "optional" places. Arrange them in the most
   geographically efficient visiting order (consider a traveling-salesman style route) and
   number them starting from 1.
2. Keep the route from doubling back; consider both straight-line distance and the actual
   road network between places.
3. Coordinates (latitude, longitude) must match the real location shown on Google Maps.
   Give them with 6 decimal places and make sure they are geographically accurate.
4. Answer only with a single JSON object in exactly this shape:
{{
  "locations": [
    {{
      "sequence_number": 1,
      "category": "must-visit" or "optional",
      "name": "place name",
      "latitude": 0.000000,
      "longitude": 0.000000,
      "description": "description (reservation / admission / visiting tips)",
      "price_hint": "admission fee",
      "reservation_hint": "whether a reservation is needed"
    }}
  ]
}}"#,
        city = destination.city,
        country = destination.country,
        must = request.must_visit_count,
        optional = request.optional_count,
    )
}
