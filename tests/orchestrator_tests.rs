//! Plan request tests against a scripted generation service.

mod fixtures;

use tour_guide::orchestrator::{PlanError, PlanOrchestrator, TripRequest};
use tour_guide::place::{Category, Country, Destination};
use tour_guide::reference::MAX_REFERENCE_CHARS;

use fixtures::{locations_json, FixedReference, ScriptedGenerator, LISBON, MADRID};

fn madrid_request() -> TripRequest {
    TripRequest::new(Destination::new(Country::Spain, "Madrid"))
        .with_reference_urls(vec!["https://www.spain.info".to_string()])
        .with_counts(5, 5)
}

#[test]
fn test_candidates_are_returned_unordered() {
    let generator = ScriptedGenerator::new().respond(locations_json(MADRID));
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference("guidebook"));

    let candidates = orchestrator.request_candidates(&madrid_request()).expect("candidates");
    let names: Vec<&str> = candidates.iter().map(|p| p.name.as_str()).collect();
    let expected: Vec<&str> = MADRID.iter().map(|l| l.name).collect();
    assert_eq!(names, expected, "orchestrator must not reorder");
    assert_eq!(candidates[0].category, Category::MustVisit);
    assert_eq!(candidates[9].category, Category::Optional);
    assert!((candidates[0].latitude - 40.417955).abs() < 1e-9);
}

#[test]
fn test_prompt_carries_reference_and_refinement() {
    let generator = ScriptedGenerator::new().respond(locations_json(LISBON));
    let reference = FixedReference("Tram 28 runs past the castle");
    let orchestrator = PlanOrchestrator::new(&generator, reference);
    let request = TripRequest::new(Destination::new(Country::Portugal, "Lisbon"))
        .with_counts(3, 2)
        .with_refinement("avoid steep hills");

    orchestrator.request_candidates(&request).expect("candidates");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1, "exactly one service call, no retries");
    assert!(prompts[0].contains("Lisbon, Portugal"));
    assert!(prompts[0].contains("Tram 28 runs past the castle"));
    assert!(prompts[0].contains("Additional request: avoid steep hills"));
    assert!(prompts[0].contains("Select 3 \"must-visit\" places and 2 \"optional\""));
}

#[test]
fn test_long_reference_is_truncated_in_prompt() {
    static LONG: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    let long: &'static str = LONG.get_or_init(|| "r".repeat(MAX_REFERENCE_CHARS * 2));

    let generator = ScriptedGenerator::new().respond(locations_json(MADRID));
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(long));
    orchestrator.request_candidates(&madrid_request()).expect("candidates");

    let prompt = &generator.prompts()[0];
    let reference = prompt
        .lines()
        .find_map(|line| line.strip_prefix("Local material: "))
        .expect("reference line");
    assert_eq!(reference.chars().count(), MAX_REFERENCE_CHARS);
}

#[test]
fn test_malformed_response_is_parse_error() {
    let generator = ScriptedGenerator::new().respond("Sure! Here is your plan: ...");
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(""));

    let err = orchestrator.request_candidates(&madrid_request()).unwrap_err();
    assert!(matches!(err, PlanError::Parse(_)), "got {err:?}");
    assert_eq!(generator.prompts().len(), 1, "no retry after a parse failure");
}

#[test]
fn test_non_conforming_shape_is_parse_error() {
    let generator = ScriptedGenerator::new().respond(r#"{"places": []}"#);
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(""));
    assert!(matches!(
        orchestrator.request_candidates(&madrid_request()),
        Err(PlanError::Parse(_))
    ));
}

#[test]
fn test_service_failure_propagates() {
    let generator = ScriptedGenerator::new().fail("quota exceeded");
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(""));

    let err = orchestrator.request_candidates(&madrid_request()).unwrap_err();
    assert!(matches!(err, PlanError::Generation(_)));
    assert!(err.to_string().contains("quota exceeded"));
}

#[test]
fn test_invalid_counts_skip_the_service() {
    let generator = ScriptedGenerator::new().respond(locations_json(MADRID));
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(""));

    let err = orchestrator
        .request_candidates(&madrid_request().with_counts(0, 5))
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidRequest(_)));
    assert!(generator.prompts().is_empty());
}

#[test]
fn test_plan_orders_and_numbers() {
    let generator = ScriptedGenerator::new().respond(locations_json(LISBON));
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(""));
    let request = TripRequest::new(Destination::new(Country::Portugal, "Lisbon"));

    let itinerary = orchestrator.plan(&request).expect("plan");
    let names: Vec<&str> = itinerary.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Torre de Belem",
            "Mosteiro dos Jeronimos",
            "LX Factory",
            "Praca do Comercio",
            "Castelo de S. Jorge",
        ]
    );
    let numbers: Vec<u32> = itinerary.iter().map(|p| p.sequence_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_plan_rejects_empty_locations() {
    let generator = ScriptedGenerator::new().respond(r#"{"locations": []}"#);
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(""));

    assert!(orchestrator.request_candidates(&madrid_request()).is_ok());

    let generator = ScriptedGenerator::new().respond(r#"{"locations": []}"#);
    let orchestrator = PlanOrchestrator::new(&generator, FixedReference(""));
    assert!(matches!(
        orchestrator.plan(&madrid_request()),
        Err(PlanError::EmptyItinerary)
    ));
}
