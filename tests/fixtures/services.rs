//! Stand-ins for the external collaborators.

use std::cell::RefCell;

use tour_guide::place::Destination;
use tour_guide::traits::{GenerationError, GenerationService, ReferenceSource};

/// Replays canned responses and records every prompt it was sent.
pub struct ScriptedGenerator {
    responses: RefCell<Vec<Result<String, String>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(Vec::new()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn respond(self, json: impl Into<String>) -> Self {
        self.responses.borrow_mut().push(Ok(json.into()));
        self
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        self.responses.borrow_mut().push(Err(message.into()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl GenerationService for ScriptedGenerator {
    fn generate_json(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        let mut responses = self.responses.borrow_mut();
        if responses.is_empty() {
            return Err(GenerationError::EmptyResponse("script exhausted".to_string()));
        }
        match responses.remove(0) {
            Ok(json) => Ok(json),
            Err(message) => Err(GenerationError::Status { status: 500, message }),
        }
    }
}

/// Always returns the same reference text.
pub struct FixedReference(pub &'static str);

impl ReferenceSource for FixedReference {
    fn reference_text(&self, _destination: &Destination) -> String {
        self.0.to_string()
    }
}
