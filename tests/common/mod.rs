#![allow(dead_code)]

use std::collections::VecDeque;

use ballot_core::errors::GatewayError;
use ballot_core::wizard::{
    GatewayResponse, StepId, StepInput, SubmissionGateway, SurveyPayload, WizardSession,
};
use serde_json::json;

/// Gateway double that records every payload it receives.
pub struct RecordingGateway {
    responses: VecDeque<Result<GatewayResponse, GatewayError>>,
    pub received: Vec<SurveyPayload>,
}

impl RecordingGateway {
    pub fn accepting() -> Self {
        Self::scripted(vec![Ok(GatewayResponse::success(json!({
            "message": "Survey saved",
            "redirectURL": "/election"
        })))])
    }

    pub fn scripted(responses: Vec<Result<GatewayResponse, GatewayError>>) -> Self {
        Self {
            responses: responses.into(),
            received: Vec::new(),
        }
    }
}

impl SubmissionGateway for RecordingGateway {
    fn submit(&mut self, payload: &SurveyPayload) -> Result<GatewayResponse, GatewayError> {
        self.received.push(payload.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Request("no scripted response".into())))
    }
}

pub fn text(value: &str) -> StepInput {
    StepInput::text(value)
}

/// Answers for every step after the vote branch, in order.
pub fn linear_inputs() -> Vec<StepInput> {
    vec![
        text("Dark mode"),
        StepInput::spending("250", "Coffee"),
        text("Can we meet monthly"),
        text("12"),
        text("3"),
    ]
}

/// Drives a fresh session to `done`, returning the steps visited after each answer.
pub fn complete_session(vote: &str, name: Option<&str>) -> (WizardSession, Vec<StepId>) {
    let mut session = WizardSession::new();
    let mut visited = Vec::new();
    visited.push(session.submit_step(&text(vote)).expect("vote").next);
    if let Some(name) = name {
        visited.push(session.submit_step(&text(name)).expect("name").next);
    }
    for input in linear_inputs() {
        visited.push(session.submit_step(&input).expect("step").next);
    }
    (session, visited)
}
