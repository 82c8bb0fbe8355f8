//! Builds the submission body sent to the survey backend.
//!
//! The JSON field names (`response_data`, `question_type`, `question_text`,
//! `response_value`) are consumed by the existing backend and must not change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::WizardError;

use super::answer::{Answer, VoteChoice};
use super::step::{StepId, NO_NOMINATION_TEXT};
use super::validator::FieldValidator;

/// Steps present in every payload, in wire order.
pub const PAYLOAD_STEPS: [StepId; 7] = [
    StepId::Vote,
    StepId::Nomination,
    StepId::Feature,
    StepId::Spending,
    StepId::Question,
    StepId::Election,
    StepId::Threshold,
];

const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub question_type: String,
    pub question_text: String,
    pub response_value: String,
}

impl ResponseEntry {
    fn new(step: StepId, question_text: &str, response_value: String) -> Self {
        Self {
            question_type: step.as_str().to_string(),
            question_text: question_text.to_string(),
            response_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyPayload {
    pub response_data: BTreeMap<StepId, ResponseEntry>,
}

impl SurveyPayload {
    pub fn entry(&self, step: StepId) -> Option<&ResponseEntry> {
        self.response_data.get(&step)
    }

    pub fn len(&self) -> usize {
        self.response_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.response_data.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Checks every entry against the backend's wire rules.
    pub fn validate(&self) -> Result<(), WizardError> {
        let mut invalid = Vec::new();
        for step in PAYLOAD_STEPS {
            let valid = match self.response_data.get(&step) {
                Some(entry) => {
                    entry.question_type == step.as_str()
                        && FieldValidator::check_response(step, &entry.response_value).is_ok()
                }
                None => false,
            };
            if !valid {
                invalid.push(step.as_str().to_string());
            }
        }
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(WizardError::PayloadInvalid { fields: invalid })
        }
    }
}

pub struct PayloadAssembler;

impl PayloadAssembler {
    /// Assembles and re-validates the payload for a completed answer set.
    ///
    /// The nomination entry follows the vote: a `+1` vote reports the
    /// nomination answer, `-1` the removal answer, and `0` carries `N/A`.
    pub fn assemble(answers: &BTreeMap<StepId, Answer>) -> Result<SurveyPayload, WizardError> {
        let mut invalid = Vec::new();
        let mut payload = SurveyPayload::default();

        let vote = match answers.get(&StepId::Vote) {
            Some(Answer::Vote(choice)) => Some(*choice),
            _ => None,
        };

        for step in PAYLOAD_STEPS {
            let source = match (step, vote) {
                (StepId::Nomination, Some(VoteChoice::Keep)) => {
                    payload.response_data.insert(
                        step,
                        ResponseEntry::new(step, NO_NOMINATION_TEXT, NOT_APPLICABLE.into()),
                    );
                    continue;
                }
                (StepId::Nomination, Some(VoteChoice::Remove)) => StepId::Removal,
                (StepId::Nomination, None) => {
                    invalid.push(step.as_str().to_string());
                    continue;
                }
                (step, _) => step,
            };

            let accepted = answers
                .get(&source)
                .filter(|answer| answer.step() == source)
                .filter(|answer| FieldValidator::check(answer).accepted);
            match accepted {
                Some(answer) => {
                    payload.response_data.insert(
                        step,
                        ResponseEntry::new(step, source.question_text(), answer.response_value()),
                    );
                }
                None => invalid.push(step.as_str().to_string()),
            }
        }

        if !invalid.is_empty() {
            warn!(fields = ?invalid, "Survey payload is incomplete");
            return Err(WizardError::PayloadInvalid { fields: invalid });
        }

        payload.validate().map_err(|err| {
            warn!(error = %err, "Survey payload failed wire validation");
            err
        })?;
        Ok(payload)
    }
}
