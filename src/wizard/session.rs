use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{NavigationError, WizardError};

use super::answer::{Answer, StepInput};
use super::branch::BranchResolver;
use super::gateway::SubmissionGateway;
use super::history::NavigationHistory;
use super::payload::{PayloadAssembler, SurveyPayload};
use super::step::StepId;
use super::validator::FieldValidator;

const DEFAULT_REDIRECT: &str = "/election";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Submitted,
    Abandoned,
}

/// Result of an accepted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub next: StepId,
    pub acknowledgement: String,
}

/// Details returned by the backend after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub session_id: Uuid,
    pub message: String,
    pub redirect_url: String,
    pub submitted_at: DateTime<Utc>,
}

/// One pass through the survey wizard.
///
/// Owns the navigation history and every accepted answer. Answers from a
/// branch the user backed out of are kept (they prefill the form if the user
/// returns) but only the branch selected by the vote reaches the payload.
#[derive(Debug, Clone)]
pub struct WizardSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    history: NavigationHistory,
    answers: BTreeMap<StepId, Answer>,
    state: SessionState,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// Opens a session positioned on the vote step.
    pub fn new() -> Self {
        let mut history = NavigationHistory::new();
        history.advance(StepId::Vote);
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            history,
            answers: BTreeMap::new(),
            state: SessionState::Open,
        };
        debug!(session = %session.id, "Wizard session opened");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn current(&self) -> Option<StepId> {
        self.history.current()
    }

    pub fn answer(&self, step: StepId) -> Option<&Answer> {
        self.answers.get(&step)
    }

    pub fn answers(&self) -> &BTreeMap<StepId, Answer> {
        &self.answers
    }

    /// Validates raw input for the current step and moves to the next one.
    pub fn submit_step(&mut self, input: &StepInput) -> Result<StepOutcome, WizardError> {
        let step = self.current_open_step()?;
        let answer = FieldValidator::parse(step, input).map_err(|err| {
            info!(session = %self.id, %step, reason = %err, "Step rejected");
            WizardError::rejected(step, err.message)
        })?;
        self.submit_answer(answer)
    }

    /// Records an already typed answer for the current step.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<StepOutcome, WizardError> {
        let step = self.current_open_step()?;
        let next = BranchResolver::resolve_next(step, &answer).map_err(|err| {
            info!(session = %self.id, %step, error = %err, "Step rejected");
            err
        })?;
        let acknowledgement = answer.acknowledgement();
        self.answers.insert(step, answer);
        self.history.advance(next);
        debug!(session = %self.id, from = %step, to = %next, "Step accepted");
        Ok(StepOutcome {
            next,
            acknowledgement,
        })
    }

    pub fn back(&mut self) -> Result<StepId, WizardError> {
        self.ensure_open()?;
        let step = self.history.back()?;
        debug!(session = %self.id, to = %step, "Moved back");
        Ok(step)
    }

    pub fn forward(&mut self) -> Result<StepId, WizardError> {
        self.ensure_open()?;
        let step = self.history.forward()?;
        debug!(session = %self.id, to = %step, "Moved forward");
        Ok(step)
    }

    /// Builds the validated payload from the recorded answers.
    pub fn assemble(&self) -> Result<SurveyPayload, WizardError> {
        PayloadAssembler::assemble(&self.answers)
    }

    /// Sends the survey through `gateway`.
    ///
    /// Only allowed from the `done` step. A rejected or failed submission
    /// moves the cursor back to `threshold` so the user can resubmit.
    pub fn submit<G>(&mut self, gateway: &mut G) -> Result<SubmissionReceipt, WizardError>
    where
        G: SubmissionGateway + ?Sized,
    {
        let step = self.current_open_step()?;
        if step != StepId::Done {
            return Err(WizardError::rejected(
                step,
                "Complete this step before submitting the survey",
            ));
        }
        let payload = self.assemble()?;

        let cause = match gateway.submit(&payload) {
            Ok(response) if response.ok => {
                self.state = SessionState::Submitted;
                let receipt = self.receipt(&response.body);
                info!(session = %self.id, redirect = %receipt.redirect_url, "Survey submitted");
                return Ok(receipt);
            }
            Ok(response) => response
                .error_message()
                .unwrap_or("the backend rejected the survey")
                .to_string(),
            Err(err) => err.to_string(),
        };

        warn!(session = %self.id, %cause, "Survey submission failed");
        self.history.back()?;
        Err(WizardError::SubmissionFailure { cause })
    }

    /// Closes the session without submitting.
    pub fn abandon(&mut self) {
        if self.is_open() {
            self.state = SessionState::Abandoned;
            debug!(session = %self.id, "Wizard session abandoned");
        }
    }

    fn receipt(&self, body: &Value) -> SubmissionReceipt {
        SubmissionReceipt {
            session_id: self.id,
            message: body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Survey saved")
                .to_string(),
            redirect_url: body
                .get("redirectURL")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_REDIRECT)
                .to_string(),
            submitted_at: Utc::now(),
        }
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(WizardError::SessionClosed)
        }
    }

    fn current_open_step(&self) -> Result<StepId, WizardError> {
        self.ensure_open()?;
        self.history
            .current()
            .ok_or(WizardError::Navigation(NavigationError::NotStarted))
    }
}
