//! Drives a [`WizardSession`] through a pluggable interaction layer.
//!
//! The engine owns no state of its own: everything lives on the session, so a
//! cancelled or failed run leaves the session exactly where the user stopped.

use crate::cli::output::MessageKind;
use crate::errors::WizardError;
use crate::wizard::{
    Answer, StepDescriptor, StepId, StepInput, SubmissionGateway, SubmissionReceipt,
    SurveyPayload, WizardSession,
};

/// Final outcome of a wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardResult {
    Submitted(SubmissionReceipt),
    Cancelled,
}

/// Describes how a step prompt can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Value(StepInput),
    Back,
    Forward,
    Cancel,
}

/// Responses accepted when reviewing the assembled survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Submit,
    Back,
    Cancel,
}

pub struct PromptContext<'a> {
    pub descriptor: &'static StepDescriptor,
    pub previous: Option<&'a Answer>,
    pub position: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

pub trait WizardInteraction {
    fn prompt_step(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, payload: &SurveyPayload) -> ConfirmationResponse;

    fn notify(&mut self, _kind: MessageKind, _message: &str) {}
}

pub struct WizardEngine<'a, G: SubmissionGateway + ?Sized> {
    gateway: &'a mut G,
}

impl<'a, G: SubmissionGateway + ?Sized> WizardEngine<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn run<I: WizardInteraction>(
        &mut self,
        session: &mut WizardSession,
        interaction: &mut I,
    ) -> Result<WizardResult, WizardError> {
        loop {
            if !session.is_open() {
                return Ok(WizardResult::Cancelled);
            }
            let Some(step) = session.current() else {
                return Err(WizardError::Navigation(
                    crate::errors::NavigationError::NotStarted,
                ));
            };

            if !step.collects_answer() {
                if let Some(result) = self.review(session, interaction)? {
                    return Ok(result);
                }
                continue;
            }

            let response = {
                let history = session.history();
                let position = history.cursor().unwrap_or_default();
                let context = PromptContext {
                    descriptor: step.descriptor(),
                    previous: session.answer(step),
                    position,
                    can_go_back: position > 0,
                    can_go_forward: position + 1 < history.len(),
                };
                interaction.prompt_step(&context)
            };

            match response {
                PromptResponse::Value(input) => match session.submit_step(&input) {
                    Ok(outcome) => {
                        interaction.notify(MessageKind::Success, &outcome.acknowledgement)
                    }
                    Err(WizardError::ValidationRejected { reason, .. }) => {
                        interaction.notify(MessageKind::Warning, &reason)
                    }
                    Err(err) => return Err(err),
                },
                PromptResponse::Back => self.navigate(session.back(), interaction)?,
                PromptResponse::Forward => self.navigate(session.forward(), interaction)?,
                PromptResponse::Cancel => {
                    session.abandon();
                    return Ok(WizardResult::Cancelled);
                }
            }
        }
    }

    /// Handles the `done` step. Returns `None` when the wizard should keep going.
    fn review<I: WizardInteraction>(
        &mut self,
        session: &mut WizardSession,
        interaction: &mut I,
    ) -> Result<Option<WizardResult>, WizardError> {
        let payload = match session.assemble() {
            Ok(payload) => payload,
            Err(err @ WizardError::PayloadInvalid { .. }) => {
                interaction.notify(MessageKind::Warning, &err.to_string());
                session.back()?;
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        match interaction.confirm(&payload) {
            ConfirmationResponse::Submit => match session.submit(&mut *self.gateway) {
                Ok(receipt) => {
                    interaction.notify(MessageKind::Success, &receipt.message);
                    Ok(Some(WizardResult::Submitted(receipt)))
                }
                Err(err @ WizardError::SubmissionFailure { .. }) => {
                    interaction.notify(MessageKind::Error, &err.to_string());
                    Ok(None)
                }
                Err(err) => Err(err),
            },
            ConfirmationResponse::Back => {
                session.back()?;
                Ok(None)
            }
            ConfirmationResponse::Cancel => {
                session.abandon();
                Ok(Some(WizardResult::Cancelled))
            }
        }
    }

    fn navigate<I: WizardInteraction>(
        &self,
        moved: Result<StepId, WizardError>,
        interaction: &mut I,
    ) -> Result<(), WizardError> {
        match moved {
            Ok(_) => Ok(()),
            Err(WizardError::Navigation(err)) => {
                interaction.notify(MessageKind::Warning, &err.to_string());
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
