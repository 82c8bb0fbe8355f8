use crate::errors::WizardError;

use super::answer::{Answer, VoteChoice};
use super::step::StepId;
use super::validator::FieldValidator;

/// Transition table for the wizard.
///
/// `vote` fans out to exactly one of nomination, removal or feature; the
/// three paths join at `feature` and run linearly to `done`.
pub struct BranchResolver;

impl BranchResolver {
    pub fn resolve_next(step: StepId, answer: &Answer) -> Result<StepId, WizardError> {
        if answer.step() != step {
            return Err(WizardError::rejected(
                step,
                format!("expected an answer for `{}`, got `{}`", step, answer.step()),
            ));
        }
        let validation = FieldValidator::check(answer);
        if !validation.accepted {
            return Err(WizardError::rejected(step, validation.message));
        }

        let next = match answer {
            Answer::Vote(VoteChoice::Add) => StepId::Nomination,
            Answer::Vote(VoteChoice::Remove) => StepId::Removal,
            Answer::Vote(VoteChoice::Keep) => StepId::Feature,
            Answer::Nomination(_) | Answer::Removal(_) => StepId::Feature,
            Answer::Feature(_) => StepId::Spending,
            Answer::Spending { .. } => StepId::Question,
            Answer::Question(_) => StepId::Election,
            Answer::Election(_) => StepId::Threshold,
            Answer::Threshold(_) => StepId::Done,
        };
        Ok(next)
    }
}
