use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::engine::{ConfirmationResponse, PromptContext, PromptResponse, WizardInteraction};
use crate::cli::output::{self, MessageKind};
use crate::wizard::answer::format_amount;
use crate::wizard::{Answer, StepId, StepInput, SurveyPayload};

const BACK_COMMAND: &str = ":back";
const FORWARD_COMMAND: &str = ":next";
const CANCEL_COMMAND: &str = ":cancel";
const HELP_COMMAND: &str = ":help";

/// Interactive terminal front end built on `dialoguer`.
pub struct TerminalInteraction {
    theme: ColorfulTheme,
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn read_line(&self, prompt: &str, initial: Option<String>) -> Option<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(text) = initial {
            input = input.with_initial_text(text);
        }
        input.interact_text().ok()
    }

    fn print_step_header(&self, context: &PromptContext<'_>) {
        output::section(format!(
            "Step {} – {}",
            context.position + 1,
            context.descriptor.label
        ));
        output::info(context.descriptor.question_text);
        let mut instructions = vec![format!("Type {HELP_COMMAND} for details")];
        if context.can_go_back {
            instructions.push(format!("{BACK_COMMAND} to revisit the previous step"));
        }
        if context.can_go_forward {
            instructions.push(format!("{FORWARD_COMMAND} to return to the next step"));
        }
        instructions.push(format!("{CANCEL_COMMAND} to leave the survey"));
        output::info(instructions.join(", "));
    }
}

/// Maps navigation commands typed in a prompt.
fn command(input: &str) -> Option<PromptResponse> {
    match input.trim() {
        BACK_COMMAND => Some(PromptResponse::Back),
        FORWARD_COMMAND => Some(PromptResponse::Forward),
        CANCEL_COMMAND => Some(PromptResponse::Cancel),
        _ => None,
    }
}

fn previous_text(previous: Option<&Answer>) -> Option<String> {
    match previous? {
        Answer::Vote(choice) => Some(choice.to_string()),
        Answer::Spending { .. } => None,
        Answer::Election(weeks) => Some(weeks.to_string()),
        other => Some(other.response_value()),
    }
}

/// Amount and purpose of an earlier spending answer, for the two spending prompts.
fn previous_spending(previous: Option<&Answer>) -> (Option<String>, Option<String>) {
    match previous {
        Some(Answer::Spending { amount, purpose }) => {
            (Some(format_amount(*amount)), Some(purpose.trim().to_string()))
        }
        _ => (None, None),
    }
}

impl WizardInteraction for TerminalInteraction {
    fn prompt_step(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.print_step_header(context);
        loop {
            if context.descriptor.id == StepId::Spending {
                let (previous_amount, previous_purpose) = previous_spending(context.previous);
                let Some(amount) = self.read_line("Amount", previous_amount) else {
                    return PromptResponse::Cancel;
                };
                if amount.trim() == HELP_COMMAND {
                    output::info(context.descriptor.help);
                    continue;
                }
                if let Some(response) = command(&amount) {
                    return response;
                }
                let Some(purpose) = self.read_line("Purpose", previous_purpose) else {
                    return PromptResponse::Cancel;
                };
                return PromptResponse::Value(StepInput::spending(amount, purpose));
            }

            let Some(line) = self.read_line(
                context.descriptor.label,
                previous_text(context.previous),
            ) else {
                return PromptResponse::Cancel;
            };
            if line.trim() == HELP_COMMAND {
                output::info(context.descriptor.help);
                continue;
            }
            return command(&line).unwrap_or(PromptResponse::Value(StepInput::Text(line)));
        }
    }

    fn confirm(&mut self, payload: &SurveyPayload) -> ConfirmationResponse {
        output::section("Review your survey");
        for entry in payload.response_data.values() {
            output::info(format!("{} {}", entry.question_text, entry.response_value));
        }
        let options = ["Submit", "Back", "Cancel"];
        match Select::with_theme(&self.theme)
            .with_prompt("Submit this survey?")
            .items(&options[..])
            .default(0)
            .interact()
        {
            Ok(0) => ConfirmationResponse::Submit,
            Ok(1) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }

    fn notify(&mut self, kind: MessageKind, message: &str) {
        output::print(kind, message);
    }
}
