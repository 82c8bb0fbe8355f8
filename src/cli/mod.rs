//! Terminal front end for the survey wizard.

pub mod engine;
pub mod output;
pub mod terminal;

use std::io;

use thiserror::Error;
use tracing::info;

use crate::config::ConfigManager;
use crate::errors::{ConfigError, WizardError};
use crate::wizard::{DryRunGateway, WizardSession};

pub use engine::{
    ConfirmationResponse, PromptContext, PromptResponse, WizardEngine, WizardInteraction,
    WizardResult,
};
pub use terminal::TerminalInteraction;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Runs one survey pass in the terminal, printing the payload instead of
/// sending it.
pub fn run_cli() -> Result<(), CliError> {
    let config = ConfigManager::default_location()?.load()?;
    output::set_color_enabled(config.ui_color_enabled);
    info!(endpoint = %config.survey_endpoint, "Starting survey wizard (dry run)");

    let mut session = WizardSession::new();
    let mut gateway = DryRunGateway::new(io::stdout(), config.election_endpoint.clone());
    let mut interaction = TerminalInteraction::new();

    match WizardEngine::new(&mut gateway).run(&mut session, &mut interaction)? {
        WizardResult::Submitted(receipt) => {
            output::success(format!(
                "Thank you! Your survey has been submitted. Continue at {}",
                receipt.redirect_url
            ));
        }
        WizardResult::Cancelled => output::warning("Survey cancelled."),
    }
    Ok(())
}
