#![doc(test(attr(deny(warnings))))]

//! Ballot Core implements the survey wizard behind the governance ballot: step
//! navigation, vote-driven branching, answer validation and the payload sent to
//! the survey backend.

pub mod cli;
pub mod config;
pub mod errors;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ballot Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
