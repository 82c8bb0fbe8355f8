use std::fmt;

use serde::{Deserialize, Serialize};

use super::step::StepId;

/// Tri-state vote on the number of business owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Add,
    Keep,
    Remove,
}

impl VoteChoice {
    pub fn value(self) -> i8 {
        match self {
            VoteChoice::Add => 1,
            VoteChoice::Keep => 0,
            VoteChoice::Remove => -1,
        }
    }

    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(VoteChoice::Add),
            0 => Some(VoteChoice::Keep),
            -1 => Some(VoteChoice::Remove),
            _ => None,
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteChoice::Add => f.write_str("+1"),
            VoteChoice::Keep => f.write_str("±0"),
            VoteChoice::Remove => f.write_str("-1"),
        }
    }
}

/// Raw input as typed by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    Text(String),
    Spending { amount: String, purpose: String },
}

impl StepInput {
    pub fn text(value: impl Into<String>) -> Self {
        StepInput::Text(value.into())
    }

    pub fn spending(amount: impl Into<String>, purpose: impl Into<String>) -> Self {
        StepInput::Spending {
            amount: amount.into(),
            purpose: purpose.into(),
        }
    }
}

/// A typed answer for one step.
///
/// Constructing an `Answer` directly does not make it valid: only answers the
/// [`FieldValidator`](super::FieldValidator) accepted are recorded on a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    Vote(VoteChoice),
    Nomination(String),
    Removal(String),
    Feature(String),
    Spending { amount: f64, purpose: String },
    Question(String),
    Election(u32),
    Threshold(u32),
}

impl Answer {
    pub fn step(&self) -> StepId {
        match self {
            Answer::Vote(_) => StepId::Vote,
            Answer::Nomination(_) => StepId::Nomination,
            Answer::Removal(_) => StepId::Removal,
            Answer::Feature(_) => StepId::Feature,
            Answer::Spending { .. } => StepId::Spending,
            Answer::Question(_) => StepId::Question,
            Answer::Election(_) => StepId::Election,
            Answer::Threshold(_) => StepId::Threshold,
        }
    }

    /// Wire representation used as `response_value` in the payload.
    pub fn response_value(&self) -> String {
        match self {
            Answer::Vote(choice) => choice.value().to_string(),
            Answer::Nomination(text)
            | Answer::Removal(text)
            | Answer::Feature(text)
            | Answer::Question(text) => text.trim().to_string(),
            Answer::Spending { amount, purpose } => {
                format!("{} for {}", format_amount(*amount), purpose.trim())
            }
            Answer::Election(weeks) => format!("{} weeks", weeks),
            Answer::Threshold(numerator) => numerator.to_string(),
        }
    }

    /// Confirmation shown to the user once the answer is recorded.
    pub fn acknowledgement(&self) -> String {
        match self {
            Answer::Vote(choice) => format!("You selected: {}", choice),
            Answer::Nomination(name) => format!(
                "Nomination for {} has been recorded. Results will be shown in 24 hours.",
                name.trim()
            ),
            Answer::Removal(name) => format!(
                "{} has been proposed for removal. Results will be shown in 24 hours.",
                name.trim()
            ),
            Answer::Feature(feature) => format!(
                "You proposed to add the software feature: {}. Results will be shown in 24 hours.",
                feature.trim()
            ),
            Answer::Spending { amount, purpose } => format!(
                "You proposed to spend ${} on {}. Results will be shown in 24 hours.",
                format_amount(*amount),
                purpose.trim()
            ),
            Answer::Question(question) => format!("You asked: \"{}?\"", question.trim()),
            Answer::Election(weeks) => format!(
                "You proposed the next election to be in {} weeks. Results will be shown in 24 hours.",
                weeks
            ),
            Answer::Threshold(numerator) => format!(
                "You proposed that the number of votes needed for change is: {}/#business owners.",
                numerator
            ),
        }
    }
}

pub(crate) fn format_amount(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
