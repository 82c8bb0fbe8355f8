//! Per-step validation rules.
//!
//! Every rule is a pure function over plain values. Malformed input produces a
//! rejected [`Validation`], never a panic.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::answer::{format_amount, Answer, StepInput, VoteChoice};
use super::step::StepId;

pub const MIN_ELECTION_WEEKS: u32 = 1;
pub const MAX_ELECTION_WEEKS: u32 = 24;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;

static SPENDING_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*(\d+(?:\.\d+)?)\s+for\s+(\S.*?)\s*$").expect("valid regex")
});
static WEEKS_INPUT_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)(?:\s+weeks?)?\s*$").expect("valid regex"));
static WEEKS_WIRE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+weeks$").expect("valid regex"));

/// Rejection reason for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Structured accept/reject outcome handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub accepted: bool,
    pub message: String,
}

impl Validation {
    fn from_result(result: Result<String, ValidationError>) -> Self {
        match result {
            Ok(message) => Self {
                accepted: true,
                message,
            },
            Err(err) => Self {
                accepted: false,
                message: err.message,
            },
        }
    }
}

/// Rule applied to a step's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Vote,
    NonEmpty(&'static str),
    Name(&'static str),
    AmountForPurpose,
    Weeks,
    PositiveInteger,
    NoAnswer,
}

impl Rule {
    pub fn for_step(step: StepId) -> Self {
        match step {
            StepId::Vote => Rule::Vote,
            StepId::Nomination => {
                Rule::Name("Please enter a name before submitting your nomination.")
            }
            StepId::Removal => {
                Rule::Name("Please enter a name before submitting your removal proposal.")
            }
            StepId::Feature => Rule::NonEmpty("Please enter a feature."),
            StepId::Question => Rule::NonEmpty("Please enter a valid question."),
            StepId::Spending => Rule::AmountForPurpose,
            StepId::Election => Rule::Weeks,
            StepId::Threshold => Rule::PositiveInteger,
            StepId::Done => Rule::NoAnswer,
        }
    }
}

pub struct FieldValidator;

impl FieldValidator {
    /// Validates raw input for `step` without recording anything.
    pub fn validate(step: StepId, input: &StepInput) -> Validation {
        Validation::from_result(Self::parse(step, input).map(|answer| answer.acknowledgement()))
    }

    /// Turns raw input into a typed answer or a rejection.
    pub fn parse(step: StepId, input: &StepInput) -> Result<Answer, ValidationError> {
        let answer = match (Rule::for_step(step), input) {
            (Rule::NoAnswer, _) => {
                return Err(ValidationError::new(format!(
                    "The `{}` step does not take an answer",
                    step
                )))
            }
            (Rule::AmountForPurpose, StepInput::Spending { amount, purpose }) => {
                parse_spending(amount, purpose)?
            }
            (Rule::AmountForPurpose, StepInput::Text(raw)) => {
                let captures = SPENDING_SHAPE.captures(raw).ok_or_else(|| {
                    ValidationError::new("Please enter both the amount and the purpose.")
                })?;
                parse_spending(&captures[1], &captures[2])?
            }
            (_, StepInput::Spending { .. }) => {
                return Err(ValidationError::new("Expected a text answer"));
            }
            (Rule::Vote, StepInput::Text(raw)) => Answer::Vote(parse_vote(raw)?),
            (Rule::Name(message), StepInput::Text(raw)) => {
                let name = check_name(raw, message)?;
                match step {
                    StepId::Removal => Answer::Removal(name),
                    _ => Answer::Nomination(name),
                }
            }
            (Rule::NonEmpty(message), StepInput::Text(raw)) => {
                let text = non_empty(raw, message)?;
                match step {
                    StepId::Feature => Answer::Feature(text),
                    _ => Answer::Question(text),
                }
            }
            (Rule::Weeks, StepInput::Text(raw)) => Answer::Election(parse_weeks(raw)?),
            (Rule::PositiveInteger, StepInput::Text(raw)) => {
                Answer::Threshold(parse_positive_integer(raw)?)
            }
        };
        Ok(answer)
    }

    /// Re-checks an already typed answer.
    pub fn check(answer: &Answer) -> Validation {
        let result = match answer {
            Answer::Vote(_) => Ok(()),
            Answer::Nomination(text)
            | Answer::Removal(text)
            | Answer::Feature(text)
            | Answer::Question(text) => match Rule::for_step(answer.step()) {
                Rule::Name(message) => check_name(text, message).map(|_| ()),
                Rule::NonEmpty(message) => non_empty(text, message).map(|_| ()),
                _ => Ok(()),
            },
            Answer::Spending { amount, purpose } => {
                check_amount(*amount).and_then(|_| non_empty(purpose, SPENDING_MISSING).map(|_| ()))
            }
            Answer::Election(weeks) => check_weeks(*weeks),
            Answer::Threshold(numerator) => {
                if *numerator > 0 {
                    Ok(())
                } else {
                    Err(ValidationError::new(THRESHOLD_INVALID))
                }
            }
        };
        Validation::from_result(result.map(|_| answer.acknowledgement()))
    }

    /// Checks a serialized `response_value` against the backend's wire rules.
    pub fn check_response(step: StepId, value: &str) -> Result<(), ValidationError> {
        match step {
            StepId::Vote => match value {
                "-1" | "0" | "1" => Ok(()),
                _ => Err(ValidationError::new("Vote must be -1, 0, or 1")),
            },
            StepId::Spending => {
                let captures = SPENDING_SHAPE
                    .captures(value)
                    .ok_or_else(|| ValidationError::new(SPENDING_MISSING))?;
                let amount = captures[1]
                    .parse::<f64>()
                    .map_err(|_| ValidationError::new(SPENDING_AMOUNT))?;
                check_amount(amount)
            }
            StepId::Election => {
                let captures = WEEKS_WIRE_SHAPE
                    .captures(value)
                    .ok_or_else(|| ValidationError::new("Election period must read `N weeks`"))?;
                let weeks = captures[1]
                    .parse::<u32>()
                    .map_err(|_| ValidationError::new(WEEKS_INVALID))?;
                check_weeks(weeks)
            }
            StepId::Threshold => parse_positive_integer(value).map(|_| ()),
            StepId::Done => Err(ValidationError::new("The `done` step has no response")),
            other => match Rule::for_step(other) {
                Rule::Name(message) => check_name(value, message).map(|_| ()),
                Rule::NonEmpty(message) => non_empty(value, message).map(|_| ()),
                _ => Ok(()),
            },
        }
    }
}

const SPENDING_MISSING: &str = "Please enter both the amount and the purpose.";
const SPENDING_AMOUNT: &str = "Amount must be a number greater than zero.";
const SPENDING_PRECISION: &str = "Amount must be at least 0.01.";
const NAME_LENGTH: &str = "Name must be between 2 and 50 characters long.";
const WEEKS_INVALID: &str = "Please enter a valid number of weeks between 1 and 24.";
const THRESHOLD_INVALID: &str = "Please enter a valid numerator.";

fn non_empty(raw: &str, message: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(message))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Byte length, as the backend measures it.
fn check_name(raw: &str, message: &str) -> Result<String, ValidationError> {
    let name = non_empty(raw, message)?;
    if (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.len()) {
        Ok(name)
    } else {
        Err(ValidationError::new(NAME_LENGTH))
    }
}

fn parse_vote(raw: &str) -> Result<VoteChoice, ValidationError> {
    match raw.trim() {
        "" => Err(ValidationError::new(
            "Please select an option before submitting your vote.",
        )),
        "1" | "+1" => Ok(VoteChoice::Add),
        "0" | "+0" | "-0" | "±0" => Ok(VoteChoice::Keep),
        "-1" => Ok(VoteChoice::Remove),
        other => Err(ValidationError::new(format!(
            "Vote must be +1, 0, or -1 (got `{}`)",
            other
        ))),
    }
}

fn parse_spending(amount: &str, purpose: &str) -> Result<Answer, ValidationError> {
    let amount_text = non_empty(amount, SPENDING_MISSING)?;
    let purpose = non_empty(purpose, SPENDING_MISSING)?;
    let amount = amount_text
        .parse::<f64>()
        .map_err(|_| ValidationError::new(SPENDING_AMOUNT))?;
    check_amount(amount)?;
    Ok(Answer::Spending { amount, purpose })
}

fn check_amount(amount: f64) -> Result<(), ValidationError> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(ValidationError::new(SPENDING_AMOUNT));
    }
    // The payload carries two decimals; the written amount must stay above zero.
    match format_amount(amount).parse::<f64>() {
        Ok(written) if written > 0.0 => Ok(()),
        _ => Err(ValidationError::new(SPENDING_PRECISION)),
    }
}

fn parse_weeks(raw: &str) -> Result<u32, ValidationError> {
    let captures = WEEKS_INPUT_SHAPE
        .captures(raw)
        .ok_or_else(|| ValidationError::new(WEEKS_INVALID))?;
    let weeks = captures[1]
        .parse::<u32>()
        .map_err(|_| ValidationError::new(WEEKS_INVALID))?;
    check_weeks(weeks)?;
    Ok(weeks)
}

fn check_weeks(weeks: u32) -> Result<(), ValidationError> {
    if (MIN_ELECTION_WEEKS..=MAX_ELECTION_WEEKS).contains(&weeks) {
        Ok(())
    } else {
        Err(ValidationError::new(WEEKS_INVALID))
    }
}

fn parse_positive_integer(raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ValidationError::new(THRESHOLD_INVALID))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> StepInput {
        StepInput::text(value)
    }

    #[test]
    fn election_weeks_boundaries() {
        let accepted: Vec<bool> = ["0", "1", "24", "25"]
            .iter()
            .map(|weeks| FieldValidator::validate(StepId::Election, &text(weeks)).accepted)
            .collect();
        assert_eq!(accepted, vec![false, true, true, false]);
    }

    #[test]
    fn election_accepts_weeks_suffix() {
        assert_eq!(
            FieldValidator::parse(StepId::Election, &text("6 weeks")),
            Ok(Answer::Election(6))
        );
        assert!(!FieldValidator::validate(StepId::Election, &text("six")).accepted);
    }

    #[test]
    fn threshold_rejects_non_numeric() {
        let result = FieldValidator::validate(StepId::Threshold, &text("abc"));
        assert!(!result.accepted);
        assert_eq!(result.message, "Please enter a valid numerator.");
        assert!(!FieldValidator::validate(StepId::Threshold, &text("0")).accepted);
        assert!(!FieldValidator::validate(StepId::Threshold, &text("-2")).accepted);
        assert!(FieldValidator::validate(StepId::Threshold, &text(" 3 ")).accepted);
    }

    #[test]
    fn names_are_trimmed_and_required() {
        assert!(!FieldValidator::validate(StepId::Nomination, &text("   ")).accepted);
        assert_eq!(
            FieldValidator::parse(StepId::Removal, &text("  Bob ")),
            Ok(Answer::Removal("Bob".into()))
        );
    }

    #[test]
    fn spending_accepts_pair_or_composite_text() {
        assert_eq!(
            FieldValidator::parse(StepId::Spending, &StepInput::spending("250", "Coffee")),
            Ok(Answer::Spending {
                amount: 250.0,
                purpose: "Coffee".into()
            })
        );
        assert!(FieldValidator::validate(StepId::Spending, &text("12.5 for lunch")).accepted);
        assert!(!FieldValidator::validate(StepId::Spending, &StepInput::spending("", "x")).accepted);
        assert!(!FieldValidator::validate(StepId::Spending, &StepInput::spending("ten", "x")).accepted);
        assert!(!FieldValidator::validate(StepId::Spending, &StepInput::spending("0", "x")).accepted);
        assert!(!FieldValidator::validate(StepId::Spending, &text("100")).accepted);
    }

    #[test]
    fn spending_rejects_amounts_lost_to_rounding() {
        for amount in ["0.001", "0.004"] {
            let result = FieldValidator::validate(StepId::Spending, &StepInput::spending(amount, "Pens"));
            assert!(!result.accepted, "{amount} should be rejected");
            assert_eq!(result.message, "Amount must be at least 0.01.");
        }
        assert!(FieldValidator::validate(StepId::Spending, &StepInput::spending("0.01", "Pens")).accepted);
        assert!(!FieldValidator::check(&Answer::Spending {
            amount: 0.002,
            purpose: "Pens".into()
        })
        .accepted);
    }

    #[test]
    fn spending_purpose_may_span_lines() {
        let answer =
            FieldValidator::parse(StepId::Spending, &StepInput::spending("10", "Pens\nand paper"))
                .unwrap();
        assert_eq!(
            FieldValidator::check_response(StepId::Spending, &answer.response_value()),
            Ok(())
        );
        assert!(FieldValidator::validate(StepId::Spending, &text("10 for Pens\nand paper")).accepted);
    }

    #[test]
    fn name_length_boundaries() {
        let name = |len: usize| "a".repeat(len);
        let accepted: Vec<bool> = [1, 2, 50, 51]
            .iter()
            .map(|len| FieldValidator::validate(StepId::Nomination, &text(&name(*len))).accepted)
            .collect();
        assert_eq!(accepted, vec![false, true, true, false]);

        assert!(!FieldValidator::validate(StepId::Removal, &text(" A ")).accepted);
        assert!(!FieldValidator::check(&Answer::Nomination("A".into())).accepted);
        assert!(FieldValidator::check_response(StepId::Nomination, "A").is_err());
        assert!(FieldValidator::check_response(StepId::Nomination, &name(51)).is_err());
        assert!(FieldValidator::check_response(StepId::Nomination, "N/A").is_ok());
    }

    #[test]
    fn vote_accepts_signed_forms() {
        assert_eq!(
            FieldValidator::parse(StepId::Vote, &text("+1")),
            Ok(Answer::Vote(VoteChoice::Add))
        );
        assert_eq!(
            FieldValidator::parse(StepId::Vote, &text("±0")),
            Ok(Answer::Vote(VoteChoice::Keep))
        );
        assert!(!FieldValidator::validate(StepId::Vote, &text("2")).accepted);
        assert!(!FieldValidator::validate(StepId::Vote, &text("")).accepted);
    }

    #[test]
    fn wrong_input_kind_is_rejected() {
        let result = FieldValidator::validate(StepId::Feature, &StepInput::spending("1", "x"));
        assert!(!result.accepted);
        assert!(!FieldValidator::validate(StepId::Done, &text("anything")).accepted);
    }

    #[test]
    fn check_rejects_out_of_range_typed_answers() {
        assert!(!FieldValidator::check(&Answer::Election(25)).accepted);
        assert!(!FieldValidator::check(&Answer::Threshold(0)).accepted);
        assert!(!FieldValidator::check(&Answer::Feature(" ".into())).accepted);
        assert!(FieldValidator::check(&Answer::Election(24)).accepted);
    }

    #[test]
    fn wire_rules_follow_backend_shapes() {
        assert!(FieldValidator::check_response(StepId::Election, "6 weeks").is_ok());
        assert!(FieldValidator::check_response(StepId::Election, "6").is_err());
        assert!(FieldValidator::check_response(StepId::Spending, "10 for pens").is_ok());
        assert!(FieldValidator::check_response(StepId::Spending, "for pens").is_err());
        assert!(FieldValidator::check_response(StepId::Vote, "+1").is_err());
        assert!(FieldValidator::check_response(StepId::Threshold, "abc").is_err());
    }
}
