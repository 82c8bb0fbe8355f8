//! Static registry of wizard steps and the question each one asks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier for a single wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Vote,
    Nomination,
    Removal,
    Feature,
    Spending,
    Question,
    Election,
    Threshold,
    Done,
}

/// Static description of what a step collects.
#[derive(Debug, Clone, Copy)]
pub struct StepDescriptor {
    pub id: StepId,
    pub label: &'static str,
    pub question_text: &'static str,
    pub help: &'static str,
}

static DESCRIPTORS: [StepDescriptor; 9] = [
    StepDescriptor {
        id: StepId::Vote,
        label: "Vote",
        question_text: "I propose for the quantity of my country's business owners to:",
        help: "Enter +1 to add an owner, -1 to remove one, or 0 to keep the count.",
    },
    StepDescriptor {
        id: StepId::Nomination,
        label: "Nominee name",
        question_text: "I propose _____ to be a business owner starting from the next meeting:",
        help: "Name of the person you nominate.",
    },
    StepDescriptor {
        id: StepId::Removal,
        label: "Name to remove",
        question_text:
            "I propose _____ to no longer be a business owner starting from the next meeting:",
        help: "Name of the owner you propose to remove.",
    },
    StepDescriptor {
        id: StepId::Feature,
        label: "Software feature",
        question_text: "I propose to add the software feature:",
        help: "Describe the feature you want added.",
    },
    StepDescriptor {
        id: StepId::Spending,
        label: "Spending",
        question_text: "I propose that we spend:",
        help: "An amount greater than zero and what it is for.",
    },
    StepDescriptor {
        id: StepId::Question,
        label: "Question",
        question_text: "I want to ask if:",
        help: "Any question for the next meeting.",
    },
    StepDescriptor {
        id: StepId::Election,
        label: "Weeks until next election",
        question_text: "I propose that our next election will be in:",
        help: "A whole number of weeks between 1 and 24.",
    },
    StepDescriptor {
        id: StepId::Threshold,
        label: "Votes needed for change",
        question_text: "I propose that the number of votes needed for change is:",
        help: "Numerator over the number of business owners, a whole number above zero.",
    },
    StepDescriptor {
        id: StepId::Done,
        label: "Done",
        question_text: "Thank you! Your survey is ready to submit.",
        help: "Submit the survey.",
    },
];

/// Question text used for the nomination entry when the vote is 0.
pub const NO_NOMINATION_TEXT: &str = "No nomination required for ±0 vote";

impl StepId {
    pub const ALL: [StepId; 9] = [
        StepId::Vote,
        StepId::Nomination,
        StepId::Removal,
        StepId::Feature,
        StepId::Spending,
        StepId::Question,
        StepId::Election,
        StepId::Threshold,
        StepId::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Vote => "vote",
            StepId::Nomination => "nomination",
            StepId::Removal => "removal",
            StepId::Feature => "feature",
            StepId::Spending => "spending",
            StepId::Question => "question",
            StepId::Election => "election",
            StepId::Threshold => "threshold",
            StepId::Done => "done",
        }
    }

    pub fn descriptor(self) -> &'static StepDescriptor {
        // ALL and DESCRIPTORS share the declaration order.
        &DESCRIPTORS[self as usize]
    }

    pub fn question_text(self) -> &'static str {
        self.descriptor().question_text
    }

    /// Whether the step collects an answer. `Done` only awaits submission.
    pub fn collects_answer(self) -> bool {
        !matches!(self, StepId::Done)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        StepId::ALL
            .iter()
            .copied()
            .find(|step| step.as_str() == key)
            .ok_or_else(|| format!("Unknown step `{}`", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_line_up_with_ids() {
        for step in StepId::ALL {
            assert_eq!(step.descriptor().id, step);
        }
    }

    #[test]
    fn parses_identifiers_case_insensitively() {
        assert_eq!("Threshold".parse::<StepId>(), Ok(StepId::Threshold));
        assert!("thanks".parse::<StepId>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_key() {
        let json = serde_json::to_string(&StepId::Election).unwrap();
        assert_eq!(json, "\"election\"");
    }
}
