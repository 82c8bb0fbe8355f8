mod common;

use ballot_core::errors::{NavigationError, WizardError};
use ballot_core::wizard::{StepId, StepInput, WizardSession};
use common::{complete_session, text};

#[test]
fn positive_vote_walks_the_nomination_branch() {
    let (session, visited) = complete_session("+1", Some("Alice"));
    assert_eq!(
        visited,
        vec![
            StepId::Nomination,
            StepId::Feature,
            StepId::Spending,
            StepId::Question,
            StepId::Election,
            StepId::Threshold,
            StepId::Done
        ]
    );
    assert_eq!(session.current(), Some(StepId::Done));
}

#[test]
fn neutral_vote_skips_nomination() {
    let mut session = WizardSession::new();
    let outcome = session.submit_step(&text("0")).unwrap();
    assert_eq!(outcome.next, StepId::Feature);
    assert!(!session.history().entries().contains(&StepId::Nomination));
}

#[test]
fn negative_vote_goes_through_removal() {
    let (session, visited) = complete_session("-1", Some("Bob"));
    assert_eq!(visited[0], StepId::Removal);
    assert_eq!(visited[1], StepId::Feature);
    assert_eq!(session.history().entries()[1], StepId::Removal);
}

#[test]
fn non_numeric_threshold_keeps_session_on_threshold() {
    let mut session = WizardSession::new();
    session.submit_step(&text("0")).unwrap();
    session.submit_step(&text("Dark mode")).unwrap();
    session
        .submit_step(&StepInput::spending("10", "Pens"))
        .unwrap();
    session.submit_step(&text("Is it Friday")).unwrap();
    session.submit_step(&text("2")).unwrap();
    let length = session.history().len();

    let err = session.submit_step(&text("abc")).unwrap_err();

    assert!(matches!(
        err,
        WizardError::ValidationRejected {
            step: StepId::Threshold,
            ..
        }
    ));
    assert_eq!(session.current(), Some(StepId::Threshold));
    assert_eq!(session.history().len(), length);
    assert!(session.answer(StepId::Threshold).is_none());
}

#[test]
fn election_boundaries_only_accept_one_through_twenty_four() {
    for (weeks, accepted) in [("0", false), ("1", true), ("24", true), ("25", false)] {
        let mut session = WizardSession::new();
        session.submit_step(&text("0")).unwrap();
        session.submit_step(&text("Dark mode")).unwrap();
        session
            .submit_step(&StepInput::spending("10", "Pens"))
            .unwrap();
        session.submit_step(&text("Is it Friday")).unwrap();
        assert_eq!(session.submit_step(&text(weeks)).is_ok(), accepted, "weeks = {weeks}");
    }
}

#[test]
fn back_and_forward_replay_without_losing_entries() {
    let mut session = WizardSession::new();
    session.submit_step(&text("+1")).unwrap();
    session.submit_step(&text("Alice")).unwrap();

    assert_eq!(session.back(), Ok(StepId::Nomination));
    assert_eq!(session.back(), Ok(StepId::Vote));
    assert_eq!(
        session.back(),
        Err(WizardError::Navigation(NavigationError::AtStart))
    );
    assert_eq!(session.forward(), Ok(StepId::Nomination));
    assert_eq!(session.forward(), Ok(StepId::Feature));
    assert_eq!(
        session.forward(),
        Err(WizardError::Navigation(NavigationError::NoNextStep))
    );
    assert_eq!(session.history().len(), 3);
}

#[test]
fn changing_the_vote_discards_the_old_branch() {
    let mut session = WizardSession::new();
    session.submit_step(&text("+1")).unwrap();
    session.submit_step(&text("Alice")).unwrap();
    session.back().unwrap();
    session.back().unwrap();

    let outcome = session.submit_step(&text("-1")).unwrap();

    assert_eq!(outcome.next, StepId::Removal);
    assert_eq!(session.history().entries(), &[StepId::Vote, StepId::Removal]);
    assert_eq!(
        session.forward(),
        Err(WizardError::Navigation(NavigationError::NoNextStep))
    );
}

#[test]
fn resubmitting_the_current_step_does_not_duplicate_history() {
    let mut session = WizardSession::new();
    session.submit_step(&text("0")).unwrap();
    session.back().unwrap();
    session.submit_step(&text("0")).unwrap();
    assert_eq!(session.history().entries(), &[StepId::Vote, StepId::Feature]);
    assert_eq!(session.history().cursor(), Some(1));
}

#[test]
fn sessions_are_independent() {
    let mut first = WizardSession::new();
    let second = WizardSession::new();
    first.submit_step(&text("1")).unwrap();
    assert_ne!(first.id(), second.id());
    assert_eq!(second.current(), Some(StepId::Vote));
}
