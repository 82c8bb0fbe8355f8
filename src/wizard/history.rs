use crate::errors::NavigationError;

use super::step::StepId;

/// Single path of visited steps plus a cursor.
///
/// `cursor == None` means the wizard has not entered its first step yet.
/// Moving back only moves the cursor so [`NavigationHistory::forward`] can
/// replay; advancing from an earlier position drops the replayable tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<StepId>,
    cursor: Option<usize>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a transition to `step` and returns the new cursor.
    ///
    /// Re-entering the step at the cursor is a no-op.
    pub fn advance(&mut self, step: StepId) -> usize {
        if let Some(index) = self.cursor {
            if self.entries[index] == step {
                return index;
            }
        }
        let next = self.cursor.map_or(0, |index| index + 1);
        self.entries.truncate(next);
        self.entries.push(step);
        self.cursor = Some(next);
        next
    }

    pub fn back(&mut self) -> Result<StepId, NavigationError> {
        match self.cursor {
            None => Err(NavigationError::NotStarted),
            Some(0) => Err(NavigationError::AtStart),
            Some(index) => {
                self.cursor = Some(index - 1);
                Ok(self.entries[index - 1])
            }
        }
    }

    pub fn forward(&mut self) -> Result<StepId, NavigationError> {
        let next = self.cursor.map_or(0, |index| index + 1);
        match self.entries.get(next) {
            Some(step) => {
                self.cursor = Some(next);
                Ok(*step)
            }
            None => Err(NavigationError::NoNextStep),
        }
    }

    pub fn current(&self) -> Option<StepId> {
        self.cursor.map(|index| self.entries[index])
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor as a signed position, `-1` before the first step.
    pub fn position(&self) -> isize {
        self.cursor.map_or(-1, |index| index as isize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StepId] {
        &self.entries
    }

    /// Steps from the first entry up to and including the cursor.
    pub fn path(&self) -> &[StepId] {
        match self.cursor {
            Some(index) => &self.entries[..=index],
            None => &[],
        }
    }

    pub fn contains(&self, step: StepId) -> bool {
        self.path().contains(&step)
    }
}
