use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::exercise::{Exercise, ExerciseKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetError {
    #[error("no exercise at index {index} (set holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no exercise with id {0}")]
    UnknownId(usize),
}

/// Completed exercises out of all registered ones
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub completed: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Ordered registry of exercises plus the learner's current selection
#[derive(Debug, Default)]
pub struct ExerciseSet {
    exercises: Vec<Exercise>,
    selected: usize,
}

impl ExerciseSet {
    /// Registers `kinds` in order, numbering them from 1
    pub fn new(kinds: impl IntoIterator<Item = Box<dyn ExerciseKind>>) -> Self {
        let mut set = Self::default();
        for kind in kinds {
            set.register(kind);
        }
        set
    }

    pub fn register(&mut self, kind: Box<dyn ExerciseKind>) -> &mut Exercise {
        let id = self.exercises.len() + 1;
        self.exercises.push(Exercise::new(id, kind));
        log::debug!("Registered exercise {id}");
        &mut self.exercises[id - 1]
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    pub fn get(&self, id: usize) -> Result<&Exercise, SetError> {
        id.checked_sub(1)
            .and_then(|index| self.exercises.get(index))
            .ok_or(SetError::UnknownId(id))
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Switches the current exercise (0-based index)
    pub fn select(&mut self, index: usize) -> Result<&Exercise, SetError> {
        let exercise = self.exercises.get(index).ok_or(SetError::IndexOutOfRange {
            index,
            len: self.exercises.len(),
        })?;
        self.selected = index;
        log::debug!("Selected exercise {}", exercise.id());
        Ok(exercise)
    }

    pub fn current(&self) -> Result<&Exercise, SetError> {
        self.exercises
            .get(self.selected)
            .ok_or(SetError::IndexOutOfRange {
                index: self.selected,
                len: self.exercises.len(),
            })
    }

    pub fn current_mut(&mut self) -> Result<&mut Exercise, SetError> {
        let len = self.exercises.len();
        self.exercises
            .get_mut(self.selected)
            .ok_or(SetError::IndexOutOfRange {
                index: self.selected,
                len,
            })
    }

    pub fn score(&self) -> Score {
        Score {
            completed: self.exercises.iter().filter(|e| e.is_complete()).count(),
            total: self.exercises.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::catalogue;

    #[test]
    fn test_ids_follow_registration_order() {
        let set = ExerciseSet::new(catalogue());
        let ids: Vec<usize> = set.iter().map(Exercise::id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(set.get(3).unwrap().title(), "Inputting numbers");
        assert_eq!(set.get(0).unwrap_err(), SetError::UnknownId(0));
        assert_eq!(set.get(11).unwrap_err(), SetError::UnknownId(11));
    }

    #[test]
    fn test_selection() {
        let mut set = ExerciseSet::new(catalogue());
        assert_eq!(set.current().unwrap().id(), 1);
        assert_eq!(set.select(8).unwrap().title(), "Draw a square");
        assert_eq!(set.current().unwrap().id(), 9);
        assert_eq!(
            set.select(10).unwrap_err(),
            SetError::IndexOutOfRange { index: 10, len: 10 }
        );
        assert_eq!(set.selected_index(), 8);
    }

    #[test]
    fn test_empty_set_has_no_current() {
        let mut set = ExerciseSet::default();
        assert!(set.current().is_err());
        assert!(set.current_mut().is_err());
        assert_eq!(set.score().to_string(), "0/0");
    }

    #[test]
    fn test_score_counts_completed() {
        let mut set = ExerciseSet::new(catalogue());
        assert_eq!(set.score(), Score { completed: 0, total: 10 });
        set.current_mut().unwrap().set_complete(true);
        set.select(3).unwrap();
        set.current_mut().unwrap().set_complete(true);
        assert_eq!(set.score().to_string(), "2/10");
    }
}
