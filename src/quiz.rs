//! Quiz Flow
//!
//! Sequences the quiz for a presentation layer: pages of items, answering,
//! step navigation, completion and reset. Every mutation is written
//! through to the session store before returning.

use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::bank::{Item, QuestionBank};
use crate::scoring::{assess, Assessment, SCALE_MAX, SCALE_MIN};
use crate::session::{KeyValueStorage, SessionState, SessionStore};

#[derive(Debug, Error, PartialEq)]
pub enum QuizError {
    #[error("item '{0}' is not in the question bank")]
    UnknownItem(String),
    #[error("response {value} for item '{id}' is outside 0..=6")]
    OutOfRange { id: String, value: i32 },
    #[error("every item on the current step must be answered first")]
    StepIncomplete,
    #[error("results are only available from the last step")]
    NotOnLastStep,
    #[error("the quiz has not been completed")]
    NotComplete,
}

/// Answered items out of the whole bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }
}

pub struct Quiz<S: KeyValueStorage, R: Rng> {
    store: SessionStore<S>,
    rng: R,
    page_size: usize,
    state: SessionState,
}

impl<S: KeyValueStorage, R: Rng> Quiz<S, R> {
    /// Restore the saved session or start a freshly shuffled one.
    pub fn resume(store: SessionStore<S>, mut rng: R, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let last_step = store.bank().step_count(page_size) - 1;

        let state = match store.load() {
            Some(mut state) => {
                if state.current_step > last_step {
                    debug!("Clamping saved step {} to {}", state.current_step, last_step);
                    state.current_step = last_step;
                }
                state
            }
            None => {
                info!("Starting a fresh session with {} items", store.bank().len());
                SessionState::fresh(store.bank(), &mut rng)
            }
        };

        let quiz = Self {
            store,
            rng,
            page_size,
            state,
        };
        quiz.persist();
        quiz
    }

    fn persist(&self) {
        self.store.save(&self.state);
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        self.store.bank()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn step_count(&self) -> usize {
        self.bank().step_count(self.page_size)
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn start(&mut self) {
        self.state.has_started = true;
        self.persist();
    }

    /// Items shown on the current step, in the session's shuffled order.
    pub fn current_items(&self) -> Vec<&Item> {
        let bank = self.store.bank();
        let start = (self.state.current_step * self.page_size).min(self.state.item_order.len());
        let end = (start + self.page_size).min(self.state.item_order.len());
        self.state.item_order[start..end]
            .iter()
            .filter_map(|id| bank.get(id))
            .collect()
    }

    /// Record a 0-6 response. Re-answering keeps the original position.
    pub fn answer(&mut self, id: &str, value: i32) -> Result<(), QuizError> {
        if !self.store.bank().contains(id) {
            return Err(QuizError::UnknownItem(id.to_string()));
        }
        if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
            return Err(QuizError::OutOfRange {
                id: id.to_string(),
                value,
            });
        }

        self.state.responses.insert(id.to_string(), value);
        self.persist();
        Ok(())
    }

    pub fn is_step_complete(&self) -> bool {
        let items = self.current_items();
        !items.is_empty() && items.iter().all(|item| self.state.is_answered(&item.id))
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step + 1 == self.step_count()
    }

    /// Advance one step. Staying put on the last step is not an error.
    pub fn next(&mut self) -> Result<(), QuizError> {
        if !self.is_step_complete() {
            return Err(QuizError::StepIncomplete);
        }
        if !self.is_last_step() {
            self.state.current_step += 1;
            self.persist();
        }
        Ok(())
    }

    pub fn back(&mut self) {
        if self.state.current_step > 0 {
            self.state.current_step -= 1;
            self.persist();
        }
    }

    pub fn progress(&self) -> Progress {
        let bank = self.store.bank();
        Progress {
            answered: self
                .state
                .responses
                .keys()
                .filter(|id| bank.contains(id))
                .count(),
            total: bank.len(),
        }
    }

    /// Mark the quiz complete and compute the result.
    pub fn finish(&mut self) -> Result<Assessment, QuizError> {
        if !self.is_last_step() {
            return Err(QuizError::NotOnLastStep);
        }
        if !self.is_step_complete() {
            return Err(QuizError::StepIncomplete);
        }

        self.state.is_complete = true;
        self.persist();

        let assessment = assess(self.store.bank(), &self.state.responses);
        info!("Quiz complete: {}", assessment.type_code);
        Ok(assessment)
    }

    pub fn result(&self) -> Result<Assessment, QuizError> {
        if !self.state.is_complete {
            return Err(QuizError::NotComplete);
        }
        Ok(assess(self.store.bank(), &self.state.responses))
    }

    /// Back to the start screen. Answers and position are kept.
    pub fn go_home(&mut self) {
        self.state.has_started = false;
        self.state.is_complete = false;
        self.persist();
    }

    /// Discard everything and begin again with a new order.
    pub fn reset(&mut self) {
        self.store.clear();
        self.state = SessionState::fresh(self.store.bank(), &mut self.rng);
        self.persist();
        info!("Session reset");
    }
}
