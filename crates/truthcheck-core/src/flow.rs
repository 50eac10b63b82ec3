//! The quiz flow state machine.
//!
//! Drives a participant through the ordered states
//! `Intro → Page(0) → … → Page(N-1) → Outro → SubmittingResults`. The
//! machine owns the collected ids and the answered flags; presentation
//! (page visibility, the fixed transition delay, control styling) belongs
//! to the view layer driving it.

use crate::form::{DemographicForm, Field};
use crate::model::{Answer, QuizPage};

/// Position in the quiz sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Intro,
    /// Index into the page sequence (not the page's id attribute).
    Page(usize),
    Outro,
    SubmittingResults,
}

/// A participant's verdict on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Fake,
    Real,
}

/// Outcome of an outro submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; the flow moved to `SubmittingResults` and the
    /// finished answer is ready to POST.
    Accepted(Answer),
    /// One or more controls failed validation; the flow stays at the outro.
    Invalid(Vec<Field>),
    /// The flow is not at the outro; nothing happened.
    NotReady,
}

/// State machine over the fixed page sequence of one quiz session.
#[derive(Debug, Clone)]
pub struct QuizFlow {
    seed: String,
    pages: Vec<QuizPage>,
    state: QuizState,
    answered: Vec<bool>,
    real: Vec<u32>,
    fake: Vec<u32>,
}

impl QuizFlow {
    pub fn new(seed: impl Into<String>, pages: Vec<QuizPage>) -> Self {
        let answered = vec![false; pages.len()];
        Self {
            seed: seed.into(),
            pages,
            state: QuizState::Intro,
            answered,
            real: Vec::new(),
            fake: Vec::new(),
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The page currently shown, when the flow is on one.
    pub fn current_page(&self) -> Option<&QuizPage> {
        match self.state {
            QuizState::Page(i) => self.pages.get(i),
            _ => None,
        }
    }

    /// Record the participant's verdict on the current page.
    ///
    /// The first choice on a page disables both choice controls for it;
    /// repeated calls on an already-answered page are no-ops, as are calls
    /// outside a question page. The visible page does not change here —
    /// the view advances after its transition delay.
    pub fn choose(&mut self, choice: Choice) -> QuizState {
        if let QuizState::Page(i) = self.state {
            if !self.answered[i] {
                self.answered[i] = true;
                let id = self.pages[i].id;
                match choice {
                    Choice::Fake => self.fake.push(id),
                    Choice::Real => self.real.push(id),
                }
            }
        }
        self.state
    }

    /// Swap which page is visible: from the intro to the first page, or
    /// from an answered page to the next (the outro after the last page).
    ///
    /// Advancing an unanswered page is a no-op, so a page cannot be
    /// skipped without a verdict.
    pub fn advance(&mut self) -> QuizState {
        self.state = match self.state {
            QuizState::Intro => self.first_page_or_outro(0),
            QuizState::Page(i) if self.answered[i] => self.first_page_or_outro(i + 1),
            other => other,
        };
        self.state
    }

    fn first_page_or_outro(&self, index: usize) -> QuizState {
        if index < self.pages.len() {
            QuizState::Page(index)
        } else {
            QuizState::Outro
        }
    }

    /// Attempt the outro submission with the given demographic form.
    ///
    /// On success the flow moves to `SubmittingResults` and yields the
    /// finished answer: both id lists deduplicated, sorted ascending, and
    /// drawn only from pages actually traversed.
    pub fn submit(&mut self, form: &DemographicForm) -> SubmitOutcome {
        if self.state != QuizState::Outro {
            return SubmitOutcome::NotReady;
        }

        let invalid = form.validate();
        if !invalid.is_empty() {
            return SubmitOutcome::Invalid(invalid);
        }

        // resolved_country is Some whenever validation passes
        let country = form.resolved_country().unwrap_or_default();
        let side = form.side.value().unwrap_or_default().to_string();

        let answer = Answer::new(
            self.seed.clone(),
            self.real.clone(),
            self.fake.clone(),
            country,
            side,
            form.age.clone(),
        );

        self.state = QuizState::SubmittingResults;
        SubmitOutcome::Accepted(answer)
    }
}
