//! Core data model types for truthcheck.
//!
//! These are the fundamental types the whole system uses to represent the
//! quiz document served by the quiz page, a participant's finished answer,
//! and the question rows managed through the admin surface.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Placeholder value shown by unselected form controls.
pub const DEFAULT_OPTION: &str = "Select an option";

/// Country the US yes/no toggle collapses to.
pub const UNITED_STATES: &str = "United States";

/// Fixed delay between hiding one quiz page and revealing the next.
pub const ANIMATION_DELAY: Duration = Duration::from_millis(240);

/// A participant's completed quiz answer.
///
/// Created once the outro form passes validation, cached locally for
/// pre-filling a later visit, and submitted as a form-encoded POST. The
/// server is the system of record after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Opaque session seed issued by the quiz page.
    pub seed: String,
    /// Ids of pages judged real, deduplicated and sorted ascending.
    pub real: Vec<u32>,
    /// Ids of pages judged fake, deduplicated and sorted ascending.
    pub fake: Vec<u32>,
    /// Resolved country (the specific selection, or "United States").
    pub country: String,
    /// Chosen side.
    pub side: String,
    /// Age as entered; numeric by validation.
    pub age: String,
}

impl Answer {
    /// Build an answer, normalizing both id lists.
    pub fn new(
        seed: impl Into<String>,
        real: Vec<u32>,
        fake: Vec<u32>,
        country: impl Into<String>,
        side: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            seed: seed.into(),
            real: normalize_ids(real),
            fake: normalize_ids(fake),
            country: country.into(),
            side: side.into(),
            age: age.into(),
        }
    }

    /// The `real` list in its wire form: comma-joined ascending ids.
    pub fn real_field(&self) -> String {
        join_ids(&self.real)
    }

    /// The `fake` list in its wire form: comma-joined ascending ids.
    pub fn fake_field(&self) -> String {
        join_ids(&self.fake)
    }

    /// Every field of the submission POST, in submission order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("seed", self.seed.clone()),
            ("real", self.real_field()),
            ("fake", self.fake_field()),
            ("country", self.country.clone()),
            ("side", self.side.clone()),
            ("age", self.age.clone()),
        ]
    }
}

fn normalize_ids(mut ids: Vec<u32>) -> Vec<u32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// One question page of the quiz document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPage {
    /// The page's identifying integer id attribute.
    pub id: u32,
    /// The claim text shown on the page.
    pub text: String,
}

/// The parsed quiz document: session seed plus the page sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDocument {
    pub seed: String,
    pub pages: Vec<QuizPage>,
}

/// A question as stored server-side, parsed from an uploaded CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    /// Which group the claim is attributed to.
    pub claims: String,
    /// Whether the claim is fabricated.
    pub fake: bool,
    /// The claim text.
    pub text: String,
}
