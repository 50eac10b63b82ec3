//! The service seam between the quiz flow driver and the HTTP client.
//!
//! Implemented over HTTP by `truthcheck-client`; the mock implementation
//! there drives the flow in tests without a server.

use async_trait::async_trait;

use crate::model::{Answer, QuizDocument};

/// The quiz page's network surface.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// Fetch and parse the quiz document for a new session.
    async fn fetch_quiz(&self) -> anyhow::Result<QuizDocument>;

    /// Submit a completed answer.
    ///
    /// The response is a full-page navigation document and is not consumed
    /// programmatically; only the status matters.
    async fn submit_answer(&self, answer: &Answer) -> anyhow::Result<()>;
}
