//! Quiz page client.
//!
//! Fetches the quiz document, extracts the session seed and question pages
//! from its markup, and submits a finished answer as a form-encoded POST —
//! the same surface the page's own script uses.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::instrument;

use truthcheck_core::model::{Answer, QuizDocument, QuizPage};
use truthcheck_core::traits::QuizService;

use crate::error::ClientError;

/// HTTP client for the public quiz page.
pub struct QuizClient {
    base_url: String,
    client: reqwest::Client,
}

impl QuizClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        // No request timeout: a hung request stalls only its own operation.
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to build HTTP client");

        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl QuizService for QuizClient {
    #[instrument(skip(self))]
    async fn fetch_quiz(&self) -> anyhow::Result<QuizDocument> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                operation: "quiz fetch",
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(parse_quiz_document(&body)?)
    }

    #[instrument(skip(self, answer), fields(seed = %answer.seed))]
    async fn submit_answer(&self, answer: &Answer) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.base_url)
            .form(&answer.form_fields())
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                operation: "answer submission",
                status: status.as_u16(),
            }
            .into());
        }

        // The body is the results page; it is not consumed.
        Ok(())
    }
}

/// Parse the quiz markup into a document.
///
/// The `#quiz` element carries the session seed and the page count; each
/// `#page{i}` element carries its identifying id attribute and the claim
/// text. A missing page is the "Failed to load questions." path.
pub fn parse_quiz_document(html: &str) -> Result<QuizDocument, ClientError> {
    let document = Html::parse_document(html);

    let quiz = select_one(&document, "#quiz")?;
    if quiz.value().attr("data-answers").is_some() {
        return Err(ClientError::Parse(
            "quiz document is a results page".into(),
        ));
    }

    let seed = quiz
        .value()
        .attr("data-seed")
        .ok_or_else(|| ClientError::Parse("missing data-seed on #quiz".into()))?
        .to_string();
    let count: usize = quiz
        .value()
        .attr("data-count")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ClientError::Parse("missing or invalid data-count on #quiz".into()))?;

    let mut pages = Vec::with_capacity(count);
    for i in 0..count {
        let page = select_one(&document, &format!("#page{i}"))?;
        let id = page
            .value()
            .attr("data-id")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| ClientError::Parse(format!("missing or invalid id on page {i}")))?;
        pages.push(QuizPage {
            id,
            text: element_text(&page),
        });
    }

    Ok(QuizDocument { seed, pages })
}

fn select_one<'a>(
    document: &'a Html,
    css: &str,
) -> Result<scraper::ElementRef<'a>, ClientError> {
    let selector =
        Selector::parse(css).map_err(|e| ClientError::Parse(format!("bad selector: {e}")))?;
    document
        .select(&selector)
        .next()
        .ok_or_else(|| ClientError::Parse(format!("missing element: {css}")))
}

/// Whitespace-normalized text content of an element.
fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
