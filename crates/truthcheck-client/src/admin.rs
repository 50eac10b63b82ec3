//! Admin export/import operations.
//!
//! Three independent operations against the management endpoints, each
//! guarded by a one-shot in-flight flag so a repeated trigger cannot
//! re-enter an operation that is still running. The guards are per
//! operation, not a general lock: different operations may overlap.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, FixedOffset};
use scraper::{Html, Selector};
use tracing::instrument;

use truthcheck_core::csv::{self, QuestionRow, ANSWERS_HEADER, MAX_PAGES};

use crate::error::ClientError;

/// Client for the admin surface: question-table export, paginated answers
/// export, and question upload.
pub struct AdminController {
    base_url: String,
    username: String,
    password: String,
    client: reqwest::Client,
    exporting_questions: AtomicBool,
    exporting_answers: AtomicBool,
    uploading: AtomicBool,
}

/// Result of a questions export: the rows as read from the management
/// table, plus the assembled CSV.
#[derive(Debug, Clone)]
pub struct QuestionsExport {
    pub rows: Vec<QuestionRow>,
    pub csv: String,
}

impl AdminController {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        // No request timeout: a hung request stalls only its own operation.
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to build HTTP client");

        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            client,
            exporting_questions: AtomicBool::new(false),
            exporting_answers: AtomicBool::new(false),
            uploading: AtomicBool::new(false),
        }
    }

    /// Read the management page's question table into a CSV.
    #[instrument(skip(self))]
    pub async fn export_questions(&self) -> Result<QuestionsExport, ClientError> {
        let _guard = Guard::acquire(&self.exporting_questions)?;

        let response = self
            .client
            .get(format!("{}/admin/management", self.base_url))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                operation: "questions export",
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(network)?;
        let rows = parse_question_table(&body)?;
        let csv = csv::questions_csv(&rows);
        Ok(QuestionsExport { rows, csv })
    }

    /// Accumulate the full answers CSV through the paginated endpoint.
    ///
    /// Each iteration fetches one page, passing the last-seen `created`
    /// timestamp as the cursor. A non-success page is logged and
    /// contributes nothing; an empty body means the last page was already
    /// consumed; a short page (fewer than a full page's worth of lines) is
    /// the final one. The iteration ceiling bounds the export if the
    /// server never signals completion cleanly.
    #[instrument(skip(self, since))]
    pub async fn export_answers(
        &self,
        since: Option<DateTime<FixedOffset>>,
    ) -> Result<String, ClientError> {
        let _guard = Guard::acquire(&self.exporting_answers)?;

        let mut answers = String::from(ANSWERS_HEADER);
        let mut cursor: Option<String> = since.map(|t| t.to_rfc3339());

        for page in 0..MAX_PAGES {
            let mut request = self
                .client
                .get(format!("{}/admin/answers", self.base_url))
                .basic_auth(&self.username, Some(&self.password));
            if let Some(created) = &cursor {
                request = request.query(&[("created", created)]);
            }

            let response = request.send().await.map_err(network)?;
            let status = response.status();
            if !status.is_success() {
                tracing::error!(page, status = status.as_u16(), "failed to get answers page");
                continue;
            }

            let body = response.text().await.map_err(network)?;
            if body.is_empty() {
                break;
            }

            if let Some(next) = csv::extract_cursor(&body) {
                cursor = Some(next.to_string());
            }
            answers.push_str(&body);

            if csv::is_final_page(&body) {
                break;
            }
        }

        Ok(answers)
    }

    /// Upload a replacement questions CSV as a multipart form.
    ///
    /// Status 200 is the only success; anything else abandons the
    /// operation.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn upload_questions(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<(), ClientError> {
        let _guard = Guard::acquire(&self.uploading)?;

        let part = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/admin/questions", self.base_url))
            .basic_auth(&self.username, Some(&self.password))
            .multipart(form)
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if status == reqwest::StatusCode::OK {
            Ok(())
        } else {
            Err(ClientError::UploadRejected {
                status: status.as_u16(),
            })
        }
    }
}

/// One-shot in-flight flag, released when the operation finishes.
struct Guard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> Guard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ClientError> {
        if flag.swap(true, Ordering::SeqCst) {
            return Err(ClientError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for Guard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn network(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

/// Read the visible question table's body rows: four cell texts per row.
fn parse_question_table(html: &str) -> Result<Vec<QuestionRow>, ClientError> {
    let document = Html::parse_document(html);
    let row_selector =
        Selector::parse("tbody tr").map_err(|e| ClientError::Parse(e.to_string()))?;
    let cell_selector = Selector::parse("td").map_err(|e| ClientError::Parse(e.to_string()))?;

    let mut rows = Vec::new();
    for row in document.select(&row_selector) {
        let mut cells = row.select(&cell_selector).map(|cell| {
            cell.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        });
        let (Some(id), Some(claims), Some(fake), Some(question)) =
            (cells.next(), cells.next(), cells.next(), cells.next())
        else {
            continue;
        };
        rows.push(QuestionRow {
            id,
            claims,
            fake,
            question,
        });
    }

    Ok(rows)
}
