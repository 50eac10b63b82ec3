//! CSV assembly and pagination helpers for the admin exports.
//!
//! The export endpoints speak plain comma-separated text: question rows as
//! `(id, claims, fake, question)` with only the free-text question field
//! quoted, answer rows newline-terminated with an RFC 3339 `created`
//! timestamp in the first column. The answers export walks pages of up to
//! [`PAGE_ROWS`] rows using that timestamp as a cursor.

use thiserror::Error;

use crate::model::Question;

/// Header of the questions export.
pub const QUESTIONS_HEADER: &str = "ID,claims,fake,question\n";

/// Header of the answers export.
pub const ANSWERS_HEADER: &str = "created,seed,country,side,age,answeredFake,answeredReal\n";

/// Rows per page served by the answers endpoint.
pub const PAGE_ROWS: usize = 4000;

/// Hard ceiling on pagination iterations (PAGE_ROWS * MAX_PAGES rows).
pub const MAX_PAGES: usize = 60;

/// One row of the management page's question table, as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow {
    pub id: String,
    pub claims: String,
    pub fake: String,
    pub question: String,
}

/// Assemble the questions CSV from table rows.
///
/// The question field is quoted; the other fields are written verbatim.
pub fn questions_csv(rows: &[QuestionRow]) -> String {
    let mut out = String::from(QUESTIONS_HEADER);
    for row in rows {
        out.push_str(&format!(
            "{},{},{},\"{}\"\n",
            row.id, row.claims, row.fake, row.question
        ));
    }
    out
}

/// Extract the pagination cursor from an answers page body.
///
/// The cursor is the first comma-delimited field of the last row beginning
/// with a year-prefixed timestamp. Returns `None` when the body holds no
/// such row (or the row has no comma), in which case the caller keeps its
/// previous cursor.
pub fn extract_cursor(body: &str) -> Option<&str> {
    let start = body.rfind("\n20").map(|i| i + 1).unwrap_or(0);
    let row = &body[start..];
    if !row.starts_with("20") {
        return None;
    }
    let comma = row.find(',')?;
    Some(&row[..comma])
}

/// Whether an answers page is the final one: fewer than a full page's worth
/// of newline-separated lines.
pub fn is_final_page(body: &str) -> bool {
    body.split('\n').count() < PAGE_ROWS
}

/// A questions CSV that cannot be uploaded.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("invalid question ID in row {row}: `{value}`")]
    InvalidId { row: usize, value: String },
}

/// Parse an uploaded questions CSV into typed rows.
///
/// Mirrors the server's reading of the format: a leading `ID` header row is
/// skipped, rows with fewer than three commas are skipped, the question
/// field rejoins any embedded commas and sheds one pair of surrounding
/// quotes, and a `real` classification marks the question as not fake.
pub fn parse_questions_csv(content: &str) -> Result<Vec<Question>, CsvError> {
    let mut questions = Vec::new();

    for (i, row) in content.split('\n').enumerate() {
        if i == 0 && row.starts_with("ID") {
            continue;
        }
        if row.matches(',').count() < 3 {
            continue;
        }

        let columns: Vec<&str> = row.split(',').collect();
        let id = columns[0].parse::<u32>().map_err(|_| CsvError::InvalidId {
            row: i,
            value: columns[0].to_string(),
        })?;

        let joined = columns[3..].join(",");
        let text = joined.strip_prefix('"').unwrap_or(&joined);
        let text = text.strip_suffix('"').unwrap_or(text);

        questions.push(Question {
            id,
            claims: columns[1].to_string(),
            fake: columns[2] != "real",
            text: text.to_string(),
        });
    }

    Ok(questions)
}
