//! Subcommand implementations.

pub mod export_answers;
pub mod export_questions;
pub mod take;
pub mod upload;

use comfy_table::Table;

use truthcheck_client::{AdminController, ClientConfig};
use truthcheck_core::csv::QuestionRow;

pub(crate) fn admin_controller(config: &ClientConfig) -> AdminController {
    AdminController::new(
        config.server_url.clone(),
        config.admin_username.clone(),
        config.admin_password.clone(),
    )
}

/// Render question rows the way the management table shows them.
pub(crate) fn question_table(rows: &[QuestionRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Claims", "Fake", "Question"]);
    for row in rows {
        table.add_row(vec![&row.id, &row.claims, &row.fake, &row.question]);
    }
    table
}
