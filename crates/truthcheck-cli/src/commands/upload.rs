//! The `truthcheck upload-questions` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use truthcheck_client::{ClientConfig, ClientError};
use truthcheck_core::csv::parse_questions_csv;

use crate::banner;

pub async fn execute(config: &ClientConfig, file: PathBuf) -> Result<()> {
    let content =
        std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;

    // Preflight with the same reading of the format the server applies.
    let text = String::from_utf8_lossy(&content);
    let questions =
        parse_questions_csv(&text).context("refusing to upload: the CSV does not parse")?;

    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("questions.csv")
        .to_string();

    let controller = super::admin_controller(config);
    match controller.upload_questions(&filename, content).await {
        Ok(()) => {
            println!("Uploaded {} questions.", questions.len());
            // Page-reload analog: show the refreshed question table.
            match controller.export_questions().await {
                Ok(export) => println!("{}", super::question_table(&export.rows)),
                Err(e) => tracing::warn!("failed to refresh question list: {e}"),
            }
            Ok(())
        }
        Err(e @ ClientError::UploadRejected { .. }) => {
            banner::show("Failed to upload questions.");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
