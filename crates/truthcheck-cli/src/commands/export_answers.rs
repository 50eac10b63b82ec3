//! The `truthcheck export-answers` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::DateTime;
use indicatif::{ProgressBar, ProgressStyle};

use truthcheck_client::ClientConfig;

use crate::download;

pub async fn execute(
    config: &ClientConfig,
    output: Option<PathBuf>,
    since: Option<String>,
) -> Result<()> {
    let since = since
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .with_context(|| format!("invalid --since timestamp: {s}"))
        })
        .transpose()?;

    let controller = super::admin_controller(config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Exporting answers...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = controller.export_answers(since).await;
    spinner.finish_and_clear();
    let csv = result?;

    // Every line after the header is one answer row.
    let rows = csv.lines().count().saturating_sub(1);
    let dir = output.unwrap_or_else(|| config.output_dir.clone());
    let path = download::save(&dir, "answers.csv", &csv)?;
    println!("Saved {rows} answers to {}", path.display());

    Ok(())
}
