//! The `truthcheck export-questions` command.

use std::path::PathBuf;

use anyhow::Result;

use truthcheck_client::ClientConfig;

use crate::download;

pub async fn execute(config: &ClientConfig, output: Option<PathBuf>) -> Result<()> {
    let controller = super::admin_controller(config);
    let export = controller.export_questions().await?;

    println!("{}", super::question_table(&export.rows));

    let dir = output.unwrap_or_else(|| config.output_dir.clone());
    let path = download::save(&dir, "questions.csv", &export.csv)?;
    println!("Saved {} questions to {}", export.rows.len(), path.display());

    Ok(())
}
