//! truthcheck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod banner;
mod commands;
mod download;
mod view;

#[derive(Parser)]
#[command(
    name = "truthcheck",
    version,
    about = "Client toolkit for the true-or-fake news quiz"
)]
struct Cli {
    /// Server base URL (overrides config)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Take,

    /// Export the question table as questions.csv
    ExportQuestions {
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export all answers as answers.csv
    ExportAnswers {
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only export answers created after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<String>,
    },

    /// Upload a replacement questions CSV
    UploadQuestions {
        /// Path to the CSV file
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("truthcheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config = match truthcheck_client::load_config_from(cli.config.as_deref()) {
        Ok(mut config) => {
            if let Some(server) = cli.server {
                config.server_url = server;
            }
            config
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Take => commands::take::execute(&config).await,
        Commands::ExportQuestions { output } => {
            commands::export_questions::execute(&config, output).await
        }
        Commands::ExportAnswers { output, since } => {
            commands::export_answers::execute(&config, output, since).await
        }
        Commands::UploadQuestions { file } => commands::upload::execute(&config, file).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
