//! truthcheck-client — the quiz service's HTTP surface.
//!
//! Implements the `QuizService` trait over HTTP for the public quiz page,
//! and the admin export/import operations against the management endpoints.

pub mod admin;
pub mod config;
pub mod error;
pub mod mock;
pub mod quiz;

pub use admin::{AdminController, QuestionsExport};
pub use config::{load_config, load_config_from, ClientConfig};
pub use error::ClientError;
pub use quiz::QuizClient;
