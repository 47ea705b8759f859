//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection and the
//! AI service client. It is cloned into every handler via Axum's `State<T>`
//! extractor; both members are cheap to clone.

use ai::{AiClient, AiError, RetryPolicy};
use sea_orm::DatabaseConnection;
use std::time::Duration;

use crate::config;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The `AiClient` used for assessment extraction and answer evaluation.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ai: AiClient,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and AI client.
    pub fn new(db: DatabaseConnection, ai: AiClient) -> Self {
        Self { db, ai }
    }

    /// Builds the state for `db`, configuring the AI client from [`config`].
    pub fn from_config(db: DatabaseConnection) -> Result<Self, AiError> {
        let base_delay = Duration::from_millis(config::ai_retry_base_delay_ms());
        let ai = AiClient::new(
            config::ai_server_url(),
            Duration::from_secs(config::ai_timeout_seconds()),
        )?
        .with_policies(
            RetryPolicy::new(config::ai_extract_max_attempts(), base_delay),
            RetryPolicy::new(config::ai_evaluate_max_attempts(), base_delay),
        );
        Ok(Self::new(db, ai))
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the AI client.
    pub fn ai(&self) -> &AiClient {
        &self.ai
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for spawned tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
