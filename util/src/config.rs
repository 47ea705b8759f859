//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from `.env` and the process environment.
//! Values are read through the free functions at the bottom of this module
//! (`config::port()`, `config::ai_server_url()`, ...). Tests may override single
//! fields with the per-field setters and restore everything with [`AppConfig::reset`].

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub storage_root: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub ai_server_url: String,
    pub ai_timeout_seconds: u64,
    pub ai_extract_max_attempts: u32,
    pub ai_evaluate_max_attempts: u32,
    pub ai_retry_base_delay_ms: u64,
    pub super_admin_email: String,
    pub super_admin_password: String,
    pub sweep_interval_seconds: u64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing or malformed values fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "assessment-platform"),
            log_level: var_or("LOG_LEVEL", "api=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/app.db"),
            storage_root: var_or("STORAGE_ROOT", "data/uploads"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 9100),
            jwt_secret: var_or("JWT_SECRET", "change-me"),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 1440),
            ai_server_url: var_or("AI_SERVER_URL", "http://127.0.0.1:8000"),
            ai_timeout_seconds: parsed_or("AI_TIMEOUT_SECONDS", 600),
            ai_extract_max_attempts: parsed_or("AI_EXTRACT_MAX_ATTEMPTS", 3),
            ai_evaluate_max_attempts: parsed_or("AI_EVALUATE_MAX_ATTEMPTS", 2),
            ai_retry_base_delay_ms: parsed_or("AI_RETRY_BASE_DELAY_MS", 1000),
            super_admin_email: env::var("S_ADMIN_EMAIL").unwrap_or_default(),
            super_admin_password: env::var("S_ADMIN_PASS").unwrap_or_default(),
            sweep_interval_seconds: parsed_or("SWEEP_INTERVAL_SECONDS", 60),
        }
    }

    /// Returns a shared reference to the global configuration.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.storage_root = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value);
    }

    pub fn set_ai_server_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.ai_server_url = value.into());
    }

    pub fn set_ai_retry_base_delay_ms(value: u64) {
        AppConfig::set_field(|cfg| cfg.ai_retry_base_delay_ms = value);
    }

    pub fn set_super_admin(email: impl Into<String>, password: impl Into<String>) {
        AppConfig::set_field(|cfg| {
            cfg.super_admin_email = email.into();
            cfg.super_admin_password = password.into();
        });
    }
}

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn storage_root() -> String {
    AppConfig::global().storage_root.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn ai_server_url() -> String {
    AppConfig::global().ai_server_url.clone()
}

pub fn ai_timeout_seconds() -> u64 {
    AppConfig::global().ai_timeout_seconds
}

pub fn ai_extract_max_attempts() -> u32 {
    AppConfig::global().ai_extract_max_attempts
}

pub fn ai_evaluate_max_attempts() -> u32 {
    AppConfig::global().ai_evaluate_max_attempts
}

pub fn ai_retry_base_delay_ms() -> u64 {
    AppConfig::global().ai_retry_base_delay_ms
}

pub fn super_admin_email() -> String {
    AppConfig::global().super_admin_email.clone()
}

pub fn super_admin_password() -> String {
    AppConfig::global().super_admin_password.clone()
}

pub fn sweep_interval_seconds() -> u64 {
    AppConfig::global().sweep_interval_seconds
}
