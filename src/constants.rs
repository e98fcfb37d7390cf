// ABOUTME: Application constants and environment defaults for the server
// ABOUTME: Re-exports shared constants from nutricost-core and adds deployment defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

pub use nutricost_core::constants::*;

/// Defaults applied when an environment variable is unset
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8080;
    /// Listen address
    pub const HOST: &str = "0.0.0.0";
    /// Database location
    pub const DATABASE_URL: &str = "sqlite:./data/nutricost.db";
    /// Allowed CORS origins, `*` allows any
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Maximum `SQLite` pool connections for file databases
    pub const SQLITE_MAX_CONNECTIONS: u32 = 5;
    /// Seconds a writer waits on a locked `SQLite` database
    pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;
}

/// Environment variable names
pub mod env_vars {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Listen address
    pub const HOST: &str = "HOST";
    /// Database URL (`sqlite:...` or `memory://`)
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Comma separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Log level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Database URL schemes
pub mod database_schemes {
    /// `SQLite` URL prefix
    pub const SQLITE: &str = "sqlite:";
    /// In-memory `SQLite` URL
    pub const SQLITE_MEMORY: &str = "sqlite::memory:";
    /// In-memory store URL
    pub const MEMORY: &str = "memory://";
}
