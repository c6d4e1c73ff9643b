//! Environment-driven service configuration.
//!
//! Settings are parsed with clap so the same values can come from flags or
//! the environment. `DATABASE_URL` is required and missing configuration
//! fails startup with a clear usage message.

use std::net::SocketAddr;

use clap::Parser;

/// Runtime settings sourced from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-directory",
    about = "HTTP CRUD service for the users table"
)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: SocketAddr,
}
