//! Service configuration
//!
//! Values are layered: built-in defaults, then an optional `cart.toml` in the
//! working directory, then `CART_*` environment variables.

use anyhow::Result;
use serde::Deserialize;

/// Settings for the HTTP service
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Apply embedded migrations at start-up
    pub run_migrations: bool,
}

impl AppConfig {
    /// Load the configuration
    ///
    /// # Environment Variables
    /// - `CART_HOST` (default: "0.0.0.0")
    /// - `CART_PORT` (default: 3000)
    /// - `CART_LOG_LEVEL` (default: "info")
    /// - `CART_RUN_MIGRATIONS` (default: true)
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("log_level", "info")?
            .set_default("run_migrations", true)?
            .add_source(config::File::with_name("cart").required(false))
            .add_source(config::Environment::with_prefix("CART").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
