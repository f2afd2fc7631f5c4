//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::services::RetryPolicy;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "punch-clock")]
#[command(about = "A state-managed HTTP server for tracking work sessions and breaks")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// User whose sessions are tracked
    #[arg(short, long, default_value = "local")]
    pub user: String,

    /// Expected work hours per day (display only)
    #[arg(short, long, default_value = "8")]
    pub work_hours: f64,

    /// Attempts per record store write
    #[arg(long, default_value = "3")]
    pub persist_retries: u32,

    /// Delay between record store attempts, in milliseconds
    #[arg(long, default_value = "250")]
    pub retry_delay_ms: u64,

    /// Timeout for a single record store call, in milliseconds
    #[arg(long, default_value = "5000")]
    pub persist_timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Retry policy for record store calls
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.persist_retries,
            Duration::from_millis(self.retry_delay_ms),
            Duration::from_millis(self.persist_timeout_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["punch-clock"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.user, "local");
        assert_eq!(config.work_hours, 8.0);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "punch-clock",
            "--port",
            "9000",
            "--user",
            "gail",
            "--persist-retries",
            "0",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.user, "gail");
        assert_eq!(config.retry_policy().attempts, 1);
        assert_eq!(config.log_level(), "debug");
    }
}
