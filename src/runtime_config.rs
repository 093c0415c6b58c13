//! # Runtime Configuration Module
//!
//! Environment-driven settings that are not worth a CLI flag.
//!
//! ## Environment Variables
//!
//! ### `SKELETON_STACK_SIZE`
//!
//! Stack size for the may coroutines that serve requests. Accepts decimal
//! (`16384`) or hexadecimal (`0x4000`). Default: `0x4000` (16 KB).
//!
//! ### `SKELETON_FETCH_TIMEOUT_MS`
//!
//! Timeout for each request to the upstream problem store, in milliseconds.
//! Default: `5000`.
//!
//! ### `SKELETON_HEALTH_TTL_MS`
//!
//! How long a `/health` probe of the problem store is reused, in
//! milliseconds. `0` probes on every request. Default: `2000`.
//!
//! ## Usage
//!
//! ```rust
//! use skeleton_java::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_STACK_SIZE: usize = 0x4000;
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;
const DEFAULT_HEALTH_TTL_MS: u64 = 2000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
    /// Timeout for upstream problem-store requests
    pub fetch_timeout: Duration,
    /// Reuse window for upstream health probes
    pub health_ttl: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            health_ttl: Duration::from_millis(DEFAULT_HEALTH_TTL_MS),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let stack_size = lookup("SKELETON_STACK_SIZE")
            .and_then(|val| parse_size(&val))
            .unwrap_or(DEFAULT_STACK_SIZE);
        let fetch_timeout_ms = lookup("SKELETON_FETCH_TIMEOUT_MS")
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_MS);
        let health_ttl_ms = lookup("SKELETON_HEALTH_TTL_MS")
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(DEFAULT_HEALTH_TTL_MS);
        RuntimeConfig {
            stack_size,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            health_ttl: Duration::from_millis(health_ttl_ms),
        }
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
