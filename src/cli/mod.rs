//! # CLI Module
//!
//! Command-line front end of the `skeleton-java` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Run the HTTP service:
//!
//! ```bash
//! skeleton-java serve --problems-url http://localhost:8080 --port 8081
//! ```
//!
//! Options:
//! - `--problems-url <URL>` - problem store base URL (env `SKELETON_PROBLEMS_URL`)
//! - `--problems-file <PATH>` - read problems from a JSON file instead (env `SKELETON_PROBLEMS_FILE`)
//! - `--host <HOST>` / `--port <PORT>` - bind address, default `0.0.0.0:8081` (env `SKELETON_PORT`)
//! - `--refresh-secs <N>` - re-fetch problems every N seconds
//! - `--watch` - reload when the problems file changes
//!
//! ### `render`
//!
//! Print one skeleton without starting a server:
//!
//! ```bash
//! skeleton-java render --problems-file problems.json --id fib
//! ```
//!
//! ### `list`
//!
//! Print the ids of all problems known to the source:
//!
//! ```bash
//! skeleton-java list --problems-url http://localhost:8080
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands, SourceArgs};
