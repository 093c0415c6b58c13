//! # skeleton-java
//!
//! **skeleton-java** turns problem definitions from a problem store into Java
//! source skeletons: a `Solution` class with one documented, empty method whose
//! signature matches the problem's function.
//!
//! ## Overview
//!
//! The service keeps an in-memory snapshot of every problem, loaded from an
//! upstream problem store over HTTP (or from a local JSON file), and renders
//! skeletons on demand. Serving runs on the `may` coroutine runtime through
//! `may_minihttp`.
//!
//! ## Architecture
//!
//! - **[`problem`]** - problem, function, parameter and return types, JSON loading
//! - **[`generator`]** - type mapping, parameter lists and skeleton rendering
//! - **[`registry`]** - lock-free snapshot of loaded problems keyed by id
//! - **[`source`]** - upstream problem store and local-file problem sources
//! - **[`context`]** - the shared state handed to handlers and reload triggers
//! - **[`health`]** - cached probe of the problem source behind `/health`
//! - **[`server`]** - HTTP routes (`/api/v1/code/java/{id}`, `/health`, `/metrics`)
//! - **[`hot_reload`]** - file watching and periodic refresh
//! - **[`cli`]** - `serve`, `render` and `list` commands
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Service as SkeletonService
//!     participant Registry as ProblemRegistry
//!     participant Generator as generator
//!
//!     Client->>Server: GET /api/v1/code/java/fib
//!     Server->>Service: call(req, res)
//!     Service->>Registry: lookup("fib")
//!     alt registry empty
//!         Registry-->>Client: 500 problems could not be downloaded
//!     else unknown id
//!         Registry-->>Client: 404 problem not found
//!     end
//!     Registry-->>Service: Arc<Problem>
//!     Service->>Generator: render_problem(&problem)
//!     Generator-->>Service: String
//!     Service-->>Client: 200 text/plain
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use skeleton_java::problem::parse_problems;
//! use skeleton_java::generator::render_problem;
//!
//! let problems = parse_problems(r#"[{
//!     "id": "fib",
//!     "func": {
//!         "name": "fib",
//!         "returnStatement": {"type": "java.lang.Long", "comment": "N'th term"},
//!         "parameters": [{"name": "n", "type": "java.lang.Integer", "comment": "term id"}]
//!     }
//! }]"#).unwrap();
//!
//! let source = render_problem(&problems[0]).unwrap();
//! assert!(source.contains("public long fib(int n) {"));
//! ```
//!
//! ## Configuration
//!
//! Command-line flags cover the problem source and bind address (see [`cli`]).
//! Logging and runtime tuning come from `SKELETON_*` environment variables
//! (see [`logging`] and [`runtime_config`]).

pub mod cli;
pub mod context;
pub mod error;
pub mod generator;
pub mod health;
pub mod hot_reload;
pub mod logging;
pub mod metrics;
pub mod problem;
pub mod registry;
pub mod runtime_config;
pub mod server;
pub mod source;

pub use context::AppContext;
pub use error::SkeletonError;
pub use generator::{map_type, render_skeleton, JavaType};
pub use registry::{LookupError, ProblemRegistry};
pub use source::{FetchError, ProblemSource};
