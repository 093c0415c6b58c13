//! HTTP layer: may_minihttp service, routing and response helpers.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{path_without_query, resolve_route, Route, SKELETON_PREFIX};
pub use service::{health_endpoint, skeleton_endpoint, SkeletonService};
