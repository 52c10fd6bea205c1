//! cmdserve: expose shell commands as HTTP endpoints.
//!
//! An operator declares (URL path, shell command) pairs; each request to a
//! bound path runs its command under `sh -c` with a purpose-built
//! environment and returns the captured stdout as the response body.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │                   cmdserve                     │
//!                 │                                                │
//!  HTTP request   │  ┌─────────┐    ┌──────────┐    ┌───────────┐ │
//!  ───────────────┼─▶│  http   │───▶│ routing  │───▶│   exec    │ │
//!                 │  │ server  │    │  table   │    │ env+spawn │─┼──▶ sh -c "…"
//!                 │  └─────────┘    └──────────┘    └─────┬─────┘ │
//!                 │                                       │        │
//!  HTTP response  │                  stdout / error text  │        │
//!  ◀──────────────┼───────────────────────────────────────┘        │
//!                 │                                                │
//!                 │  ┌──────────────────────────────────────────┐ │
//!                 │  │         Cross-Cutting Concerns            │ │
//!                 │  │  ┌────────┐ ┌───────────┐ ┌────────────┐ │ │
//!                 │  │  │ config │ │ lifecycle │ │ observa-   │ │ │
//!                 │  │  │        │ │ shutdown  │ │ bility     │ │ │
//!                 │  │  └────────┘ └───────────┘ └────────────┘ │ │
//!                 │  └──────────────────────────────────────────┘ │
//!                 └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod exec;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{RouteConfig, ServerConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
