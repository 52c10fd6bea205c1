//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all dispatch handler)
//!     → routing table decides: command / index / exit / 404
//!     → request.rs (extract RequestContext, buffer form body)
//!     → exec subsystem runs the command
//!     → stdout (or error text) written as the response body
//! ```

pub mod request;
pub mod server;

pub use request::RequestContext;
pub use server::HttpServer;
