//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce tracing events:
//!     route registrations, dispatched requests, 404s, exec errors
//!         → logging.rs (fmt layer)
//!         → stdout, or the file given with --log
//! ```
//!
//! # Design Decisions
//! - Logging is a side-channel: nothing in the request/response contract
//!   depends on it
//! - Structured key-value fields over message interpolation

pub mod logging;
