//! Command execution subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext + ServerConfig + ambient snapshot
//!     → environment.rs (passthrough / CGI / form variable groups)
//!     → ProcessEnv (ordered, later name wins)
//!     → executor.rs (sh -c, env cleared, stdout captured)
//!     → stdout bytes or ExecError
//! ```
//!
//! # Design Decisions
//! - Environment construction and process spawning are separate, so the
//!   builder stays a pure, synchronous function under unit test
//! - Each request builds a fresh ProcessEnv for exactly one subprocess
//! - No concurrency control here: overlapping requests spawn freely

pub mod environment;
pub mod executor;

pub use environment::{EnvironmentBuilder, ProcessEnv};
pub use executor::{execute, ExecError};
