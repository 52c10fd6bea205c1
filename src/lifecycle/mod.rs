//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → Validate config → Init logging → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or /exit → stop accepting → drain in-flight → run() returns
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and the process never listens
//! - Termination via /exit is deferred through the shutdown channel so the
//!   response is flushed first

pub mod shutdown;

pub use shutdown::Shutdown;
