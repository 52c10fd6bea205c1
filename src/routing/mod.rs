//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → table.rs (exact-match lookup)
//!     → Return: Execute(command) | Index(html) | Exit | NotFound
//!
//! Table Compilation (at startup):
//!     RouteConfig[]
//!     → Register bindings in declaration order
//!     → Pre-render index page (index.rs)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - Exact path equality only; same input always resolves the same way
//! - The built-in `/exit` and the index page are dispatch outcomes, not
//!   registered bindings

pub mod index;
pub mod table;

pub use table::{Dispatch, RouteTable};
