//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the path → command bindings
//! - Resolve a request path to a dispatch decision
//! - Hold the pre-rendered index page
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact path equality only: no patterns, no trailing-slash normalization
//! - Explicit NotFound rather than silent default
//! - Index page rendered once at startup, served verbatim

use std::collections::HashMap;

use crate::config::ServerConfig;
use crate::routing::index::render_index;

/// Outcome of resolving a request path.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch<'a> {
    /// Run the bound command and return its stdout.
    Execute(&'a str),

    /// Serve the cached index page.
    Index(&'a str),

    /// Respond and then shut the server down.
    Exit,

    /// No binding for this path.
    NotFound,
}

/// Immutable registry of (path, command) bindings, built once at startup.
pub struct RouteTable {
    /// Bindings in declaration order (drives the index page).
    routes: Vec<(String, String)>,
    /// Exact-match lookup into `routes`.
    by_path: HashMap<String, usize>,
    /// Pre-rendered index page, when enabled.
    index_html: Option<String>,
    /// Whether `/exit` is live.
    exit_enabled: bool,
}

impl RouteTable {
    /// Build the table from a validated configuration.
    ///
    /// Logs each binding as it is registered. The configuration must already
    /// have passed validation; duplicate paths would silently shadow here.
    pub fn from_config(config: &ServerConfig) -> Self {
        let mut routes = Vec::with_capacity(config.routes.len());
        let mut by_path = HashMap::with_capacity(config.routes.len());

        for route in &config.routes {
            tracing::info!(path = %route.path, command = %route.command, "Route registered");
            by_path.insert(route.path.clone(), routes.len());
            routes.push((route.path.clone(), route.command.clone()));
        }

        if config.add_exit {
            tracing::info!(path = "/exit", "Exit route registered");
        }

        let index_html = if config.no_index {
            None
        } else {
            Some(render_index(&routes, config.add_exit))
        };

        Self {
            routes,
            by_path,
            index_html,
            exit_enabled: config.add_exit,
        }
    }

    /// Resolve a request path to a dispatch decision.
    pub fn dispatch(&self, path: &str) -> Dispatch<'_> {
        if let Some(&i) = self.by_path.get(path) {
            return Dispatch::Execute(&self.routes[i].1);
        }
        if self.exit_enabled && path == "/exit" {
            return Dispatch::Exit;
        }
        if path == "/" {
            if let Some(html) = &self.index_html {
                return Dispatch::Index(html);
            }
        }
        Dispatch::NotFound
    }
}
