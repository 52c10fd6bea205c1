//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files; the
//! CLI assembles the same structure from flags and positional arguments.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the command server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind (default: all interfaces).
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Route definitions mapping URL paths to shell commands.
    pub routes: Vec<RouteConfig>,

    /// Parse the query string (and urlencoded body) into `v_*` variables.
    pub form: bool,

    /// Set CGI-style variables in the command environment.
    pub cgi: bool,

    /// Don't generate the index page for `/`.
    pub no_index: bool,

    /// Register the `/exit` route that shuts the server down.
    pub add_exit: bool,

    /// Log destination; `None` logs to the process standard stream.
    pub log_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            routes: Vec::new(),
            form: false,
            cgi: false,
            no_index: false,
            add_exit: false,
            log_file: None,
        }
    }
}

impl ServerConfig {
    /// The address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A single (URL path, shell command) binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// URL path to serve; must be non-empty, unique, and start with `/`.
    pub path: String,

    /// Shell command line, handed verbatim to `sh -c`.
    pub command: String,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            command: command.into(),
        }
    }
}
