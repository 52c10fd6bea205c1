//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route paths (non-empty, leading `/`, unique)
//! - Detect conflicts with the built-in `/exit` route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before the listener starts; a config that fails here never serves

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A route path was empty or did not start with `/`.
    #[error("path {0:?} doesn't start with /")]
    BadPath(String),

    /// The same path was bound twice.
    #[error("path {0:?} is bound more than once")]
    DuplicatePath(String),

    /// A route was declared at `/exit` while the built-in exit route is on.
    #[error("path \"/exit\" conflicts with the built-in exit route")]
    ExitConflict,

    /// No routes were declared at all.
    #[error("no route declared, need at least one path/command pair")]
    NoRoutes,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen = std::collections::HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::BadPath(route.path.clone()));
        }
        if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicatePath(route.path.clone()));
        }
        if config.add_exit && route.path == "/exit" {
            errors.push(ValidationError::ExitConflict);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
