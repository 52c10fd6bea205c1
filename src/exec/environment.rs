//! Process environment construction.
//!
//! # Responsibilities
//! - Forward the allow-listed subset of the server's own environment
//! - Derive CGI-style variables from the request when enabled
//! - Derive `v_*` variables from form fields when enabled
//!
//! # Design Decisions
//! - The ambient environment is an injected snapshot taken at startup, not a
//!   live per-request query; the builder is a pure function of (snapshot,
//!   config, request)
//! - Groups apply in order passthrough → CGI → form; on a name collision the
//!   later entry wins
//! - Anything outside the allow-list never reaches a spawned command unless
//!   CGI or form mode sets it explicitly

use url::form_urlencoded;

use crate::config::ServerConfig;
use crate::http::request::RequestContext;

/// Fixed product identifier reported as SERVER_SOFTWARE.
pub const SERVER_SOFTWARE: &str = "cmdserve";

/// Ambient variables forwarded to every spawned command.
pub const PASSTHROUGH_VARS: [&str; 5] = ["PATH", "HOME", "LANG", "USER", "TMPDIR"];

/// Ordered name → value mapping handed to exactly one subprocess.
///
/// Entries are kept in insertion order; when the same name is set twice the
/// later entry wins, both in [`ProcessEnv::get`] and in the environment the
/// subprocess observes.
#[derive(Debug, Default)]
pub struct ProcessEnv {
    vars: Vec<(String, String)>,
}

impl ProcessEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.push((name.into(), value.into()));
    }

    /// The effective value of `name` (last set wins).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Builds the per-request [`ProcessEnv`] from an ambient snapshot and the
/// server configuration.
pub struct EnvironmentBuilder {
    /// Allow-listed slice of the startup environment snapshot.
    passthrough: Vec<(String, String)>,
    set_cgi: bool,
    set_form: bool,
    server_name: String,
    server_port: u16,
}

impl EnvironmentBuilder {
    /// Create a builder from the configuration and an environment snapshot
    /// (normally `std::env::vars()`, injected for testability).
    pub fn new(config: &ServerConfig, ambient: impl IntoIterator<Item = (String, String)>) -> Self {
        let passthrough = ambient
            .into_iter()
            .filter(|(name, _)| PASSTHROUGH_VARS.contains(&name.as_str()))
            .collect();

        Self {
            passthrough,
            set_cgi: config.cgi,
            set_form: config.form,
            server_name: config.host.clone(),
            server_port: config.port,
        }
    }

    /// Build the environment for one request.
    pub fn build(&self, ctx: &RequestContext) -> ProcessEnv {
        let mut env = ProcessEnv::new();

        for (name, value) in &self.passthrough {
            env.set(name.clone(), value.clone());
        }
        if self.set_cgi {
            self.set_cgi_vars(&mut env, ctx);
        }
        if self.set_form {
            self.set_form_vars(&mut env, ctx);
        }

        env
    }

    fn set_cgi_vars(&self, env: &mut ProcessEnv, ctx: &RequestContext) {
        // One HTTP_<NAME> per header; first value only, non-UTF-8 values skipped.
        for name in ctx.headers.keys() {
            let Some(value) = ctx.headers.get(name).and_then(|v| v.to_str().ok()) else {
                continue;
            };
            let env_name = name.as_str().to_uppercase().replace('-', "_");
            env.set(format!("HTTP_{env_name}"), value);
        }

        let (remote_addr, remote_port) = match ctx.remote {
            Some(addr) => (addr.ip().to_string(), addr.port().to_string()),
            None => (String::new(), String::new()),
        };

        env.set("PATH_INFO", ctx.path.as_str());
        env.set("QUERY_STRING", ctx.raw_query.as_str());
        env.set("REMOTE_ADDR", remote_addr);
        env.set("REMOTE_PORT", remote_port);
        env.set("REQUEST_METHOD", ctx.method.as_str());
        env.set("REQUEST_URI", ctx.uri.as_str());
        env.set("SCRIPT_NAME", ctx.path.as_str());
        env.set("SERVER_NAME", self.server_name.as_str());
        env.set("SERVER_PORT", self.server_port.to_string());
        env.set("SERVER_PROTOCOL", ctx.protocol());
        env.set("SERVER_SOFTWARE", SERVER_SOFTWARE);
    }

    fn set_form_vars(&self, env: &mut ProcessEnv, ctx: &RequestContext) {
        let mut fields: Vec<(String, Vec<String>)> = Vec::new();

        for (key, value) in form_urlencoded::parse(ctx.raw_query.as_bytes()) {
            accumulate(&mut fields, &key, &value);
        }

        if ctx.has_form_body() {
            match std::str::from_utf8(&ctx.body) {
                Ok(body) => {
                    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
                        accumulate(&mut fields, &key, &value);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Ignoring form body that is not valid UTF-8");
                }
            }
        }

        for (key, values) in fields {
            env.set(format!("v_{key}"), values.join(","));
        }
    }
}

/// Collect repeated form keys into one entry, preserving value order.
fn accumulate(fields: &mut Vec<(String, Vec<String>)>, key: &str, value: &str) {
    if let Some((_, values)) = fields.iter_mut().find(|(k, _)| k.as_str() == key) {
        values.push(value.to_string());
    } else {
        fields.push((key.to_string(), vec![value.to_string()]));
    }
}
