//! cmdserve entrypoint: CLI parsing, config assembly, server startup.
//!
//! Startup order is config first, then logging, then bind, then serve; any
//! failure along the way is fatal and the process never listens.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use cmdserve::config::{loader, ConfigError, RouteConfig, ServerConfig};
use cmdserve::observability::logging;
use cmdserve::HttpServer;

/// Expose shell commands as HTTP endpoints.
#[derive(Parser)]
#[command(name = "cmdserve", version)]
#[command(
    about = "Expose shell commands as HTTP endpoints",
    long_about = "Expose shell commands as HTTP endpoints.\n\n\
        Each positional pair binds a URL path to a shell command:\n\n\
        \tcmdserve /date date /ps \"ps aux\"\n\
        \tcmdserve /env 'printenv | sort'\n\
        \tcmdserve --form /greet 'echo \"hello, $v_name\"'\n\
        \tcmdserve --cgi /ua 'echo \"$HTTP_USER_AGENT\"'"
)]
struct Cli {
    /// Host for the HTTP server (default: all interfaces)
    #[arg(long)]
    host: Option<String>,

    /// Port for the HTTP server
    #[arg(short, long)]
    port: Option<u16>,

    /// Parse the query (and urlencoded body) into v_* environment vars
    #[arg(long)]
    form: bool,

    /// Set CGI variables in the command environment
    #[arg(long)]
    cgi: bool,

    /// Don't generate the index page for /
    #[arg(long = "no-index")]
    no_index: bool,

    /// Add the /exit route that shuts the server down
    #[arg(long = "add-exit")]
    add_exit: bool,

    /// Log filename (default: STDOUT)
    #[arg(long)]
    log: Option<PathBuf>,

    /// TOML config file to start from; flags and pairs apply on top
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path and shell command pairs: /path "command" /path2 "command2" ...
    #[arg(value_name = "PATH COMMAND", allow_hyphen_values = true)]
    pairs: Vec<String>,
}

impl Cli {
    /// Assemble and validate the server configuration.
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => loader::load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.form |= self.form;
        config.cgi |= self.cgi;
        config.no_index |= self.no_index;
        config.add_exit |= self.add_exit;
        if let Some(log) = self.log {
            config.log_file = Some(log);
        }

        if self.pairs.len() % 2 != 0 {
            return Err(ConfigError::UnpairedArgs);
        }
        for pair in self.pairs.chunks(2) {
            config.routes.push(RouteConfig::new(&pair[0], &pair[1]));
        }

        loader::check_config(&config)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(config.log_file.as_deref())?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        routes = config.routes.len(),
        form = config.form,
        cgi = config.cgi,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(Arc::new(config), std::env::vars().collect());
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
