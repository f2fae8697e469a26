//! Serve a runtime level endpoint next to a heartbeat logger.
//!
//! ```text
//! cargo run --example level_server -- --env staging --bind 127.0.0.1:8080
//! curl localhost:8080/log/level
//! curl -X PUT -d '{"level":"warn"}' localhost:8080/log/level
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Router};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::Instrument;

use logkit::{
    attach_level_handler, config, disable_caller, disable_stacktrace, instance_id, must, template,
};

#[derive(Parser, Debug)]
#[command(about = "Logger with an HTTP level control endpoint")]
struct Args {
    /// Deployment environment (production, prod, staging, stg, ...).
    #[arg(long, env = "APP_ENV", default_value = "")]
    env: String,

    /// Address for the HTTP listener.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Path of the level endpoint.
    #[arg(long, default_value = "/log/level")]
    path: String,

    /// Omit file and line annotations.
    #[arg(long)]
    no_caller: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut app = Router::new().route("/health", get(|| async { "ok" }));

    let mut options = vec![attach_level_handler(&mut app, &args.path), disable_stacktrace()];
    if args.no_caller {
        options.push(disable_caller());
    }
    let cfg = config(template(&args.env), options);

    let logger = must(cfg.build());
    must(logger.install());

    let id = instance_id();
    id.span().in_scope(|| {
        tracing::info!(env = %args.env, level = %cfg.level.level(), "Logger configured");
    });

    tokio::spawn(
        async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(5));
            loop {
                ticker.tick().await;
                tracing::debug!("heartbeat (debug)");
                tracing::info!("heartbeat (info)");
                tracing::warn!("heartbeat (warn)");
            }
        }
        .instrument(id.span()),
    );

    let listener = TcpListener::bind(args.bind).await?;
    let address = listener.local_addr()?;
    id.span().in_scope(|| {
        tracing::info!(%address, path = %args.path, "Level endpoint listening");
    });
    axum::serve(listener, app).await?;
    Ok(())
}
