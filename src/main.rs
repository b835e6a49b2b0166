//! assistant-tools-rs: personal assistant tool service.

mod config;
mod dispatch;
mod mcp_server;
mod notifier;
mod service;
mod store;
mod tools;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "assistant-tools-rs", about = "Personal assistant tool service")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dispatch a single command and exit (e.g. --once "weather London")
    #[arg(long)]
    once: Option<String>,

    /// Disable the MCP server for this run
    #[arg(long)]
    no_mcp: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging (suppress noisy HTTP internals)
    let filter = if args.verbose {
        EnvFilter::new("debug,hyper=info,rmcp=info")
    } else {
        EnvFilter::new("info,hyper=warn,rmcp=warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("assistant-tools-rs starting");

    // Load config
    let config = config::Config::load(args.config.as_deref());
    let mcp_enabled = config.mcp.enabled && !args.no_mcp;
    let mcp_port = config.mcp.port;

    let toolbox = Arc::new(tools::Toolbox::new(config));

    // One-shot mode for scripting: dispatch and exit
    if let Some(command) = args.once {
        let reply = dispatch::dispatch(&toolbox, &command).await;
        println!("{reply}");
        return Ok(());
    }

    // Start MCP server (background task)
    if mcp_enabled {
        mcp_server::start_mcp_server(toolbox.clone(), mcp_port).await;
    }

    // Run the console loop
    let service = service::ConsoleService::new(toolbox);
    service.run().await?;

    Ok(())
}
