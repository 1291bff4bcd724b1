// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod scan;
pub mod types;
pub mod watch;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::command::{CommandBuilder, CommandTemplate};
use crate::config::Settings;
use crate::engine::{Runner, WatchOptions};
use crate::exec::ProcessExecutor;
use crate::fs::{FileSystem, RealFileSystem};
use crate::scan::GoScanner;
use crate::watch::{EventFilter, ExcludeList, build_event_source, walk_directories};

/// High-level entry point used by `main.rs`: resolve settings from the CLI
/// and the optional config file, then watch.
pub async fn run(args: CliArgs) -> Result<()> {
    let file = config::discover(args.config.as_deref()).context("loading config file")?;
    let settings = Settings::resolve(&args, file)?;
    run_with_settings(settings).await
}

/// Wire everything together and block until the watch loop ends.
///
/// This wires together:
/// - exclude list + directory walk
/// - the notify-backed event source
/// - command builder (Go scanner) + process executor behind the runner
/// - Ctrl-C handling
pub async fn run_with_settings(settings: Settings) -> Result<()> {
    let excludes =
        ExcludeList::with_defaults(&settings.exclude).context("creating exclude list")?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let dirs = walk_directories(fs.as_ref(), &settings.directories, settings.depth, &excludes)?;
    let source = build_event_source(&dirs).context("setting up watcher")?;

    debug!("Handling events: {}", settings.events);
    let template = CommandTemplate::new(settings.program.clone(), settings.args.clone())?;
    info!("Run {}", template);

    let shutdown = CancellationToken::new();

    // Ctrl-C → graceful shutdown.
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            shutdown.cancel();
        });
    }

    let builder = CommandBuilder::new(template, GoScanner::new(Arc::clone(&fs)));
    let (runner, run_handle) = Runner::spawn(builder, ProcessExecutor::new(), &shutdown);

    let options = WatchOptions {
        idle_timeout: settings.idle_timeout,
        runner,
        filter: EventFilter::new(settings.events, excludes),
        shutdown,
    };

    let outcome = engine::watch(source, options).await;
    if let Err(err) = run_handle.await {
        debug!("runner task ended abnormally: {err}");
    }
    outcome.context("Error during watch")
}
