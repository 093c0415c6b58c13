use crate::{
    context::AppContext,
    hot_reload::{spawn_periodic_refresh, watch_problems_file},
    logging::{init_logging_with_config, LogConfig},
    runtime_config::RuntimeConfig,
    server::{HttpServer, ServerHandle, SkeletonService},
    source::{FileProblemSource, HttpProblemSource, ProblemSource},
};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Command-line interface of the skeleton service
#[derive(Parser, Debug)]
#[command(name = "skeleton-java")]
#[command(about = "Java code skeletons for problem-store problems", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Where problem definitions come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Problem store base URL
    #[arg(long, env = "SKELETON_PROBLEMS_URL", default_value = "http://localhost:8080")]
    pub problems_url: String,

    /// Read problems from a local JSON file instead of the problem store
    #[arg(long, env = "SKELETON_PROBLEMS_FILE", conflicts_with = "problems_url")]
    pub problems_file: Option<PathBuf>,
}

impl SourceArgs {
    /// Build the configured source: the problems file when given, the URL otherwise.
    pub fn build(&self, timeout: Duration) -> anyhow::Result<Arc<dyn ProblemSource>> {
        match &self.problems_file {
            Some(path) => Ok(Arc::new(FileProblemSource::new(path))),
            None => {
                let source = HttpProblemSource::new(&self.problems_url, timeout)
                    .with_context(|| format!("invalid problems url {}", self.problems_url))?;
                Ok(Arc::new(source))
            }
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve skeletons over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "SKELETON_PORT", default_value_t = 8081)]
        port: u16,

        /// Re-fetch problems every N seconds (0 disables)
        #[arg(long, env = "SKELETON_REFRESH_SECS", default_value_t = 0)]
        refresh_secs: u64,

        /// Reload when the problems file changes
        #[arg(long, default_value_t = false, requires = "problems_file")]
        watch: bool,
    },
    /// Print the skeleton of one problem to stdout
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Problem id, e.g. `fib`
        #[arg(long)]
        id: String,
    },
    /// Print the ids of all known problems
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Parse the process arguments and execute the command.
///
/// # Errors
///
/// Returns an error if:
/// - The problems source is misconfigured or unreachable (`render`, `list`)
/// - The requested problem does not exist or cannot be rendered (`render`)
/// - The server cannot bind its address (`serve`)
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Execute an already parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let runtime = RuntimeConfig::from_env();
    match cli.command {
        Commands::Serve {
            source,
            host,
            port,
            refresh_secs,
            watch,
        } => serve(&runtime, &source, &host, port, refresh_secs, watch),
        Commands::Render { source, id } => {
            let ctx = load(&runtime, &source)?;
            let skeleton = ctx.render_skeleton(&id)?;
            println!("{skeleton}");
            Ok(())
        }
        Commands::List { source } => {
            let ctx = load(&runtime, &source)?;
            for id in ctx.registry.snapshot().ids() {
                println!("{id}");
            }
            Ok(())
        }
    }
}

fn load(runtime: &RuntimeConfig, source: &SourceArgs) -> anyhow::Result<AppContext> {
    let ctx = AppContext::new(source.build(runtime.fetch_timeout)?);
    ctx.refresh()
        .with_context(|| format!("cannot load problems from {}", ctx.source.describe()))?;
    Ok(ctx)
}

fn serve(
    runtime: &RuntimeConfig,
    source: &SourceArgs,
    host: &str,
    port: u16,
    refresh_secs: u64,
    watch: bool,
) -> anyhow::Result<()> {
    let _log_guard = init_logging_with_config(&LogConfig::from_env())?;
    may::config().set_stack_size(runtime.stack_size);

    let ctx = Arc::new(
        AppContext::new(source.build(runtime.fetch_timeout)?).with_health_ttl(runtime.health_ttl),
    );
    info!(source = %ctx.source.describe(), "using problems source");
    // An unreachable store is not fatal: /health reports it and refresh may recover.
    ctx.refresh_or_log();

    let _watcher = match (&source.problems_file, watch) {
        (Some(path), true) => Some(
            watch_problems_file(path, Arc::clone(&ctx))
                .with_context(|| format!("cannot watch {}", path.display()))?,
        ),
        _ => None,
    };
    let refresher = if refresh_secs > 0 {
        Some(spawn_periodic_refresh(
            Arc::clone(&ctx),
            Duration::from_secs(refresh_secs),
        )?)
    } else {
        None
    };

    let addr = format!("{host}:{port}");
    let handle = HttpServer(SkeletonService::new(ctx))
        .start(addr.as_str())
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(addr = %handle.local_addr(), "skeleton service listening");

    wait_for_shutdown(handle)?;
    if let Some(refresher) = refresher {
        refresher.stop();
    }
    info!("skeleton service stopped");
    Ok(())
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGTERM, SIGINT]).context("cannot install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "shutdown requested");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server failed: {e:?}"))
}
