//! # Hot Reload Module
//!
//! Keeps the problem registry current without restarting the service.
//!
//! Two triggers are supported:
//!
//! - [`watch_problems_file`] reloads when a local problems file changes
//!   (serve with `--problems-file ... --watch`)
//! - [`spawn_periodic_refresh`] re-fetches from the source at a fixed interval
//!   (serve with `--refresh-secs N`)
//!
//! Both go through [`AppContext::refresh`], which builds a complete new
//! snapshot and swaps it in atomically. If the reload fails (unreachable
//! store, half-written file, invalid JSON) the error is logged and the previous
//! snapshot keeps serving.

use crate::context::AppContext;
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Watch a problems file and refresh the registry when it changes.
///
/// The parent directory is watched rather than the file, so replacements
/// by rename (editors, `mv tmp problems.json`) and Kubernetes ConfigMap
/// `..data` symlink swaps keep being picked up after the first one.
/// The returned watcher stops watching when dropped.
///
/// # Errors
///
/// Returns an error if `path` has no file name, the watcher cannot be
/// created or the parent directory cannot be watched.
pub fn watch_problems_file<P: AsRef<Path>>(
    path: P,
    ctx: Arc<AppContext>,
) -> notify::Result<RecommendedWatcher> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let label = path.display().to_string();
    let file_name = path
        .file_name()
        .map(OsString::from)
        .ok_or_else(|| notify::Error::generic(&format!("{label} does not name a file")))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let target = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if is_reload_event(&event, &target, &file_name) {
                    match ctx.refresh() {
                        Ok(count) => info!(path = %label, count, "hot-reload: problems reloaded"),
                        Err(e) => warn!(path = %label, error = %e, "hot-reload: keeping previous problems"),
                    }
                }
            }
            Err(e) => warn!(error = ?e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Whether a directory event means the problems file may have new content.
fn is_reload_event(event: &notify::Event, target: &Path, file_name: &OsStr) -> bool {
    let relevant_kind = match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Modify(_) | EventKind::Create(_) => true,
        _ => false,
    };
    if !relevant_kind {
        return false;
    }
    // A symlinked file (ConfigMap) changes when the first hop of its link
    // target, e.g. `..data`, is swapped.
    let link_head = fs::read_link(target).ok().and_then(|link| {
        link.components().find_map(|c| match c {
            Component::Normal(name) => Some(name.to_os_string()),
            _ => None,
        })
    });
    event.paths.iter().any(|p| match p.file_name() {
        Some(name) => name == file_name || link_head.as_deref() == Some(name),
        None => false,
    })
}

/// Handle to the background refresh thread; dropping it does not stop the
/// thread, call [`RefreshHandle::stop`].
pub struct RefreshHandle {
    stop: Arc<AtomicBool>,
    thread: thread::JoinHandle<()>,
}

impl RefreshHandle {
    /// Ask the thread to exit and wait for it. The thread notices the request
    /// at its next tick.
    pub fn stop(self) {
        self.stop.store(true, Ordering::Release);
        self.thread.thread().unpark();
        let _ = self.thread.join();
    }
}

/// Re-fetch all problems from the context's source every `interval`.
///
/// # Errors
///
/// Returns an error if the OS refuses to spawn the thread.
pub fn spawn_periodic_refresh(
    ctx: Arc<AppContext>,
    interval: Duration,
) -> std::io::Result<RefreshHandle> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    let thread = thread::Builder::new()
        .name("problem-refresh".to_string())
        .spawn(move || {
            info!(interval_secs = interval.as_secs(), "periodic problem refresh started");
            loop {
                thread::park_timeout(interval);
                if stop_flag.load(Ordering::Acquire) {
                    break;
                }
                if let Err(e) = ctx.refresh() {
                    warn!(source = %ctx.source.describe(), error = %e, "refresh failed, keeping previous problems");
                }
            }
        })?;
    Ok(RefreshHandle { stop, thread })
}
