mod common;

use common::fixtures::{self, PROBLEMS_JSON};
use skeleton_java::hot_reload::{spawn_periodic_refresh, watch_problems_file};
use skeleton_java::problem::Problem;
use skeleton_java::source::FileProblemSource;
use skeleton_java::{AppContext, FetchError, LookupError, ProblemSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const FIB_ONLY: &str = r#"[{
  "id": "fib",
  "func": {
    "name": "fib",
    "returnStatement": {"type": "java.lang.Long", "comment": "N'th term"},
    "parameters": [{"name": "n", "type": "java.lang.Integer", "comment": "term id"}]
  }
}]"#;

fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..40 {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn test_watch_problems_file_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("problems.json");
    std::fs::write(&path, FIB_ONLY).unwrap();

    let ctx = Arc::new(AppContext::new(Arc::new(FileProblemSource::new(&path))));
    assert_eq!(ctx.refresh().unwrap(), 1);
    assert_eq!(
        ctx.render_skeleton("2-sum").unwrap_err().to_string(),
        "problem 2-sum not found"
    );

    let watcher = watch_problems_file(&path, Arc::clone(&ctx)).expect("watch_problems_file");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(&path, PROBLEMS_JSON).unwrap();

    assert!(wait_for(|| ctx.registry.len() == 4), "reload not observed");
    assert!(ctx.render_skeleton("2-sum").is_ok());
    drop(watcher);
}

/// Replace `path` the way editors and deploy tools do: write a sibling, rename over.
fn replace_by_rename(path: &std::path::Path, contents: &str) {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents).unwrap();
    std::fs::rename(&tmp, path).unwrap();
}

fn problem_list(ids: &[&str]) -> String {
    let fib = FIB_ONLY.trim().trim_start_matches('[').trim_end_matches(']');
    let problems: Vec<String> = ids
        .iter()
        .map(|id| fib.replace(r#""id": "fib""#, &format!(r#""id": "{id}""#)))
        .collect();
    format!("[{}]", problems.join(","))
}

#[test]
fn test_watch_survives_repeated_rename_replacement() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("problems.json");
    std::fs::write(&path, problem_list(&["v0"])).unwrap();

    let ctx = Arc::new(AppContext::new(Arc::new(FileProblemSource::new(&path))));
    ctx.refresh().unwrap();
    let _watcher = watch_problems_file(&path, Arc::clone(&ctx)).unwrap();
    std::thread::sleep(Duration::from_millis(100));

    replace_by_rename(&path, &problem_list(&["v1"]));
    assert!(
        wait_for(|| ctx.registry.snapshot().ids() == vec!["v1"]),
        "first replacement not observed"
    );

    replace_by_rename(&path, &problem_list(&["v2", "v2b"]));
    assert!(
        wait_for(|| ctx.registry.snapshot().ids() == vec!["v2", "v2b"]),
        "second replacement not observed"
    );

    replace_by_rename(&path, &problem_list(&["v3"]));
    assert!(
        wait_for(|| ctx.registry.snapshot().ids() == vec!["v3"]),
        "third replacement not observed"
    );
}

#[test]
fn test_sibling_files_do_not_trigger_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("problems.json");
    std::fs::write(&path, PROBLEMS_JSON).unwrap();

    let ctx = Arc::new(AppContext::new(Arc::new(FileProblemSource::new(&path))));
    ctx.refresh().unwrap();
    let loaded_at = ctx.registry.snapshot().loaded_at();
    let _watcher = watch_problems_file(&path, Arc::clone(&ctx)).unwrap();
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();
    std::thread::sleep(Duration::from_millis(300));

    assert_eq!(ctx.registry.snapshot().loaded_at(), loaded_at);
}

#[test]
fn test_invalid_file_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("problems.json");
    std::fs::write(&path, PROBLEMS_JSON).unwrap();

    let ctx = Arc::new(AppContext::new(Arc::new(FileProblemSource::new(&path))));
    ctx.refresh().unwrap();
    let _watcher = watch_problems_file(&path, Arc::clone(&ctx)).unwrap();
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(&path, "{ not json").unwrap();
    std::thread::sleep(Duration::from_millis(300));

    assert_eq!(ctx.registry.len(), 4);
    assert!(ctx.render_skeleton("fib").is_ok());
}

/// Source that hands out a new problem list on each fetch
struct SequenceSource {
    fetches: AtomicUsize,
    next: Mutex<Vec<Vec<Problem>>>,
}

impl ProblemSource for SequenceSource {
    fn fetch_all(&self) -> Result<Vec<Problem>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let mut next = self.next.lock().unwrap();
        if next.len() > 1 {
            Ok(next.remove(0))
        } else {
            Ok(next[0].clone())
        }
    }

    fn check_health(&self) -> Result<(), FetchError> {
        Ok(())
    }

    fn describe(&self) -> &str {
        "sequence"
    }
}

#[test]
fn test_periodic_refresh_picks_up_changes() {
    let fib_only = skeleton_java::problem::parse_problems(FIB_ONLY).unwrap();
    let source = Arc::new(SequenceSource {
        fetches: AtomicUsize::new(0),
        next: Mutex::new(vec![Vec::new(), fib_only, fixtures::problems()]),
    });
    let shared: Arc<dyn ProblemSource> = source.clone();
    let ctx = Arc::new(AppContext::new(shared));

    // first fetch returns nothing: not ready yet
    ctx.refresh().unwrap();
    assert_eq!(ctx.registry.lookup("fib").unwrap_err(), LookupError::NotReady);

    let handle = spawn_periodic_refresh(Arc::clone(&ctx), Duration::from_millis(20)).unwrap();
    assert!(wait_for(|| ctx.registry.len() == 4), "refresh not observed");
    handle.stop();

    let fetches = source.fetches.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(source.fetches.load(Ordering::SeqCst), fetches, "refresh kept running after stop");
}
