//! # Problem Registry
//!
//! Holds the problems known to the service as an immutable [`ProblemSet`]
//! snapshot behind an [`ArcSwap`].
//!
//! ## Update model
//!
//! Population always builds a complete new set and publishes it with a single
//! atomic store. Request handlers call [`ProblemRegistry::lookup`] or
//! [`ProblemRegistry::snapshot`] and keep working on the `Arc` they got back,
//! so they never observe a half-built table even while a refresh runs.
//!
//! ```rust
//! use skeleton_java::registry::{LookupError, ProblemRegistry};
//!
//! let registry = ProblemRegistry::new();
//! assert_eq!(registry.lookup("fib").unwrap_err(), LookupError::NotReady);
//! ```

use crate::problem::Problem;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Why a problem id could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// No problems have been loaded (the upstream fetch never succeeded)
    NotReady,
    /// Problems are loaded but none has the requested id
    UnknownProblem,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotReady => write!(f, "problems could not be downloaded"),
            LookupError::UnknownProblem => write!(f, "no problem with this id"),
        }
    }
}

impl std::error::Error for LookupError {}

/// One immutable generation of the problem table
#[derive(Debug, Default)]
pub struct ProblemSet {
    problems: HashMap<String, Arc<Problem>>,
    loaded_at: Option<SystemTime>,
}

impl ProblemSet {
    /// Index problems by id. The first occurrence of a duplicated id wins.
    pub fn from_problems(problems: Vec<Problem>) -> Self {
        let mut by_id: HashMap<String, Arc<Problem>> = HashMap::with_capacity(problems.len());
        for problem in problems {
            if by_id.contains_key(&problem.id) {
                warn!(problem_id = %problem.id, "duplicate problem id, keeping first definition");
                continue;
            }
            by_id.insert(problem.id.clone(), Arc::new(problem));
        }
        Self {
            problems: by_id,
            loaded_at: Some(SystemTime::now()),
        }
    }

    /// Resolve an id by exact match.
    pub fn get(&self, id: &str) -> Result<Arc<Problem>, LookupError> {
        if self.problems.is_empty() {
            return Err(LookupError::NotReady);
        }
        self.problems
            .get(id)
            .cloned()
            .ok_or(LookupError::UnknownProblem)
    }

    /// Number of problems in this generation.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// `true` until a non-empty problem list has been loaded.
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.problems.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// When this generation was built, `None` for the initial empty set.
    pub fn loaded_at(&self) -> Option<SystemTime> {
        self.loaded_at
    }
}

/// Atomically swappable table of problems keyed by id
pub struct ProblemRegistry {
    current: ArcSwap<ProblemSet>,
}

impl Default for ProblemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemRegistry {
    /// An empty registry; every lookup reports [`LookupError::NotReady`].
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(ProblemSet::default()),
        }
    }

    /// A registry pre-populated with `problems`.
    pub fn with_problems(problems: Vec<Problem>) -> Self {
        let registry = Self::new();
        registry.replace(problems);
        registry
    }

    /// Publish a new generation built from `problems`, returning its size.
    ///
    /// Readers holding the previous snapshot keep it until they drop it.
    pub fn replace(&self, problems: Vec<Problem>) -> usize {
        let set = ProblemSet::from_problems(problems);
        let count = set.len();
        self.current.store(Arc::new(set));
        debug!(count, "problem registry swapped");
        count
    }

    /// The current generation.
    pub fn snapshot(&self) -> Arc<ProblemSet> {
        self.current.load_full()
    }

    /// Resolve `id` against the current generation.
    pub fn lookup(&self, id: &str) -> Result<Arc<Problem>, LookupError> {
        self.current.load().get(id)
    }

    /// Number of problems in the current generation.
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    /// `true` while nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Function, ReturnStatement};
    use std::thread;

    fn problem(id: &str, name: &str) -> Problem {
        Problem {
            id: id.to_string(),
            function: Function {
                name: name.to_string(),
                parameters: vec![],
                returns: ReturnStatement::new("void", "", ""),
            },
        }
    }

    #[test]
    fn test_empty_registry_is_not_ready() {
        let registry = ProblemRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.lookup("fib").unwrap_err(), LookupError::NotReady);
        assert!(registry.snapshot().loaded_at().is_none());
    }

    #[test]
    fn test_unknown_id_is_distinct_from_not_ready() {
        let registry = ProblemRegistry::with_problems(vec![problem("fib", "fib")]);
        assert_eq!(
            registry.lookup("2-sum").unwrap_err(),
            LookupError::UnknownProblem
        );
        assert_eq!(registry.lookup("fib").unwrap().function.name, "fib");
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let registry = ProblemRegistry::with_problems(vec![problem("fib", "fib")]);
        assert!(registry.lookup("FIB").is_err());
        assert!(registry.lookup("fib ").is_err());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let registry =
            ProblemRegistry::with_problems(vec![problem("fib", "first"), problem("fib", "second")]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("fib").unwrap().function.name, "first");
    }

    #[test]
    fn test_replace_swaps_whole_set() {
        let registry = ProblemRegistry::with_problems(vec![problem("a", "a"), problem("b", "b")]);
        let before = registry.snapshot();

        assert_eq!(registry.replace(vec![problem("c", "c")]), 1);

        // The old snapshot is untouched.
        assert_eq!(before.ids(), vec!["a", "b"]);
        assert_eq!(registry.snapshot().ids(), vec!["c"]);
        assert_eq!(registry.lookup("a").unwrap_err(), LookupError::UnknownProblem);
    }

    #[test]
    fn test_replace_with_empty_list_is_not_ready() {
        let registry = ProblemRegistry::with_problems(vec![problem("a", "a")]);
        registry.replace(vec![]);
        assert_eq!(registry.lookup("a").unwrap_err(), LookupError::NotReady);
    }

    #[test]
    fn test_readers_never_see_partial_sets() {
        let registry = Arc::new(ProblemRegistry::new());
        let generations: Vec<Vec<Problem>> = (0..50)
            .map(|g| {
                (0..20)
                    .map(|i| problem(&format!("p{i}"), &format!("gen{g}")))
                    .collect()
            })
            .collect();

        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for generation in generations {
                    registry.replace(generation);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = registry.snapshot();
                        if snapshot.is_empty() {
                            continue;
                        }
                        assert_eq!(snapshot.len(), 20);
                        let name = snapshot.get("p0").unwrap().function.name.clone();
                        for i in 0..20 {
                            let p = snapshot.get(&format!("p{i}")).unwrap();
                            assert_eq!(p.function.name, name);
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
