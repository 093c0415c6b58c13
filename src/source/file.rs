use super::{FetchError, ProblemSource};
use crate::problem::{read_problems, Problem};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Problems read from a local JSON file in the problem-store format
pub struct FileProblemSource {
    path: PathBuf,
    label: String,
}

impl FileProblemSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let label = path.display().to_string();
        Self { path, label }
    }

    fn open(&self) -> Result<File, FetchError> {
        File::open(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ProblemSource for FileProblemSource {
    fn fetch_all(&self) -> Result<Vec<Problem>, FetchError> {
        let file = self.open()?;
        let problems =
            read_problems(BufReader::new(file)).map_err(|source| FetchError::Decode {
                origin: self.label.clone(),
                source,
            })?;
        info!(path = %self.label, count = problems.len(), "problems read from file");
        Ok(problems)
    }

    fn check_health(&self) -> Result<(), FetchError> {
        self.open().map(|_| ())
    }

    fn describe(&self) -> &str {
        &self.label
    }
}
