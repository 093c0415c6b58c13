use super::types::Problem;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Parse a problem-store payload.
///
/// The store answers `/api/v1/problems` with a JSON array. A single problem
/// object is accepted too and yields a list of one.
pub fn parse_problems(json: &str) -> serde_json::Result<Vec<Problem>> {
    let value: Value = serde_json::from_str(json)?;
    problems_from_value(value)
}

/// Same as [`parse_problems`] for a byte stream (HTTP body, file).
pub fn read_problems<R: Read>(reader: R) -> serde_json::Result<Vec<Problem>> {
    let value: Value = serde_json::from_reader(reader)?;
    problems_from_value(value)
}

/// Read and parse a problems file from disk.
pub fn load_problems_file(path: &Path) -> anyhow::Result<Vec<Problem>> {
    use anyhow::Context;

    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open problems file {}", path.display()))?;
    read_problems(std::io::BufReader::new(file))
        .with_context(|| format!("cannot parse problems file {}", path.display()))
}

fn problems_from_value(value: Value) -> serde_json::Result<Vec<Problem>> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        other => serde_json::from_value(other).map(|p: Problem| vec![p]),
    }
}
