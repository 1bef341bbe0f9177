//! Lookups over untyped page payloads.
//!
//! YouTube's renderer trees are deep and every hop is optional. Projectors describe the
//! route to a field as a list of [`Step`]s and get a default back on the first missing hop,
//! instead of chaining `get`/`and_then` by hand.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for Step<'a> {
    fn from(key: &'a str) -> Self {
        Step::Key(key)
    }
}

impl From<usize> for Step<'_> {
    fn from(index: usize) -> Self {
        Step::Index(index)
    }
}

// Bare integer literals in `path!` fall back to i32.
impl From<i32> for Step<'_> {
    fn from(index: i32) -> Self {
        Step::Index(usize::try_from(index).unwrap_or(usize::MAX))
    }
}

/// Builds a `&[Step]` from string keys and integer indices:
/// `path!["title", "runs", 0, "text"]`.
#[macro_export]
macro_rules! path {
    ($($step:expr),* $(,)?) => {
        &[$($crate::connectors::youtube::path::Step::from($step)),*][..]
    };
}

pub fn lookup<'v>(root: &'v Value, steps: &[Step<'_>]) -> Option<&'v Value> {
    steps.iter().try_fold(root, |node, step| match step {
        Step::Key(key) => node.get(*key),
        Step::Index(index) => node.get(*index),
    })
}

/// String at `steps`, or an empty string when any hop is missing or the leaf is not a string.
pub fn text_at(root: &Value, steps: &[Step<'_>]) -> String {
    lookup(root, steps)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Concatenates the `text` of every run in the `runs` array at `steps`, with no separator.
pub fn joined_runs(root: &Value, steps: &[Step<'_>]) -> Option<String> {
    let runs = lookup(root, steps)?.get("runs")?.as_array()?;
    Some(
        runs.iter()
            .filter_map(|run| run.get("text").and_then(Value::as_str))
            .collect(),
    )
}
