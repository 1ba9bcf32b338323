use log::debug;

use crate::domain::pr_url::{EXPECTED_FORMAT, PrUrl};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WatchError {
    #[error("Invalid PR URL: {0}\nExpected format: {expected}", expected = EXPECTED_FORMAT)]
    InvalidUrl(String),

    #[error("not a PR number: {0}")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    AlreadyWatching(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Exact URL first, then the first URL containing the target anywhere.
    #[default]
    Loose,
    /// Only URLs whose `/pull/<n>` equals the target.
    Number,
}

/// Validate and append a URL, keeping insertion order and exact-string uniqueness.
pub fn add(watched: &mut Vec<String>, url: &str) -> Result<AddOutcome, WatchError> {
    let url = url.trim();
    let Some(pr) = PrUrl::parse(url) else {
        return Err(WatchError::InvalidUrl(url.to_string()));
    };
    debug!("{url} refers to {pr}");
    if watched.iter().any(|u| u == url) {
        return Ok(AddOutcome::AlreadyWatching(url.to_string()));
    }
    watched.push(url.to_string());
    Ok(AddOutcome::Added(url.to_string()))
}

/// Index of the entry `target` refers to.
///
/// Loose matching is deliberately unanchored: `"12"` also hits `.../pull/123`
/// when no exact match exists.
pub fn find<S: AsRef<str>>(
    candidates: &[S],
    target: &str,
    mode: MatchMode,
) -> Result<Option<usize>, WatchError> {
    let target = target.trim();
    match mode {
        MatchMode::Loose => Ok(candidates
            .iter()
            .position(|u| u.as_ref() == target)
            .or_else(|| candidates.iter().position(|u| u.as_ref().contains(target)))),
        MatchMode::Number => {
            let number: u64 = target
                .parse()
                .map_err(|_| WatchError::InvalidNumber(target.to_string()))?;
            Ok(candidates
                .iter()
                .position(|u| PrUrl::parse(u.as_ref()).is_some_and(|pr| pr.number == number)))
        }
    }
}

/// Removes at most one entry and returns it.
pub fn remove(
    watched: &mut Vec<String>,
    target: &str,
    mode: MatchMode,
) -> Result<Option<String>, WatchError> {
    if target.trim().is_empty() {
        return Ok(None);
    }
    Ok(find(watched.as_slice(), target, mode)?.map(|idx| watched.remove(idx)))
}
