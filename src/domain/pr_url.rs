use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub const EXPECTED_FORMAT: &str = "https://github.com/<org>/<repo>/pull/<number>";

static PR_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/([^/\s]+)/([^/\s]+)/pull/(\d+)(?:[/?#].*)?$")
        .expect("valid PR URL regex")
});

/// A pull request reference parsed out of a github.com URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrUrl {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PrUrl {
    /// Parses `https://github.com/<org>/<repo>/pull/<n>`. Only github.com is
    /// accepted since the fetcher skips every other host. A trailing path,
    /// query or fragment (`/files`, `?w=1`, `#discussion`) is tolerated.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = PR_URL_RE.captures(s.trim())?;
        Some(Self {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            number: caps[3].parse().ok()?,
        })
    }
}

impl fmt::Display for PrUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}
