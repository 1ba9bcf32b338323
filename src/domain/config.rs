use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 120;
pub const DEFAULT_MY_PRS_QUERY: &str = "is:pr is:open author:@me";

/// The user's watch-list and tunables, shared with the background fetcher.
///
/// Optional fields stay absent on disk unless they were present when loaded,
/// and keys this tool does not know about are carried through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watched_prs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_prs_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed_prs: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn refresh_interval(&self) -> u64 {
        self.refresh_interval_seconds
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
    }

    pub fn my_prs_query(&self) -> &str {
        self.my_prs_query.as_deref().unwrap_or(DEFAULT_MY_PRS_QUERY)
    }

    pub fn dismissed(&self) -> &[String] {
        self.dismissed_prs.as_deref().unwrap_or_default()
    }

    pub fn is_dismissed(&self, url: &str) -> bool {
        self.dismissed().iter().any(|u| u == url)
    }

    /// Returns false when the URL was already dismissed.
    pub fn dismiss(&mut self, url: &str) -> bool {
        if self.is_dismissed(url) {
            return false;
        }
        self.dismissed_prs
            .get_or_insert_with(Vec::new)
            .push(url.to_string());
        true
    }

    /// Returns false when the URL was not dismissed.
    pub fn undismiss(&mut self, url: &str) -> bool {
        let Some(dismissed) = self.dismissed_prs.as_mut() else {
            return false;
        };
        let before = dismissed.len();
        dismissed.retain(|u| u != url);
        dismissed.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert!(cfg.watched_prs.is_empty());
        assert_eq!(cfg.refresh_interval(), 120);
        assert_eq!(cfg.my_prs_query(), "is:pr is:open author:@me");
        assert!(cfg.dismissed().is_empty());
    }

    #[test]
    fn absent_optionals_are_not_written_back() {
        let mut cfg = Config::default();
        cfg.watched_prs
            .push("https://github.com/acme/widgets/pull/42".to_string());
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"watched_prs": ["https://github.com/acme/widgets/pull/42"]})
        );
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let raw = r#"{"watched_prs":[],"refresh_interval_seconds":20,"theme":"dark","nested":{"a":1}}"#;
        let cfg: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.refresh_interval(), 20);
        assert_eq!(cfg.extra.get("theme"), Some(&Value::from("dark")));

        let back: Value = serde_json::to_value(&cfg).unwrap();
        let orig: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(back, orig);
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut cfg = Config::default();
        assert!(cfg.dismiss("https://github.com/a/b/pull/1"));
        assert!(!cfg.dismiss("https://github.com/a/b/pull/1"));
        assert_eq!(cfg.dismissed().len(), 1);
    }

    #[test]
    fn undismiss_keeps_the_key_present() {
        let mut cfg = Config::default();
        assert!(!cfg.undismiss("https://github.com/a/b/pull/1"));
        cfg.dismiss("https://github.com/a/b/pull/1");
        assert!(cfg.undismiss("https://github.com/a/b/pull/1"));
        assert!(!cfg.undismiss("https://github.com/a/b/pull/1"));
        assert_eq!(cfg.dismissed_prs, Some(Vec::new()));
    }
}
