use serde::{Deserialize, Deserializer};

/// Last PR state written by the background fetcher. Read-only here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_updated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub my_prs: Vec<PrRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub watched_prs: Vec<PrRecord>,
}

impl Snapshot {
    pub fn all_prs(&self) -> impl Iterator<Item = &PrRecord> {
        self.my_prs.iter().chain(self.watched_prs.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.my_prs.is_empty() && self.watched_prs.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub repo_short: String,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "isDraft", default, deserialize_with = "null_as_default")]
    pub is_draft: bool,
    #[serde(default)]
    pub ci_icon: Option<String>,
    #[serde(default)]
    pub ci_label: Option<String>,
    #[serde(default)]
    pub review_icon: Option<String>,
    #[serde(default)]
    pub review_label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks: Vec<Check>,
}

impl PrRecord {
    pub fn failing_checks(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.is_failing())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Check {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl Check {
    pub fn is_failing(&self) -> bool {
        self.conclusion.as_deref().is_some_and(|c| {
            c.eq_ignore_ascii_case("FAILURE") || c.eq_ignore_ascii_case("ERROR")
        })
    }
}

// The fetcher writes `null` for fields GitHub left empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fetcher_output_with_extra_fields() {
        let raw = r#"{
          "last_updated": "2026-10-16T09:00:00+00:00",
          "total_count": 1,
          "my_prs": [{
            "number": 42, "title": "Fix bug", "url": "https://github.com/acme/widgets/pull/42",
            "repo": "acme/widgets", "repo_short": "widgets", "isDraft": true,
            "state": "OPEN", "ci_state": "FAILURE", "ci_icon": "❌", "ci_label": "CI failing",
            "review_decision": null, "review_icon": "—", "review_label": "No reviews",
            "checks": [{"name": "build", "status": "COMPLETED", "conclusion": "FAILURE"},
                       {"name": "lint", "status": "COMPLETED", "conclusion": null}],
            "labels": [], "source": "authored", "author": null
          }],
          "watched_prs": [],
          "all_prs": []
        }"#;
        let snap: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.total_count, 1);
        let pr = &snap.my_prs[0];
        assert_eq!(pr.number, Some(42));
        assert!(pr.is_draft);
        assert_eq!(pr.failing_checks().count(), 1);
        assert!(!snap.is_empty());
    }

    #[test]
    fn nulls_and_missing_fields_are_tolerated() {
        let raw = r#"{"total_count": null, "my_prs": [{"title": null, "number": null, "checks": null}]}"#;
        let snap: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.total_count, 0);
        assert_eq!(snap.last_updated, "");
        assert_eq!(snap.my_prs[0].title, "");
        assert_eq!(snap.my_prs[0].number, None);
        assert!(snap.watched_prs.is_empty());
    }

    #[test]
    fn failing_conclusions_match_case_insensitively() {
        let check = |c: Option<&str>| Check {
            name: "x".into(),
            conclusion: c.map(str::to_string),
        };
        assert!(check(Some("FAILURE")).is_failing());
        assert!(check(Some("error")).is_failing());
        assert!(check(Some("Failure")).is_failing());
        assert!(!check(Some("SUCCESS")).is_failing());
        assert!(!check(Some("CANCELLED")).is_failing());
        assert!(!check(None).is_failing());
    }
}
