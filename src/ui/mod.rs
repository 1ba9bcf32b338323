mod timeago;

use std::fmt::Write as _;

pub use timeago::time_ago;

use crate::domain::snapshot::{PrRecord, Snapshot};

const TITLE_WIDTH: usize = 60;
const MAX_FAILING_CHECKS: usize = 5;
const DEFAULT_CI_ICON: &str = "⚪";
const DEFAULT_REVIEW_ICON: &str = "—";
const INDENT: &str = "   ";

pub const NO_DATA: &str = "No PR data yet. The background fetcher is still loading, check back shortly.";

/// Lines for a single PR: identity, labels, URL and, when checks fail, their names.
pub fn pr_lines(pr: &PrRecord) -> Vec<String> {
    let ci_icon = pr.ci_icon.as_deref().unwrap_or(DEFAULT_CI_ICON);
    let review_icon = pr.review_icon.as_deref().unwrap_or(DEFAULT_REVIEW_ICON);
    let number = pr
        .number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    let title: String = pr.title.chars().take(TITLE_WIDTH).collect();
    let draft = if pr.is_draft { " (draft)" } else { "" };

    let mut lines = vec![
        format!("{ci_icon}{review_icon} {}#{number}: {title}{draft}", pr.repo_short),
        format!(
            "{INDENT}CI: {} | Review: {}",
            pr.ci_label.as_deref().unwrap_or("?"),
            pr.review_label.as_deref().unwrap_or("?")
        ),
        format!("{INDENT}{}", pr.url),
    ];

    let failing: Vec<&str> = pr
        .failing_checks()
        .take(MAX_FAILING_CHECKS)
        .map(|c| c.name.as_str())
        .collect();
    if !failing.is_empty() {
        lines.push(format!("{INDENT}Failing: {}", failing.join(", ")));
    }
    lines
}

pub fn summary(snapshot: Option<&Snapshot>) -> String {
    let Some(snap) = snapshot else {
        return format!("{NO_DATA}\n");
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} open PRs (updated {})",
        snap.total_count,
        if snap.last_updated.is_empty() {
            "?"
        } else {
            snap.last_updated.as_str()
        }
    );

    if snap.is_empty() {
        let _ = writeln!(out, "\nNo open PRs found.");
        return out;
    }

    for (heading, prs) in [("My PRs", &snap.my_prs), ("Watching", &snap.watched_prs)] {
        if prs.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{heading} ({}):", prs.len());
        for pr in prs {
            for line in pr_lines(pr) {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
    out
}

pub fn watch_list(urls: &[String]) -> String {
    if urls.is_empty() {
        return "Not watching any extra PRs.\n".to_string();
    }
    urls.iter().map(|u| format!("{u}\n")).collect()
}

/// Everything `prw status` reports, gathered before rendering.
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub running: bool,
    pub config_path: String,
    pub data_path: String,
    /// Present once the fetcher has written a snapshot.
    pub snapshot: Option<SnapshotStatus>,
    pub watching: usize,
    pub dismissed: usize,
    pub refresh_interval_secs: u64,
    pub my_prs_query: String,
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotStatus {
    pub last_updated: String,
    pub age: Option<String>,
    pub my_prs: usize,
    pub watched_prs: usize,
}

pub fn status(report: &StatusReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Background fetcher: {}",
        if report.running { "running" } else { "not running" }
    );
    let _ = writeln!(out, "Config file:        {}", report.config_path);
    let _ = writeln!(out, "Data file:          {}", report.data_path);
    match &report.snapshot {
        Some(snap) => {
            let age = snap
                .age
                .as_deref()
                .map(|a| format!(" ({a})"))
                .unwrap_or_default();
            let _ = writeln!(out, "Last updated:       {}{age}", snap.last_updated);
            let _ = writeln!(
                out,
                "PRs:                {} mine, {} watched",
                snap.my_prs, snap.watched_prs
            );
        }
        None => {
            let _ = writeln!(out, "Last updated:       No PR data yet");
        }
    }
    let _ = writeln!(out, "Watch-list:         {} URLs", report.watching);
    if report.dismissed > 0 {
        let _ = writeln!(out, "Dismissed:          {} URLs", report.dismissed);
    }
    let _ = writeln!(out, "Refresh interval:   {}s", report.refresh_interval_secs);
    let _ = writeln!(out, "Search query:       {}", report.my_prs_query);
    out
}
