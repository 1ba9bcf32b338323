use std::io::Write;
use std::path::Path;

use anyhow::Result;
use log::{info, warn};
use time::OffsetDateTime;

use crate::domain::config::Config;
use crate::repo::{ConfigStore, SnapshotSource};
use crate::supervisor::ProcessSupervisor;
use crate::ui::{self, SnapshotStatus, StatusReport};
use crate::usecase::watchlist::{self, AddOutcome, MatchMode};

pub struct App<C: ConfigStore, S: SnapshotSource, P: ProcessSupervisor> {
    config: C,
    snapshots: S,
    supervisor: P,
}

impl<C: ConfigStore, S: SnapshotSource, P: ProcessSupervisor> App<C, S, P> {
    pub fn new(config: C, snapshots: S, supervisor: P) -> Self {
        Self {
            config,
            snapshots,
            supervisor,
        }
    }

    pub fn show_summary(&self, out: &mut impl Write) -> Result<()> {
        let snapshot = self.snapshots.load()?;
        out.write_all(ui::summary(snapshot.as_ref()).as_bytes())?;
        Ok(())
    }

    pub fn dump_raw(&self, out: &mut impl Write) -> Result<()> {
        let raw = self
            .snapshots
            .load_raw()?
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
        writeln!(out, "{}", serde_json::to_string_pretty(&raw)?)?;
        Ok(())
    }

    /// Watching a dismissed PR also takes it off `dismissed_prs`, otherwise the
    /// fetcher would keep skipping it.
    pub fn add_watch(&mut self, url: &str, out: &mut impl Write) -> Result<()> {
        let mut cfg = self.config.load()?;
        let outcome = watchlist::add(&mut cfg.watched_prs, url)?;
        let url = match &outcome {
            AddOutcome::Added(url) | AddOutcome::AlreadyWatching(url) => url.clone(),
        };
        let undismissed = cfg.undismiss(&url);
        if matches!(outcome, AddOutcome::Added(_)) || undismissed {
            self.config.save(&cfg)?;
        }

        match outcome {
            AddOutcome::AlreadyWatching(url) => writeln!(out, "Already watching: {url}")?,
            AddOutcome::Added(url) => {
                info!("added {url} to the watch-list");
                writeln!(out, "Added: {url}")?;
            }
        }
        if undismissed {
            info!("{url} is no longer dismissed");
            writeln!(out, "No longer dismissed: {url}")?;
        }
        Ok(())
    }

    pub fn remove_watch(
        &mut self,
        target: &str,
        mode: MatchMode,
        out: &mut impl Write,
    ) -> Result<()> {
        let mut cfg = self.config.load()?;
        match watchlist::remove(&mut cfg.watched_prs, target, mode)? {
            Some(url) => {
                self.config.save(&cfg)?;
                info!("removed {url} from the watch-list");
                writeln!(out, "Removed: {url}")?;
            }
            None => {
                writeln!(out, "Not found: {target}")?;
                if cfg.watched_prs.is_empty() {
                    out.write_all(ui::watch_list(&cfg.watched_prs).as_bytes())?;
                } else {
                    writeln!(out, "Currently watching:")?;
                    for url in &cfg.watched_prs {
                        writeln!(out, "  {url}")?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn list_watch_urls(&self, out: &mut impl Write) -> Result<()> {
        let cfg = self.config.load()?;
        out.write_all(ui::watch_list(&cfg.watched_prs).as_bytes())?;
        Ok(())
    }

    pub fn trigger_refresh(&self, out: &mut impl Write) -> Result<()> {
        if !self.supervisor.is_installed() {
            writeln!(
                out,
                "Background fetcher is not set up: {} does not exist. Run setup first.",
                self.supervisor.descriptor().display()
            )?;
            return Ok(());
        }
        if let Err(e) = self.supervisor.restart() {
            warn!("restarting the background fetcher reported an error: {e}");
        }
        writeln!(out, "Refresh triggered. The background fetcher is restarting.")?;
        Ok(())
    }

    pub fn show_status(&self, now: OffsetDateTime, out: &mut impl Write) -> Result<()> {
        let running = self.supervisor.is_running();
        let cfg = self.config.load()?;
        let snapshot = self.snapshots.load()?;

        let report = StatusReport {
            running,
            config_path: display_location(self.config.location()),
            data_path: display_location(self.snapshots.location()),
            snapshot: snapshot.map(|snap| SnapshotStatus {
                age: ui::time_ago(&snap.last_updated, now),
                my_prs: snap.my_prs.len(),
                watched_prs: snap.watched_prs.len(),
                last_updated: snap.last_updated,
            }),
            watching: cfg.watched_prs.len(),
            dismissed: cfg.dismissed().len(),
            refresh_interval_secs: cfg.refresh_interval(),
            my_prs_query: cfg.my_prs_query().to_string(),
        };
        out.write_all(ui::status(&report).as_bytes())?;
        Ok(())
    }

    /// Hide a PR from the fetcher's output and drop it from the watch-list.
    pub fn dismiss(&mut self, target: &str, out: &mut impl Write) -> Result<()> {
        let mut cfg = self.config.load()?;
        let Some(url) = self.resolve(&cfg, target)? else {
            writeln!(out, "Not found: {target}")?;
            return Ok(());
        };

        let before = cfg.watched_prs.len();
        cfg.watched_prs.retain(|u| *u != url);
        let unwatched = cfg.watched_prs.len() != before;
        let newly_dismissed = cfg.dismiss(&url);
        if !unwatched && !newly_dismissed {
            writeln!(out, "Already dismissed: {url}")?;
            return Ok(());
        }

        self.config.save(&cfg)?;
        info!("dismissed {url}");
        writeln!(out, "Dismissed: {url}")?;
        Ok(())
    }

    pub fn open_pr(
        &self,
        target: &str,
        out: &mut impl Write,
        launch: impl FnOnce(&str) -> std::io::Result<()>,
    ) -> Result<()> {
        let cfg = self.config.load()?;
        let Some(url) = self.resolve(&cfg, target)? else {
            writeln!(out, "Not found: {target}")?;
            return Ok(());
        };
        writeln!(out, "Opening {url}")?;
        launch(&url)?;
        Ok(())
    }

    // Snapshot PRs first, then the watch-list; exact match wins over substring.
    fn resolve(&self, cfg: &Config, target: &str) -> Result<Option<String>> {
        if target.trim().is_empty() {
            return Ok(None);
        }
        let mut candidates: Vec<String> = self
            .snapshots
            .load()?
            .map(|snap| snap.all_prs().map(|pr| pr.url.clone()).collect())
            .unwrap_or_default();
        candidates.retain(|u| !u.is_empty());
        candidates.extend(cfg.watched_prs.iter().cloned());

        let idx = watchlist::find(candidates.as_slice(), target, MatchMode::Loose)?;
        Ok(idx.map(|i| candidates.swap_remove(i)))
    }
}

fn display_location(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string())
}
