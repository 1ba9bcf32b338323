use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{ProcessSupervisor, SupervisorError};

pub const AGENT_LABEL: &str = "com.pr-watch";
pub const PROCESS_NAME: &str = "pr_watch";

/// Restarts the fetcher through `launchctl` and spots it with `pgrep`.
pub struct LaunchdSupervisor {
    plist: PathBuf,
    process_name: String,
}

impl LaunchdSupervisor {
    pub fn new(plist: impl Into<PathBuf>, process_name: impl Into<String>) -> Self {
        Self {
            plist: plist.into(),
            process_name: process_name.into(),
        }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_plist_path()?, PROCESS_NAME))
    }

    fn launchctl(&self, action: &str) -> Result<(), SupervisorError> {
        let program = format!("launchctl {action}");
        debug!("running {program} {}", self.plist.display());
        let output = Command::new("launchctl")
            .arg(action)
            .arg(&self.plist)
            .output()
            .map_err(|source| SupervisorError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(SupervisorError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl ProcessSupervisor for LaunchdSupervisor {
    fn descriptor(&self) -> &Path {
        &self.plist
    }

    fn is_running(&self) -> bool {
        match Command::new("pgrep")
            .arg("-f")
            .arg(&self.process_name)
            .output()
        {
            Ok(output) => output.status.success(),
            Err(e) => {
                warn!("failed to execute `pgrep`: {e}");
                false
            }
        }
    }

    // Both calls are always attempted; an unload failure usually just means
    // the agent was not loaded.
    fn restart(&self) -> Result<(), SupervisorError> {
        let unloaded = self.launchctl("unload");
        let loaded = self.launchctl("load");
        unloaded.and(loaded)
    }
}

pub fn default_plist_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("failed to resolve home dir")?;
    Ok(home
        .join("Library")
        .join("LaunchAgents")
        .join(format!("{AGENT_LABEL}.plist")))
}
