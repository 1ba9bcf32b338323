use std::path::Path;
use std::process::ExitStatus;

pub mod launchd;

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("failed to execute `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// The OS mechanism that keeps the background fetcher alive.
pub trait ProcessSupervisor {
    /// Service descriptor the supervisor loads the fetcher from.
    fn descriptor(&self) -> &Path;

    fn is_installed(&self) -> bool {
        self.descriptor().exists()
    }

    /// Best effort; a failed query counts as not running.
    fn is_running(&self) -> bool;

    fn restart(&self) -> Result<(), SupervisorError>;
}
