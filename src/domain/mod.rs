pub mod config;
pub mod pr_url;
pub mod snapshot;
