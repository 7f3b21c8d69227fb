//! The impls and functions.
//!
use std::{env, path::PathBuf};
use log::*;
use anyhow::{ensure, Context, Result};
use crate::settings::Settings;
use crate::{Opts, DEFAULT_PING_RETRIES};

pub const ENV_PATH_TO_FILE: &str = "PATH_TO_CONFIG_FILE";
pub const ENV_NAMESPACE: &str = "NAMESPACE";
pub const ENV_SENTINEL_HOST_PORT: &str = "SENTINEL_HOST_PORT";
pub const ENV_MINION_LABELS: &str = "MINION_LABELS";
pub const ENV_PING_RETRIES: &str = "PING_RETRIES";

impl Settings {
    /// Resolve the settings from the commandline options, the environment and the defaults.
    ///
    /// The config file path has no default, a run without it is an error.
    pub fn from_opts(options: &Opts) -> Result<Settings> {
        let path_to_file = set_option(&options.path_to_file, ENV_PATH_TO_FILE, None)
            .filter(|path| !path.is_empty())
            .with_context(|| format!("No config file set: use --path-to-file or {}", ENV_PATH_TO_FILE))?;
        let namespace = set_option(&options.namespace, ENV_NAMESPACE, Some("")).unwrap_or_default();
        let sentinel_host_port = set_option(&options.sentinel_host_port, ENV_SENTINEL_HOST_PORT, Some("")).unwrap_or_default();
        let minion_labels = set_option(&options.minion_labels, ENV_MINION_LABELS, Some("")).unwrap_or_default();
        let ping_retries_string = set_option(&options.ping_retries, ENV_PING_RETRIES, Some(DEFAULT_PING_RETRIES)).unwrap_or_default();
        let ping_retries: usize = ping_retries_string.parse()
            .with_context(|| format!("Invalid number for ping retries: {}", ping_retries_string))?;
        ensure!(ping_retries > 0, "Ping retries must be at least 1");

        Ok(Settings {
            path_to_file: PathBuf::from(path_to_file),
            namespace,
            sentinel_host_port,
            minion_labels,
            ping_retries,
        })
    }
    /// Log the settings, so the log of a run shows what it was run with.
    pub fn log(&self) {
        info!("setting path_to_file: {}", self.path_to_file.display());
        info!("setting namespace: {}", self.namespace);
        info!("setting sentinel_host_port: {}", self.sentinel_host_port);
        info!("setting minion_labels: {}", self.minion_labels);
        info!("setting ping_retries: {}", self.ping_retries);
    }
}

/// Return the option if set, otherwise the environment variable if set, otherwise the default.
pub fn set_option(
    option: &Option<String>,
    env_name: &str,
    default: Option<&str>,
) -> Option<String>
{
    if let Some(value) = option {
        info!("{} argument set: using: {}", env_name, value);
        return Some(value.clone());
    }
    match env::var(env_name) {
        Ok(set_var) => {
            info!("{} argument not set: set via environment: {}", env_name, set_var);
            Some(set_var)
        }
        Err(_e) => {
            info!("{} argument not set: and not set via environment: using default: {:?}", env_name, default);
            default.map(str::to_string)
        }
    }
}
