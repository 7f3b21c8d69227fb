use std::path::PathBuf;

/// The resolved settings for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// The sentinel config file to append the master blocks to.
    pub path_to_file: PathBuf,
    /// The namespace to find the redis pods in. Empty means all namespaces.
    pub namespace: String,
    /// The host:port of the sentinel to ask for its masters.
    pub sentinel_host_port: String,
    /// The label selector for the redis pods, in the form `(key)=(value),(key)=(value)`.
    pub minion_labels: String,
    /// The number of attempts to reach a redis instance.
    pub ping_retries: usize,
}
