//! sentinel_conf generates a redis sentinel configuration file.
//!
//! The masters are taken from a running sentinel if one answers at the configured address.
//! If no sentinel answers, the redis pods in the kubernetes namespace matching the configured
//! label selector are asked for their replication role, and every master found is described
//! using the annotations on its pod.
//!
//! The modules:
//! - [settings]: the flags with environment fallback, resolved into [settings::Settings].
//! - [master_record]: the [master_record::MasterRecord] that is written for every master.
//! - [config_file]: the writer for the sentinel configuration grammar.
//! - [sentinel]: the sentinel query path.
//! - [discovery]: the kubernetes pod discovery path.
//! - [generate]: the choice between both paths.
//! - [utility]: redis connection and file printing helpers.
use clap::Parser;

pub mod settings;
pub mod master_record;
pub mod config_file;
pub mod sentinel;
pub mod discovery;
pub mod generate;
pub mod utility;

/// The number of times a redis instance is tried before it is considered unreachable.
const DEFAULT_PING_RETRIES: &str = "10";

/// The commandline options.
///
/// Every option can also be set via an environment variable, which can be set in a `.env` file.
/// The camelcase aliases are the option names used by earlier versions of the tool.
#[derive(Debug, Parser, Default)]
#[command(author, version, about, long_about = None)]
pub struct Opts {
    /// path to the sentinel config file to append to (PATH_TO_CONFIG_FILE)
    #[arg(long, alias = "pathToFile", value_name = "path")]
    pub path_to_file: Option<String>,
    /// namespace to find the redis pods in, all namespaces if empty (NAMESPACE)
    #[arg(long, alias = "ns", value_name = "namespace")]
    pub namespace: Option<String>,
    /// host:port of the sentinel to get the masters from (SENTINEL_HOST_PORT)
    #[arg(long, alias = "sentinelHostPort", value_name = "host:port")]
    pub sentinel_host_port: Option<String>,
    /// label selector for the redis pods: (key)=(value),(key)=(value) (MINION_LABELS)
    #[arg(long, alias = "minionLabels", value_name = "selector")]
    pub minion_labels: Option<String>,
    /// number of attempts to reach a redis instance (PING_RETRIES)
    #[arg(long, value_name = "attempts")]
    pub ping_retries: Option<String>,
}
