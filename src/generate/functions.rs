//! The impls and functions.
//!
use std::{io::Write, time::Instant};
use log::*;
use anyhow::{Context, Result};
use crate::config_file;
use crate::discovery::{self, ClusterSource, KubernetesCluster};
use crate::generate::Generated;
use crate::sentinel::{self, RedisSentinel, SentinelSource};
use crate::settings::Settings;
use crate::utility;

/// Write the master blocks, from the sentinel if it answers, otherwise from the cluster.
///
/// The cluster is not used when the sentinel answers, and `SENTINEL MASTERS`
/// is not requested when it doesn't.
pub async fn generate<S: SentinelSource, C: ClusterSource, W: Write>(
    sentinel: &S,
    cluster: &C,
    writer: &mut W,
) -> Result<Generated>
{
    if sentinel.ping().await {
        let masters = sentinel::write_sentinel_masters(sentinel, writer).await?;
        Ok(Generated::FromSentinel { masters })
    } else {
        let masters = discovery::discover_clusters(cluster, writer).await?;
        Ok(Generated::FromCluster { masters })
    }
}

/// Perform a complete run.
pub async fn run(
    settings: &Settings,
) -> Result<Generated>
{
    let timer = Instant::now();
    utility::print_file("Raw File", &settings.path_to_file)?;

    let generated = {
        let mut file = config_file::open_append(&settings.path_to_file)?;
        let generated = generate(&RedisSentinel::new(settings), &KubernetesCluster::new(settings), &mut file).await?;
        file.flush()
            .with_context(|| format!("Error flushing file: {}", settings.path_to_file.display()))?;
        generated
    };

    utility::print_file("Final File", &settings.path_to_file)?;
    match generated {
        Generated::FromSentinel { masters } => info!("Sentinel config generated with {} master(s)... Let's go! ({:?})", masters, timer.elapsed()),
        Generated::FromCluster { masters } => info!("File written from Cluster query with {} master(s)... Let's go! ({:?})", masters, timer.elapsed()),
    }
    Ok(generated)
}
