//! The impls and functions.
//!
use std::{io::Write, time::Instant};
use log::*;
use anyhow::{Context, Result};
use crate::config_file;
use crate::master_record::MasterRecord;
use crate::sentinel::RedisSentinel;
use crate::settings::Settings;
use crate::utility;

/// The address used when no sentinel host:port is set.
pub const DEFAULT_SENTINEL_HOST_PORT: &str = "localhost:6379";

/// A sentinel that can be asked for its masters.
#[allow(async_fn_in_trait)]
pub trait SentinelSource {
    /// Return true if the sentinel answers.
    async fn ping(&self) -> bool;
    /// Return the masters known to the sentinel, every master as a flat key/value array.
    async fn masters(&self) -> Result<Vec<Vec<String>>>;
}

impl RedisSentinel {
    /// An empty host:port falls back to [DEFAULT_SENTINEL_HOST_PORT].
    pub fn new(settings: &Settings) -> Self {
        let host_port = if settings.sentinel_host_port.is_empty() {
            info!("No sentinel host:port set, using: {}", DEFAULT_SENTINEL_HOST_PORT);
            DEFAULT_SENTINEL_HOST_PORT.to_string()
        } else {
            settings.sentinel_host_port.clone()
        };
        RedisSentinel {
            host_port,
            ping_retries: settings.ping_retries,
        }
    }
}

impl SentinelSource for RedisSentinel {
    async fn ping(&self) -> bool
    {
        match utility::query_with_retries::<String>(&self.host_port, &redis::cmd("PING"), self.ping_retries).await {
            Ok(reply) => {
                info!("Sentinel {} answered ping: {}", self.host_port, reply);
                true
            }
            Err(error) => {
                info!("No Ping --- no other Sentinel found: {:#}", error);
                false
            }
        }
    }
    async fn masters(&self) -> Result<Vec<Vec<String>>>
    {
        let mut command = redis::cmd("SENTINEL");
        command.arg("MASTERS");
        utility::query_with_retries(&self.host_port, &command, self.ping_retries).await
            .with_context(|| format!("Getting Masters from Sentinel {} went wrong", self.host_port))
    }
}

/// Write a block for every master known to the sentinel.
///
/// The masters are numbered starting at 0, in the order of the sentinel reply.
/// Returns the number of masters written.
pub async fn write_sentinel_masters<S: SentinelSource, W: Write>(
    sentinel: &S,
    writer: &mut W,
) -> Result<usize>
{
    info!("begin sentinel masters");
    let timer = Instant::now();

    let masters = sentinel.masters().await?;
    for (ordinal, flat) in masters.iter().enumerate() {
        config_file::write_master_block(writer, ordinal, &MasterRecord::from_flat_pairs(flat))?;
    }

    info!("end sentinel masters: {} master(s): {:?}", masters.len(), timer.elapsed());
    Ok(masters.len())
}
