//! The functions.
//!
use std::{fs, io::ErrorKind, path::Path, time::{Duration, Instant}};
use log::*;
use anyhow::{anyhow, Context, Result};
use redis::FromRedisValue;

/// The time to wait for a tcp connection to a redis instance.
pub const REDIS_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
/// The time to wait for the reply to a command.
pub const REDIS_RESPONSE_TIMEOUT: Duration = Duration::from_secs(3);

/// Run a redis command against host:port.
///
/// Every attempt uses a new connection, and the command is tried `attempts` times
/// before the last error is returned.
/// An attempt fails when connecting takes longer than [REDIS_CONNECTION_TIMEOUT],
/// or the reply takes longer than [REDIS_RESPONSE_TIMEOUT], so an instance that
/// accepts connections but never answers does not block the run.
pub async fn query_with_retries<T: FromRedisValue>(
    host_port: &str,
    command: &redis::Cmd,
    attempts: usize,
) -> Result<T>
{
    let timer = Instant::now();
    let client = redis::Client::open(format!("redis://{}", host_port))
        .with_context(|| format!("Invalid redis address: {}", host_port))?;

    let mut last_error = None;
    for attempt in 1..=attempts {
        match query_once(&client, command).await {
            Ok(value) => {
                debug!("{}: success after {} attempt(s): {:?}", host_port, attempt, timer.elapsed());
                return Ok(value);
            }
            Err(error) => {
                debug!("{}: attempt {}/{} failed: {}", host_port, attempt, attempts, error);
                last_error = Some(error);
            }
        }
    }
    let error = last_error
        .map(anyhow::Error::from)
        .unwrap_or_else(|| anyhow!("No attempts made"));
    Err(error).with_context(|| format!("Redis at {} did not respond after {} attempt(s)", host_port, attempts))
}

async fn query_once<T: FromRedisValue>(
    client: &redis::Client,
    command: &redis::Cmd,
) -> redis::RedisResult<T>
{
    let mut connection = client
        .get_multiplexed_async_connection_with_timeouts(REDIS_RESPONSE_TIMEOUT, REDIS_CONNECTION_TIMEOUT)
        .await?;
    command.query_async(&mut connection).await
}

/// Log the contents of the config file.
///
/// A file that does not exist yet is not an error, it will be created when opened for appending.
pub fn print_file(
    title: &str,
    path: &Path,
) -> Result<()>
{
    match fs::read_to_string(path) {
        Ok(content) => {
            info!("{} - Config file:\n{}", title, content);
            Ok(())
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            info!("{} - Config file {} does not exist", title, path.display());
            Ok(())
        }
        Err(error) => Err(error).with_context(|| format!("File read problem: {}", path.display())),
    }
}

/// Start a listener that accepts connections, but never replies to anything sent.
#[cfg(test)]
pub(crate) async fn silent_listener() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let mut accepted = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            accepted.push(socket);
        }
    });
    address
}
