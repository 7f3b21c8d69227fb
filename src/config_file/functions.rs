//! The functions.
//!
use std::{fs, io::Write, path::Path};
use log::*;
use anyhow::{Context, Result};
use crate::master_record::MasterRecord;

/// Open the config file for appending, create it if it doesn't exist.
pub fn open_append(
    path: &Path,
) -> Result<fs::File>
{
    let mut options = fs::OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
        .with_context(|| format!("Error on file open: {}", path.display()))
}

/// Append the block for a single master to the writer.
pub fn write_master_block<W: Write>(
    writer: &mut W,
    ordinal: usize,
    record: &MasterRecord,
) -> Result<()>
{
    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    let name = field(&record.name);
    let lines = [
        format!("# start master {} {}", ordinal, name),
        format!("sentinel monitor {} {} {} {}", name, field(&record.ip), field(&record.port), field(&record.quorum)),
        format!("sentinel down-after-milliseconds {} {}", name, field(&record.down_after_ms)),
        format!("sentinel failover-timeout {} {}", name, field(&record.failover_timeout)),
        format!("sentinel parallel-syncs {} {}", name, field(&record.parallel_syncs)),
        format!("# end master {}", ordinal),
    ];
    for line in lines {
        debug!("{}", line);
        writeln!(writer, "{}", line)
            .with_context(|| format!("Error on write: {}", line))?;
    }
    info!("master {} written: {}", ordinal, name);
    Ok(())
}
