//! Module for writing the sentinel config file.
//!
//! For every master, a block of six lines is appended to the config file:
//! ```text
//! # start master <ordinal> <name>
//! sentinel monitor <name> <ip> <port> <quorum>
//! sentinel down-after-milliseconds <name> <down_after_ms>
//! sentinel failover-timeout <name> <failover_timeout>
//! sentinel parallel-syncs <name> <parallel_syncs>
//! # end master <ordinal>
//! ```
//! The fields are written as they are, a missing field is written as an empty string.
//! A failing write is an error for the whole run, blocks that were written already stay in the file.
//!
mod functions;

pub use functions::*;
