//! Module for generating the sentinel config.
//!
//! [generate] chooses the source of the masters:
//! - a sentinel that answers ([crate::sentinel]);
//! - otherwise the redis pods in kubernetes ([crate::discovery]).
//!
//! [run] performs a complete run for the resolved settings: it opens the config file for appending,
//! generates the master blocks into it, closes it, and logs the config file before and after.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
