//! Module for the master record.
//!
//! A [MasterRecord] holds the properties of a single master that are written to the sentinel config.
//! It is created in one of two ways:
//! - from the flat key/value array of a `SENTINEL MASTERS` reply ([MasterRecord::from_flat_pairs]);
//! - from a redis pod that reports the master role ([MasterRecord::from_pod]).
//!
//! Every field is an opaque string, nothing is validated or defaulted.
//! A missing field stays `None`, and is written as an empty string.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
