//! Module for getting the masters from a running sentinel.
//!
//! The sentinel at `--sentinel-host-port` is pinged first, with a bounded number of attempts (`--ping-retries`).
//! - If it does not answer, the masters are discovered via kubernetes ([crate::discovery]).
//! - If it answers, `SENTINEL MASTERS` is requested, and a block is written for every master in the reply.
//!   A failure of `SENTINEL MASTERS` ends the run with an error.
//!
//! `SENTINEL MASTERS` returns an array with an element per master, each element is a flat array
//! of keys and values:
//! ```text
//! 1)  1) "name"
//!     2) "mymaster"
//!     3) "ip"
//!     4) "10.244.1.12"
//!     5) "port"
//!     6) "6379"
//!     ...
//! ```
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
