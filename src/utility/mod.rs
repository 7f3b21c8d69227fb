//! Utilities
//!
//! - [query_with_retries]: run a single redis command against a host:port, with a bounded number of attempts.
//! - [print_file]: log the contents of the config file.
//!
mod functions;

pub use functions::*;
