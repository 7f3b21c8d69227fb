//! Module for resolving the settings of a run.
//!
//! Every setting is taken from:
//! 1. the commandline option, if set;
//! 2. otherwise the environment variable, which can be set via `.env` (dotenv);
//! 3. otherwise the default.
//!
//! The resolved [Settings] are created once in main and passed by reference to the paths that need them.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
