//! Module for discovering the redis masters via kubernetes.
//!
//! This is the fallback path, used when no sentinel answers.
//!
//! The pods matching the label selector (`--minion-labels`) in the namespace (`--namespace`) are listed.
//! For every pod:
//! - the address is the pod ip and the `redis.instance.port` annotation;
//! - `INFO replication` is requested from the redis instance at the address;
//! - if it reports `role:master`, a [crate::master_record::MasterRecord] is created from the pod and written.
//!
//! A pod that cannot be reached, or that is not a master, is skipped.
//! Failing to list the pods ends the run with an error.
//!
//! Example `INFO replication` output on a master:
//! ```text
//! # Replication
//! role:master
//! connected_slaves:1
//! slave0:ip=10.244.1.13,port=6379,state=online,offset=1792,lag=0
//! master_replid:3e5a4ba5a2b5e4b1c0a7c9f8a0f0e4b7d3a1c2d3
//! ```
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
