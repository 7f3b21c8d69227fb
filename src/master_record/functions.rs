//! The impls and functions.
//!
use std::collections::BTreeMap;
use itertools::Itertools;
use log::*;
use crate::discovery::CandidatePod;
use crate::master_record::MasterRecord;

// the keys in a SENTINEL MASTERS reply
pub const SENTINEL_KEY_NAME: &str = "name";
pub const SENTINEL_KEY_IP: &str = "ip";
pub const SENTINEL_KEY_PORT: &str = "port";
pub const SENTINEL_KEY_QUORUM: &str = "quorum";
pub const SENTINEL_KEY_DOWN_AFTER_MS: &str = "down-after-milliseconds";
pub const SENTINEL_KEY_FAILOVER_TIMEOUT: &str = "failover-timeout";
pub const SENTINEL_KEY_PARALLEL_SYNCS: &str = "parallel-syncs";

// the annotations on a redis pod
pub const ANNOTATION_INSTANCE_PORT: &str = "redis.instance.port";
pub const ANNOTATION_CLUSTER_NAME: &str = "redis.sentinel.cluster.name";
pub const ANNOTATION_CLUSTER_QUORUM: &str = "redis.sentinel.cluster.quorum";
pub const ANNOTATION_CLUSTER_DOWN_AFTER_MS: &str = "redis.sentinel.cluster.down.after.ms";
pub const ANNOTATION_CLUSTER_PARALLEL_SYNCS: &str = "redis.sentinel.cluster.parallel.syncs";
pub const ANNOTATION_CLUSTER_FAILOVER_TIMEOUT: &str = "redis.sentinel.cluster.failover.timeout";

impl MasterRecord {
    pub fn new() -> Self {
        Default::default()
    }
    /// Create a master record from a single master in a `SENTINEL MASTERS` reply.
    ///
    /// The reply for a master is a flat array: key, value, key, value, ...
    /// Keys that are not part of the sentinel config (runid, flags, num-slaves, ...) are ignored.
    pub fn from_flat_pairs(flat: &[String]) -> Self
    {
        if flat.len() % 2 != 0 {
            warn!("Uneven number of elements in sentinel master reply, ignoring last key: {:?}", flat.last());
        }
        let values: BTreeMap<&str, &str> = flat.iter()
            .map(String::as_str)
            .tuples()
            .collect();
        debug!("{:?}", values);

        let field = |key: &str| values.get(key).map(|value| value.to_string());
        MasterRecord {
            name: field(SENTINEL_KEY_NAME),
            ip: field(SENTINEL_KEY_IP),
            port: field(SENTINEL_KEY_PORT),
            quorum: field(SENTINEL_KEY_QUORUM),
            down_after_ms: field(SENTINEL_KEY_DOWN_AFTER_MS),
            failover_timeout: field(SENTINEL_KEY_FAILOVER_TIMEOUT),
            parallel_syncs: field(SENTINEL_KEY_PARALLEL_SYNCS),
        }
    }
    /// Create a master record from a redis pod that reported to be master.
    ///
    /// The ip is the ip of the pod, the port is the instance port annotation,
    /// all the other fields come from the sentinel cluster annotations.
    pub fn from_pod(pod: &CandidatePod) -> Self
    {
        MasterRecord {
            name: pod.annotation(ANNOTATION_CLUSTER_NAME),
            ip: pod.pod_ip.clone(),
            port: pod.annotation(ANNOTATION_INSTANCE_PORT),
            quorum: pod.annotation(ANNOTATION_CLUSTER_QUORUM),
            down_after_ms: pod.annotation(ANNOTATION_CLUSTER_DOWN_AFTER_MS),
            failover_timeout: pod.annotation(ANNOTATION_CLUSTER_FAILOVER_TIMEOUT),
            parallel_syncs: pod.annotation(ANNOTATION_CLUSTER_PARALLEL_SYNCS),
        }
    }
}
