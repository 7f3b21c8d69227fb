use std::collections::BTreeMap;

/// A pod that might run a redis master, taken from the kubernetes pod list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePod {
    pub name: String,
    /// The ip assigned to the pod, `None` if the pod has no ip (yet).
    pub pod_ip: Option<String>,
    pub annotations: BTreeMap<String, String>,
}

/// The parsed output of `INFO replication`.
///
/// Only lines of the form `key:value` are kept.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplicationInfo {
    pub values: BTreeMap<String, String>,
}

/// The kubernetes cluster as source of candidate pods.
///
/// The kubernetes client is created when the pods are listed,
/// so no client is needed when a sentinel answers.
#[derive(Debug, Clone)]
pub struct KubernetesCluster {
    pub namespace: String,
    pub label_selector: String,
    pub ping_retries: usize,
}
