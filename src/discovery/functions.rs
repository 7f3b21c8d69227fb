//! The impls and functions.
//!
use std::{io::Write, time::Instant};
use log::*;
use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::{api::{Api, ListParams}, Client};
use crate::config_file;
use crate::discovery::{CandidatePod, KubernetesCluster, ReplicationInfo};
use crate::master_record::{MasterRecord, ANNOTATION_INSTANCE_PORT};
use crate::settings::Settings;
use crate::utility;

const INFO_SECTION_REPLICATION: &str = "replication";
const INFO_KEY_ROLE: &str = "role";
const ROLE_MASTER: &str = "master";

/// The source of candidate pods and their replication info.
#[allow(async_fn_in_trait)]
pub trait ClusterSource {
    /// List the candidate pods. A failure is fatal for the run.
    async fn list_candidates(&self) -> Result<Vec<CandidatePod>>;
    /// Return the raw `INFO replication` output of the redis instance at host:port.
    async fn replication_info(&self, host_port: &str) -> Result<String>;
}

impl CandidatePod {
    /// Return the value of an annotation on the pod.
    pub fn annotation(&self, key: &str) -> Option<String> {
        self.annotations.get(key).cloned()
    }
    /// Return the host:port of the redis instance in the pod.
    ///
    /// This requires both the pod ip and the instance port annotation.
    pub fn host_port(&self) -> Option<String> {
        match (&self.pod_ip, self.annotations.get(ANNOTATION_INSTANCE_PORT)) {
            (Some(pod_ip), Some(port)) => Some(format!("{}:{}", pod_ip, port)),
            _ => None,
        }
    }
}

impl From<Pod> for CandidatePod {
    fn from(pod: Pod) -> Self {
        CandidatePod {
            name: pod.metadata.name.unwrap_or_default(),
            pod_ip: pod.status
                .and_then(|status| status.pod_ip)
                .filter(|pod_ip| !pod_ip.is_empty()),
            annotations: pod.metadata.annotations.unwrap_or_default(),
        }
    }
}

impl ReplicationInfo {
    /// Parse the text returned by `INFO replication`.
    ///
    /// Lines that do not split into exactly two parts on ':' are ignored,
    /// such as the `# Replication` header, empty lines and values containing a ':'.
    pub fn parse(info: &str) -> Self
    {
        let mut replication_info = ReplicationInfo::default();
        for line in info.lines() {
            debug!("RAW line -- {}", line);
            let parts: Vec<&str> = line.split(':').collect();
            if let [key, value] = parts[..] {
                replication_info.values.insert(key.to_string(), value.to_string());
            }
        }
        replication_info
    }
    pub fn role(&self) -> Option<&str> {
        self.values.get(INFO_KEY_ROLE).map(String::as_str)
    }
    pub fn is_master(&self) -> bool {
        self.role() == Some(ROLE_MASTER)
    }
}

impl KubernetesCluster {
    pub fn new(settings: &Settings) -> Self {
        KubernetesCluster {
            namespace: settings.namespace.clone(),
            label_selector: settings.minion_labels.clone(),
            ping_retries: settings.ping_retries,
        }
    }
    fn pods_api(&self, client: Client) -> Api<Pod> {
        if self.namespace.is_empty() {
            Api::all(client)
        } else {
            Api::namespaced(client, &self.namespace)
        }
    }
}

impl ClusterSource for KubernetesCluster {
    async fn list_candidates(&self) -> Result<Vec<CandidatePod>>
    {
        // kubeconfig if present, otherwise the in-cluster service account.
        let client = Client::try_default().await
            .with_context(|| "Create API client for Kubernetes")?;
        let mut list_params = ListParams::default();
        if !self.label_selector.is_empty() {
            list_params = list_params.labels(&self.label_selector);
        }
        let pods = self.pods_api(client).list(&list_params).await
            .with_context(|| format!("Error on querying Kubernetes: namespace: '{}', labels: '{}'", self.namespace, self.label_selector))?;
        Ok(pods.items.into_iter().map(CandidatePod::from).collect())
    }
    async fn replication_info(&self, host_port: &str) -> Result<String>
    {
        let mut command = redis::cmd("INFO");
        command.arg(INFO_SECTION_REPLICATION);
        utility::query_with_retries(host_port, &command, self.ping_retries).await
    }
}

/// Find the masters among the candidate pods, and write a block for each of them.
///
/// The masters are numbered starting at 1, in the order of the pod list.
/// Returns the number of masters written.
pub async fn discover_clusters<C: ClusterSource, W: Write>(
    cluster: &C,
    writer: &mut W,
) -> Result<usize>
{
    info!("begin cluster discovery");
    let timer = Instant::now();

    let candidates = cluster.list_candidates().await?;
    info!("candidate pods found: {}", candidates.len());

    let mut number_of_clusters: usize = 0;
    for pod in candidates {
        let host_port = match pod.host_port() {
            Some(host_port) => host_port,
            None => {
                warn!("Pod {} has no ip or no {} annotation, skipping", pod.name, ANNOTATION_INSTANCE_PORT);
                continue;
            }
        };
        let info = match cluster.replication_info(&host_port).await {
            Ok(info) => info,
            Err(error) => {
                warn!("Error talking to Redis {} {}: {:#}", pod.name, host_port, error);
                continue;
            }
        };
        let replication_info = ReplicationInfo::parse(&info);
        if !replication_info.is_master() {
            debug!("Pod {} {} is not a master, role: {:?}", pod.name, host_port, replication_info.role());
            continue;
        }
        number_of_clusters += 1;
        info!("Pod {} {} is master", pod.name, host_port);
        config_file::write_master_block(writer, number_of_clusters, &MasterRecord::from_pod(&pod))?;
    }

    info!("end cluster discovery: {} master(s): {:?}", number_of_clusters, timer.elapsed());
    Ok(number_of_clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use k8s_openapi::api::core::v1::PodStatus;
    use kube::api::ObjectMeta;
    use crate::master_record::ANNOTATION_CLUSTER_NAME;

    // The masters answer from memory, every other address is queried for real.
    struct ClusterWithRealQueries {
        pods: Vec<CandidatePod>,
        masters: Vec<String>,
    }

    impl ClusterSource for ClusterWithRealQueries {
        async fn list_candidates(&self) -> Result<Vec<CandidatePod>> {
            Ok(self.pods.clone())
        }
        async fn replication_info(&self, host_port: &str) -> Result<String> {
            if self.masters.iter().any(|master| master == host_port) {
                return Ok("# Replication\r\nrole:master\r\n".to_string());
            }
            let cluster = KubernetesCluster {
                namespace: String::new(),
                label_selector: String::new(),
                ping_retries: 1,
            };
            cluster.replication_info(host_port).await
        }
    }

    fn annotated_pod(name: &str, pod_ip: &str, port: &str, cluster_name: &str) -> CandidatePod {
        CandidatePod {
            name: name.to_string(),
            pod_ip: Some(pod_ip.to_string()),
            annotations: BTreeMap::from([
                (ANNOTATION_INSTANCE_PORT.to_string(), port.to_string()),
                (ANNOTATION_CLUSTER_NAME.to_string(), cluster_name.to_string()),
            ]),
        }
    }

    #[tokio::test]
    async fn unit_discover_clusters_skips_silent_instance() {
        // the pod in the middle accepts connections, but never answers.
        let silent_host_port = utility::silent_listener().await;
        let (silent_ip, silent_port) = silent_host_port.rsplit_once(':').unwrap();
        let cluster = ClusterWithRealQueries {
            pods: vec![
                annotated_pod("redis-a-0", "10.0.2.1", "6379", "first"),
                annotated_pod("redis-hung", silent_ip, silent_port, "hung"),
                annotated_pod("redis-b-0", "10.0.2.2", "6379", "second"),
            ],
            masters: vec!["10.0.2.1:6379".to_string(), "10.0.2.2:6379".to_string()],
        };

        let mut buffer: Vec<u8> = Vec::new();
        let masters = tokio::time::timeout(
            std::time::Duration::from_secs(20),
            discover_clusters(&cluster, &mut buffer),
        ).await
            .expect("a silent instance must be skipped, not block the discovery")
            .unwrap();

        assert_eq!(masters, 2);
        let text = String::from_utf8(buffer).unwrap();
        let starts: Vec<&str> = text.lines().filter(|line| line.starts_with("# start master")).collect();
        assert_eq!(starts, vec!["# start master 1 first", "# start master 2 second"]);
        assert!(!text.contains("hung"));
    }

    #[test]
    fn unit_parse_replication_info_master() {
        // This is what INFO replication returns on a master with one replica.
        let info = "# Replication\r\n\
role:master\r\n\
connected_slaves:1\r\n\
slave0:ip=10.244.1.13,port=6379,state=online,offset=1792,lag=0\r\n\
master_failover_state:no-failover\r\n\
master_replid:3e5a4ba5a2b5e4b1c0a7c9f8a0f0e4b7d3a1c2d3\r\n\
master_repl_offset:1792\r\n";
        let result = ReplicationInfo::parse(info);
        assert!(result.is_master());
        assert_eq!(result.values.get("connected_slaves").map(String::as_str), Some("1"));
        assert_eq!(result.values.get("master_repl_offset").map(String::as_str), Some("1792"));
        // the header has no ':'
        assert!(!result.values.keys().any(|key| key.starts_with('#')));
    }

    #[test]
    fn unit_parse_replication_info_replica() {
        // This is what INFO replication returns on a replica.
        let info = "# Replication\r\n\
role:slave\r\n\
master_host:10.244.1.12\r\n\
master_port:6379\r\n\
master_link_status:up\r\n";
        let result = ReplicationInfo::parse(info);
        assert!(!result.is_master());
        assert_eq!(result.role(), Some("slave"));
        assert_eq!(result.values.get("master_host").map(String::as_str), Some("10.244.1.12"));
    }

    #[test]
    fn unit_parse_replication_info_ignores_malformed_lines() {
        let result = ReplicationInfo::parse("no separator\nkey:value:extra\n\nrole:master\n");
        assert_eq!(result.values.len(), 1);
        assert!(result.is_master());
    }

    #[test]
    fn unit_parse_replication_info_empty() {
        let result = ReplicationInfo::parse("");
        assert_eq!(result, ReplicationInfo::default());
        assert_eq!(result.role(), None);
        assert!(!result.is_master());
    }

    #[test]
    fn unit_candidate_pod_from_pod() {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("redis-0".to_string()),
                annotations: Some(BTreeMap::from([
                    (ANNOTATION_INSTANCE_PORT.to_string(), "6379".to_string()),
                ])),
                ..ObjectMeta::default()
            },
            status: Some(PodStatus {
                pod_ip: Some("10.244.1.12".to_string()),
                ..PodStatus::default()
            }),
            ..Pod::default()
        };
        let candidate = CandidatePod::from(pod);
        assert_eq!(candidate.name, "redis-0");
        assert_eq!(candidate.host_port().as_deref(), Some("10.244.1.12:6379"));
    }

    #[test]
    fn unit_candidate_pod_without_ip() {
        // a pending pod has a status but no ip yet.
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("redis-1".to_string()),
                annotations: Some(BTreeMap::from([
                    (ANNOTATION_INSTANCE_PORT.to_string(), "6379".to_string()),
                ])),
                ..ObjectMeta::default()
            },
            status: Some(PodStatus {
                pod_ip: Some(String::new()),
                ..PodStatus::default()
            }),
            ..Pod::default()
        };
        let candidate = CandidatePod::from(pod);
        assert_eq!(candidate.pod_ip, None);
        assert_eq!(candidate.host_port(), None);
    }

    #[test]
    fn unit_candidate_pod_without_port_annotation() {
        let candidate = CandidatePod {
            name: "redis-2".to_string(),
            pod_ip: Some("10.244.1.14".to_string()),
            annotations: BTreeMap::new(),
        };
        assert_eq!(candidate.host_port(), None);
        assert_eq!(candidate.annotation(ANNOTATION_INSTANCE_PORT), None);
    }

    #[test]
    fn unit_kubernetes_cluster_from_settings() {
        let settings = Settings {
            namespace: "redis".to_string(),
            minion_labels: "app=redis".to_string(),
            ping_retries: 4,
            ..Settings::default()
        };
        let cluster = KubernetesCluster::new(&settings);
        assert_eq!(cluster.namespace, "redis");
        assert_eq!(cluster.label_selector, "app=redis");
        assert_eq!(cluster.ping_retries, 4);
    }
}
