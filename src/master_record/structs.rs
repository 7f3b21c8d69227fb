/// The properties of a master as written to the sentinel config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterRecord {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub port: Option<String>,
    pub quorum: Option<String>,
    pub down_after_ms: Option<String>,
    pub failover_timeout: Option<String>,
    pub parallel_syncs: Option<String>,
}
