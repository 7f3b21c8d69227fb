/// A sentinel reachable via redis at host:port.
#[derive(Debug, Clone)]
pub struct RedisSentinel {
    pub host_port: String,
    pub ping_retries: usize,
}
