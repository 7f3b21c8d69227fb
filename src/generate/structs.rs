/// The source the masters were taken from, and the number of masters written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generated {
    FromSentinel { masters: usize },
    FromCluster { masters: usize },
}
