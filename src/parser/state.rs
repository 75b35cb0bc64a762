use crate::flow::{PortProtocolCounts, PortProtocolKey, TagCounts};

/// Row accounting for one flow log pass. Malformed rows never surface as errors, only here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowStats {
    pub rows_read: usize,
    pub rows_counted: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub tag_counts: TagCounts,
    pub port_protocol_counts: PortProtocolCounts,
    pub stats: FlowStats,
}

impl Aggregation {
    pub fn record(&mut self, tag: &str, key: &PortProtocolKey) {
        self.tag_counts.increment(tag);
        self.port_protocol_counts.increment(key);
        self.stats.rows_counted += 1;
    }
}
