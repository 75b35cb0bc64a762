use super::state::Aggregation;
use crate::error::{FlowTagError, Result};
use crate::flow::{PortProtocolKey, UNTAGGED};
use crate::lookup::LookupIndex;
use crate::record::{data_lines, parse_port, split_fields};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

const FLOWLOG_DSTPORT: usize = 3;
const FLOWLOG_PROTOCOL: usize = 4;
const VALID_FLOWLOG_FIELDS: usize = 5;

/// Tags every flow log row through `index` and counts tags and (port, protocol) pairs.
///
/// The first line is a header. Rows without exactly five fields are dropped from all counts.
/// A destination port that is not an integer aborts the whole pass.
pub fn aggregate<R: BufRead>(
    reader: R,
    source_name: &str,
    index: &LookupIndex,
) -> Result<Aggregation> {
    let mut aggregation = Aggregation::default();

    for line in data_lines(reader, source_name) {
        let (line_no, text) = line?;
        aggregation.stats.rows_read += 1;

        let fields = split_fields(&text);
        if fields.len() != VALID_FLOWLOG_FIELDS {
            debug!(line = line_no, fields = fields.len(), "Skipping malformed flow log row");
            aggregation.stats.rows_skipped += 1;
            continue;
        }

        let port = parse_port(fields[FLOWLOG_DSTPORT], source_name, line_no)?;
        let key = PortProtocolKey::new(port, fields[FLOWLOG_PROTOCOL].trim());
        let tag = index.tag_for(&key).unwrap_or(UNTAGGED);
        aggregation.record(tag, &key);
    }

    Ok(aggregation)
}

pub fn aggregate_flow_log(path: &Path, index: &LookupIndex) -> Result<Aggregation> {
    let file = File::open(path).map_err(|e| FlowTagError::io(path, e))?;
    let start_time = Instant::now();
    let aggregation = aggregate(BufReader::new(file), &path.display().to_string(), index)?;
    let stats = aggregation.stats;
    info!(
        path = ?path,
        rows = stats.rows_read,
        counted = stats.rows_counted,
        skipped = stats.rows_skipped,
        tags = aggregation.tag_counts.len(),
        elapsed_ms = start_time.elapsed().as_millis(),
        "Completed flow log aggregation"
    );
    Ok(aggregation)
}
