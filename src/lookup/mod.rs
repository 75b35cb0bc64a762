use crate::error::{FlowTagError, Result};
use crate::flow::PortProtocolKey;
use crate::record::{data_lines, parse_port, split_fields};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};


const LOOKUP_DSTPORT: usize = 0;
const LOOKUP_PROTOCOL: usize = 1;
const LOOKUP_TAG: usize = 2;
const VALID_LOOKUP_FIELDS: usize = 3;

/// Read-only mapping from (port, protocol) to tag.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    tags: HashMap<PortProtocolKey, String>,
    skipped_rows: usize,
}

impl LookupIndex {
    pub fn tag_for(&self, key: &PortProtocolKey) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Rows ignored because they did not have exactly three fields.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

/// Builds the index from `dstport,protocol,tag` rows. The first line is always treated as a
/// header. Later duplicates of a key overwrite earlier ones.
pub fn build_index<R: BufRead>(reader: R, source_name: &str) -> Result<LookupIndex> {
    let mut index = LookupIndex::default();

    for line in data_lines(reader, source_name) {
        let (line_no, text) = line?;
        let fields = split_fields(&text);
        if fields.len() != VALID_LOOKUP_FIELDS {
            debug!(line = line_no, fields = fields.len(), "Skipping malformed lookup row");
            index.skipped_rows += 1;
            continue;
        }

        let port = parse_port(fields[LOOKUP_DSTPORT], source_name, line_no)?;
        let key = PortProtocolKey::new(port, fields[LOOKUP_PROTOCOL].trim());
        let tag = fields[LOOKUP_TAG].trim().to_string();
        if let Some(previous) = index.tags.insert(key, tag) {
            debug!(line = line_no, previous = %previous, "Lookup key redefined; keeping later tag");
        }
    }

    Ok(index)
}

pub fn load_lookup_table(path: &Path) -> Result<LookupIndex> {
    let file = File::open(path).map_err(|e| FlowTagError::io(path, e))?;
    let index = build_index(BufReader::new(file), &path.display().to_string())?;
    info!(
        path = ?path,
        entries = index.len(),
        skipped = index.skipped_rows(),
        "Loaded lookup table"
    );
    Ok(index)
}
