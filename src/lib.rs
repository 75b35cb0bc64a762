pub mod error;
pub mod flow;
pub mod logging;
pub mod lookup;
pub mod parser;
pub mod record;
pub mod report;

pub use error::{FlowTagError, Result};
pub use flow::{PortProtocolCounts, PortProtocolKey, TagCounts, UNTAGGED};
pub use lookup::{LookupIndex, build_index, load_lookup_table};
pub use parser::{Aggregation, FlowStats, aggregate, aggregate_flow_log};
pub use report::{ReportOrder, write_report, write_report_file};
