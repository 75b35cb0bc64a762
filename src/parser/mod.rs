pub mod reader;
pub mod state;


pub use reader::{aggregate, aggregate_flow_log};
pub use state::{Aggregation, FlowStats};
