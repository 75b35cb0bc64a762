use crate::error::{FlowTagError, Result};
use crate::flow::{Counter, PortProtocolCounts, TagCounts};
use std::hash::Hash;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;


pub const TAG_SECTION_HEADER: &str = "Tag Counts:";
pub const PORT_PROTOCOL_SECTION_HEADER: &str =
    "Count of matches for each port/protocol combination:";

/// Row order for both report sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportOrder {
    /// Tags alphabetically, port/protocol rows by port then protocol.
    #[default]
    Sorted,
    /// Order in which each tag or pair first appeared in the flow log.
    FirstSeen,
}

pub fn write_report<W: Write>(
    tag_counts: &TagCounts,
    port_protocol_counts: &PortProtocolCounts,
    order: ReportOrder,
    writer: W,
) -> Result<()> {
    write_sections(tag_counts, port_protocol_counts, order, writer).map_err(FlowTagError::Write)
}

fn write_sections<W: Write>(
    tag_counts: &TagCounts,
    port_protocol_counts: &PortProtocolCounts,
    order: ReportOrder,
    mut writer: W,
) -> io::Result<()> {
    writeln!(writer, "{TAG_SECTION_HEADER}")?;
    writeln!(writer, "{:<15} {:<6}", "Tag", "Count")?;
    for (tag, count) in rows(tag_counts, order) {
        writeln!(writer, "{:<15} {:<6}", tag, count)?;
    }

    writeln!(writer)?;
    writeln!(writer, "{PORT_PROTOCOL_SECTION_HEADER}")?;
    writeln!(writer, "{:<8} {:<8} {:<6}", "Port", "Protocol", "Count")?;
    for (key, count) in rows(port_protocol_counts, order) {
        writeln!(writer, "{:<8} {:<8} {:<6}", key.port(), key.protocol(), count)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_report_file(
    tag_counts: &TagCounts,
    port_protocol_counts: &PortProtocolCounts,
    order: ReportOrder,
    path: &Path,
) -> Result<()> {
    let file = File::create(path).map_err(|e| FlowTagError::io(path, e))?;
    write_report(tag_counts, port_protocol_counts, order, BufWriter::new(file))
        .map_err(|e| match e {
            FlowTagError::Write(source) => FlowTagError::io(path, source),
            other => other,
        })?;
    info!(
        path = ?path,
        tags = tag_counts.len(),
        port_protocols = port_protocol_counts.len(),
        "Wrote report"
    );
    Ok(())
}

fn rows<K>(counts: &Counter<K>, order: ReportOrder) -> Vec<(&K, u64)>
where
    K: Clone + Eq + Hash + Ord,
{
    match order {
        ReportOrder::Sorted => counts.sorted(),
        ReportOrder::FirstSeen => counts.iter().collect(),
    }
}
