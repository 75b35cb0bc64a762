use flowtag::{
    FlowTagError, PortProtocolKey, ReportOrder, UNTAGGED, aggregate_flow_log, load_lookup_table,
    write_report_file,
};
use std::fs;
use std::path::PathBuf;

struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("flowtag_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create scratch dir");
        Self { dir }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(name);
        fs::write(&path, contents).expect("write scratch file");
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn tags_flow_log_and_writes_report() {
    let scratch = Scratch::new("pipeline");
    let lookup = scratch.file("look_up.csv", "dstport,protocol,tag\n25,tcp,sv_P1\n143,udp,sv_P2\n");
    let flow_log = scratch.file(
        "flow_log.csv",
        "a,b,c,dstport,protocol\n2,123,999,25,tcp\n2,123,999,9999,icmp\n",
    );
    let output = scratch.dir.join("output.txt");

    let index = load_lookup_table(&lookup).unwrap();
    let aggregation = aggregate_flow_log(&flow_log, &index).unwrap();

    assert_eq!(aggregation.tag_counts.get("sv_P1"), 1);
    assert_eq!(aggregation.tag_counts.get(UNTAGGED), 1);
    assert_eq!(aggregation.tag_counts.len(), 2);
    assert_eq!(aggregation.port_protocol_counts.get(&PortProtocolKey::new(25, "tcp")), 1);
    assert_eq!(aggregation.port_protocol_counts.get(&PortProtocolKey::new(9999, "icmp")), 1);
    assert_eq!(aggregation.port_protocol_counts.len(), 2);

    write_report_file(
        &aggregation.tag_counts,
        &aggregation.port_protocol_counts,
        ReportOrder::Sorted,
        &output,
    )
    .unwrap();

    let report = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Tag Counts:");
    assert_eq!(lines[2].trim_end(), "Untagged        1");
    assert_eq!(lines[3].trim_end(), "sv_P1           1");
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "Count of matches for each port/protocol combination:");
    assert_eq!(lines[7].trim_end(), "25       tcp      1");
    assert_eq!(lines[8].trim_end(), "9999     icmp     1");
}

#[test]
fn duplicate_lookup_key_keeps_last_tag() {
    let scratch = Scratch::new("duplicate");
    let lookup = scratch.file(
        "look_up.csv",
        "dstport,protocol,tag\n25,tcp,sv_P1\n143,udp,sv_P2\n25,tcp,sv_X\n",
    );
    let flow_log = scratch.file("flow_log.csv", "header\na,b,c,25,TCP\n");

    let index = load_lookup_table(&lookup).unwrap();
    let aggregation = aggregate_flow_log(&flow_log, &index).unwrap();

    assert_eq!(aggregation.tag_counts.get("sv_X"), 1);
    assert_eq!(aggregation.tag_counts.get("sv_P1"), 0);
}

#[test]
fn bad_port_in_flow_log_leaves_no_report() {
    let scratch = Scratch::new("bad_port");
    let lookup = scratch.file("look_up.csv", "dstport,protocol,tag\n25,tcp,sv_P1\n");
    let flow_log = scratch.file("flow_log.csv", "header\na,b,c,25,tcp\na,b,c,??,tcp\n");
    let output = scratch.dir.join("output.txt");

    let index = load_lookup_table(&lookup).unwrap();
    let result = aggregate_flow_log(&flow_log, &index);
    assert!(matches!(result, Err(FlowTagError::InvalidPort { .. })));
    assert!(!output.exists());
}
