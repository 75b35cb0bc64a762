use anyhow::{Context, Result};
use clap::Parser;
use flowtag::{ReportOrder, aggregate_flow_log, load_lookup_table, logging, write_report_file};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "flowtag")]
#[command(about = "Tag flow log records by destination port and protocol")]
struct Cli {
    #[arg(long, default_value = "look_up.csv", help = "Lookup table (dstport,protocol,tag)")]
    lookup: PathBuf,

    #[arg(long, default_value = "flow_log.csv", help = "Flow log to tag")]
    flow_log: PathBuf,

    #[arg(short, long, default_value = "output.txt", help = "Report destination")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = ReportOrder::Sorted, help = "Row order in the report")]
    order: ReportOrder,

    #[arg(long, default_value = "flowtag.log", help = "Log file path")]
    log_file: PathBuf,

    #[arg(long, help = "Log to the console instead of the log file")]
    log_stdout: bool,

    #[arg(long, default_value_t = LevelFilter::INFO, help = "Default log level")]
    log_level: LevelFilter,
}

fn main() {
    let cli = Cli::parse();

    let target = logging::LogTarget::from_flags(cli.log_stdout, &cli.log_file);
    let _guard = match logging::init_logging(&target, cli.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:?}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        error!(error = ?e, "Run failed");
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    println!("Loading the Lookup table");
    let index = load_lookup_table(&cli.lookup)
        .with_context(|| format!("Failed to load lookup table {:?}", cli.lookup))?;

    println!("Reading the flow log entries");
    let aggregation = aggregate_flow_log(&cli.flow_log, &index)
        .with_context(|| format!("Failed to read flow log {:?}", cli.flow_log))?;

    println!("Generating output");
    write_report_file(
        &aggregation.tag_counts,
        &aggregation.port_protocol_counts,
        cli.order,
        &cli.output,
    )
    .with_context(|| format!("Failed to write report {:?}", cli.output))?;

    info!(output = ?cli.output, "Done");
    Ok(())
}
