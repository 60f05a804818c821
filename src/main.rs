//! tardy - command-line front end.
//!
//! ```bash
//! # Exact solution
//! tardy instances/mixed.txt
//!
//! # Stage dumps and the DP table
//! tardy -d instances/mixed.txt
//!
//! # FPTAS with factor 4, JSON report
//! tardy --fptas 4 --json instances/mixed.txt
//!
//! # Write a random 30-job instance
//! tardy --generate 30 --seed 7 > random.txt
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tardy::generate::InstanceGenerator;
use tardy::loader::{format_instance, InstanceLoader};
use tardy::{ScheduleReport, SolverConfig, WeightedOnTimeScheduler};

#[derive(Parser, Debug)]
#[command(name = "tardy", version, about = "Maximize the weight of on-time jobs on one machine")]
struct Args {
    /// Instance file: job count followed by `p w d` triples.
    instance: Option<PathBuf>,

    /// Print the job list, WI and the DP table.
    #[arg(short, long)]
    debug: bool,

    /// FPTAS factor k; weights are divided by k before solving.
    #[arg(short = 'k', long)]
    fptas: Option<f64>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Maximum number of DP table cells.
    #[arg(long, default_value_t = SolverConfig::DEFAULT_MAX_TABLE_CELLS)]
    max_cells: usize,

    /// Write a random instance with this many jobs instead of solving.
    #[arg(long, value_name = "JOBS")]
    generate: Option<usize>,

    /// Seed for --generate.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_report(report: &ScheduleReport, args: &Args) -> Result<()> {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("failed to serialize report")?
        );
        return Ok(());
    }

    if args.debug {
        println!("On-time bound: {}", report.on_time_bound);
        println!("WI: {}", report.weight_budget);
        if let Some(table) = &report.table {
            print!("{}", table);
        }
    }
    if let Some(epsilon) = report.epsilon {
        println!("ε = {:.3}", epsilon);
    }
    println!("----- Solution:");
    print!("{}", report.solution);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    if let Some(n) = args.generate {
        let jobs = InstanceGenerator::new(n).generate(args.seed);
        let text = format_instance(&jobs);
        match &args.instance {
            Some(path) => std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => print!("{}", text),
        }
        return Ok(());
    }

    let Some(path) = &args.instance else {
        bail!("missing instance file argument");
    };

    let jobs = InstanceLoader::new()
        .from_path(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut config = SolverConfig::new()
        .verbose(args.debug)
        .max_table_cells(args.max_cells);
    if let Some(k) = args.fptas {
        config = config.fptas(k);
    }

    let report = WeightedOnTimeScheduler::new(config)
        .solve(&jobs)
        .with_context(|| format!("failed to schedule {}", path.display()))?;

    print_report(&report, &args)
}
