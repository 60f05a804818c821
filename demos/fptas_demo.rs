//! Compares the exact solver with FPTAS runs on a random instance.

use tardy::generate::InstanceGenerator;
use tardy::{SolverConfig, WeightedOnTimeScheduler};

fn main() {
    let jobs = InstanceGenerator::new(40)
        .max_processing_time(8)
        .max_weight(5_000)
        .tightness(0.5)
        .generate(42);

    println!("Jobs: {}", jobs.len());
    println!("Total weight: {}", jobs.total_weight());
    println!();
    println!("{:>8} {:>10} {:>12} {:>12} {:>8}", "k", "WI", "reported", "true", "on-time");

    for k in [1.0, 2.0, 10.0, 50.0, 250.0] {
        let scheduler = WeightedOnTimeScheduler::new(SolverConfig::new().fptas(k));
        match scheduler.solve(&jobs) {
            Ok(report) => println!(
                "{:>8} {:>10} {:>12.0} {:>12} {:>8}",
                k,
                report.weight_budget,
                report.solution.reported_profit(),
                report.solution.true_profit(),
                report.solution.len()
            ),
            Err(e) => println!("{:>8} error: {}", k, e),
        }
    }
}
