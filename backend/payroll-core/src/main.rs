// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod normalize;
mod payroll;
mod pipeline;
mod reconcile;
mod report;
mod roster;
mod schema;
mod table;

#[cfg(test)]
mod payroll_tests;

use config::{
    PayrollRates, DEFAULT_ATTENDANCE_FILE, DEFAULT_EMPLOYEES_FILE, DEFAULT_OLD_PAYROLL_FILE,
    DEFAULT_OUTPUT_FILE,
};
use error::PayrollError;
use pipeline::{PayrollInputs, PayrollRun};

#[derive(Parser, Debug)]
#[command(name = "payroll-core")]
#[command(about = "Computes a payroll report from roster, attendance and prior payroll CSV files")]
#[command(version)]
struct Cli {
    /// Employee roster CSV (employee_id, employee_name, department, base_salary)
    #[arg(long, env = "PAYROLL_EMPLOYEES_FILE", default_value = DEFAULT_EMPLOYEES_FILE)]
    employees: PathBuf,
    /// Attendance CSV (employee_id, working_days, present_days, overtime_hours)
    #[arg(long, env = "PAYROLL_ATTENDANCE_FILE", default_value = DEFAULT_ATTENDANCE_FILE)]
    attendance: PathBuf,
    /// Prior payroll CSV (employee_id, net_salary)
    #[arg(long, env = "PAYROLL_OLD_PAYROLL_FILE", default_value = DEFAULT_OLD_PAYROLL_FILE)]
    old_payroll: PathBuf,
    /// Where the generated payroll report is written
    #[arg(long, env = "PAYROLL_OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
    /// Also write the old-vs-new net salary comparison to this CSV
    #[arg(long, env = "PAYROLL_CHANGES_FILE")]
    changes_output: Option<PathBuf>,
    /// Also write the summary figures as JSON
    #[arg(long, env = "PAYROLL_SUMMARY_JSON")]
    summary_json: Option<PathBuf>,
    /// Log per-employee details
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_inputs(cli: &Cli) -> Result<PayrollInputs, PayrollError> {
    Ok(PayrollInputs {
        roster: table::load_csv(&cli.employees)?,
        attendance: table::load_csv(&cli.attendance)?,
        baseline: table::load_csv(&cli.old_payroll)?,
    })
}

// The summary is already on stdout by the time this runs. Every requested
// file is attempted; each writer logs its own failure and the first one is
// returned.
fn write_outputs(cli: &Cli, run: &PayrollRun) -> Result<(), PayrollError> {
    let mut results = vec![report::write_payroll_report(&cli.output, &run.entries)];
    if let Some(path) = &cli.changes_output {
        results.push(report::write_reconciliation_report(path, &run.reconciliation));
    }
    if let Some(path) = &cli.summary_json {
        results.push(report::write_summary_json(path, &run.summary));
    }
    results.into_iter().collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rates = PayrollRates::from_env()
        .map_err(PayrollError::from)
        .context("Loading payroll rates failed")?;

    let inputs = load_inputs(&cli).context("Loading input files failed")?;
    let run = pipeline::run_payroll(&inputs, &rates).context("Payroll run aborted")?;
    info!(
        "Processed {} employees ({} dropped for working_days <= 0, {} attendance clamped, {} cells coerced to 0)",
        run.entries.len(),
        run.dropped,
        run.clamped,
        run.repaired_cells
    );

    print!("{}", report::render_summary(&run.summary));

    if let Err(e) = write_outputs(&cli, &run) {
        error!("Payroll output was not saved: {}", e);
        return Err(e).context("Writing payroll output failed");
    }

    info!("Payroll Processing Completed Successfully");
    Ok(())
}
