// src/report.rs
use rust_decimal::Decimal;
use serde::Serialize;
use std::{fs::File, io, path::Path};
use tracing::{error, info};

use crate::error::PayrollError;
use crate::payroll::{PayrollEntry, REPORT_DP};
use crate::reconcile::Reconciliation;

// --- Summary ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollSummary {
    pub total_employees: usize,
    pub total_gross_salary: Decimal,
    pub total_net_salary: Decimal,
    pub total_tax: Decimal,
    pub total_pf: Decimal,
    // None when no employee survived normalization
    pub highest_net_salary: Option<Decimal>,
    pub lowest_net_salary: Option<Decimal>,
    pub average_net_salary: Option<Decimal>,
    pub changed_records: usize,
}

// Sums one column across all entries, failing instead of wrapping past the
// Decimal range.
fn checked_total(mut values: impl Iterator<Item = Decimal>, column: &str) -> Result<Decimal, PayrollError> {
    values
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
        .ok_or_else(|| {
            error!("Payroll total {} is out of range", column);
            PayrollError::overflow("payroll totals", column)
        })
}

/// Aggregates the processed entries.
///
/// Gross and net totals add up the already rounded per-employee figures;
/// tax and PF totals add full precision values and round once.
pub fn summarize(
    entries: &[PayrollEntry],
    reconciliation: &Reconciliation,
) -> Result<PayrollSummary, PayrollError> {
    let nets: Vec<Decimal> = entries.iter().map(PayrollEntry::net_salary_rounded).collect();
    let total_net = checked_total(nets.iter().copied(), "total_net_salary")?;
    let total_gross = checked_total(
        entries.iter().map(PayrollEntry::gross_salary_rounded),
        "total_gross_salary",
    )?;
    let total_tax = checked_total(entries.iter().map(|e| e.salary.tax), "total_tax")?;
    let total_pf = checked_total(entries.iter().map(|e| e.salary.pf), "total_pf")?;

    // Dividing by a count of at least one cannot leave the range
    let average = if nets.is_empty() {
        None
    } else {
        Some((total_net / Decimal::from(nets.len())).round_dp(REPORT_DP))
    };

    Ok(PayrollSummary {
        total_employees: entries.len(),
        total_gross_salary: total_gross.round_dp(REPORT_DP),
        total_net_salary: total_net.round_dp(REPORT_DP),
        total_tax: total_tax.round_dp(REPORT_DP),
        total_pf: total_pf.round_dp(REPORT_DP),
        highest_net_salary: nets.iter().max().copied(),
        lowest_net_salary: nets.iter().min().copied(),
        average_net_salary: average,
        changed_records: reconciliation.changed,
    })
}

pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(REPORT_DP))
}

fn format_optional(value: Option<Decimal>) -> String {
    value.map(format_amount).unwrap_or_else(|| "n/a".to_string())
}

/// Renders the console summary block.
pub fn render_summary(summary: &PayrollSummary) -> String {
    format!(
        "\nPayroll Summary Report:\n\
         Total Employees Processed : {}\n\
         Total Gross Salary        : {}\n\
         Total Net Salary          : {}\n\
         Total Tax Collected       : {}\n\
         Total PF Collected        : {}\n\
         Highest Salary            : {}\n\
         Lowest Salary             : {}\n\
         Average Salary            : {}\n",
        summary.total_employees,
        format_amount(summary.total_gross_salary),
        format_amount(summary.total_net_salary),
        format_amount(summary.total_tax),
        format_amount(summary.total_pf),
        format_optional(summary.highest_net_salary),
        format_optional(summary.lowest_net_salary),
        format_optional(summary.average_net_salary),
    )
}

// --- Output Files ---

#[derive(Serialize)]
struct ReportRow<'a> {
    employee_id: &'a str,
    employee_name: &'a str,
    department: &'a str,
    gross_salary: String,
    total_deductions: String,
    net_salary: String,
}

#[derive(Serialize)]
struct ChangeRow<'a> {
    employee_id: &'a str,
    net_salary_new: String,
    net_salary_old: String,
    difference: String,
}

/// Writes the per-employee payroll report as CSV.
pub fn write_payroll_csv<W: io::Write>(writer: W, entries: &[PayrollEntry]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    if entries.is_empty() {
        // serde only emits headers alongside the first record
        wtr.write_record([
            "employee_id",
            "employee_name",
            "department",
            "gross_salary",
            "total_deductions",
            "net_salary",
        ])?;
    }
    for entry in entries {
        wtr.serialize(ReportRow {
            employee_id: &entry.employee.employee_id,
            employee_name: &entry.employee.employee_name,
            department: &entry.employee.department,
            gross_salary: format_amount(entry.gross_salary_rounded()),
            total_deductions: format_amount(entry.total_deductions_rounded()),
            net_salary: format_amount(entry.net_salary_rounded()),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes every reconciliation record; null values are left blank.
pub fn write_reconciliation_csv<W: io::Write>(
    writer: W,
    reconciliation: &Reconciliation,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    if reconciliation.records.is_empty() {
        wtr.write_record(["employee_id", "net_salary_new", "net_salary_old", "difference"])?;
    }
    for record in &reconciliation.records {
        wtr.serialize(ChangeRow {
            employee_id: &record.employee_id,
            net_salary_new: format_amount(record.net_salary_new),
            net_salary_old: record.net_salary_old.map(format_amount).unwrap_or_default(),
            difference: record.difference.map(format_amount).unwrap_or_default(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn create_output(path: &Path) -> Result<File, PayrollError> {
    File::create(path).map_err(|e| {
        error!("Error saving {}: {}", path.display(), e);
        PayrollError::write_failure(path, e)
    })
}

pub fn write_payroll_report(path: &Path, entries: &[PayrollEntry]) -> Result<(), PayrollError> {
    let file = create_output(path)?;
    write_payroll_csv(file, entries).map_err(|e| {
        error!("Error saving payroll file {}: {}", path.display(), e);
        PayrollError::write_failure(path, e)
    })?;
    info!("Final payroll report saved as '{}'", path.display());
    Ok(())
}

pub fn write_reconciliation_report(
    path: &Path,
    reconciliation: &Reconciliation,
) -> Result<(), PayrollError> {
    let file = create_output(path)?;
    write_reconciliation_csv(file, reconciliation).map_err(|e| {
        error!("Error saving reconciliation file {}: {}", path.display(), e);
        PayrollError::write_failure(path, e)
    })?;
    info!("Reconciliation report saved as '{}'", path.display());
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &PayrollSummary) -> Result<(), PayrollError> {
    let file = create_output(path)?;
    serde_json::to_writer_pretty(file, summary).map_err(|e| {
        error!("Error saving summary file {}: {}", path.display(), e);
        PayrollError::write_failure(path, e)
    })?;
    info!("Payroll summary saved as '{}'", path.display());
    Ok(())
}
