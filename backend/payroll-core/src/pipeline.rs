// src/pipeline.rs
use tracing::info;

use crate::config::PayrollRates;
use crate::error::PayrollError;
use crate::normalize::{normalize, NormalizeOutcome};
use crate::payroll::{calculate_all, PayrollEntry};
use crate::reconcile::{reconcile, Reconciliation};
use crate::report::{summarize, PayrollSummary};
use crate::roster::{baseline_entries, join_roster_attendance};
use crate::schema::{validate_columns, ATTENDANCE_COLUMNS, BASELINE_COLUMNS, ROSTER_COLUMNS};
use crate::table::Table;

/// The three loaded input tables.
#[derive(Debug, Clone)]
pub struct PayrollInputs {
    pub roster: Table,
    pub attendance: Table,
    pub baseline: Table,
}

#[derive(Debug, Clone)]
pub struct PayrollRun {
    pub entries: Vec<PayrollEntry>,
    pub reconciliation: Reconciliation,
    pub summary: PayrollSummary,
    pub dropped: usize,
    pub clamped: usize,
    pub repaired_cells: usize,
}

/// Runs validation, join, normalization, calculation, reconciliation and
/// summary over in-memory tables. Nothing is written. Schema and join errors
/// stop the run before a single row has been processed; an amount outside
/// the Decimal range stops it before any result is returned.
pub fn run_payroll(inputs: &PayrollInputs, rates: &PayrollRates) -> Result<PayrollRun, PayrollError> {
    validate_columns(&inputs.roster, &ROSTER_COLUMNS, &inputs.roster.label)?;
    validate_columns(&inputs.attendance, &ATTENDANCE_COLUMNS, &inputs.attendance.label)?;
    validate_columns(&inputs.baseline, &BASELINE_COLUMNS, &inputs.baseline.label)?;

    let joined = join_roster_attendance(&inputs.roster, &inputs.attendance)?;
    let baseline = baseline_entries(&inputs.baseline)?;

    let NormalizeOutcome {
        records,
        dropped,
        clamped,
        repaired_cells,
    } = normalize(joined);

    let entries = calculate_all(rates, records)?;
    info!("Calculated payroll for {} employees", entries.len());

    let reconciliation = reconcile(&entries, &baseline)?;
    let summary = summarize(&entries, &reconciliation)?;

    Ok(PayrollRun {
        entries,
        reconciliation,
        summary,
        dropped,
        clamped,
        repaired_cells,
    })
}
