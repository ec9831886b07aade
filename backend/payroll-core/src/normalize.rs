// src/normalize.rs
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::roster::RawEmployeeRow;

/// An employee row after numeric coercion, the working-day filter and the
/// attendance clamp. Invariants: `working_days > 0`,
/// `present_days <= working_days`, `overtime_hours >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub base_salary: Decimal,
    pub working_days: Decimal,
    pub present_days: Decimal,
    pub overtime_hours: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeOutcome {
    pub records: Vec<EmployeeRecord>,
    /// Rows removed because `working_days <= 0`
    pub dropped: usize,
    /// Rows whose `present_days` was lowered to `working_days`
    pub clamped: usize,
    /// Cells that could not be parsed and were replaced by zero
    pub repaired_cells: usize,
}

/// Parses a numeric cell. Accepts plain and scientific notation; blank or
/// non-numeric text gives `None`.
pub fn parse_numeric(raw: &str) -> Option<Decimal> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

// Lenient coercion: anything unparseable becomes zero.
fn coerce(raw: &str, column: &str, employee_id: &str, repaired: &mut usize) -> Decimal {
    match parse_numeric(raw) {
        Some(value) => value,
        None => {
            debug!(
                "Coerced non-numeric {} '{}' to 0 for employee {}",
                column, raw, employee_id
            );
            *repaired += 1;
            Decimal::ZERO
        }
    }
}

/// Coerces, filters and repairs joined rows, in that order.
pub fn normalize(rows: Vec<RawEmployeeRow>) -> NormalizeOutcome {
    let mut repaired_cells = 0;

    // 1) Coercion
    let coerced: Vec<EmployeeRecord> = rows
        .into_iter()
        .map(|row| {
            let id = row.employee_id.as_str();
            let base_salary = coerce(&row.base_salary, "base_salary", id, &mut repaired_cells);
            let working_days = coerce(&row.working_days, "working_days", id, &mut repaired_cells);
            let present_days = coerce(&row.present_days, "present_days", id, &mut repaired_cells);
            let overtime_hours =
                coerce(&row.overtime_hours, "overtime_hours", id, &mut repaired_cells)
                    .max(Decimal::ZERO);
            EmployeeRecord {
                employee_id: row.employee_id,
                employee_name: row.employee_name,
                department: row.department,
                base_salary,
                working_days,
                present_days,
                overtime_hours,
            }
        })
        .collect();

    // 2) Remove invalid working days
    let before = coerced.len();
    let mut records: Vec<EmployeeRecord> = coerced
        .into_iter()
        .filter(|r| r.working_days > Decimal::ZERO)
        .collect();
    let dropped = before - records.len();

    // 3) Adjust invalid attendance
    let mut clamped = 0;
    for record in records.iter_mut() {
        if record.present_days > record.working_days {
            debug!(
                "Clamped present_days {} to working_days {} for employee {}",
                record.present_days, record.working_days, record.employee_id
            );
            record.present_days = record.working_days;
            clamped += 1;
        }
    }

    debug!(
        "Normalized {} records ({} dropped for working_days <= 0, {} attendance clamped, {} cells coerced to 0)",
        records.len(),
        dropped,
        clamped,
        repaired_cells
    );

    NormalizeOutcome {
        records,
        dropped,
        clamped,
        repaired_cells,
    }
}
