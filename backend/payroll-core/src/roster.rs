// src/roster.rs
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::error::PayrollError;
use crate::normalize::parse_numeric;
use crate::schema::{
    BASE_SALARY, DEPARTMENT, EMPLOYEE_ID, EMPLOYEE_NAME, NET_SALARY, OVERTIME_HOURS, PRESENT_DAYS,
    WORKING_DAYS,
};
use crate::table::{cell, Table};

/// One roster row joined with one attendance row, numeric cells still raw.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEmployeeRow {
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub base_salary: String,
    pub working_days: String,
    pub present_days: String,
    pub overtime_hours: String,
}

/// A prior payroll record. `net_salary` is `None` when the cell is blank or
/// not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineEntry {
    pub employee_id: String,
    pub net_salary: Option<Decimal>,
}

// Schema validation normally guarantees the column; without it there is
// nothing to join on.
fn join_column(table: &Table, name: &str) -> Result<usize, PayrollError> {
    table.column_index(name).ok_or_else(|| {
        error!("Cannot join {}: column '{}' is not present", table.label, name);
        PayrollError::MergeFailure {
            table: table.label.clone(),
            reason: format!("column '{}' is not present", name),
        }
    })
}

// A blank key matches nothing; the row is left out of the join.
fn join_key<'a>(table: &Table, row: &'a [String], column: usize, index: usize) -> Option<&'a str> {
    let key = cell(row, column);
    if key.is_empty() {
        warn!(
            "{} row {} has an empty '{}' and was skipped",
            table.label,
            index + 1,
            EMPLOYEE_ID
        );
        return None;
    }
    Some(key)
}

/// Inner-joins the roster with attendance on `employee_id`.
///
/// Output follows roster order; an employee with several attendance rows
/// yields one row per match, in attendance order. Roster rows without
/// attendance are left out.
pub fn join_roster_attendance(
    roster: &Table,
    attendance: &Table,
) -> Result<Vec<RawEmployeeRow>, PayrollError> {
    let r_id = join_column(roster, EMPLOYEE_ID)?;
    let r_name = join_column(roster, EMPLOYEE_NAME)?;
    let r_dept = join_column(roster, DEPARTMENT)?;
    let r_base = join_column(roster, BASE_SALARY)?;

    let a_id = join_column(attendance, EMPLOYEE_ID)?;
    let a_working = join_column(attendance, WORKING_DAYS)?;
    let a_present = join_column(attendance, PRESENT_DAYS)?;
    let a_overtime = join_column(attendance, OVERTIME_HOURS)?;

    let mut attendance_by_id: HashMap<&str, Vec<&[String]>> = HashMap::new();
    for (index, row) in attendance.rows.iter().enumerate() {
        let Some(key) = join_key(attendance, row, a_id, index) else {
            continue;
        };
        attendance_by_id.entry(key).or_default().push(row);
    }

    let mut joined = Vec::new();
    let mut unmatched = 0;
    for (index, row) in roster.rows.iter().enumerate() {
        let Some(key) = join_key(roster, row, r_id, index) else {
            continue;
        };
        let Some(matches) = attendance_by_id.get(key) else {
            unmatched += 1;
            continue;
        };
        for att in matches {
            joined.push(RawEmployeeRow {
                employee_id: key.to_string(),
                employee_name: cell(row, r_name).to_string(),
                department: cell(row, r_dept).to_string(),
                base_salary: cell(row, r_base).to_string(),
                working_days: cell(att, a_working).to_string(),
                present_days: cell(att, a_present).to_string(),
                overtime_hours: cell(att, a_overtime).to_string(),
            });
        }
    }

    if unmatched > 0 {
        info!("{} roster employees have no attendance record and were skipped", unmatched);
    }
    info!("Loaded data successfully ({} employees)", joined.len());
    Ok(joined)
}

/// Extracts `(employee_id, net_salary)` pairs from the prior payroll table.
/// Rows with an empty key are skipped, so they never match a new record.
pub fn baseline_entries(baseline: &Table) -> Result<Vec<BaselineEntry>, PayrollError> {
    let b_id = join_column(baseline, EMPLOYEE_ID)?;
    let b_net = join_column(baseline, NET_SALARY)?;

    let entries = baseline
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let employee_id = join_key(baseline, row, b_id, index)?.to_string();
            let raw = cell(row, b_net);
            let net_salary = parse_numeric(raw);
            if net_salary.is_none() {
                warn!(
                    "Prior net_salary '{}' for employee {} is not numeric; treated as absent",
                    raw, employee_id
                );
            }
            Some(BaselineEntry {
                employee_id,
                net_salary,
            })
        })
        .collect();
    Ok(entries)
}
