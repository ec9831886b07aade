// src/schema.rs
use tracing::error;

use crate::error::PayrollError;
use crate::table::Table;

// --- Required Columns ---

pub const EMPLOYEE_ID: &str = "employee_id";
pub const EMPLOYEE_NAME: &str = "employee_name";
pub const DEPARTMENT: &str = "department";
pub const BASE_SALARY: &str = "base_salary";
pub const WORKING_DAYS: &str = "working_days";
pub const PRESENT_DAYS: &str = "present_days";
pub const OVERTIME_HOURS: &str = "overtime_hours";
pub const NET_SALARY: &str = "net_salary";

pub const ROSTER_COLUMNS: [&str; 4] = [EMPLOYEE_ID, EMPLOYEE_NAME, DEPARTMENT, BASE_SALARY];
pub const ATTENDANCE_COLUMNS: [&str; 4] = [EMPLOYEE_ID, WORKING_DAYS, PRESENT_DAYS, OVERTIME_HOURS];
pub const BASELINE_COLUMNS: [&str; 2] = [EMPLOYEE_ID, NET_SALARY];

/// Checks that every required column is present, reporting the first one
/// (in `required` order) that is not.
pub fn validate_columns(table: &Table, required: &[&str], label: &str) -> Result<(), PayrollError> {
    match required.iter().find(|col| !table.has_column(col)) {
        Some(missing) => {
            error!("Column '{}' missing in {}", missing, label);
            Err(PayrollError::SchemaViolation {
                field: missing.to_string(),
                table: label.to_string(),
            })
        }
        None => Ok(()),
    }
}
