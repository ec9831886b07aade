// src/payroll.rs
use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::config::PayrollRates;
use crate::error::PayrollError;
use crate::normalize::EmployeeRecord;

/// Decimal places used for every reported amount.
pub const REPORT_DP: u32 = 2;

/// Salary components for one employee, computed once and then read only.
/// Values are full precision; use the `*_rounded` accessors on
/// [`PayrollEntry`] for reported figures.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryBreakdown {
    pub salary_per_day: Decimal,
    pub attendance_salary: Decimal,
    pub overtime_salary: Decimal,
    pub bonus: Decimal,
    pub gross_salary: Decimal,
    pub tax: Decimal,
    pub pf: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayrollEntry {
    pub employee: EmployeeRecord,
    pub salary: SalaryBreakdown,
}

impl PayrollEntry {
    pub fn gross_salary_rounded(&self) -> Decimal {
        self.salary.gross_salary.round_dp(REPORT_DP)
    }

    pub fn total_deductions_rounded(&self) -> Decimal {
        self.salary.total_deductions.round_dp(REPORT_DP)
    }

    pub fn net_salary_rounded(&self) -> Decimal {
        self.salary.net_salary.round_dp(REPORT_DP)
    }
}

impl PayrollRates {
    // Step bonus, not pro-rated against working days
    pub fn bonus_for(&self, present_days: Decimal) -> Decimal {
        if present_days > self.bonus_min_present_days {
            self.bonus_amount
        } else {
            Decimal::ZERO
        }
    }

    // Single-rate slab: crossing the threshold re-rates the whole gross.
    // None when the product does not fit in a Decimal.
    pub fn tax_for(&self, gross_salary: Decimal) -> Option<Decimal> {
        if gross_salary > self.tax_slab_threshold {
            gross_salary.checked_mul(self.high_tax_rate)
        } else {
            gross_salary.checked_mul(self.base_tax_rate)
        }
    }

    pub fn pf_for(&self, gross_salary: Decimal) -> Option<Decimal> {
        gross_salary.checked_mul(self.pf_rate)
    }
}

/// Computes the salary breakdown for one normalized employee.
///
/// `working_days` must be positive, which [`crate::normalize::normalize`]
/// guarantees for every record it returns. Any component that leaves the
/// Decimal range is an `AmountOverflow` naming the employee and the column.
pub fn calculate(rates: &PayrollRates, employee: &EmployeeRecord) -> Result<SalaryBreakdown, PayrollError> {
    let out_of_range = |column: &str| {
        error!("Employee {}: {} is out of range", employee.employee_id, column);
        PayrollError::overflow(format!("employee {}", employee.employee_id), column)
    };

    let salary_per_day = employee
        .base_salary
        .checked_div(employee.working_days)
        .ok_or_else(|| out_of_range("salary_per_day"))?;
    let attendance_salary = salary_per_day
        .checked_mul(employee.present_days)
        .ok_or_else(|| out_of_range("attendance_salary"))?;
    let overtime_salary = employee
        .overtime_hours
        .checked_mul(rates.overtime_rate)
        .ok_or_else(|| out_of_range("overtime_salary"))?;
    let bonus = rates.bonus_for(employee.present_days);

    let gross_salary = attendance_salary
        .checked_add(overtime_salary)
        .and_then(|g| g.checked_add(bonus))
        .ok_or_else(|| out_of_range("gross_salary"))?;
    let tax = rates.tax_for(gross_salary).ok_or_else(|| out_of_range("tax"))?;
    let pf = rates.pf_for(gross_salary).ok_or_else(|| out_of_range("pf"))?;
    let total_deductions = tax
        .checked_add(pf)
        .ok_or_else(|| out_of_range("total_deductions"))?;
    let net_salary = gross_salary
        .checked_sub(total_deductions)
        .ok_or_else(|| out_of_range("net_salary"))?;

    Ok(SalaryBreakdown {
        salary_per_day,
        attendance_salary,
        overtime_salary,
        bonus,
        gross_salary,
        tax,
        pf,
        total_deductions,
        net_salary,
    })
}

pub fn calculate_all(
    rates: &PayrollRates,
    records: Vec<EmployeeRecord>,
) -> Result<Vec<PayrollEntry>, PayrollError> {
    records
        .into_iter()
        .map(|employee| {
            let salary = calculate(rates, &employee)?;
            debug!(
                "Employee {}: per_day={} attendance={} overtime={} bonus={} gross={} tax={} pf={} net={}",
                employee.employee_id,
                salary.salary_per_day.round_dp(REPORT_DP),
                salary.attendance_salary.round_dp(REPORT_DP),
                salary.overtime_salary,
                salary.bonus,
                salary.gross_salary.round_dp(REPORT_DP),
                salary.tax.round_dp(REPORT_DP),
                salary.pf.round_dp(REPORT_DP),
                salary.net_salary.round_dp(REPORT_DP)
            );
            Ok(PayrollEntry { employee, salary })
        })
        .collect()
}
