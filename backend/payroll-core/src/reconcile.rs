// src/reconcile.rs
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::error::PayrollError;
use crate::payroll::PayrollEntry;
use crate::roster::BaselineEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationRecord {
    pub employee_id: String,
    pub net_salary_new: Decimal,
    pub net_salary_old: Option<Decimal>,
    pub difference: Option<Decimal>,
}

impl ReconciliationRecord {
    // No prior value means nothing to compare against, so not a change
    pub fn is_changed(&self) -> bool {
        matches!(self.difference, Some(d) if !d.is_zero())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub records: Vec<ReconciliationRecord>,
    pub changed: usize,
}

/// Left-joins the new (rounded) net salaries with the prior payroll.
///
/// Every new entry is kept. A prior employee id listed more than once gives
/// one record per prior row.
pub fn reconcile(
    entries: &[PayrollEntry],
    baseline: &[BaselineEntry],
) -> Result<Reconciliation, PayrollError> {
    let mut prior_by_id: HashMap<&str, Vec<Option<Decimal>>> = HashMap::new();
    for entry in baseline {
        prior_by_id
            .entry(entry.employee_id.as_str())
            .or_default()
            .push(entry.net_salary);
    }

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let employee_id = entry.employee.employee_id.as_str();
        let net_salary_new = entry.net_salary_rounded();
        match prior_by_id.get(employee_id) {
            Some(priors) => {
                for old in priors {
                    let difference = match old {
                        Some(o) => Some(net_salary_new.checked_sub(*o).ok_or_else(|| {
                            PayrollError::overflow(format!("employee {}", employee_id), "difference")
                        })?),
                        None => None,
                    };
                    records.push(ReconciliationRecord {
                        employee_id: employee_id.to_string(),
                        net_salary_new,
                        net_salary_old: *old,
                        difference,
                    });
                }
            }
            None => records.push(ReconciliationRecord {
                employee_id: employee_id.to_string(),
                net_salary_new,
                net_salary_old: None,
                difference: None,
            }),
        }
    }

    let changed = records.iter().filter(|r| r.is_changed()).count();
    info!("Payroll validation completed");
    info!("Changed salary records: {}", changed);

    Ok(Reconciliation { records, changed })
}
