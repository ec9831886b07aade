// src/payroll_tests.rs

#[cfg(test)]
mod tests {
    use crate::config::PayrollRates;
    use crate::error::PayrollError;
    use crate::normalize::EmployeeRecord;
    use crate::payroll::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // Helper function to create a normalized employee
    fn employee(base: Decimal, working: Decimal, present: Decimal, overtime: Decimal) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "E1".to_string(),
            employee_name: "Test Employee".to_string(),
            department: "Engineering".to_string(),
            base_salary: base,
            working_days: working,
            present_days: present,
            overtime_hours: overtime,
        }
    }

    // Picks a base salary so that gross lands exactly on `gross` with no bonus
    // and no overtime (present == working == 10).
    fn employee_with_gross(gross: Decimal) -> EmployeeRecord {
        employee(gross, dec!(10), dec!(10), dec!(0))
    }

    #[test]
    fn test_full_attendance_example() {
        let rates = PayrollRates::default();
        let salary = calculate(&rates, &employee(dec!(30000), dec!(25), dec!(25), dec!(5))).unwrap();

        assert_eq!(salary.salary_per_day, dec!(1200));
        assert_eq!(salary.attendance_salary, dec!(30000));
        assert_eq!(salary.overtime_salary, dec!(1000));
        assert_eq!(salary.bonus, dec!(1000), "25 present days earns the bonus");
        assert_eq!(salary.gross_salary, dec!(32000));
        assert_eq!(salary.tax, dec!(1600), "32000 is under the slab, 5%");
        assert_eq!(salary.pf, dec!(3200));
        assert_eq!(salary.total_deductions, dec!(4800));
        assert_eq!(salary.net_salary, dec!(27200));
    }

    #[test]
    fn test_high_slab_example() {
        let rates = PayrollRates::default();
        let salary = calculate(&rates, &employee_with_gross(dec!(70000))).unwrap();

        assert_eq!(salary.gross_salary, dec!(70000));
        assert_eq!(salary.tax, dec!(5600));
        assert_eq!(salary.pf, dec!(7000));
        assert_eq!(salary.total_deductions, dec!(12600));
        assert_eq!(salary.net_salary, dec!(57400));
    }

    #[test]
    fn test_tax_slab_boundary_is_exclusive() {
        let rates = PayrollRates::default();

        let at_threshold = calculate(&rates, &employee_with_gross(dec!(60000.00))).unwrap();
        assert_eq!(at_threshold.tax, dec!(3000), "60000.00 uses the base rate");

        let above = calculate(&rates, &employee_with_gross(dec!(60000.01))).unwrap();
        assert_eq!(above.tax, dec!(60000.01) * dec!(0.08), "60000.01 uses the high rate");
        assert_eq!(above.tax, dec!(4800.0008));
    }

    #[test]
    fn test_tax_slab_applies_to_whole_gross() {
        let rates = PayrollRates::default();
        let below = calculate(&rates, &employee_with_gross(dec!(60000))).unwrap();
        let above = calculate(&rates, &employee_with_gross(dec!(60001))).unwrap();

        // One more unit of gross re-rates the whole amount
        assert!(above.net_salary < below.net_salary);
        assert_eq!(above.tax - below.tax, dec!(1800.08));
    }

    #[test]
    fn test_bonus_boundary() {
        let rates = PayrollRates::default();
        assert_eq!(rates.bonus_for(dec!(20)), Decimal::ZERO);
        assert_eq!(rates.bonus_for(dec!(20.5)), dec!(1000));
        assert_eq!(rates.bonus_for(dec!(21)), dec!(1000));

        let twenty = calculate(&rates, &employee(dec!(22000), dec!(22), dec!(20), dec!(0))).unwrap();
        let twenty_one = calculate(&rates, &employee(dec!(22000), dec!(22), dec!(21), dec!(0))).unwrap();
        assert_eq!(twenty.bonus, Decimal::ZERO);
        assert_eq!(twenty_one.bonus, dec!(1000));
        assert_eq!(twenty_one.gross_salary, dec!(22000), "21000 attendance plus bonus");
    }

    #[test]
    fn test_bonus_uses_absolute_present_days() {
        // Low base salary, but the day count alone qualifies
        let rates = PayrollRates::default();
        let salary = calculate(&rates, &employee(dec!(5000), dec!(22), dec!(22), dec!(0))).unwrap();
        assert_eq!(salary.bonus, dec!(1000));
    }

    #[test]
    fn test_net_identity_holds_before_rounding() {
        let rates = PayrollRates::default();
        let cases = [
            employee(dec!(31000), dec!(7), dec!(6), dec!(3)),
            employee(dec!(45123.45), dec!(23), dec!(21), dec!(0.5)),
            employee(dec!(99999.99), dec!(30), dec!(29), dec!(12)),
            employee(dec!(0), dec!(1), dec!(0), dec!(0)),
        ];
        for emp in &cases {
            let s = calculate(&rates, emp).unwrap();
            assert_eq!(s.net_salary, s.gross_salary - (s.tax + s.pf));
            assert_eq!(s.total_deductions, s.tax + s.pf);
        }
    }

    #[test]
    fn test_pro_rated_attendance_rounds_for_reporting() {
        let rates = PayrollRates::default();
        let entries =
            calculate_all(&rates, vec![employee(dec!(30000), dec!(7), dec!(7), dec!(0))]).unwrap();
        let entry = &entries[0];

        // 30000 / 7 * 7 is a hair under 30000 in 28-digit decimal arithmetic
        assert_eq!(entry.gross_salary_rounded(), dec!(30000.00));
        assert_eq!(entry.total_deductions_rounded(), dec!(4500.00));
        assert_eq!(entry.net_salary_rounded(), dec!(25500.00));
    }

    #[test]
    fn test_custom_rates_are_used() {
        let rates = PayrollRates {
            overtime_rate: dec!(300),
            bonus_amount: dec!(500),
            pf_rate: dec!(0.12),
            ..PayrollRates::default()
        };
        let salary = calculate(&rates, &employee(dec!(20000), dec!(20), dec!(21), dec!(2))).unwrap();

        // present is not clamped here; the calculator trusts its input
        assert_eq!(salary.overtime_salary, dec!(600));
        assert_eq!(salary.bonus, dec!(500));
        assert_eq!(salary.gross_salary, dec!(21000) + dec!(600) + dec!(500));
        assert_eq!(salary.pf, dec!(22100) * dec!(0.12));
    }

    #[test]
    fn test_calculate_all_keeps_order() {
        let rates = PayrollRates::default();
        let mut first = employee(dec!(1000), dec!(10), dec!(10), dec!(0));
        first.employee_id = "B".to_string();
        let mut second = employee(dec!(2000), dec!(10), dec!(10), dec!(0));
        second.employee_id = "A".to_string();

        let entries = calculate_all(&rates, vec![first, second]).unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.employee.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    // 1e27 hours; times the overtime rate this leaves the Decimal range
    fn huge_overtime() -> Decimal {
        Decimal::from(10u64.pow(18)) * Decimal::from(10u64.pow(9))
    }

    fn overflow_column(result: Result<SalaryBreakdown, PayrollError>) -> String {
        match result {
            Err(PayrollError::AmountOverflow { subject, column }) => {
                assert_eq!(subject, "employee E1");
                column
            }
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_per_day_rate_out_of_range_is_an_error() {
        let rates = PayrollRates::default();
        let result = calculate(&rates, &employee(Decimal::MAX, dec!(0.5), dec!(0.5), dec!(0)));
        assert_eq!(overflow_column(result), "salary_per_day");
    }

    #[test]
    fn test_overtime_out_of_range_is_an_error() {
        let rates = PayrollRates::default();
        let result = calculate(&rates, &employee(dec!(30000), dec!(25), dec!(25), huge_overtime()));
        assert_eq!(overflow_column(result), "overtime_salary");
    }

    #[test]
    fn test_gross_out_of_range_is_an_error() {
        // Attendance alone fits; adding overtime does not
        let rates = PayrollRates::default();
        let result = calculate(&rates, &employee(Decimal::MAX, dec!(1), dec!(1), dec!(1)));
        assert_eq!(overflow_column(result), "gross_salary");
    }

    #[test]
    fn test_calculate_all_stops_at_first_out_of_range_employee() {
        let rates = PayrollRates::default();
        let records = vec![
            employee(dec!(30000), dec!(25), dec!(25), dec!(5)),
            employee(dec!(30000), dec!(25), dec!(25), huge_overtime()),
        ];
        assert!(matches!(
            calculate_all(&rates, records),
            Err(PayrollError::AmountOverflow { .. })
        ));
    }
}
