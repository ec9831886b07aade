// src/config.rs
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

// --- Configuration & Constants ---

pub const DEFAULT_EMPLOYEES_FILE: &str = "zenvy_employees.csv";
pub const DEFAULT_ATTENDANCE_FILE: &str = "zenvy_attendance.csv";
pub const DEFAULT_OLD_PAYROLL_FILE: &str = "zenvy_payroll.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "generated_payroll_report.csv";

const RATES_ENV_PREFIX: &str = "PAYROLL_";

/// Rates and thresholds used by the payroll calculator.
///
/// Every field can be overridden with a `PAYROLL_`-prefixed environment
/// variable (e.g. `PAYROLL_PF_RATE=0.12`); unset fields keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRates {
    #[serde(default = "default_pf_rate")]
    pub pf_rate: Decimal,
    #[serde(default = "default_base_tax_rate")]
    pub base_tax_rate: Decimal,
    #[serde(default = "default_high_tax_rate")]
    pub high_tax_rate: Decimal,
    // Gross strictly above this pays the high rate on the whole amount
    #[serde(default = "default_tax_slab_threshold")]
    pub tax_slab_threshold: Decimal,
    #[serde(default = "default_overtime_rate")]
    pub overtime_rate: Decimal,
    #[serde(default = "default_bonus_amount")]
    pub bonus_amount: Decimal,
    // Present days strictly above this earn the bonus
    #[serde(default = "default_bonus_min_present_days")]
    pub bonus_min_present_days: Decimal,
}

fn default_pf_rate() -> Decimal {
    dec!(0.10)
}

fn default_base_tax_rate() -> Decimal {
    dec!(0.05)
}

fn default_high_tax_rate() -> Decimal {
    dec!(0.08)
}

fn default_tax_slab_threshold() -> Decimal {
    dec!(60000)
}

fn default_overtime_rate() -> Decimal {
    dec!(200)
}

fn default_bonus_amount() -> Decimal {
    dec!(1000)
}

fn default_bonus_min_present_days() -> Decimal {
    dec!(20)
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            pf_rate: default_pf_rate(),
            base_tax_rate: default_base_tax_rate(),
            high_tax_rate: default_high_tax_rate(),
            tax_slab_threshold: default_tax_slab_threshold(),
            overtime_rate: default_overtime_rate(),
            bonus_amount: default_bonus_amount(),
            bonus_min_present_days: default_bonus_min_present_days(),
        }
    }
}

impl PayrollRates {
    pub fn from_env() -> Result<Self, envy::Error> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let rates = envy::prefixed(RATES_ENV_PREFIX).from_env::<PayrollRates>()?;
        if rates != PayrollRates::default() {
            info!("Using payroll rates overridden from environment: {:?}", rates);
        }
        Ok(rates)
    }
}
