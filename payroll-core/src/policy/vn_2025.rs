//! Built-in 2025 Vietnamese payroll policy.
//!
//! | Item | Value |
//! |------|-------|
//! | Tax brackets (monthly) | 0–5M 5%, 5–10M 10%, 10–18M 15%, 18–32M 20%, 32–52M 25%, 52–80M 30%, over 80M 35% |
//! | Employee insurance | social 8%, health 1.5%, unemployment 1% |
//! | Employer insurance | social 17.5%, health 3%, unemployment 1% |
//! | Regional minimum wages | 4,960,000 / 4,410,000 / 3,860,000 / 3,450,000 |
//! | Insurance base cap | 20 × regional minimum wage |
//! | Deductions | personal 11,000,000, per dependent 4,400,000 |
//! | Lump-sum BHXH | 1.5 months per year before 2014, 2 months per year from 2014 |

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::PayrollPolicy;
use crate::{DeductionPolicy, InsurancePolicy, LumpSumPolicy, RegionalWages, TaxBracket};

const MILLION: i64 = 1_000_000;

pub(super) fn policy() -> PayrollPolicy {
    PayrollPolicy {
        name: "VN-2025".to_string(),
        effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        tax_brackets: tax_brackets(),
        insurance: insurance(),
        deductions: DeductionPolicy {
            personal_deduction: 11 * MILLION,
            dependent_deduction: 4_400_000,
        },
        lump_sum: LumpSumPolicy {
            cutoff_year: 2014,
            months_factor_before: Decimal::new(15, 1),
            months_factor_from: Decimal::TWO,
        },
    }
}

fn tax_brackets() -> Vec<TaxBracket> {
    let bands: [(i64, Option<i64>, i64); 7] = [
        (0, Some(5), 5),
        (5, Some(10), 10),
        (10, Some(18), 15),
        (18, Some(32), 20),
        (32, Some(52), 25),
        (52, Some(80), 30),
        (80, None, 35),
    ];

    bands
        .into_iter()
        .map(|(lower, upper, percent)| {
            TaxBracket::new(
                lower * MILLION,
                upper.map(|u| u * MILLION),
                Decimal::new(percent, 2),
            )
        })
        .collect()
}

fn insurance() -> InsurancePolicy {
    InsurancePolicy {
        social_rate: Decimal::new(8, 2),
        health_rate: Decimal::new(15, 3),
        unemployment_rate: Decimal::new(1, 2),
        employer_social_rate: Decimal::new(175, 3),
        employer_health_rate: Decimal::new(3, 2),
        employer_unemployment_rate: Decimal::new(1, 2),
        regional_minimum_wages: RegionalWages {
            region_1: 4_960_000,
            region_2: 4_410_000,
            region_3: 3_860_000,
            region_4: 3_450_000,
        },
        base_cap_multiplier: 20,
    }
}
