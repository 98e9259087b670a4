//! Compulsory social, health and unemployment insurance.
//!
//! The official insurance base is the salary capped at
//! `base_cap_multiplier × regional minimum wage`; a custom base is used as
//! declared. Each contribution is `base × rate` rounded half-up to whole Dong.

use rust_decimal::Decimal;

use crate::calculations::common::{dong, round_half_up};
use crate::{
    Dong, EmployerContributions, InsuranceBase, InsuranceContribution, InsurancePolicy, Region,
};

/// Resolves the amount insurance is levied on.
pub fn insurance_base(
    base_salary: Dong,
    region: Region,
    base: InsuranceBase,
    policy: &InsurancePolicy,
) -> Dong {
    match base {
        InsuranceBase::Official => base_salary.min(policy.insurance_base_cap(region)),
        InsuranceBase::Custom(amount) => amount,
    }
}

/// Computes the employee's monthly insurance contributions.
///
/// # Example
///
/// ```
/// use payroll_core::{InsuranceBase, PayrollPolicy, Region};
/// use payroll_core::calculations::compute_insurance;
///
/// let policy = PayrollPolicy::vn_2025();
/// let insurance = compute_insurance(30_000_000, Region::I, InsuranceBase::Official, &policy.insurance);
///
/// assert_eq!(insurance.social, 2_400_000);
/// assert_eq!(insurance.health, 450_000);
/// assert_eq!(insurance.unemployment, 300_000);
/// assert_eq!(insurance.total, 3_150_000);
/// ```
pub fn compute_insurance(
    base_salary: Dong,
    region: Region,
    base: InsuranceBase,
    policy: &InsurancePolicy,
) -> InsuranceContribution {
    let insurance_base = insurance_base(base_salary, region, base, policy);
    let social = contribution(insurance_base, policy.social_rate);
    let health = contribution(insurance_base, policy.health_rate);
    let unemployment = contribution(insurance_base, policy.unemployment_rate);

    InsuranceContribution {
        insurance_base,
        social,
        health,
        unemployment,
        total: social + health + unemployment,
    }
}

/// Computes the employer's contributions on an already resolved base.
pub fn compute_employer_insurance(
    insurance_base: Dong,
    gross_salary: Dong,
    policy: &InsurancePolicy,
) -> EmployerContributions {
    let social = contribution(insurance_base, policy.employer_social_rate);
    let health = contribution(insurance_base, policy.employer_health_rate);
    let unemployment = contribution(insurance_base, policy.employer_unemployment_rate);
    let total = social + health + unemployment;

    EmployerContributions {
        social,
        health,
        unemployment,
        total,
        total_cost: gross_salary.saturating_add(total),
    }
}

fn contribution(base: Dong, rate: Decimal) -> Dong {
    round_half_up(dong(base) * rate)
}
