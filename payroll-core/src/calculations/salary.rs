//! Gross-to-net and net-to-gross salary conversion.
//!
//! # Gross to net
//!
//! | Step | Value |
//! |------|-------|
//! | 1 | Employee insurance on the gross salary |
//! | 2 | Taxable income = gross − insurance |
//! | 3 | Deductions = personal + dependents × dependent deduction |
//! | 4 | Tax base = max(0, taxable income − deductions) |
//! | 5 | Personal income tax from the bracket table |
//! | 6 | Net = gross − insurance − tax |
//!
//! # Net to gross
//!
//! Insurance and tax both depend on the gross salary, so there is no closed
//! form. The gross is found by fixed-point iteration: starting from the net
//! amount, each step sets `gross = net + insurance(gross) + tax(gross)`. The
//! step function is non-decreasing, so the estimate climbs monotonically to
//! the smallest gross that yields the requested net.
//!
//! # Example
//!
//! ```
//! use payroll_core::{PayrollPolicy, Region, SalaryInput};
//! use payroll_core::calculations::SalaryConverter;
//!
//! let policy = PayrollPolicy::vn_2025();
//! let converter = SalaryConverter::new(&policy);
//!
//! let result = converter.gross_to_net(&SalaryInput::gross(30_000_000, 1, Region::I));
//! assert_eq!(result.total_insurance, 3_150_000);
//! assert_eq!(result.personal_income_tax, 967_500);
//! assert_eq!(result.net_salary, 25_882_500);
//!
//! let back = converter.net_to_gross(&SalaryInput::net(result.net_salary, 1, Region::I));
//! assert!((back.gross_salary - 30_000_000).abs() <= 1);
//! ```

use tracing::{debug, warn};

use crate::calculations::common::non_negative;
use crate::calculations::insurance::{compute_employer_insurance, compute_insurance};
use crate::calculations::progressive_tax::compute_progressive_tax;
use crate::{Dong, PayrollPolicy, SalaryCalculationResult, SalaryInput};

/// Upper bound on net-to-gross steps when iterating to convergence.
pub const NET_TO_GROSS_MAX_ITERATIONS: u32 = 50;

/// Step count of the legacy fixed-length net-to-gross loop.
pub const LEGACY_NET_TO_GROSS_ITERATIONS: u32 = 10;

/// How the net-to-gross iteration decides when to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetToGrossStrategy {
    /// Stop once an estimate reproduces itself, or after
    /// [`NET_TO_GROSS_MAX_ITERATIONS`] steps.
    #[default]
    Converge,
    /// Run exactly this many steps.
    Fixed(u32),
}

impl NetToGrossStrategy {
    /// The fixed ten-step loop, for reproducing earlier results exactly.
    pub fn legacy() -> Self {
        Self::Fixed(LEGACY_NET_TO_GROSS_ITERATIONS)
    }
}

/// Converts between gross and net salary under one policy.
#[derive(Debug, Clone)]
pub struct SalaryConverter<'a> {
    policy: &'a PayrollPolicy,
    strategy: NetToGrossStrategy,
}

impl<'a> SalaryConverter<'a> {
    pub fn new(policy: &'a PayrollPolicy) -> Self {
        Self {
            policy,
            strategy: NetToGrossStrategy::default(),
        }
    }

    pub fn with_strategy(self, strategy: NetToGrossStrategy) -> Self {
        Self { strategy, ..self }
    }

    /// Treats `input.salary` as the gross salary.
    pub fn gross_to_net(&self, input: &SalaryInput) -> SalaryCalculationResult {
        let result = self.breakdown(input.salary, input);
        debug!(
            gross = result.gross_salary,
            net = result.net_salary,
            tax = result.personal_income_tax,
            region = input.region.code(),
            dependents = input.dependents,
            "gross to net"
        );
        result
    }

    /// Treats `input.salary` as the desired take-home pay and searches for
    /// the gross salary that produces it.
    pub fn net_to_gross(&self, input: &SalaryInput) -> SalaryCalculationResult {
        let net = input.salary;
        let mut estimate = net;

        match self.strategy {
            NetToGrossStrategy::Fixed(iterations) => {
                for _ in 0..iterations {
                    estimate = net.saturating_add(self.withholding(estimate, input));
                }
            }
            NetToGrossStrategy::Converge => {
                let mut converged = false;
                for iteration in 1..=NET_TO_GROSS_MAX_ITERATIONS {
                    let next = net.saturating_add(self.withholding(estimate, input));
                    if next == estimate {
                        debug!(iteration, gross = estimate, "net to gross converged");
                        converged = true;
                        break;
                    }
                    estimate = next;
                }
                if !converged {
                    warn!(
                        net,
                        gross = estimate,
                        max_iterations = NET_TO_GROSS_MAX_ITERATIONS,
                        "net to gross did not converge; using last estimate"
                    );
                }
            }
        }

        let result = self.breakdown(estimate, input);
        debug!(
            requested_net = net,
            gross = result.gross_salary,
            net = result.net_salary,
            "net to gross"
        );
        result
    }

    /// Insurance plus tax owed on `gross`.
    fn withholding(&self, gross: Dong, input: &SalaryInput) -> Dong {
        let result = self.breakdown(gross, input);
        result.total_insurance + result.personal_income_tax
    }

    fn breakdown(&self, gross: Dong, input: &SalaryInput) -> SalaryCalculationResult {
        let insurance = compute_insurance(
            gross,
            input.region,
            input.insurance_base,
            &self.policy.insurance,
        );
        let taxable_income = gross - insurance.total;

        let deductions = &self.policy.deductions;
        let personal_deduction = deductions.personal_deduction;
        let dependent_deduction = deductions.dependents_total(input.dependents);
        let total_deduction = deductions.total(input.dependents);

        let tax_base = non_negative(taxable_income.saturating_sub(total_deduction));
        let personal_income_tax = compute_progressive_tax(tax_base, &self.policy.tax_brackets);

        SalaryCalculationResult {
            gross_salary: gross,
            net_salary: gross - insurance.total - personal_income_tax,
            insurance_base: insurance.insurance_base,
            social_insurance: insurance.social,
            health_insurance: insurance.health,
            unemployment_insurance: insurance.unemployment,
            total_insurance: insurance.total,
            taxable_income,
            personal_deduction,
            dependent_deduction,
            total_deduction,
            tax_base,
            personal_income_tax,
            employer: compute_employer_insurance(
                insurance.insurance_base,
                gross,
                &self.policy.insurance,
            ),
        }
    }
}

/// Gross-to-net conversion with the default converter.
pub fn gross_to_net(input: &SalaryInput, policy: &PayrollPolicy) -> SalaryCalculationResult {
    SalaryConverter::new(policy).gross_to_net(input)
}

/// Net-to-gross conversion with the default (converging) strategy.
pub fn net_to_gross(input: &SalaryInput, policy: &PayrollPolicy) -> SalaryCalculationResult {
    SalaryConverter::new(policy).net_to_gross(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{EmployerContributions, Region};

    fn policy() -> PayrollPolicy {
        PayrollPolicy::vn_2025()
    }

    // =========================================================================
    // gross_to_net tests
    // =========================================================================

    #[test]
    fn gross_to_net_worked_example() {
        let result = gross_to_net(&SalaryInput::gross(30_000_000, 1, Region::I), &policy());

        assert_eq!(
            result,
            SalaryCalculationResult {
                gross_salary: 30_000_000,
                net_salary: 25_882_500,
                insurance_base: 30_000_000,
                social_insurance: 2_400_000,
                health_insurance: 450_000,
                unemployment_insurance: 300_000,
                total_insurance: 3_150_000,
                taxable_income: 26_850_000,
                personal_deduction: 11_000_000,
                dependent_deduction: 4_400_000,
                total_deduction: 15_400_000,
                tax_base: 11_450_000,
                personal_income_tax: 967_500,
                employer: EmployerContributions {
                    social: 5_250_000,
                    health: 900_000,
                    unemployment: 300_000,
                    total: 6_450_000,
                    total_cost: 36_450_000,
                },
            }
        );
    }

    #[test]
    fn deductions_above_taxable_income_leave_no_tax() {
        let result = gross_to_net(&SalaryInput::gross(12_000_000, 0, Region::II), &policy());

        // 12M - 1.26M insurance = 10.74M taxable, below the 11M personal deduction.
        assert_eq!(result.taxable_income, 10_740_000);
        assert_eq!(result.tax_base, 0);
        assert_eq!(result.personal_income_tax, 0);
        assert_eq!(result.net_salary, 10_740_000);
    }

    #[test]
    fn custom_base_changes_insurance_only() {
        let input = SalaryInput::gross(30_000_000, 1, Region::I).with_custom_base(5_000_000);
        let result = gross_to_net(&input, &policy());

        assert_eq!(result.insurance_base, 5_000_000);
        assert_eq!(result.total_insurance, 525_000);
        assert_eq!(result.taxable_income, 29_475_000);
        // base 14,075,000: 250,000 + 500,000 + 4,075,000 × 15%
        assert_eq!(result.personal_income_tax, 1_361_250);
        assert_eq!(result.net_salary, 30_000_000 - 525_000 - 1_361_250);
    }

    #[test]
    fn high_salary_hits_insurance_cap() {
        let result = gross_to_net(&SalaryInput::gross(200_000_000, 0, Region::I), &policy());

        assert_eq!(result.insurance_base, 99_200_000);
        assert_eq!(result.total_insurance, 10_416_000);
    }

    #[test]
    fn result_satisfies_net_and_tax_base_identities() {
        for gross in [5_000_000, 17_300_000, 45_000_000, 120_000_000, 999_999_999] {
            for dependents in [0, 2, 5] {
                let r = gross_to_net(&SalaryInput::gross(gross, dependents, Region::III), &policy());
                assert_eq!(r.net_salary, r.gross_salary - r.total_insurance - r.personal_income_tax);
                assert_eq!(r.tax_base, (r.taxable_income - r.total_deduction).max(0));
            }
        }
    }

    #[test]
    fn net_is_non_decreasing_in_gross() {
        let policy = policy();
        let mut previous = Dong::MIN;
        for step in 0..=300 {
            let gross = 1_000_000 + step * 1_000_000;
            let net = gross_to_net(&SalaryInput::gross(gross, 1, Region::I), &policy).net_salary;
            assert!(net >= previous, "gross {gross}: net {net} < {previous}");
            previous = net;
        }
    }

    // =========================================================================
    // net_to_gross tests
    // =========================================================================

    #[test]
    fn net_to_gross_inverts_worked_example() {
        let result = net_to_gross(&SalaryInput::net(25_882_500, 1, Region::I), &policy());

        assert!((result.gross_salary - 30_000_000).abs() <= 1);
        assert_eq!(result.net_salary, 25_882_500);
    }

    #[test]
    fn net_to_gross_round_trips_within_one_dong() {
        let policy = policy();
        let cases = [
            (8_000_000, 0, Region::IV),
            (20_000_000, 2, Region::II),
            (30_000_000, 1, Region::I),
            (65_000_000, 0, Region::I),
            (150_000_000, 3, Region::III),
            (1_000_000_000, 0, Region::I),
        ];

        for (gross, dependents, region) in cases {
            let forward = gross_to_net(&SalaryInput::gross(gross, dependents, region), &policy);
            let back = net_to_gross(
                &SalaryInput::net(forward.net_salary, dependents, region),
                &policy,
            );
            assert!(
                (back.gross_salary - gross).abs() <= 1,
                "gross {gross}: got back {}",
                back.gross_salary
            );
            assert_eq!(back.net_salary, forward.net_salary);
        }
    }

    #[test]
    fn net_to_gross_below_deductions_adds_only_insurance() {
        let result = net_to_gross(&SalaryInput::net(8_950_000, 0, Region::I), &policy());

        // 10,000,000 × 89.5% = 8,950,000 and no tax is due.
        assert_eq!(result.gross_salary, 10_000_000);
        assert_eq!(result.personal_income_tax, 0);
    }

    #[test]
    fn net_to_gross_with_custom_base() {
        let input = SalaryInput::net(20_000_000, 0, Region::I).with_custom_base(5_000_000);
        let result = net_to_gross(&input, &policy());

        assert_eq!(result.total_insurance, 525_000);
        assert_eq!(result.net_salary, 20_000_000);
    }

    #[test]
    fn legacy_strategy_runs_fixed_ten_steps() {
        let policy = policy();
        let converter = SalaryConverter::new(&policy).with_strategy(NetToGrossStrategy::legacy());

        let result = converter.net_to_gross(&SalaryInput::net(25_882_500, 1, Region::I));

        assert!((result.gross_salary - 30_000_000).abs() <= 10);
    }

    #[test]
    fn zero_step_strategy_treats_net_as_gross() {
        let policy = policy();
        let converter = SalaryConverter::new(&policy).with_strategy(NetToGrossStrategy::Fixed(0));

        let result = converter.net_to_gross(&SalaryInput::net(25_882_500, 1, Region::I));

        assert_eq!(result.gross_salary, 25_882_500);
    }
}
