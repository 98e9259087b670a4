//! Payroll calculators.
//!
//! Every calculator is a pure function of its input record and a
//! [`PayrollPolicy`](crate::PayrollPolicy). Inputs are expected to have
//! passed [`Validate`](crate::validation::Validate); calculators do not fail
//! on validated input.

pub mod bhxh;
pub mod common;
pub mod compound_interest;
pub mod insurance;
pub mod personal_income_tax;
pub mod progressive_tax;
pub mod salary;

pub use bhxh::compute_bhxh;
pub use compound_interest::project_compound_interest;
pub use insurance::{compute_employer_insurance, compute_insurance, insurance_base};
pub use personal_income_tax::compute_personal_income_tax;
pub use progressive_tax::{compute_progressive_tax, marginal_rate, progressive_tax_breakdown};
pub use salary::{
    LEGACY_NET_TO_GROSS_ITERATIONS, NET_TO_GROSS_MAX_ITERATIONS, NetToGrossStrategy,
    SalaryConverter, gross_to_net, net_to_gross,
};
