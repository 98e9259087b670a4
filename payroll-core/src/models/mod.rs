mod bhxh;
mod compound_interest;
mod deduction_policy;
mod insurance_policy;
mod lump_sum_policy;
mod personal_income_tax;
mod region;
mod salary;
mod tax_bracket;

pub use bhxh::{BhxhInput, BhxhPeriod, BhxhResult};
pub use compound_interest::{
    CompoundFrequency, CompoundInterestInput, CompoundInterestResult, InvalidCompoundFrequency,
    YearlyGrowth,
};
pub use deduction_policy::DeductionPolicy;
pub use insurance_policy::{InsurancePolicy, RegionalWages};
pub use lump_sum_policy::LumpSumPolicy;
pub use personal_income_tax::{PersonalIncomeTaxInput, TaxCalculationResult};
pub use region::{InvalidRegion, Region};
pub use salary::{
    EmployerContributions, InsuranceBase, InsuranceContribution, SalaryCalculationResult,
    SalaryInput, SalaryKind,
};
pub use tax_bracket::{BracketTax, TaxBracket};
