use std::sync::Arc;

use axum::{Json, extract::State};
use payroll_core::calculations::{
    SalaryConverter, compute_bhxh, compute_personal_income_tax, project_compound_interest,
};
use payroll_core::{
    BhxhInput, BhxhResult, CompoundInterestInput, CompoundInterestResult, PayrollPolicy,
    PersonalIncomeTaxInput, SalaryCalculationResult, SalaryInput, TaxCalculationResult,
};
use serde_json::{Value, json};

use crate::Result;
use crate::dto::{
    self, CompoundInterestRequest, GrossToNetRequest, NetToGrossRequest, PersonalIncomeTaxRequest,
};

pub type PolicyState = Arc<PayrollPolicy>;

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /policy
/// Returns the policy tables every calculation uses
pub async fn get_policy(State(policy): State<PolicyState>) -> Json<PayrollPolicy> {
    Json(policy.as_ref().clone())
}

/// POST /salary/gross-to-net
pub async fn gross_to_net(
    State(policy): State<PolicyState>,
    Json(request): Json<GrossToNetRequest>,
) -> Result<Json<SalaryCalculationResult>> {
    let input = SalaryInput::try_from(request)?;
    Ok(Json(SalaryConverter::new(&policy).gross_to_net(&input)))
}

/// POST /salary/net-to-gross
pub async fn net_to_gross(
    State(policy): State<PolicyState>,
    Json(request): Json<NetToGrossRequest>,
) -> Result<Json<SalaryCalculationResult>> {
    let input = SalaryInput::try_from(request)?;
    Ok(Json(SalaryConverter::new(&policy).net_to_gross(&input)))
}

/// POST /tax/personal-income
pub async fn personal_income_tax(
    State(policy): State<PolicyState>,
    Json(request): Json<PersonalIncomeTaxRequest>,
) -> Result<Json<TaxCalculationResult>> {
    let input = PersonalIncomeTaxInput::try_from(request)?;
    Ok(Json(compute_personal_income_tax(&input, &policy)))
}

/// POST /bhxh/lump-sum
pub async fn bhxh_lump_sum(
    State(policy): State<PolicyState>,
    Json(request): Json<BhxhInput>,
) -> Result<Json<BhxhResult>> {
    let input = dto::bhxh_input(request)?;
    Ok(Json(compute_bhxh(&input.periods, &policy.lump_sum)))
}

/// POST /interest/compound
pub async fn compound_interest(
    Json(request): Json<CompoundInterestRequest>,
) -> Result<Json<CompoundInterestResult>> {
    let input = CompoundInterestInput::try_from(request)?;
    Ok(Json(project_compound_interest(&input)))
}
