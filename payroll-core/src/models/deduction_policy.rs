use serde::{Deserialize, Serialize};

use crate::Dong;

/// Family-circumstance deductions applied before the tax schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionPolicy {
    /// Monthly deduction for the taxpayer.
    pub personal_deduction: Dong,
    /// Monthly deduction for each registered dependent.
    pub dependent_deduction: Dong,
}

impl DeductionPolicy {
    pub fn dependents_total(&self, dependents: u32) -> Dong {
        self.dependent_deduction.saturating_mul(Dong::from(dependents))
    }

    pub fn total(&self, dependents: u32) -> Dong {
        self.personal_deduction
            .saturating_add(self.dependents_total(dependents))
    }
}
