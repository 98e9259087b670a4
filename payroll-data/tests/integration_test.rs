//! Integration tests for loading policy directories and period files from disk.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use payroll_core::calculations::{compute_bhxh, gross_to_net};
use payroll_core::{PayrollPolicy, PolicyError, Region, SalaryInput, Validate};
use payroll_data::{
    POLICY_FILE, PeriodLoaderError, PolicyLoader, PolicyLoaderError, load_periods,
};

fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

#[test]
fn test_load_vn_2025_directory() {
    let policy = PolicyLoader::load_dir(test_data("vn-2025")).expect("Failed to load policy");

    assert_eq!(policy, PayrollPolicy::vn_2025());
}

#[test]
fn test_loaded_policy_drives_calculations() {
    let policy = PolicyLoader::load_dir(test_data("vn-2025")).expect("Failed to load policy");

    let result = gross_to_net(&SalaryInput::gross(30_000_000, 1, Region::I), &policy);

    assert_eq!(result.personal_income_tax, 967_500);
    assert_eq!(result.net_salary, 25_882_500);
}

#[test]
fn test_non_contiguous_brackets_are_rejected() {
    let err = PolicyLoader::load_dir(test_data("broken-gap")).expect_err("gap in brackets");

    match err {
        PolicyLoaderError::Policy(PolicyError::NonContiguousBracket {
            level,
            expected,
            found,
        }) => {
            assert_eq!(level, 2);
            assert_eq!(expected, 5_000_000);
            assert_eq!(found, 6_000_000);
        }
        other => panic!("expected NonContiguousBracket, got {other:?}"),
    }
}

#[test]
fn test_missing_directory_reports_path() {
    let dir = test_data("does-not-exist");

    let err = PolicyLoader::load_dir(&dir).expect_err("missing dir");

    match err {
        PolicyLoaderError::Io { path, .. } => assert_eq!(path, dir.join(POLICY_FILE)),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_written_directory_loads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut policy = PayrollPolicy::vn_2025();
    policy.name = "VN-2025-custom".to_string();
    policy.deductions.dependent_deduction = 6_200_000;
    policy.insurance.health_rate = dec!(0.02);

    PolicyLoader::write_dir(&policy, dir.path()).expect("Failed to write policy");
    let loaded = PolicyLoader::load_dir(dir.path()).expect("Failed to load policy");

    assert_eq!(loaded, policy);
}

#[test]
fn test_load_periods_file() {
    let periods = load_periods(test_data("periods.csv")).expect("Failed to load periods");

    assert_eq!(periods.len(), 3);
    assert_eq!(periods[0].id, "first job");
    assert_eq!(periods[2].id, "");

    let input = payroll_core::BhxhInput { periods };
    assert!(input.validate().is_success());

    let result = compute_bhxh(&input.periods, &PayrollPolicy::vn_2025().lump_sum);
    assert_eq!(result.total_months, 90);
    assert_eq!(result.months_before_cutoff, 48);
    assert_eq!(result.months_from_cutoff, 42);
}

#[test]
fn test_load_periods_missing_file() {
    let err = load_periods(test_data("nope.csv")).expect_err("missing file");

    assert!(matches!(err, PeriodLoaderError::Io { .. }));
}
