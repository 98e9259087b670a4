use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use payroll_core::{
    DeductionPolicy, Dong, InsurancePolicy, LumpSumPolicy, PayrollPolicy, PolicyError, Region,
    RegionalWages, TaxBracket,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading a policy directory.
#[derive(Debug, Error)]
pub enum PolicyLoaderError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {file}: {message}")]
    Csv { file: &'static str, message: String },

    #[error("policy.csv must contain exactly one row, found {0}")]
    PolicyRowCount(usize),

    #[error("tax bracket levels must run 1, 2, 3, ...: expected level {expected}, found {found}")]
    BracketLevel { expected: usize, found: usize },

    #[error("unknown region '{value}' on row {row} of regional_wages.csv")]
    UnknownRegion { value: String, row: usize },

    #[error("{0} is missing from regional_wages.csv")]
    MissingRegion(Region),

    #[error("{0} appears more than once in regional_wages.csv")]
    DuplicateRegion(Region),

    #[error("invalid policy: {0}")]
    Policy(#[from] PolicyError),
}

pub const POLICY_FILE: &str = "policy.csv";
pub const TAX_BRACKETS_FILE: &str = "tax_brackets.csv";
pub const REGIONAL_WAGES_FILE: &str = "regional_wages.csv";

/// The single row of `policy.csv`: every scalar of a [`PayrollPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub name: String,
    pub effective_from: NaiveDate,
    pub personal_deduction: Dong,
    pub dependent_deduction: Dong,
    pub social_rate: Decimal,
    pub health_rate: Decimal,
    pub unemployment_rate: Decimal,
    pub employer_social_rate: Decimal,
    pub employer_health_rate: Decimal,
    pub employer_unemployment_rate: Decimal,
    pub base_cap_multiplier: i64,
    pub lump_sum_cutoff_year: i32,
    pub months_factor_before: Decimal,
    pub months_factor_from: Decimal,
}

/// A single record from `tax_brackets.csv`.
///
/// - `level`: 1-based position in the table
/// - `lower_bound`: where the bracket starts, in Dong
/// - `upper_bound`: where it ends (empty for the unbounded top bracket)
/// - `rate`: the marginal rate as a fraction (e.g. `0.05`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketRecord {
    pub level: usize,
    pub lower_bound: Dong,
    pub upper_bound: Option<Dong>,
    pub rate: Decimal,
}

/// A single record from `regional_wages.csv`. `region` is `1`–`4` or `I`–`IV`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalWageRecord {
    pub region: String,
    pub minimum_wage: Dong,
}

impl From<&PayrollPolicy> for PolicyRecord {
    fn from(policy: &PayrollPolicy) -> Self {
        let insurance = &policy.insurance;
        Self {
            name: policy.name.clone(),
            effective_from: policy.effective_from,
            personal_deduction: policy.deductions.personal_deduction,
            dependent_deduction: policy.deductions.dependent_deduction,
            social_rate: insurance.social_rate,
            health_rate: insurance.health_rate,
            unemployment_rate: insurance.unemployment_rate,
            employer_social_rate: insurance.employer_social_rate,
            employer_health_rate: insurance.employer_health_rate,
            employer_unemployment_rate: insurance.employer_unemployment_rate,
            base_cap_multiplier: insurance.base_cap_multiplier,
            lump_sum_cutoff_year: policy.lump_sum.cutoff_year,
            months_factor_before: policy.lump_sum.months_factor_before,
            months_factor_from: policy.lump_sum.months_factor_from,
        }
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader)
}

fn parse_rows<T, R>(file: &'static str, reader: R) -> Result<Vec<T>, PolicyLoaderError>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    csv_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| PolicyLoaderError::Csv {
            file,
            message: e.to_string(),
        })
}

fn open(path: &Path) -> Result<File, PolicyLoaderError> {
    File::open(path).map_err(|source| PolicyLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loader for policy tables stored as CSV files.
///
/// A policy directory holds three files:
///
/// | File | Content |
/// |------|---------|
/// | `policy.csv` | one [`PolicyRecord`] row |
/// | `tax_brackets.csv` | [`TaxBracketRecord`] rows |
/// | `regional_wages.csv` | one [`RegionalWageRecord`] per region |
pub struct PolicyLoader;

impl PolicyLoader {
    /// Parse `policy.csv` content. Exactly one row is expected.
    pub fn parse_policy<R: Read>(reader: R) -> Result<PolicyRecord, PolicyLoaderError> {
        let mut rows: Vec<PolicyRecord> = parse_rows(POLICY_FILE, reader)?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(PolicyLoaderError::PolicyRowCount(n)),
        }
    }

    /// Parse `tax_brackets.csv` content. Rows may appear in any order.
    pub fn parse_tax_brackets<R: Read>(
        reader: R,
    ) -> Result<Vec<TaxBracketRecord>, PolicyLoaderError> {
        parse_rows(TAX_BRACKETS_FILE, reader)
    }

    /// Parse `regional_wages.csv` content.
    pub fn parse_regional_wages<R: Read>(
        reader: R,
    ) -> Result<Vec<RegionalWageRecord>, PolicyLoaderError> {
        parse_rows(REGIONAL_WAGES_FILE, reader)
    }

    /// Combine parsed records into a validated [`PayrollPolicy`].
    pub fn assemble(
        record: PolicyRecord,
        brackets: Vec<TaxBracketRecord>,
        wages: &[RegionalWageRecord],
    ) -> Result<PayrollPolicy, PolicyLoaderError> {
        let policy = PayrollPolicy {
            name: record.name,
            effective_from: record.effective_from,
            tax_brackets: brackets_in_order(brackets)?,
            insurance: InsurancePolicy {
                social_rate: record.social_rate,
                health_rate: record.health_rate,
                unemployment_rate: record.unemployment_rate,
                employer_social_rate: record.employer_social_rate,
                employer_health_rate: record.employer_health_rate,
                employer_unemployment_rate: record.employer_unemployment_rate,
                regional_minimum_wages: regional_wages(wages)?,
                base_cap_multiplier: record.base_cap_multiplier,
            },
            deductions: DeductionPolicy {
                personal_deduction: record.personal_deduction,
                dependent_deduction: record.dependent_deduction,
            },
            lump_sum: LumpSumPolicy {
                cutoff_year: record.lump_sum_cutoff_year,
                months_factor_before: record.months_factor_before,
                months_factor_from: record.months_factor_from,
            },
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Load and validate the policy stored in `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<PayrollPolicy, PolicyLoaderError> {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), "loading policy directory");

        let record = Self::parse_policy(open(&dir.join(POLICY_FILE))?)?;
        let brackets = Self::parse_tax_brackets(open(&dir.join(TAX_BRACKETS_FILE))?)?;
        let wages = Self::parse_regional_wages(open(&dir.join(REGIONAL_WAGES_FILE))?)?;

        let policy = Self::assemble(record, brackets, &wages)?;
        info!(
            name = %policy.name,
            effective_from = %policy.effective_from,
            brackets = policy.tax_brackets.len(),
            "loaded policy"
        );
        Ok(policy)
    }

    /// Write `policy` into `dir` as the three CSV files `load_dir` reads.
    ///
    /// The directory is created if it does not exist. Existing files are
    /// replaced.
    pub fn write_dir(policy: &PayrollPolicy, dir: impl AsRef<Path>) -> Result<(), PolicyLoaderError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| PolicyLoaderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        write_rows(dir, POLICY_FILE, [PolicyRecord::from(policy)])?;
        write_rows(
            dir,
            TAX_BRACKETS_FILE,
            policy
                .tax_brackets
                .iter()
                .enumerate()
                .map(|(index, bracket)| TaxBracketRecord {
                    level: index + 1,
                    lower_bound: bracket.lower_bound,
                    upper_bound: bracket.upper_bound,
                    rate: bracket.rate,
                }),
        )?;
        write_rows(
            dir,
            REGIONAL_WAGES_FILE,
            policy
                .insurance
                .regional_minimum_wages
                .iter()
                .map(|(region, minimum_wage)| RegionalWageRecord {
                    region: region.code().to_string(),
                    minimum_wage,
                }),
        )?;

        info!(dir = %dir.display(), name = %policy.name, "wrote policy");
        Ok(())
    }
}

fn write_rows<T: Serialize>(
    dir: &Path,
    file: &'static str,
    rows: impl IntoIterator<Item = T>,
) -> Result<(), PolicyLoaderError> {
    let path = dir.join(file);
    let csv_error = |e: csv::Error| PolicyLoaderError::Csv {
        file,
        message: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| PolicyLoaderError::Io { path, source })
}

/// Sorts brackets by level and checks the levels have no gaps.
fn brackets_in_order(
    mut records: Vec<TaxBracketRecord>,
) -> Result<Vec<TaxBracket>, PolicyLoaderError> {
    records.sort_by_key(|record| record.level);
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if record.level != index + 1 {
                return Err(PolicyLoaderError::BracketLevel {
                    expected: index + 1,
                    found: record.level,
                });
            }
            Ok(TaxBracket::new(record.lower_bound, record.upper_bound, record.rate))
        })
        .collect()
}

fn regional_wages(records: &[RegionalWageRecord]) -> Result<RegionalWages, PolicyLoaderError> {
    let entries = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Region::parse(&record.region)
                .map(|region| (region, record.minimum_wage))
                .ok_or_else(|| PolicyLoaderError::UnknownRegion {
                    value: record.region.clone(),
                    row: index + 1,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    RegionalWages::from_entries(entries).map_err(|e| match e {
        PolicyError::MissingRegionalWage(region) => PolicyLoaderError::MissingRegion(region),
        PolicyError::DuplicateRegionalWage(region) => PolicyLoaderError::DuplicateRegion(region),
        other => PolicyLoaderError::Policy(other),
    })
}
