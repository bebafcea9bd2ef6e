use super::budget::BudgetKind;
use super::catalog::PolicyId;
use super::source::BudgetSourceError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by the fiscal core. None of them is retried or defaulted locally.
#[derive(Debug, Error)]
pub enum FiscalError {
    #[error("category '{category}' referenced by '{policy}' is not present in the budget table")]
    CategoryNotFound { category: String, policy: String },

    #[error("unknown policy '{0}'")]
    UnknownPolicy(PolicyId),

    #[error("GDP must be strictly positive (got {0})")]
    InvalidGdp(Decimal),

    #[error("debt stock cannot be negative (got {0})")]
    NegativeDebt(Decimal),

    #[error("duplicate {kind} category '{category}'")]
    DuplicateCategory { kind: BudgetKind, category: String },

    #[error("expected a {expected} table, got a {actual} table")]
    TableKindMismatch {
        expected: BudgetKind,
        actual: BudgetKind,
    },

    #[error("malformed budget source: {0}")]
    MalformedBudgetSource(#[from] BudgetSourceError),
}

impl FiscalError {
    pub(crate) fn category_not_found(category: &str, policy: impl Into<String>) -> Self {
        Self::CategoryNotFound {
            category: category.to_owned(),
            policy: policy.into(),
        }
    }
}
