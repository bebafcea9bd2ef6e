use super::budget::{categories, BudgetKind};
use super::error::FiscalError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a catalogued measure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub String);

impl PolicyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolicyId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// How a measure perturbs the budget tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyEffect {
    AdditiveRevenue {
        target_category: &'static str,
        delta: Decimal,
    },
    MultiplicativeExpenditure {
        target_category: &'static str,
        multiplier: Decimal,
    },
    AdditiveExpenditureBundle {
        deltas: Vec<(&'static str, Decimal)>,
    },
}

impl PolicyEffect {
    pub fn table_kind(&self) -> BudgetKind {
        match self {
            Self::AdditiveRevenue { .. } => BudgetKind::Revenue,
            Self::MultiplicativeExpenditure { .. } | Self::AdditiveExpenditureBundle { .. } => {
                BudgetKind::Expenditure
            }
        }
    }

    pub fn target_categories(&self) -> Vec<&'static str> {
        match self {
            Self::AdditiveRevenue {
                target_category, ..
            }
            | Self::MultiplicativeExpenditure {
                target_category, ..
            } => vec![*target_category],
            Self::AdditiveExpenditureBundle { deltas } => {
                deltas.iter().map(|(category, _)| *category).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub effect: PolicyEffect,
}

impl PolicyDefinition {
    pub fn policy_id(&self) -> PolicyId {
        PolicyId::from(self.id)
    }
}

/// Closed, ordered registry of measures. The order is the application order.
#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    policies: Vec<PolicyDefinition>,
}

impl PolicyCatalog {
    pub fn standard() -> Self {
        Self {
            policies: standard_policies(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_definitions(policies: Vec<PolicyDefinition>) -> Self {
        Self { policies }
    }

    pub fn lookup(&self, id: &PolicyId) -> Result<&PolicyDefinition, FiscalError> {
        self.policies
            .iter()
            .find(|policy| policy.id == id.as_str())
            .ok_or_else(|| FiscalError::UnknownPolicy(id.clone()))
    }

    pub fn policies(&self) -> &[PolicyDefinition] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

fn standard_policies() -> Vec<PolicyDefinition> {
    vec![
        PolicyDefinition {
            id: "vat_restaurants_9",
            label: "Restaurant VAT 20% → 9%",
            effect: PolicyEffect::AdditiveRevenue {
                target_category: categories::VAT,
                delta: dec!(-0.6),
            },
        },
        PolicyDefinition {
            id: "pensions_plus_10",
            label: "Pensions +10%",
            effect: PolicyEffect::MultiplicativeExpenditure {
                target_category: categories::PENSIONS,
                multiplier: dec!(1.10),
            },
        },
        PolicyDefinition {
            id: "public_wages_plus_5",
            label: "Public sector wages +5%",
            effect: PolicyEffect::MultiplicativeExpenditure {
                target_category: categories::PUBLIC_ADMINISTRATION,
                multiplier: dec!(1.05),
            },
        },
        PolicyDefinition {
            id: "investment_programme",
            label: "Public investment programme",
            effect: PolicyEffect::AdditiveExpenditureBundle {
                deltas: vec![
                    (categories::CAPITAL_EXPENDITURE, dec!(2.0)),
                    (categories::PUBLIC_ADMINISTRATION, dec!(0.2)),
                ],
            },
        },
        PolicyDefinition {
            id: "vat_collection_drive",
            label: "VAT collection drive (e-receipts)",
            effect: PolicyEffect::AdditiveRevenue {
                target_category: categories::VAT,
                delta: dec!(0.8),
            },
        },
    ]
}
