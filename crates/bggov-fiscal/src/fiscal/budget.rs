use super::error::FiscalError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Which side of the ledger a table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetKind {
    Revenue,
    Expenditure,
}

impl BudgetKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expenditure => "expenditure",
        }
    }

    /// Name of the workbook sheet holding this side of the ledger.
    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::Revenue => "Revenues",
            Self::Expenditure => "Expenditures",
        }
    }
}

impl fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LineItem {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Ordered ledger of line items; categories are unique within a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetTable {
    kind: BudgetKind,
    items: Vec<LineItem>,
}

impl BudgetTable {
    pub fn new(kind: BudgetKind, items: Vec<LineItem>) -> Result<Self, FiscalError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.category.as_str()) {
                return Err(FiscalError::DuplicateCategory {
                    kind,
                    category: item.category.clone(),
                });
            }
        }

        Ok(Self { kind, items })
    }

    pub fn kind(&self) -> BudgetKind {
        self.kind
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, category: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.category == category)
    }

    pub fn amount(&self, category: &str) -> Option<Decimal> {
        self.get(category).map(|item| item.amount)
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub(crate) fn get_mut(&mut self, category: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.category == category)
    }
}

/// Macro constants the ratios are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FiscalInputs {
    gdp: Decimal,
    debt_stock: Decimal,
}

impl FiscalInputs {
    pub fn new(gdp: Decimal, debt_stock: Decimal) -> Result<Self, FiscalError> {
        if gdp <= Decimal::ZERO {
            return Err(FiscalError::InvalidGdp(gdp));
        }
        if debt_stock < Decimal::ZERO {
            return Err(FiscalError::NegativeDebt(debt_stock));
        }

        Ok(Self { gdp, debt_stock })
    }

    pub fn gdp(&self) -> Decimal {
        self.gdp
    }

    pub fn debt_stock(&self) -> Decimal {
        self.debt_stock
    }
}

/// Category keys shared by the built-in baseline and the standard catalog.
pub mod categories {
    pub const VAT: &str = "VAT";
    pub const PERSONAL_INCOME_TAX: &str = "Personal income tax";
    pub const CORPORATE_INCOME_TAX: &str = "Corporate income tax";
    pub const SOCIAL_CONTRIBUTIONS: &str = "Social security contributions";
    pub const EXCISE: &str = "Excise duties";
    pub const NON_TAX: &str = "Non-tax revenue";
    pub const EU_FUNDS: &str = "EU funds";

    pub const PENSIONS: &str = "Pensions";
    pub const SOCIAL_AND_HEALTH: &str = "Social assistance and health";
    pub const EDUCATION: &str = "Education";
    pub const DEFENCE: &str = "Defence";
    pub const PUBLIC_ORDER: &str = "Public order and security";
    pub const PUBLIC_ADMINISTRATION: &str = "Public administration";
    pub const INTEREST: &str = "Interest";
    pub const OTHER: &str = "Other";
    pub const CAPITAL_EXPENDITURE: &str = "Capital expenditure";
}

/// Baseline ledger plus macro constants. Amounts are in billions of BGN.
#[derive(Debug, Clone)]
pub struct FiscalBaseline {
    pub revenue: BudgetTable,
    pub expenditure: BudgetTable,
    pub inputs: FiscalInputs,
}

impl FiscalBaseline {
    pub fn new(
        revenue: BudgetTable,
        expenditure: BudgetTable,
        inputs: FiscalInputs,
    ) -> Result<Self, FiscalError> {
        for (table, expected) in [
            (&revenue, BudgetKind::Revenue),
            (&expenditure, BudgetKind::Expenditure),
        ] {
            if table.kind() != expected {
                return Err(FiscalError::TableKindMismatch {
                    expected,
                    actual: table.kind(),
                });
            }
        }

        Ok(Self {
            revenue,
            expenditure,
            inputs,
        })
    }

    /// DEMO placeholder figures, not statistical-agency data.
    pub fn demo() -> Self {
        use categories::*;

        let revenue = vec![
            LineItem::new(VAT, dec!(22)),
            LineItem::new(PERSONAL_INCOME_TAX, dec!(10)),
            LineItem::new(CORPORATE_INCOME_TAX, dec!(4)),
            LineItem::new(SOCIAL_CONTRIBUTIONS, dec!(22)),
            LineItem::new(EXCISE, dec!(6)),
            LineItem::new(NON_TAX, dec!(10)),
            LineItem::new(EU_FUNDS, dec!(18)).with_note("cohesion and recovery funds"),
        ];
        let expenditure = vec![
            LineItem::new(PENSIONS, dec!(20)),
            LineItem::new(SOCIAL_AND_HEALTH, dec!(18)),
            LineItem::new(EDUCATION, dec!(10)),
            LineItem::new(DEFENCE, dec!(8)),
            LineItem::new(PUBLIC_ORDER, dec!(9)),
            LineItem::new(PUBLIC_ADMINISTRATION, dec!(8)).with_note("wage bill"),
            LineItem::new(INTEREST, dec!(6)),
            LineItem::new(OTHER, dec!(2)),
            LineItem::new(CAPITAL_EXPENDITURE, dec!(17)),
        ];

        Self {
            revenue: BudgetTable {
                kind: BudgetKind::Revenue,
                items: revenue,
            },
            expenditure: BudgetTable {
                kind: BudgetKind::Expenditure,
                items: expenditure,
            },
            inputs: FiscalInputs {
                gdp: dec!(210),
                debt_stock: dec!(50),
            },
        }
    }
}
