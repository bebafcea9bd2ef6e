mod parser;

use super::budget::{BudgetKind, BudgetTable, FiscalBaseline, FiscalInputs, LineItem};
use super::error::FiscalError;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INPUTS_SHEET: &str = "Inputs";
pub const REVENUES_SHEET: &str = BudgetKind::Revenue.sheet_name();
pub const EXPENDITURES_SHEET: &str = BudgetKind::Expenditure.sheet_name();

const GDP_KEY: &str = "gdp";
const DEBT_KEY: &str = "debt";

/// Structural problems in an uploaded budget workbook.
#[derive(Debug, Error)]
pub enum BudgetSourceError {
    #[error("sheet '{sheet}' is missing ({})", path.display())]
    MissingSheet { sheet: &'static str, path: PathBuf },

    #[error("failed to read sheet '{sheet}': {source}")]
    Io {
        sheet: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV in sheet '{sheet}': {source}")]
    Csv {
        sheet: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("sheet '{sheet}' has no '{column}' header")]
    MissingHeader {
        sheet: &'static str,
        column: &'static str,
    },

    #[error("sheet '{sheet}' line {line}: category is empty")]
    EmptyCategory { sheet: &'static str, line: usize },

    #[error("sheet '{sheet}' line {line}: '{value}' is not a number")]
    InvalidAmount {
        sheet: &'static str,
        line: usize,
        value: String,
    },

    #[error("sheet '{sheet}' lists category '{category}' more than once")]
    DuplicateCategory {
        sheet: &'static str,
        category: String,
    },

    #[error("sheet 'Inputs' has no '{0}' row")]
    MissingInput(&'static str),
}

/// Readers for the three sheets of a budget workbook.
pub struct BudgetSheets<I, R, E> {
    pub inputs: I,
    pub revenues: R,
    pub expenditures: E,
}

/// Loads a complete baseline from an exported workbook or fails without returning a
/// partial one.
pub struct BudgetSourceLoader;

impl BudgetSourceLoader {
    /// Reads `Inputs.csv`, `Revenues.csv` and `Expenditures.csv` from `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<FiscalBaseline, FiscalError> {
        let dir = dir.as_ref();
        let sheets = BudgetSheets {
            inputs: open_sheet(dir, INPUTS_SHEET)?,
            revenues: open_sheet(dir, REVENUES_SHEET)?,
            expenditures: open_sheet(dir, EXPENDITURES_SHEET)?,
        };
        Self::from_readers(sheets)
    }

    pub fn from_readers<I: Read, R: Read, E: Read>(
        sheets: BudgetSheets<I, R, E>,
    ) -> Result<FiscalBaseline, FiscalError> {
        let inputs = parser::parse_sheet(INPUTS_SHEET, sheets.inputs)?;
        let revenues = parser::parse_sheet(REVENUES_SHEET, sheets.revenues)?;
        let expenditures = parser::parse_sheet(EXPENDITURES_SHEET, sheets.expenditures)?;

        let revenue = build_table(BudgetKind::Revenue, REVENUES_SHEET, revenues)?;
        let expenditure = build_table(BudgetKind::Expenditure, EXPENDITURES_SHEET, expenditures)?;

        let gdp = input_value(&inputs, GDP_KEY).ok_or(BudgetSourceError::MissingInput("GDP"))?;
        let debt = input_value(&inputs, DEBT_KEY).ok_or(BudgetSourceError::MissingInput("Debt"))?;
        let inputs = FiscalInputs::new(gdp, debt)?;

        FiscalBaseline::new(revenue, expenditure, inputs)
    }
}

fn open_sheet(dir: &Path, sheet: &'static str) -> Result<std::fs::File, BudgetSourceError> {
    let path = dir.join(format!("{sheet}.csv"));
    std::fs::File::open(&path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => BudgetSourceError::MissingSheet { sheet, path },
        _ => BudgetSourceError::Io { sheet, source },
    })
}

fn build_table(
    kind: BudgetKind,
    sheet: &'static str,
    items: Vec<LineItem>,
) -> Result<BudgetTable, FiscalError> {
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.category.as_str()) {
            return Err(BudgetSourceError::DuplicateCategory {
                sheet,
                category: item.category.clone(),
            }
            .into());
        }
    }

    BudgetTable::new(kind, items)
}

fn input_value(items: &[LineItem], key: &str) -> Option<rust_decimal::Decimal> {
    items
        .iter()
        .find(|item| item.category.eq_ignore_ascii_case(key))
        .map(|item| item.amount)
}
