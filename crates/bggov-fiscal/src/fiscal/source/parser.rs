use super::BudgetSourceError;
use crate::fiscal::budget::LineItem;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

pub(crate) const HEADER_CATEGORY: &str = "Category";
pub(crate) const HEADER_AMOUNT: &str = "Amount";
pub(crate) const HEADER_NOTES: &str = "Notes";

/// Largest accepted magnitude of a sheet figure, in BGN.
pub(crate) const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);
/// Figures with more significant decimals are rejected.
pub(crate) const MAX_AMOUNT_SCALE: u32 = 6;

const REQUIRED_HEADERS: [&str; 3] = [HEADER_CATEGORY, HEADER_AMOUNT, HEADER_NOTES];

#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

/// Reads one sheet into line items. Header names are matched exactly after trimming.
pub(crate) fn parse_sheet<R: Read>(
    sheet: &'static str,
    reader: R,
) -> Result<Vec<LineItem>, BudgetSourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| BudgetSourceError::Csv { sheet, source })?
        .clone();
    for required in REQUIRED_HEADERS {
        if !headers
            .iter()
            .any(|header| strip_bom(header) == required)
        {
            return Err(BudgetSourceError::MissingHeader {
                sheet,
                column: required,
            });
        }
    }
    // A BOM-prefixed first header would not match the serde field names.
    let cleaned = headers.iter().map(strip_bom).collect::<csv::StringRecord>();
    csv_reader.set_headers(cleaned);

    let mut items = Vec::new();
    for (index, record) in csv_reader.deserialize::<SheetRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = record.map_err(|source| BudgetSourceError::Csv { sheet, source })?;
        if row.category.is_empty() && row.amount.is_empty() {
            continue;
        }
        if row.category.is_empty() {
            return Err(BudgetSourceError::EmptyCategory { sheet, line });
        }

        let amount = parse_amount(&row.amount).ok_or_else(|| BudgetSourceError::InvalidAmount {
            sheet,
            line,
            value: row.amount.clone(),
        })?;

        items.push(LineItem {
            category: row.category,
            amount,
            note: row.notes,
        });
    }

    Ok(items)
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let compact: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '\u{a0}')
        .collect();
    if compact.is_empty() {
        return None;
    }
    let amount = Decimal::from_str(&compact).ok()?;
    if amount.abs() > MAX_AMOUNT || amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return None;
    }
    Some(amount)
}

fn strip_bom(value: &str) -> &str {
    value.trim_start_matches('\u{feff}')
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn amounts_accept_space_grouping() {
        assert_eq!(parse_amount("1 200.5"), Some(dec!(1200.5)));
        assert_eq!(parse_amount("-0.6"), Some(dec!(-0.6)));
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("  "), None);
    }

    #[test]
    fn amounts_outside_the_supported_range_are_rejected() {
        assert_eq!(parse_amount("1 000 000 000 000 000"), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("-1000000000000000"), Some(-MAX_AMOUNT));
        assert_eq!(parse_amount("1000000000000000.5"), None);
        assert_eq!(parse_amount("79228162514264337593543950335"), None);
        assert_eq!(parse_amount("0.0000001"), None);
        assert_eq!(parse_amount("2.5000000000"), Some(dec!(2.5)));
    }

    #[test]
    fn oversized_amount_reports_its_line() {
        let sheet = "Category,Amount,Notes\nVAT,22,\nExcise duties,79228162514264337593543950335,\n";
        match parse_sheet("Revenues", Cursor::new(sheet)) {
            Err(BudgetSourceError::InvalidAmount { sheet, line, value }) => {
                assert_eq!(sheet, "Revenues");
                assert_eq!(line, 3);
                assert_eq!(value, "79228162514264337593543950335");
            }
            other => panic!("expected InvalidAmount, got {other:?}"),
        }
    }

    #[test]
    fn bom_prefixed_header_is_accepted() {
        let sheet = "\u{feff}Category,Amount,Notes\nVAT,22,\n";
        let items = parse_sheet("Revenues", Cursor::new(sheet)).expect("sheet parses");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "VAT");
        assert_eq!(items[0].note, None);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let sheet = "Category,Amount,Notes\nVAT,22,standard rate\n,,\nExcise duties,6,\n";
        let items = parse_sheet("Revenues", Cursor::new(sheet)).expect("sheet parses");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].note.as_deref(), Some("standard rate"));
    }
}
