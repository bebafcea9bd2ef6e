use super::budget::{categories, BudgetTable};
use super::error::FiscalError;
use super::evaluator::DEFICIT_GREEN_MAX;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

/// Largest share of capital spending a deferral package may remove.
const CAPEX_DEFERRAL_CAP: Decimal = dec!(0.25);
/// Share of the gap closed by timing and administrative levers.
const PHASED_ROLLOUT_SHARE: Decimal = dec!(0.60);
const COLLECTION_SHARE: Decimal = dec!(0.50);
const EFFICIENCY_SHARE: Decimal = dec!(0.30);

const PLANNER_SOURCE: &str = "compensation planner";

/// A mitigation package, evaluated independently of the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompensationPackage {
    pub name: &'static str,
    pub actions: Vec<String>,
    pub resulting_deficit: Decimal,
    /// Part of the gap to target this package leaves open.
    pub unclosed_gap: Decimal,
}

/// Proposes mitigation packages when `deficit` exceeds the 3%-of-GDP target.
///
/// Returns an empty list when the target is already met, including exactly at the
/// boundary.
pub fn plan(
    gdp: Decimal,
    expenditure: &BudgetTable,
    deficit: Decimal,
) -> Result<Vec<CompensationPackage>, FiscalError> {
    if gdp <= Decimal::ZERO {
        return Err(FiscalError::InvalidGdp(gdp));
    }

    let target = DEFICIT_GREEN_MAX * gdp;
    if deficit <= target {
        return Ok(Vec::new());
    }

    let gap = deficit - target;
    let capex = expenditure
        .amount(categories::CAPITAL_EXPENDITURE)
        .ok_or_else(|| {
            FiscalError::category_not_found(categories::CAPITAL_EXPENDITURE, PLANNER_SOURCE)
        })?;

    debug!(%deficit, %target, %gap, "planning compensation packages");

    Ok(vec![
        capex_deferral(deficit, gap, capex),
        phased_rollout(deficit, gap),
        collection_and_efficiency(deficit, gap),
    ])
}

fn capex_deferral(deficit: Decimal, gap: Decimal, capex: Decimal) -> CompensationPackage {
    let ceiling = (CAPEX_DEFERRAL_CAP * capex).max(Decimal::ZERO);
    let cut = gap.min(ceiling);

    CompensationPackage {
        name: "Capex deferral",
        actions: vec![
            format!(
                "Defer {} of capital projects to the next budget year",
                cut.round_dp(2).normalize()
            ),
            format!(
                "Keep at least {}% of the capital programme on schedule",
                ((Decimal::ONE - CAPEX_DEFERRAL_CAP) * Decimal::ONE_HUNDRED).normalize()
            ),
        ],
        resulting_deficit: deficit - cut,
        unclosed_gap: gap - cut,
    }
}

fn phased_rollout(deficit: Decimal, gap: Decimal) -> CompensationPackage {
    let closed = gap * PHASED_ROLLOUT_SHARE;

    CompensationPackage {
        name: "Phased rollout",
        actions: vec![
            "Phase the measure in over two budget years".to_string(),
            "Move the start date to mid-year".to_string(),
            format!(
                "Timing and administrative levers close {} ({}% of the gap)",
                closed.round_dp(2).normalize(),
                (PHASED_ROLLOUT_SHARE * Decimal::ONE_HUNDRED).normalize()
            ),
        ],
        resulting_deficit: deficit - closed,
        unclosed_gap: gap - closed,
    }
}

fn collection_and_efficiency(deficit: Decimal, gap: Decimal) -> CompensationPackage {
    let collection = gap * COLLECTION_SHARE;
    let efficiency = gap * EFFICIENCY_SHARE;
    let closed = collection + efficiency;

    CompensationPackage {
        name: "Collection + efficiency",
        actions: vec![
            format!(
                "Raise revenue collection by {} (e-receipts, grey-economy controls)",
                collection.round_dp(2).normalize()
            ),
            format!(
                "Cut {} through spending reviews and procurement efficiency",
                efficiency.round_dp(2).normalize()
            ),
        ],
        resulting_deficit: deficit - closed,
        unclosed_gap: gap - closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::budget::{BudgetKind, FiscalBaseline, LineItem};

    #[test]
    fn target_met_exactly_yields_no_packages() {
        let baseline = FiscalBaseline::demo();
        let packages = plan(dec!(210), &baseline.expenditure, dec!(6.3)).expect("plans");
        assert!(packages.is_empty());

        let packages = plan(dec!(100), &baseline.expenditure, dec!(3)).expect("plans");
        assert!(packages.is_empty());
    }

    #[test]
    fn packages_are_independent_and_surface_the_residual() {
        let baseline = FiscalBaseline::demo();
        // gap = 8 - 6.3 = 1.7
        let packages = plan(dec!(210), &baseline.expenditure, dec!(8)).expect("plans");
        assert_eq!(packages.len(), 3);

        let capex = &packages[0];
        assert_eq!(capex.name, "Capex deferral");
        assert_eq!(capex.resulting_deficit, dec!(6.3));
        assert_eq!(capex.unclosed_gap, Decimal::ZERO);

        let phased = &packages[1];
        assert_eq!(phased.resulting_deficit, dec!(6.98));
        assert_eq!(phased.unclosed_gap, dec!(0.68));

        let mixed = &packages[2];
        assert_eq!(mixed.resulting_deficit, dec!(6.64));
        assert_eq!(mixed.unclosed_gap, dec!(0.34));
    }

    #[test]
    fn capex_cut_never_exceeds_a_quarter_of_capital_spending() {
        let expenditure = BudgetTable::new(
            BudgetKind::Expenditure,
            vec![LineItem::new(categories::CAPITAL_EXPENDITURE, dec!(4))],
        )
        .expect("valid table");

        // gap = 10 - 3 = 7, cap = 1
        let packages = plan(dec!(100), &expenditure, dec!(10)).expect("plans");
        assert_eq!(packages[0].resulting_deficit, dec!(9));
        assert_eq!(packages[0].unclosed_gap, dec!(6));
    }

    #[test]
    fn missing_capex_line_is_reported() {
        let expenditure = BudgetTable::new(
            BudgetKind::Expenditure,
            vec![LineItem::new("Капиталови разходи", dec!(17))],
        )
        .expect("valid table");

        let err = plan(dec!(100), &expenditure, dec!(10)).expect_err("capex line required");
        assert!(matches!(
            err,
            FiscalError::CategoryNotFound { ref category, .. } if category == categories::CAPITAL_EXPENDITURE
        ));
    }

    #[test]
    fn invalid_gdp_is_rejected() {
        let baseline = FiscalBaseline::demo();
        assert!(matches!(
            plan(Decimal::ZERO, &baseline.expenditure, dec!(8)),
            Err(FiscalError::InvalidGdp(_))
        ));
    }
}
