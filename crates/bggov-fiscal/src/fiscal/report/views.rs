use super::ScenarioReport;
use crate::fiscal::budget::LineItem;
use crate::fiscal::catalog::PolicyDefinition;
use crate::fiscal::compensation::CompensationPackage;
use crate::fiscal::evaluator::{FiscalVerdict, OverallStatus, TrafficLight};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PolicyView {
    pub id: &'static str,
    pub label: &'static str,
    pub table: &'static str,
    pub targets: Vec<&'static str>,
}

impl From<&PolicyDefinition> for PolicyView {
    fn from(policy: &PolicyDefinition) -> Self {
        Self {
            id: policy.id,
            label: policy.label,
            table: policy.effect.table_kind().label(),
            targets: policy.effect.target_categories(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictView {
    pub total_revenue: Decimal,
    pub total_expenditure: Decimal,
    pub deficit: Decimal,
    pub deficit_pct_gdp: Decimal,
    pub debt_pct_gdp: Decimal,
    pub deficit_light: TrafficLight,
    pub deficit_light_label: &'static str,
    pub debt_light: TrafficLight,
    pub debt_light_label: &'static str,
    pub overall: OverallStatus,
    pub overall_label: &'static str,
}

impl From<&FiscalVerdict> for VerdictView {
    fn from(verdict: &FiscalVerdict) -> Self {
        Self {
            total_revenue: verdict.total_revenue,
            total_expenditure: verdict.total_expenditure,
            deficit: verdict.deficit,
            deficit_pct_gdp: as_percent(verdict.deficit_ratio),
            debt_pct_gdp: as_percent(verdict.debt_ratio),
            deficit_light: verdict.deficit_light,
            deficit_light_label: verdict.deficit_light.label(),
            debt_light: verdict.debt_light,
            debt_light_label: verdict.debt_light.label(),
            overall: verdict.overall,
            overall_label: verdict.overall.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub policies: Vec<PolicyView>,
    pub intensity_pct: Decimal,
    pub baseline: VerdictView,
    pub scenario: VerdictView,
    pub applied_notes: Vec<String>,
    pub revenue: Vec<LineItem>,
    pub expenditure: Vec<LineItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compensation: Vec<CompensationPackage>,
}

pub(super) fn summarize(report: &ScenarioReport) -> ScenarioSummary {
    ScenarioSummary {
        policies: report.policies.clone(),
        intensity_pct: (report.intensity * Decimal::ONE_HUNDRED).normalize(),
        baseline: VerdictView::from(&report.baseline),
        scenario: VerdictView::from(&report.verdict),
        applied_notes: report.result.applied_notes.clone(),
        revenue: report.result.adjusted_revenue.items().to_vec(),
        expenditure: report.result.adjusted_expenditure.items().to_vec(),
        compensation: report.compensation.clone(),
    }
}

/// Ratio as a percentage rounded to two decimals, e.g. `0.0381` -> `3.81`.
pub fn as_percent(ratio: Decimal) -> Decimal {
    (ratio * Decimal::ONE_HUNDRED).round_dp(2)
}
