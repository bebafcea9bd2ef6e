mod context;
mod narrative;
pub mod views;

pub use context::render_context;
pub use narrative::{NarrativeError, NarrativeGenerator, TemplateNarrator};

use super::budget::FiscalBaseline;
use super::catalog::{PolicyCatalog, PolicyId};
use super::compensation::{plan, CompensationPackage};
use super::error::FiscalError;
use super::evaluator::{evaluate, evaluate_scenario, FiscalVerdict};
use super::scenario::{clamp_intensity, ScenarioEngine, ScenarioResult};
use rust_decimal::Decimal;
use views::{PolicyView, ScenarioSummary};

/// Everything a caller needs to present one evaluated scenario.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub policies: Vec<PolicyView>,
    pub intensity: Decimal,
    pub gdp: Decimal,
    pub baseline: FiscalVerdict,
    pub result: ScenarioResult,
    pub verdict: FiscalVerdict,
    pub compensation: Vec<CompensationPackage>,
}

impl ScenarioReport {
    pub fn summary(&self) -> ScenarioSummary {
        views::summarize(self)
    }
}

/// Runs the engine, the evaluator and the planner for one selection.
pub fn run_scenario(
    baseline: &FiscalBaseline,
    catalog: &PolicyCatalog,
    selected: &[PolicyId],
    intensity: Decimal,
) -> Result<ScenarioReport, FiscalError> {
    let intensity = clamp_intensity(intensity);
    let result = ScenarioEngine::new(catalog).apply(
        &baseline.revenue,
        &baseline.expenditure,
        selected,
        intensity,
    )?;

    let baseline_verdict = evaluate(
        baseline.revenue.total(),
        baseline.expenditure.total(),
        baseline.inputs.gdp(),
        baseline.inputs.debt_stock(),
    )?;
    let verdict = evaluate_scenario(&result, &baseline.inputs)?;
    let compensation = plan(
        baseline.inputs.gdp(),
        &result.adjusted_expenditure,
        verdict.deficit,
    )?;

    let policies = catalog
        .policies()
        .iter()
        .filter(|policy| selected.iter().any(|id| id.as_str() == policy.id))
        .map(PolicyView::from)
        .collect();

    Ok(ScenarioReport {
        policies,
        intensity,
        gdp: baseline.inputs.gdp(),
        baseline: baseline_verdict,
        result,
        verdict,
        compensation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::evaluator::TrafficLight;
    use rust_decimal_macros::dec;

    #[test]
    fn report_keeps_baseline_and_scenario_verdicts_apart() {
        let baseline = FiscalBaseline::demo();
        let catalog = PolicyCatalog::standard();

        let report = run_scenario(
            &baseline,
            &catalog,
            &[PolicyId::from("pensions_plus_10")],
            dec!(1),
        )
        .expect("scenario runs");

        assert_eq!(report.baseline.deficit, dec!(6));
        assert_eq!(report.baseline.deficit_light, TrafficLight::Green);
        assert_eq!(report.verdict.deficit, dec!(8));
        assert_eq!(report.verdict.deficit_light, TrafficLight::Yellow);
        assert_eq!(report.policies.len(), 1);
        assert_eq!(report.compensation.len(), 3);
    }

    #[test]
    fn intensity_is_reported_after_clamping() {
        let baseline = FiscalBaseline::demo();
        let catalog = PolicyCatalog::standard();

        let report = run_scenario(&baseline, &catalog, &[], dec!(3)).expect("scenario runs");
        assert_eq!(report.intensity, Decimal::ONE);
        assert!(report.compensation.is_empty());
    }
}
