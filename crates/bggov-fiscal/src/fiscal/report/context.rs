use super::views::as_percent;
use super::ScenarioReport;
use crate::fiscal::currency::DisplayCurrency;
use crate::fiscal::evaluator::FiscalVerdict;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Plain-text rendering handed to the external text generator as context.
pub fn render_context(report: &ScenarioReport, currency: DisplayCurrency) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "BGGovAI fiscal scenario (DEMO)");
    if report.policies.is_empty() {
        let _ = writeln!(out, "Measures: none (baseline)");
    } else {
        let labels: Vec<&str> = report.policies.iter().map(|policy| policy.label).collect();
        let _ = writeln!(out, "Measures: {}", labels.join("; "));
    }
    let _ = writeln!(
        out,
        "Intensity: {}%",
        (report.intensity * Decimal::ONE_HUNDRED).normalize()
    );
    let _ = writeln!(out, "GDP: {}", currency.format_billions(report.gdp));

    let _ = writeln!(out, "\nBaseline");
    write_verdict(&mut out, &report.baseline, currency);

    let _ = writeln!(out, "\nScenario");
    write_verdict(&mut out, &report.verdict, currency);

    if !report.result.applied_notes.is_empty() {
        let _ = writeln!(out, "\nApplied changes");
        for note in &report.result.applied_notes {
            let _ = writeln!(out, "- {note}");
        }
    }

    if report.compensation.is_empty() {
        let _ = writeln!(out, "\nDeficit target (3% of GDP) met; no compensation needed.");
    } else {
        let _ = writeln!(out, "\nCompensation packages");
        for package in &report.compensation {
            let _ = writeln!(
                out,
                "- {}: resulting deficit {} ({}% of GDP), unclosed gap {}",
                package.name,
                currency.format_billions(package.resulting_deficit),
                as_percent(package.resulting_deficit / report.gdp),
                currency.format_billions(package.unclosed_gap),
            );
            for action in &package.actions {
                let _ = writeln!(out, "  * {action}");
            }
        }
    }

    out
}

fn write_verdict(out: &mut String, verdict: &FiscalVerdict, currency: DisplayCurrency) {
    let _ = writeln!(
        out,
        "- Revenue {} | Expenditure {} | Deficit {}",
        currency.format_billions(verdict.total_revenue),
        currency.format_billions(verdict.total_expenditure),
        currency.format_billions(verdict.deficit),
    );
    let _ = writeln!(
        out,
        "- Deficit {}% of GDP {} | Debt {}% of GDP {} | Overall: {}",
        as_percent(verdict.deficit_ratio),
        verdict.deficit_light.symbol(),
        as_percent(verdict.debt_ratio),
        verdict.debt_light.symbol(),
        verdict.overall.label(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::budget::FiscalBaseline;
    use crate::fiscal::catalog::{PolicyCatalog, PolicyId};
    use crate::fiscal::report::run_scenario;
    use rust_decimal_macros::dec;

    #[test]
    fn context_lists_measures_lights_and_packages() {
        let report = run_scenario(
            &FiscalBaseline::demo(),
            &PolicyCatalog::standard(),
            &[PolicyId::from("pensions_plus_10")],
            dec!(1),
        )
        .expect("scenario runs");

        let text = render_context(&report, DisplayCurrency::Bgn);
        assert!(text.contains("Measures: Pensions +10%"));
        assert!(text.contains("Deficit 3.81% of GDP 🟨"));
        assert!(text.contains("Compensation packages"));
        assert!(text.contains("Capex deferral"));
    }

    #[test]
    fn baseline_context_reports_target_met() {
        let report = run_scenario(
            &FiscalBaseline::demo(),
            &PolicyCatalog::standard(),
            &[],
            dec!(1),
        )
        .expect("scenario runs");

        let text = render_context(&report, DisplayCurrency::Eur);
        assert!(text.contains("Measures: none (baseline)"));
        assert!(text.contains("no compensation needed"));
        assert!(text.contains("bn EUR"));
    }
}
