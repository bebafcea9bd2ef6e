use crate::infra::{intensity_from_percent, BaselineSelection, DataSource};
use bggov_fiscal::config::AppConfig;
use bggov_fiscal::error::AppError;
use bggov_fiscal::fiscal::report::views::{as_percent, ScenarioSummary};
use bggov_fiscal::fiscal::report::{render_context, NarrativeGenerator, TemplateNarrator};
use bggov_fiscal::fiscal::{
    run_scenario, DisplayCurrency, FiscalVerdict, PolicyCatalog, PolicyId, ScenarioReport,
};
use bggov_fiscal::intent;
use bggov_fiscal::vat::{
    calc_scenario, traffic_lights, ScenarioPreset, VatAssumptions, VatMeasure, VatModelDefaults,
    VatOutcome,
};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Catalog id of a measure to apply; repeat for several
    #[arg(long = "policy")]
    pub(crate) policies: Vec<String>,
    /// Implementation intensity in percent
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) intensity: u8,
    /// Directory holding Inputs.csv, Revenues.csv and Expenditures.csv
    #[arg(long)]
    pub(crate) budget_dir: Option<PathBuf>,
    /// Display currency (bgn or eur); defaults to APP_CURRENCY
    #[arg(long)]
    pub(crate) currency: Option<DisplayCurrency>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Append the template narrative explanation
    #[arg(long)]
    pub(crate) narrative: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub(crate) question: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct VatArgs {
    /// Current VAT rate as a fraction, e.g. 0.09
    #[arg(long)]
    pub(crate) vat_from: Option<Decimal>,
    /// New VAT rate as a fraction, e.g. 0.20
    #[arg(long)]
    pub(crate) vat_to: Option<Decimal>,
    /// Restaurant share of sector I turnover
    #[arg(long)]
    pub(crate) share: Option<Decimal>,
    /// Share of the VAT change passed on to prices
    #[arg(long)]
    pub(crate) passthrough: Option<Decimal>,
    /// Price elasticity of demand
    #[arg(long)]
    pub(crate) elasticity: Option<Decimal>,
    /// Change in the declared tax base
    #[arg(long)]
    pub(crate) compliance: Option<Decimal>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Display currency (bgn or eur)
    #[arg(long)]
    pub(crate) currency: Option<DisplayCurrency>,
}

#[derive(Debug, Serialize)]
struct EvaluationOutput {
    data_source: DataSource,
    currency: DisplayCurrency,
    #[serde(flatten)]
    summary: ScenarioSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        policies,
        intensity,
        budget_dir,
        currency,
        json,
        narrative,
    } = args;

    let config = AppConfig::load()?;
    let budget_dir = budget_dir.or(config.fiscal.budget_dir);
    let currency = currency.unwrap_or(config.fiscal.currency);

    let selection = BaselineSelection::from_dir(budget_dir.as_deref())?;
    let catalog = PolicyCatalog::standard();
    let policies: Vec<PolicyId> = policies.iter().map(|id| PolicyId::from(id.as_str())).collect();
    let report = run_scenario(
        &selection.baseline,
        &catalog,
        &policies,
        intensity_from_percent(intensity),
    )?;

    if json {
        let output = EvaluationOutput {
            data_source: selection.source,
            currency,
            summary: report.summary(),
            warnings: selection.warnings,
        };
        let rendered = serde_json::to_string_pretty(&output).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    for warning in &selection.warnings {
        println!("warning: {warning}");
    }
    render_scenario(&report, currency);

    if narrative {
        let text = TemplateNarrator.explain(&render_context(&report, currency))?;
        println!("\n{text}");
    }

    Ok(())
}

pub(crate) fn run_policies() -> Result<(), AppError> {
    let catalog = PolicyCatalog::standard();
    println!("Policy catalog ({} measures)", catalog.len());
    for policy in catalog.policies() {
        println!(
            "- {:<22} {} [{}: {}]",
            policy.id,
            policy.label,
            policy.effect.table_kind().label(),
            policy.effect.target_categories().join(", ")
        );
    }
    Ok(())
}

pub(crate) fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let question = args.question.join(" ");
    let answer = intent::answer(&question);
    println!("[{}] {}", answer.domain, answer.title);
    println!("{}", answer.body);
    Ok(())
}

pub(crate) fn run_vat(args: VatArgs) -> Result<(), AppError> {
    let defaults = VatModelDefaults::demo();
    let mut measure = defaults.measure();
    if let Some(rate) = args.vat_from {
        measure.vat_from = rate;
    }
    if let Some(rate) = args.vat_to {
        measure.vat_to = rate;
    }

    render_vat_header(&measure, &defaults);
    for preset in ScenarioPreset::ordered() {
        let outcome = calc_scenario(&measure, &defaults.preset(preset))?;
        render_vat_row(preset.label(), &outcome);
    }

    let custom = VatAssumptions {
        share: args.share.unwrap_or(defaults.custom.share),
        passthrough: args.passthrough.unwrap_or(defaults.custom.passthrough),
        elasticity: args.elasticity.unwrap_or(defaults.custom.elasticity),
        compliance: args.compliance.unwrap_or(defaults.custom.compliance),
    };
    if custom != defaults.custom {
        let outcome = calc_scenario(&measure, &custom)?;
        render_vat_row("Custom", &outcome);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let currency = args.currency.unwrap_or_default();
    let selection = BaselineSelection::builtin();
    let catalog = PolicyCatalog::standard();

    println!("BGGovAI fiscal what-if demo (DEMO figures, not official statistics)");

    let walkthrough: [(&str, Vec<PolicyId>, u8); 3] = [
        ("Baseline", Vec::new(), 100),
        (
            "Pensions +10%",
            vec![PolicyId::from("pensions_plus_10")],
            100,
        ),
        (
            "Full package at half strength",
            catalog.policies().iter().map(|policy| policy.policy_id()).collect(),
            50,
        ),
    ];

    for (title, policies, intensity) in walkthrough {
        println!("\n=== {title} ===");
        let report = run_scenario(
            &selection.baseline,
            &catalog,
            &policies,
            intensity_from_percent(intensity),
        )?;
        render_scenario(&report, currency);
    }

    println!("\n=== Restaurant VAT 9% -> 20% ===");
    run_vat(VatArgs::default())?;

    println!("\n=== Question router ===");
    for question in [
        "Какъв е ефектът от ДДС 9% за ресторанти?",
        "Как се сменя МОЛ на ЕООД?",
        "Ще удържим ли дефицита под 3%?",
    ] {
        let answer = intent::answer(question);
        println!("- {question} -> [{}] {}", answer.domain, answer.title);
    }

    Ok(())
}

fn render_scenario(report: &ScenarioReport, currency: DisplayCurrency) {
    if report.policies.is_empty() {
        println!("Measures: none");
    } else {
        let labels: Vec<&str> = report.policies.iter().map(|policy| policy.label).collect();
        println!("Measures: {}", labels.join("; "));
    }
    println!(
        "Intensity: {}%",
        (report.intensity * Decimal::ONE_HUNDRED).normalize()
    );
    println!("GDP: {}", currency.format_billions(report.gdp));

    render_verdict("Baseline", &report.baseline, currency);
    render_verdict("Scenario", &report.verdict, currency);

    if !report.result.applied_notes.is_empty() {
        println!("Applied changes:");
        for note in &report.result.applied_notes {
            println!("  - {note}");
        }
    }

    if report.compensation.is_empty() {
        println!("Deficit within 3% of GDP; no compensation needed.");
        return;
    }

    println!("Compensation packages:");
    for package in &report.compensation {
        println!(
            "  - {}: deficit {} ({}% of GDP), unclosed {}",
            package.name,
            currency.format_billions(package.resulting_deficit),
            as_percent(package.resulting_deficit / report.gdp),
            currency.format_billions(package.unclosed_gap)
        );
        for action in &package.actions {
            println!("      * {action}");
        }
    }
}

fn render_verdict(title: &str, verdict: &FiscalVerdict, currency: DisplayCurrency) {
    println!(
        "{title}: revenue {} | expenditure {} | deficit {} ({}% {}) | debt {}% {} | {}",
        currency.format_billions(verdict.total_revenue),
        currency.format_billions(verdict.total_expenditure),
        currency.format_billions(verdict.deficit),
        as_percent(verdict.deficit_ratio),
        verdict.deficit_light.symbol(),
        as_percent(verdict.debt_ratio),
        verdict.debt_light.symbol(),
        verdict.overall.label()
    );
}

fn render_vat_header(measure: &VatMeasure, defaults: &VatModelDefaults) {
    println!(
        "VAT {}% -> {}% on sector I turnover {} BGN ({} employed)",
        as_percent(measure.vat_from).normalize(),
        as_percent(measure.vat_to).normalize(),
        measure.turnover_sector_i.normalize(),
        defaults.employment_sector_i
    );
    println!(
        "{:<12} {:>16} {:>10} {:>10}  lights (fiscal/prices/sector)",
        "scenario", "fiscal gain", "prices", "volume"
    );
}

fn render_vat_row(label: &str, outcome: &VatOutcome) {
    let lights = traffic_lights(outcome);
    println!(
        "{:<12} {:>16} {:>9}% {:>9}%  {}{}{}",
        label,
        outcome.fiscal_gain.round_dp(0),
        as_percent(outcome.price_change),
        as_percent(outcome.volume_change),
        lights.fiscal.symbol(),
        lights.prices.symbol(),
        lights.sector.symbol()
    );
}
