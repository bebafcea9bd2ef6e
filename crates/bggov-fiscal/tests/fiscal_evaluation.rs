use bggov_fiscal::fiscal::report::{render_context, NarrativeGenerator, TemplateNarrator};
use bggov_fiscal::fiscal::{
    evaluate, plan, run_scenario, BudgetKind, BudgetTable, DisplayCurrency, FiscalBaseline,
    FiscalError, LineItem, OverallStatus, PolicyCatalog, PolicyId, TrafficLight,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn demo_baseline_is_sustainable() {
    let verdict = evaluate(dec!(92), dec!(98), dec!(210), dec!(50)).expect("valid gdp");

    assert_eq!(verdict.deficit, dec!(6));
    assert_eq!(verdict.deficit_light, TrafficLight::Green);
    assert_eq!(verdict.debt_light, TrafficLight::Green);
    assert_eq!(verdict.overall, OverallStatus::Sustainable);
}

#[test]
fn pension_increase_pushes_deficit_into_yellow_and_triggers_planning() {
    let baseline = FiscalBaseline::demo();
    let catalog = PolicyCatalog::standard();

    let report = run_scenario(
        &baseline,
        &catalog,
        &[PolicyId::from("pensions_plus_10")],
        Decimal::ONE,
    )
    .expect("scenario runs");

    assert_eq!(report.verdict.total_expenditure, dec!(100));
    assert_eq!(report.verdict.deficit, dec!(8));
    assert_eq!(report.verdict.deficit_light, TrafficLight::Yellow);
    assert_eq!(report.verdict.overall, OverallStatus::AtRisk);
    assert!(!report.compensation.is_empty());
    assert!(report
        .compensation
        .iter()
        .all(|package| package.resulting_deficit < report.verdict.deficit));
}

#[test]
fn full_package_turns_critical() {
    let baseline = FiscalBaseline::demo();
    let catalog = PolicyCatalog::standard();
    let selected: Vec<PolicyId> = catalog
        .policies()
        .iter()
        .map(|policy| policy.policy_id())
        .collect();

    let report = run_scenario(&baseline, &catalog, &selected, Decimal::ONE).expect("runs");

    assert_eq!(report.verdict.total_revenue, dec!(92.2));
    assert_eq!(report.verdict.total_expenditure, dec!(102.6));
    assert_eq!(report.verdict.deficit_light, TrafficLight::Red);
    assert_eq!(report.verdict.overall, OverallStatus::Critical);

    let capex = report
        .compensation
        .iter()
        .find(|package| package.name == "Capex deferral")
        .expect("capex package proposed");
    assert_eq!(capex.resulting_deficit, dec!(6.3));
    assert_eq!(capex.unclosed_gap, Decimal::ZERO);
}

#[test]
fn deficit_exactly_on_target_needs_no_compensation() {
    let expenditure = BudgetTable::new(
        BudgetKind::Expenditure,
        vec![
            LineItem::new("Pensions", dec!(80)),
            LineItem::new("Capital expenditure", dec!(20)),
        ],
    )
    .expect("valid table");

    let verdict = evaluate(dec!(94), expenditure.total(), dec!(200), dec!(120)).expect("valid");
    assert_eq!(verdict.deficit_light, TrafficLight::Green);
    assert_eq!(verdict.debt_light, TrafficLight::Green);

    let packages = plan(dec!(200), &expenditure, verdict.deficit).expect("plans");
    assert!(packages.is_empty());
}

#[test]
fn debt_breakpoints_are_inclusive() {
    let at_yellow = evaluate(dec!(100), dec!(100), dec!(200), dec!(140)).expect("valid");
    assert_eq!(at_yellow.debt_light, TrafficLight::Yellow);

    let past_yellow = evaluate(dec!(100), dec!(100), dec!(200), dec!(140.2)).expect("valid");
    assert_eq!(past_yellow.debt_light, TrafficLight::Red);
    assert_eq!(past_yellow.overall, OverallStatus::Critical);
}

#[test]
fn non_positive_gdp_is_rejected() {
    assert!(matches!(
        evaluate(dec!(92), dec!(98), Decimal::ZERO, dec!(50)),
        Err(FiscalError::InvalidGdp(_))
    ));
}

#[test]
fn narrative_only_restates_the_rendered_context() {
    let baseline = FiscalBaseline::demo();
    let catalog = PolicyCatalog::standard();
    let report = run_scenario(
        &baseline,
        &catalog,
        &[PolicyId::from("pensions_plus_10")],
        Decimal::ONE,
    )
    .expect("scenario runs");

    let context = render_context(&report, DisplayCurrency::Eur);
    assert!(context.contains("EUR"));

    let narrative = TemplateNarrator.explain(&context).expect("template narrative");
    assert!(narrative.contains("At Risk"));
}
