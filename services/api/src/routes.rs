use crate::infra::{intensity_from_percent, AppState, BaselineSelection, BudgetUpload, DataSource};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use bggov_fiscal::error::AppError;
use bggov_fiscal::fiscal::report::render_context;
use bggov_fiscal::fiscal::report::views::{PolicyView, ScenarioSummary};
use bggov_fiscal::fiscal::{run_scenario, DisplayCurrency, PolicyId, ScenarioReport};
use bggov_fiscal::intent::{self, Answer};
use bggov_fiscal::vat::{
    calc_scenario, traffic_lights, ScenarioPreset, VatAssumptions, VatLights, VatMeasure,
    VatModelDefaults, VatOutcome,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

const FULL_INTENSITY_PCT: u8 = 100;

fn full_intensity() -> u8 {
    FULL_INTENSITY_PCT
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScenarioRequest {
    #[serde(default)]
    pub(crate) policies: Vec<PolicyId>,
    #[serde(default = "full_intensity")]
    pub(crate) intensity_pct: u8,
    #[serde(default)]
    pub(crate) budget: Option<BudgetUpload>,
    #[serde(default)]
    pub(crate) include_narrative: bool,
    #[serde(default)]
    pub(crate) currency: Option<DisplayCurrency>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScenarioResponse {
    pub(crate) evaluated_on: NaiveDate,
    pub(crate) data_source: DataSource,
    #[serde(flatten)]
    pub(crate) summary: ScenarioSummary,
    pub(crate) display: DisplayTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) narrative: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) warnings: Vec<String>,
}

/// Headline amounts rendered in the requested display currency.
#[derive(Debug, Serialize)]
pub(crate) struct DisplayTotals {
    pub(crate) currency: DisplayCurrency,
    pub(crate) gdp: String,
    pub(crate) baseline_deficit: String,
    pub(crate) scenario_revenue: String,
    pub(crate) scenario_expenditure: String,
    pub(crate) scenario_deficit: String,
}

impl DisplayTotals {
    fn new(report: &ScenarioReport, currency: DisplayCurrency) -> Self {
        Self {
            currency,
            gdp: currency.format_billions(report.gdp),
            baseline_deficit: currency.format_billions(report.baseline.deficit),
            scenario_revenue: currency.format_billions(report.verdict.total_revenue),
            scenario_expenditure: currency.format_billions(report.verdict.total_expenditure),
            scenario_deficit: currency.format_billions(report.verdict.deficit),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AskRequest {
    #[serde(default)]
    pub(crate) question: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VatRequest {
    #[serde(default)]
    pub(crate) preset: Option<ScenarioPreset>,
    /// Overrides the preset when present.
    #[serde(default)]
    pub(crate) assumptions: Option<VatAssumptions>,
    #[serde(default)]
    pub(crate) measure: Option<VatMeasure>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VatResponse {
    pub(crate) scenario: String,
    pub(crate) measure: VatMeasure,
    pub(crate) assumptions: VatAssumptions,
    pub(crate) outcome: VatOutcome,
    pub(crate) lights: VatLights,
    pub(crate) presets: Vec<VatPresetRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VatPresetRow {
    pub(crate) preset: ScenarioPreset,
    pub(crate) label: &'static str,
    pub(crate) outcome: VatOutcome,
    pub(crate) lights: VatLights,
}

pub(crate) fn fiscal_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/fiscal/policies",
            axum::routing::get(policies_endpoint),
        )
        .route(
            "/api/v1/fiscal/scenario",
            axum::routing::post(scenario_endpoint),
        )
        .route("/api/v1/ask", axum::routing::post(ask_endpoint))
        .route(
            "/api/v1/vat/restaurants",
            axum::routing::post(vat_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn policies_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<PolicyView>> {
    Json(
        state
            .fiscal
            .catalog
            .policies()
            .iter()
            .map(PolicyView::from)
            .collect(),
    )
}

pub(crate) async fn scenario_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScenarioRequest>,
) -> Result<Json<ScenarioResponse>, AppError> {
    let ScenarioRequest {
        policies,
        intensity_pct,
        budget,
        include_narrative,
        currency,
    } = payload;

    let fiscal = &state.fiscal;
    let uploaded = budget.map(BaselineSelection::from_upload).transpose()?;
    let selection = uploaded.as_ref().unwrap_or(&fiscal.baseline);
    let mut warnings = selection.warnings.clone();

    let report = run_scenario(
        &selection.baseline,
        &fiscal.catalog,
        &policies,
        intensity_from_percent(intensity_pct),
    )?;
    let currency = currency.unwrap_or(fiscal.currency);

    let narrative = if include_narrative {
        let context = render_context(&report, currency);
        match fiscal.narrator.explain(&context) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, "narrative generation failed");
                warnings.push(format!("narrative unavailable: {err}"));
                None
            }
        }
    } else {
        None
    };

    info!(
        policies = policies.len(),
        intensity_pct,
        overall = report.verdict.overall.label(),
        "scenario evaluated"
    );

    Ok(Json(ScenarioResponse {
        evaluated_on: Local::now().date_naive(),
        data_source: selection.source,
        display: DisplayTotals::new(&report, currency),
        summary: report.summary(),
        narrative,
        warnings,
    }))
}

pub(crate) async fn ask_endpoint(Json(payload): Json<AskRequest>) -> Json<Answer> {
    Json(intent::answer(&payload.question))
}

pub(crate) async fn vat_endpoint(
    Json(payload): Json<VatRequest>,
) -> Result<Json<VatResponse>, AppError> {
    let defaults = VatModelDefaults::demo();
    let measure = payload.measure.unwrap_or_else(|| defaults.measure());
    let preset = payload.preset.unwrap_or(ScenarioPreset::Base);
    let (scenario, assumptions) = match payload.assumptions {
        Some(custom) => ("Custom".to_string(), custom),
        None => (preset.label().to_string(), defaults.preset(preset)),
    };

    let outcome = calc_scenario(&measure, &assumptions)?;
    let presets = ScenarioPreset::ordered()
        .into_iter()
        .map(|preset| {
            let outcome = calc_scenario(&measure, &defaults.preset(preset))?;
            Ok(VatPresetRow {
                preset,
                label: preset.label(),
                lights: traffic_lights(&outcome),
                outcome,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Json(VatResponse {
        scenario,
        measure,
        assumptions,
        lights: traffic_lights(&outcome),
        outcome,
        presets,
    }))
}
