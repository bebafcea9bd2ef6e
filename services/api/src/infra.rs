use bggov_fiscal::fiscal::report::{NarrativeGenerator, TemplateNarrator};
use bggov_fiscal::fiscal::{
    BudgetSheets, BudgetSourceLoader, DisplayCurrency, FiscalBaseline, FiscalError,
    PolicyCatalog,
};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) fiscal: Arc<FiscalContext>,
}

/// Read-only inputs shared by every request. Scenarios never write back into them.
pub(crate) struct FiscalContext {
    pub(crate) catalog: PolicyCatalog,
    pub(crate) baseline: BaselineSelection,
    pub(crate) currency: DisplayCurrency,
    pub(crate) narrator: Arc<dyn NarrativeGenerator>,
}

impl FiscalContext {
    pub(crate) fn new(baseline: BaselineSelection, currency: DisplayCurrency) -> Self {
        Self {
            catalog: PolicyCatalog::standard(),
            baseline,
            currency,
            narrator: Arc::new(TemplateNarrator),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DataSource {
    Builtin,
    Directory,
    Uploaded,
    BuiltinFallback,
}

#[derive(Debug, Clone)]
pub(crate) struct BaselineSelection {
    pub(crate) baseline: FiscalBaseline,
    pub(crate) source: DataSource,
    pub(crate) warnings: Vec<String>,
}

impl BaselineSelection {
    pub(crate) fn builtin() -> Self {
        Self {
            baseline: FiscalBaseline::demo(),
            source: DataSource::Builtin,
            warnings: Vec::new(),
        }
    }

    /// Loads a workbook directory, or the built-in baseline when no directory is given.
    pub(crate) fn from_dir(dir: Option<&Path>) -> Result<Self, FiscalError> {
        let Some(dir) = dir else {
            return Ok(Self::builtin());
        };
        fallback_on_malformed(
            BudgetSourceLoader::from_dir(dir),
            DataSource::Directory,
            &dir.display().to_string(),
        )
    }

    pub(crate) fn from_upload(upload: BudgetUpload) -> Result<Self, FiscalError> {
        let sheets = BudgetSheets {
            inputs: Cursor::new(upload.inputs_csv.into_bytes()),
            revenues: Cursor::new(upload.revenues_csv.into_bytes()),
            expenditures: Cursor::new(upload.expenditures_csv.into_bytes()),
        };
        fallback_on_malformed(
            BudgetSourceLoader::from_readers(sheets),
            DataSource::Uploaded,
            "uploaded workbook",
        )
    }
}

/// Only structural problems fall back; invalid figures in a well-formed workbook are
/// returned to the caller.
fn fallback_on_malformed(
    loaded: Result<FiscalBaseline, FiscalError>,
    source: DataSource,
    origin: &str,
) -> Result<BaselineSelection, FiscalError> {
    match loaded {
        Ok(baseline) => Ok(BaselineSelection {
            baseline,
            source,
            warnings: Vec::new(),
        }),
        Err(FiscalError::MalformedBudgetSource(err)) => {
            warn!(%origin, error = %err, "budget source rejected, using built-in baseline");
            Ok(BaselineSelection {
                baseline: FiscalBaseline::demo(),
                source: DataSource::BuiltinFallback,
                warnings: vec![format!(
                    "{origin} could not be used ({err}); showing the built-in DEMO baseline"
                )],
            })
        }
        Err(err) => Err(err),
    }
}

/// The three workbook sheets exported as CSV text.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BudgetUpload {
    pub(crate) inputs_csv: String,
    pub(crate) revenues_csv: String,
    pub(crate) expenditures_csv: String,
}

pub(crate) fn intensity_from_percent(percent: u8) -> Decimal {
    Decimal::from(percent) / Decimal::ONE_HUNDRED
}
