use crate::config::ConfigError;
use crate::fiscal::report::NarrativeError;
use crate::fiscal::FiscalError;
use crate::telemetry::TelemetryError;
use crate::vat::VatModelError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Fiscal(FiscalError),
    Vat(VatModelError),
    Narrative(NarrativeError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fiscal(FiscalError::CategoryNotFound { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Fiscal(FiscalError::TableKindMismatch { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Fiscal(_) | AppError::Vat(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Narrative(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Fiscal(err) => write!(f, "fiscal error: {}", err),
            AppError::Vat(err) => write!(f, "vat model error: {}", err),
            AppError::Narrative(err) => write!(f, "narrative error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Fiscal(err) => Some(err),
            AppError::Vat(err) => Some(err),
            AppError::Narrative(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<FiscalError> for AppError {
    fn from(value: FiscalError) -> Self {
        Self::Fiscal(value)
    }
}

impl From<VatModelError> for AppError {
    fn from(value: VatModelError) -> Self {
        Self::Vat(value)
    }
}

impl From<NarrativeError> for AppError {
    fn from(value: NarrativeError) -> Self {
        Self::Narrative(value)
    }
}
