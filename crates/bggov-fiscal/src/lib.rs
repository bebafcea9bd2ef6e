//! Deterministic fiscal what-if engine for the BGGovAI demos: budget tables, a policy
//! catalog, threshold evaluation and compensation planning, plus the restaurant VAT model
//! and the keyword question router.

pub mod config;
pub mod error;
pub mod fiscal;
pub mod intent;
pub mod telemetry;
pub mod vat;
