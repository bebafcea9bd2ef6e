pub mod budget;
pub mod catalog;
mod compensation;
pub mod currency;
mod error;
mod evaluator;
pub mod report;
mod scenario;
pub mod source;

pub use budget::{BudgetKind, BudgetTable, FiscalBaseline, FiscalInputs, LineItem};
pub use catalog::{PolicyCatalog, PolicyDefinition, PolicyEffect, PolicyId};
pub use compensation::{plan, CompensationPackage};
pub use currency::DisplayCurrency;
pub use error::FiscalError;
pub use evaluator::{
    evaluate, evaluate_scenario, FiscalVerdict, OverallStatus, TrafficLight, DEBT_GREEN_MAX,
    DEBT_YELLOW_MAX, DEFICIT_GREEN_MAX, DEFICIT_YELLOW_MAX,
};
pub use report::{run_scenario, ScenarioReport};
pub use scenario::{clamp_intensity, ScenarioEngine, ScenarioResult};
pub use source::{BudgetSheets, BudgetSourceError, BudgetSourceLoader};
