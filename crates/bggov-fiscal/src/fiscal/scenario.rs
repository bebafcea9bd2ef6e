use super::budget::{BudgetKind, BudgetTable};
use super::catalog::{PolicyCatalog, PolicyDefinition, PolicyEffect, PolicyId};
use super::error::FiscalError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Clamps an intensity to `[0, 1]`. Values outside the range snap to the nearest bound.
pub fn clamp_intensity(intensity: Decimal) -> Decimal {
    intensity.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Adjusted copies of the baseline tables plus a trail of what was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub adjusted_revenue: BudgetTable,
    pub adjusted_expenditure: BudgetTable,
    pub applied_notes: Vec<String>,
}

/// Stateless engine applying catalogued measures to a budget.
pub struct ScenarioEngine<'a> {
    catalog: &'a PolicyCatalog,
}

impl<'a> ScenarioEngine<'a> {
    pub fn new(catalog: &'a PolicyCatalog) -> Self {
        Self { catalog }
    }

    /// Applies `selected` measures at `intensity` to copies of the baseline tables.
    ///
    /// Measures run in catalog order regardless of selection order. Every selected id is
    /// resolved before anything is applied, and a measure whose target category is absent
    /// fails the whole call.
    pub fn apply(
        &self,
        baseline_revenue: &BudgetTable,
        baseline_expenditure: &BudgetTable,
        selected: &[PolicyId],
        intensity: Decimal,
    ) -> Result<ScenarioResult, FiscalError> {
        for (table, expected) in [
            (baseline_revenue, BudgetKind::Revenue),
            (baseline_expenditure, BudgetKind::Expenditure),
        ] {
            if table.kind() != expected {
                return Err(FiscalError::TableKindMismatch {
                    expected,
                    actual: table.kind(),
                });
            }
        }

        for id in selected {
            self.catalog.lookup(id)?;
        }
        let wanted: HashSet<&str> = selected.iter().map(PolicyId::as_str).collect();
        let intensity = clamp_intensity(intensity);

        let mut revenue = baseline_revenue.clone();
        let mut expenditure = baseline_expenditure.clone();
        let mut applied_notes = Vec::new();

        for policy in self
            .catalog
            .policies()
            .iter()
            .filter(|policy| wanted.contains(policy.id))
        {
            let note = apply_policy(policy, intensity, &mut revenue, &mut expenditure)?;
            debug!(policy = policy.id, %intensity, "applied policy");
            applied_notes.push(note);
        }

        Ok(ScenarioResult {
            adjusted_revenue: revenue,
            adjusted_expenditure: expenditure,
            applied_notes,
        })
    }
}

fn apply_policy(
    policy: &PolicyDefinition,
    intensity: Decimal,
    revenue: &mut BudgetTable,
    expenditure: &mut BudgetTable,
) -> Result<String, FiscalError> {
    let mut changes = Vec::new();

    match &policy.effect {
        PolicyEffect::AdditiveRevenue {
            target_category,
            delta,
        } => {
            let (before, after) = adjust(revenue, target_category, policy.id, |amount| {
                amount + *delta * intensity
            })?;
            changes.push(describe_change(target_category, before, after));
        }
        PolicyEffect::MultiplicativeExpenditure {
            target_category,
            multiplier,
        } => {
            let effective = Decimal::ONE + (*multiplier - Decimal::ONE) * intensity;
            let (before, after) = adjust(expenditure, target_category, policy.id, |amount| {
                amount * effective
            })?;
            changes.push(describe_change(target_category, before, after));
        }
        PolicyEffect::AdditiveExpenditureBundle { deltas } => {
            for (category, delta) in deltas {
                let (before, after) = adjust(expenditure, category, policy.id, |amount| {
                    amount + *delta * intensity
                })?;
                changes.push(describe_change(category, before, after));
            }
        }
    }

    Ok(format!(
        "{} at {}%: {}",
        policy.label,
        (intensity * Decimal::ONE_HUNDRED).normalize(),
        changes.join(", ")
    ))
}

fn adjust(
    table: &mut BudgetTable,
    category: &str,
    policy_id: &str,
    op: impl FnOnce(Decimal) -> Decimal,
) -> Result<(Decimal, Decimal), FiscalError> {
    let item = table
        .get_mut(category)
        .ok_or_else(|| FiscalError::category_not_found(category, policy_id))?;
    let before = item.amount;
    item.amount = op(before);
    Ok((before, item.amount))
}

fn describe_change(category: &str, before: Decimal, after: Decimal) -> String {
    format!("{category} {} -> {}", before.normalize(), after.normalize())
}
