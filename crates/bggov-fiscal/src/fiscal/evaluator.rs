use super::budget::FiscalInputs;
use super::error::FiscalError;
use super::scenario::ScenarioResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Deficit-to-GDP ceiling for a green deficit light (inclusive).
pub const DEFICIT_GREEN_MAX: Decimal = dec!(0.03);
/// Deficit-to-GDP ceiling for a yellow deficit light (inclusive).
pub const DEFICIT_YELLOW_MAX: Decimal = dec!(0.045);
/// Debt-to-GDP ceiling for a green debt light (inclusive).
pub const DEBT_GREEN_MAX: Decimal = dec!(0.60);
/// Debt-to-GDP ceiling for a yellow debt light (inclusive).
pub const DEBT_YELLOW_MAX: Decimal = dec!(0.70);

/// Three-level classification, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

impl TrafficLight {
    fn classify(value: Decimal, green_max: Decimal, yellow_max: Decimal) -> Self {
        if value <= green_max {
            Self::Green
        } else if value <= yellow_max {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Green => "🟩",
            Self::Yellow => "🟨",
            Self::Red => "🟥",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Sustainable,
    AtRisk,
    Critical,
}

impl OverallStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sustainable => "Sustainable",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
        }
    }
}

impl From<TrafficLight> for OverallStatus {
    fn from(light: TrafficLight) -> Self {
        match light {
            TrafficLight::Green => Self::Sustainable,
            TrafficLight::Yellow => Self::AtRisk,
            TrafficLight::Red => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalVerdict {
    pub total_revenue: Decimal,
    pub total_expenditure: Decimal,
    /// Positive means overspending.
    pub deficit: Decimal,
    pub deficit_ratio: Decimal,
    pub debt_ratio: Decimal,
    pub deficit_light: TrafficLight,
    pub debt_light: TrafficLight,
    pub overall: OverallStatus,
}

pub fn evaluate(
    revenue_total: Decimal,
    expenditure_total: Decimal,
    gdp: Decimal,
    debt_stock: Decimal,
) -> Result<FiscalVerdict, FiscalError> {
    if gdp <= Decimal::ZERO {
        return Err(FiscalError::InvalidGdp(gdp));
    }

    let deficit = expenditure_total - revenue_total;
    let deficit_ratio = deficit / gdp;
    let debt_ratio = debt_stock / gdp;

    let deficit_light =
        TrafficLight::classify(deficit_ratio.abs(), DEFICIT_GREEN_MAX, DEFICIT_YELLOW_MAX);
    let debt_light = TrafficLight::classify(debt_ratio, DEBT_GREEN_MAX, DEBT_YELLOW_MAX);
    let overall = OverallStatus::from(deficit_light.max(debt_light));

    Ok(FiscalVerdict {
        total_revenue: revenue_total,
        total_expenditure: expenditure_total,
        deficit,
        deficit_ratio,
        debt_ratio,
        deficit_light,
        debt_light,
        overall,
    })
}

pub fn evaluate_scenario(
    result: &ScenarioResult,
    inputs: &FiscalInputs,
) -> Result<FiscalVerdict, FiscalError> {
    evaluate(
        result.adjusted_revenue.total(),
        result.adjusted_expenditure.total(),
        inputs.gdp(),
        inputs.debt_stock(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deficit_light_for(ratio: Decimal) -> TrafficLight {
        // gdp = 1 makes the deficit equal to the ratio
        evaluate(Decimal::ZERO, ratio, Decimal::ONE, Decimal::ZERO)
            .expect("valid gdp")
            .deficit_light
    }

    fn debt_light_for(ratio: Decimal) -> TrafficLight {
        evaluate(Decimal::ZERO, Decimal::ZERO, Decimal::ONE, ratio)
            .expect("valid gdp")
            .debt_light
    }

    #[test]
    fn deficit_sign_convention_and_inclusive_green() {
        let verdict = evaluate(dec!(100), dec!(103), dec!(100), Decimal::ZERO).expect("valid");
        assert_eq!(verdict.deficit, dec!(3));
        assert_eq!(verdict.deficit_ratio, dec!(0.03));
        assert_eq!(verdict.deficit_light, TrafficLight::Green);
        assert_eq!(verdict.overall, OverallStatus::Sustainable);
    }

    #[test]
    fn deficit_breakpoints_are_exact() {
        assert_eq!(deficit_light_for(dec!(0.030000)), TrafficLight::Green);
        assert_eq!(deficit_light_for(dec!(0.030001)), TrafficLight::Yellow);
        assert_eq!(deficit_light_for(dec!(0.045000)), TrafficLight::Yellow);
        assert_eq!(deficit_light_for(dec!(0.045001)), TrafficLight::Red);
    }

    #[test]
    fn surplus_is_classified_on_its_magnitude() {
        assert_eq!(deficit_light_for(dec!(-0.02)), TrafficLight::Green);
        assert_eq!(deficit_light_for(dec!(-0.04)), TrafficLight::Yellow);
        assert_eq!(deficit_light_for(dec!(-0.05)), TrafficLight::Red);
    }

    #[test]
    fn debt_breakpoints_are_exact() {
        assert_eq!(debt_light_for(dec!(0.600000)), TrafficLight::Green);
        assert_eq!(debt_light_for(dec!(0.600001)), TrafficLight::Yellow);
        assert_eq!(debt_light_for(dec!(0.700000)), TrafficLight::Yellow);
        assert_eq!(debt_light_for(dec!(0.700001)), TrafficLight::Red);
    }

    #[test]
    fn overall_takes_the_worst_light() {
        let yellow_debt = evaluate(dec!(100), dec!(101), dec!(100), dec!(65)).expect("valid");
        assert_eq!(yellow_debt.deficit_light, TrafficLight::Green);
        assert_eq!(yellow_debt.overall, OverallStatus::AtRisk);

        let red_deficit = evaluate(dec!(100), dec!(110), dec!(100), dec!(65)).expect("valid");
        assert_eq!(red_deficit.debt_light, TrafficLight::Yellow);
        assert_eq!(red_deficit.overall, OverallStatus::Critical);
    }

    #[test]
    fn zero_or_negative_gdp_is_rejected() {
        assert!(matches!(
            evaluate(dec!(1), dec!(2), Decimal::ZERO, dec!(1)),
            Err(FiscalError::InvalidGdp(_))
        ));
        assert!(matches!(
            evaluate(dec!(1), dec!(2), dec!(-100), dec!(1)),
            Err(FiscalError::InvalidGdp(_))
        ));
    }
}
