//! Transparent restaurant VAT model: price pass-through, demand response and compliance
//! shift applied to the restaurant share of sector I (accommodation and food service).

mod presets;

pub use presets::{ScenarioPreset, VatModelDefaults};

use crate::fiscal::TrafficLight;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Behavioural assumptions for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VatAssumptions {
    /// Restaurant and catering share of sector I turnover.
    pub share: Decimal,
    pub passthrough: Decimal,
    /// Price elasticity of demand (negative).
    pub elasticity: Decimal,
    pub compliance: Decimal,
}

/// Rate change under study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VatMeasure {
    pub turnover_sector_i: Decimal,
    pub vat_from: Decimal,
    pub vat_to: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VatOutcome {
    pub base_net: Decimal,
    pub full_price_change: Decimal,
    pub price_change: Decimal,
    pub volume_change: Decimal,
    pub adjusted_net: Decimal,
    pub fiscal_gain: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VatLights {
    pub fiscal: TrafficLight,
    pub prices: TrafficLight,
    pub sector: TrafficLight,
}

/// Upper bound on sector turnover, in BGN.
pub const MAX_TURNOVER: Decimal = dec!(1_000_000_000_000_000);
pub const ELASTICITY_RANGE: (Decimal, Decimal) = (dec!(-1.2), Decimal::ZERO);
pub const COMPLIANCE_RANGE: (Decimal, Decimal) = (dec!(-0.10), dec!(0.10));

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VatModelError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

/// Final-price increase when the net price is unchanged and VAT is fully passed on.
pub fn vat_price_increase(vat_from: Decimal, vat_to: Decimal) -> Decimal {
    (Decimal::ONE + vat_to) / (Decimal::ONE + vat_from) - Decimal::ONE
}

pub fn calc_scenario(
    measure: &VatMeasure,
    assumptions: &VatAssumptions,
) -> Result<VatOutcome, VatModelError> {
    validate(measure, assumptions)?;

    let base_net = measure.turnover_sector_i * assumptions.share;
    let full_price_change = vat_price_increase(measure.vat_from, measure.vat_to);
    let price_change = assumptions.passthrough * full_price_change;
    let volume_change = assumptions.elasticity * price_change;
    let adjusted_net = base_net
        * (Decimal::ONE + volume_change)
        * (Decimal::ONE + assumptions.compliance);
    let fiscal_gain = (measure.vat_to - measure.vat_from) * adjusted_net;

    Ok(VatOutcome {
        base_net,
        full_price_change,
        price_change,
        volume_change,
        adjusted_net,
        fiscal_gain,
    })
}

pub fn traffic_lights(outcome: &VatOutcome) -> VatLights {
    let fiscal = if outcome.fiscal_gain > Decimal::ZERO {
        TrafficLight::Green
    } else {
        TrafficLight::Red
    };

    let prices = if outcome.price_change < dec!(0.01) {
        TrafficLight::Green
    } else if outcome.price_change < dec!(0.06) {
        TrafficLight::Yellow
    } else {
        TrafficLight::Red
    };

    let sector = if outcome.volume_change > dec!(-0.02) {
        TrafficLight::Green
    } else if outcome.volume_change > dec!(-0.06) {
        TrafficLight::Yellow
    } else {
        TrafficLight::Red
    };

    VatLights {
        fiscal,
        prices,
        sector,
    }
}

fn validate(measure: &VatMeasure, assumptions: &VatAssumptions) -> Result<(), VatModelError> {
    let unit = (Decimal::ZERO, Decimal::ONE);
    for (field, value, (min, max)) in [
        ("turnover_sector_i", measure.turnover_sector_i, (Decimal::ZERO, MAX_TURNOVER)),
        ("vat_from", measure.vat_from, unit),
        ("vat_to", measure.vat_to, unit),
        ("share", assumptions.share, unit),
        ("passthrough", assumptions.passthrough, unit),
        ("elasticity", assumptions.elasticity, ELASTICITY_RANGE),
        ("compliance", assumptions.compliance, COMPLIANCE_RANGE),
    ] {
        if value < min || value > max {
            return Err(VatModelError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restore_standard_rate() -> VatMeasure {
        VatMeasure {
            turnover_sector_i: dec!(1000),
            vat_from: dec!(0.09),
            vat_to: dec!(0.20),
        }
    }

    #[test]
    fn full_pass_through_price_increase() {
        // 1.20 / 1.09 - 1
        let increase = vat_price_increase(dec!(0.09), dec!(0.20));
        assert_eq!(increase.round_dp(4), dec!(0.1009));
    }

    #[test]
    fn scenario_applies_share_volume_and_compliance() {
        let assumptions = VatAssumptions {
            share: dec!(0.5),
            passthrough: Decimal::ONE,
            elasticity: Decimal::ZERO,
            compliance: dec!(0.10),
        };

        let outcome = calc_scenario(&restore_standard_rate(), &assumptions).expect("valid");
        assert_eq!(outcome.base_net, dec!(500));
        assert_eq!(outcome.volume_change, Decimal::ZERO);
        assert_eq!(outcome.adjusted_net, dec!(550));
        assert_eq!(outcome.fiscal_gain, dec!(60.5));
    }

    #[test]
    fn lights_follow_price_and_volume_bands() {
        let assumptions = VatAssumptions {
            share: dec!(0.7),
            passthrough: dec!(0.5),
            elasticity: dec!(-0.5),
            compliance: Decimal::ZERO,
        };
        let outcome = calc_scenario(&restore_standard_rate(), &assumptions).expect("valid");
        // price change ~5.05%, volume change ~-2.52%
        let lights = traffic_lights(&outcome);
        assert_eq!(lights.fiscal, TrafficLight::Green);
        assert_eq!(lights.prices, TrafficLight::Yellow);
        assert_eq!(lights.sector, TrafficLight::Yellow);
    }

    #[test]
    fn rate_cut_turns_the_fiscal_light_red() {
        let measure = VatMeasure {
            turnover_sector_i: dec!(1000),
            vat_from: dec!(0.20),
            vat_to: dec!(0.09),
        };
        let assumptions = VatModelDefaults::demo().preset(ScenarioPreset::Base);
        let outcome = calc_scenario(&measure, &assumptions).expect("valid");
        let lights = traffic_lights(&outcome);
        assert_eq!(lights.fiscal, TrafficLight::Red);
        assert_eq!(lights.prices, TrafficLight::Green);
        assert_eq!(lights.sector, TrafficLight::Green);
    }

    fn rejected_field(measure: &VatMeasure, assumptions: &VatAssumptions) -> &'static str {
        match calc_scenario(measure, assumptions) {
            Err(VatModelError::OutOfRange { field, .. }) => field,
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let mut assumptions = VatModelDefaults::demo().preset(ScenarioPreset::Base);
        assumptions.share = dec!(1.2);
        assert_eq!(
            calc_scenario(&restore_standard_rate(), &assumptions),
            Err(VatModelError::OutOfRange {
                field: "share",
                value: dec!(1.2),
                min: Decimal::ZERO,
                max: Decimal::ONE,
            })
        );

        let err = calc_scenario(&restore_standard_rate(), &assumptions).expect_err("share > 1");
        assert_eq!(err.to_string(), "share must be between 0 and 1 (got 1.2)");
    }

    #[test]
    fn every_assumption_is_bounded() {
        let base = VatModelDefaults::demo().preset(ScenarioPreset::Base);
        let measure = restore_standard_rate();
        let cases = [
            (
                "passthrough",
                VatAssumptions {
                    passthrough: dec!(-0.1),
                    ..base
                },
            ),
            (
                "elasticity",
                VatAssumptions {
                    elasticity: dec!(-5),
                    ..base
                },
            ),
            (
                "elasticity",
                VatAssumptions {
                    elasticity: dec!(0.3),
                    ..base
                },
            ),
            (
                "compliance",
                VatAssumptions {
                    compliance: dec!(100_000_000_000_000_000_000_000),
                    ..base
                },
            ),
            (
                "compliance",
                VatAssumptions {
                    compliance: dec!(-0.5),
                    ..base
                },
            ),
        ];
        for (field, assumptions) in cases {
            assert_eq!(rejected_field(&measure, &assumptions), field);
        }
    }

    #[test]
    fn measure_rates_and_turnover_are_bounded() {
        let assumptions = VatModelDefaults::demo().preset(ScenarioPreset::Base);
        let base = restore_standard_rate();
        let cases = [
            (
                "turnover_sector_i",
                VatMeasure {
                    turnover_sector_i: dec!(-1),
                    ..base
                },
            ),
            (
                "turnover_sector_i",
                VatMeasure {
                    turnover_sector_i: dec!(100_000_000_000_000_000_000),
                    ..base
                },
            ),
            (
                "vat_from",
                VatMeasure {
                    vat_from: dec!(1.5),
                    ..base
                },
            ),
            (
                "vat_to",
                VatMeasure {
                    vat_to: dec!(-0.2),
                    ..base
                },
            ),
        ];
        for (field, measure) in cases {
            assert_eq!(rejected_field(&measure, &assumptions), field);
        }
    }

    #[test]
    fn extreme_admissible_inputs_stay_finite() {
        let measure = VatMeasure {
            turnover_sector_i: MAX_TURNOVER,
            vat_from: Decimal::ZERO,
            vat_to: Decimal::ONE,
        };
        let assumptions = VatAssumptions {
            share: Decimal::ONE,
            passthrough: Decimal::ONE,
            elasticity: ELASTICITY_RANGE.0,
            compliance: COMPLIANCE_RANGE.1,
        };
        let outcome = calc_scenario(&measure, &assumptions).expect("bounds are admissible");
        // price doubles, volume falls 120%
        assert_eq!(outcome.volume_change, dec!(-1.2));
        assert!(outcome.fiscal_gain < Decimal::ZERO);
    }
}
