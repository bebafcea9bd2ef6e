use super::{VatAssumptions, VatMeasure};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    Optimistic,
    Base,
    Pessimistic,
}

impl ScenarioPreset {
    pub const fn ordered() -> [Self; 3] {
        [Self::Optimistic, Self::Base, Self::Pessimistic]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Optimistic => "Optimistic",
            Self::Base => "Base",
            Self::Pessimistic => "Pessimistic",
        }
    }
}

/// Data pack for the VAT demo: sector figures, default measure and presets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VatModelDefaults {
    pub turnover_sector_i: Decimal,
    pub employment_sector_i: u32,
    pub vat_from: Decimal,
    pub vat_to: Decimal,
    pub custom: VatAssumptions,
    optimistic: VatAssumptions,
    base: VatAssumptions,
    pessimistic: VatAssumptions,
}

impl VatModelDefaults {
    /// Placeholder sector-I figures (BGN) and the 9% -> 20% restaurant VAT restoration.
    pub fn demo() -> Self {
        let base = VatAssumptions {
            share: dec!(0.70),
            passthrough: dec!(0.60),
            elasticity: dec!(-0.50),
            compliance: dec!(0.00),
        };

        Self {
            turnover_sector_i: dec!(9_200_000_000),
            employment_sector_i: 152_000,
            vat_from: dec!(0.09),
            vat_to: dec!(0.20),
            custom: base,
            optimistic: VatAssumptions {
                share: dec!(0.65),
                passthrough: dec!(0.40),
                elasticity: dec!(-0.30),
                compliance: dec!(0.03),
            },
            base,
            pessimistic: VatAssumptions {
                share: dec!(0.75),
                passthrough: dec!(0.85),
                elasticity: dec!(-0.80),
                compliance: dec!(-0.03),
            },
        }
    }

    pub fn preset(&self, preset: ScenarioPreset) -> VatAssumptions {
        match preset {
            ScenarioPreset::Optimistic => self.optimistic,
            ScenarioPreset::Base => self.base,
            ScenarioPreset::Pessimistic => self.pessimistic,
        }
    }

    pub fn measure(&self) -> VatMeasure {
        VatMeasure {
            turnover_sector_i: self.turnover_sector_i,
            vat_from: self.vat_from,
            vat_to: self.vat_to,
        }
    }
}
