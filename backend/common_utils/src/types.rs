//! Types that can be used in other crates

use std::fmt::Display;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits the processor expects on every amount
const MAJOR_UNIT_SCALE: u32 = 2;

/// Connector specific amount, a major unit rendered with exactly two decimals
#[derive(Default, Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    /// Rounds half away from zero to two decimals, `10` becomes `"10.00"`
    pub fn from_decimal(amount: Decimal) -> Self {
        let rounded =
            amount.round_dp_with_strategy(MAJOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Self(format!("{rounded:.2}"))
    }

    /// Get string amount from struct
    pub fn get_amount_as_string(&self) -> String {
        self.0.clone()
    }
}

impl Display for StringMajorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
