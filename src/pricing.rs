//! Currency selection and the fixed USD to MYR conversion.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// MYR per USD. Baked in; there is no live rate lookup.
pub const MYR_PER_USD: Decimal = Decimal::from_parts(425, 0, 0, false, 2);

/// Largest amount a `NUMERIC(12, 2)` price column holds: 9,999,999,999.99.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "MYR")]
    Myr,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Myr => "MYR",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Myr => "RM",
        }
    }

    /// Orders store their currency as free text; anything but USD renders as ringgit.
    pub fn from_code(code: &str) -> Self {
        if code.eq_ignore_ascii_case("USD") {
            Currency::Usd
        } else {
            Currency::Myr
        }
    }

    pub fn format(self, amount: Decimal) -> String {
        format!("{}{}", self.symbol(), round_minor(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Round to two decimal places, halves away from zero.
pub fn round_minor(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `None` when the converted amount does not fit a price column.
pub fn derive_myr_price(usd: Decimal) -> Option<Decimal> {
    usd.checked_mul(MYR_PER_USD)
        .map(round_minor)
        .filter(|myr| fits_price_column(*myr))
}

/// A positive MYR price wins; blank or zero derives it from USD.
pub fn resolve_myr_price(usd: Decimal, myr: Option<Decimal>) -> Option<Decimal> {
    match myr {
        Some(myr) if myr > Decimal::ZERO => Some(myr),
        _ => derive_myr_price(usd),
    }
}

pub fn fits_price_column(amount: Decimal) -> bool {
    amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        <= MAX_PRICE
}

pub fn price_for(currency: Currency, usd: Decimal, myr: Decimal) -> Decimal {
    match currency {
        Currency::Usd => usd,
        Currency::Myr => myr,
    }
}
