use crate::{Symbol, ValidationError};

/// A single price observation for one symbol at fetch time.
///
/// A zero price is valid; only non-finite values are rejected, since they
/// cannot be represented in the JSON output.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
}

impl Quote {
    pub fn new(symbol: Symbol, price: f64) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFinitePrice {
                symbol: symbol.as_str().to_owned(),
            });
        }

        Ok(Self { symbol, price })
    }
}
