//! Field validators used by `#[validate(custom(...))]` attributes on entity
//! models.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Fractional digits kept by `NUMERIC(10,2)` columns.
pub const MONEY_SCALE: u32 = 2;

/// Integer digits kept by `NUMERIC(10,2)` columns.
const MONEY_INTEGER_DIGITS: u32 = 8;

/// Accept decimals that fit `NUMERIC(10,2)` without rounding.
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::new("scale")
            .with_message(format!("at most {MONEY_SCALE} fractional digits allowed").into()));
    }

    let limit = Decimal::from(10u64.pow(MONEY_INTEGER_DIGITS));
    if value.abs() >= limit {
        return Err(ValidationError::new("precision").with_message(
            format!("at most {MONEY_INTEGER_DIGITS} integer digits allowed").into(),
        ));
    }

    Ok(())
}

/// Reject text Postgres cannot store: `TEXT`/`VARCHAR` columns refuse NUL.
pub fn validate_text(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("nul")
            .with_message("must not contain NUL characters".into()));
    }
    Ok(())
}
