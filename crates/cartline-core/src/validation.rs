//! # Validation Module
//!
//! Input checks run before a line item is built or mutated.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  Raw input (form field, JSON, product snapshot)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  parse_price / parse_quantity   (text → Decimal)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_* (THIS MODULE)       (business rules)                       │
//! │           │                                                             │
//! │           ├── Err → caller, item untouched                             │
//! │           └── Ok  → LineItem writes the new values                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartline_core::validation::{parse_price, validate_quantity};
//! use rust_decimal::Decimal;
//!
//! let price = parse_price("19.99").unwrap();
//! assert_eq!(price, Decimal::new(1999, 2));
//!
//! assert!(validate_quantity(Decimal::ZERO).is_err());
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::ProductId;
use crate::{MAX_AMOUNT, MAX_DECIMALS};

/// Result type for config validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Text must not be blank
/// - Numbers must not be `0`
pub fn validate_identifier(id: &ProductId) -> CoreResult<()> {
    if id.is_empty() {
        return Err(CoreError::InvalidIdentifier);
    }

    Ok(())
}

/// Validates a display name.
///
/// ## Example
/// ```rust
/// use cartline_core::validation::validate_name;
///
/// assert!(validate_name("Basic T-Shirt").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidName);
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed [`MAX_AMOUNT`]
pub fn validate_price(price: Decimal) -> CoreResult<()> {
    if price < Decimal::ZERO || price > MAX_AMOUNT {
        return Err(CoreError::InvalidPrice(price.to_string()));
    }

    Ok(())
}

/// Validates a quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Fractional quantities are allowed (e.g. 1.5 kg)
/// - Must not exceed [`MAX_AMOUNT`]
pub fn validate_quantity(qty: Decimal) -> CoreResult<()> {
    if qty <= Decimal::ZERO || qty > MAX_AMOUNT {
        return Err(CoreError::InvalidQuantity(qty.to_string()));
    }

    Ok(())
}

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses and validates a price typed as text.
///
/// ## Example
/// ```rust
/// use cartline_core::validation::parse_price;
///
/// assert!(parse_price("10.50").is_ok());
/// assert!(parse_price("ten").is_err());
/// assert!(parse_price("-1").is_err());
/// ```
pub fn parse_price(input: &str) -> CoreResult<Decimal> {
    let price = parse_decimal(input).ok_or_else(|| CoreError::InvalidPrice(input.to_string()))?;
    validate_price(price)?;
    Ok(price)
}

/// Parses and validates a quantity typed as text.
pub fn parse_quantity(input: &str) -> CoreResult<Decimal> {
    let qty = parse_decimal(input).ok_or_else(|| CoreError::InvalidQuantity(input.to_string()))?;
    validate_quantity(qty)?;
    Ok(qty)
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}

// =============================================================================
// Config Validators
// =============================================================================

/// Validates the number of display decimals.
///
/// ## Rules
/// - At most 28 (the largest scale a Decimal can hold)
pub fn validate_decimals(decimals: u32) -> ValidationResult<()> {
    if decimals > MAX_DECIMALS {
        return Err(ValidationError::OutOfRange {
            field: "decimals".to_string(),
            min: 0,
            max: MAX_DECIMALS as i64,
        });
    }

    Ok(())
}

/// Validates a decimal point or thousand separator.
///
/// ## Rules
/// - The decimal point must not be empty
/// - Neither separator may contain a digit (the output would be ambiguous)
pub fn validate_separator(field: &str, separator: &str, required: bool) -> ValidationResult<()> {
    if required && separator.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if separator.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
