//! # Error Types
//!
//! Domain-specific error types for cartline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                              │
//! │  ├── InvalidIdentifier / InvalidName / InvalidPrice / InvalidQuantity  │
//! │  │       raised by LineItem construction and mutation                  │
//! │  ├── InvalidDiscountValue / InvalidDiscountKind /                      │
//! │  │   InvalidDiscountArguments                                          │
//! │  │       raised by DiscountRule construction and LineItem::set_discount│
//! │  ├── Validation(ValidationError)  - config field checks                │
//! │  └── Serialization(serde_json)    - JSON rendering of the export       │
//! │                                                                         │
//! │  Flow: input ──► validate ──► Err(CoreError) ──► caller (no retry)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in the message
//! 3. A failed call never leaves the item half-updated

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building or mutating a line item or discount.
///
/// Every variant is a programmer-input error surfaced synchronously to the
/// immediate caller. Derived values and formatting never produce one.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product identifier was empty (empty string or `0`).
    #[error("Please supply a valid identifier")]
    InvalidIdentifier,

    /// Display name was empty.
    #[error("Please supply a valid name")]
    InvalidName,

    /// Unit price was negative or not a number.
    #[error("Please supply a valid price: {0}")]
    InvalidPrice(String),

    /// Quantity was zero, negative or not a number.
    #[error("Please supply a valid quantity: {0}")]
    InvalidQuantity(String),

    /// Discount value outside the range allowed for its kind.
    ///
    /// ## When This Occurs
    /// - Percentage discount below 0 or above 100
    /// - Currency discount below 0
    #[error("Please supply a valid discount value: {value} is not allowed for a {kind} discount")]
    InvalidDiscountValue { value: String, kind: String },

    /// Discount kind is neither `currency` nor `percentage`.
    #[error("Please supply a valid discount type: '{0}'")]
    InvalidDiscountKind(String),

    /// `set_discount` was called without a value.
    #[error("Please supply valid discount attributes")]
    InvalidDiscountArguments,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Export could not be rendered as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors for configuration values.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a separator that contains a digit).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
