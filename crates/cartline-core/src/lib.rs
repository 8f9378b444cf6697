//! # cartline-core: Line Item Pricing & Identity Engine
//!
//! This crate models a single shopping-cart row: which product configuration
//! it is, and what it costs. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cartline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Embedding cart (storage, session, config)          │   │
//! │  │     add ──► merge by row id ──► update ──► remove ──► export    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cartline-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────────┐   │   │
//! │  │  │ line_item │ │ discount  │ │   money   │ │  validation   │   │   │
//! │  │  │ LineItem  │ │ Discount  │ │  Number   │ │  config       │   │   │
//! │  │  │ row id    │ │  Rule     │ │  Format   │ │  types        │   │   │
//! │  │  └───────────┘ └───────────┘ └───────────┘ └───────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ traits                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Buyable (catalog product)   ModelResolver (entity)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`line_item`] - LineItem, row id hashing, derived values, export
//! - [`discount`] - DiscountRule (currency / percentage)
//! - [`money`] - Number formatting with configurable separators
//! - [`config`] - CartConfig handed in by the embedding cart
//! - [`types`] - ProductId, Attributes, TaxRate, ModelReference
//! - [`collaborators`] - Buyable and ModelResolver traits
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: derived values are recomputed on every read, never cached
//! 2. **No I/O**: config is handed in, products and models come through traits
//! 3. **Exact Money**: all arithmetic is `rust_decimal::Decimal`; rounding only when formatting
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cartline_core::{Attributes, DiscountRequest, FormatOverrides, LineItem};
//! use rust_decimal::Decimal;
//!
//! let mut item = LineItem::create(
//!     42,
//!     "Hoodie",
//!     Decimal::new(4999, 2), // 49.99
//!     Attributes::new().with("size", "M"),
//!     Attributes::new(),
//! )
//! .unwrap();
//!
//! item.set_quantity(Decimal::from(2)).unwrap();
//! item.set_discount(DiscountRequest::percentage(Decimal::from(10))).unwrap();
//!
//! assert_eq!(item.format_subtotal(&FormatOverrides::new()), "99.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collaborators;
pub mod config;
pub mod discount;
pub mod error;
pub mod line_item;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use collaborators::{Buyable, ModelResolver};
pub use config::CartConfig;
pub use discount::{DiscountExport, DiscountKind, DiscountRequest, DiscountRule};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_item::{generate_row_id, LineItem, LineItemExport, LineItemPatch};
pub use money::{format_number, FormatOverrides, NumberFormat};
pub use types::*;

use rust_decimal::Decimal;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Digits after the decimal point when nothing else is configured.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Decimal point when nothing else is configured.
pub const DEFAULT_DECIMAL_POINT: &str = ".";

/// Thousand separator when nothing else is configured.
pub const DEFAULT_THOUSAND_SEPARATOR: &str = ",";

/// Largest accepted unit price and quantity (`1_000_000_000_000`).
///
/// ## Why 10^12?
/// `qty × price` then stays below 10^24, well inside the 96-bit range of
/// `Decimal`, so the derived values can never overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Largest number of display decimals.
///
/// ## Why 28?
/// It is the maximum scale of `rust_decimal::Decimal`; a value cannot carry
/// more fractional digits than that.
pub const MAX_DECIMALS: u32 = 28;
