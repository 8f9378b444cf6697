//! # Collaborator Traits
//!
//! The two seams where a line item talks to the outside world.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Collaborators                                    │
//! │                                                                         │
//! │   Catalog product ──► Buyable ──► LineItem::from_product               │
//! │                                   LineItem::update_from_product        │
//! │                                                                         │
//! │   LineItem::export_with_model ──► ModelResolver ──► "model" entry      │
//! │                                                                         │
//! │   The core never caches or retries what these return.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::types::{Attributes, ModelReference, ProductId};

/// A catalog product that can be put into a cart.
///
/// Each accessor receives the selected options, so variant pricing
/// (e.g. a larger size costing more) stays with the product.
pub trait Buyable {
    /// Product identifier for the given options.
    fn identifier(&self, options: &Attributes) -> ProductId;

    /// Display name for the given options.
    fn description(&self, options: &Attributes) -> String;

    /// Unit price, excluding tax, for the given options.
    fn unit_price(&self, options: &Attributes) -> Decimal;
}

/// Looks up the external entity a line item was associated with.
///
/// Called once per export. Not-found, timeout and similar failures are the
/// resolver's own contract: its error is returned to the caller unchanged.
pub trait ModelResolver {
    type Error;

    fn resolve(
        &self,
        reference: &ModelReference,
        id: &ProductId,
    ) -> Result<serde_json::Value, Self::Error>;
}
