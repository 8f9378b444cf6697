//! # Cart Configuration
//!
//! Values the embedding cart hands to every line item.
//!
//! ## Where Config Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Flow                                   │
//! │                                                                         │
//! │  Embedding cart (file, env, framework config...)                       │
//! │           │  deserializes / builds                                      │
//! │           ▼                                                             │
//! │  CartConfig { format, taxOnDiscountedPrice }                           │
//! │           │  validate()                                                 │
//! │           ▼                                                             │
//! │  LineItem::create(..)?.with_config(config)                             │
//! │           │                                                             │
//! │           ├── format_*()  uses config.format as fallback               │
//! │           └── tax()       uses config.tax_on_discounted_price          │
//! │                                                                         │
//! │  This crate never reads files or the environment itself.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example (JSON as stored by an embedding app)
//! ```json
//! {
//!   "format": { "decimals": 2, "decimalPoint": ",", "thousandSeparator": "." },
//!   "taxOnDiscountedPrice": false
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::NumberFormat;
use crate::validation::{validate_decimals, validate_separator};

/// Configuration consumed by line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    /// Fallback rules for every formatted accessor.
    #[serde(default)]
    pub format: NumberFormat,

    /// Compute tax on the discounted unit price instead of the list price.
    /// Default: true
    #[serde(default = "default_tax_on_discounted_price")]
    pub tax_on_discounted_price: bool,
}

fn default_tax_on_discounted_price() -> bool {
    true
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            format: NumberFormat::default(),
            tax_on_discounted_price: default_tax_on_discounted_price(),
        }
    }
}

impl CartConfig {
    /// Builder-style setter for the tax base switch.
    pub fn with_tax_on_discounted_price(mut self, enabled: bool) -> Self {
        self.tax_on_discounted_price = enabled;
        self
    }

    /// Builder-style setter for the number format.
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        validate_decimals(self.format.decimals)?;
        validate_separator("decimalPoint", &self.format.decimal_point, true)?;
        validate_separator("thousandSeparator", &self.format.thousand_separator, false)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
