//! # Line Items
//!
//! One row of a shopping cart: a quantity of a specific product configuration.
//!
//! ## Row Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Row Id Generation                                │
//! │                                                                         │
//! │  product id ─────┐                                                      │
//! │  options (sorted)├──► canonical bytes ──► SHA-256 ──► first 16 bytes   │
//! │  extras  (sorted)┘                                     as 32 hex chars  │
//! │                                                                         │
//! │  Same product + same options + same extras → same row (qty merges)     │
//! │  Anything different                         → a separate row           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Values
//! Nothing below is stored; every accessor recomputes from the inputs.
//! ```text
//! subtotal       = qty × price
//! price_discount = discount_rule.apply_discount(price)
//! discount       = discount_rule.calculate_discount(price)      (per unit)
//! discount_total = qty × discount
//! tax            = (tax_on_discounted_price ? price_discount : price) × rate
//! price_tax      = price_discount + tax
//! tax_total      = tax × qty
//! total          = qty × price_tax
//! ```
//!
//! ## Example
//! ```rust
//! use cartline_core::{Attributes, DiscountRequest, LineItem};
//! use rust_decimal::Decimal;
//!
//! let mut item = LineItem::create(
//!     "TSHIRT",
//!     "Basic T-Shirt",
//!     Decimal::from(100),
//!     Attributes::new().with("size", "L"),
//!     Attributes::new(),
//! )
//! .unwrap();
//!
//! item.set_quantity(Decimal::from(2)).unwrap();
//! item.set_tax_rate(Decimal::from(10));
//! item.set_discount(DiscountRequest::currency(Decimal::from(20))).unwrap();
//!
//! assert_eq!(item.total(), Decimal::from(176));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::collaborators::{Buyable, ModelResolver};
use crate::config::CartConfig;
use crate::discount::{DiscountExport, DiscountRequest, DiscountRule};
use crate::error::{CoreError, CoreResult};
use crate::money::FormatOverrides;
use crate::types::{AttributeValue, Attributes, ModelReference, ProductId, TaxRate};
use crate::validation::{validate_identifier, validate_name, validate_price, validate_quantity};

// =============================================================================
// Line Item
// =============================================================================

/// A cart row.
///
/// ## Invariants
/// - `row_id` is the digest of `(id, options, extras)` after construction,
///   [`LineItem::update_from_partial`] and every other identity change except
///   [`LineItem::update_from_product`], which keeps the row id on purpose
/// - `qty > 0`, `price >= 0`, `id` and `name` non-empty
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    row_id: String,
    id: ProductId,
    name: String,
    price: Decimal,
    qty: Decimal,
    options: Attributes,
    extras: Attributes,
    tax_rate: TaxRate,
    discount_rule: DiscountRule,
    associated_model: Option<ModelReference>,
    is_saved: bool,
    config: CartConfig,
}

impl LineItem {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Creates a line item with quantity 1, no tax and no discount.
    ///
    /// ## Errors
    /// - `InvalidIdentifier` when `id` is empty
    /// - `InvalidName` when `name` is empty
    /// - `InvalidPrice` when `price` is negative
    pub fn create(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        options: Attributes,
        extras: Attributes,
    ) -> CoreResult<Self> {
        let id = id.into();
        let name = name.into();

        validate_identifier(&id)?;
        validate_name(&name)?;
        validate_price(price)?;

        let row_id = generate_row_id(&id, &options, &extras);
        debug!(row_id = %row_id, product_id = %id, "Creating line item");

        Ok(LineItem {
            row_id,
            id,
            name,
            price,
            qty: Decimal::ONE,
            options,
            extras,
            tax_rate: TaxRate::zero(),
            discount_rule: DiscountRule::none(),
            associated_model: None,
            is_saved: false,
            config: CartConfig::default(),
        })
    }

    /// Creates a line item from a catalog product.
    ///
    /// The product is asked for its identifier, name and price for the
    /// given options.
    pub fn from_product<B: Buyable + ?Sized>(
        product: &B,
        options: Attributes,
        extras: Attributes,
    ) -> CoreResult<Self> {
        Self::create(
            product.identifier(&options),
            product.description(&options),
            product.unit_price(&options),
            options,
            extras,
        )
    }

    /// Creates a line item from a partial attribute set.
    ///
    /// `id`, `name` and `price` are required; `qty`, `options` and `extras`
    /// are optional.
    pub fn from_partial(patch: LineItemPatch) -> CoreResult<Self> {
        let id = patch.id.ok_or(CoreError::InvalidIdentifier)?;
        let name = patch.name.ok_or(CoreError::InvalidName)?;
        let price = patch
            .price
            .ok_or_else(|| CoreError::InvalidPrice("missing".to_string()))?;

        let mut item = Self::create(
            id,
            name,
            price,
            patch.options.unwrap_or_default(),
            patch.extras.unwrap_or_default(),
        )?;

        if let Some(qty) = patch.qty {
            item.set_quantity(qty)?;
        }

        Ok(item)
    }

    /// Replaces the configuration (format defaults and tax base switch).
    pub fn with_config(mut self, config: CartConfig) -> Self {
        self.config = config;
        self
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Sets the quantity. The row id is unaffected.
    ///
    /// ## Errors
    /// - `InvalidQuantity` when `qty <= 0`
    pub fn set_quantity(&mut self, qty: Decimal) -> CoreResult<()> {
        validate_quantity(qty)?;
        self.qty = qty;
        Ok(())
    }

    /// Replaces the discount with a new rule built from `request`.
    ///
    /// ## Errors
    /// - `InvalidDiscountArguments` when the request has no value
    /// - `InvalidDiscountKind` / `InvalidDiscountValue` from rule validation
    ///
    /// The current rule stays in place on any error.
    pub fn set_discount(&mut self, request: DiscountRequest) -> CoreResult<&mut Self> {
        let rule = request.into_rule()?;
        Ok(self.apply_discount_rule(rule))
    }

    /// Replaces the discount with an already validated rule.
    pub fn apply_discount_rule(&mut self, rule: DiscountRule) -> &mut Self {
        debug!(
            row_id = %self.row_id,
            kind = %rule.kind(),
            value = %rule.value(),
            "Replacing discount rule"
        );
        self.discount_rule = rule;
        self
    }

    pub fn set_tax_rate(&mut self, rate: impl Into<TaxRate>) -> &mut Self {
        self.tax_rate = rate.into();
        self
    }

    /// Marks the item as saved for later. Informational only.
    pub fn set_saved(&mut self, saved: bool) -> &mut Self {
        self.is_saved = saved;
        self
    }

    /// Associates the item with an external entity type.
    ///
    /// The entity is only looked up in [`LineItem::export_with_model`].
    pub fn associate(&mut self, reference: impl Into<ModelReference>) -> &mut Self {
        self.associated_model = Some(reference.into());
        self
    }

    /// Refreshes id, name and price from a catalog product.
    ///
    /// When `options` is given it replaces the current options first and is
    /// what the product is queried with.
    ///
    /// ## Row Id
    /// The row id is **not** recomputed. A price refresh keeps the cart row
    /// it was made for, even when the options changed.
    pub fn update_from_product<B: Buyable + ?Sized>(
        &mut self,
        product: &B,
        options: Option<Attributes>,
    ) -> CoreResult<()> {
        let options = options.unwrap_or_else(|| self.options.clone());

        let id = product.identifier(&options);
        let name = product.description(&options);
        let price = product.unit_price(&options);

        validate_identifier(&id)?;
        validate_name(&name)?;
        validate_price(price)?;

        debug!(
            row_id = %self.row_id,
            product_id = %id,
            price = %price,
            "Refreshing line item from product"
        );

        self.options = options;
        self.id = id;
        self.name = name;
        self.price = price;
        Ok(())
    }

    /// Merges a partial attribute set over the current fields.
    ///
    /// Unlike [`LineItem::update_from_product`] this recomputes the row id
    /// from the resulting id, options and extras. Every present field is
    /// validated before anything is written.
    pub fn update_from_partial(&mut self, patch: LineItemPatch) -> CoreResult<()> {
        if let Some(id) = &patch.id {
            validate_identifier(id)?;
        }
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(qty) = patch.qty {
            validate_quantity(qty)?;
        }

        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(qty) = patch.qty {
            self.qty = qty;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(extras) = patch.extras {
            self.extras = extras;
        }

        let row_id = generate_row_id(&self.id, &self.options, &self.extras);
        if row_id != self.row_id {
            debug!(old = %self.row_id, new = %row_id, "Line item identity changed");
        }
        self.row_id = row_id;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stored Fields
    // -------------------------------------------------------------------------

    pub fn row_id(&self) -> &str {
        &self.row_id
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price excluding tax.
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn qty(&self) -> Decimal {
        self.qty
    }

    pub fn options(&self) -> &Attributes {
        &self.options
    }

    pub fn extras(&self) -> &Attributes {
        &self.extras
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn discount_rule(&self) -> &DiscountRule {
        &self.discount_rule
    }

    pub fn associated_model(&self) -> Option<&ModelReference> {
        self.associated_model.as_ref()
    }

    pub fn is_saved(&self) -> bool {
        self.is_saved
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Derived Values
    // -------------------------------------------------------------------------

    /// `qty × price`, before discount and tax.
    pub fn subtotal(&self) -> Decimal {
        self.qty * self.price
    }

    /// Unit price after discount.
    pub fn price_discount(&self) -> Decimal {
        self.discount_rule.apply_discount(self.price)
    }

    /// Discount amount on one unit.
    pub fn discount(&self) -> Decimal {
        self.discount_rule.calculate_discount(self.price)
    }

    pub fn discount_total(&self) -> Decimal {
        self.qty * self.discount()
    }

    /// Tax on one unit.
    ///
    /// Taken on the discounted price when the config asks for it, otherwise
    /// on the list price.
    pub fn tax(&self) -> Decimal {
        let base = if self.config.tax_on_discounted_price {
            self.price_discount()
        } else {
            self.price
        };

        // The rate is unbounded, so the tax chain saturates instead of overflowing
        base.saturating_mul(self.tax_rate.fraction())
    }

    /// Unit price after discount, including tax.
    pub fn price_tax(&self) -> Decimal {
        self.price_discount().saturating_add(self.tax())
    }

    pub fn tax_total(&self) -> Decimal {
        self.tax().saturating_mul(self.qty)
    }

    /// `qty × price_tax`.
    pub fn total(&self) -> Decimal {
        self.qty.saturating_mul(self.price_tax())
    }

    // -------------------------------------------------------------------------
    // Formatted Values
    // -------------------------------------------------------------------------

    fn format_amount(&self, value: Decimal, overrides: &FormatOverrides) -> String {
        self.config.format.format_with(value, overrides)
    }

    pub fn format_price(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.price(), overrides)
    }

    pub fn format_price_tax(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.price_tax(), overrides)
    }

    pub fn format_price_discount(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.price_discount(), overrides)
    }

    pub fn format_subtotal(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.subtotal(), overrides)
    }

    pub fn format_total(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.total(), overrides)
    }

    pub fn format_tax(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.tax(), overrides)
    }

    pub fn format_tax_total(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.tax_total(), overrides)
    }

    pub fn format_discount(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.discount(), overrides)
    }

    pub fn format_discount_total(&self, overrides: &FormatOverrides) -> String {
        self.format_amount(self.discount_total(), overrides)
    }

    /// The discount rule itself, e.g. `"- $5.00"` or `"- 10.00%"`.
    pub fn format_discount_rate(
        &self,
        currency_symbol: &str,
        overrides: &FormatOverrides,
    ) -> String {
        self.discount_rule.format(currency_symbol, &self.config.format, overrides)
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Flat exported mapping, without the associated model.
    pub fn export(&self) -> LineItemExport {
        LineItemExport {
            row_id: self.row_id.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            qty: self.qty,
            price: self.price,
            options: self.options.clone(),
            extras: self.extras.clone(),
            tax: self.tax(),
            is_saved: self.is_saved,
            subtotal: self.subtotal(),
            price_discount: self.price_discount(),
            discount: self.discount(),
            discount_total: self.discount_total(),
            discount_rate: self.discount_rule.export(),
            model: None,
        }
    }

    /// Exported mapping including the resolved model, if one is associated.
    ///
    /// The resolver is called on every export; its result is not cached and
    /// its error is returned unchanged.
    pub fn export_with_model<R: ModelResolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> Result<LineItemExport, R::Error> {
        let mut export = self.export();

        if let Some(reference) = &self.associated_model {
            debug!(row_id = %self.row_id, model = %reference, "Resolving associated model");
            export.model = Some(resolver.resolve(reference, &self.id)?);
        }

        Ok(export)
    }

    /// JSON rendering of [`LineItem::export`].
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.export())?)
    }
}

// =============================================================================
// Partial Update
// =============================================================================

/// Partial attribute set for [`LineItem::from_partial`] and
/// [`LineItem::update_from_partial`].
///
/// ## Example
/// ```json
/// { "qty": 3, "options": { "size": "XL" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPatch {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub qty: Option<Decimal>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub options: Option<Attributes>,
    #[serde(default)]
    pub extras: Option<Attributes>,
}

impl LineItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn qty(mut self, qty: Decimal) -> Self {
        self.qty = Some(qty);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn options(mut self, options: Attributes) -> Self {
        self.options = Some(options);
        self
    }

    pub fn extras(mut self, extras: Attributes) -> Self {
        self.extras = Some(extras);
        self
    }
}

// =============================================================================
// Export Shape
// =============================================================================

/// Exported line item, as handed to storage or a frontend.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemExport {
    pub row_id: String,
    #[ts(type = "string | number")]
    pub id: ProductId,
    pub name: String,
    #[ts(type = "number")]
    pub qty: Decimal,
    #[ts(type = "number")]
    pub price: Decimal,
    #[ts(type = "Record<string, string | number | boolean>")]
    pub options: Attributes,
    #[ts(type = "Record<string, string | number | boolean>")]
    pub extras: Attributes,
    #[ts(type = "number")]
    pub tax: Decimal,
    pub is_saved: bool,
    #[ts(type = "number")]
    pub subtotal: Decimal,
    #[ts(type = "number")]
    pub price_discount: Decimal,
    #[ts(type = "number")]
    pub discount: Decimal,
    #[ts(type = "number")]
    pub discount_total: Decimal,
    pub discount_rate: DiscountExport,
    /// Resolved external entity; only present after `export_with_model`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub model: Option<serde_json::Value>,
}

// =============================================================================
// Row Id
// =============================================================================

/// Computes the row id for a product configuration.
///
/// Each component is written length-prefixed and type-tagged, and the
/// options and extras sections carry distinct markers, so no two different
/// configurations share an encoding. Keys come out of [`Attributes`] sorted.
pub fn generate_row_id(id: &ProductId, options: &Attributes, extras: &Attributes) -> String {
    let mut hasher = Sha256::new();

    match id {
        ProductId::Number(n) => {
            hasher.update(b"n");
            update_str(&mut hasher, &n.to_string());
        }
        ProductId::Text(s) => {
            hasher.update(b"s");
            update_str(&mut hasher, s);
        }
    }
    update_attributes(&mut hasher, b"options", options);
    update_attributes(&mut hasher, b"extras", extras);

    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes).simple().to_string()
}

fn update_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_be_bytes());
    hasher.update(s.as_bytes());
}

fn update_attributes(hasher: &mut Sha256, section: &[u8], attributes: &Attributes) {
    hasher.update(section);
    hasher.update((attributes.len() as u64).to_be_bytes());

    for (key, value) in attributes.iter() {
        update_str(hasher, key);
        match value {
            AttributeValue::Bool(b) => {
                hasher.update(b"b");
                hasher.update([u8::from(*b)]);
            }
            AttributeValue::Text(s) => {
                hasher.update(b"t");
                update_str(hasher, s);
            }
            // 1.50 and 1.5 compare equal, so they must hash equal
            AttributeValue::Number(n) => {
                hasher.update(b"d");
                update_str(hasher, &n.normalize().to_string());
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn shirt() -> LineItem {
        LineItem::create(
            "TSHIRT",
            "Basic T-Shirt",
            dec!(100),
            Attributes::new().with("size", "L").with("color", "red"),
            Attributes::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let item = shirt();
        assert_eq!(item.qty(), dec!(1));
        assert!(item.tax_rate().is_zero());
        assert_eq!(item.discount_rule(), &DiscountRule::none());
        assert!(!item.is_saved());
        assert!(item.associated_model().is_none());
        assert_eq!(item.row_id().len(), 32);
    }

    #[test]
    fn test_create_validation() {
        let none = Attributes::new;

        assert!(matches!(
            LineItem::create("", "Name", dec!(1), none(), none()),
            Err(CoreError::InvalidIdentifier)
        ));
        assert!(matches!(
            LineItem::create(0, "Name", dec!(1), none(), none()),
            Err(CoreError::InvalidIdentifier)
        ));
        assert!(matches!(
            LineItem::create(1, "", dec!(1), none(), none()),
            Err(CoreError::InvalidName)
        ));
        assert!(matches!(
            LineItem::create(1, "Name", dec!(-1), none(), none()),
            Err(CoreError::InvalidPrice(_))
        ));
        assert!(LineItem::create(1, "Free gift", dec!(0), none(), none()).is_ok());
    }

    #[test]
    fn test_row_id_distinguishes_options_from_extras() {
        let attrs = Attributes::new().with("gift", true);
        let as_option = generate_row_id(&ProductId::from(1), &attrs, &Attributes::new());
        let as_extra = generate_row_id(&ProductId::from(1), &Attributes::new(), &attrs);
        assert_ne!(as_option, as_extra);
    }

    #[test]
    fn test_row_id_distinguishes_numeric_and_text_ids() {
        let none = Attributes::new();
        assert_ne!(
            generate_row_id(&ProductId::from(1), &none, &none),
            generate_row_id(&ProductId::from("1"), &none, &none)
        );
    }

    #[test]
    fn test_row_id_equal_decimals_hash_equal() {
        let none = Attributes::new();
        let a = Attributes::new().with("weight", dec!(1.50));
        let b = Attributes::new().with("weight", dec!(1.5));
        assert_eq!(
            generate_row_id(&ProductId::from(1), &a, &none),
            generate_row_id(&ProductId::from(1), &b, &none)
        );
    }

    #[test]
    fn test_set_quantity_keeps_row_id() {
        let mut item = shirt();
        let row_id = item.row_id().to_string();

        item.set_quantity(dec!(3)).unwrap();
        assert_eq!(item.qty(), dec!(3));
        assert_eq!(item.row_id(), row_id);

        assert!(matches!(
            item.set_quantity(dec!(0)),
            Err(CoreError::InvalidQuantity(_))
        ));
        assert_eq!(item.qty(), dec!(3));
    }

    #[test]
    fn test_failed_discount_keeps_previous_rule() {
        let mut item = shirt();
        item.set_discount(DiscountRequest::currency(dec!(5))).unwrap();

        let err = item.set_discount(DiscountRequest::percentage(dec!(150)));
        assert!(matches!(err, Err(CoreError::InvalidDiscountValue { .. })));
        assert_eq!(item.discount_rule().value(), dec!(5));

        let err = item.set_discount(DiscountRequest::default());
        assert!(matches!(err, Err(CoreError::InvalidDiscountArguments)));
        assert_eq!(item.discount_rule().value(), dec!(5));
    }

    #[test]
    fn test_setters_chain() {
        let mut item = shirt();
        item.set_tax_rate(dec!(21))
            .set_saved(true)
            .associate("App\\Product");

        assert_eq!(item.tax_rate().percentage(), dec!(21));
        assert!(item.is_saved());
        assert_eq!(item.associated_model().unwrap().as_str(), "App\\Product");
    }

    #[test]
    fn test_tax_on_list_price() {
        let config = CartConfig::default().with_tax_on_discounted_price(false);
        let mut item = shirt().with_config(config);
        item.set_quantity(dec!(2)).unwrap();
        item.set_tax_rate(dec!(10));
        item.set_discount(DiscountRequest::currency(dec!(20))).unwrap();

        assert_eq!(item.price_discount(), dec!(80));
        assert_eq!(item.tax(), dec!(10));
        assert_eq!(item.price_tax(), dec!(90));
        assert_eq!(item.tax_total(), dec!(20));
        assert_eq!(item.total(), dec!(180));
    }

    #[test]
    fn test_percentage_discount_graph() {
        let mut item = shirt();
        item.set_quantity(dec!(3)).unwrap();
        item.set_tax_rate(dec!(20));
        item.set_discount(DiscountRequest::percentage(dec!(25))).unwrap();

        assert_eq!(item.discount(), dec!(25));
        assert_eq!(item.discount_total(), dec!(75));
        assert_eq!(item.price_discount(), dec!(75));
        assert_eq!(item.tax(), dec!(15));
        assert_eq!(item.price_tax(), dec!(90));
        assert_eq!(item.total(), dec!(270));
    }

    #[test]
    fn test_formatted_values_use_config() {
        let config: CartConfig = serde_json::from_str(
            r#"{"format": {"decimals": 1, "decimalPoint": ",", "thousandSeparator": "."}}"#,
        )
        .unwrap();
        let mut item = LineItem::create(
            1,
            "TV",
            dec!(1234.56),
            Attributes::new(),
            Attributes::new(),
        )
        .unwrap()
            .with_config(config);
        item.set_quantity(dec!(2)).unwrap();

        assert_eq!(item.format_price(&FormatOverrides::new()), "1.234,6");
        assert_eq!(item.format_subtotal(&FormatOverrides::new()), "2.469,1");
        assert_eq!(
            item.format_subtotal(&FormatOverrides::new().decimals(2)),
            "2.469,12"
        );
        // Formatting leaves stored values untouched
        assert_eq!(item.price(), dec!(1234.56));
    }

    #[test]
    fn test_format_discount_rate() {
        let mut item = shirt();
        item.set_discount(DiscountRequest::percentage(dec!(10))).unwrap();
        assert_eq!(
            item.format_discount_rate("$", &FormatOverrides::new()),
            "- 10.00%"
        );
    }

    #[test]
    fn test_from_partial_requires_core_fields() {
        let patch = LineItemPatch::new().id(5).name("Mug");
        assert!(matches!(
            LineItem::from_partial(patch),
            Err(CoreError::InvalidPrice(_))
        ));

        let item = LineItem::from_partial(
            LineItemPatch::new()
                .id(5)
                .name("Mug")
                .price(dec!(8))
                .qty(dec!(4)),
        )
        .unwrap();
        assert_eq!(item.qty(), dec!(4));
        assert_eq!(item.subtotal(), dec!(32));
    }

    #[test]
    fn test_update_from_partial_is_atomic() {
        let mut item = shirt();
        let before = item.clone();

        let result = item.update_from_partial(
            LineItemPatch::new()
                .options(Attributes::new().with("size", "XL"))
                .price(dec!(-3)),
        );

        assert!(matches!(result, Err(CoreError::InvalidPrice(_))));
        assert_eq!(item, before);
    }

    #[test]
    fn test_patch_deserialize() {
        let patch: LineItemPatch =
            serde_json::from_str(r#"{"qty": 3, "options": {"size": "XL"}}"#).unwrap();
        assert_eq!(patch.qty, Some(dec!(3)));
        assert!(patch.id.is_none());
        assert_eq!(
            patch.options.unwrap().get("size"),
            Some(&AttributeValue::Text("XL".into()))
        );
    }

    #[test]
    fn test_export_keys() {
        let json = serde_json::to_value(shirt().export()).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "rowId",
            "id",
            "name",
            "qty",
            "price",
            "options",
            "extras",
            "tax",
            "isSaved",
            "subtotal",
            "priceDiscount",
            "discount",
            "discountTotal",
            "discountRate",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert!(!obj.contains_key("model"));
        assert_eq!(obj.len(), 14);
    }
}
