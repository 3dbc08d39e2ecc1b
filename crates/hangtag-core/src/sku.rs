//! # SKU Codec
//!
//! Assembly and checked decoding of the composite SKU.
//!
//! ## SKU Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Composite SKU Anatomy                                │
//! │                                                                         │
//! │        100    -   SHIRT   -    RED    -     M                          │
//! │       ┌───┐      ┌─────┐      ┌───┐       ┌───┐                        │
//! │       design      style       color        size                         │
//! │                                                                         │
//! │  • Each field is trimmed, non-empty, and free of '-'                   │
//! │  • The joined key is upper-cased                                       │
//! │  • The SKU is THE key of the inventory map and the payload of          │
//! │    every printed QR code                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! Splitting an assembled SKU on `-` yields exactly the four original
//! fields. [`Sku::assemble`] enforces the precondition (no `-` inside a
//! field) and [`Sku::parts`] checks the shape instead of trusting it, so a
//! key edited behind the store's back fails loudly rather than rendering
//! misaligned columns.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::validate_identity_field;

/// Separator joining the four SKU identity fields.
pub const SKU_SEPARATOR: char = '-';

/// Number of identity fields in a well-formed SKU.
pub const SKU_FIELD_COUNT: usize = 4;

// =============================================================================
// Sku
// =============================================================================

/// A composite Stock Keeping Unit: `DESIGN-STYLE-COLOR-SIZE`, upper-cased.
///
/// ## Identity
/// The SKU is the sole key of the inventory map and the string encoded in
/// the printed QR code. There is no surrogate id; two equal SKUs are the
/// same product variant.
///
/// ## Construction
/// - [`Sku::assemble`] validates and builds from the four identity fields
/// - [`Sku::from_scan`] wraps a raw decoded token verbatim (lookups must
///   tolerate arbitrary scanner output)
/// - Deserialization is transparent: stored keys round-trip unchanged
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Sku(String);

impl Sku {
    /// Assembles a SKU from the four identity fields.
    ///
    /// ## Rules
    /// - Each field is trimmed; empty fields are rejected
    /// - Fields must not contain the `-` separator
    /// - The joined key is upper-cased
    ///
    /// ## Example
    /// ```rust
    /// use hangtag_core::Sku;
    ///
    /// let sku = Sku::assemble("100", "shirt", "red", "m").unwrap();
    /// assert_eq!(sku.as_str(), "100-SHIRT-RED-M");
    ///
    /// assert!(Sku::assemble("100", "", "red", "m").is_err());
    /// assert!(Sku::assemble("10-0", "shirt", "red", "m").is_err());
    /// ```
    pub fn assemble(
        design: &str,
        style: &str,
        color: &str,
        size: &str,
    ) -> Result<Sku, ValidationError> {
        let design = validate_identity_field("design", design)?;
        let style = validate_identity_field("style", style)?;
        let color = validate_identity_field("color", color)?;
        let size = validate_identity_field("size", size)?;

        let joined = format!(
            "{design}{sep}{style}{sep}{color}{sep}{size}",
            sep = SKU_SEPARATOR
        );
        Ok(Sku(joined.to_uppercase()))
    }

    /// Wraps a raw scanner token without validating its shape.
    ///
    /// Lookups in the inventory map must accept whatever the decoder
    /// produced; shape checking only matters when the fields are needed
    /// (see [`Sku::parts`]).
    pub fn from_scan(token: &str) -> Sku {
        Sku(token.to_string())
    }

    /// Decodes the SKU into its four identity fields.
    ///
    /// ## Errors
    /// Returns [`CoreError::MalformedSku`] when the key does not split into
    /// exactly four non-empty fields. Keys only reach that state through
    /// external edits of the persisted blob; the documented API never
    /// produces one.
    pub fn parts(&self) -> CoreResult<SkuParts<'_>> {
        let fields: Vec<&str> = self.0.split(SKU_SEPARATOR).collect();

        if fields.len() != SKU_FIELD_COUNT || fields.iter().any(|f| f.is_empty()) {
            return Err(CoreError::MalformedSku {
                sku: self.0.clone(),
                fields: fields.len(),
            });
        }

        Ok(SkuParts {
            design: fields[0],
            style: fields[1],
            color: fields[2],
            size: fields[3],
        })
    }

    /// Returns the SKU as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lets `BTreeMap<Sku, _>` be probed with a plain `&str` scanner token.
impl Borrow<str> for Sku {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Sku Parts
// =============================================================================

/// The four identity fields of a decoded SKU, borrowed from the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkuParts<'a> {
    pub design: &'a str,
    pub style: &'a str,
    pub color: &'a str,
    pub size: &'a str,
}

// =============================================================================
// Unit Tests
// =============================================================================
