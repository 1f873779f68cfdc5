//! Wire DTOs for the productosAMMA collection.
//!
//! # Design
//! The remote contract names its fields `_id`, `nombreAMMA`,
//! `descripcionAMMA` and `precio`; Rust field names stay idiomatic behind
//! `#[serde(rename)]`. These types are defined independently from the
//! mock-server crate — integration tests catch any schema drift between the
//! two.
//!
//! Price is the one field with history. The form holds it as free text and
//! coerces at submit time: empty text means zero, unparseable text becomes
//! NaN. NaN has no JSON representation, so it travels as `null`, and a
//! record that comes back with a `null` (or absent) price deserializes to
//! NaN again so the list still loads and renders.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A product record as held by the collection endpoint.
///
/// The identifier is server-assigned and opaque; the client never inspects
/// or constructs one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombreAMMA")]
    pub name: String,
    #[serde(rename = "descripcionAMMA")]
    pub description: String,
    #[serde(
        rename = "precio",
        default = "nan",
        serialize_with = "price_to_json",
        deserialize_with = "price_from_json"
    )]
    pub price: f64,
}

/// Request payload for creating or updating a product.
///
/// Create and update send the same three fields; for updates the identifier
/// travels in the path, never in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(rename = "nombreAMMA")]
    pub name: String,
    #[serde(rename = "descripcionAMMA")]
    pub description: String,
    #[serde(
        rename = "precio",
        default = "nan",
        serialize_with = "price_to_json",
        deserialize_with = "price_from_json"
    )]
    pub price: f64,
}

/// Coerce the price text of the form into a number.
///
/// Surrounding whitespace is ignored, empty text is zero, and anything that
/// does not parse as a float is NaN — which then rides the wire as `null`
/// (see module docs). No validation happens here on purpose: the form
/// forwards whatever the user typed.
pub fn coerce_price(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Render a stored price back into form text, in its shortest round-trip
/// form (`9.99` → `"9.99"`, `5.0` → `"5"`, NaN → `"NaN"`).
pub fn format_price(price: f64) -> String {
    format!("{price}")
}

fn nan() -> f64 {
    f64::NAN
}

fn price_to_json<S>(price: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if price.is_finite() {
        serializer.serialize_f64(*price)
    } else {
        serializer.serialize_none()
    }
}

fn price_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
