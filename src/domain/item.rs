//! Top-level inventory item records.
//!
//! An [`Item`] is the unit the CRUD endpoints operate on: either a tire or a
//! classic car, distinguished by their disjoint attribute sets. The wire format
//! is the API's camelCase JSON with Mongo-style `_id` identifiers; fields the
//! API may omit decode to explicit defaults here, at the client boundary, so
//! downstream code never deals with absent sequences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level inventory record.
///
/// The `id` is server-assigned and stable; it is `None` for records that have
/// not been persisted yet (create payloads). The client only ever holds a
/// read-through copy — the API owns the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned identifier, absent until the item is created.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Kind-specific descriptive attributes (tire or car).
    #[serde(flatten)]
    pub attrs: ItemAttrs,

    /// Ordered image URLs attached to the item. Missing on the wire decodes
    /// as empty.
    #[serde(rename = "imageUrls", default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,

    /// Server-managed creation timestamp, if the API reports one.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Server-managed last-modification timestamp, if the API reports one.
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Kind-specific attributes of an [`Item`].
///
/// The API returns plain objects without a discriminator; the two shapes are
/// told apart by their required fields (`brand`/`size` vs. `name`/`model`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemAttrs {
    /// A tire listing.
    Tire(TireAttrs),
    /// A classic car listing.
    Car(CarAttrs),
}

/// Descriptive attributes of a tire listing.
///
/// `brand` and `size` are always present; everything else is optional on the
/// wire and defaults to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TireAttrs {
    pub brand: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tread_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Descriptive attributes of a classic car listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarAttrs {
    pub name: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Item {
    /// Creates an unpersisted tire item with the required fields set.
    ///
    /// The remaining descriptive fields default to `None` and can be filled in
    /// before the item is submitted for creation.
    #[must_use]
    pub fn new_tire(brand: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            id: None,
            attrs: ItemAttrs::Tire(TireAttrs {
                brand: brand.into(),
                size: size.into(),
                tread_condition: None,
                status: None,
                location: None,
                set_info: None,
                season: None,
                price: None,
                notes: None,
            }),
            image_urls: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns a short display label, e.g. `"Michelin - 205/55R16"` for a tire
    /// or `"Eleanor Mustang GT500"` for a car. Used in notifications and CLI
    /// listings.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.attrs {
            ItemAttrs::Tire(t) => format!("{} - {}", t.brand, t.size),
            ItemAttrs::Car(c) => format!("{} {}", c.name, c.model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tire_decodes_with_missing_optional_fields() {
        let json = r#"{"_id":"t1","brand":"Michelin","size":"205/55R16"}"#;
        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.id.as_deref(), Some("t1"));
        assert!(item.image_urls.is_empty());
        match &item.attrs {
            ItemAttrs::Tire(t) => {
                assert_eq!(t.brand, "Michelin");
                assert!(t.price.is_none());
                assert!(t.notes.is_none());
            }
            ItemAttrs::Car(_) => panic!("decoded as car"),
        }
    }

    #[test]
    fn car_decodes_by_required_field_shape() {
        let json = r#"{"_id":"c1","name":"Eleanor","model":"Mustang GT500","image":"m.jpg"}"#;
        let item: Item = serde_json::from_str(json).unwrap();

        match &item.attrs {
            ItemAttrs::Car(c) => {
                assert_eq!(c.name, "Eleanor");
                assert_eq!(c.image.as_deref(), Some("m.jpg"));
                assert!(c.owner.is_none());
            }
            ItemAttrs::Tire(_) => panic!("decoded as tire"),
        }
    }

    #[test]
    fn unpersisted_item_serializes_without_id() {
        let item = Item::new_tire("Pirelli", "225/45R17");
        let json = serde_json::to_string(&item).unwrap();

        assert!(!json.contains("_id"));
        assert!(json.contains("\"brand\":\"Pirelli\""));
    }

    #[test]
    fn label_formats_both_kinds() {
        let tire = Item::new_tire("Michelin", "205/55R16");
        assert_eq!(tire.label(), "Michelin - 205/55R16");

        let json = r#"{"name":"Eleanor","model":"Mustang"}"#;
        let car: Item = serde_json::from_str(json).unwrap();
        assert_eq!(car.label(), "Eleanor Mustang");
    }
}
