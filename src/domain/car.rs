//! Nested classic-car records: categories, files, and search hit shapes.
//!
//! The car search endpoint returns flat arrays alongside each car — all of its
//! categories and all of its files in one batch — and leaves the tree
//! reconstruction to the client (see [`crate::aggregate`]). These records model
//! that wire shape with explicit defaults for anything the API may omit, which
//! is what keeps the aggregator free of absence checks.

use serde::{Deserialize, Serialize};

/// A classic car as embedded in a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    /// Server-assigned identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// A named grouping of files under one car.
///
/// The foreign relation to its parent car is supplied by the API per search
/// hit; the client only displays that scoping, it does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A record within a category carrying notes and ordered picture links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Foreign id of the [`Category`] this file belongs to.
    pub category: String,
    /// Ordered, non-unique image URLs; display order is significant.
    /// Missing on the wire decodes as empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub picture_links: Vec<String>,
}

/// One element of the car search response: a car plus the flat category and
/// file arrays the aggregator rebuilds into a tree.
///
/// All three parts are optional on the wire. A hit without a `car` still
/// renders (as a placeholder); missing arrays are treated as empty rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CarSearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<Car>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileEntry>,
}

/// Payload for creating a classic car listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    pub name: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Owner account id the listing is created under, when one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}
