//! Client-side reconstruction of the Category → File → PictureLink tree.
//!
//! The car search endpoint returns nesting as two flat arrays per hit: all
//! categories of a car and all of its files, each file carrying its category's
//! foreign id. This module rebuilds the display tree from those arrays.
//!
//! # Guarantees
//!
//! - Categories appear in their input order; files keep their relative input
//!   order within a category.
//! - Every file lands under exactly one category, or under none when its
//!   `category` id matches no supplied category. Orphans are silently omitted
//!   from display — an absent category is a data condition, not an error.
//! - The inputs are only borrowed, never mutated or cloned.
//! - Total work is O(|categories| × |files|), which is the right trade at the
//!   batch sizes one car produces.

use crate::domain::{Car, CarSearchHit, Category, FileEntry};

/// Image URL rendered when a hit carries no usable car record.
pub const PLACEHOLDER_IMAGE: &str = "default_image_url";

/// One category of the rebuilt tree with the files that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection<'a> {
    pub category: &'a Category,
    /// Files whose `category` equals the category's id, in input order.
    pub files: Vec<&'a FileEntry>,
}

/// A fully aggregated search hit: the optional car plus its category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedCar<'a> {
    pub car: Option<&'a Car>,
    pub sections: Vec<CategorySection<'a>>,
}

impl AggregatedCar<'_> {
    /// Car name, or a placeholder when the hit carried no car record.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.car.map_or("(unknown car)", |c| c.name.as_str())
    }

    /// Car model, or an empty string for a placeholder hit.
    #[must_use]
    pub fn display_model(&self) -> &str {
        self.car.map_or("", |c| c.model.as_str())
    }

    /// Car image URL, falling back to [`PLACEHOLDER_IMAGE`] when the hit has
    /// no car or the car has no image.
    #[must_use]
    pub fn display_image(&self) -> &str {
        self.car
            .and_then(|c| c.image.as_deref())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Groups files under their categories, preserving input order on both levels.
#[must_use]
pub fn aggregate<'a>(
    categories: &'a [Category],
    files: &'a [FileEntry],
) -> Vec<CategorySection<'a>> {
    let _span = tracing::debug_span!(
        "aggregate",
        category_count = categories.len(),
        file_count = files.len()
    )
    .entered();

    let sections: Vec<CategorySection<'a>> = categories
        .iter()
        .map(|category| CategorySection {
            category,
            files: files
                .iter()
                .filter(|file| file.category == category.id)
                .collect(),
        })
        .collect();

    let placed: usize = sections.iter().map(|s| s.files.len()).sum();
    if placed < files.len() {
        tracing::debug!(orphaned = files.len() - placed, "files omitted, category not in batch");
    }

    sections
}

/// Aggregates one search hit into its display tree.
///
/// A hit without a car still yields its sections; rendering degrades to the
/// placeholder accessors on [`AggregatedCar`] instead of failing.
#[must_use]
pub fn aggregate_hit(hit: &CarSearchHit) -> AggregatedCar<'_> {
    AggregatedCar {
        car: hit.car.as_ref(),
        sections: aggregate(&hit.categories, &hit.files),
    }
}
