//! Relational Aggregator: flat API arrays in, display tree out.
//!
//! # Modules
//!
//! - `tree`: the order-preserving Category → File grouping and placeholder
//!   degradation for hits without a car
//! - `session`: explicit open/select/close lifecycle of the persisted
//!   selected-item key

pub mod session;
pub mod tree;

pub use session::AggregationSession;
pub use tree::{aggregate, aggregate_hit, AggregatedCar, CategorySection, PLACEHOLDER_IMAGE};
