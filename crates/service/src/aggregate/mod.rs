//! In-memory aggregate indices.
//!
//! `ResourceIndex` owns every aggregate and is the source of truth.
//! `RateRefIndex` is a flat projection of the embedded rate refs keyed by
//! their own id. `AggregateState` is the only type allowed to mutate both,
//! and `ResourceStore` serializes those mutations together with persistence.

pub mod rate_ref_index;
pub mod resource_index;
pub mod state;
pub mod store;

pub use rate_ref_index::{RateRefEntry, RateRefIndex};
pub use resource_index::ResourceIndex;
pub use state::AggregateState;
pub use store::ResourceStore;
