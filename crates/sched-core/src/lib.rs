//! Core domain logic for the conference schedule timeline.
//!
//! This crate contains:
//! - Date resolution: free-text session dates to UTC intervals
//! - Location ranking and the track catalog
//! - Normalization of a raw feed into a [`Timeline`]
//! - Live activation: which sessions are in progress or highlighted

pub mod activation;
mod collate;
pub mod details;
pub mod event;
pub mod location;
pub mod normalize;
pub mod resolve;
pub mod timeline;
pub mod track;
pub mod types;

pub use activation::{ActivationEngine, ClassUpdate, RecomputeRequest};
pub use details::EventDetails;
pub use event::RawEvent;
pub use location::{LocationGroup, LocationRank};
pub use normalize::{NormalizedEvent, Schedule, SkipReason, UNKNOWN_VENUE, normalize};
pub use resolve::{DateTimeResolver, ResolveError, ResolvedInterval};
pub use timeline::{Timeline, TimelineError};
pub use track::build_catalog;
pub use types::{DisplayClass, EventId, TrackFilter, ValidationError};
