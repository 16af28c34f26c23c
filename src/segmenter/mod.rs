//! Trip segmentation.
//!
//! A single left-to-right scan over time-sorted points. Each point is
//! appended to the open trip; when a point lies more than the configured
//! distance or time away from the trip's anchor, the open trip is closed on
//! that point and a new trip starts with it as the anchor. The last point of
//! the input is always appended to the open trip and closes it.

pub mod config;
pub mod engine;
pub mod trip;

pub use config::SegmenterConfig;
pub use engine::{Segmenter, segment};
pub use trip::Trip;
