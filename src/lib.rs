pub mod error;
pub mod geo;
pub mod input;
pub mod logging;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod record;
pub mod segmenter;
pub mod stats;
pub mod validate;
