//! Tempo Convert - Settings for scene object to entity conversion
//!
//! The conversion pipeline itself lives with the host engine; this crate
//! only carries the options value it is configured with.

mod options;

pub use options::{ConversionMode, ConversionOptions};
