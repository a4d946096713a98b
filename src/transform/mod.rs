//! Source-specific transformers

mod ufo_sightings;

pub use ufo_sightings::{SIGHTING_COLUMNS, UfoSightingTransform};
