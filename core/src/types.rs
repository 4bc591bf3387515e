//! Shared primitive types used across the pipeline.

/// Currency amount in NPR. Whole-rupee in the source data but kept as f64
/// so fractional cells survive ingestion.
pub type Amount = f64;

/// A percentage already rounded to two decimal places.
pub type Percent = f64;

/// Hour of day, 0..=23.
pub type Hour = u8;

/// Hex colour string used by the presentation layer, e.g. `#00A76F`.
pub type Color = String;
