//! Renderers module for the cargo layout constructor
//!
//! Pure projections from the grid model: the display list consumed by the
//! host page and the derived load statistics.

pub mod display_list;
pub mod stats;

pub use display_list::{build_display_list, GridDisplayList, RenderBlock, RenderCargo, ZONE_LABELS};
pub use stats::{compute_stats, EnvReadout, KindCounts, LoadStats};
