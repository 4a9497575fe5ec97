use encimera_types::MIN_TRIMMED_LENGTH_MM;
use serde::{Deserialize, Serialize};

/// Default slab thickness, in meters.
pub const DEFAULT_THICKNESS_M: f64 = 0.03;

/// Shortest box drawn for a piece whose trim swallows its whole length.
pub const DEFAULT_MIN_VISUAL_LENGTH_M: f64 = MIN_TRIMMED_LENGTH_MM / 1000.0;

/// Tunables for layout computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub thickness_m: f64,
    pub min_visual_length_m: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            thickness_m: DEFAULT_THICKNESS_M,
            min_visual_length_m: DEFAULT_MIN_VISUAL_LENGTH_M,
        }
    }
}
