use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the mapping table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingSource {
    /// Derived from the fan geometry
    #[default]
    Computed,
    /// Two raw little-endian f32 files, row-major `[height, width]`
    Precomputed {
        map_x: PathBuf,
        map_y: PathBuf,
        width: usize,
        height: usize,
    },
}
