use serde::{Deserialize, Serialize};

/// Handle of a layer drawn on the map surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);
