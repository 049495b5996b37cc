use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Coarse frame orientation of a video, used to namespace storage keys.
///
/// Never persisted on its own; always recomputed from probed dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Classify frame dimensions.
    ///
    /// Only frames close to 16:9 (or 9:16) get a named orientation; square and
    /// ultra-wide frames fall through to `Other`, as do zero dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Orientation::Other;
        }

        let ratio = width as f32 / height as f32;
        let reciprocal = height as f32 / width as f32;

        if in_band(ratio, 1.5, 1.9) && in_band(reciprocal, 0.4, 0.6) {
            Orientation::Landscape
        } else if in_band(reciprocal, 1.5, 1.9) && in_band(ratio, 0.4, 0.6) {
            Orientation::Portrait
        } else {
            Orientation::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

fn in_band(value: f32, low: f32, high: f32) -> bool {
    value > low && value < high
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
