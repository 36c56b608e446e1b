// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{
    DETECTORS_OUT_X, DETECTORS_OUT_Y, DETECTORS_TOP_X, DETECTORS_TOP_Y, PINHOLE_OUT, PINHOLE_TOP,
};
use crate::error::FusionResult;

/// Camera geometry as read from JSON. Lengths are not checked here;
/// `DetectorGeometry::from_config` validates them.
///
/// ```json
/// { "pinhole_top": [5.0, 97.0], "pinhole_out": [109.0, 0.0],
///   "detectors_top": [[-2.125, 106.0], ...], "detectors_out": [[118.0, 7.125], ...] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub pinhole_top: [f64; 2],
    pub pinhole_out: [f64; 2],
    pub detectors_top: Vec<[f64; 2]>,
    pub detectors_out: Vec<[f64; 2]>,
}

impl Default for GeometryConfig {
    /// The built-in camera geometry.
    fn default() -> Self {
        GeometryConfig {
            pinhole_top: [PINHOLE_TOP.0, PINHOLE_TOP.1],
            pinhole_out: [PINHOLE_OUT.0, PINHOLE_OUT.1],
            detectors_top: DETECTORS_TOP_X
                .iter()
                .zip(DETECTORS_TOP_Y.iter())
                .map(|(&x, &y)| [x, y])
                .collect(),
            detectors_out: DETECTORS_OUT_X
                .iter()
                .zip(DETECTORS_OUT_Y.iter())
                .map(|(&x, &y)| [x, y])
                .collect(),
        }
    }
}

impl GeometryConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> FusionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}
