// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Sensors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Synthetic tomography camera signals.
//!
//! A point source at (R, Z) is back-projected through each camera pinhole
//! onto the detector array. The unit signal is split between the two
//! detectors that bracket the hit point, so the weighted detector position
//! is exactly the hit point.

use fusion_types::constants::{N_CHANNELS, N_DETECTORS};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Camera;
use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::geometry::{DetectorGeometry, Point};

/// Slack on the segment parameter when matching a hit to a detector pair.
const SEGMENT_EPS: f64 = 1e-12;

/// Default shot-noise fraction.
pub const NOISE_FRAC: f64 = 0.05;

/// Default noise floor for dark channels.
pub const NOISE_FLOOR: f64 = 0.001;

fn cross(a: Point, b: Point) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

/// Forward model of both cameras for point sources.
#[derive(Debug, Clone, Default)]
pub struct SyntheticCameras {
    geometry: DetectorGeometry,
}

impl SyntheticCameras {
    pub fn new(geometry: DetectorGeometry) -> Self {
        SyntheticCameras { geometry }
    }

    pub fn geometry(&self) -> &DetectorGeometry {
        &self.geometry
    }

    /// Detector pair `k, k+1` and fraction `u` along it hit by the ray from
    /// (r, z) through the pinhole.
    fn hit(&self, camera: Camera, r: f64, z: f64) -> Option<(usize, f64)> {
        let pinhole = self.geometry.pinhole(camera);
        let dir = (pinhole.0 - r, pinhole.1 - z);
        let dets = self.geometry.detectors(camera);

        for k in 0..N_DETECTORS - 1 {
            let (a, b) = (dets[k], dets[k + 1]);
            let seg = (b.0 - a.0, b.1 - a.1);
            let denom = cross(dir, seg);
            if denom == 0.0 {
                continue;
            }
            let w = (a.0 - pinhole.0, a.1 - pinhole.1);
            let t = cross(w, seg) / denom;
            let u = cross(w, dir) / denom;
            if t > 0.0 && (-SEGMENT_EPS..=1.0 + SEGMENT_EPS).contains(&u) {
                return Some((k, u.clamp(0.0, 1.0)));
            }
        }
        None
    }

    /// Point on the detector array that sees a source at (r, z), or `None`
    /// when the source is outside the camera's field of view.
    pub fn project(&self, camera: Camera, r: f64, z: f64) -> Option<Point> {
        let (k, u) = self.hit(camera, r, z)?;
        let dets = self.geometry.detectors(camera);
        let (a, b) = (dets[k], dets[k + 1]);
        Some((a.0 + u * (b.0 - a.0), a.1 + u * (b.1 - a.1)))
    }

    /// The 16 signals of `camera` for a unit point source at (r, z).
    pub fn camera_signals(&self, camera: Camera, r: f64, z: f64) -> Option<[f64; N_DETECTORS]> {
        let (k, u) = self.hit(camera, r, z)?;
        let mut signals = [0.0; N_DETECTORS];
        signals[k] = 1.0 - u;
        signals[k + 1] = u;
        Some(signals)
    }

    /// 32 × T batch for a sequence of source positions, `None` if any
    /// source is outside either field of view.
    pub fn batch(&self, sources: &[(f64, f64)]) -> Option<Array2<f64>> {
        let mut signals = Array2::zeros((N_CHANNELS, sources.len()));
        for (t, &(r, z)) in sources.iter().enumerate() {
            for camera in Camera::ALL {
                let cam = self.camera_signals(camera, r, z)?;
                let first = camera.first_channel();
                for (i, &v) in cam.iter().enumerate() {
                    signals[[first + i, t]] = v;
                }
            }
        }
        Some(signals)
    }
}

/// Add Gaussian shot noise: σ = `frac`·signal on lit channels, `floor` on dark ones.
///
/// `frac` and `floor` must be finite and non-negative.
pub fn add_noise<R: Rng + ?Sized>(
    signals: &mut Array2<f64>,
    frac: f64,
    floor: f64,
    rng: &mut R,
) -> FusionResult<()> {
    for (name, value) in [("frac", frac), ("floor", floor)] {
        if !value.is_finite() || value < 0.0 {
            return Err(FusionError::InvalidParameter(format!(
                "noise {name} must be finite and non-negative, got {value}"
            )));
        }
    }
    for v in signals.iter_mut() {
        let sigma = if *v > 0.0 { frac * *v } else { floor };
        let noise = Normal::new(0.0, sigma).map_err(|e| {
            FusionError::InvalidParameter(format!("noise sigma {sigma} for signal {v}: {e}"))
        })?;
        *v += noise.sample(rng);
    }
    Ok(())
}
