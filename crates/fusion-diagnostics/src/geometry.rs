// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Camera Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pinhole and detector positions of the two tomography cameras, and the
//! signal-weighted detector position ("centroid of light") of one camera.

use std::sync::OnceLock;

use fusion_types::config::GeometryConfig;
use fusion_types::constants::{
    DETECTORS_OUT_X, DETECTORS_OUT_Y, DETECTORS_TOP_X, DETECTORS_TOP_Y, N_DETECTORS, PINHOLE_OUT,
    PINHOLE_TOP,
};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Camera;
use ndarray::ArrayView1;

/// A point (x, y) in the poloidal plane [mm].
pub type Point = (f64, f64);

/// Detector positions of one camera, channel order.
pub type DetectorArray = [Point; N_DETECTORS];

/// Validated, immutable geometry of both cameras.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorGeometry {
    pinhole_top: Point,
    pinhole_out: Point,
    detectors_top: DetectorArray,
    detectors_out: DetectorArray,
}

static STANDARD: OnceLock<DetectorGeometry> = OnceLock::new();

fn zip_xy(x: &[f64; N_DETECTORS], y: &[f64; N_DETECTORS]) -> DetectorArray {
    let mut out = [(0.0, 0.0); N_DETECTORS];
    for (i, p) in out.iter_mut().enumerate() {
        *p = (x[i], y[i]);
    }
    out
}

impl DetectorGeometry {
    /// Build from fixed-size arrays, checking every coordinate.
    pub fn new(
        pinhole_top: Point,
        pinhole_out: Point,
        detectors_top: DetectorArray,
        detectors_out: DetectorArray,
    ) -> FusionResult<Self> {
        let geometry = DetectorGeometry {
            pinhole_top,
            pinhole_out,
            detectors_top,
            detectors_out,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Build from slices; each detector slice must hold exactly 16 points.
    pub fn from_slices(
        pinhole_top: Point,
        pinhole_out: Point,
        detectors_top: &[Point],
        detectors_out: &[Point],
    ) -> FusionResult<Self> {
        let top = to_array(Camera::Top, detectors_top)?;
        let out = to_array(Camera::Out, detectors_out)?;
        Self::new(pinhole_top, pinhole_out, top, out)
    }

    pub fn from_config(config: &GeometryConfig) -> FusionResult<Self> {
        let top: Vec<Point> = config.detectors_top.iter().map(|p| (p[0], p[1])).collect();
        let out: Vec<Point> = config.detectors_out.iter().map(|p| (p[0], p[1])).collect();
        Self::from_slices(
            (config.pinhole_top[0], config.pinhole_top[1]),
            (config.pinhole_out[0], config.pinhole_out[1]),
            &top,
            &out,
        )
    }

    /// The built-in camera geometry, built once per process.
    pub fn standard() -> &'static DetectorGeometry {
        STANDARD.get_or_init(|| DetectorGeometry {
            pinhole_top: PINHOLE_TOP,
            pinhole_out: PINHOLE_OUT,
            detectors_top: zip_xy(&DETECTORS_TOP_X, &DETECTORS_TOP_Y),
            detectors_out: zip_xy(&DETECTORS_OUT_X, &DETECTORS_OUT_Y),
        })
    }

    pub fn pinhole(&self, camera: Camera) -> Point {
        match camera {
            Camera::Top => self.pinhole_top,
            Camera::Out => self.pinhole_out,
        }
    }

    pub fn detectors(&self, camera: Camera) -> &DetectorArray {
        match camera {
            Camera::Top => &self.detectors_top,
            Camera::Out => &self.detectors_out,
        }
    }

    /// Unweighted mean detector position of a camera.
    pub fn mean_detector(&self, camera: Camera) -> Point {
        let dets = self.detectors(camera);
        let n = dets.len() as f64;
        let (sx, sy) = dets
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
        (sx / n, sy / n)
    }

    /// Signal-weighted detector position of `camera`.
    pub fn weighted_position(&self, camera: Camera, signals: ArrayView1<f64>) -> FusionResult<Point> {
        weighted_centroid(camera, self.detectors(camera), signals)
    }

    fn validate(&self) -> FusionResult<()> {
        for camera in Camera::ALL {
            let (px, py) = self.pinhole(camera);
            if !px.is_finite() || !py.is_finite() {
                return Err(FusionError::GeometryConfig(format!(
                    "{camera} pinhole ({px}, {py}) is not finite"
                )));
            }
            for (i, &(x, y)) in self.detectors(camera).iter().enumerate() {
                if !x.is_finite() || !y.is_finite() {
                    return Err(FusionError::GeometryConfig(format!(
                        "{camera} detector {} at ({x}, {y}) is not finite",
                        i + 1
                    )));
                }
                if x == px && y == py {
                    return Err(FusionError::GeometryConfig(format!(
                        "{camera} detector {} coincides with its pinhole",
                        i + 1
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for DetectorGeometry {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn to_array(camera: Camera, points: &[Point]) -> FusionResult<DetectorArray> {
    points.try_into().map_err(|_| {
        FusionError::GeometryConfig(format!(
            "{camera} camera has {} detectors, expected {N_DETECTORS}",
            points.len()
        ))
    })
}

/// `Σ sᵢ·pᵢ / Σ sᵢ` over one camera's detectors.
///
/// Fails with `SignalShape` unless there are exactly 16 signals, and with
/// `DegenerateSignal` when the signal sum is zero or not finite.
pub fn weighted_centroid(
    camera: Camera,
    detectors: &DetectorArray,
    signals: ArrayView1<f64>,
) -> FusionResult<Point> {
    if signals.len() != N_DETECTORS {
        return Err(FusionError::SignalShape {
            expected: N_DETECTORS,
            got: signals.len(),
        });
    }

    let mut sum = 0.0;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for (&s, &(x, y)) in signals.iter().zip(detectors.iter()) {
        sum += s;
        sum_x += s * x;
        sum_y += s * y;
    }

    if sum == 0.0 || !sum.is_finite() {
        return Err(FusionError::DegenerateSignal { camera, sum });
    }
    let avg = (sum_x / sum, sum_y / sum);
    if !avg.0.is_finite() || !avg.1.is_finite() {
        return Err(FusionError::DegenerateSignal { camera, sum });
    }
    Ok(avg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn one_hot(k: usize, value: f64) -> Array1<f64> {
        let mut s = Array1::zeros(N_DETECTORS);
        s[k] = value;
        s
    }

    #[test]
    fn test_standard_geometry_is_valid() {
        let g = DetectorGeometry::standard();
        assert!(g.validate().is_ok());
        assert_eq!(g.pinhole(Camera::Top), (5.0, 97.0));
        assert_eq!(g.detectors(Camera::Out)[0], (118.0, 7.125));
    }

    #[test]
    fn test_standard_is_shared() {
        let a = DetectorGeometry::standard() as *const _;
        let b = DetectorGeometry::standard() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_signal_gives_mean_position() {
        let g = DetectorGeometry::standard();
        let s = Array1::from_elem(N_DETECTORS, 3.7);
        for camera in Camera::ALL {
            let (x, y) = g.weighted_position(camera, s.view()).unwrap();
            let (mx, my) = g.mean_detector(camera);
            assert!((x - mx).abs() < 1e-12, "{camera}: x={x} mean={mx}");
            assert!((y - my).abs() < 1e-12, "{camera}: y={y} mean={my}");
        }
    }

    #[test]
    fn test_single_channel_gives_detector_position() {
        let g = DetectorGeometry::standard();
        for camera in Camera::ALL {
            for k in 0..N_DETECTORS {
                let p = g.weighted_position(camera, one_hot(k, 1.0).view()).unwrap();
                assert_eq!(p, g.detectors(camera)[k]);
            }
        }
    }

    #[test]
    fn test_two_channel_midpoint() {
        let g = DetectorGeometry::standard();
        let mut s = Array1::zeros(N_DETECTORS);
        s[8] = 5.0;
        s[9] = 5.0;
        let (x, y) = g.weighted_position(Camera::Top, s.view()).unwrap();
        // (5.475 + 6.425) / 2
        assert!((x - 5.95).abs() < 1e-12, "x = {x}");
        assert_eq!(y, 106.0);
    }

    #[test]
    fn test_zero_sum_is_degenerate() {
        let g = DetectorGeometry::standard();
        let s = Array1::zeros(N_DETECTORS);
        let err = g.weighted_position(Camera::Out, s.view()).unwrap_err();
        match err {
            FusionError::DegenerateSignal { camera, sum } => {
                assert_eq!(camera, Camera::Out);
                assert_eq!(sum, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cancelling_signals_are_degenerate() {
        let g = DetectorGeometry::standard();
        let mut s = Array1::zeros(N_DETECTORS);
        s[2] = 1.5;
        s[11] = -1.5;
        assert!(g.weighted_position(Camera::Top, s.view()).is_err());
    }

    #[test]
    fn test_nan_signal_is_degenerate() {
        let g = DetectorGeometry::standard();
        let s = one_hot(4, f64::NAN);
        assert!(matches!(
            g.weighted_position(Camera::Top, s.view()),
            Err(FusionError::DegenerateSignal { .. })
        ));
    }

    #[test]
    fn test_wrong_detector_count_rejected() {
        let top: Vec<Point> = (0..15).map(|i| (i as f64, 106.0)).collect();
        let out: Vec<Point> = (0..16).map(|i| (118.0, i as f64)).collect();
        let err = DetectorGeometry::from_slices((5.0, 97.0), (109.0, 0.0), &top, &out).unwrap_err();
        match err {
            FusionError::GeometryConfig(msg) => assert!(msg.contains("15 detectors"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_detector_rejected() {
        let mut top = *DetectorGeometry::standard().detectors(Camera::Top);
        top[3].0 = f64::INFINITY;
        let out = *DetectorGeometry::standard().detectors(Camera::Out);
        assert!(matches!(
            DetectorGeometry::new(PINHOLE_TOP, PINHOLE_OUT, top, out),
            Err(FusionError::GeometryConfig(_))
        ));
    }

    #[test]
    fn test_wrong_signal_count_rejected() {
        let g = DetectorGeometry::standard();
        let s = Array1::from(vec![0.0, 0.0, 0.0, 1.0]);
        match g.weighted_position(Camera::Top, s.view()) {
            Err(FusionError::SignalShape { expected, got }) => assert_eq!((expected, got), (16, 4)),
            other => panic!("expected SignalShape, got {other:?}"),
        }
        let long = Array1::from_elem(N_DETECTORS + 1, 1.0);
        assert!(g.weighted_position(Camera::Out, long.view()).is_err());
    }

    #[test]
    fn test_nan_coordinate_in_config_rejected() {
        let mut cfg = GeometryConfig::default();
        cfg.detectors_top[5][1] = f64::NAN;
        match DetectorGeometry::from_config(&cfg) {
            Err(FusionError::GeometryConfig(msg)) => assert!(msg.contains("not finite"), "{msg}"),
            other => panic!("expected GeometryConfig, got {other:?}"),
        }

        let mut cfg = GeometryConfig::default();
        cfg.pinhole_out[0] = f64::NAN;
        assert!(matches!(
            DetectorGeometry::from_config(&cfg),
            Err(FusionError::GeometryConfig(_))
        ));
    }

    #[test]
    fn test_detector_on_pinhole_rejected() {
        let top = *DetectorGeometry::standard().detectors(Camera::Top);
        let mut out = *DetectorGeometry::standard().detectors(Camera::Out);
        out[7] = PINHOLE_OUT;
        assert!(DetectorGeometry::new(PINHOLE_TOP, PINHOLE_OUT, top, out).is_err());
    }

    #[test]
    fn test_from_default_config_matches_standard() {
        let g = DetectorGeometry::from_config(&GeometryConfig::default()).unwrap();
        assert_eq!(&g, DetectorGeometry::standard());
    }

    #[test]
    fn test_config_with_short_array_rejected() {
        let mut cfg = GeometryConfig::default();
        cfg.detectors_out.pop();
        assert!(matches!(
            DetectorGeometry::from_config(&cfg),
            Err(FusionError::GeometryConfig(_))
        ));
    }
}
