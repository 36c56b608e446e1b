//! Optical estimate of the plasma centroid from the top and out cameras.
//!
//! Each camera's signals give a weighted detector position; the line of
//! sight from that position through the camera pinhole is built for both
//! cameras, and the centroid is where the two lines cross.

use fusion_types::constants::{N_CHANNELS, N_DETECTORS};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::{Camera, CentroidEstimate, CentroidSeries};
use log::{debug, warn};
use ndarray::{s, Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::geometry::DetectorGeometry;
use crate::line_of_sight::LineOfSight;

/// Batches with at least this many samples are solved on the rayon pool.
pub const PARALLEL_SAMPLE_THRESHOLD: usize = 4096;

/// Centroid estimator over a fixed camera geometry.
#[derive(Debug, Clone, Default)]
pub struct TomoCentroid {
    geometry: DetectorGeometry,
}

impl TomoCentroid {
    pub fn new(geometry: DetectorGeometry) -> Self {
        TomoCentroid { geometry }
    }

    pub fn geometry(&self) -> &DetectorGeometry {
        &self.geometry
    }

    /// Line of sight of `camera` for one sample of its 16 signals.
    pub fn line_of_sight(
        &self,
        camera: Camera,
        signals: ArrayView1<f64>,
    ) -> FusionResult<LineOfSight> {
        let point = self.geometry.weighted_position(camera, signals)?;
        LineOfSight::through(self.geometry.pinhole(camera), point).ok_or_else(|| {
            FusionError::DegenerateSignal {
                camera,
                sum: signals.sum(),
            }
        })
    }

    /// Centroid for a single sample.
    ///
    /// `top` and `out` hold the 16 signals of each camera in channel order.
    pub fn estimate_sample(
        &self,
        top: ArrayView1<f64>,
        out: ArrayView1<f64>,
    ) -> FusionResult<CentroidEstimate> {
        for len in [top.len(), out.len()] {
            if len != N_DETECTORS {
                return Err(FusionError::SignalShape {
                    expected: N_DETECTORS,
                    got: len,
                });
            }
        }
        let los_top = self.line_of_sight(Camera::Top, top)?;
        let los_out = self.line_of_sight(Camera::Out, out)?;
        let (r, z) = los_top.intersect(&los_out)?;
        Ok(CentroidEstimate { r, z })
    }

    /// Centroids for a 32 × T batch.
    ///
    /// Degenerate or parallel samples do not abort the batch: they are NaN
    /// in the output and listed in `CentroidSeries::failures`. Only a batch
    /// without exactly 32 channels is rejected as a whole.
    pub fn estimate_batch(&self, signals: ArrayView2<f64>) -> FusionResult<CentroidSeries> {
        check_shape(&signals)?;
        let n_samples = signals.ncols();
        let top = signals.slice(s![..N_DETECTORS, ..]);
        let out = signals.slice(s![N_DETECTORS.., ..]);

        let solve = |t: usize| self.estimate_sample(top.column(t), out.column(t));
        let series = if n_samples >= PARALLEL_SAMPLE_THRESHOLD {
            let results: Vec<FusionResult<CentroidEstimate>> =
                (0..n_samples).into_par_iter().map(solve).collect();
            CentroidSeries::from_samples(results)
        } else {
            CentroidSeries::from_samples((0..n_samples).map(solve))
        };

        debug!(
            "tomo centroid: {} samples, {} valid, {} failed",
            n_samples,
            series.n_valid(),
            series.failures().len()
        );
        Ok(series)
    }

    /// Like [`estimate_batch`](Self::estimate_batch) but fails on the first
    /// bad sample with `FusionError::SampleFailed`.
    pub fn estimate_batch_strict(&self, signals: ArrayView2<f64>) -> FusionResult<CentroidSeries> {
        check_shape(&signals)?;
        let top = signals.slice(s![..N_DETECTORS, ..]);
        let out = signals.slice(s![N_DETECTORS.., ..]);
        let mut estimates = Vec::with_capacity(signals.ncols());
        for t in 0..signals.ncols() {
            let est = self
                .estimate_sample(top.column(t), out.column(t))
                .map_err(|e| FusionError::SampleFailed {
                    sample: t,
                    source: Box::new(e),
                })?;
            estimates.push(Ok(est));
        }
        Ok(CentroidSeries::from_samples(estimates))
    }
}

fn check_shape(signals: &ArrayView2<f64>) -> FusionResult<()> {
    if signals.nrows() != N_CHANNELS {
        return Err(FusionError::SignalShape {
            expected: N_CHANNELS,
            got: signals.nrows(),
        });
    }
    Ok(())
}

/// Centroid `(R, Z)` series for a 32 × T batch with the built-in geometry.
///
/// Failed samples are NaN in both arrays and logged at warn level; use
/// [`TomoCentroid::estimate_batch`] for the failure list.
pub fn tomo_centroid(signals: ArrayView2<f64>) -> FusionResult<(Array1<f64>, Array1<f64>)> {
    let series = TomoCentroid::default().estimate_batch(signals)?;
    let (r, z, failures) = series.into_parts();
    for f in &failures {
        warn!("tomo centroid sample {}: {}", f.sample, f.error);
    }
    Ok((r, z))
}
