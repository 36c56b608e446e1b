// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{FusionError, FusionResult};

/// One of the two fan-beam tomography cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Camera {
    /// Looks down from above the vessel; channels 1–16 of a batch.
    Top,
    /// Looks in from the outboard side; channels 17–32 of a batch.
    Out,
}

impl Camera {
    pub const ALL: [Camera; 2] = [Camera::Top, Camera::Out];

    /// Index of this camera's first channel in a 32-channel batch.
    pub fn first_channel(self) -> usize {
        match self {
            Camera::Top => 0,
            Camera::Out => crate::constants::N_DETECTORS,
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Camera::Top => f.write_str("top"),
            Camera::Out => f.write_str("out"),
        }
    }
}

/// Estimated plasma centroid in the poloidal plane [mm].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentroidEstimate {
    pub r: f64,
    pub z: f64,
}

/// A sample of a batch that produced no centroid, with the reason.
#[derive(Debug)]
pub struct SampleFailure {
    pub sample: usize,
    pub error: FusionError,
}

/// Centroid estimates for a batch of T samples.
///
/// `r` and `z` always have length T. Failed samples hold NaN in both and are
/// listed in `failures` in ascending sample order.
#[derive(Debug)]
pub struct CentroidSeries {
    r: Array1<f64>,
    z: Array1<f64>,
    failures: Vec<SampleFailure>,
}

impl CentroidSeries {
    /// Assemble per-sample results, in sample order.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = FusionResult<CentroidEstimate>>,
    {
        let mut r = Vec::new();
        let mut z = Vec::new();
        let mut failures = Vec::new();
        for (sample, result) in samples.into_iter().enumerate() {
            match result {
                Ok(est) => {
                    r.push(est.r);
                    z.push(est.z);
                }
                Err(error) => {
                    r.push(f64::NAN);
                    z.push(f64::NAN);
                    failures.push(SampleFailure { sample, error });
                }
            }
        }
        CentroidSeries {
            r: Array1::from_vec(r),
            z: Array1::from_vec(z),
            failures,
        }
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// R coordinates, NaN where the sample failed.
    pub fn r(&self) -> &Array1<f64> {
        &self.r
    }

    /// Z coordinates, NaN where the sample failed.
    pub fn z(&self) -> &Array1<f64> {
        &self.z
    }

    pub fn failures(&self) -> &[SampleFailure] {
        &self.failures
    }

    pub fn n_valid(&self) -> usize {
        self.len() - self.failures.len()
    }

    pub fn is_valid(&self, sample: usize) -> bool {
        sample < self.len() && self.failure(sample).is_none()
    }

    /// Failure recorded for `sample`, if any.
    pub fn failure(&self, sample: usize) -> Option<&SampleFailure> {
        self.failures
            .binary_search_by_key(&sample, |f| f.sample)
            .ok()
            .map(|i| &self.failures[i])
    }

    /// Estimate at `sample`, `None` when out of range or failed.
    pub fn get(&self, sample: usize) -> Option<CentroidEstimate> {
        if !self.is_valid(sample) {
            return None;
        }
        Some(CentroidEstimate {
            r: self.r[sample],
            z: self.z[sample],
        })
    }

    /// Fail-fast view: the first failed sample becomes the error.
    pub fn into_result(mut self) -> FusionResult<Self> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        let first = self.failures.swap_remove(0);
        Err(FusionError::SampleFailed {
            sample: first.sample,
            source: Box::new(first.error),
        })
    }

    /// Split into `(r, z, failures)`.
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>, Vec<SampleFailure>) {
        (self.r, self.z, self.failures)
    }
}
