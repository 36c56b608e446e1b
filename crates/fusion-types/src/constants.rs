// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed tomography camera geometry. All lengths in millimetres.

/// Detectors per camera array.
pub const N_DETECTORS: usize = 16;

/// Channels in a signal batch: top camera first, then out camera.
pub const N_CHANNELS: usize = 2 * N_DETECTORS;

/// Top camera pinhole (x, y).
pub const PINHOLE_TOP: (f64, f64) = (5.0, 97.0);

/// Out camera pinhole (x, y).
pub const PINHOLE_OUT: (f64, f64) = (109.0, 0.0);

/// Top camera detector x positions, channels 1 to 16.
pub const DETECTORS_TOP_X: [f64; N_DETECTORS] = [
    -2.125, -1.175, -0.225, 0.725, 1.675, 2.625, 3.575, 4.525, 5.475, 6.425, 7.375, 8.325, 9.275,
    10.225, 11.175, 12.125,
];

/// Top camera detector y positions (flat array).
pub const DETECTORS_TOP_Y: [f64; N_DETECTORS] = [106.0; N_DETECTORS];

/// Out camera detector x positions (flat array).
pub const DETECTORS_OUT_X: [f64; N_DETECTORS] = [118.0; N_DETECTORS];

/// Out camera detector y positions, channels 1 to 16.
pub const DETECTORS_OUT_Y: [f64; N_DETECTORS] = [
    7.125, 6.175, 5.225, 4.275, 3.325, 2.375, 1.425, 0.475, -0.475, -1.425, -2.375, -3.325,
    -4.275, -5.225, -6.175, -7.125,
];
