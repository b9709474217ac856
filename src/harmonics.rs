//! # Harmonic Tide Model
//!
//! Predicts the instant of high and low water from a compact per-site constant set.
//!
//! ## Model Characteristics
//!
//! ### Dominant Semidiurnal Tide
//! The backbone of the model is the lunar M2 tide with a period of 12.42 hours. The period is
//! carried as an integer scaled by 100 ([`BASE_PERIOD_100`]) so that whole-second modulo
//! arithmetic keeps its sub-second alignment over decades of elapsed cycles.
//!
//! ### Timing Perturbations
//! Real high waters drift around the pure M2 schedule (spring–neap cycle, perigee, diurnal
//! inequality, seasonal effects). Each site carries seven sine/cosine amplitude pairs, one per
//! entry of [`CONSTITUENT_PERIODS`], and their sum is added to the M2 instant as a correction
//! in seconds.
//!
//! ### Asymmetric Low Water
//! Low water is placed between two consecutive highs at a per-site calibrated fraction of the
//! interval. Estuaries commonly have a short flood and a long ebb, so the fraction is rarely 0.5.
//!
//! All inputs and outputs are integer seconds in the standard (non-daylight-saving) basis.
//! Results are fully deterministic for a given site and reference time.

use crate::sites::Site;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// M2 period in seconds, scaled by 100 (44714.16 s = 12 h 25 m 14 s).
pub const BASE_PERIOD_100: i64 = 4_471_416;

/// M2 period rounded to whole seconds.
pub const BASE_PERIOD: i64 = (BASE_PERIOD_100 + 50) / 100;

/// Half the M2 period rounded to whole seconds.
pub const HALF_PERIOD: i64 = (BASE_PERIOD_100 + 100) / 200;

/// Number of perturbation constituents carried by every site.
pub const CONSTITUENT_COUNT: usize = 7;

/// Periods (seconds) of the timing perturbation constituents, in site-record order.
pub const CONSTITUENT_PERIODS: [i64; CONSTITUENT_COUNT] = [
    1_275_721,  // spring–neap (M2/S2 beat, 14.77 d)
    2_380_713,  // perigee (M2/N2 beat, 27.55 d)
    1_180_292,  // lunar declination (13.66 d)
    86_164,     // K1 sidereal day
    92_950,     // O1 principal lunar diurnal
    15_778_476, // semi-annual
    31_556_952, // annual
];

/// Model epoch used when none is configured: 2000-01-01T00:00:00 in Unix seconds.
pub const DEFAULT_EPOCH: i64 = 946_684_800;

/// One sinusoidal timing term: period plus sine and cosine amplitudes (seconds).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    pub period: i64,
    pub sin_amp: f64,
    pub cos_amp: f64,
}

impl Constituent {
    /// Contribution of this term at `base` seconds after the model epoch.
    fn correction(&self, base: i64) -> f64 {
        let omega = base.rem_euclid(self.period) as f64 * TAU / self.period as f64;
        self.sin_amp * omega.sin() + self.cos_amp * omega.cos()
    }
}

/// Build the constituent set from seven `(sin_amp, cos_amp)` pairs.
pub fn constituents(amplitudes: [(f64, f64); CONSTITUENT_COUNT]) -> [Constituent; CONSTITUENT_COUNT] {
    let mut out = [Constituent {
        period: 0,
        sin_amp: 0.0,
        cos_amp: 0.0,
    }; CONSTITUENT_COUNT];
    for (slot, (period, (sin_amp, cos_amp))) in out
        .iter_mut()
        .zip(CONSTITUENT_PERIODS.iter().zip(amplitudes))
    {
        *slot = Constituent {
            period: *period,
            sin_amp,
            cos_amp,
        };
    }
    out
}

/// Harmonic tide model for a single site.
///
/// The epoch is injected at construction rather than inferred from the runtime, so the same
/// site constants produce the same instants on every host.
#[derive(Clone, Debug)]
pub struct TideModel {
    epoch: i64,
    site: Site,
}

impl TideModel {
    pub fn new(site: Site, epoch: i64) -> Self {
        TideModel { epoch, site }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    /// Predicted high water nearest to `t`.
    ///
    /// `t` must stay at least a day inside the `i64` range relative to the epoch and site offset.
    ///
    /// The reference is shifted by half a period and reduced against the scaled period, which
    /// snaps it to the nearest M2 cycle boundary. The perturbation sum is then truncated to
    /// whole seconds and added.
    pub fn predict_high(&self, t: i64) -> i64 {
        let offset = self.site.offset;
        let time0 = t - self.epoch - offset + HALF_PERIOD;

        // Whole cycles since the aligned epoch, then back to rounded whole seconds.
        // Scaled arithmetic is widened so any i64 reference within range of the epoch fits.
        let period = i128::from(BASE_PERIOD_100);
        let cycles = (i128::from(time0) * 100).div_euclid(period);
        let base = (cycles * period + 50).div_euclid(100) as i64 + offset;

        let correction: f64 = self
            .site
            .harmonics
            .iter()
            .map(|c| c.correction(base))
            .sum();

        self.epoch + base + correction as i64
    }

    /// Predicted low water between two consecutive highs.
    ///
    /// Missing bounds are derived from the high nearest half a period either side of `t`.
    pub fn predict_low(&self, t: i64, last_high: Option<i64>, next_high: Option<i64>) -> i64 {
        let last_high = last_high.unwrap_or_else(|| self.predict_high(t - HALF_PERIOD));
        let next_high = next_high.unwrap_or_else(|| self.predict_high(t + HALF_PERIOD));
        let span = (next_high - last_high) as f64;
        last_high + (self.site.low_fraction * span).round() as i64
    }
}
