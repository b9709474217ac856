//! # Tide Clock Core Library
//!
//! Predicts upcoming high and low tides from a compact per-site harmonic constant set and
//! prepares them for a clock face that shows daylight-saving adjusted local time.
//!
//! ## Design Philosophy
//!
//! ### Pure, Integer-Second Predictions
//! - **Deterministic**: predictions depend only on the site constants, the configured epoch and
//!   the reference time handed in by the caller; the engine never reads the wall clock
//! - **Whole seconds**: every timestamp is an `i64` of seconds in the standard time basis;
//!   floating point is confined to the harmonic phase sums
//! - **Display at the edge**: daylight saving is applied only when formatting a frame
//!
//! ### Data Flow
//! 1. **Sites**: [`sites::SiteStore`] loads one record of harmonic constants
//! 2. **Model**: [`harmonics::TideModel`] predicts high and low water near a reference time
//! 3. **Events**: [`events::TidePredictor`] keeps an alternating chain of upcoming [`TideEvent`]s
//! 4. **Display**: [`dst::Region`] shifts instants to display time for [`renderer`]
//!
//! ## Example
//! ```
//! use tide_clock::harmonics::{constituents, TideModel, CONSTITUENT_COUNT};
//! use tide_clock::events::advance_chain;
//! use tide_clock::sites::Site;
//!
//! let site = Site {
//!     name: "Harbour".to_string(),
//!     offset: 0,
//!     low_fraction: 0.5,
//!     error: 60,
//!     harmonics: constituents([(0.0, 0.0); CONSTITUENT_COUNT]),
//! };
//! let model = TideModel::new(site, 0);
//! let chain = advance_chain(&model, 100, 4);
//!
//! assert_eq!(chain.len(), 4);
//! assert!(!chain[0].is_high);
//! assert!(chain[1].is_high);
//! ```

use serde::{Deserialize, Serialize};

// Module declarations
pub mod app;
pub mod clock;
pub mod config;
pub mod dst;
pub mod error;
pub mod events;
pub mod harmonics;
pub mod renderer;
pub mod sites;

#[cfg(test)]
mod tests;

pub use error::TideError;

/// A predicted high or low water instant.
///
/// `timestamp` is in seconds since the Unix epoch, standard time basis. A chain of events
/// produced by [`events::advance_chain`] strictly alternates `is_high` and strictly increases
/// in `timestamp`.
///
/// # Example
/// ```
/// use tide_clock::TideEvent;
///
/// let high = TideEvent::high(1_800_000_000);
/// assert!(high.is_high);
/// assert_eq!(high.kind(), "High");
/// assert_eq!(TideEvent::low(1_800_022_357).kind(), "Low");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TideEvent {
    /// Seconds since the Unix epoch (standard time)
    pub timestamp: i64,
    /// True for high water, false for low water
    pub is_high: bool,
}

impl TideEvent {
    pub fn high(timestamp: i64) -> Self {
        TideEvent {
            timestamp,
            is_high: true,
        }
    }

    pub fn low(timestamp: i64) -> Self {
        TideEvent {
            timestamp,
            is_high: false,
        }
    }

    /// "High" or "Low"
    pub fn kind(&self) -> &'static str {
        if self.is_high {
            "High"
        } else {
            "Low"
        }
    }
}
