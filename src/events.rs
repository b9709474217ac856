//! # Tide Event Finder
//!
//! Turns the harmonic model into an ordered chain of high and low water events.
//!
//! The finder looks at three candidates around a reference time (the high before it, the low
//! between, the high after) and picks the closest. Stepping the reference forward by half a
//! period from each found event yields a strictly increasing, strictly alternating chain.
//!
//! [`TidePredictor`] owns the model and a lazily rebuilt cache of upcoming events. The cache
//! stays valid until "now" passes its first event.

use crate::harmonics::{TideModel, BASE_PERIOD, HALF_PERIOD};
use crate::sites::Site;
use crate::TideEvent;
use log::debug;

/// Extremum (high or low water) nearest to `t`.
///
/// With `next` set the search point is first advanced by half a period, which moves the finder
/// on to the event following one found at `t`.
pub fn nearest_event(model: &TideModel, t: i64, next: bool) -> TideEvent {
    let t = if next { t + HALF_PERIOD } else { t };

    let mut last_high = model.predict_high(t);
    let next_high;
    if last_high > t {
        next_high = last_high;
        last_high = model.predict_high(next_high - BASE_PERIOD);
    } else {
        next_high = model.predict_high(last_high + BASE_PERIOD);
    }
    let low = model.predict_low(last_high, Some(last_high), Some(next_high));

    // min_by_key keeps the first of equal candidates
    [
        TideEvent::high(last_high),
        TideEvent::low(low),
        TideEvent::high(next_high),
    ]
    .into_iter()
    .min_by_key(|event| (event.timestamp - t).abs())
    .unwrap_or(TideEvent::high(last_high))
}

/// `count` consecutive events starting with the first one at or after `t0`.
pub fn advance_chain(model: &TideModel, t0: i64, count: usize) -> Vec<TideEvent> {
    let mut events = Vec::with_capacity(count);
    if count == 0 {
        return events;
    }

    let mut event = nearest_event(model, t0, false);
    if event.timestamp < t0 {
        event = nearest_event(model, event.timestamp, true);
    }
    events.push(event);

    while events.len() < count {
        event = nearest_event(model, event.timestamp, true);
        events.push(event);
    }
    events
}

/// Cached chain of upcoming events.
#[derive(Clone, Debug, Default)]
pub struct EventCache {
    events: Vec<TideEvent>,
}

impl EventCache {
    /// The cache is stale once `now` has passed its first event (or when it is empty).
    pub fn is_stale(&self, now: i64) -> bool {
        self.events.first().map_or(true, |first| now > first.timestamp)
    }

    pub fn events(&self) -> &[TideEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Harmonic model for the current site plus its cached upcoming events.
///
/// Rebuilding requires `&mut self`, so two rebuilds for the same site can never interleave.
#[derive(Debug)]
pub struct TidePredictor {
    model: TideModel,
    count: usize,
    cache: EventCache,
}

impl TidePredictor {
    pub fn new(site: Site, epoch: i64, count: usize) -> Self {
        TidePredictor {
            model: TideModel::new(site, epoch),
            count,
            cache: EventCache::default(),
        }
    }

    pub fn site(&self) -> &Site {
        self.model.site()
    }

    /// Swap in a newly loaded site; the cached chain belongs to the old one and is dropped.
    pub fn set_site(&mut self, site: Site) {
        self.model = TideModel::new(site, self.model.epoch());
        self.cache.clear();
    }

    /// Whether the next [`TidePredictor::upcoming`] call would rebuild the chain.
    pub fn is_stale(&self, now: i64) -> bool {
        self.count > 0 && self.cache.is_stale(now)
    }

    /// The next `count` events as of `now` (standard time), rebuilding the cache if stale.
    pub fn upcoming(&mut self, now: i64) -> &[TideEvent] {
        if self.is_stale(now) {
            self.cache.events = advance_chain(&self.model, now, self.count);
            debug!(
                "Rebuilt {} events for {} from {now}",
                self.cache.events.len(),
                self.model.site().name
            );
        }
        self.cache.events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmonics::{constituents, CONSTITUENT_COUNT};

    fn site(low_fraction: f64) -> Site {
        Site {
            name: "Test".to_string(),
            offset: 0,
            low_fraction,
            error: 1,
            harmonics: constituents([(0.0, 0.0); CONSTITUENT_COUNT]),
        }
    }

    #[test]
    fn test_nearest_event_at_high_water() {
        let model = TideModel::new(site(0.5), 0);
        assert_eq!(nearest_event(&model, 44_714, false), TideEvent::high(44_714));
        assert_eq!(nearest_event(&model, 44_714 + 60, false), TideEvent::high(44_714));
    }

    #[test]
    fn test_nearest_event_picks_low_between_highs() {
        let model = TideModel::new(site(0.5), 0);
        // highs at 0 and 44714, low at 22357
        assert_eq!(nearest_event(&model, 20_000, false), TideEvent::low(22_357));
        assert_eq!(nearest_event(&model, 25_000, false), TideEvent::low(22_357));
    }

    #[test]
    fn test_next_steps_past_found_event() {
        let model = TideModel::new(site(0.5), 0);
        assert_eq!(nearest_event(&model, 0, true), TideEvent::low(22_357));
        assert_eq!(nearest_event(&model, 22_357, true), TideEvent::high(44_714));
    }

    #[test]
    fn test_chain_starts_at_or_after_reference() {
        let model = TideModel::new(site(0.5), 0);
        let chain = advance_chain(&model, 100, 4);
        assert_eq!(
            chain,
            vec![
                TideEvent::low(22_357),
                TideEvent::high(44_714),
                TideEvent::low(67_071),
                TideEvent::high(89_428),
            ]
        );
    }

    #[test]
    fn test_chain_of_zero_is_empty() {
        let model = TideModel::new(site(0.5), 0);
        assert!(advance_chain(&model, 0, 0).is_empty());
    }

    #[test]
    fn test_asymmetric_low_fraction_alternates() {
        let model = TideModel::new(site(0.35), 0);
        let chain = advance_chain(&model, 1_000, 12);
        for pair in chain.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
            assert_ne!(pair[0].is_high, pair[1].is_high);
        }
    }

    #[test]
    fn test_cache_is_reused_until_first_event_passes() {
        let mut predictor = TidePredictor::new(site(0.5), 0, 3);
        assert!(predictor.is_stale(100));

        let first = predictor.upcoming(100).to_vec();
        assert_eq!(first[0], TideEvent::low(22_357));
        assert!(!predictor.is_stale(22_357));

        // reference moved but the first event has not passed: same chain
        assert_eq!(predictor.upcoming(22_000), first.as_slice());

        assert!(predictor.is_stale(22_358));
        assert_eq!(predictor.upcoming(22_358)[0], TideEvent::high(44_714));
    }

    #[test]
    fn test_set_site_invalidates_cache() {
        let mut predictor = TidePredictor::new(site(0.5), 0, 2);
        predictor.upcoming(100);
        assert!(!predictor.is_stale(100));

        let mut shifted = site(0.5);
        shifted.name = "Shifted".to_string();
        shifted.offset = 3_600;
        predictor.set_site(shifted);
        assert!(predictor.is_stale(100));
        assert_eq!(predictor.upcoming(100)[0], TideEvent::high(3_600));
    }
}
