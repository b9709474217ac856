//! # Tide Clock Face
//!
//! Ties the site store, the predictor and the daylight adjuster together behind the two inputs
//! the host provides: a periodic tick carrying "now" and an occasional "next site" request.
//!
//! Updates are lazy. [`TideClock::tick`] only produces a new [`Frame`] when the displayed minute
//! changes or the site was switched since the last frame.

use crate::config::Config;
use crate::dst::Region;
use crate::error::TideError;
use crate::events::TidePredictor;
use crate::renderer::{clock_string, day_string, format_event, Frame};
use crate::sites::{Site, SiteStore};
use crate::TideEvent;
use log::info;

/// State of the tide clock face for the selected site.
#[derive(Debug)]
pub struct TideClock {
    store: SiteStore,
    predictor: TidePredictor,
    region: Region,
    /// Display minute (minutes since the epoch) of the last produced frame
    shown_minute: Option<i64>,
}

impl TideClock {
    pub fn new(store: SiteStore, epoch: i64, region: Region, event_count: usize) -> Self {
        let predictor = TidePredictor::new(store.current().clone(), epoch, event_count);
        TideClock {
            store,
            predictor,
            region,
            shown_minute: None,
        }
    }

    /// Build the clock from application configuration.
    ///
    /// Fails on an unknown region or when the configured site cannot be resolved.
    pub fn from_config(config: &Config) -> Result<Self, TideError> {
        let region: Region = config.display.region.parse()?;
        let store = match &config.site.name {
            Some(name) => SiteStore::open_named(&config.site.resource, name)?,
            None => SiteStore::open(&config.site.resource, config.site.index)?,
        };
        info!(
            "Tide clock for {} (region {region}, {} events)",
            store.current().name,
            config.display.event_count
        );
        Ok(Self::new(
            store,
            config.model.epoch,
            region,
            config.display.event_count,
        ))
    }

    pub fn site(&self) -> &Site {
        self.store.current()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Switch to the next configured site. The cached chain is discarded before the next frame.
    pub fn next_site(&mut self) -> Result<&Site, TideError> {
        let site = self.store.advance()?.clone();
        self.predictor.set_site(site);
        self.shown_minute = None;
        Ok(self.store.current())
    }

    /// Upcoming events as of `now` (standard time).
    pub fn upcoming(&mut self, now: i64) -> &[TideEvent] {
        self.predictor.upcoming(now)
    }

    /// Full frame for `now` (standard time).
    pub fn frame(&mut self, now: i64) -> Frame {
        let display_now = self.region.to_display(now);
        self.shown_minute = Some(display_now.div_euclid(60));

        let region = self.region;
        let events = self
            .predictor
            .upcoming(now)
            .iter()
            .map(|event| format_event(event, now, region))
            .collect();

        Frame {
            clock: clock_string(display_now),
            date: day_string(display_now),
            site: self.store.current().name.clone(),
            events,
        }
    }

    /// Periodic callback: a new frame when the displayed minute changed, otherwise `None`.
    pub fn tick(&mut self, now: i64) -> Option<Frame> {
        let minute = self.region.to_display(now).div_euclid(60);
        if self.shown_minute == Some(minute) {
            return None;
        }
        Some(self.frame(now))
    }
}
