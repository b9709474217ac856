//! # Prediction Properties Across Sites
//!
//! Scenario tests that run the model, the event finder and the daylight adjuster together over
//! the site resource shipped with the repository.

use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

use crate::dst::Region;
use crate::events::{advance_chain, nearest_event};
use crate::harmonics::{constituents, TideModel, BASE_PERIOD, CONSTITUENT_COUNT, DEFAULT_EPOCH, HALF_PERIOD};
use crate::sites::{load_from_reader, Site, SiteStore};

const SHIPPED_SITES: &str = include_str!("../../tide-sites.csv");

/// 2026-10-15T00:00:00
const REFERENCE: i64 = 1_792_022_400;

/// Every record of the shipped resource, in order.
fn shipped_sites() -> Vec<Site> {
    let mut sites: Vec<Site> = Vec::new();
    for index in 0.. {
        let (used, site) = load_from_reader(Cursor::new(SHIPPED_SITES), index).unwrap();
        if used != index {
            break;
        }
        sites.push(site);
    }
    sites
}

/// Reference times spread over roughly two years, not aligned to any tidal period.
fn reference_times() -> impl Iterator<Item = i64> {
    (0..160).map(|i| REFERENCE + i * 397_331)
}

#[test]
fn shipped_resource_has_three_sites() {
    let sites = shipped_sites();
    assert_eq!(sites.len(), 3);
    assert_eq!(sites[0].name, "Harbour Mouth");
    assert_eq!(sites[1].low_fraction, 0.42);
}

#[test]
fn chains_alternate_and_increase() {
    for site in shipped_sites() {
        let model = TideModel::new(site.clone(), DEFAULT_EPOCH);
        for t0 in reference_times() {
            let chain = advance_chain(&model, t0, 8);
            assert_eq!(chain.len(), 8, "{} at {t0}", site.name);
            assert!(chain[0].timestamp >= t0, "{} starts before {t0}", site.name);
            for pair in chain.windows(2) {
                assert!(
                    pair[0].timestamp < pair[1].timestamp,
                    "{} not increasing at {t0}: {:?}",
                    site.name,
                    pair
                );
                assert_ne!(
                    pair[0].is_high, pair[1].is_high,
                    "{} not alternating at {t0}: {:?}",
                    site.name, pair
                );
            }
        }
    }
}

#[test]
fn high_water_repeats_within_declared_error() {
    for site in shipped_sites() {
        let model = TideModel::new(site.clone(), DEFAULT_EPOCH);
        for t in reference_times() {
            let drift = model.predict_high(t + BASE_PERIOD) - (model.predict_high(t) + BASE_PERIOD);
            assert!(
                drift.abs() <= site.error,
                "{} drifted {drift} s at {t} (error bound {})",
                site.name,
                site.error
            );
        }
    }
}

#[test]
fn nearest_event_is_within_half_period() {
    for site in shipped_sites() {
        let model = TideModel::new(site.clone(), DEFAULT_EPOCH);
        for t in reference_times() {
            let event = nearest_event(&model, t, false);
            assert!(
                (event.timestamp - t).abs() <= HALF_PERIOD,
                "{}: {:?} too far from {t}",
                site.name,
                event
            );
        }
    }
}

#[test]
fn flat_site_matches_hand_computed_high() {
    let site = Site {
        name: "Flat".to_string(),
        offset: 0,
        low_fraction: 0.5,
        error: 1,
        harmonics: constituents([(0.0, 0.0); CONSTITUENT_COUNT]),
    };
    let model = TideModel::new(site, DEFAULT_EPOCH);

    // 18860 cycles of 44714.16 s = 843309057.6 s after 2000-01-01
    assert_eq!(model.predict_high(1_790_000_000), DEFAULT_EPOCH + 843_309_058);
}

#[test]
fn display_round_trip_over_chain() {
    let site = shipped_sites().remove(0);
    let model = TideModel::new(site, DEFAULT_EPOCH);
    for region in [Region::Europe, Region::UsCanada, Region::None] {
        let window = region.window(2026);
        for event in advance_chain(&model, REFERENCE - 200 * 86_400, 400) {
            let near_boundary = window.is_some_and(|w| {
                (w.spring_forward - 3600..w.spring_forward + 3600).contains(&event.timestamp)
                    || (w.fall_back - 3600..w.fall_back + 3600).contains(&event.timestamp)
            });
            if near_boundary {
                continue;
            }
            let display = region.to_display(event.timestamp);
            assert_eq!(region.to_standard(display), event.timestamp, "{region}");
        }
    }
}

#[test]
fn store_cycles_back_to_first_site() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SHIPPED_SITES.as_bytes()).unwrap();

    let mut store = SiteStore::open(file.path(), 0).unwrap();
    let first = store.current().clone();
    for _ in 0..3 {
        store.advance().unwrap();
    }
    assert_eq!(store.current(), &first);

    let reloaded = SiteStore::open(file.path(), 0).unwrap();
    assert_eq!(reloaded.current(), &first);
}
