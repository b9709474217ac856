//! # Tide Clock Text Rendering
//!
//! Formats a clock face frame: the display time as HH:MM, the date, the site name and one line
//! per upcoming tide. Event instants are converted to display time here and nowhere else.

use crate::clock::calendar;
use crate::dst::Region;
use crate::TideEvent;
use chrono::{Datelike, Timelike};
use serde::Serialize;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Everything drawn on one refresh of the clock face.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    /// Display time, "HH:MM"
    pub clock: String,
    /// Display date, "29 Mar 2026"
    pub date: String,
    /// Name of the selected site
    pub site: String,
    /// One line per upcoming tide, see [`format_event`]
    pub events: Vec<String>,
}

/// "HH:MM" of a display-basis timestamp.
pub fn clock_string(display_t: i64) -> String {
    calendar(display_t)
        .map(|dt| format!("{:02}:{:02}", dt.hour(), dt.minute()))
        .unwrap_or_else(|| "--:--".to_string())
}

/// "D Mon YYYY" of a display-basis timestamp.
pub fn day_string(display_t: i64) -> String {
    calendar(display_t)
        .map(|dt| format!("{} {} {}", dt.day(), MONTHS[dt.month0() as usize], dt.year()))
        .unwrap_or_default()
}

/// One tide line: display time, kind and hours from `now`, e.g. `"20:14 Low  3.5h"`.
pub fn format_event(event: &TideEvent, now: i64, region: Region) -> String {
    let hours = (event.timestamp - now) as f64 / 3600.0;
    format!(
        "{} {:<4} {:.1}h",
        clock_string(region.to_display(event.timestamp)),
        event.kind(),
        hours
    )
}

/// Plain-text rendering of a frame.
pub fn render_ascii(frame: &Frame) -> String {
    let mut out = format!("{}  {}\n{}\n", frame.clock, frame.date, frame.site);
    for line in &frame.events {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-03-29T00:00:00
    const MIDNIGHT: i64 = 1_774_742_400;

    #[test]
    fn test_clock_and_day_strings() {
        assert_eq!(clock_string(MIDNIGHT + 3 * 3600 + 7 * 60 + 59), "03:07");
        assert_eq!(day_string(MIDNIGHT), "29 Mar 2026");
        assert_eq!(clock_string(i64::MAX), "--:--");
    }

    #[test]
    fn test_format_event_lines() {
        let now = MIDNIGHT;
        let low = TideEvent::low(now + 12_600);
        assert_eq!(format_event(&low, now, Region::None), "03:30 Low  3.5h");

        let high = TideEvent::high(now + 41_400);
        assert_eq!(format_event(&high, now, Region::None), "11:30 High 11.5h");
        // after the 01:00 spring-forward the display reads one hour later
        assert_eq!(format_event(&high, now, Region::Europe), "12:30 High 11.5h");
    }

    #[test]
    fn test_render_ascii_layout() {
        let frame = Frame {
            clock: "09:41".to_string(),
            date: "29 Mar 2026".to_string(),
            site: "Harbour".to_string(),
            events: vec!["10:00 High 0.3h".to_string(), "16:12 Low  6.5h".to_string()],
        };
        assert_eq!(
            render_ascii(&frame),
            "09:41  29 Mar 2026\nHarbour\n10:00 High 0.3h\n16:12 Low  6.5h\n"
        );
    }
}
