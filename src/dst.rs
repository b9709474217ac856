//! # Daylight Adjuster
//!
//! Converts between standard time (the basis of every prediction) and daylight-saving adjusted
//! display time for two hard-coded regions.
//!
//! Transition days are located with a closed-form "Nth Sunday of the month" expression built on
//! `5 * year / 4`, which tracks the weekday drift of a fixed date including leap years. The
//! expression is exact for 1900-03-01 through 2099 only; 2100 is not a leap year and breaks it.
//!
//! | Region    | Spring forward            | Fall back                  |
//! |-----------|---------------------------|----------------------------|
//! | Europe    | last Sunday of March      | last Sunday of October     |
//! |           | 01:00 standard            | 01:00 standard             |
//! | US-Canada | second Sunday of March    | first Sunday of November   |
//! |           | 02:00 standard            | 02:00 standard             |
//!
//! During fall-back one hour of display time occurs twice. [`Region::to_standard`] resolves it to
//! the standard-time reading without telling the caller; [`Region::to_standard_checked`] reports it
//! as [`TideError::AmbiguousLocalTime`] instead.

use crate::clock::calendar;
use crate::error::TideError;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

const HOUR: i64 = 3600;

/// Daylight-saving rule applied to the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Europe,
    UsCanada,
    /// No daylight saving: display time equals standard time
    None,
}

impl FromStr for Region {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Europe" => Ok(Region::Europe),
            "US-Canada" => Ok(Region::UsCanada),
            "None" => Ok(Region::None),
            other => Err(TideError::InvalidRegion(other.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Europe => write!(f, "Europe"),
            Region::UsCanada => write!(f, "US-Canada"),
            Region::None => write!(f, "None"),
        }
    }
}

/// Daylight-saving interval of one year, as standard-time timestamps `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DstWindow {
    pub spring_forward: i64,
    pub fall_back: i64,
}

impl DstWindow {
    pub fn contains(&self, t: i64) -> bool {
        (self.spring_forward..self.fall_back).contains(&t)
    }
}

fn at_hour(year: i32, month: u32, day: i64, hour: u32) -> Option<i64> {
    let day = u32::try_from(day).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
}

impl Region {
    /// Transition instants for `year`, or `None` when the region has no daylight saving.
    pub fn window(&self, year: i32) -> Option<DstWindow> {
        let yoff = (5 * year as i64).div_euclid(4);
        let (spring_forward, fall_back) = match self {
            Region::None => return None,
            Region::Europe => (
                at_hour(year, 3, 31 - (yoff + 4).rem_euclid(7), 1)?,
                at_hour(year, 10, 31 - (yoff + 1).rem_euclid(7), 1)?,
            ),
            Region::UsCanada => (
                at_hour(year, 3, 14 - (yoff + 1).rem_euclid(7), 2)?,
                at_hour(year, 11, 7 - (yoff + 1).rem_euclid(7), 2)?,
            ),
        };
        Some(DstWindow {
            spring_forward,
            fall_back,
        })
    }

    fn shift(&self, t: i64, offset: i64) -> i64 {
        let window = calendar(t).and_then(|dt| self.window(dt.year()));
        match window {
            Some(window) if window.contains(t) => t + offset,
            _ => t,
        }
    }

    /// Standard time to display time.
    pub fn to_display(&self, t: i64) -> i64 {
        self.shift(t, HOUR)
    }

    /// Display time to standard time.
    ///
    /// Display times inside the repeated fall-back hour are read as standard time.
    pub fn to_standard(&self, t: i64) -> i64 {
        self.shift(t, -HOUR)
    }

    /// Like [`Region::to_standard`], but refuses display times that occur twice.
    pub fn to_standard_checked(&self, t: i64) -> Result<i64, TideError> {
        let window = calendar(t).and_then(|dt| self.window(dt.year()));
        if let Some(window) = window {
            if (window.fall_back..window.fall_back + HOUR).contains(&t) {
                return Err(TideError::AmbiguousLocalTime(t));
            }
        }
        Ok(self.to_standard(t))
    }
}
