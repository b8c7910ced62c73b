//! Wall-clock rendering of message timestamps.
//!
//! The chat list and the thread both show `hh:mm AM/PM` in the observer's
//! local zone. The same instant therefore renders differently on machines in
//! different zones; tests pin a [`FixedOffset`](chrono::FixedOffset) instead.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::constants::{CLOCK_FORMAT, PLACEHOLDER_TIME};

/// Render epoch milliseconds in the local time zone.
pub fn format_clock(epoch_millis: i64) -> String {
    format_clock_in(epoch_millis, &Local)
}

/// Render epoch milliseconds in an explicit time zone.
///
/// Timestamps outside chrono's representable range render as `--:--`.
pub fn format_clock_in<Tz>(epoch_millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(epoch_millis) {
        Some(utc) => utc.with_timezone(tz).format(CLOCK_FORMAT).to_string(),
        None => PLACEHOLDER_TIME.to_string(),
    }
}
