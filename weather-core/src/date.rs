//! Date strings for the panel header and the forecast cards.
//!
//! Callers pick the timezone; the widget renders in `chrono::Local`.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// `Monday, January 15, 2024`
pub fn format_long<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.format("%A, %B %-d, %Y").to_string()
}

/// `Mon`
pub fn format_short_weekday<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.format("%a").to_string()
}
