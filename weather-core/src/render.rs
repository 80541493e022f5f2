//! Display strings for the two weather panels.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

use crate::{
    date::{format_long, format_short_weekday},
    icon::{IconId, icon_for},
    model::{CurrentWeather, ForecastEntry, ForecastSet},
};

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPanel {
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub condition: String,
    pub icon: IconId,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day: String,
    pub icon: IconId,
    pub temperature: String,
}

/// `21.6` -> `22°C`. Halves round up, so `-3.5` is `-3°C`.
pub fn celsius(value: f64) -> String {
    format!("{}°C", round_half_up(value) as i64)
}

/// Nearest integer, ties towards positive infinity.
fn round_half_up(value: f64) -> f64 {
    // `round` is exact but sends negative ties down.
    let rounded = value.round();
    if value - rounded == 0.5 { rounded + 1.0 } else { rounded }
}

/// `today` is the header date, not the observation time of the data.
pub fn current_panel<Tz>(weather: &CurrentWeather, today: &DateTime<Tz>) -> CurrentPanel
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    CurrentPanel {
        location: format!("{}, {}", weather.place_name, weather.country_code),
        date: format_long(today),
        temperature: celsius(weather.temperature_c),
        condition: weather.condition.clone(),
        icon: icon_for(weather.condition_code),
        feels_like: celsius(weather.feels_like_c),
        humidity: format!("{}%", weather.humidity_pct),
        wind_speed: format!("{} m/s", weather.wind_speed_mps),
        pressure: format!("{} hPa", weather.pressure_hpa),
    }
}

pub fn forecast_card<Tz>(entry: &ForecastEntry, tz: &Tz) -> ForecastCard
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ForecastCard {
        day: format_short_weekday(&entry.time.with_timezone(tz)),
        icon: icon_for(entry.condition_code),
        temperature: celsius(entry.temperature_c),
    }
}

/// One card per day, weekday names in local time.
pub fn forecast_cards(set: &ForecastSet) -> Vec<ForecastCard> {
    set.days.iter().map(|e| forecast_card(e, &Local)).collect()
}

/// Error panel text for `message`.
pub fn error_text(message: &str) -> &str {
    if message.trim().is_empty() { FALLBACK_ERROR_MESSAGE } else { message }
}
