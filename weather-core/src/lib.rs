//! Core library for the `weather-widget` terminal widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherClient` trait
//! - Persisted preferences (theme, last location)
//! - Icon and date helpers used for rendering
//! - The `ViewController` state machine that drives any `View`
//!
//! It is used by `weather-widget`, but a different front-end only needs its own `View`.

pub mod config;
pub mod date;
pub mod error;
pub mod icon;
pub mod model;
pub mod prefs;
pub mod provider;
pub mod render;
pub mod view;

pub use config::Config;
pub use error::WeatherError;
pub use icon::{IconId, icon_for};
pub use model::{CurrentWeather, ForecastEntry, ForecastSet, LocationQuery, Theme};
pub use prefs::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences};
pub use provider::{WeatherClient, client_from_config, openweather::OpenWeatherClient};
pub use render::{CurrentPanel, ForecastCard};
pub use view::{UiState, View, ViewController};
