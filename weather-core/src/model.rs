use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trimmed, non-empty place name as typed by the user.
///
/// Whether the place exists is decided by the remote service, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Trim `raw`; `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LocationQuery {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "location query must not be blank".to_string())
    }
}

impl From<LocationQuery> for String {
    fn from(value: LocationQuery) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub place_name: String,
    pub country_code: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition: String,
    pub condition_code: i64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition_code: i64,
}

/// Raw samples are 3 hours apart, so every 8th one is a day.
pub const SAMPLES_PER_DAY: usize = 8;

/// Upper bound on days in a [`ForecastSet`].
pub const FORECAST_DAYS: usize = 5;

/// One sample per day, at most [`FORECAST_DAYS`] of them, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    pub days: Vec<ForecastEntry>,
}

impl ForecastSet {
    /// Keep the samples at indices 0, 8, 16, ... and stop after five.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = ForecastEntry>,
    {
        let days = samples
            .into_iter()
            .step_by(SAMPLES_PER_DAY)
            .take(FORECAST_DAYS)
            .collect();

        Self { days }
    }

    /// Indices of a raw list of `len` samples that [`ForecastSet::from_samples`] keeps.
    pub fn sample_indices(len: usize) -> impl Iterator<Item = usize> {
        (0..len).step_by(SAMPLES_PER_DAY).take(FORECAST_DAYS)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Exact stored name only; anything else is not a theme.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
