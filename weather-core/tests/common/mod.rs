//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use weather_widget_core::{CurrentPanel, ForecastCard, IconId, Theme, View};

/// A `View` that remembers what it was last told to show.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub input: String,
    pub loading_visible: bool,
    pub error: Option<String>,
    pub error_emphasized: bool,
    pub emphasis_count: usize,
    pub current: Option<CurrentPanel>,
    pub forecast: Option<Vec<ForecastCard>>,
    pub theme: Option<Theme>,
    pub toggle_icon: Option<IconId>,
}

impl RecordingView {
    pub fn with_input(input: &str) -> Self {
        Self { input: input.to_string(), ..Self::default() }
    }
}

impl View for RecordingView {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn set_error_emphasis(&mut self, on: bool) {
        if on {
            self.emphasis_count += 1;
        }
        self.error_emphasized = on;
    }

    fn show_current(&mut self, panel: &CurrentPanel) {
        self.current = Some(panel.clone());
    }

    fn hide_current(&mut self) {
        self.current = None;
    }

    fn show_forecast(&mut self, cards: &[ForecastCard]) {
        self.forecast = Some(cards.to_vec());
    }

    fn hide_forecast(&mut self) {
        self.forecast = None;
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    fn set_theme_toggle_icon(&mut self, icon: IconId) {
        self.toggle_icon = Some(icon);
    }
}

pub fn current_weather_json(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [ { "id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d" } ],
        "main": { "temp": temp, "feels_like": 20.9, "humidity": 48, "pressure": 1016 },
        "wind": { "speed": 4.63, "deg": 250 },
        "dt": 1_718_200_800,
        "sys": { "country": "GB" },
        "name": "London",
        "cod": 200
    })
}

pub fn forecast_json(entries: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..entries)
        .map(|i| {
            serde_json::json!({
                "dt": 1_718_204_400 + i as i64 * 10_800,
                "main": { "temp": 15.0 + i as f64 / 2.0 },
                "weather": [ { "id": if i % 2 == 0 { 500 } else { 800 } } ]
            })
        })
        .collect();

    serde_json::json!({ "cod": "200", "cnt": entries, "list": list, "city": { "name": "London" } })
}
