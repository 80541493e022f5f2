//! The widget's state machine and the render targets it drives.

use chrono::Local;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    error::WeatherError,
    icon::IconId,
    model::{CurrentWeather, ForecastSet, LocationQuery, Theme},
    prefs::PreferenceStore,
    provider::WeatherClient,
    render::{self, CurrentPanel, ForecastCard},
};

/// How long the error panel stays emphasized after a failure.
pub const ERROR_EMPHASIS: Duration = Duration::from_millis(500);

/// The render targets of the widget.
///
/// Implementations only draw; every decision is made by [`ViewController`].
pub trait View {
    /// Text currently in the location input.
    fn input_value(&self) -> String;
    fn set_input_value(&mut self, value: &str);

    fn set_loading_visible(&mut self, visible: bool);

    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn set_error_emphasis(&mut self, on: bool);

    fn show_current(&mut self, panel: &CurrentPanel);
    fn hide_current(&mut self);

    /// Replaces any previous cards.
    fn show_forecast(&mut self, cards: &[ForecastCard]);
    fn hide_forecast(&mut self);

    fn apply_theme(&mut self, theme: Theme);
    fn set_theme_toggle_icon(&mut self, icon: IconId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    ShowingWeather,
    ShowingError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    SearchStarted,
    LookupSucceeded,
    LookupFailed,
}

/// Next state for `event` in `state`, or `None` if the event does not apply.
fn transition(state: UiState, event: Event) -> Option<UiState> {
    use self::{Event::*, UiState::*};

    match (state, event) {
        (_, SearchStarted) => Some(Loading),
        (Loading, LookupSucceeded) => Some(ShowingWeather),
        (Loading, LookupFailed) => Some(ShowingError),
        (Idle | ShowingWeather | ShowingError, LookupSucceeded | LookupFailed) => None,
    }
}

/// The toggle shows the theme a click would switch to.
pub fn toggle_icon_for(theme: Theme) -> IconId {
    match theme {
        Theme::Dark => IconId::Clear,
        Theme::Light => IconId::Moon,
    }
}

#[derive(Debug)]
pub struct ViewController<V: View> {
    client: Arc<dyn WeatherClient>,
    prefs: Box<dyn PreferenceStore>,
    view: V,
    state: UiState,
    theme: Theme,
}

impl<V: View> ViewController<V> {
    pub fn new(client: Arc<dyn WeatherClient>, prefs: Box<dyn PreferenceStore>, view: V) -> Self {
        Self { client, prefs, view, state: UiState::Idle, theme: Theme::Light }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn prefs(&self) -> &dyn PreferenceStore {
        self.prefs.as_ref()
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Restore the saved theme and search for the saved location, if any.
    pub async fn start(&mut self) {
        self.restore_theme();

        if let Some(location) = self.prefs.last_location() {
            info!(%location, "Restoring last location");
            self.view.set_input_value(location.as_str());
            self.search(location).await;
        }
    }

    /// Apply the saved theme. Only dark needs any drawing.
    pub fn restore_theme(&mut self) {
        if self.prefs.theme() == Some(Theme::Dark) {
            self.theme = Theme::Dark;
            self.view.apply_theme(Theme::Dark);
            self.view.set_theme_toggle_icon(toggle_icon_for(Theme::Dark));
        }
    }

    /// Search button or Enter. Blank input is ignored.
    pub async fn submit(&mut self) {
        match LocationQuery::parse(&self.view.input_value()) {
            Some(query) => self.search(query).await,
            None => debug!("Ignoring blank location input"),
        }
    }

    /// Look up `query` and show the result or the error.
    pub async fn search(&mut self, query: LocationQuery) {
        self.apply(Event::SearchStarted);
        self.view.hide_error();
        self.view.hide_current();
        self.view.hide_forecast();
        self.view.set_loading_visible(true);

        let outcome = self.lookup(&query).await;

        let failed = match outcome {
            Ok((current, forecast)) => {
                self.render_weather(&current, &forecast);
                if let Err(err) = self.prefs.set_last_location(&query) {
                    warn!(error = %err, "Failed to save last location");
                }
                self.apply(Event::LookupSucceeded);
                false
            }
            Err(err) => {
                warn!(%query, error = %err, "Weather lookup failed");
                self.render_error(&err.to_string());
                self.apply(Event::LookupFailed);
                true
            }
        };

        self.view.set_loading_visible(false);

        if failed {
            tokio::time::sleep(ERROR_EMPHASIS).await;
            self.view.set_error_emphasis(false);
        }
    }

    /// Flip between light and dark and remember the choice.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.view.apply_theme(self.theme);
        self.view.set_theme_toggle_icon(toggle_icon_for(self.theme));

        if let Err(err) = self.prefs.set_theme(self.theme) {
            warn!(error = %err, "Failed to save theme");
        }

        self.theme
    }

    async fn lookup(
        &self,
        query: &LocationQuery,
    ) -> Result<(CurrentWeather, ForecastSet), WeatherError> {
        let current = self.client.fetch_current(query).await?;
        let forecast = self.client.fetch_forecast(query).await?;
        Ok((current, forecast))
    }

    fn render_weather(&mut self, current: &CurrentWeather, forecast: &ForecastSet) {
        let panel = render::current_panel(current, &Local::now());
        self.view.show_current(&panel);
        self.view.show_forecast(&render::forecast_cards(forecast));
    }

    fn render_error(&mut self, message: &str) {
        self.view.show_error(render::error_text(message));
        self.view.hide_current();
        self.view.hide_forecast();
        self.view.set_error_emphasis(true);
    }

    fn apply(&mut self, event: Event) {
        match transition(self.state, event) {
            Some(next) => {
                debug!(from = ?self.state, to = ?next, ?event, "UI state change");
                self.state = next;
            }
            None => warn!(state = ?self.state, ?event, "Ignoring event in this state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_enters_loading_from_any_state() {
        for state in [UiState::Idle, UiState::Loading, UiState::ShowingWeather, UiState::ShowingError] {
            assert_eq!(transition(state, Event::SearchStarted), Some(UiState::Loading));
        }
    }

    #[test]
    fn loading_resolves_to_weather_or_error() {
        assert_eq!(transition(UiState::Loading, Event::LookupSucceeded), Some(UiState::ShowingWeather));
        assert_eq!(transition(UiState::Loading, Event::LookupFailed), Some(UiState::ShowingError));
    }

    #[test]
    fn results_outside_loading_are_ignored() {
        assert_eq!(transition(UiState::Idle, Event::LookupSucceeded), None);
        assert_eq!(transition(UiState::ShowingError, Event::LookupFailed), None);
    }

    #[test]
    fn toggle_icon_is_the_other_theme() {
        assert_eq!(toggle_icon_for(Theme::Dark), IconId::Clear);
        assert_eq!(toggle_icon_for(Theme::Light), IconId::Moon);
    }
}
