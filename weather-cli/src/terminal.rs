//! A `View` that draws the widget into the terminal.
//!
//! The terminal is append-only, so hiding a panel draws nothing. The loading
//! line and the error line are transient: while they are the last line on
//! screen they get rewritten in place.

use console::{Style, Term};
use tracing::debug;
use weather_widget_core::{CurrentPanel, ForecastCard, IconId, Theme, View};

#[derive(Debug, Clone, PartialEq)]
enum Transient {
    None,
    Loading,
    Error(String),
}

#[derive(Debug)]
pub struct TerminalView {
    term: Term,
    input: String,
    theme: Theme,
    transient: Transient,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            input: String::new(),
            theme: Theme::Light,
            transient: Transient::None,
        }
    }

    /// Called before other output (such as a prompt) goes to the terminal, so
    /// the last line is no longer ours to rewrite.
    pub fn settle(&mut self) {
        self.transient = Transient::None;
    }

    fn header_style(&self) -> Style {
        match self.theme {
            Theme::Light => Style::new().black().on_white().bold(),
            Theme::Dark => Style::new().white().on_black().bold(),
        }
    }

    fn text_style(&self) -> Style {
        match self.theme {
            Theme::Light => Style::new(),
            Theme::Dark => Style::new().white().on_black(),
        }
    }

    fn print(&mut self, line: &str) {
        self.clear_transient();
        self.write(line);
    }

    fn write(&self, line: &str) {
        if let Err(err) = self.term.write_line(line) {
            debug!(error = %err, "Failed to write to terminal");
        }
    }

    fn clear_transient(&mut self) {
        if self.transient != Transient::None {
            self.erase_last_line();
            self.transient = Transient::None;
        }
    }

    fn erase_last_line(&self) {
        if !self.term.is_term() {
            return;
        }
        if let Err(err) = self.term.clear_last_lines(1) {
            debug!(error = %err, "Failed to clear terminal line");
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TerminalView {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn set_loading_visible(&mut self, visible: bool) {
        if visible {
            self.print(&Style::new().dim().apply_to("Loading...").to_string());
            self.transient = Transient::Loading;
        } else if self.transient == Transient::Loading {
            self.clear_transient();
        }
    }

    fn show_error(&mut self, message: &str) {
        self.print(&error_line(message, false));
        self.transient = Transient::Error(message.to_string());
    }

    fn hide_error(&mut self) {
        if matches!(self.transient, Transient::Error(_)) {
            // Leave the old error in the scrollback; it is just no longer current.
            self.transient = Transient::None;
        }
    }

    fn set_error_emphasis(&mut self, on: bool) {
        // Redraw only while the error is still the last line.
        if let Transient::Error(message) = &self.transient {
            if !self.term.is_term() {
                return;
            }
            let line = error_line(message, on);
            self.erase_last_line();
            self.write(&line);
        }
    }

    fn show_current(&mut self, panel: &CurrentPanel) {
        let header = self.header_style();
        let text = self.text_style();

        let lines = current_lines(panel);
        if let Some((first, rest)) = lines.split_first() {
            self.print("");
            self.print(&header.apply_to(first).to_string());
            for line in rest {
                self.print(&text.apply_to(line).to_string());
            }
        }
    }

    fn hide_current(&mut self) {}

    fn show_forecast(&mut self, cards: &[ForecastCard]) {
        if cards.is_empty() {
            return;
        }
        let text = self.text_style();
        self.print(&text.apply_to(forecast_line(cards)).to_string());
        self.print("");
    }

    fn hide_forecast(&mut self) {}

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn set_theme_toggle_icon(&mut self, icon: IconId) {
        let line = format!("Theme: {} (type :theme for {})", self.theme, icon.glyph());
        self.print(&self.text_style().apply_to(line).to_string());
    }
}

fn error_line(message: &str, emphasized: bool) -> String {
    let style = if emphasized {
        Style::new().red().bold().reverse()
    } else {
        Style::new().red()
    };
    style.apply_to(format!("✖ {message}")).to_string()
}

fn current_lines(panel: &CurrentPanel) -> Vec<String> {
    vec![
        format!(" {} ", panel.location),
        panel.date.clone(),
        format!("{}  {}  {}", panel.icon.glyph(), panel.temperature, panel.condition),
        format!(
            "Feels like {} · Humidity {} · Wind {} · Pressure {}",
            panel.feels_like, panel.humidity, panel.wind_speed, panel.pressure
        ),
    ]
}

fn forecast_line(cards: &[ForecastCard]) -> String {
    cards
        .iter()
        .map(|c| format!("{} {} {}", c.day, c.icon.glyph(), c.temperature))
        .collect::<Vec<_>>()
        .join("  |  ")
}
