/// Symbolic icons the widget can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
    /// Only used by the theme toggle.
    Moon,
}

impl IconId {
    /// Icon-font style name.
    pub fn name(&self) -> &'static str {
        match self {
            IconId::Thunderstorm => "bolt",
            IconId::Drizzle => "cloud-rain",
            IconId::Rain => "cloud-showers-heavy",
            IconId::Snow => "snowflake",
            IconId::Atmosphere => "smog",
            IconId::Clear => "sun",
            IconId::Clouds => "cloud",
            IconId::Unknown => "question",
            IconId::Moon => "moon",
        }
    }

    /// Terminal glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconId::Thunderstorm => "⚡",
            IconId::Drizzle => "🌦",
            IconId::Rain => "🌧",
            IconId::Snow => "❄",
            IconId::Atmosphere => "🌫",
            IconId::Clear => "☀",
            IconId::Clouds => "☁",
            IconId::Unknown => "?",
            IconId::Moon => "☾",
        }
    }
}

/// Map an OpenWeather condition code to an icon.
///
/// Ranges are checked in order. Codes in `[400, 500)`, below 200 and negative
/// have no group and map to [`IconId::Unknown`].
pub fn icon_for(code: i64) -> IconId {
    match code {
        200..300 => IconId::Thunderstorm,
        300..400 => IconId::Drizzle,
        500..600 => IconId::Rain,
        600..700 => IconId::Snow,
        700..800 => IconId::Atmosphere,
        800 => IconId::Clear,
        801.. => IconId::Clouds,
        _ => IconId::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thunderstorm_range() {
        for code in 200..300 {
            assert_eq!(icon_for(code), IconId::Thunderstorm, "code {code}");
        }
    }

    #[test]
    fn group_boundaries() {
        assert_eq!(icon_for(300), IconId::Drizzle);
        assert_eq!(icon_for(399), IconId::Drizzle);
        assert_eq!(icon_for(500), IconId::Rain);
        assert_eq!(icon_for(600), IconId::Snow);
        assert_eq!(icon_for(799), IconId::Atmosphere);
    }

    #[test]
    fn clear_and_clouds() {
        assert_eq!(icon_for(800), IconId::Clear);
        assert_eq!(icon_for(801), IconId::Clouds);
        assert_eq!(icon_for(850), IconId::Clouds);
    }

    #[test]
    fn gaps_are_unknown() {
        assert_eq!(icon_for(450), IconId::Unknown);
        assert_eq!(icon_for(199), IconId::Unknown);
        assert_eq!(icon_for(0), IconId::Unknown);
        assert_eq!(icon_for(-5), IconId::Unknown);
        assert_eq!(icon_for(i64::MIN), IconId::Unknown);
    }

    #[test]
    fn huge_codes_are_clouds() {
        assert_eq!(icon_for(i64::MAX), IconId::Clouds);
    }

    #[test]
    fn icon_names() {
        assert_eq!(IconId::Clear.name(), "sun");
        assert_eq!(IconId::Moon.name(), "moon");
        assert_eq!(IconId::Unknown.name(), "question");
    }
}
