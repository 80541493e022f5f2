use thiserror::Error;

/// Failures of a weather lookup.
///
/// The widget does not tell these apart for the user; they all end up as the
/// text of the error panel.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered with a non-success status.
    #[error("City not found")]
    Lookup,

    /// The request could not be sent or the body could not be read.
    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON we expected.
    #[error("Failed to parse weather response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_has_fixed_message() {
        assert_eq!(WeatherError::Lookup.to_string(), "City not found");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: WeatherError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, WeatherError::Parse(_)));
    }
}
