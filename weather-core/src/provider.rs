use crate::{
    Config, CurrentWeather, ForecastSet, LocationQuery, WeatherError,
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// The two lookups the widget performs for a location.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentWeather, WeatherError>;

    async fn fetch_forecast(&self, query: &LocationQuery) -> Result<ForecastSet, WeatherError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherClient>> {
    let api_key = config.resolve_api_key()?;
    let client = OpenWeatherClient::new(api_key).with_base_url(config.base_url.clone());

    Ok(Arc::new(client))
}
