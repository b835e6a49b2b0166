//! Current weather via wttr.in's one-line format.

use anyhow::{bail, Context};
use reqwest::Client;
use tracing::debug;

use crate::config::WeatherConfig;

pub async fn get_weather(
    client: &Client,
    config: &WeatherConfig,
    city: &str,
) -> anyhow::Result<String> {
    let city = city.trim();
    if city.is_empty() {
        bail!("no city given");
    }

    // wttr.in takes '+' for spaces in the location path
    let url = format!(
        "{}/{}?format=3",
        config.endpoint,
        city.replace(' ', "+")
    );
    debug!("Fetching weather: {url}");

    let resp = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("weather request for {city} failed"))?;

    if !resp.status().is_success() {
        bail!("weather service returned status {}", resp.status());
    }

    let text = resp.text().await.context("weather response unreadable")?;
    Ok(text.trim().to_string())
}
