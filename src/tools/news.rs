//! Top news headlines via NewsAPI.

use anyhow::{bail, Context};
use reqwest::Client;
use serde_json::Value;

use crate::config::NewsConfig;

pub async fn get_news_headlines(
    client: &Client,
    config: &NewsConfig,
    country: Option<&str>,
    count: Option<usize>,
) -> anyhow::Result<String> {
    let country = country.unwrap_or(&config.country);
    let count = count.unwrap_or(config.count);
    let url = format!("{}/top-headlines", config.endpoint);
    let page_size = count.to_string();
    let api_key = config.resolved_api_key();

    let resp = client
        .get(&url)
        .query(&[
            ("country", country),
            ("pageSize", page_size.as_str()),
            ("apiKey", api_key.as_str()),
        ])
        .send()
        .await
        .context("news request failed")?;

    let data: Value = resp.json().await.context("news response unreadable")?;
    if data["status"].as_str() != Some("ok") {
        bail!(
            "news API error: {}",
            data["message"].as_str().unwrap_or("unknown error")
        );
    }

    let headlines: Vec<&str> = data["articles"]
        .as_array()
        .map(|articles| {
            articles
                .iter()
                .filter_map(|a| a["title"].as_str())
                .take(count)
                .collect()
        })
        .unwrap_or_default();

    if headlines.is_empty() {
        Ok("No headlines found.".to_string())
    } else {
        Ok(headlines.join("\n"))
    }
}
