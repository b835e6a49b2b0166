//! Currency conversion via exchangerate.host.

use anyhow::{bail, Context};
use reqwest::Client;
use serde_json::Value;

use crate::config::CurrencyConfig;

pub async fn convert_currency(
    client: &Client,
    config: &CurrencyConfig,
    amount: f64,
    from: &str,
    to: &str,
) -> anyhow::Result<String> {
    let from = from.trim().to_uppercase();
    let to = to.trim().to_uppercase();
    if from.is_empty() || to.is_empty() {
        bail!("both currency codes are required");
    }

    let url = format!("{}/convert", config.endpoint);
    let amount_str = amount.to_string();
    let resp = client
        .get(&url)
        .query(&[
            ("from", from.as_str()),
            ("to", to.as_str()),
            ("amount", amount_str.as_str()),
        ])
        .send()
        .await
        .context("currency request failed")?;

    let data: Value = resp.json().await.context("currency response unreadable")?;
    if data["success"].as_bool() != Some(true) {
        bail!(
            "currency conversion failed: {}",
            data["error"]["info"]
                .as_str()
                .or_else(|| data["error"].as_str())
                .unwrap_or("unknown error")
        );
    }

    let Some(result) = data["result"].as_f64() else {
        bail!("currency response missing result");
    };

    Ok(format!("{amount} {from} = {result:.2} {to}"))
}
