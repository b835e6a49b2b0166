//! Random joke or inspirational quote.

use anyhow::{bail, Context};
use reqwest::Client;
use serde_json::Value;

const JOKE_URL: &str = "https://official-joke-api.appspot.com/random_joke";
const QUOTE_URL: &str = "https://api.quotable.io/random";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunKind {
    Joke,
    Quote,
}

impl FunKind {
    /// Anything other than an explicit quote request is a joke, matching the
    /// original default.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "quote" => Self::Quote,
            _ => Self::Joke,
        }
    }
}

pub async fn get_joke_or_quote(client: &Client, kind: FunKind) -> anyhow::Result<String> {
    match kind {
        FunKind::Joke => {
            let resp = client
                .get(JOKE_URL)
                .send()
                .await
                .context("joke request failed")?;
            if !resp.status().is_success() {
                bail!("joke service returned status {}", resp.status());
            }
            let joke: Value = resp.json().await.context("joke response unreadable")?;
            Ok(format!(
                "{}\n{}",
                joke["setup"].as_str().unwrap_or(""),
                joke["punchline"].as_str().unwrap_or("")
            ))
        }
        FunKind::Quote => {
            let resp = client
                .get(QUOTE_URL)
                .send()
                .await
                .context("quote request failed")?;
            if !resp.status().is_success() {
                bail!("quote service returned status {}", resp.status());
            }
            let quote: Value = resp.json().await.context("quote response unreadable")?;
            Ok(format!(
                "{} — {}",
                quote["content"].as_str().unwrap_or(""),
                quote["author"].as_str().unwrap_or("unknown")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_defaults_to_joke() {
        assert_eq!(FunKind::from_str("joke"), FunKind::Joke);
        assert_eq!(FunKind::from_str("anything"), FunKind::Joke);
        assert_eq!(FunKind::from_str(""), FunKind::Joke);
        assert_eq!(FunKind::from_str(" Quote "), FunKind::Quote);
    }
}
