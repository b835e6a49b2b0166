//! Wikipedia topic summaries via the REST v1 page-summary endpoint.

use anyhow::{bail, Context};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::WikipediaConfig;

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    extract: String,
}

pub async fn wikipedia_summary(
    client: &Client,
    config: &WikipediaConfig,
    topic: &str,
    sentences: usize,
) -> anyhow::Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        bail!("no topic given");
    }

    let url = format!(
        "{}/page/summary/{}",
        config.endpoint,
        topic.replace(' ', "_")
    );

    let resp = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Wikipedia request for '{topic}' failed"))?;

    if resp.status() == StatusCode::NOT_FOUND {
        return Ok("Topic not found.".to_string());
    }
    if !resp.status().is_success() {
        bail!("Wikipedia returned status {}", resp.status());
    }

    let summary: PageSummary = resp.json().await.context("summary response unreadable")?;
    if summary.kind == "disambiguation" {
        return Ok(format!(
            "Topic '{topic}' is ambiguous — try a more specific title."
        ));
    }
    if summary.extract.is_empty() {
        return Ok("Topic not found.".to_string());
    }

    Ok(truncate_sentences(&summary.extract, sentences))
}

/// Keep roughly the first `n` sentences of the extract.
fn truncate_sentences(text: &str, n: usize) -> String {
    if n == 0 {
        return text.to_string();
    }
    let mut count = 0;
    for (i, c) in text.char_indices() {
        if c == '.' || c == '?' || c == '!' {
            count += 1;
            if count == n {
                return text[..=i].to_string();
            }
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_requested_sentences() {
        let text = "One. Two. Three.";
        assert_eq!(truncate_sentences(text, 2), "One. Two.");
    }

    #[test]
    fn short_extract_returned_whole() {
        assert_eq!(truncate_sentences("Only one.", 2), "Only one.");
    }

    #[test]
    fn zero_means_no_truncation() {
        assert_eq!(truncate_sentences("A. B. C.", 0), "A. B. C.");
    }
}
