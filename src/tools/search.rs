//! Web search via the DuckDuckGo Instant Answer API.

use anyhow::{bail, Context};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::SearchConfig;

pub async fn search_web(
    client: &Client,
    config: &SearchConfig,
    query: &str,
) -> anyhow::Result<String> {
    let query = query.trim();
    if query.is_empty() {
        bail!("no search query given");
    }

    debug!("Searching for '{query}'");
    let resp = client
        .get(&config.endpoint)
        .query(&[
            ("q", query),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ])
        .send()
        .await
        .with_context(|| format!("search for '{query}' failed"))?;

    if !resp.status().is_success() {
        bail!("search service returned status {}", resp.status());
    }

    let data: Value = resp.json().await.context("search response unreadable")?;
    let summary = render_results(&data, config.max_results);
    info!("Search results for '{query}': {summary}");
    Ok(summary)
}

/// Prefer the abstract; fall back to related-topic snippets.
fn render_results(data: &Value, max_results: usize) -> String {
    let abstract_text = data["AbstractText"].as_str().unwrap_or("").trim();
    if !abstract_text.is_empty() {
        let source = data["AbstractSource"].as_str().unwrap_or("");
        return if source.is_empty() {
            abstract_text.to_string()
        } else {
            format!("{abstract_text} (source: {source})")
        };
    }

    let answer = data["Answer"].as_str().unwrap_or("").trim();
    if !answer.is_empty() {
        return answer.to_string();
    }

    let snippets: Vec<&str> = data["RelatedTopics"]
        .as_array()
        .map(|topics| {
            topics
                .iter()
                .filter_map(|t| t["Text"].as_str())
                .filter(|t| !t.is_empty())
                .take(max_results)
                .collect()
        })
        .unwrap_or_default();

    if snippets.is_empty() {
        "No results found.".to_string()
    } else {
        snippets
            .iter()
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn abstract_wins_over_topics() {
        let data = json!({
            "AbstractText": "Rust is a systems programming language.",
            "AbstractSource": "Wikipedia",
            "RelatedTopics": [{"Text": "ignored"}]
        });
        assert_eq!(
            render_results(&data, 3),
            "Rust is a systems programming language. (source: Wikipedia)"
        );
    }

    #[test]
    fn falls_back_to_related_topics() {
        let data = json!({
            "AbstractText": "",
            "RelatedTopics": [
                {"Text": "first"},
                {"Text": "second"},
                {"Text": "third"},
                {"Text": "fourth"}
            ]
        });
        assert_eq!(render_results(&data, 2), "- first\n- second");
    }

    #[test]
    fn empty_payload_reports_no_results() {
        let data = json!({});
        assert_eq!(render_results(&data, 3), "No results found.");
    }
}
