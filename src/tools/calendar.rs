//! Google Calendar integration over the REST v3 API.
//!
//! Auth uses a pre-provisioned bearer token read from a file; the OAuth
//! browser flow is external setup and not part of this service. Required
//! parameters the caller left out come back as questions, so a conversational
//! front end can relay them and call again.

use anyhow::{bail, Context};
use chrono::{Duration, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::CalendarConfig;

fn load_token(config: &CalendarConfig) -> anyhow::Result<String> {
    let path = config.resolved_token_file();
    let token = std::fs::read_to_string(&path).with_context(|| {
        format!(
            "no calendar token at {} — provision one and try again",
            path.display()
        )
    })?;
    let token = token.trim().to_string();
    if token.is_empty() {
        bail!("calendar token file is empty");
    }
    Ok(token)
}

pub async fn get_calendar_events(
    client: &Client,
    config: &CalendarConfig,
    days: Option<i64>,
) -> anyhow::Result<String> {
    let Some(days) = days else {
        return Ok(
            "How many days ahead would you like to check your calendar events for?".to_string(),
        );
    };
    if days <= 0 {
        bail!("days must be positive");
    }

    let token = load_token(config)?;
    let now = Utc::now();
    let time_min = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let time_max = (now + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true);

    let url = format!("{}/calendars/{}/events", config.endpoint, config.calendar_id);
    let max_results = config.max_events.to_string();
    let resp = client
        .get(&url)
        .bearer_auth(&token)
        .query(&[
            ("timeMin", time_min.as_str()),
            ("timeMax", time_max.as_str()),
            ("maxResults", max_results.as_str()),
            ("singleEvents", "true"),
            ("orderBy", "startTime"),
        ])
        .send()
        .await
        .context("calendar request failed")?;

    if !resp.status().is_success() {
        bail!("calendar API returned status {}", resp.status());
    }

    let data: Value = resp.json().await.context("calendar response unreadable")?;
    let events = data["items"].as_array().cloned().unwrap_or_default();
    if events.is_empty() {
        return Ok(format!("No upcoming events found in the next {days} day(s)."));
    }

    let mut lines = vec![format!("Here are your events for the next {days} day(s):")];
    for event in &events {
        let start = event["start"]["dateTime"]
            .as_str()
            .or_else(|| event["start"]["date"].as_str())
            .unwrap_or("unknown time");
        let summary = event["summary"].as_str().unwrap_or("(no title)");
        lines.push(format!("{start}: {summary}"));
    }
    Ok(lines.join("\n"))
}

pub async fn add_calendar_event(
    client: &Client,
    config: &CalendarConfig,
    summary: Option<&str>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    description: &str,
) -> anyhow::Result<String> {
    let Some(summary) = summary.filter(|s| !s.trim().is_empty()) else {
        return Ok("What should I name the event?".to_string());
    };
    let Some(start_time) = start_time.filter(|s| !s.trim().is_empty()) else {
        return Ok(
            "When should the event start? (ISO 8601, like '2025-07-22T15:00:00+05:30')"
                .to_string(),
        );
    };
    let Some(end_time) = end_time.filter(|s| !s.trim().is_empty()) else {
        return Ok(
            "When should the event end? (ISO 8601, like '2025-07-22T16:00:00+05:30')".to_string(),
        );
    };

    let token = load_token(config)?;
    let event = json!({
        "summary": summary,
        "description": description,
        "start": { "dateTime": start_time },
        "end": { "dateTime": end_time },
    });

    let url = format!("{}/calendars/{}/events", config.endpoint, config.calendar_id);
    let resp = client
        .post(&url)
        .bearer_auth(&token)
        .json(&event)
        .send()
        .await
        .context("calendar insert failed")?;

    if !resp.status().is_success() {
        bail!("calendar API returned status {}", resp.status());
    }

    let created: Value = resp.json().await.context("calendar response unreadable")?;
    Ok(format!(
        "Event created.\nTitle: {summary}\nStart: {start_time}\nEnd: {end_time}\nLink: {}",
        created["htmlLink"].as_str().unwrap_or("N/A")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalendarConfig;

    fn client() -> Client {
        Client::new()
    }

    #[tokio::test]
    async fn missing_days_asks_a_question() {
        let reply = get_calendar_events(&client(), &CalendarConfig::default(), None)
            .await
            .expect("should reply");
        assert!(reply.starts_with("How many days ahead"));
    }

    #[tokio::test]
    async fn missing_fields_ask_in_order() {
        let config = CalendarConfig::default();
        let reply = add_calendar_event(&client(), &config, None, None, None, "")
            .await
            .expect("should reply");
        assert_eq!(reply, "What should I name the event?");

        let reply = add_calendar_event(&client(), &config, Some("Standup"), None, None, "")
            .await
            .expect("should reply");
        assert!(reply.starts_with("When should the event start?"));

        let reply = add_calendar_event(
            &client(),
            &config,
            Some("Standup"),
            Some("2025-07-22T15:00:00+05:30"),
            None,
            "",
        )
        .await
        .expect("should reply");
        assert!(reply.starts_with("When should the event end?"));
    }

    #[tokio::test]
    async fn missing_token_is_an_error() {
        let config = CalendarConfig {
            token_file: Some(std::path::PathBuf::from("/nonexistent/token")),
            ..CalendarConfig::default()
        };
        let err = get_calendar_events(&client(), &config, Some(7))
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("no calendar token"));
    }
}
