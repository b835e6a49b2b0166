//! Console command dispatch.
//!
//! The first word of a line selects the tool; the remainder is the argument
//! string. Multi-field tools (email, calendar events) split fields on `|`.

use tracing::debug;

use crate::tools::fun::FunKind;
use crate::tools::{
    calendar, currency, email, files, fun, math, news, password, search, system, units, weather,
    wiki, Toolbox,
};

const HELP: &str = "\
Available commands:
  weather <city>                     current weather
  search <query>                     web search
  wiki <topic>                       Wikipedia summary
  news [country] [count]             top headlines
  joke | quote                       something light
  email <to> | <subject> | <body> [| <cc>]
  task <text>                        add a to-do
  tasks                              list to-dos
  tasks clear                        clear all to-dos
  note <text>                        append to the current note
  notes                              show notes
  find <filename> [in <folder>]      locate a file
  read <filename> [in <folder>]      locate and read a file
  password [length]                  generate a password
  sysinfo                            CPU / RAM / disk report
  math <expression>                  evaluate an expression
  currency <amount> <from> <to>      convert money
  convert <value> <from> <to>        convert units
  timer <seconds> [label]            set a timer
  timers                             list timers
  timers cancel                      cancel all timers
  calendar [days]                    upcoming events
  event <title> | <start> | <end> [| <description>]
  help                               this list
  quit                               exit";

/// Split a `|`-separated argument string into trimmed fields.
fn fields(rest: &str) -> Vec<&str> {
    rest.split('|').map(str::trim).collect()
}

/// Split "name in folder phrase" into (name, folder).
fn name_and_dir(rest: &str) -> (&str, &str) {
    match rest.split_once(" in ") {
        Some((name, dir)) => (name.trim(), dir.trim()),
        None => (rest.trim(), "."),
    }
}

pub async fn dispatch(toolbox: &Toolbox, line: &str) -> String {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };
    let command = command.to_lowercase();
    debug!("Dispatching '{command}' with args '{rest}'");

    let result = match command.as_str() {
        "help" | "?" => Ok(HELP.to_string()),

        "weather" => weather::get_weather(&toolbox.client, &toolbox.config.weather, rest).await,

        "search" | "web" => {
            search::search_web(&toolbox.client, &toolbox.config.search, rest).await
        }

        "wiki" | "wikipedia" => {
            wiki::wikipedia_summary(&toolbox.client, &toolbox.config.wikipedia, rest, 2).await
        }

        "news" | "headlines" => {
            let mut parts = rest.split_whitespace();
            let country = parts.next();
            let count = parts.next().and_then(|c| c.parse().ok());
            news::get_news_headlines(&toolbox.client, &toolbox.config.news, country, count).await
        }

        "joke" => fun::get_joke_or_quote(&toolbox.client, FunKind::Joke).await,
        "quote" => fun::get_joke_or_quote(&toolbox.client, FunKind::Quote).await,

        "email" | "mail" => {
            let f = fields(rest);
            if f.len() < 3 {
                Ok("Usage: email <to> | <subject> | <body> [| <cc>]".to_string())
            } else {
                email::send_email(&toolbox.config.email, f[0], f[1], f[2], f.get(3).copied())
                    .await
            }
        }

        "task" | "todo" => {
            if rest.is_empty() {
                Ok("Usage: task <text>".to_string())
            } else {
                Ok(toolbox.tasks.add(rest))
            }
        }
        "tasks" | "todos" => match rest {
            "clear" => Ok(toolbox.tasks.clear()),
            _ => Ok(toolbox.tasks.list()),
        },

        "note" => {
            if rest.is_empty() {
                Ok("Usage: note <text>".to_string())
            } else {
                Ok(toolbox.notes.write(rest))
            }
        }
        "notes" => Ok(toolbox.notes.show()),

        "find" => {
            let (name, dir) = name_and_dir(rest);
            if name.is_empty() {
                Ok("Usage: find <filename> [in <folder>]".to_string())
            } else {
                files::find_and_read_file(name, dir, files::DEFAULT_MAX_DEPTH, false)
            }
        }
        "read" => {
            let (name, dir) = name_and_dir(rest);
            if name.is_empty() {
                Ok("Usage: read <filename> [in <folder>]".to_string())
            } else {
                files::find_and_read_file(name, dir, files::DEFAULT_MAX_DEPTH, true)
            }
        }

        "password" | "passwd" => {
            let length = rest.parse().unwrap_or(12);
            password::generate_password(length)
        }

        "sysinfo" | "system" => system::get_system_info().await,

        "math" | "calc" => math::solve_math(rest),

        "currency" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match parts.as_slice() {
                [amount, from, to] => match amount.parse() {
                    Ok(amount) => {
                        currency::convert_currency(
                            &toolbox.client,
                            &toolbox.config.currency,
                            amount,
                            from,
                            to,
                        )
                        .await
                    }
                    Err(_) => Ok(format!("'{amount}' is not a number.")),
                },
                _ => Ok("Usage: currency <amount> <from> <to>".to_string()),
            }
        }

        "convert" | "units" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match parts.as_slice() {
                [value, from, to] => match value.parse() {
                    Ok(value) => units::convert_units(value, from, to),
                    Err(_) => Ok(format!("'{value}' is not a number.")),
                },
                _ => Ok("Usage: convert <value> <from> <to>".to_string()),
            }
        }

        "timer" => {
            let mut parts = rest.splitn(2, char::is_whitespace);
            match parts.next().and_then(|s| s.parse().ok()) {
                Some(seconds) => toolbox.timers.set(seconds, parts.next().map(str::trim)),
                None => Ok("Usage: timer <seconds> [label]".to_string()),
            }
        }
        "timers" => match rest {
            "cancel" => Ok(toolbox.timers.cancel_all()),
            _ => Ok(toolbox.timers.list()),
        },

        "calendar" | "events" => {
            let days = rest.parse().ok();
            calendar::get_calendar_events(&toolbox.client, &toolbox.config.calendar, days).await
        }
        "event" => {
            let f = fields(rest);
            calendar::add_calendar_event(
                &toolbox.client,
                &toolbox.config.calendar,
                f.first().copied().filter(|s| !s.is_empty()),
                f.get(1).copied(),
                f.get(2).copied(),
                f.get(3).copied().unwrap_or(""),
            )
            .await
        }

        "" => Ok(String::new()),
        _ => Ok(format!(
            "I don't know the command '{command}'. Try 'help' for the list."
        )),
    };

    match result {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Tool '{command}' failed: {e:#}");
            format!("Sorry, that didn't work: {e:#}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StorageConfig};
    use tempfile::TempDir;

    fn toolbox(dir: &TempDir) -> Toolbox {
        let mut config = Config::default();
        config.storage = StorageConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..StorageConfig::default()
        };
        config.notifications.enabled = false;
        Toolbox::new(config)
    }

    #[tokio::test]
    async fn task_round_trip() {
        let dir = TempDir::new().expect("should create tempdir");
        let toolbox = toolbox(&dir);

        assert_eq!(dispatch(&toolbox, "task buy milk").await, "Task added: buy milk");
        assert_eq!(dispatch(&toolbox, "tasks").await, "1. buy milk");
        assert_eq!(dispatch(&toolbox, "tasks clear").await, "All tasks cleared.");
        assert_eq!(dispatch(&toolbox, "tasks").await, "No tasks in the list.");
    }

    #[tokio::test]
    async fn notes_accumulate() {
        let dir = TempDir::new().expect("should create tempdir");
        let toolbox = toolbox(&dir);

        assert_eq!(dispatch(&toolbox, "note milk").await, "Note added.");
        assert_eq!(dispatch(&toolbox, "note eggs").await, "Note updated.");
        assert_eq!(dispatch(&toolbox, "notes").await, "1. milk\neggs");
    }

    #[tokio::test]
    async fn password_takes_optional_length() {
        let dir = TempDir::new().expect("should create tempdir");
        let toolbox = toolbox(&dir);

        assert_eq!(dispatch(&toolbox, "password").await.len(), 12);
        assert_eq!(dispatch(&toolbox, "password 20").await.len(), 20);
        let reply = dispatch(&toolbox, "password 3").await;
        assert!(reply.contains("at least 6"));
    }

    #[tokio::test]
    async fn unit_and_math_commands() {
        let dir = TempDir::new().expect("should create tempdir");
        let toolbox = toolbox(&dir);

        assert_eq!(dispatch(&toolbox, "math 6*7").await, "Result: 42");
        assert_eq!(dispatch(&toolbox, "convert 1 km m").await, "1 km = 1000 m");
        assert_eq!(
            dispatch(&toolbox, "convert x km m").await,
            "'x' is not a number."
        );
    }

    #[tokio::test]
    async fn timer_commands() {
        let dir = TempDir::new().expect("should create tempdir");
        let toolbox = toolbox(&dir);

        assert_eq!(
            dispatch(&toolbox, "timer 90 tea").await,
            "Timer set for 90 seconds."
        );
        assert!(dispatch(&toolbox, "timers").await.contains("tea"));
        assert_eq!(
            dispatch(&toolbox, "timers cancel").await,
            "Cancelled 1 timer(s)."
        );
    }

    #[tokio::test]
    async fn unknown_command_suggests_help() {
        let dir = TempDir::new().expect("should create tempdir");
        let toolbox = toolbox(&dir);
        let reply = dispatch(&toolbox, "frobnicate now").await;
        assert!(reply.contains("don't know the command 'frobnicate'"));
    }

    #[tokio::test]
    async fn help_lists_commands() {
        let dir = TempDir::new().expect("should create tempdir");
        let toolbox = toolbox(&dir);
        let reply = dispatch(&toolbox, "help").await;
        assert!(reply.contains("weather <city>"));
        assert!(reply.contains("timer <seconds>"));
    }
}
