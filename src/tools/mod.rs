//! The assistant tool set: one submodule per feature.
//!
//! Every tool returns `anyhow::Result<String>` where the `Ok` value is a
//! sentence meant to be read back to the user. Errors are turned into
//! friendly failure sentences at the dispatch boundary.

pub mod calendar;
pub mod currency;
pub mod email;
pub mod files;
pub mod fun;
pub mod math;
pub mod news;
pub mod password;
pub mod search;
pub mod system;
pub mod timer;
pub mod units;
pub mod weather;
pub mod wiki;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::notifier::Notifier;
use crate::store::{NoteStore, TaskStore};
use self::timer::TimerManager;

/// Shared state handed to every tool invocation, from the console dispatcher
/// and the MCP server alike.
pub struct Toolbox {
    pub config: Config,
    pub client: Client,
    pub tasks: TaskStore,
    pub notes: NoteStore,
    pub timers: TimerManager,
    pub notifier: Arc<Notifier>,
}

impl Toolbox {
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        let tasks = TaskStore::new(config.storage.todo_path());
        let notes = NoteStore::new(config.storage.notes_path());
        let notifier = Arc::new(Notifier::new(config.notifications.enabled));
        let timers = TimerManager::new(notifier.clone());

        Self {
            config,
            client,
            tasks,
            notes,
            timers,
            notifier,
        }
    }
}
