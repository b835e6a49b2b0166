//! Background timers with desktop notification on expiry.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;

use crate::notifier::Notifier;

struct TimerEntry {
    id: u64,
    label: String,
    deadline: Instant,
    handle: JoinHandle<()>,
}

pub struct TimerManager {
    notifier: Arc<Notifier>,
    timers: Arc<Mutex<Vec<TimerEntry>>>,
    next_id: AtomicU64,
    fired: Arc<AtomicU32>,
}

impl TimerManager {
    pub fn new(notifier: Arc<Notifier>) -> Self {
        Self {
            notifier,
            timers: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
            fired: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn fired_count(&self) -> u32 {
        self.fired.load(Ordering::Relaxed)
    }

    /// Start a timer. The task logs and notifies when time is up, then
    /// removes itself from the active list.
    pub fn set(&self, seconds: u64, label: Option<&str>) -> anyhow::Result<String> {
        if seconds == 0 {
            bail!("timer length must be at least one second");
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let label = label
            .map(str::to_string)
            .unwrap_or_else(|| format!("Timer for {seconds} seconds"));
        let deadline = Instant::now() + Duration::from_secs(seconds);

        let notifier = self.notifier.clone();
        let timers = self.timers.clone();
        let fired = self.fired.clone();
        let task_label = label.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            fired.fetch_add(1, Ordering::Relaxed);
            info!("Timer #{id} is up: {task_label}");
            notifier.notify("Timer finished", &task_label);
            timers.lock().unwrap().retain(|t| t.id != id);
        });

        self.timers.lock().unwrap().push(TimerEntry {
            id,
            label,
            deadline,
            handle,
        });

        Ok(format!("Timer set for {seconds} seconds."))
    }

    /// Describe active timers with remaining time.
    pub fn list(&self) -> String {
        let timers = self.timers.lock().unwrap();
        if timers.is_empty() {
            return "No active timers.".to_string();
        }
        let now = Instant::now();
        timers
            .iter()
            .map(|t| {
                let remaining = t.deadline.saturating_duration_since(now).as_secs();
                format!("#{}: {} ({remaining}s remaining)", t.id, t.label)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Abort all active timers. Returns how many were cancelled.
    pub fn cancel_all(&self) -> String {
        let mut timers = self.timers.lock().unwrap();
        let count = timers.len();
        for timer in timers.drain(..) {
            timer.handle.abort();
        }
        if count == 0 {
            "No active timers to cancel.".to_string()
        } else {
            format!("Cancelled {count} timer(s).")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TimerManager {
        TimerManager::new(Arc::new(Notifier::new(false)))
    }

    #[tokio::test]
    async fn set_then_list_then_cancel() {
        let timers = manager();
        timers.set(60, Some("tea")).expect("should set");
        timers.set(120, None).expect("should set");

        let listing = timers.list();
        assert!(listing.contains("tea"));
        assert!(listing.contains("#2"));

        assert_eq!(timers.cancel_all(), "Cancelled 2 timer(s).");
        assert_eq!(timers.list(), "No active timers.");
    }

    #[tokio::test]
    async fn zero_length_rejected() {
        assert!(manager().set(0, None).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_timer_fires_and_unlists() {
        let timers = manager();
        timers.set(1, None).expect("should set");
        // Paused time: advancing the clock runs the sleeping task
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(timers.fired_count(), 1);
        assert_eq!(timers.list(), "No active timers.");
    }
}
