use anyhow::{bail, Context, Result};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::DiscoveryConfig;
use crate::events::EventBus;

use super::simulator::discovery_loop;

/// Owns at most one running discovery pass at a time.
pub struct DiscoveryController {
    events: EventBus,
    handle: Option<JoinHandle<()>>,
    cancel: Option<CancellationToken>,
}

impl DiscoveryController {
    pub fn new(events: EventBus) -> Self {
        Self {
            events,
            handle: None,
            cancel: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Spawn a pass over `plan`. The returned receiver resolves with the
    /// found batch when the pass completes or is stopped.
    pub fn start(
        &mut self,
        plan: Vec<String>,
        config: DiscoveryConfig,
    ) -> Result<oneshot::Receiver<Vec<String>>> {
        if self.is_active() {
            bail!("discovery already active");
        }

        let cancel = CancellationToken::new();
        let (done_tx, done_rx) = oneshot::channel();
        let handle = tokio::spawn(discovery_loop(
            plan,
            config,
            self.events.clone(),
            cancel.clone(),
            done_tx,
        ));

        self.handle = Some(handle);
        self.cancel = Some(cancel);
        Ok(done_rx)
    }

    /// Cancel the running pass, if any, and wait for it to deliver its
    /// partial batch and exit.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("discovery task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::AppEvent;

    fn fast_config() -> DiscoveryConfig {
        DiscoveryConfig {
            tick_interval: Duration::from_millis(1),
            scan_window: Duration::from_millis(100),
            shuffle: false,
        }
    }

    fn plan(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn finds_the_whole_plan_within_the_window() {
        let events = EventBus::new();
        let mut controller = DiscoveryController::new(events);

        let done = controller
            .start(plan(&["T1", "T2", "T3"]), fast_config())
            .unwrap();
        let found = done.await.unwrap();

        assert_eq!(found, vec!["T1", "T2", "T3"]);
    }

    #[tokio::test]
    async fn deduplicates_within_a_pass() {
        let events = EventBus::new();
        let mut controller = DiscoveryController::new(events);

        let done = controller
            .start(plan(&["T1", "T1", "T2"]), fast_config())
            .unwrap();
        let found = done.await.unwrap();

        assert_eq!(found, vec!["T1", "T2"]);
    }

    #[tokio::test]
    async fn early_stop_delivers_the_partial_batch() {
        let events = EventBus::new();
        let mut controller = DiscoveryController::new(events);

        let slow = DiscoveryConfig {
            tick_interval: Duration::from_millis(20),
            scan_window: Duration::from_secs(30),
            shuffle: false,
        };
        let done = controller
            .start(plan(&["T1", "T2", "T3", "T4", "T5"]), slow)
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        controller.stop().await.unwrap();

        let found = done.await.unwrap();
        assert!(!found.is_empty());
        assert!(found.len() < 5);
    }

    #[tokio::test]
    async fn completion_is_signalled_exactly_once() {
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let mut controller = DiscoveryController::new(events);

        let done = controller.start(plan(&["T1"]), fast_config()).unwrap();
        done.await.unwrap();

        let mut completions = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, AppEvent::DiscoveryCompleted { .. }) {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[tokio::test]
    async fn starting_twice_is_rejected_until_the_pass_ends() {
        let events = EventBus::new();
        let mut controller = DiscoveryController::new(events);

        let slow = DiscoveryConfig {
            tick_interval: Duration::from_millis(10),
            scan_window: Duration::from_secs(30),
            shuffle: false,
        };
        let _done = controller.start(plan(&["T1"]), slow.clone()).unwrap();
        assert!(controller.start(plan(&["T2"]), slow).is_err());

        controller.stop().await.unwrap();
        assert!(!controller.is_active());
    }
}
