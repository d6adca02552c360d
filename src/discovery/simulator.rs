use std::collections::HashSet;

use log::{info, warn};
use rand::seq::SliceRandom;
use tokio::sync::oneshot;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::DiscoveryConfig;
use crate::events::{AppEvent, EventBus};

/// One simulated discovery pass. Reveals one planned tag per tick until the
/// scan window closes or the pass is cancelled, then delivers everything
/// found as a single batch through `done`, exactly once either way. The
/// ticker keeps running after the plan is exhausted so an early stop and a
/// window timeout behave the same.
pub(crate) async fn discovery_loop(
    plan: Vec<String>,
    config: DiscoveryConfig,
    events: EventBus,
    cancel: CancellationToken,
    done: oneshot::Sender<Vec<String>>,
) {
    let mut queue = plan;
    if config.shuffle {
        queue.shuffle(&mut rand::thread_rng());
    }

    let window = tokio::time::sleep(config.scan_window);
    tokio::pin!(window);

    let mut ticker = interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut seen: HashSet<String> = HashSet::new();
    let mut found: Vec<String> = Vec::new();
    let mut next = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if next < queue.len() {
                    let epc = queue[next].clone();
                    next += 1;
                    if seen.insert(epc.clone()) {
                        found.push(epc);
                        events.publish(AppEvent::DiscoveryProgress { found: found.len() });
                    }
                }
            }
            _ = &mut window => {
                info!("discovery window closed with {} tags", found.len());
                break;
            }
            _ = cancel.cancelled() => {
                info!("discovery stopped early with {} tags", found.len());
                break;
            }
        }
    }

    events.publish(AppEvent::DiscoveryCompleted { found: found.len() });
    if done.send(found).is_err() {
        warn!("discovery batch receiver dropped before delivery");
    }
}
