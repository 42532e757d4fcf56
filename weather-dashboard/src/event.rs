//! Terminal input
//!
//! crossterm's reader is blocking, so a tokio task polls it in short slices
//! and forwards what it finds over a channel the app loop can `select!` on.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Input the dashboard reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Key press (releases and repeats are filtered out)
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Configuration for the event poller
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call
    pub poll_timeout: Duration,
    /// Sleep between poll cycles
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Map a crossterm event to one the dashboard handles
pub fn process_raw_event(raw: event::Event) -> Option<EventKind> {
    match raw {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Some(EventKind::Key(key)),
        event::Event::Resize(w, h) => Some(EventKind::Resize(w, h)),
        _ => None,
    }
}

/// Spawn the polling task
///
/// Stops when `cancel_token` is cancelled or the receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::debug!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(config.poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let Ok(raw) = event::read() else { continue };
                        if let Some(kind) = process_raw_event(raw) {
                            if tx.send(kind).is_err() {
                                tracing::debug!("Event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}
