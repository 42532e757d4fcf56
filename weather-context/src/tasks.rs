//! Task manager for fetch tasks
//!
//! Provides lifecycle management for the provider's async work:
//! - Keyed tasks: spawning with a key that is still running aborts the old task
//! - Debounced tasks: sleep first, restart the timer on every call
//! - Detached tasks: never replaced, only aborted on `cancel_all`
//!
//! Every task resolves to an [`Action`] that is sent back to the provider.
//! An aborted task sends nothing.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::action::Action;
use crate::state::Slice;

/// Identifies a task for cancellation and replacement
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TaskKey {
    /// The in-flight request for one weather slice
    Slice(Slice),
    /// The pending (or in-flight) search lookup
    Geocode,
}

impl TaskKey {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKey::Slice(Slice::Forecast) => "forecast",
            TaskKey::Slice(Slice::AirQuality) => "air_quality",
            TaskKey::Slice(Slice::FiveDayForecast) => "five_day_forecast",
            TaskKey::Slice(Slice::UvIndex) => "uv_index",
            TaskKey::Geocode => "geocode",
        }
    }
}

/// Runs fetch tasks and routes their result actions back to the provider
pub struct TaskManager {
    tasks: HashMap<TaskKey, AbortHandle>,
    detached: Vec<AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    /// `action_tx` receives the action each task resolves to
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            detached: Vec::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any running task with the same key
    pub fn spawn<F>(&mut self, key: TaskKey, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.cancel(&key);

        let handle = self.spawn_sending(future);
        self.tasks.insert(key, handle);
        self
    }

    /// Spawn a task that no later task replaces
    ///
    /// Detached tasks run to completion unless `cancel_all` is called.
    pub fn spawn_detached<F>(&mut self, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.detached.retain(|handle| !handle.is_finished());

        let handle = self.spawn_sending(future);
        self.detached.push(handle);
        self
    }

    /// Spawn a task that waits `duration` before running
    ///
    /// Calling again with the same key before the timer fires aborts the
    /// pending task and restarts the timer, so a burst of calls runs the
    /// future at most once, for the last call.
    pub fn debounce<F>(&mut self, key: TaskKey, duration: Duration, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.spawn(key, async move {
            tokio::time::sleep(duration).await;
            future.await
        })
    }

    fn spawn_sending<F>(&self, future: F) -> AbortHandle
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = future.await;
            // Receiver gone means the provider stopped; nothing to report to
            let _ = tx.send(action);
        })
        .abort_handle()
    }

    /// Abort a task by key; no-op when nothing runs under that key
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            if !handle.is_finished() {
                tracing::debug!(task = key.name(), "Cancelling task");
            }
            handle.abort();
        }
    }

    /// Abort every task, keyed and detached
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
        for handle in self.detached.drain(..) {
            handle.abort();
        }
    }

    /// Whether a keyed task is registered and has not finished
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of tasks (keyed and detached) still running
    pub fn len(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
            + self.detached.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of keyed tasks that are still running
    pub fn running_keys(&self) -> impl Iterator<Item = &TaskKey> {
        self.tasks
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(key, _)| key)
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn done(search: &str) -> Action {
        Action::GeocodeDidFail {
            search: search.into(),
            error: String::new(),
        }
    }

    fn search_of(action: &Action) -> &str {
        match action {
            Action::GeocodeDidFail { search, .. } => search,
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_task_key_names() {
        assert_eq!(TaskKey::Geocode.name(), "geocode");
        assert_eq!(TaskKey::Slice(Slice::UvIndex).name(), "uv_index");
        assert_ne!(TaskKey::Slice(Slice::Forecast), TaskKey::Slice(Slice::AirQuality));
    }

    #[tokio::test]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn(TaskKey::Geocode, async { done("a") });

        let action = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");

        assert_eq!(search_of(&action), "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = counter.clone();
        tasks.spawn(TaskKey::Slice(Slice::Forecast), async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c1.fetch_add(1, Ordering::SeqCst);
            done("first")
        });

        let c2 = counter.clone();
        tasks.spawn(TaskKey::Slice(Slice::Forecast), async move {
            c2.fetch_add(10, Ordering::SeqCst);
            done("second")
        });

        let action = rx.recv().await.expect("channel closed");
        assert_eq!(search_of(&action), "second");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_tasks_are_not_replaced() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn_detached(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            done("slow")
        });
        tasks.spawn_detached(async { done("fast") });

        let first = rx.recv().await.expect("channel closed");
        let second = rx.recv().await.expect("channel closed");

        assert_eq!(search_of(&first), "fast");
        assert_eq!(search_of(&second), "slow");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_waits() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce(TaskKey::Geocode, Duration::from_millis(500), async {
            done("London")
        });

        let early = tokio::time::timeout(Duration::from_millis(499), rx.recv()).await;
        assert!(early.is_err());

        let action = tokio::time::timeout(Duration::from_millis(10), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(search_of(&action), "London");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_resets() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        for (i, search) in ["Lon", "Lond", "London"].into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            let search = search.to_string();
            tasks.debounce(TaskKey::Geocode, Duration::from_millis(500), async move {
                done(&search)
            });
        }

        let action = rx.recv().await.expect("channel closed");
        assert_eq!(search_of(&action), "London");

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce(TaskKey::Geocode, Duration::from_millis(500), async {
            done("Paris")
        });
        assert!(tasks.is_running(&TaskKey::Geocode));

        tasks.cancel(&TaskKey::Geocode);
        assert!(!tasks.is_running(&TaskKey::Geocode));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        for slice in Slice::ALL {
            tasks.spawn(TaskKey::Slice(slice), async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                done("slice")
            });
        }
        tasks.spawn_detached(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            done("detached")
        });

        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks.running_keys().count(), 4);

        tasks.cancel_all();

        assert!(tasks.is_empty());
    }
}
