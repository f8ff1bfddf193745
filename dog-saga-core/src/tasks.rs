//! Task manager for async operations
//!
//! Provides lifecycle management for async tasks with support for:
//! - Keyed tasks: spawning with a key cancels the previous task under that key
//! - Detached tasks: run concurrently, never cancelled by newer work
//! - Manual cancellation, and cancellation of everything on shutdown
//!
//! # Example
//!
//! ```ignore
//! use dog_saga_core::tasks::{TaskManager, TaskKey};
//!
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! // Only the latest "fetch" survives
//! tasks.spawn(TaskKey::new("fetch"), async {
//!     let data = fetch_data().await;
//!     Action::DidFetch(data)
//! });
//!
//! // Runs alongside anything else in flight
//! tasks.spawn_detached(async { Action::DidFetch(fetch_data().await) });
//!
//! // Cancel all tasks (e.g., on shutdown)
//! tasks.cancel_all();
//! ```

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::Action;

/// Identifies a task for cancellation and replacement.
///
/// Tasks with the same key are mutually exclusive - spawning a new task
/// with a key that's already running will cancel the existing task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Manages async task lifecycle.
///
/// Every task resolves to an action which is sent to the runtime's action
/// channel. A task that is aborted before completion sends nothing.
pub struct TaskManager<A> {
    keyed: HashMap<TaskKey, AbortHandle>,
    detached: Vec<AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Create a new task manager.
    ///
    /// The `action_tx` channel is used to send actions back to the main loop
    /// when tasks complete.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            keyed: HashMap::new(),
            detached: Vec::new(),
            action_tx,
        }
    }

    /// Spawn a task, cancelling any existing task with the same key.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();

        if self.cancel(&key) {
            tracing::debug!(task = %key.name(), "Superseded in-flight task");
        }

        let handle = self.spawn_sending(future);
        self.keyed.insert(key, handle.abort_handle());
        self
    }

    /// Spawn a task that is never replaced by later spawns.
    ///
    /// Several detached tasks may be in flight at once; their actions arrive
    /// in completion order.
    pub fn spawn_detached<F>(&mut self, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.detached.retain(|handle| !handle.is_finished());

        let handle = self.spawn_sending(future);
        self.detached.push(handle.abort_handle());
        self
    }

    fn spawn_sending<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = A> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = future.await;
            if tx.send(action).is_err() {
                tracing::debug!("Action channel closed, dropping task result");
            }
        })
    }

    /// Cancel a task by key. Returns `true` if an unfinished task was aborted.
    pub fn cancel(&mut self, key: &TaskKey) -> bool {
        match self.keyed.remove(key) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Cancel all running tasks.
    ///
    /// Useful for cleanup on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.keyed.drain() {
            handle.abort();
        }
        for handle in self.detached.drain(..) {
            handle.abort();
        }
    }

    /// Check if a keyed task is currently running.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.keyed
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Get the number of unfinished tasks, keyed and detached.
    pub fn len(&self) -> usize {
        self.keyed
            .values()
            .chain(self.detached.iter())
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Check if there are no unfinished tasks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.keyed.drain() {
            handle.abort();
        }
        for handle in self.detached.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        Done(usize),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Done"
        }
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<TestAction>) -> TestAction {
        tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed")
    }

    #[test]
    fn test_task_key() {
        let k1 = TaskKey::new("test");
        let k2 = TaskKey::from("test");
        let k3: TaskKey = String::from("test").into();

        assert_eq!(k1, k2);
        assert_eq!(k2, k3);
        assert_eq!(k1.name(), "test");
    }

    #[tokio::test]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("test", async { TestAction::Done(42) });

        assert!(matches!(recv(&mut rx).await, TestAction::Done(42)));
    }

    #[tokio::test]
    async fn test_spawn_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = counter.clone();
        tasks.spawn("test", async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c1.fetch_add(1, Ordering::SeqCst);
            TestAction::Done(1)
        });

        let c2 = counter.clone();
        tasks.spawn("test", async move {
            c2.fetch_add(10, Ordering::SeqCst);
            TestAction::Done(2)
        });

        assert!(matches!(recv(&mut rx).await, TestAction::Done(2)));

        // Give the aborted task time to (not) run
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_detached_tasks_arrive_in_completion_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn_detached(async {
            tokio::time::sleep(Duration::from_millis(80)).await;
            TestAction::Done(1)
        });
        tasks.spawn_detached(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            TestAction::Done(2)
        });

        assert_eq!(tasks.len(), 2);
        assert!(matches!(recv(&mut rx).await, TestAction::Done(2)));
        assert!(matches!(recv(&mut rx).await, TestAction::Done(1)));
    }

    #[tokio::test]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("test", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(1)
        });

        assert!(tasks.is_running(&TaskKey::new("test")));
        assert!(tasks.cancel(&TaskKey::new("test")));
        assert!(!tasks.is_running(&TaskKey::new("test")));

        let result = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("a", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(1)
        });
        tasks.spawn_detached(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(2)
        });

        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();

        assert!(tasks.is_empty());
    }

    #[test]
    fn test_new_manager_is_empty() {
        let (tx, _rx) = mpsc::unbounded_channel::<TestAction>();
        let tasks = TaskManager::new(tx);

        assert!(tasks.is_empty());
        assert_eq!(tasks.len(), 0);
    }
}
