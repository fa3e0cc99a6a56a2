use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// The two timer tasks a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Recurring one-second countdown tick.
    Tick,
    /// One-shot advance after a timed-out reveal.
    AutoAdvance,
}

/// Cancel handle for a scheduled task. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Delivered to the session each time a task fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub kind: TaskKind,
    pub handle: TaskHandle,
}

pub trait TaskScheduler {
    fn schedule_repeating(&mut self, kind: TaskKind, period: Duration) -> TaskHandle;

    fn schedule_once(&mut self, kind: TaskKind, delay: Duration) -> TaskHandle;

    /// Stop a task. Unknown or already finished handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Runs tasks on the tokio runtime and posts `TimerEvent`s to a channel.
///
/// An event sent just before `cancel` can still be sitting in the channel, so consumers must
/// drop events whose handle is no longer live.
pub struct TokioScheduler {
    next_id: u64,
    events: UnboundedSender<TimerEvent>,
    tasks: HashMap<TaskHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<TimerEvent>) {
        let (events, receiver) = unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            events,
            tasks: HashMap::new(),
        };
        (scheduler, receiver)
    }

    /// Tasks spawned and not yet finished or cancelled.
    #[must_use]
    pub fn live_tasks(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn allocate(&mut self) -> TaskHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TaskHandle(self.next_id)
    }
}

impl TaskScheduler for TokioScheduler {
    fn schedule_repeating(&mut self, kind: TaskKind, period: Duration) -> TaskHandle {
        let handle = self.allocate();
        let events = self.events.clone();
        let first = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(TimerEvent { kind, handle }).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn schedule_once(&mut self, kind: TaskKind, delay: Duration) -> TaskHandle {
        let handle = self.allocate();
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(TimerEvent { kind, handle });
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn repeating_task_fires_every_period() {
        let (mut scheduler, mut events) = TokioScheduler::new();
        let handle = scheduler.schedule_repeating(TaskKind::Tick, Duration::from_secs(1));

        let started = Instant::now();
        for expected in 1..=3_u64 {
            let event = events.recv().await.unwrap();
            assert_eq!(event, TimerEvent { kind: TaskKind::Tick, handle });
            assert_eq!(started.elapsed(), Duration::from_secs(expected));
        }
        scheduler.cancel(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_stops_firing() {
        let (mut scheduler, mut events) = TokioScheduler::new();
        let handle = scheduler.schedule_once(TaskKind::AutoAdvance, Duration::from_secs(5));
        scheduler.cancel(handle);

        let fired = tokio::time::timeout(Duration::from_secs(10), events.recv()).await;
        assert!(fired.is_err(), "cancelled task must not fire");
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn handles_are_unique() {
        let (mut scheduler, _events) = TokioScheduler::new();
        let a = scheduler.schedule_once(TaskKind::AutoAdvance, Duration::from_secs(1));
        let b = scheduler.schedule_repeating(TaskKind::Tick, Duration::from_secs(1));
        assert_ne!(a, b);
        assert_eq!(scheduler.live_tasks(), 2);
    }
}
