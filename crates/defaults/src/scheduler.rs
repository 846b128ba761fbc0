//! Deferred-notification scheduling.
//!
//! The registry never emits its debounced notification inline; it hands a
//! flush task to a [`NotifyScheduler`] so the notification runs strictly
//! after the mutating call stack unwinds. Production embedders use
//! [`TokioScheduler`]; tests and single-threaded embedders use
//! [`ManualScheduler`] and drain it explicitly.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// A deferred unit of work handed to a scheduler.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Defers tasks out of the current call stack.
pub trait NotifyScheduler: Send + Sync {
	/// Queues `task` to run after the current call stack unwinds.
	fn schedule(&self, task: ScheduledTask);
}

/// Scheduler backed by the tokio runtime.
///
/// Each task is spawned as its own runtime task. Panics if used outside a
/// tokio runtime context.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl NotifyScheduler for TokioScheduler {
	fn schedule(&self, task: ScheduledTask) {
		tokio::spawn(async move { task() });
	}
}

/// Scheduler that holds tasks until explicitly drained.
///
/// Gives tests deterministic control over the debounce window: everything
/// scheduled before [`run_pending`](ManualScheduler::run_pending) stays
/// pending, and a single drain runs the whole window.
#[derive(Default)]
pub struct ManualScheduler {
	queue: Mutex<VecDeque<ScheduledTask>>,
}

impl ManualScheduler {
	/// Creates an empty scheduler.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of tasks waiting to run.
	pub fn pending(&self) -> usize {
		self.queue.lock().len()
	}

	/// Runs queued tasks in FIFO order until the queue is empty.
	///
	/// Tasks scheduled by a running task are drained in the same call.
	/// Returns the number of tasks run.
	pub fn run_pending(&self) -> usize {
		let mut ran = 0;
		loop {
			// Re-lock per task so a task may schedule without deadlocking.
			let Some(task) = self.queue.lock().pop_front() else {
				return ran;
			};
			task();
			ran += 1;
		}
	}
}

impl NotifyScheduler for ManualScheduler {
	fn schedule(&self, task: ScheduledTask) {
		self.queue.lock().push_back(task);
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn manual_runs_in_fifo_order() {
		let scheduler = ManualScheduler::new();
		let order = Arc::new(Mutex::new(Vec::new()));

		let o = order.clone();
		scheduler.schedule(Box::new(move || o.lock().push(1)));
		let o = order.clone();
		scheduler.schedule(Box::new(move || o.lock().push(2)));

		assert_eq!(scheduler.pending(), 2);
		assert_eq!(scheduler.run_pending(), 2);
		assert_eq!(*order.lock(), vec![1, 2]);
		assert_eq!(scheduler.pending(), 0);
	}

	#[test]
	fn tasks_scheduled_during_run_are_drained() {
		let scheduler = Arc::new(ManualScheduler::new());
		let hits = Arc::new(AtomicUsize::new(0));

		let inner_scheduler = scheduler.clone();
		let inner_hits = hits.clone();
		scheduler.schedule(Box::new(move || {
			let h = inner_hits.clone();
			inner_scheduler.schedule(Box::new(move || {
				h.fetch_add(10, Ordering::SeqCst);
			}));
			inner_hits.fetch_add(1, Ordering::SeqCst);
		}));

		assert_eq!(scheduler.run_pending(), 2);
		assert_eq!(hits.load(Ordering::SeqCst), 11);
	}

	#[tokio::test]
	async fn tokio_scheduler_defers_to_runtime() {
		let (tx, rx) = tokio::sync::oneshot::channel();
		TokioScheduler.schedule(Box::new(move || {
			tx.send(42u32).ok();
		}));
		assert_eq!(rx.await.unwrap(), 42);
	}
}
