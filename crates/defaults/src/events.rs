//! Listener registration and synchronous event emission.
//!
//! [`EventEmitter`] keeps listeners in a slab so registration hands back a
//! stable key; the returned [`Subscription`] deregisters on drop. Emission
//! snapshots the listener set before calling out, so a listener may
//! re-enter the emitter (or the registry owning it) without deadlocking.

use std::sync::Arc;

use parking_lot::Mutex;
use slab::Slab;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A set of listeners invoked synchronously with a shared payload.
pub struct EventEmitter<T: ?Sized> {
	listeners: Arc<Mutex<Slab<Listener<T>>>>,
}

impl<T: ?Sized + 'static> Default for EventEmitter<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: ?Sized + 'static> EventEmitter<T> {
	/// Creates an emitter with no listeners.
	pub fn new() -> Self {
		Self {
			listeners: Arc::new(Mutex::new(Slab::new())),
		}
	}

	/// Registers a listener.
	///
	/// The listener stays registered until the returned [`Subscription`] is
	/// dropped.
	pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
		let key = self.listeners.lock().insert(Arc::new(listener));
		let slot = Arc::downgrade(&self.listeners);
		Subscription {
			cancel: Some(Box::new(move || {
				if let Some(listeners) = slot.upgrade() {
					listeners.lock().try_remove(key);
				}
			})),
		}
	}

	/// Invokes every registered listener with `payload`.
	///
	/// Listeners registered or removed while emission is in flight take
	/// effect from the next emission on.
	pub fn emit(&self, payload: &T) {
		let snapshot: Vec<Listener<T>> = self
			.listeners
			.lock()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();
		for listener in snapshot {
			listener(payload);
		}
	}

	/// Returns the number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.lock().len()
	}
}

/// Handle keeping a listener registered; dropping it deregisters.
pub struct Subscription {
	cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}
