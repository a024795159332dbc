//! Multi-producer delivery handle backed by a [`crossbeam_channel`] sender.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};

/// Write side of a result stream.
///
/// Cloning a sink adds another producer. The consumer owns the matching
/// [`Receiver`]; the stream ends once every sink clone has been dropped.
pub struct Sink<T> {
	tx: Sender<T>,
	delivered: Arc<AtomicU64>,
}

/// Create a sink over an unbounded channel.
#[must_use]
pub fn unbounded<T>() -> (Sink<T>, Receiver<T>) {
	let (tx, rx) = crossbeam_channel::unbounded();
	(Sink::new(tx), rx)
}

/// Create a sink over a bounded channel; producers wait while it is full.
#[must_use]
pub fn bounded<T>(capacity: usize) -> (Sink<T>, Receiver<T>) {
	let (tx, rx) = crossbeam_channel::bounded(capacity);
	(Sink::new(tx), rx)
}

impl<T> Sink<T> {
	/// Wrap an existing sender.
	#[must_use]
	pub fn new(tx: Sender<T>) -> Self {
		Self {
			tx,
			delivered: Arc::new(AtomicU64::new(0)),
		}
	}

	/// Deliver a value to the consumer.
	///
	/// Returns `false` when the consumer has hung up.
	pub fn send(&self, value: T) -> bool {
		if self.tx.send(value).is_err() {
			return false;
		}
		self.delivered.fetch_add(1, Ordering::Relaxed);
		true
	}

	/// Number of values accepted by the channel across every clone.
	#[must_use]
	pub fn delivered(&self) -> u64 {
		self.delivered.load(Ordering::Relaxed)
	}
}

impl<T> Clone for Sink<T> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx.clone(),
			delivered: Arc::clone(&self.delivered),
		}
	}
}

impl<T> From<Sender<T>> for Sink<T> {
	fn from(tx: Sender<T>) -> Self {
		Self::new(tx)
	}
}

impl<T> fmt::Debug for Sink<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Sink")
			.field("delivered", &self.delivered())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;

	#[test]
	fn counts_deliveries_across_clones() {
		let (sink, rx) = unbounded();
		let handles: Vec<_> = (0..4)
			.map(|worker| {
				let sink = sink.clone();
				thread::spawn(move || {
					for value in 0..10 {
						assert!(sink.send(worker * 100 + value));
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}
		drop(sink);

		assert_eq!(rx.iter().count(), 40);
	}

	#[test]
	fn reports_hang_up_without_panicking() {
		let (sink, rx) = unbounded::<&str>();
		drop(rx);
		assert!(!sink.send("lost"));
		assert_eq!(sink.delivered(), 0);
	}

	#[test]
	fn stream_ends_when_last_clone_drops() {
		let (sink, rx) = bounded(1);
		let clone = sink.clone();
		drop(sink);
		thread::spawn(move || {
			clone.send(7);
		});

		assert_eq!(rx.iter().collect::<Vec<_>>(), vec![7]);
	}
}
