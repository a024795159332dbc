use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot cancellation signal shared between a requester and its workers.
///
/// Clones observe the same signal. The transition from "running" to
/// "cancelled" happens at most once; repeated calls to [`CancelToken::cancel`]
/// are no-ops.
#[derive(Clone, Default)]
pub struct CancelToken {
	cancelled: Arc<AtomicBool>,
}

impl CancelToken {
	/// Create a token in the running state.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Raise the signal. Calling this on an already cancelled token does nothing.
	pub fn cancel(&self) {
		self.try_cancel();
	}

	/// Raise the signal, returning `true` only for the call that flipped it.
	pub fn try_cancel(&self) -> bool {
		self.cancelled
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_ok()
	}

	/// Poll the signal without blocking.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Acquire)
	}

	/// Whether `other` observes the same underlying signal.
	#[must_use]
	pub fn same_signal(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.cancelled, &other.cancelled)
	}
}

impl fmt::Debug for CancelToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CancelToken")
			.field("cancelled", &self.is_cancelled())
			.finish()
	}
}
