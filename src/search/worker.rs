use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::Scope;

use crossbeam_channel::Receiver;
use fanout_api::{KeyMatcher, MatchContext, MatchError, MatcherFactory};
use thiserror::Error;
use tracing::{debug, warn};

/// Counters shared by the key workers of one search.
#[derive(Debug, Default)]
pub(super) struct WorkerTally {
	dispatched: AtomicUsize,
	failed: AtomicUsize,
}

impl WorkerTally {
	pub(super) fn dispatched(&self) -> usize {
		self.dispatched.load(Ordering::Relaxed)
	}

	pub(super) fn failed(&self) -> usize {
		self.failed.load(Ordering::Relaxed)
	}
}

#[derive(Debug, Error)]
enum KeyFailure {
	#[error(transparent)]
	Match(#[from] MatchError),
	#[error("matcher panicked: {0}")]
	Panicked(String),
}

/// Spawn `count` key workers on `scope`, each draining `keys` until the feed
/// closes or cancellation is observed.
///
/// The workers hold the only receivers of the feed, so once they have all
/// exited the producer's next send fails and it stops as well.
pub(super) fn spawn_key_workers<'scope, 'env, I, F>(
	scope: &'scope Scope<'scope, 'env>,
	count: usize,
	keys: Receiver<String>,
	factory: &'env F,
	ctx: &'env MatchContext,
	dataset: &'env [I],
	tally: &'env WorkerTally,
) where
	I: Sync,
	F: MatcherFactory<I>,
{
	for worker in 0..count {
		let keys = keys.clone();
		scope.spawn(move || key_worker(worker, &keys, factory, ctx, dataset, tally));
	}
}

fn key_worker<I, F>(
	worker: usize,
	keys: &Receiver<String>,
	factory: &F,
	ctx: &MatchContext,
	dataset: &[I],
	tally: &WorkerTally,
) where
	F: MatcherFactory<I>,
{
	loop {
		if ctx.cancel.is_cancelled() {
			debug!(worker, "cancellation observed, key worker stopping");
			return;
		}
		let Ok(key) = keys.recv() else {
			return;
		};

		tally.dispatched.fetch_add(1, Ordering::Relaxed);
		if let Err(err) = run_key(factory, ctx, &key, dataset) {
			tally.failed.fetch_add(1, Ordering::Relaxed);
			warn!(worker, key = %key, error = %err, "matching key failed");
		}
	}
}

/// Bind a fresh matcher to the shared context and run it for one key.
fn run_key<I, F>(factory: &F, ctx: &MatchContext, key: &str, dataset: &[I]) -> Result<(), KeyFailure>
where
	F: MatcherFactory<I>,
{
	let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
		let mut matcher = factory.create(ctx.clone())?;
		matcher.run_once(key, dataset)
	}));

	match outcome {
		Ok(result) => result.map_err(KeyFailure::from),
		Err(payload) => Err(KeyFailure::Panicked(panic_message(payload.as_ref()))),
	}
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_owned()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"unknown panic payload".to_owned()
	}
}
