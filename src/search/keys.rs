use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::thread::Scope;

use crossbeam_channel::{Receiver, bounded};
use fanout_api::{CancelToken, KeyExpander};
use tracing::{debug, warn};

use super::worker::panic_message;

/// Trim `query` and escape it so every matcher treats it as literal text.
#[must_use]
pub fn normalize_query(query: &str) -> String {
	regex::escape(query.trim())
}

/// Start the producer side of the key feed on `scope`.
///
/// The feed yields the expander's variants first and the escaped query last.
/// The channel is a rendezvous channel, so the producer only runs ahead of the
/// workers by the key being handed over. It stops early once `cancel` is set
/// or once every receiver has been dropped.
pub(super) fn spawn_key_feed<'scope, 'env>(
	scope: &'scope Scope<'scope, 'env>,
	expander: Option<&'env dyn KeyExpander>,
	escaped: String,
	cancel: CancelToken,
) -> Receiver<String> {
	let (tx, rx) = bounded(0);

	scope.spawn(move || {
		let keys = expansion_keys(expander, &escaped)
			.into_iter()
			.chain(std::iter::once(escaped));
		for key in keys {
			if cancel.is_cancelled() {
				debug!("key feed stopped by cancellation");
				return;
			}
			if tx.send(key).is_err() {
				return;
			}
		}
	});

	rx
}

/// Ask the expander for alternate keys, swallowing any failure.
///
/// An expander that errors or panics contributes no keys. Empty variants,
/// repeats, and the escaped query itself are dropped so that every key is
/// matched at most once.
pub(super) fn expansion_keys(expander: Option<&dyn KeyExpander>, escaped: &str) -> Vec<String> {
	let Some(expander) = expander else {
		return Vec::new();
	};

	let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
		if !expander.is_usable() {
			debug!("key expander unusable, matching the query only");
			return Ok(Vec::new());
		}
		expander.expand(escaped)
	}));

	let variants = match outcome {
		Ok(Ok(variants)) => variants,
		Ok(Err(err)) => {
			warn!(key = %escaped, error = %err, "key expansion failed");
			return Vec::new();
		}
		Err(payload) => {
			warn!(
				key = %escaped,
				panic = %panic_message(payload.as_ref()),
				"key expander panicked"
			);
			return Vec::new();
		}
	};

	let mut seen = HashSet::new();
	let keys: Vec<String> = variants
		.into_iter()
		.filter(|variant| !variant.is_empty() && variant != escaped)
		.filter(|variant| seen.insert(variant.clone()))
		.collect();
	debug!(key = %escaped, variants = keys.len(), "expanded key");
	keys
}
