use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use fanout_api::matching::FnMatcherFactory;
use fanout_api::{
	CancelToken, ExpandError, KeyExpander, MatchContext, MatchError, ResultList, SearchError,
	SearchResult,
};
use fanout_stream::sink;

use super::*;

struct Entry {
	id: &'static str,
	score: u32,
}

const CATALOG: [Entry; 3] = [
	Entry {
		id: "chrome",
		score: 345_000,
	},
	Entry {
		id: "weibo",
		score: 80_000,
	},
	Entry {
		id: "music",
		score: 80_000,
	},
];

enum Expansion {
	Variants(Vec<String>),
	Fails,
	Panics,
}

struct StubExpander {
	usable: bool,
	expansion: Expansion,
	seen: Mutex<Vec<String>>,
}

impl StubExpander {
	fn returning<S: Into<String>>(variants: impl IntoIterator<Item = S>) -> Arc<Self> {
		Arc::new(Self {
			usable: true,
			expansion: Expansion::Variants(variants.into_iter().map(Into::into).collect()),
			seen: Mutex::new(Vec::new()),
		})
	}
}

impl KeyExpander for StubExpander {
	fn is_usable(&self) -> bool {
		self.usable
	}

	fn expand(&self, key: &str) -> Result<Vec<String>, ExpandError> {
		self.seen.lock().unwrap().push(key.to_owned());
		match &self.expansion {
			Expansion::Variants(variants) => Ok(variants.clone()),
			Expansion::Fails => Err(ExpandError::Unavailable),
			Expansion::Panics => panic!("expansion data corrupted"),
		}
	}
}

type KeyLog = Arc<Mutex<Vec<String>>>;

/// Matcher that records every key and emits every entry.
fn recording_matcher(
	log: KeyLog,
) -> FnMatcherFactory<impl Fn(&str, &[Entry], &MatchContext) -> Result<(), MatchError> + Send + Sync>
{
	FnMatcherFactory::new(move |key: &str, dataset: &[Entry], ctx: &MatchContext| {
		log.lock().unwrap().push(key.to_owned());
		for entry in dataset {
			ctx.emit(SearchResult::new(entry.id, entry.id, entry.score));
		}
		Ok(())
	})
}

fn wait_for_cancel(ctx: &MatchContext) {
	let deadline = Instant::now() + Duration::from_secs(5);
	while !ctx.should_stop() && Instant::now() < deadline {
		thread::sleep(Duration::from_millis(1));
	}
}

#[test]
fn zero_parallelism_selects_the_default() {
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.max_parallelism(0)
		.build(recording_matcher(KeyLog::default()))
		.unwrap();

	assert_eq!(transaction.max_parallelism(), DEFAULT_PARALLELISM);
}

#[test]
fn positive_parallelism_is_kept() {
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::new(
		None,
		Some(tx),
		CancelToken::new(),
		3,
		recording_matcher(KeyLog::default()),
	)
	.unwrap();

	assert_eq!(transaction.max_parallelism(), 3);
}

#[test]
fn missing_sink_is_rejected() {
	let err = Transaction::new(
		Some(StubExpander::returning(vec!["ni"]) as Arc<dyn KeyExpander>),
		None,
		CancelToken::new(),
		0,
		recording_matcher(KeyLog::default()),
	)
	.unwrap_err();
	assert!(matches!(err, SearchError::InvalidArgument(_)));

	let err = Transaction::builder()
		.max_parallelism(8)
		.build(recording_matcher(KeyLog::default()))
		.unwrap_err();
	assert!(matches!(err, SearchError::InvalidArgument(_)));
}

#[test]
fn query_is_trimmed_and_escaped_before_matching() {
	assert_eq!(normalize_query("  a.b*c \t"), r"a\.b\*c");

	let log = KeyLog::default();
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.build(recording_matcher(Arc::clone(&log)))
		.unwrap();
	transaction.search("  a.b*c ", &CATALOG);

	assert_eq!(*log.lock().unwrap(), vec![r"a\.b\*c".to_owned()]);
}

#[test]
fn expander_sees_the_escaped_key_and_every_key_runs_once() {
	let log = KeyLog::default();
	let expander = StubExpander::returning(vec!["ni", "nihao", "ni", "", "nh"]);
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.expander(Arc::clone(&expander) as Arc<dyn KeyExpander>)
		.build(recording_matcher(Arc::clone(&log)))
		.unwrap();

	let summary = transaction.search("nh", &CATALOG);

	assert_eq!(*expander.seen.lock().unwrap(), vec!["nh".to_owned()]);
	let mut keys = log.lock().unwrap().clone();
	keys.sort();
	assert_eq!(keys, vec!["nh", "ni", "nihao"]);
	assert_eq!(summary.keys_dispatched, 3);
	assert_eq!(summary.keys_failed, 0);
	assert!(!summary.cancelled);
}

#[test]
fn match_on_one_expanded_key_reaches_the_sink() {
	let expander = StubExpander::returning(vec!["ni", "nihao"]);
	let (tx, rx) = sink::unbounded();
	let factory = FnMatcherFactory::new(|key: &str, dataset: &[Entry], ctx: &MatchContext| {
		if key == "nihao" {
			let entry = &dataset[0];
			ctx.emit(SearchResult::new(entry.id, "你好", entry.score));
		}
		Ok::<(), MatchError>(())
	});
	let transaction = Transaction::builder()
		.sink(tx)
		.expander(expander as Arc<dyn KeyExpander>)
		.build(factory)
		.unwrap();

	transaction.search("nh", &CATALOG);
	drop(transaction);

	let results = ResultList::collect_from(&rx);
	assert_eq!(results.len(), 1);
	assert_eq!(results[0].name, "你好");
}

#[test]
fn unusable_failing_or_panicking_expander_falls_back_to_the_query() {
	for expander in [
		Arc::new(StubExpander {
			usable: false,
			expansion: Expansion::Variants(vec!["ni".to_owned()]),
			seen: Mutex::new(Vec::new()),
		}),
		Arc::new(StubExpander {
			usable: true,
			expansion: Expansion::Fails,
			seen: Mutex::new(Vec::new()),
		}),
		Arc::new(StubExpander {
			usable: true,
			expansion: Expansion::Panics,
			seen: Mutex::new(Vec::new()),
		}),
	] {
		let log = KeyLog::default();
		let (tx, _rx) = sink::unbounded();
		let transaction = Transaction::builder()
			.sink(tx)
			.expander(expander as Arc<dyn KeyExpander>)
			.build(recording_matcher(Arc::clone(&log)))
			.unwrap();

		let summary = transaction.search("nh", &CATALOG);

		assert_eq!(*log.lock().unwrap(), vec!["nh".to_owned()]);
		assert_eq!(summary.keys_dispatched, 1);
	}
}

#[test]
fn parallelism_bound_reaches_every_matcher() {
	let bounds = Arc::new(Mutex::new(Vec::new()));
	let recorded = Arc::clone(&bounds);
	let factory = FnMatcherFactory::new(move |_: &str, _: &[Entry], ctx: &MatchContext| {
		recorded.lock().unwrap().push(ctx.max_parallelism);
		Ok::<(), MatchError>(())
	});
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.expander(StubExpander::returning(vec!["a", "b"]) as Arc<dyn KeyExpander>)
		.max_parallelism(7)
		.build(factory)
		.unwrap();

	transaction.search("c", &CATALOG);

	assert_eq!(*bounds.lock().unwrap(), vec![7, 7, 7]);
}

#[test]
fn cancelled_before_search_dispatches_nothing() {
	let log = KeyLog::default();
	let token = CancelToken::new();
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.cancel_token(token.clone())
		.expander(StubExpander::returning(vec!["ni", "nihao"]) as Arc<dyn KeyExpander>)
		.build(recording_matcher(Arc::clone(&log)))
		.unwrap();

	token.cancel();
	let summary = transaction.search("nh", &CATALOG);

	assert!(log.lock().unwrap().is_empty());
	assert_eq!(summary.keys_dispatched, 0);
	assert!(summary.cancelled);
}

#[test]
fn cancellation_stops_workers_from_pulling_more_keys() {
	let variants = std::iter::once("stop".to_owned()).chain((0..100).map(|n| format!("k{n}")));
	let factory = FnMatcherFactory::new(|key: &str, _: &[Entry], ctx: &MatchContext| {
		if key == "stop" {
			ctx.cancel.cancel();
		} else {
			wait_for_cancel(ctx);
		}
		Ok::<(), MatchError>(())
	});
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.expander(StubExpander::returning(variants) as Arc<dyn KeyExpander>)
		.build(factory)
		.unwrap();

	let summary = transaction.search("q", &CATALOG);

	assert!(summary.cancelled);
	assert!(summary.keys_dispatched >= 1);
	assert!(summary.keys_dispatched <= KEY_WORKERS);
}

#[test]
fn search_joins_when_cancelled_from_another_thread() {
	let factory = FnMatcherFactory::new(|_: &str, _: &[Entry], ctx: &MatchContext| {
		wait_for_cancel(ctx);
		Ok::<(), MatchError>(())
	});
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.expander(StubExpander::returning(vec!["a", "b", "c", "d", "e", "f", "g"]) as Arc<dyn KeyExpander>)
		.build(factory)
		.unwrap();

	let token = transaction.cancel_token();
	let canceller = thread::spawn(move || {
		thread::sleep(Duration::from_millis(20));
		token.cancel();
		token.cancel();
	});

	let started = Instant::now();
	let summary = transaction.search("q", &CATALOG);
	canceller.join().unwrap();

	assert!(summary.cancelled);
	assert!(summary.keys_dispatched < 8);
	assert!(started.elapsed() < Duration::from_secs(5));
	transaction.cancel();
}

#[test]
fn failing_and_panicking_keys_do_not_fail_the_search() {
	let factory = FnMatcherFactory::new(|key: &str, dataset: &[Entry], ctx: &MatchContext| {
		match key {
			"bad" => Err(MatchError::Failed("bad key".into())),
			"boom" => panic!("matcher exploded"),
			_ => {
				for entry in dataset {
					ctx.emit(SearchResult::new(entry.id, entry.id, entry.score));
				}
				Ok(())
			}
		}
	});
	let (tx, rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.expander(StubExpander::returning(vec!["bad", "boom"]) as Arc<dyn KeyExpander>)
		.build(factory)
		.unwrap();

	let summary = transaction.search("good", &CATALOG);
	drop(transaction);

	assert_eq!(summary.keys_dispatched, 3);
	assert_eq!(summary.keys_failed, 2);
	assert_eq!(ResultList::collect_from(&rx).len(), CATALOG.len());
}

#[test]
fn a_transaction_searches_only_once() {
	let log = KeyLog::default();
	let (tx, _rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.build(recording_matcher(Arc::clone(&log)))
		.unwrap();

	transaction.search("first", &CATALOG);
	let second = transaction.search("second", &CATALOG);

	assert_eq!(second, SearchSummary::default());
	assert_eq!(*log.lock().unwrap(), vec!["first".to_owned()]);
}

#[test]
fn empty_query_streams_every_item_and_sorts_by_score() {
	let (tx, rx) = sink::unbounded();
	let transaction = Transaction::builder()
		.sink(tx)
		.build(recording_matcher(KeyLog::default()))
		.unwrap();

	transaction.search("", &CATALOG);
	drop(transaction);

	let mut results = ResultList::collect_from(&rx);
	results.sort();

	assert_eq!(results.len(), 3);
	assert_eq!(results[0].id.as_str(), "chrome");
	let rest: HashMap<&str, u32> = results[1..]
		.iter()
		.map(|r| (r.id.as_str(), r.score))
		.collect();
	assert_eq!(rest.get("weibo"), Some(&80_000));
	assert_eq!(rest.get("music"), Some(&80_000));
}
