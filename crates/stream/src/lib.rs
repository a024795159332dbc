//! Primitives for streaming values across threads and for cooperatively
//! cancelling the work that produces them.
//!
//! [`Sink`] wraps a [`crossbeam_channel`] sender so any number of background
//! producers can deliver values to a single consumer without coordinating
//! with each other. Producers never block on a hung-up consumer: a send into
//! a disconnected channel simply reports `false`.
//!
//! [`CancelToken`] is a one-shot signal shared by reference. Setting it more
//! than once is harmless, and polling it never blocks, so workers can check it
//! between units of work.
//!
//! ```
//! use fanout_stream::{CancelToken, sink};
//!
//! let (tx, rx) = sink::unbounded::<u32>();
//! let token = CancelToken::new();
//!
//! let producer = {
//! 	let tx = tx.clone();
//! 	let token = token.clone();
//! 	std::thread::spawn(move || {
//! 		for value in 0..3 {
//! 			if token.is_cancelled() {
//! 				break;
//! 			}
//! 			tx.send(value);
//! 		}
//! 	})
//! };
//! producer.join().unwrap();
//! drop(tx);
//!
//! token.cancel();
//! token.cancel();
//! assert!(token.is_cancelled());
//! assert_eq!(rx.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
//! ```

mod cancel;
pub mod sink;

pub use cancel::CancelToken;
pub use sink::Sink;
