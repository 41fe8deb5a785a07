//! Three ways to sequence dependent asynchronous lookups.
//!
//! A simulated API ([`SimulatedApi`]) answers three lookups (a user, the
//! user's posts, a post's comments) after a random delay, or fails when an
//! identifier is missing. Each lookup depends on the previous one's result.
//! The [`sequencer`] module strings them together three times: with nested
//! callbacks, with chained futures, and with `async`/`await`. The three are
//! functionally identical.
//!
//! Everything runs on one thread. An [`EventLoop`] owns the timers of a run
//! and drives it to completion:
//!
//! ```
//! use async_sequencing::{sequencer::linear, EventLoop, FixedDelay, Promised, SimulatedApi};
//!
//! let event_loop = EventLoop::new();
//! let api = Promised::new(SimulatedApi::new(event_loop.clone(), FixedDelay::ZERO));
//! let run = event_loop.block_on(linear::run(&api, 4)).unwrap();
//! assert_eq!(run.outcome.unwrap().len(), 2);
//! ```

pub mod chain;
pub mod delay;
pub mod error;
pub mod event_loop;
pub mod model;
pub mod promise;
pub mod sequencer;
pub mod source;

pub use chain::Chain;
pub use delay::{DelayConfig, DelayStrategy, FixedDelay, UniformDelay};
pub use error::{EventLoopError, FetchError};
pub use event_loop::EventLoop;
pub use model::{Comment, Id, Post, User, MISSING};
pub use promise::{Promised, Settlement};
pub use sequencer::{Run, Stage};
pub use source::{Callback, DataSource, SimulatedApi};
