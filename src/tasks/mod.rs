//! Async Tasks Module
//!
//! Runs blocking cache operations on tokio's blocking thread pool.
//!
//! # Tasks
//! - Blocking offload: every [`AsyncFsCache`] call becomes one
//!   `spawn_blocking` task, so waiting on a key lock never parks a runtime
//!   worker thread.

mod blocking;

pub use blocking::AsyncFsCache;
