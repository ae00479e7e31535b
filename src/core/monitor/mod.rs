//! Job and alert composition.
//!
//! Jobs broadcast alerts and status updates to the sinks attached to them;
//! the [`Monitor`] owns the jobs of one pass, attaches its default sinks to
//! all of them, runs them in order and finishes every sink once.

pub mod job;
pub mod log_window;
mod runner;
pub mod sink;

pub use job::{AlertDispatch, Check, DispatchReport, Job};
pub use log_window::{parse_timestamp, LogWindowScanner, TimestampGrammar};
pub use runner::{Monitor, RunSummary};
pub use sink::{same_sink, shared, AlertSink, SinkFailure, SinkPhase, SinkRef};
