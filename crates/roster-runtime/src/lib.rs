//! Runtime layer of the roster bot.
//!
//! Sequences one batch run (fetch → parse → aggregate → enrich → build →
//! write) and owns the snapshot file sink.

pub mod pipeline;
pub mod sink;

pub use roster_core as core;
pub use roster_data as data;
