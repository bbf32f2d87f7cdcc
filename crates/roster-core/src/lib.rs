//! Domain core of the roster bot.
//!
//! Pure logic only: record parsing, aggregation along the platform and
//! administrator dimensions, week-of-month arithmetic, snapshot assembly, and
//! the CLI/collaborator configuration types. Network and filesystem I/O live
//! in the `roster-data` and `roster-runtime` crates.

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod models;
pub mod parser;
pub mod settings;
pub mod snapshot;
