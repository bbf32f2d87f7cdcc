//! Network collaborators for the roster bot.
//!
//! Home of the spreadsheet feed client, the profile-lookup client behind the
//! [`profile::ProfileSource`] capability trait, and the rate-limited
//! enrichment loop. Everything here talks to the outside world; the pure
//! domain logic stays in `roster-core`.

pub mod enricher;
pub mod profile;
pub mod sheet;

pub use roster_core as core;
